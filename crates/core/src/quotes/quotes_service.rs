use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::quotes_calculator::total_quote_value;
use super::quotes_model::{
    CenterStone, CenterStoneRequest, MeleeGroup, NewQuote, PricedItem, PricingNotice, Quote,
    QuoteItemDraft, QuoteItemRequest, QuoteStatus,
};
use super::quotes_traits::{QuoteRepositoryTrait, QuoteServiceTrait};
use crate::diamonds::{DiamondServiceTrait, DiamondSpecs, PricingSource, MANUAL_ENTRY_MESSAGE};
use crate::errors::{Error, Result};
use crate::metals::MetalServiceTrait;
use crate::stores::StoreRepositoryTrait;

const METAL_PRICE_UNAVAILABLE_MESSAGE: &str =
    "No metal price history available - enter a price per dwt manually.";

pub struct QuoteService {
    repository: Arc<dyn QuoteRepositoryTrait>,
    store_repository: Arc<dyn StoreRepositoryTrait>,
    metal_service: Arc<dyn MetalServiceTrait>,
    diamond_service: Arc<dyn DiamondServiceTrait>,
}

impl QuoteService {
    pub fn new(
        repository: Arc<dyn QuoteRepositoryTrait>,
        store_repository: Arc<dyn StoreRepositoryTrait>,
        metal_service: Arc<dyn MetalServiceTrait>,
        diamond_service: Arc<dyn DiamondServiceTrait>,
    ) -> Self {
        QuoteService {
            repository,
            store_repository,
            metal_service,
            diamond_service,
        }
    }

    fn price_center_stone(
        &self,
        store_id: &str,
        index: usize,
        request: CenterStoneRequest,
        notices: &mut Vec<PricingNotice>,
    ) -> Result<CenterStone> {
        let (price_per_carat, pricing_source) = match request.manual_price_per_carat {
            Some(price) => (price, PricingSource::Manual),
            None => {
                let specs = DiamondSpecs {
                    shape: request.shape.clone(),
                    color: request.color.clone(),
                    clarity: request.clarity.clone(),
                    carat: request.carat,
                };
                let result = self.diamond_service.resolve_price(store_id, &specs)?;
                match result.price_per_carat {
                    Some(price) => (price, result.source),
                    None => {
                        notices.push(PricingNotice {
                            target: format!("centerStones[{}]", index),
                            message: result
                                .error
                                .unwrap_or_else(|| MANUAL_ENTRY_MESSAGE.to_string()),
                            requires_auth: result.requires_auth,
                            is_expired: result.is_expired,
                        });
                        (Decimal::ZERO, PricingSource::Manual)
                    }
                }
            }
        };

        let mut stone = CenterStone {
            shape: request.shape,
            color: request.color,
            clarity: request.clarity,
            carat: request.carat,
            price_per_carat,
            pricing_source,
            percent_off: request.percent_off,
            value: Decimal::ZERO,
            cut: request.cut,
            grading_lab: request.grading_lab,
            inscription: request.inscription,
        };
        stone.recompute()?;
        Ok(stone)
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    fn price_item(&self, store_id: &str, request: QuoteItemRequest) -> Result<PricedItem> {
        let mut notices = Vec::new();
        let mut draft = QuoteItemDraft::new(request.description);
        draft.set_metal(request.metal_type, request.metal_color, &request.purity);
        draft.set_weight(request.weight_dwt);

        let price_per_dwt = match request.manual_price_per_dwt {
            Some(price) => price,
            None => {
                let resolved =
                    self.metal_service
                        .resolve_price(store_id, request.metal_type, &request.purity)?;
                if !resolved.is_priced() {
                    notices.push(PricingNotice {
                        target: "metal".to_string(),
                        message: METAL_PRICE_UNAVAILABLE_MESSAGE.to_string(),
                        requires_auth: false,
                        is_expired: false,
                    });
                }
                resolved.price_per_dwt
            }
        };
        draft.set_metal_price(price_per_dwt);

        for (index, stone) in request.center_stones.into_iter().enumerate() {
            let stone = self.price_center_stone(store_id, index, stone, &mut notices)?;
            draft.add_center_stone(stone)?;
        }
        for group in request.melee_groups {
            draft.add_melee_group(MeleeGroup::new(
                group.shape,
                group.color,
                group.clarity,
                group.count,
                group.total_carat,
                group.price_per_point,
            )?)?;
        }

        let item = draft.finalize()?;
        debug!(
            "Priced item {} for store {}: {} ({} notices)",
            item.id,
            store_id,
            item.total_value,
            notices.len()
        );
        Ok(PricedItem { item, notices })
    }

    async fn save_quote(&self, store_id: &str, new_quote: NewQuote) -> Result<Quote> {
        self.store_repository.get_by_id(store_id)?;
        new_quote.validate()?;

        let mut items = new_quote.items;
        for item in &mut items {
            item.recompute()?;
        }
        let total_value = total_quote_value(&items)?;

        let mut customer = new_quote.customer;
        customer.name = customer.name.trim().to_string();

        let quote = self
            .repository
            .create(Quote {
                id: Uuid::new_v4().to_string(),
                store_id: store_id.to_string(),
                customer,
                items,
                total_value,
                status: QuoteStatus::Completed,
                created_at: Utc::now(),
            })
            .await?;
        info!(
            "Saved quote {} for store {} ({} items, total {})",
            quote.id,
            store_id,
            quote.items.len(),
            quote.total_value
        );
        Ok(quote)
    }

    fn list_quotes(&self, store_id: &str) -> Result<Vec<Quote>> {
        self.repository.list_by_store(store_id)
    }

    fn get_quote(&self, store_id: &str, quote_id: &str) -> Result<Quote> {
        let quote = self.repository.get_by_id(quote_id)?;
        if quote.store_id != store_id {
            return Err(Error::NotFound(format!("Quote {} not found", quote_id)));
        }
        Ok(quote)
    }
}
