#[cfg(test)]
mod tests {
    use crate::diamonds::{
        CsvUploadSummary, DiamondPriceEntry, DiamondPriceResult, DiamondServiceTrait,
        DiamondSpecs, PriceEntryCount, PricingSource, ShapeType, VendorPriceListStatus,
        STALE_VENDOR_LIST_MESSAGE,
    };
    use crate::errors::{Error, Result};
    use crate::metals::{
        find_purity, BackfillResult, BackfillStatus, MetalPriceRecord, MetalPriceSource,
        MetalServiceTrait, MetalSyncResult, MetalType, PricingBasis, PurityPrice,
        ResolvedMetalPrice,
    };
    use crate::quotes::{
        CenterStoneRequest, CustomerInfo, MeleeGroupRequest, NewQuote, Quote,
        QuoteItemRequest, QuoteRepositoryTrait, QuoteService, QuoteServiceTrait, QuoteStatus,
    };
    use crate::stores::{
        MetalMarkup, NewStore, PricingSettingsUpdate, Store, StoreRepositoryTrait, StoreStatus,
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    // --- Mock QuoteRepository ---
    #[derive(Default)]
    struct MockQuoteRepository {
        quotes: Mutex<Vec<Quote>>,
    }

    #[async_trait]
    impl QuoteRepositoryTrait for MockQuoteRepository {
        async fn create(&self, quote: Quote) -> Result<Quote> {
            self.quotes.lock().unwrap().push(quote.clone());
            Ok(quote)
        }

        fn list_by_store(&self, store_id: &str) -> Result<Vec<Quote>> {
            Ok(self
                .quotes
                .lock()
                .unwrap()
                .iter()
                .filter(|q| q.store_id == store_id)
                .cloned()
                .collect())
        }

        fn get_by_id(&self, quote_id: &str) -> Result<Quote> {
            self.quotes
                .lock()
                .unwrap()
                .iter()
                .find(|q| q.id == quote_id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Quote {} not found", quote_id)))
        }
    }

    // --- Mock MetalService ---
    struct MockMetalService {
        /// Discounted pure price per dwt; `None` means no history
        price_per_dwt: Option<Decimal>,
    }

    #[async_trait]
    impl MetalServiceTrait for MockMetalService {
        async fn sync_metal_prices(&self) -> Result<MetalSyncResult> {
            unimplemented!()
        }

        async fn backfill_price_history(&self, _days: i64) -> Result<BackfillResult> {
            unimplemented!()
        }

        fn backfill_status(&self, _days: i64) -> Result<Vec<BackfillStatus>> {
            unimplemented!()
        }

        fn latest_prices(&self) -> Result<Vec<MetalPriceRecord>> {
            unimplemented!()
        }

        fn price_history(&self, _metal: MetalType, _days: i64) -> Result<Vec<MetalPriceRecord>> {
            unimplemented!()
        }

        fn basis_prices(&self, _basis: PricingBasis) -> Result<Vec<MetalPriceRecord>> {
            unimplemented!()
        }

        fn resolve_price(
            &self,
            _store_id: &str,
            metal: MetalType,
            purity_label: &str,
        ) -> Result<ResolvedMetalPrice> {
            let purity = find_purity(metal, purity_label)?;
            let (price, source) = match self.price_per_dwt {
                Some(price) => (price * purity.fraction_of_pure, MetalPriceSource::History),
                None => (Decimal::ZERO, MetalPriceSource::Unavailable),
            };
            Ok(ResolvedMetalPrice {
                metal_type: metal,
                purity_label: purity.label.to_string(),
                fraction_of_pure: purity.fraction_of_pure,
                base_price_per_dwt: self.price_per_dwt.unwrap_or_default(),
                discount_percent: Decimal::ZERO,
                price_per_dwt: price,
                source,
            })
        }

        fn purity_prices(&self, _store_id: &str, _metal: MetalType) -> Result<Vec<PurityPrice>> {
            unimplemented!()
        }
    }

    // --- Mock DiamondService ---
    struct MockDiamondService {
        result: DiamondPriceResult,
    }

    #[async_trait]
    impl DiamondServiceTrait for MockDiamondService {
        fn resolve_price(
            &self,
            _store_id: &str,
            specs: &DiamondSpecs,
        ) -> Result<DiamondPriceResult> {
            specs.validate()?;
            Ok(self.result.clone())
        }

        async fn upload_price_csv(
            &self,
            _shape_type: ShapeType,
            _content: &[u8],
        ) -> Result<CsvUploadSummary> {
            unimplemented!()
        }

        fn list_entries(&self, _shape_type: ShapeType) -> Result<Vec<DiamondPriceEntry>> {
            unimplemented!()
        }

        fn entry_counts(&self) -> Result<Vec<PriceEntryCount>> {
            unimplemented!()
        }

        fn vendor_price_list_status(
            &self,
            _store_id: &str,
        ) -> Result<Vec<VendorPriceListStatus>> {
            unimplemented!()
        }
    }

    // --- Mock StoreRepository ---
    struct MockStoreRepository;

    #[async_trait]
    impl StoreRepositoryTrait for MockStoreRepository {
        async fn create(&self, _new_store: NewStore) -> Result<Store> {
            unimplemented!()
        }

        fn get_by_id(&self, store_id: &str) -> Result<Store> {
            if !store_id.starts_with("store-") {
                return Err(Error::NotFound(format!("Store {} not found", store_id)));
            }
            let now = Utc::now();
            Ok(Store {
                id: store_id.to_string(),
                name: "Main Street Jewelers".to_string(),
                address: "1 Main St".to_string(),
                phone: "555-0100".to_string(),
                website: None,
                status: StoreStatus::Active,
                admin_email: "owner@mainstreet.example".to_string(),
                admin_name: "Pat Owner".to_string(),
                admin_password_hash: String::new(),
                metal_markup: MetalMarkup::default(),
                pricing_basis: PricingBasis::Yeob,
                discount_percent: dec!(10),
                created_at: now,
                updated_at: now,
            })
        }

        fn find_by_admin_email(&self, _email: &str) -> Result<Option<Store>> {
            unimplemented!()
        }

        fn list(&self) -> Result<Vec<Store>> {
            unimplemented!()
        }

        async fn update_status(&self, _store_id: &str, _status: StoreStatus) -> Result<Store> {
            unimplemented!()
        }

        async fn update_pricing_settings(
            &self,
            _store_id: &str,
            _update: &PricingSettingsUpdate,
        ) -> Result<Store> {
            unimplemented!()
        }
    }

    fn service(metal_price: Option<Decimal>, diamond: DiamondPriceResult) -> QuoteService {
        QuoteService::new(
            Arc::new(MockQuoteRepository::default()),
            Arc::new(MockStoreRepository),
            Arc::new(MockMetalService {
                price_per_dwt: metal_price,
            }),
            Arc::new(MockDiamondService { result: diamond }),
        )
    }

    fn ring_request() -> QuoteItemRequest {
        QuoteItemRequest {
            description: "Engagement ring".to_string(),
            metal_type: MetalType::Xau,
            metal_color: Some("Yellow".to_string()),
            purity: "14K (58.3%)".to_string(),
            weight_dwt: dec!(4),
            manual_price_per_dwt: None,
            center_stones: vec![CenterStoneRequest {
                shape: "Round".to_string(),
                color: "G".to_string(),
                clarity: "VS1".to_string(),
                carat: dec!(1.20),
                percent_off: dec!(40),
                manual_price_per_carat: None,
                cut: Some("Excellent".to_string()),
                grading_lab: Some("GIA".to_string()),
                inscription: None,
            }],
            melee_groups: vec![MeleeGroupRequest {
                shape: "Round".to_string(),
                color: "G".to_string(),
                clarity: "SI1".to_string(),
                count: 20,
                total_carat: dec!(0.25),
                price_per_point: dec!(8),
            }],
        }
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: " Sam Seller ".to_string(),
            phone: Some("555-0199".to_string()),
            email: None,
            address: None,
        }
    }

    #[test]
    fn test_price_item_resolves_metal_and_stones() {
        let service = service(
            Some(dec!(90)),
            DiamondPriceResult::priced(dec!(5000), PricingSource::Rapaport),
        );

        let priced = service.price_item("store-1", ring_request()).unwrap();
        let item = priced.item;
        assert!(priced.notices.is_empty());
        assert_eq!(item.price_per_dwt, dec!(52.47));
        assert_eq!(item.metal_value, dec!(209.88));
        assert_eq!(item.center_stones[0].pricing_source, PricingSource::Rapaport);
        assert_eq!(item.center_stones[0].value, dec!(3600));
        assert_eq!(item.melee_groups[0].value, dec!(200));
        assert_eq!(item.total_value, dec!(4009.88));
    }

    #[test]
    fn test_unpriced_stone_gets_notice_and_zero_value() {
        let service = service(
            Some(dec!(90)),
            DiamondPriceResult::expired(STALE_VENDOR_LIST_MESSAGE),
        );

        let priced = service.price_item("store-1", ring_request()).unwrap();
        assert_eq!(priced.notices.len(), 1);
        assert_eq!(priced.notices[0].target, "centerStones[0]");
        assert!(priced.notices[0].is_expired);

        let stone = &priced.item.center_stones[0];
        assert_eq!(stone.value, Decimal::ZERO);
        assert_eq!(stone.pricing_source, PricingSource::Manual);
        assert_eq!(priced.item.total_value, dec!(409.88));
    }

    #[test]
    fn test_manual_prices_skip_resolution() {
        let service = service(None, DiamondPriceResult::not_found("none".to_string()));
        let mut request = ring_request();
        request.manual_price_per_dwt = Some(dec!(50));
        request.center_stones[0].manual_price_per_carat = Some(dec!(4000));
        request.center_stones[0].percent_off = Decimal::ZERO;

        let priced = service.price_item("store-1", request).unwrap();
        assert!(priced.notices.is_empty());
        assert_eq!(priced.item.metal_value, dec!(200));
        assert_eq!(priced.item.center_stones[0].value, dec!(4800));
        assert_eq!(priced.item.center_stones[0].pricing_source, PricingSource::Manual);
    }

    #[test]
    fn test_missing_metal_history_adds_notice() {
        let service = service(
            None,
            DiamondPriceResult::priced(dec!(5000), PricingSource::DevCsv),
        );
        let priced = service.price_item("store-1", ring_request()).unwrap();
        assert_eq!(priced.item.metal_value, Decimal::ZERO);
        assert!(priced.notices.iter().any(|n| n.target == "metal"));
    }

    #[test]
    fn test_price_item_rejects_bad_purity() {
        let service = service(
            Some(dec!(90)),
            DiamondPriceResult::priced(dec!(5000), PricingSource::Rapaport),
        );
        let mut request = ring_request();
        request.metal_type = MetalType::Xag;
        assert!(matches!(
            service.price_item("store-1", request),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_price_item_rejects_out_of_range_values() {
        let service = service(
            Some(dec!(90)),
            DiamondPriceResult::priced(dec!(5000), PricingSource::Rapaport),
        );
        let mut request = ring_request();
        request.manual_price_per_dwt = Some(dec!(2));
        request.weight_dwt = Decimal::MAX;
        assert!(matches!(
            service.price_item("store-1", request),
            Err(Error::Validation(_))
        ));

        let mut request = ring_request();
        request.melee_groups[0].total_carat = Decimal::MAX;
        assert!(matches!(
            service.price_item("store-1", request),
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_save_quote_recomputes_totals() {
        let service = service(
            Some(dec!(90)),
            DiamondPriceResult::priced(dec!(5000), PricingSource::Rapaport),
        );
        let first = service.price_item("store-1", ring_request()).unwrap().item;
        let mut second = service.price_item("store-1", ring_request()).unwrap().item;
        // a client-side total is never trusted
        second.total_value = dec!(1);

        let quote = service
            .save_quote(
                "store-1",
                NewQuote {
                    customer: customer(),
                    items: vec![first, second],
                },
            )
            .await
            .unwrap();
        assert_eq!(quote.status, QuoteStatus::Completed);
        assert_eq!(quote.customer.name, "Sam Seller");
        assert_eq!(quote.items[1].total_value, dec!(4009.88));
        assert_eq!(quote.total_value, dec!(8019.76));

        let listed = service.list_quotes("store-1").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(service.get_quote("store-1", &quote.id).unwrap(), quote);
        assert!(matches!(
            service.get_quote("store-2", &quote.id),
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_save_quote_requires_name_and_items() {
        let service = service(
            Some(dec!(90)),
            DiamondPriceResult::priced(dec!(5000), PricingSource::Rapaport),
        );
        let item = service.price_item("store-1", ring_request()).unwrap().item;

        let no_name = service
            .save_quote(
                "store-1",
                NewQuote {
                    customer: CustomerInfo::default(),
                    items: vec![item],
                },
            )
            .await;
        assert!(matches!(no_name, Err(Error::Validation(_))));

        let no_items = service
            .save_quote(
                "store-1",
                NewQuote {
                    customer: customer(),
                    items: vec![],
                },
            )
            .await;
        assert!(matches!(no_items, Err(Error::Validation(_))));
        assert!(service.list_quotes("store-1").unwrap().is_empty());
    }
}
