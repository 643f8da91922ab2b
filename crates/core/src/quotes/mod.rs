//! Quotes module - item capture, value calculation, and saved buy quotes.

mod quotes_calculator;
mod quotes_model;
mod quotes_service;
mod quotes_traits;

#[cfg(test)]
mod quotes_service_tests;

pub use quotes_calculator::{
    center_stone_value, item_total, melee_value, metal_value, total_quote_value,
};
pub use quotes_model::{
    CenterStone, CenterStoneRequest, CustomerInfo, MeleeGroup, MeleeGroupRequest, NewQuote,
    PricedItem, PricingNotice, Quote, QuoteDraft, QuoteItem, QuoteItemDraft, QuoteItemRequest,
    QuoteStatus,
};
pub use quotes_service::QuoteService;
pub use quotes_traits::{QuoteRepositoryTrait, QuoteServiceTrait};
