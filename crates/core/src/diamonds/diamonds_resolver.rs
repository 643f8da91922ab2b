//! Diamond price resolution chain.
//!
//! Sources are tried in a fixed order, stopping at the first one that gives
//! an answer:
//! 1. Uploaded CSV tables, when dev pricing is switched on. This is a global
//!    override: a store's vendor connection is not consulted at all.
//! 2. The store's vendor price list for the stone's shape type.
//! 3. Manual entry, which always answers.
//!
//! A strategy returning `None` means "no match here, ask the next one".

use chrono::{DateTime, Utc};

use super::diamonds_model::{
    DiamondPriceEntry, DiamondPriceResult, DiamondSpecs, PricingSource, VendorPriceList,
};

pub const STALE_VENDOR_LIST_MESSAGE: &str =
    "Your diamond pricing may be outdated - consider refreshing from Rapaport.";

pub const MANUAL_ENTRY_MESSAGE: &str =
    "No pricing data available. Please log into Rapaport to sync or enter price manually.";

/// Everything a strategy may look at.
pub struct ResolutionContext<'a> {
    pub specs: &'a DiamondSpecs,
    /// Explicit dev-pricing toggle
    pub dev_csv_enabled: bool,
    /// CSV entries for the stone's shape type, color and clarity
    pub csv_entries: &'a [DiamondPriceEntry],
    /// The store's list for the stone's shape type, if one was ever fetched
    pub vendor_list: Option<&'a VendorPriceList>,
    pub now: DateTime<Utc>,
}

/// One source in the chain.
pub trait DiamondPriceStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn resolve(&self, ctx: &ResolutionContext<'_>) -> Option<DiamondPriceResult>;
}

/// Uploaded CSV price tables.
pub struct DevCsvStrategy;

impl DiamondPriceStrategy for DevCsvStrategy {
    fn name(&self) -> &'static str {
        "dev_csv"
    }

    fn resolve(&self, ctx: &ResolutionContext<'_>) -> Option<DiamondPriceResult> {
        if !ctx.dev_csv_enabled {
            return None;
        }

        let specs = ctx.specs;
        let result = match ctx.csv_entries.iter().find(|e| e.matches(specs)) {
            Some(entry) => DiamondPriceResult::priced(entry.price_per_carat, PricingSource::DevCsv),
            None => DiamondPriceResult::not_found(format!(
                "No pricing data available for {} {} {} {}ct",
                specs.shape, specs.color, specs.clarity, specs.carat
            )),
        };
        Some(result)
    }
}

/// The store's vendor price list.
pub struct VendorListStrategy;

impl DiamondPriceStrategy for VendorListStrategy {
    fn name(&self) -> &'static str {
        "rapaport"
    }

    fn resolve(&self, ctx: &ResolutionContext<'_>) -> Option<DiamondPriceResult> {
        let list = match ctx.vendor_list {
            Some(list) if !list.is_stale(ctx.now) => list,
            _ => return Some(DiamondPriceResult::expired(STALE_VENDOR_LIST_MESSAGE)),
        };

        list.find_price(ctx.specs)
            .map(|price| DiamondPriceResult::priced(price, PricingSource::Rapaport))
    }
}

/// Terminal fallback: ask the operator for a price.
pub struct ManualEntryStrategy;

impl ManualEntryStrategy {
    fn result(&self) -> DiamondPriceResult {
        DiamondPriceResult::requires_auth(MANUAL_ENTRY_MESSAGE)
    }
}

impl DiamondPriceStrategy for ManualEntryStrategy {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn resolve(&self, _ctx: &ResolutionContext<'_>) -> Option<DiamondPriceResult> {
        Some(self.result())
    }
}

/// Ordered list of strategies ending in manual entry.
pub struct DiamondPriceResolver {
    strategies: Vec<Box<dyn DiamondPriceStrategy>>,
    fallback: ManualEntryStrategy,
}

impl DiamondPriceResolver {
    /// CSV tables, then vendor list, then manual entry.
    pub fn new() -> Self {
        Self {
            strategies: vec![Box::new(DevCsvStrategy), Box::new(VendorListStrategy)],
            fallback: ManualEntryStrategy,
        }
    }

    /// Adds a source after the existing ones and before manual entry.
    pub fn add_strategy(&mut self, strategy: Box<dyn DiamondPriceStrategy>) {
        self.strategies.push(strategy);
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies
            .iter()
            .map(|s| s.name())
            .chain(std::iter::once(self.fallback.name()))
            .collect()
    }

    pub fn resolve(&self, ctx: &ResolutionContext<'_>) -> DiamondPriceResult {
        self.strategies
            .iter()
            .find_map(|s| s.resolve(ctx))
            .unwrap_or_else(|| self.fallback.result())
    }
}

impl Default for DiamondPriceResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diamonds::ShapeType;
    use chrono::Duration;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn specs(carat: Decimal) -> DiamondSpecs {
        DiamondSpecs {
            shape: "Round".to_string(),
            color: "G".to_string(),
            clarity: "VS1".to_string(),
            carat,
        }
    }

    fn csv_entry() -> DiamondPriceEntry {
        DiamondPriceEntry {
            id: "e1".to_string(),
            shape_code: "BR".to_string(),
            shape_type: ShapeType::Round,
            color: "G".to_string(),
            clarity: "VS1".to_string(),
            carat_min: dec!(0.90),
            carat_max: dec!(1.00),
            price_per_carat: dec!(5000),
            created_at: Utc::now(),
        }
    }

    fn vendor_list(age_days: i64, now: DateTime<Utc>) -> VendorPriceList {
        VendorPriceList {
            store_id: "store-1".to_string(),
            list_type: ShapeType::Round,
            fetched_at: now - Duration::days(age_days),
            content: json!([
                {"color": "G", "clarity": "VS1", "carat_min": 0.9, "carat_max": 1.0, "price_per_carat": 6100}
            ]),
        }
    }

    #[test]
    fn test_csv_mode_matches_upper_bound() {
        let entries = [csv_entry()];
        let stone = specs(dec!(1.00));
        let ctx = ResolutionContext {
            specs: &stone,
            dev_csv_enabled: true,
            csv_entries: &entries,
            vendor_list: None,
            now: Utc::now(),
        };
        let result = DiamondPriceResolver::new().resolve(&ctx);
        assert_eq!(result.price_per_carat, Some(dec!(5000)));
        assert_eq!(result.source, PricingSource::DevCsv);
    }

    #[test]
    fn test_csv_mode_miss_is_terminal() {
        let entries = [csv_entry()];
        let stone = specs(dec!(1.01));
        let now = Utc::now();
        let list = vendor_list(1, now);
        let ctx = ResolutionContext {
            specs: &stone,
            dev_csv_enabled: true,
            csv_entries: &entries,
            vendor_list: Some(&list),
            now,
        };
        let result = DiamondPriceResolver::new().resolve(&ctx);
        assert_eq!(result.price_per_carat, None);
        assert_eq!(result.source, PricingSource::NotFound);
        assert_eq!(
            result.error.as_deref(),
            Some("No pricing data available for Round G VS1 1.01ct")
        );
    }

    #[test]
    fn test_csv_mode_wins_over_fresh_vendor_list() {
        let entries = [csv_entry()];
        let stone = specs(dec!(0.95));
        let now = Utc::now();
        let list = vendor_list(1, now);
        let ctx = ResolutionContext {
            specs: &stone,
            dev_csv_enabled: true,
            csv_entries: &entries,
            vendor_list: Some(&list),
            now,
        };
        assert_eq!(
            DiamondPriceResolver::new().resolve(&ctx).source,
            PricingSource::DevCsv
        );
    }

    #[test]
    fn test_fresh_vendor_list_prices_stone() {
        let stone = specs(dec!(0.95));
        let now = Utc::now();
        let list = vendor_list(2, now);
        let ctx = ResolutionContext {
            specs: &stone,
            dev_csv_enabled: false,
            csv_entries: &[],
            vendor_list: Some(&list),
            now,
        };
        let result = DiamondPriceResolver::new().resolve(&ctx);
        assert_eq!(result.price_per_carat, Some(dec!(6100)));
        assert_eq!(result.source, PricingSource::Rapaport);
    }

    #[test]
    fn test_stale_vendor_list_reports_expired_even_with_match() {
        let stone = specs(dec!(0.95));
        let now = Utc::now();
        let list = vendor_list(31, now);
        let ctx = ResolutionContext {
            specs: &stone,
            dev_csv_enabled: false,
            csv_entries: &[],
            vendor_list: Some(&list),
            now,
        };
        let result = DiamondPriceResolver::new().resolve(&ctx);
        assert_eq!(result.price_per_carat, None);
        assert_eq!(result.source, PricingSource::Manual);
        assert!(result.is_expired);
        assert!(!result.requires_auth);
    }

    #[test]
    fn test_absent_vendor_list_reports_expired() {
        let stone = specs(dec!(0.95));
        let ctx = ResolutionContext {
            specs: &stone,
            dev_csv_enabled: false,
            csv_entries: &[],
            vendor_list: None,
            now: Utc::now(),
        };
        assert!(DiamondPriceResolver::new().resolve(&ctx).is_expired);
    }

    #[test]
    fn test_vendor_miss_falls_through_to_manual() {
        let stone = specs(dec!(3.0));
        let now = Utc::now();
        let list = vendor_list(1, now);
        let ctx = ResolutionContext {
            specs: &stone,
            dev_csv_enabled: false,
            csv_entries: &[],
            vendor_list: Some(&list),
            now,
        };
        let result = DiamondPriceResolver::new().resolve(&ctx);
        assert_eq!(result.source, PricingSource::Manual);
        assert!(result.requires_auth);
        assert_eq!(result.error.as_deref(), Some(MANUAL_ENTRY_MESSAGE));
    }

    struct FixedPrice;

    impl DiamondPriceStrategy for FixedPrice {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn resolve(&self, _ctx: &ResolutionContext<'_>) -> Option<DiamondPriceResult> {
            Some(DiamondPriceResult::priced(dec!(1), PricingSource::Manual))
        }
    }

    #[test]
    fn test_added_strategy_runs_before_manual_fallback() {
        let mut resolver = DiamondPriceResolver::new();
        resolver.add_strategy(Box::new(FixedPrice));
        assert_eq!(
            resolver.strategy_names(),
            vec!["dev_csv", "rapaport", "fixed", "manual"]
        );

        let stone = specs(dec!(3.0));
        let now = Utc::now();
        let list = vendor_list(1, now);
        let ctx = ResolutionContext {
            specs: &stone,
            dev_csv_enabled: false,
            csv_entries: &[],
            vendor_list: Some(&list),
            now,
        };
        assert_eq!(resolver.resolve(&ctx).price_per_carat, Some(dec!(1)));
    }
}
