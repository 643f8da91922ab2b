//! Property-based integration tests for the pricing engine.
//!
//! These tests verify that pricing invariants hold across generated inputs,
//! using the `proptest` crate for random test case generation.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;
use wisebuy_core::diamonds::{
    carat_in_range, DiamondPriceEntry, DiamondPriceResolver, DiamondSpecs, PricingSource,
    ResolutionContext, ShapeType, VendorPriceList,
};
use wisebuy_core::metals::{
    aggregate_history, discounted_price, purity_table, MetalPriceRecord, MetalType, PricingBasis,
};
use wisebuy_core::quotes::{CenterStone, MeleeGroup, QuoteDraft, QuoteItem, QuoteItemDraft};

// =============================================================================
// Generators
// =============================================================================

/// Money amount with cents, 0.01 to 100,000.00.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Carat weight with two decimals, 0.01 to 10.00.
fn arb_carat() -> impl Strategy<Value = Decimal> {
    (1i64..1000).prop_map(|points| Decimal::new(points, 2))
}

/// Percentage with one decimal, 0.0 to 100.0.
fn arb_percent() -> impl Strategy<Value = Decimal> {
    (0i64..=1000).prop_map(|tenths| Decimal::new(tenths, 1))
}

fn arb_metal() -> impl Strategy<Value = MetalType> {
    prop_oneof![
        Just(MetalType::Xau),
        Just(MetalType::Xag),
        Just(MetalType::Xpt),
        Just(MetalType::Xpd),
    ]
}

fn arb_stone() -> impl Strategy<Value = CenterStone> {
    (arb_carat(), arb_price(), arb_percent()).prop_map(|(carat, price, percent_off)| CenterStone {
        shape: "Round".to_string(),
        color: "G".to_string(),
        clarity: "VS1".to_string(),
        carat,
        price_per_carat: price,
        pricing_source: PricingSource::Manual,
        percent_off,
        value: Decimal::ZERO,
        cut: None,
        grading_lab: None,
        inscription: None,
    })
}

fn arb_melee() -> impl Strategy<Value = MeleeGroup> {
    (1u32..200, arb_carat(), arb_price()).prop_map(|(count, total_carat, price)| {
        MeleeGroup::new(
            "Round".to_string(),
            "H".to_string(),
            "SI1".to_string(),
            count,
            total_carat,
            price,
        )
        .unwrap()
    })
}

/// A finalized gold item with any number of stones, including none.
fn arb_item() -> impl Strategy<Value = QuoteItem> {
    (
        arb_carat(),
        arb_price(),
        proptest::collection::vec(arb_stone(), 0..4),
        proptest::collection::vec(arb_melee(), 0..4),
    )
        .prop_map(|(weight, price, stones, melee)| {
            let mut draft = QuoteItemDraft::new("Item");
            draft.set_metal(MetalType::Xau, None, "14K (58.3%)");
            draft.set_weight(weight);
            draft.set_metal_price(price);
            for stone in stones {
                draft.add_center_stone(stone).unwrap();
            }
            for group in melee {
                draft.add_melee_group(group).unwrap();
            }
            draft.finalize().unwrap()
        })
}

fn csv_entry(carat_min: Decimal, carat_max: Decimal, price: Decimal) -> DiamondPriceEntry {
    DiamondPriceEntry {
        id: "entry-1".to_string(),
        shape_code: "BR".to_string(),
        shape_type: ShapeType::Round,
        color: "G".to_string(),
        clarity: "VS1".to_string(),
        carat_min,
        carat_max,
        price_per_carat: price,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn round_specs(carat: Decimal) -> DiamondSpecs {
    DiamondSpecs {
        shape: "Round".to_string(),
        color: "G".to_string(),
        clarity: "VS1".to_string(),
        carat,
    }
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every stored metal price carries `price_per_dwt = price_per_ounce / 20`.
    #[test]
    fn prop_dwt_price_is_ounce_over_twenty(
        metal in arb_metal(),
        price in arb_price(),
        offset in 0i64..3650,
    ) {
        let date = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap() + Duration::days(offset);
        let record = MetalPriceRecord::new(metal, date, price);
        prop_assert_eq!(record.price_per_dwt * Decimal::from(20), record.price_per_ounce);
    }

    /// Doubling the fraction of pure metal doubles the price.
    #[test]
    fn prop_price_scales_linearly_with_purity(
        metal in arb_metal(),
        price in arb_price(),
        discount in arb_percent(),
    ) {
        for purity in purity_table(metal) {
            let single = discounted_price(price, purity.fraction_of_pure, discount).unwrap();
            let double = discounted_price(
                price,
                purity.fraction_of_pure * Decimal::TWO,
                discount,
            )
            .unwrap();
            prop_assert_eq!(double, single * Decimal::TWO);
        }
    }

    /// Aggregation over the same history is deterministic.
    #[test]
    fn prop_aggregation_is_deterministic(
        prices in proptest::collection::vec(arb_price(), 1..60),
        basis in prop_oneof![
            Just(PricingBasis::Yeob),
            Just(PricingBasis::NinetyDayAvg),
            Just(PricingBasis::OneEightyDayAvg),
        ],
    ) {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let history: Vec<MetalPriceRecord> = prices
            .iter()
            .enumerate()
            .map(|(i, p)| MetalPriceRecord::new(MetalType::Xau, as_of - Duration::days(i as i64 * 3), *p))
            .collect();

        let first = aggregate_history(MetalType::Xau, &history, basis, as_of);
        let second = aggregate_history(MetalType::Xau, &history, basis, as_of);
        prop_assert_eq!(&first, &second);
        // the newest record is always in the window
        prop_assert!(first.is_some());
    }

    /// Carat ranges exclude their lower bound and include their upper bound.
    #[test]
    fn prop_carat_range_is_half_open(
        carat_min in arb_carat(),
        width in 1i64..500,
    ) {
        let carat_max = carat_min + Decimal::new(width, 2);
        prop_assert!(!carat_in_range(carat_min, carat_min, carat_max));
        prop_assert!(carat_in_range(carat_max, carat_min, carat_max));
        prop_assert!(!carat_in_range(carat_max + Decimal::new(1, 2), carat_min, carat_max));
    }

    /// CSV pricing wins over a fresh vendor list holding the same stone.
    #[test]
    fn prop_csv_source_takes_priority(
        csv_price in arb_price(),
        vendor_price in arb_price(),
    ) {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        let entries = vec![csv_entry(Decimal::new(90, 2), Decimal::new(100, 2), csv_price)];
        let list = VendorPriceList {
            store_id: "store-1".to_string(),
            list_type: ShapeType::Round,
            fetched_at: now - Duration::days(1),
            content: json!([{
                "color": "G", "clarity": "VS1",
                "carat_min": "0.90", "carat_max": "1.00",
                "price_per_carat": vendor_price.to_string()
            }]),
        };
        let specs = round_specs(Decimal::ONE);

        let resolver = DiamondPriceResolver::new();
        let with_csv = resolver.resolve(&ResolutionContext {
            specs: &specs,
            dev_csv_enabled: true,
            csv_entries: &entries,
            vendor_list: Some(&list),
            now,
        });
        prop_assert_eq!(with_csv.source, PricingSource::DevCsv);
        prop_assert_eq!(with_csv.price_per_carat, Some(csv_price));

        let without_csv = resolver.resolve(&ResolutionContext {
            specs: &specs,
            dev_csv_enabled: false,
            csv_entries: &entries,
            vendor_list: Some(&list),
            now,
        });
        prop_assert_eq!(without_csv.source, PricingSource::Rapaport);
        prop_assert_eq!(without_csv.price_per_carat, Some(vendor_price));
    }

    /// A vendor list older than 30 days never prices a stone.
    #[test]
    fn prop_stale_vendor_list_is_expired(age_days in 31i64..400) {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        let list = VendorPriceList {
            store_id: "store-1".to_string(),
            list_type: ShapeType::Round,
            fetched_at: now - Duration::days(age_days),
            content: json!([{
                "color": "G", "clarity": "VS1",
                "carat_min": 0.9, "carat_max": 1.0, "price_per_carat": 5000
            }]),
        };
        let specs = round_specs(Decimal::ONE);
        let result = DiamondPriceResolver::new().resolve(&ResolutionContext {
            specs: &specs,
            dev_csv_enabled: false,
            csv_entries: &[],
            vendor_list: Some(&list),
            now,
        });
        prop_assert!(result.is_expired);
        prop_assert_eq!(result.price_per_carat, None);
    }

    /// Item total is metal value plus every stone and melee value.
    #[test]
    fn prop_item_total_is_sum_of_parts(item in arb_item()) {
        let expected = item.metal_value
            + item.center_stones.iter().map(|s| s.value).sum::<Decimal>()
            + item.melee_groups.iter().map(|g| g.value).sum::<Decimal>();
        prop_assert_eq!(item.total_value, expected);
        prop_assert_eq!(item.metal_value, item.weight_dwt * item.price_per_dwt);
    }

    /// Quote total follows the items and adding never touches earlier items.
    #[test]
    fn prop_quote_total_is_sum_of_items(
        items in proptest::collection::vec(arb_item(), 0..6),
    ) {
        let mut quote = QuoteDraft::new();
        for (i, item) in items.iter().enumerate() {
            quote.add_item(item.clone()).unwrap();
            prop_assert_eq!(&quote.items()[..=i], &items[..=i]);
        }
        let expected: Decimal = items.iter().map(|i| i.total_value).sum();
        prop_assert_eq!(quote.total_value(), expected);
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn gold_14k_with_ten_percent_discount() {
    let record = MetalPriceRecord::new(
        MetalType::Xau,
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        Decimal::from(2000),
    );
    assert_eq!(record.price_per_dwt, Decimal::from(100));

    let price =
        discounted_price(record.price_per_dwt, Decimal::new(583, 3), Decimal::from(10)).unwrap();
    assert_eq!(price, Decimal::new(5247, 2));
}

#[test]
fn csv_entry_boundary_scenario() {
    let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
    let entries = vec![csv_entry(
        Decimal::new(90, 2),
        Decimal::new(100, 2),
        Decimal::from(5000),
    )];
    let resolver = DiamondPriceResolver::new();

    let at_max = round_specs(Decimal::new(100, 2));
    let result = resolver.resolve(&ResolutionContext {
        specs: &at_max,
        dev_csv_enabled: true,
        csv_entries: &entries,
        vendor_list: None,
        now,
    });
    assert_eq!(result.price_per_carat, Some(Decimal::from(5000)));

    let above = round_specs(Decimal::new(101, 2));
    let result = resolver.resolve(&ResolutionContext {
        specs: &above,
        dev_csv_enabled: true,
        csv_entries: &entries,
        vendor_list: None,
        now,
    });
    assert_eq!(result.price_per_carat, None);
}

#[test]
fn melee_points_scenario() {
    let group = MeleeGroup::new(
        "Round".to_string(),
        "G".to_string(),
        "SI1".to_string(),
        50,
        Decimal::new(25, 1),
        Decimal::from(8),
    )
    .unwrap();
    assert_eq!(group.value, Decimal::from(2000));
}
