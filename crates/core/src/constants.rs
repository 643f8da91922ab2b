use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Pennyweights in one troy ounce
pub const DWT_PER_TROY_OUNCE: Decimal = dec!(20);

/// Melee points in one carat
pub const POINTS_PER_CARAT: Decimal = dec!(100);

/// A vendor price list older than this many days is stale
pub const VENDOR_LIST_MAX_AGE_DAYS: i64 = 30;

/// Currency every price is quoted in
pub const PRICING_CURRENCY: &str = "USD";

/// Discount applied to metal prices for a newly registered store
pub const DEFAULT_DISCOUNT_PERCENT: Decimal = dec!(10);

/// Days of history the backfill dashboard expects per metal
pub const DEFAULT_BACKFILL_DAYS: i64 = 180;

/// Default number of vendor auth log events returned
pub const DEFAULT_AUTH_LOG_LIMIT: i64 = 100;

/// Decimal places kept on monetary results
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
