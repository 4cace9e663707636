use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal precision for report output columns
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Revenue delta magnitude (USD) at which an offer counts as high-variance
pub const OFFER_DELTA_THRESHOLD: Decimal = dec!(10);

/// Revenue delta magnitude (USD) at which an affiliate movement is narrated
pub const AFFILIATE_DELTA_THRESHOLD: Decimal = dec!(5);

/// Percent-change sentinel when the comparison day has no baseline
pub const ZERO_BASE_CHANGE_PCT: Decimal = dec!(1000);

/// Days looked back from the newest day when classifying offer budgets
pub const BUDGET_LOOKBACK_DAYS: i64 = 6;

/// Advertisers whose name contains this token report events one day late;
/// their reject timestamps are shifted back before date attribution
pub const DAY_SHIFT_ADVERTISER_TOKEN: &str = "appnext";

/// Status shown for offers with no record on the newest day
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Attribution text for high-variance offers with no qualifying affiliate
pub const NO_SIGNIFICANT_CHANGE: &str = "No significant change";
