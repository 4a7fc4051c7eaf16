//! Compound Math Constants

/// Compounds per day when the caller does not specify one (daily)
pub const DEFAULT_COMPOUND_FREQUENCY: f64 = 1.0;

/// Decimals the interest breakdown is rounded to by default
pub const DEFAULT_ROUNDING_DECIMALS: u32 = 2;

/// Decimals for APY percentages and solved principals
pub const RESULT_DECIMALS: u32 = 2;

/// Horizon length at which `get_apy` uses the full-year formula
pub const FULL_YEAR_DAYS: u32 = 365;
