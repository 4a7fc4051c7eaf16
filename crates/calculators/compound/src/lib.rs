//! Compound Interest Math
//!
//! Pure functions behind the ROI calculator: interest earned over the four
//! reporting horizons, APR to APY conversion, and the inverse that solves for
//! the principal needed to earn a target amount.
//!
//! All amounts are plain `f64`. Invalid inputs (NaN, zero prices) propagate
//! through the arithmetic untouched; clamping is the caller's job.

pub mod calculator;
pub mod constants;
pub mod rounding;

// Re-exports
pub use calculator::{
    apr_after_fee, get_apy, get_interest_breakdown, get_principal_for_interest, get_roi,
    CalculationParameters,
};
pub use rounding::{round_half_up, to_fixed};
