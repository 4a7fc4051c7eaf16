//! Decimal rounding for display values
//!
//! Rounds on the exact binary value of the `f64`, with ties going away from
//! zero. `(x * 100.0).round() / 100.0` is not equivalent: the multiplication
//! can itself round onto a midpoint (1.115 * 100.0 == 111.5).

use rust_decimal::{Decimal, RoundingStrategy};

fn to_decimal(value: f64, decimals: u32) -> Option<Decimal> {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
}

/// Round `value` to `decimals` places, half away from zero.
///
/// Non-finite values are returned unchanged.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    match to_decimal(value, decimals) {
        Some(rounded) => rounded.to_string().parse().unwrap_or(value),
        // Outside Decimal's range: huge values carry no fraction, tiny ones round to zero
        None if value.abs() < 1.0 => 0.0_f64.copysign(value),
        None => value,
    }
}

/// Format `value` with exactly `decimals` places
pub fn to_fixed(value: f64, decimals: u32) -> String {
    let precision = decimals as usize;
    match to_decimal(value, decimals) {
        Some(rounded) => format!("{:.*}", precision, rounded),
        None => format!("{:.*}", precision, value),
    }
}
