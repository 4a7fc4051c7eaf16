//! ROI Calculator State Types
//!
//! Data structures for the calculator session. Serialized camelCase for the UI.

use serde::{Deserialize, Serialize};

use yieldcalc_core::constants::ZERO_AMOUNT;
use yieldcalc_core::{CalculatorMode, EditingCurrency, Horizon, InterestBreakdown, PoolConfig};

/// User-selected settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorControls {
    pub compounding: bool,
    /// Compounds per day, e.g. 1 = once a day, 0.071428571 = once per 2 weeks
    pub compounding_frequency: f64,
    /// Index of the active button in the compounding menu
    pub active_compounding_index: usize,
    pub staking_duration: Horizon,
    pub mode: CalculatorMode,
    pub editing_currency: EditingCurrency,
}

/// Input values (strings, as typed) and derived outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorData {
    #[serde(rename = "principalAsUSD")]
    pub principal_as_usd: String,
    pub principal_as_token: String,
    #[serde(rename = "targetRoiAsUSD")]
    pub target_roi_as_usd: String,
    pub target_roi_as_tokens: f64,
    #[serde(rename = "roiUSD")]
    pub roi_usd: f64,
    pub roi_tokens: f64,
    pub roi_percentage: f64,
    pub interest_breakdown: InterestBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    pub controls: CalculatorControls,
    pub data: CalculatorData,
}

/// The authoritative input of the active mode, parsed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Driver {
    /// Principal in the reference currency
    Principal(f64),
    /// Target ROI in the reference currency
    TargetRoi(f64),
}

impl CalculatorState {
    /// Fresh session state for a pool
    pub fn new(pool: &PoolConfig) -> Self {
        let compounding_frequency = if pool.is_auto_compounding() {
            pool.auto_compound_frequency
        } else {
            pool.compounding_frequencies.frequency(0).unwrap_or(1.0)
        };

        Self {
            controls: CalculatorControls {
                compounding: true,
                compounding_frequency,
                active_compounding_index: 0,
                staking_duration: pool.default_staking_duration,
                mode: CalculatorMode::RoiBasedOnPrincipal,
                editing_currency: EditingCurrency::Usd,
            },
            data: CalculatorData {
                principal_as_usd: String::new(),
                principal_as_token: ZERO_AMOUNT.to_string(),
                target_roi_as_usd: String::new(),
                target_roi_as_tokens: 0.0,
                roi_usd: 0.0,
                roi_tokens: 0.0,
                roi_percentage: 0.0,
                interest_breakdown: [0.0; 4],
            },
        }
    }

    /// Raw text of the field the active mode treats as authoritative
    pub fn authoritative_input(&self) -> &str {
        match self.controls.mode {
            CalculatorMode::RoiBasedOnPrincipal => &self.data.principal_as_usd,
            CalculatorMode::PrincipalBasedOnRoi => &self.data.target_roi_as_usd,
        }
    }

    pub fn driver(&self) -> Driver {
        let value = parse_amount(self.authoritative_input());
        match self.controls.mode {
            CalculatorMode::RoiBasedOnPrincipal => Driver::Principal(value),
            CalculatorMode::PrincipalBasedOnRoi => Driver::TargetRoi(value),
        }
    }

    pub fn to_json(&self) -> yieldcalc_core::Result<String> {
        serde_json::to_string(self)
            .map_err(|e| yieldcalc_core::Error::Serialization(e.to_string()))
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(&PoolConfig::default())
    }
}

/// Parse the leading decimal number of a typed amount, ignoring trailing
/// text ("12abc" is 12). No leading number (including "", "inf", "NaN")
/// gives NaN. `Infinity` is the only non-digit spelling accepted.
pub fn parse_amount(input: &str) -> f64 {
    let text = input.trim_start();
    let bytes = text.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if text[end..].starts_with("Infinity") {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent..]);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Replace NaN and infinities with 0 before they reach the UI
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = CalculatorState::default();
        assert!(state.controls.compounding);
        assert_eq!(state.controls.compounding_frequency, 1.0);
        assert_eq!(state.controls.staking_duration, Horizon::OneYear);
        assert_eq!(state.controls.mode, CalculatorMode::RoiBasedOnPrincipal);
        assert_eq!(state.data.principal_as_usd, "");
        assert_eq!(state.data.principal_as_token, "0.00");
        assert_eq!(state.data.interest_breakdown, [0.0; 4]);
    }

    #[test]
    fn test_initial_state_auto_compounding_pool() {
        let pool = PoolConfig::new(80.0, 2.0, 2.0).with_auto_compound_frequency(288.0);
        let state = CalculatorState::new(&pool);
        assert_eq!(state.controls.compounding_frequency, 288.0);
    }

    #[test]
    fn test_driver_follows_mode() {
        let mut state = CalculatorState::default();
        state.data.principal_as_usd = "1000".into();
        state.data.target_roi_as_usd = "25.5".into();
        assert_eq!(state.driver(), Driver::Principal(1000.0));

        state.controls.mode = CalculatorMode::PrincipalBasedOnRoi;
        assert_eq!(state.authoritative_input(), "25.5");
        assert_eq!(state.driver(), Driver::TargetRoi(25.5));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1000"), 1000.0);
        assert_eq!(parse_amount(" 12.5 "), 12.5);
        assert_eq!(parse_amount("12."), 12.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("-3"), -3.0);
        assert_eq!(parse_amount("1e3"), 1000.0);
        assert!(parse_amount("").is_nan());
        assert!(parse_amount("abc").is_nan());
        assert!(parse_amount(".").is_nan());
        assert!(parse_amount("-").is_nan());
    }

    #[test]
    fn test_parse_amount_reads_leading_number_only() {
        assert_eq!(parse_amount("12abc"), 12.0);
        assert_eq!(parse_amount("1,000"), 1.0);
        assert_eq!(parse_amount("2.5.1"), 2.5);
        assert_eq!(parse_amount("4e"), 4.0);
        assert_eq!(parse_amount("4e+x"), 4.0);
        assert!(parse_amount("inf").is_nan());
        assert!(parse_amount("NaN").is_nan());
        assert_eq!(parse_amount("Infinity"), f64::INFINITY);
        assert_eq!(parse_amount("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(-3.5), -3.5);
    }

    #[test]
    fn test_state_serialization_field_names() {
        let state = CalculatorState::default();
        let json = state.to_json().unwrap();
        assert!(json.contains("\"principalAsUSD\":\"\""));
        assert!(json.contains("\"targetRoiAsUSD\""));
        assert!(json.contains("\"roiUSD\":0.0"));
        assert!(json.contains("\"stakingDuration\":3"));
        assert!(json.contains("\"mode\":\"ROI_BASED_ON_PRINCIPAL\""));

        let parsed: CalculatorState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
