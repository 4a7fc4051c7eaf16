//! Compound Interest Calculator
//!
//! Pure math functions. No state, no I/O.
//!
//! Everything is worked out relative to a 365-day year compounding at
//! `compound_frequency` times per day:
//!   n        = 365 * compound_frequency
//!   accrued  = principal * (1 + apr / n) ^ (n * days / 365)
//!   interest = accrued - principal
//!
//! With `compound_frequency == 0` interest is simple: principal * apr * days / 365.

use yieldcalc_core::constants::DAYS_PER_YEAR;
use yieldcalc_core::{Horizon, InterestBreakdown};

use crate::constants::{
    DEFAULT_COMPOUND_FREQUENCY, DEFAULT_ROUNDING_DECIMALS, FULL_YEAR_DAYS, RESULT_DECIMALS,
};
use crate::rounding::round_half_up;

/// Inputs to [`get_interest_breakdown`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationParameters {
    /// Amount invested, in the reference currency (USD)
    pub investment_amount: f64,
    /// APR as a percentage (120 = 120%)
    pub apr: f64,
    /// Reference-currency price of the reward token
    pub earning_token_price: f64,
    /// Compounds per day. 1 = daily, 0.142857142 = weekly, 0 = no compounding
    pub compound_frequency: f64,
    /// Performance fee as a percentage
    pub performance_fee: f64,
    pub rounding_decimals: u32,
}

impl CalculationParameters {
    /// Daily compounding, no fee, 2 decimals
    pub fn new(investment_amount: f64, apr: f64, earning_token_price: f64) -> Self {
        Self {
            investment_amount,
            apr,
            earning_token_price,
            compound_frequency: DEFAULT_COMPOUND_FREQUENCY,
            performance_fee: 0.0,
            rounding_decimals: DEFAULT_ROUNDING_DECIMALS,
        }
    }

    pub fn with_compound_frequency(mut self, compound_frequency: f64) -> Self {
        self.compound_frequency = compound_frequency;
        self
    }

    pub fn with_performance_fee(mut self, performance_fee: f64) -> Self {
        self.performance_fee = performance_fee;
        self
    }

    pub fn with_rounding_decimals(mut self, rounding_decimals: u32) -> Self {
        self.rounding_decimals = rounding_decimals;
        self
    }
}

/// APR as a decimal fraction, reduced by the performance fee.
///
/// apr_after_fee = (apr - apr/100 * fee) / 100
pub fn apr_after_fee(apr: f64, performance_fee: f64) -> f64 {
    let apr_as_decimal = apr / 100.0;
    if performance_fee > 0.0 {
        let fee_relative_to_apr = apr_as_decimal * performance_fee;
        (apr - fee_relative_to_apr) / 100.0
    } else {
        apr_as_decimal
    }
}

/// Token-denominated interest earned over each horizon, in [`Horizon::ALL`] order.
///
/// Each value is rounded separately to `rounding_decimals`.
pub fn get_interest_breakdown(params: &CalculationParameters) -> InterestBreakdown {
    let times_compounded = DAYS_PER_YEAR * params.compound_frequency;
    let apr_as_decimal = apr_after_fee(params.apr, params.performance_fee);
    // Starting token balance bought with investment_amount
    let principal = params.investment_amount / params.earning_token_price;

    Horizon::ALL.map(|horizon| {
        let days = f64::from(horizon.days());
        let days_as_decimal_of_year = days / DAYS_PER_YEAR;

        let interest_earned = if times_compounded != 0.0 {
            let accrued = principal
                * (1.0 + apr_as_decimal / times_compounded)
                    .powf(times_compounded * days_as_decimal_of_year);
            accrued - principal
        } else {
            principal * apr_as_decimal * days_as_decimal_of_year
        };

        round_half_up(interest_earned, params.rounding_decimals)
    })
}

/// APY as a percentage, rounded to 2 decimals.
///
/// For `days == 365` this is the standard `(1 + apr/n)^n - 1`. Shorter periods
/// use `apr * (1 + apr/n)^(n * days/365)`, which is what the principal solver
/// below is calibrated against.
pub fn get_apy(apr: f64, compound_frequency: f64, days: u32, performance_fee: f64) -> f64 {
    let apr_as_decimal = apr_after_fee(apr, performance_fee);
    let times_compounded = DAYS_PER_YEAR * compound_frequency;

    let apy_as_decimal = if days == FULL_YEAR_DAYS {
        (1.0 + apr_as_decimal / times_compounded).powf(times_compounded) - 1.0
    } else {
        let days_as_decimal_of_year = f64::from(days) / DAYS_PER_YEAR;
        let compounding_increase = (1.0 + apr_as_decimal / times_compounded)
            .powf(times_compounded * days_as_decimal_of_year);
        apr_as_decimal * compounding_increase
    };

    round_half_up(apy_as_decimal * 100.0, RESULT_DECIMALS)
}

/// Principal (reference currency) needed to earn `interest` over each horizon.
///
/// Inverse of [`get_interest_breakdown`] once its token output is converted
/// back to the reference currency.
pub fn get_principal_for_interest(
    interest: f64,
    apr: f64,
    compound_frequency: f64,
    performance_fee: f64,
) -> [f64; 4] {
    if compound_frequency > 0.0 {
        return Horizon::ALL.map(|horizon| {
            let days = horizon.days();
            let apy_as_decimal = get_apy(apr, compound_frequency, days, performance_fee) / 100.0;
            let days_as_decimal_of_year = f64::from(days) / DAYS_PER_YEAR;
            round_half_up(
                interest / (apy_as_decimal * days_as_decimal_of_year),
                RESULT_DECIMALS,
            )
        });
    }

    let apr_as_decimal = apr_after_fee(apr, performance_fee);
    Horizon::ALL.map(|horizon| {
        let days_as_decimal_of_year = f64::from(horizon.days()) / DAYS_PER_YEAR;
        round_half_up(
            interest / (apr_as_decimal * days_as_decimal_of_year),
            RESULT_DECIMALS,
        )
    })
}

/// Return on investment as an unrounded percentage.
///
/// Returns 0 if nothing was invested.
pub fn get_roi(amount_earned: f64, amount_invested: f64) -> f64 {
    if amount_invested == 0.0 {
        return 0.0;
    }
    (amount_earned / amount_invested) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWICE_PER_DAY: f64 = 2.0;
    const FIVE_THOUSAND_TIMES_PER_DAY: f64 = 5000.0;
    const ONCE_PER_7_DAYS: f64 = 0.142857142;
    const ONCE_PER_30_DAYS: f64 = 0.033333333;

    fn breakdown(
        investment: f64,
        apr: f64,
        price: f64,
        frequency: f64,
        fee: f64,
    ) -> InterestBreakdown {
        get_interest_breakdown(
            &CalculationParameters::new(investment, apr, price)
                .with_compound_frequency(frequency)
                .with_performance_fee(fee),
        )
    }

    fn relative_error(actual: f64, expected: f64) -> f64 {
        ((actual - expected) / expected).abs()
    }

    #[test]
    fn test_interest_breakdown_daily() {
        assert_eq!(
            breakdown(1000.0, 120.0, 16.0, 1.0, 0.0),
            [0.21, 1.45, 6.47, 144.6]
        );
        assert_eq!(
            breakdown(55000.0, 120.0, 5.5, 1.0, 0.0),
            [32.88, 232.42, 1034.79, 23135.88]
        );
    }

    #[test]
    fn test_interest_breakdown_frequencies() {
        assert_eq!(
            breakdown(1000.0, 120.0, 16.0, TWICE_PER_DAY, 0.0),
            [0.21, 1.45, 6.47, 144.8]
        );
        assert_eq!(
            breakdown(1000.0, 120.0, 16.0, ONCE_PER_7_DAYS, 0.0),
            [0.2, 1.44, 6.4, 142.2]
        );
        assert_eq!(
            breakdown(1000.0, 120.0, 16.0, ONCE_PER_30_DAYS, 0.0),
            [0.2, 1.39, 6.16, 133.79]
        );
        assert_eq!(
            breakdown(55000.0, 120.0, 5.5, TWICE_PER_DAY, 0.0),
            [32.9, 232.61, 1035.69, 23168.47]
        );
    }

    #[test]
    fn test_interest_breakdown_with_performance_fee() {
        assert_eq!(
            breakdown(55000.0, 120.0, 5.5, 1.0, 2.0),
            [32.22, 227.73, 1013.12, 22352.61]
        );
        assert_eq!(
            breakdown(55000.0, 120.0, 5.5, FIVE_THOUSAND_TIMES_PER_DAY, 2.0),
            [32.27, 228.1, 1014.83, 22413.81]
        );
    }

    #[test]
    fn test_full_performance_fee_earns_nothing() {
        assert_eq!(breakdown(1000.0, 120.0, 16.0, 1.0, 100.0), [0.0; 4]);
        assert_eq!(breakdown(1000.0, 120.0, 16.0, 0.0, 100.0), [0.0; 4]);
    }

    #[test]
    fn test_no_compounding_is_simple_interest() {
        let result = breakdown(1000.0, 120.0, 16.0, 0.0, 0.0);
        assert_eq!(result, [0.21, 1.44, 6.16, 75.0]);

        let principal = 1000.0 / 16.0;
        for (value, horizon) in result.iter().zip(Horizon::ALL) {
            let simple = principal * 1.2 * (f64::from(horizon.days()) / 365.0);
            assert!((value - simple).abs() <= 0.005);
        }
    }

    #[test]
    fn test_breakdown_is_monotonic() {
        for frequency in [0.0, ONCE_PER_30_DAYS, ONCE_PER_7_DAYS, 1.0, TWICE_PER_DAY] {
            for apr in [0.5, 12.0, 120.0, 900.0] {
                let result = breakdown(2500.0, apr, 3.0, frequency, 5.0);
                assert!(
                    result.windows(2).all(|w| w[0] <= w[1]),
                    "not monotonic for apr {apr}, frequency {frequency}: {result:?}"
                );
            }
        }
    }

    #[test]
    fn test_rounding_decimals_applied_per_horizon() {
        let params = CalculationParameters::new(1000.0, 120.0, 16.0).with_rounding_decimals(4);
        let result = get_interest_breakdown(&params);
        assert_eq!(result[0], 0.2055);
        assert_eq!(round_half_up(result[3], 2), 144.6);
    }

    #[test]
    fn test_invalid_inputs_propagate() {
        assert!(breakdown(f64::NAN, 120.0, 16.0, 1.0, 0.0)
            .iter()
            .all(|v| v.is_nan()));
        // inf * growth - inf
        assert!(breakdown(1000.0, 120.0, 0.0, 1.0, 0.0)
            .iter()
            .all(|v| v.is_nan()));
        assert!(breakdown(0.0, 120.0, 0.0, 1.0, 0.0)
            .iter()
            .all(|v| v.is_nan()));
        assert!(breakdown(1000.0, 120.0, 0.0, 0.0, 0.0)
            .iter()
            .all(|v| !v.is_finite()));
    }

    #[test]
    fn test_apy_full_year() {
        assert_eq!(get_apy(68.43, 1.0, 365, 0.0), 98.11);
        assert_eq!(get_apy(120.0, ONCE_PER_7_DAYS, 365, 0.0), 227.53);
        assert_eq!(get_apy(120.0, 1.0, 365, 2.0), 223.53);
    }

    #[test]
    fn test_apy_partial_year_is_scaled_by_apr() {
        assert_eq!(get_apy(120.0, 1.0, 1, 0.0), 120.39);
        assert_eq!(get_apy(120.0, 1.0, 7, 0.0), 122.79);
        assert_eq!(get_apy(120.0, 1.0, 30, 0.0), 132.42);
    }

    #[test]
    fn test_principal_for_interest() {
        assert_eq!(
            get_principal_for_interest(100.0, 120.0, 1.0, 0.0),
            [30318.13, 4246.51, 918.79, 43.22]
        );
        assert_eq!(
            get_principal_for_interest(100.0, 120.0, 1.0, 2.0),
            [30937.45, 4335.12, 939.44, 44.74]
        );
        assert_eq!(
            get_principal_for_interest(100.0, 120.0, 0.0, 0.0),
            [30416.67, 4345.24, 1013.89, 83.33]
        );
    }

    #[test]
    fn test_principal_for_zero_interest() {
        assert_eq!(get_principal_for_interest(0.0, 120.0, 1.0, 0.0), [0.0; 4]);
    }

    #[test]
    fn test_principal_for_interest_zero_apr_is_infinite() {
        for value in get_principal_for_interest(50.0, 0.0, 0.0, 0.0) {
            assert_eq!(value, f64::INFINITY);
        }
    }

    /// Interest in USD fed back through the solver for one tuple
    fn round_trip(investment: f64, apr: f64, price: f64, frequency: f64, fee: f64) -> [f64; 4] {
        let interest = breakdown(investment, apr, price, frequency, fee);
        let mut solved = [0.0; 4];
        for (i, tokens) in interest.iter().enumerate() {
            solved[i] = get_principal_for_interest(tokens * price, apr, frequency, fee)[i];
        }
        solved
    }

    #[test]
    fn test_round_trip_simple_interest_every_horizon() {
        let investment = 55000.0;
        for solved in round_trip(investment, 40.0, 5.5, 0.0, 5.0) {
            assert!(relative_error(solved, investment) < 0.001, "{solved}");
        }
    }

    #[test]
    fn test_round_trip_full_year_high_apr() {
        assert_eq!(round_trip(1000.0, 120.0, 16.0, 1.0, 0.0)[3], 1000.0);
        let solved = round_trip(55000.0, 120.0, 5.5, 1.0, 2.0)[3];
        assert!(relative_error(solved, 55000.0) < 0.001, "{solved}");
    }

    #[test]
    fn test_round_trip_low_apr_every_horizon() {
        let investment = 10_000_000.0;
        for solved in round_trip(investment, 1.5, 2.5, 1.0, 0.0) {
            assert!(relative_error(solved, investment) < 0.001, "{solved}");
        }
    }

    #[test]
    fn test_roi() {
        assert_eq!(get_roi(10.0, 1000.0), 1.0);
        assert_eq!(get_roi(4.8, 10.0), 48.0);
        assert_eq!(get_roi(217.48, 950.0), 22.892631578947366);
        assert_eq!(get_roi(100.67, 100.0), 100.66999999999999);
        assert_eq!(get_roi(8572.84, 20000.0), 42.864200000000004);
    }

    #[test]
    fn test_roi_zero_investment() {
        assert_eq!(get_roi(10.0, 0.0), 0.0);
        assert_eq!(get_roi(0.0, 0.0), 0.0);
        assert_eq!(get_roi(f64::NAN, 0.0), 0.0);
    }

    #[test]
    fn test_apr_after_fee() {
        assert_eq!(apr_after_fee(120.0, 0.0), 1.2);
        assert!((apr_after_fee(120.0, 2.0) - 1.176).abs() < 1e-12);
        assert_eq!(apr_after_fee(120.0, 100.0), 0.0);
    }
}
