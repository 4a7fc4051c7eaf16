//! Recompute Pass
//!
//! Derives outputs from the authoritative input of the active mode. Every
//! derived field is rewritten, so nothing from the inactive mode survives.
//!
//! NaN, infinities and non-positive inputs are clamped to 0 / "0.00" here,
//! unlike the math layer which lets them propagate.

use compound::{
    get_interest_breakdown, get_principal_for_interest, get_roi, to_fixed, CalculationParameters,
};
use yieldcalc_core::constants::{TOKEN_PRECISION, USD_PRECISION, ZERO_AMOUNT};
use yieldcalc_core::{CalculatorMode, Horizon, InterestBreakdown, PoolConfig};

use crate::reducer::Action;
use crate::state::{finite_or_zero, parse_amount, CalculatorControls, CalculatorState, Driver};

/// Outputs of RoiBasedOnPrincipal mode
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoiOutcome {
    /// Refreshed token amount, `None` while the shown text still matches
    pub principal_as_token: Option<String>,
    pub roi_usd: f64,
    pub roi_tokens: f64,
    pub roi_percentage: f64,
    pub interest_breakdown: InterestBreakdown,
}

/// Outputs of PrincipalBasedOnRoi mode
#[derive(Debug, Clone, PartialEq)]
pub struct PrincipalOutcome {
    pub principal_as_usd: String,
    pub principal_as_token: String,
    pub roi_usd: f64,
    pub roi_tokens: f64,
    pub roi_percentage: f64,
    pub interest_breakdown: InterestBreakdown,
}

impl PrincipalOutcome {
    fn zero() -> Self {
        Self {
            principal_as_usd: ZERO_AMOUNT.to_string(),
            principal_as_token: ZERO_AMOUNT.to_string(),
            roi_usd: 0.0,
            roi_tokens: 0.0,
            roi_percentage: 0.0,
            interest_breakdown: [0.0; 4],
        }
    }
}

/// Everything a recompute pass reads. A pass runs only when this changes.
#[derive(Debug, Clone, PartialEq)]
pub struct RecomputeKey {
    pub mode: CalculatorMode,
    /// Raw text of the authoritative field
    pub input: String,
    pub staking_duration: Horizon,
    pub compound_frequency: f64,
    pub apr: f64,
    pub performance_fee: f64,
    pub staking_token_price: f64,
    pub earning_token_price: f64,
    pub rounding_decimals: u32,
}

impl RecomputeKey {
    pub fn new(state: &CalculatorState, pool: &PoolConfig) -> Self {
        Self {
            mode: state.controls.mode,
            input: state.authoritative_input().to_string(),
            staking_duration: state.controls.staking_duration,
            compound_frequency: effective_compound_frequency(&state.controls, pool),
            apr: pool.apr,
            performance_fee: pool.performance_fee,
            staking_token_price: pool.staking_token_price,
            earning_token_price: pool.earning_token_price,
            rounding_decimals: pool.rounding_decimals,
        }
    }
}

/// Compounds per day fed to the math layer.
///
/// An auto-compounding pool overrides the user's toggle and menu choice.
pub fn effective_compound_frequency(controls: &CalculatorControls, pool: &PoolConfig) -> f64 {
    if pool.is_auto_compounding() {
        pool.auto_compound_frequency
    } else if controls.compounding {
        controls.compounding_frequency
    } else {
        0.0
    }
}

fn clamped_breakdown(
    principal_usd: f64,
    compound_frequency: f64,
    pool: &PoolConfig,
) -> InterestBreakdown {
    let params = CalculationParameters::new(principal_usd, pool.apr, pool.earning_token_price)
        .with_compound_frequency(compound_frequency)
        .with_performance_fee(pool.performance_fee)
        .with_rounding_decimals(pool.rounding_decimals);
    get_interest_breakdown(&params).map(finite_or_zero)
}

/// Token amount for `principal_usd`, or `"0.00"` without a staking price
fn principal_tokens_text(principal_usd: f64, pool: &PoolConfig) -> String {
    let tokens = principal_usd / pool.staking_token_price;
    if tokens.is_finite() && tokens > 0.0 {
        to_fixed(tokens, TOKEN_PRECISION)
    } else {
        ZERO_AMOUNT.to_string()
    }
}

/// The token text is kept as typed while it still converts to the USD
/// principal at cent precision.
fn refreshed_token_text(principal_usd: f64, shown: &str, pool: &PoolConfig) -> Option<String> {
    let shown_usd = finite_or_zero(parse_amount(shown) * pool.staking_token_price);
    if to_fixed(shown_usd, USD_PRECISION) == to_fixed(principal_usd, USD_PRECISION) {
        None
    } else {
        Some(principal_tokens_text(principal_usd, pool))
    }
}

/// ROI earned by `principal_usd` over the selected horizon.
///
/// `principal_as_token` is the token amount currently shown beside the principal.
pub fn roi_from_principal(
    principal_usd: f64,
    principal_as_token: &str,
    controls: &CalculatorControls,
    pool: &PoolConfig,
) -> RoiOutcome {
    if principal_usd.is_nan() || principal_usd <= 0.0 {
        return RoiOutcome::default();
    }

    let frequency = effective_compound_frequency(controls, pool);
    let interest_breakdown = clamped_breakdown(principal_usd, frequency, pool);

    let roi_tokens = interest_breakdown[controls.staking_duration.index()];
    let roi_usd = finite_or_zero(roi_tokens * pool.earning_token_price);
    let roi_percentage = finite_or_zero(get_roi(roi_usd, principal_usd));

    RoiOutcome {
        principal_as_token: refreshed_token_text(principal_usd, principal_as_token, pool),
        roi_usd,
        roi_tokens,
        roi_percentage,
        interest_breakdown,
    }
}

/// Principal needed to earn `target_roi_usd` over the selected horizon
pub fn principal_from_target_roi(
    target_roi_usd: f64,
    controls: &CalculatorControls,
    pool: &PoolConfig,
) -> PrincipalOutcome {
    if target_roi_usd.is_nan() || target_roi_usd <= 0.0 {
        return PrincipalOutcome::zero();
    }

    let roi_tokens = finite_or_zero(target_roi_usd / pool.earning_token_price);
    let frequency = effective_compound_frequency(controls, pool);
    let principals = get_principal_for_interest(
        target_roi_usd,
        pool.apr,
        frequency,
        pool.performance_fee,
    );
    let principal_usd = finite_or_zero(principals[controls.staking_duration.index()]);

    if principal_usd <= 0.0 {
        if principals[controls.staking_duration.index()].is_infinite() {
            tracing::warn!(
                apr = pool.apr,
                "Target ROI unreachable at this APR, principal clamped to 0"
            );
        }
        return PrincipalOutcome {
            roi_usd: target_roi_usd,
            roi_tokens,
            ..PrincipalOutcome::zero()
        };
    }

    PrincipalOutcome {
        principal_as_usd: to_fixed(principal_usd, USD_PRECISION),
        principal_as_token: principal_tokens_text(principal_usd, pool),
        roi_usd: target_roi_usd,
        roi_tokens,
        roi_percentage: finite_or_zero(get_roi(target_roi_usd, principal_usd)),
        interest_breakdown: clamped_breakdown(principal_usd, frequency, pool),
    }
}

/// Run the pass for whichever mode is active
pub fn recompute(state: &CalculatorState, pool: &PoolConfig) -> Action {
    match state.driver() {
        Driver::Principal(principal) => Action::SetRoi(roi_from_principal(
            principal,
            &state.data.principal_as_token,
            &state.controls,
            pool,
        )),
        Driver::TargetRoi(target) => Action::SetPrincipalForTargetRoi(principal_from_target_roi(
            target,
            &state.controls,
            pool,
        )),
    }
}
