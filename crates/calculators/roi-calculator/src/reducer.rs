//! Calculator Reducer
//!
//! `(state, action) -> state`. No math happens here; derived values arrive as
//! `SetRoi` / `SetPrincipalForTargetRoi` actions issued by the recompute pass.

use compound::to_fixed;
use yieldcalc_core::constants::USD_PRECISION;
use yieldcalc_core::{CalculatorMode, CompoundingTable, Horizon};

use crate::recompute::{PrincipalOutcome, RoiOutcome};
use crate::state::CalculatorState;

/// Discrete user (or recompute) events
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User edited the principal; switches to RoiBasedOnPrincipal
    SetPrincipal {
        principal_as_usd: String,
        principal_as_token: String,
    },
    /// User edited the target ROI; switches to PrincipalBasedOnRoi
    SetTargetRoi {
        target_roi_as_usd: String,
        target_roi_as_tokens: f64,
    },
    /// Index into the horizon menu
    SetStakingDuration(usize),
    ToggleCompounding,
    /// Index into the pool's compounding table
    SetCompoundingFrequency(usize),
    /// Cadence forced by an auto-compounding pool
    SetAutoCompoundFrequency(f64),
    SetCalculatorMode(CalculatorMode),
    ToggleEditingCurrency,
    SetRoi(RoiOutcome),
    SetPrincipalForTargetRoi(PrincipalOutcome),
}

/// Apply one action. Actions that name an unknown index leave the state as is.
pub fn reduce(
    mut state: CalculatorState,
    action: Action,
    compounding: &CompoundingTable,
) -> CalculatorState {
    match action {
        Action::SetPrincipal {
            principal_as_usd,
            principal_as_token,
        } => {
            state.data.principal_as_usd = principal_as_usd;
            state.data.principal_as_token = principal_as_token;
            state.controls.mode = CalculatorMode::RoiBasedOnPrincipal;
        }
        Action::SetTargetRoi {
            target_roi_as_usd,
            target_roi_as_tokens,
        } => {
            state.data.target_roi_as_usd = target_roi_as_usd;
            state.data.target_roi_as_tokens = target_roi_as_tokens;
            state.controls.mode = CalculatorMode::PrincipalBasedOnRoi;
        }
        Action::SetStakingDuration(index) => match Horizon::try_from(index) {
            Ok(horizon) => state.controls.staking_duration = horizon,
            Err(e) => tracing::warn!("Ignoring staking duration: {}", e),
        },
        Action::ToggleCompounding => {
            state.controls.compounding = !state.controls.compounding;
        }
        Action::SetCompoundingFrequency(index) => match compounding.frequency(index) {
            Ok(frequency) => {
                state.controls.compounding_frequency = frequency;
                state.controls.active_compounding_index = index;
            }
            Err(e) => tracing::warn!("Ignoring compounding frequency: {}", e),
        },
        Action::SetAutoCompoundFrequency(frequency) => {
            if frequency > 0.0 {
                state.controls.compounding_frequency = frequency;
            }
        }
        Action::SetCalculatorMode(mode) => {
            if mode == CalculatorMode::PrincipalBasedOnRoi
                && state.controls.mode == CalculatorMode::RoiBasedOnPrincipal
            {
                // Start editing from the ROI currently on display
                state.data.target_roi_as_usd = to_fixed(state.data.roi_usd, USD_PRECISION);
                state.data.target_roi_as_tokens = state.data.roi_tokens;
            }
            state.controls.mode = mode;
        }
        Action::ToggleEditingCurrency => {
            state.controls.editing_currency = state.controls.editing_currency.toggled();
        }
        Action::SetRoi(outcome) => {
            if let Some(principal_as_token) = outcome.principal_as_token {
                state.data.principal_as_token = principal_as_token;
            }
            state.data.roi_usd = outcome.roi_usd;
            state.data.roi_tokens = outcome.roi_tokens;
            state.data.roi_percentage = outcome.roi_percentage;
            state.data.interest_breakdown = outcome.interest_breakdown;
        }
        Action::SetPrincipalForTargetRoi(outcome) => {
            state.data.principal_as_usd = outcome.principal_as_usd;
            state.data.principal_as_token = outcome.principal_as_token;
            state.data.roi_usd = outcome.roi_usd;
            state.data.roi_tokens = outcome.roi_tokens;
            state.data.roi_percentage = outcome.roi_percentage;
            state.data.interest_breakdown = outcome.interest_breakdown;
        }
    }
    state
}
