//! ROI Calculator Controller
//!
//! Owns one calculator session. Each user event is reduced into the state,
//! then a recompute pass runs if (and only if) its inputs changed. The derived
//! writes never touch the recompute key, so the two modes cannot re-trigger
//! each other.

use compound::to_fixed;
use yieldcalc_core::constants::{TOKEN_PRECISION, USD_PRECISION, ZERO_AMOUNT};
use yieldcalc_core::{CalculatorMode, PoolConfig};

use crate::recompute::{recompute, RecomputeKey};
use crate::reducer::{reduce, Action};
use crate::state::{finite_or_zero, parse_amount, CalculatorState};

/// A calculator session bound to one pool
#[derive(Debug, Clone)]
pub struct RoiCalculator {
    state: CalculatorState,
    pool: PoolConfig,
    last_key: Option<RecomputeKey>,
    recomputes: u64,
}

impl RoiCalculator {
    /// Open a session. Fails if the pool config is invalid.
    pub fn new(pool: PoolConfig) -> yieldcalc_core::Result<Self> {
        pool.validate()?;
        let mut calculator = Self {
            state: CalculatorState::new(&pool),
            pool,
            last_key: None,
            recomputes: 0,
        };
        calculator.sync();
        Ok(calculator)
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn pool(&self) -> &PoolConfig {
        &self.pool
    }

    /// Number of recompute passes run so far
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Reduce an action, then recompute if needed.
    ///
    /// Returns true if a recompute pass ran.
    pub fn dispatch(&mut self, action: Action) -> bool {
        self.apply(action);
        self.sync()
    }

    fn apply(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action, &self.pool.compounding_frequencies);
    }

    fn sync(&mut self) -> bool {
        let key = RecomputeKey::new(&self.state, &self.pool);
        if self.last_key.as_ref() == Some(&key) {
            tracing::trace!(mode = %key.mode, "Recompute inputs unchanged, skipping");
            return false;
        }

        let derived = recompute(&self.state, &self.pool);
        self.apply(derived);
        self.recomputes += 1;

        let data = &self.state.data;
        tracing::debug!(
            mode = %key.mode,
            horizon = %key.staking_duration,
            compound_frequency = key.compound_frequency,
            principal_usd = %data.principal_as_usd,
            roi_usd = data.roi_usd,
            roi_percentage = data.roi_percentage,
            "Recomputed ROI"
        );

        self.last_key = Some(key);
        true
    }

    /// Replace the pool's rates and prices (e.g. after a price refresh).
    ///
    /// The compounding menu selection is re-read from the new table, falling
    /// back to its first entry when the old index no longer exists.
    pub fn update_pool(&mut self, pool: PoolConfig) -> yieldcalc_core::Result<()> {
        pool.validate()?;
        self.pool = pool;

        let active = self.state.controls.active_compounding_index;
        let index = if self.pool.compounding_frequencies.frequency(active).is_ok() {
            active
        } else {
            0
        };
        self.apply(Action::SetCompoundingFrequency(index));

        if self.pool.is_auto_compounding() {
            self.apply(Action::SetAutoCompoundFrequency(
                self.pool.auto_compound_frequency,
            ));
        }
        self.sync();
        Ok(())
    }

    /// User typed a principal in the reference currency
    pub fn set_principal_from_usd_value(&mut self, amount: &str) {
        let tokens = parse_amount(amount) / self.pool.staking_token_price;
        let principal_as_token = if tokens.is_finite() && tokens > 0.0 {
            to_fixed(tokens, TOKEN_PRECISION)
        } else {
            ZERO_AMOUNT.to_string()
        };
        self.dispatch(Action::SetPrincipal {
            principal_as_usd: amount.to_string(),
            principal_as_token,
        });
    }

    /// User typed a principal in staking tokens
    pub fn set_principal_from_token_value(&mut self, amount: &str) {
        let usd = parse_amount(amount) * self.pool.staking_token_price;
        let principal_as_usd = if usd.is_finite() && usd > 0.0 {
            to_fixed(usd, USD_PRECISION)
        } else {
            ZERO_AMOUNT.to_string()
        };
        self.dispatch(Action::SetPrincipal {
            principal_as_usd,
            principal_as_token: amount.to_string(),
        });
    }

    /// Fill the principal from a staked token balance ("My Balance")
    pub fn set_principal_from_balance(&mut self, token_balance: f64) {
        let amount = if token_balance.is_finite() && token_balance > 0.0 {
            token_balance.to_string()
        } else {
            ZERO_AMOUNT.to_string()
        };
        self.set_principal_from_token_value(&amount);
    }

    /// User typed the return they want to earn, in the reference currency
    pub fn set_target_roi(&mut self, amount: &str) {
        let target_roi_as_tokens =
            finite_or_zero(parse_amount(amount) / self.pool.earning_token_price);
        self.dispatch(Action::SetTargetRoi {
            target_roi_as_usd: amount.to_string(),
            target_roi_as_tokens,
        });
    }

    pub fn set_staking_duration(&mut self, index: usize) {
        self.dispatch(Action::SetStakingDuration(index));
    }

    pub fn toggle_compounding(&mut self) {
        self.dispatch(Action::ToggleCompounding);
    }

    pub fn set_compounding_frequency(&mut self, index: usize) {
        self.dispatch(Action::SetCompoundingFrequency(index));
    }

    pub fn set_calculator_mode(&mut self, mode: CalculatorMode) {
        self.dispatch(Action::SetCalculatorMode(mode));
    }

    pub fn toggle_editing_currency(&mut self) {
        self.dispatch(Action::ToggleEditingCurrency);
    }
}
