//! ROI Calculator State Machine
//!
//! Holds the inputs of a calculator session (principal or target ROI, staking
//! duration, compounding settings) and keeps the derived outputs in sync.
//!
//! Two edit modes are inverse to each other:
//! - RoiBasedOnPrincipal: the user types a principal, ROI is derived
//! - PrincipalBasedOnRoi: the user types a target ROI, principal is derived
//!
//! State changes go through a pure reducer. The controller then runs a
//! recompute pass, but only when the inputs that feed it have changed.

pub mod calculator;
pub mod recompute;
pub mod reducer;
pub mod state;

// Re-exports
pub use calculator::RoiCalculator;
pub use recompute::{PrincipalOutcome, RecomputeKey, RoiOutcome};
pub use reducer::{reduce, Action};
pub use state::{CalculatorControls, CalculatorData, CalculatorState, Driver};
