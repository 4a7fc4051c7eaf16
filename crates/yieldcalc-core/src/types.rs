//! Core type definitions for yieldcalc

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::InputError;

/// Reporting period over which returns are calculated.
///
/// Serialized as its index (0..=3) since that is what the UI button menu sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum Horizon {
    OneDay,
    OneWeek,
    OneMonth,
    #[default]
    OneYear,
}

impl Horizon {
    /// All horizons in reporting order
    pub const ALL: [Horizon; 4] = [
        Horizon::OneDay,
        Horizon::OneWeek,
        Horizon::OneMonth,
        Horizon::OneYear,
    ];

    /// Length of the horizon in days
    pub fn days(&self) -> u32 {
        match self {
            Self::OneDay => 1,
            Self::OneWeek => 7,
            Self::OneMonth => 30,
            Self::OneYear => 365,
        }
    }

    /// Position in [`Horizon::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Self::OneDay => 0,
            Self::OneWeek => 1,
            Self::OneMonth => 2,
            Self::OneYear => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::OneWeek => "7D",
            Self::OneMonth => "30D",
            Self::OneYear => "1Y",
        }
    }
}

impl TryFrom<usize> for Horizon {
    type Error = InputError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(InputError::HorizonOutOfRange {
                index,
                max: Self::ALL.len(),
            })
    }
}

impl From<Horizon> for usize {
    fn from(horizon: Horizon) -> Self {
        horizon.index()
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which of the two calculator fields the user is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculatorMode {
    /// Principal is edited, ROI is derived
    #[default]
    RoiBasedOnPrincipal,
    /// Target ROI is edited, principal is derived
    PrincipalBasedOnRoi,
}

impl CalculatorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoiBasedOnPrincipal => "roi_based_on_principal",
            Self::PrincipalBasedOnRoi => "principal_based_on_roi",
        }
    }
}

impl fmt::Display for CalculatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Currency the principal input is denominated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditingCurrency {
    Token,
    #[default]
    Usd,
}

impl EditingCurrency {
    pub fn toggled(self) -> Self {
        match self {
            Self::Usd => Self::Token,
            Self::Token => Self::Usd,
        }
    }
}

/// Interest earned per horizon, in [`Horizon::ALL`] order
pub type InterestBreakdown = [f64; 4];

/// Constants
pub mod constants {
    /// Days in the compounding year
    pub const DAYS_PER_YEAR: f64 = 365.0;

    /// Decimals used for reference-currency (USD) amounts
    pub const USD_PRECISION: u32 = 2;

    /// Decimals used for token amounts shown next to the USD input
    pub const TOKEN_PRECISION: u32 = 10;

    /// Placeholder shown for an empty or non-positive amount
    pub const ZERO_AMOUNT: &str = "0.00";
}
