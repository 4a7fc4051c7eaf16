//! Pool configuration for the ROI calculator
//!
//! A pool (or farm, or vault) supplies the rates and prices the calculator
//! works against. The UI loads it as JSON alongside the pool data.

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, InputError};
use crate::types::Horizon;

/// Compounds per day selectable from the "Compounding every" button menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompoundingTable(pub Vec<f64>);

impl CompoundingTable {
    /// Compounds per day for the button at `index`
    pub fn frequency(&self, index: usize) -> Result<f64, InputError> {
        self.0
            .get(index)
            .copied()
            .ok_or(InputError::UnknownCompoundingIndex { index })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CompoundingTable {
    /// 1D, 7D, 14D, 30D
    fn default() -> Self {
        Self(vec![1.0, 0.142857142, 0.071428571, 0.033333333])
    }
}

/// Rates and prices of the pool the calculator is opened for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolConfig {
    /// Reward APR as a percentage (120 = 120%)
    pub apr: f64,

    /// Reference-currency price of the staked token
    pub staking_token_price: f64,

    /// Reference-currency price of the reward token
    pub earning_token_price: f64,

    /// Compounds per day forced by an auto-compounding vault. 0 = user-selectable.
    #[serde(default)]
    pub auto_compound_frequency: f64,

    /// Performance fee as a percentage (0-100)
    #[serde(default)]
    pub performance_fee: f64,

    /// Decimals used when rounding the interest breakdown
    #[serde(default = "default_rounding_decimals")]
    pub rounding_decimals: u32,

    #[serde(default)]
    pub compounding_frequencies: CompoundingTable,

    /// Horizon selected when a calculator session opens
    #[serde(default)]
    pub default_staking_duration: Horizon,
}

fn default_rounding_decimals() -> u32 {
    2
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            apr: 0.0,
            staking_token_price: 0.0,
            earning_token_price: 0.0,
            auto_compound_frequency: 0.0,
            performance_fee: 0.0,
            rounding_decimals: default_rounding_decimals(),
            compounding_frequencies: CompoundingTable::default(),
            default_staking_duration: Horizon::default(),
        }
    }
}

impl PoolConfig {
    pub fn new(apr: f64, staking_token_price: f64, earning_token_price: f64) -> Self {
        Self {
            apr,
            staking_token_price,
            earning_token_price,
            ..Self::default()
        }
    }

    pub fn with_performance_fee(mut self, performance_fee: f64) -> Self {
        self.performance_fee = performance_fee;
        self
    }

    pub fn with_auto_compound_frequency(mut self, frequency: f64) -> Self {
        self.auto_compound_frequency = frequency;
        self
    }

    /// Parse and validate a pool config from JSON
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;

        tracing::info!(
            apr = config.apr,
            performance_fee = config.performance_fee,
            auto_compound_frequency = config.auto_compound_frequency,
            "Loaded pool config"
        );
        Ok(config)
    }

    /// Whether the pool forces its own compounding cadence
    pub fn is_auto_compounding(&self) -> bool {
        self.auto_compound_frequency > 0.0
    }

    /// Check the values the math layer cannot meaningfully work with.
    ///
    /// Zero prices are accepted: pools without a price feed still open the
    /// calculator, and the state machine clamps the resulting NaNs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("stakingTokenPrice", self.staking_token_price),
            ("earningTokenPrice", self.earning_token_price),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidPrice { field, value });
            }
        }

        if !self.apr.is_finite() {
            return Err(ConfigError::InvalidApr { value: self.apr });
        }

        if !(0.0..=100.0).contains(&self.performance_fee) {
            return Err(ConfigError::InvalidPerformanceFee {
                value: self.performance_fee,
            });
        }

        if !self.auto_compound_frequency.is_finite() || self.auto_compound_frequency < 0.0 {
            return Err(ConfigError::InvalidAutoCompoundFrequency {
                value: self.auto_compound_frequency,
            });
        }

        if self.compounding_frequencies.is_empty() {
            return Err(ConfigError::EmptyCompoundingTable);
        }
        for (index, &value) in self.compounding_frequencies.0.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidCompoundingFrequency { index, value });
            }
        }

        Ok(())
    }
}
