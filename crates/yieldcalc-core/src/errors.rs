//! Error types for yieldcalc

use thiserror::Error;

/// Core errors that can occur in yieldcalc
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Pool configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse pool config: {0}")]
    ParseError(String),

    #[error("Invalid price for {field}: {value}")]
    InvalidPrice { field: &'static str, value: f64 },

    #[error("APR must be finite, got {value}")]
    InvalidApr { value: f64 },

    #[error("Performance fee {value}% is outside 0-100")]
    InvalidPerformanceFee { value: f64 },

    #[error("Auto-compound frequency must be finite and non-negative, got {value}")]
    InvalidAutoCompoundFrequency { value: f64 },

    #[error("Compounding table is empty")]
    EmptyCompoundingTable,

    #[error("Compounding frequency at index {index} must be positive, got {value}")]
    InvalidCompoundingFrequency { index: usize, value: f64 },
}

/// Errors raised when a UI index does not map to a known value
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Staking duration index {index} out of range (0..{max})")]
    HorizonOutOfRange { index: usize, max: usize },

    #[error("No compounding frequency configured for index {index}")]
    UnknownCompoundingIndex { index: usize },
}

/// Result type alias for yieldcalc operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a stable error code for the UI layer
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Input(e) => e.error_code(),
            Self::Serialization(_) => "serialization",
        }
    }
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ParseError(_) => "config_parse_error",
            Self::InvalidPrice { .. } => "invalid_price",
            Self::InvalidApr { .. } => "invalid_apr",
            Self::InvalidPerformanceFee { .. } => "invalid_performance_fee",
            Self::InvalidAutoCompoundFrequency { .. } => "invalid_auto_compound_frequency",
            Self::EmptyCompoundingTable => "empty_compounding_table",
            Self::InvalidCompoundingFrequency { .. } => "invalid_compounding_frequency",
        }
    }
}

impl InputError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::HorizonOutOfRange { .. } => "horizon_out_of_range",
            Self::UnknownCompoundingIndex { .. } => "unknown_compounding_index",
        }
    }
}
