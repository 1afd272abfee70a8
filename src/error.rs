//! Error types for fundsim.

use thiserror::Error;

/// Result type alias for fundsim operations.
pub type Result<T> = std::result::Result<T, FundsimError>;

/// Everything that can go wrong during one render cycle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FundsimError {
    /// Allocation percentage outside [0, 100].
    #[error("Invalid allocation: {value} is outside [0, 100]")]
    InvalidAllocation { value: i64 },

    /// All sample values identical; the KDE bandwidth would be zero.
    #[error("Degenerate sample: all {len} values equal {value}, density bandwidth is zero")]
    DegenerateSample { value: f64, len: usize },

    /// Not enough values to estimate a spread.
    #[error("Insufficient data: need at least {required} values, got {available}")]
    InsufficientData { required: usize, available: usize },

    /// Empty input.
    #[error("Empty data provided for {context}")]
    EmptyData { context: String },

    /// Invalid parameter value.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// A chart element failed its construction checks.
    #[error("Invalid chart element: {message}")]
    InvalidChart { message: String },
}

impl FundsimError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    pub fn invalid_chart(message: impl Into<String>) -> Self {
        Self::InvalidChart {
            message: message.into(),
        }
    }

    pub fn empty_data(context: impl Into<String>) -> Self {
        Self::EmptyData {
            context: context.into(),
        }
    }

    /// Short machine-readable name, used in HTTP error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidAllocation { .. } => "invalid_allocation",
            Self::DegenerateSample { .. } => "degenerate_sample",
            Self::InsufficientData { .. } => "insufficient_data",
            Self::EmptyData { .. } => "empty_data",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::InvalidChart { .. } => "invalid_chart",
        }
    }
}
