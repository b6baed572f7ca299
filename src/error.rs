use thiserror::Error;

/// Everything that can go wrong while building or rendering a waveform.
#[derive(Debug, Error)]
pub enum ArbError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("channel {index} out of range (instance has {count} channels)")]
    OutOfRange { index: usize, count: usize },
    #[error("least-squares system is singular")]
    Singular,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ArbError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ArbError::InvalidArgument(message.into())
    }
}

pub type Result<T, E = ArbError> = std::result::Result<T, E>;

/// Fails with `InvalidArgument` unless `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ArbError::invalid(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}
