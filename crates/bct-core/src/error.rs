use std::fmt;

/// Rejection of a pricing call. Never retried internally; the caller
/// decides what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// Out-of-domain request value (zero or non-finite deposit, sell amount
    /// above supply, ...)
    InvalidInput(String),
    /// The supplied curve state violates its invariants
    InvalidState(String),
    /// The result does not fit in a u128 base-unit amount
    Overflow(String),
}

impl CurveError {
    /// Human-readable detail, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            CurveError::InvalidInput(msg)
            | CurveError::InvalidState(msg)
            | CurveError::Overflow(msg) => msg,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CurveError::InvalidInput(_))
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, CurveError::InvalidState(_))
    }
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CurveError::InvalidState(msg) => write!(f, "Invalid curve state: {}", msg),
            CurveError::Overflow(msg) => write!(f, "Arithmetic overflow: {}", msg),
        }
    }
}

impl std::error::Error for CurveError {}
