use serde::{Deserialize, Serialize};

/// Status code returned across the C ABI on success.
pub const STATUS_OK: i32 = 0;
/// Status code for a NULL pointer handed to an export.
///
/// Only the C boundary can produce this, so it has no `UtilityError` variant.
pub const STATUS_NULL_POINTER: i32 = 6;

/// Errors surfaced by the utility operations.
///
/// Unbounded recursion is not listed: factorial is iterative and cannot
/// exhaust the stack.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UtilityError {
    #[error("{operation} overflowed the 32-bit integer range for input {input}")]
    ArithmeticOverflow {
        operation: &'static str,
        input: i64,
    },

    #[error("modulo of {dividend} by zero")]
    DivisionByZero { dividend: i32 },

    #[error("system clock unavailable: {0}")]
    ClockUnavailable(String),

    #[error("shared constant must be finite, got {0}")]
    InvalidConstant(f64),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<serde_json::Error> for UtilityError {
    fn from(err: serde_json::Error) -> Self {
        UtilityError::InvalidRequest(err.to_string())
    }
}

impl UtilityError {
    /// Stable numeric status used by the C exports.
    pub fn code(&self) -> i32 {
        self.kind().code()
    }

    /// The category of this error, without its payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            UtilityError::ArithmeticOverflow { .. } => ErrorKind::ArithmeticOverflow,
            UtilityError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            UtilityError::ClockUnavailable(_) => ErrorKind::ClockUnavailable,
            UtilityError::InvalidConstant(_) => ErrorKind::InvalidConstant,
            UtilityError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }
}

/// Payload-free error category, serialized in JSON error responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ArithmeticOverflow,
    DivisionByZero,
    ClockUnavailable,
    InvalidConstant,
    InvalidRequest,
}

impl ErrorKind {
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::ArithmeticOverflow => 1,
            ErrorKind::DivisionByZero => 2,
            ErrorKind::ClockUnavailable => 3,
            ErrorKind::InvalidConstant => 4,
            ErrorKind::InvalidRequest => 5,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ArithmeticOverflow => write!(f, "arithmetic_overflow"),
            ErrorKind::DivisionByZero => write!(f, "division_by_zero"),
            ErrorKind::ClockUnavailable => write!(f, "clock_unavailable"),
            ErrorKind::InvalidConstant => write!(f, "invalid_constant"),
            ErrorKind::InvalidRequest => write!(f, "invalid_request"),
        }
    }
}

/// Result alias used throughout the crate.
pub type UtilResult<T> = Result<T, UtilityError>;
