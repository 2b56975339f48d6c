use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("side index {0} is out of range; expected 0 or 1")]
    InvalidSide(usize),
    #[error("unknown reset kind '{0}'; expected one of new, new_setup, current, all")]
    UnknownResetKind(String),
}

impl ScoringError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ScoringError::InvalidSide(_) => ErrorCode::InvalidSide,
            ScoringError::UnknownResetKind(_) => ErrorCode::UnknownResetKind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidSide,
    UnknownResetKind,
}

/// Error shape handed back to a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}

impl From<ScoringError> for ErrorPayload {
    fn from(value: ScoringError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
