use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::SessionPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidState,
    InvalidArgument,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorPayload {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Caller-contract violations raised by the gesture interpreter and session controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SwipeError {
    #[error("no current card: session is {phase}")]
    NoCurrentCard { phase: SessionPhase },
    #[error("no gesture in progress")]
    GestureNotActive,
    #[error("a neutral release cannot be committed")]
    NeutralCommit,
    #[error("invalid swipe thresholds: provisional={provisional} commit={commit}")]
    InvalidThresholds { provisional: f64, commit: f64 },
}

impl SwipeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SwipeError::NoCurrentCard { .. } | SwipeError::GestureNotActive => {
                ErrorCode::InvalidState
            }
            SwipeError::NeutralCommit | SwipeError::InvalidThresholds { .. } => {
                ErrorCode::InvalidArgument
            }
        }
    }
}

impl From<&SwipeError> for ErrorPayload {
    fn from(value: &SwipeError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}
