use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::BankKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    DuplicateRotor,
    UnknownMachine,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Rejections raised while checking a machine setup strictly.
///
/// The rotor cage itself never fails; these only come from front ends that
/// refuse malformed orders or positions instead of substituting defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("{bank} order must be 10 characters, got {actual}")]
    OrderLength { bank: BankKind, actual: usize },
    #[error("{bank} rotor in slot {slot} must be a digit below {limit}, got '{found}'")]
    RotorOutOfRange {
        bank: BankKind,
        slot: usize,
        limit: usize,
        found: char,
    },
    #[error("{bank} orientation in slot {slot} must be N or R, got '{found}'")]
    Orientation {
        bank: BankKind,
        slot: usize,
        found: char,
    },
    #[error("big rotor {id} can only be used once across the cipher and control banks")]
    DuplicateBigRotor { id: u8 },
    #[error("index rotor {id} can only be used once")]
    DuplicateIndexRotor { id: u8 },
    #[error("{bank} position must be 5 characters, got {actual}")]
    PositionLength { bank: BankKind, actual: usize },
    #[error("{bank} position in slot {slot} is out of range: '{found}'")]
    PositionOutOfRange {
        bank: BankKind,
        slot: usize,
        found: char,
    },
    #[error("unknown machine type: {0}")]
    UnknownMachine(String),
}

impl SetupError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SetupError::DuplicateBigRotor { .. } | SetupError::DuplicateIndexRotor { .. } => {
                ErrorCode::DuplicateRotor
            }
            SetupError::UnknownMachine(_) => ErrorCode::UnknownMachine,
            _ => ErrorCode::Validation,
        }
    }
}

impl From<SetupError> for ErrorReport {
    fn from(value: SetupError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_code_and_message() {
        let report = ErrorReport::from(SetupError::DuplicateBigRotor { id: 3 });
        assert_eq!(report.code, ErrorCode::DuplicateRotor);
        assert_eq!(
            report.message,
            "big rotor 3 can only be used once across the cipher and control banks"
        );
    }

    #[test]
    fn bank_name_appears_in_message() {
        let err = SetupError::OrderLength {
            bank: BankKind::Index,
            actual: 4,
        };
        assert_eq!(err.to_string(), "index order must be 10 characters, got 4");
        assert_eq!(err.code(), ErrorCode::Validation);
    }
}
