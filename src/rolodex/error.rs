use crate::model::Field;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RolodexError {
    #[error("Invalid {field}: {value:?}")]
    Validation { field: Field, value: String },

    #[error("A contact with phone number {0} already exists")]
    DuplicatePhone(String),

    #[error("Contact not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt contact file (line {line}): {reason}")]
    Decode { line: usize, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl RolodexError {
    pub fn invalid(field: Field, value: impl Into<String>) -> Self {
        RolodexError::Validation {
            field,
            value: value.into(),
        }
    }

    pub fn decode(line: usize, reason: impl Into<String>) -> Self {
        RolodexError::Decode {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RolodexError>;
