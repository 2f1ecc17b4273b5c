use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("invalid record id: {0:?}")]
    InvalidRecordId(String),
    #[error("invalid record '{id}': {reason}")]
    InvalidRecord { id: String, reason: String },
    #[error("invalid attribute projection: {0}")]
    InvalidProjection(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
