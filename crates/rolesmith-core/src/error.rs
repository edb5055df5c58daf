//! Error types for Rolesmith

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("role not found: {role_id} ({reason})")]
    RoleNotFound { role_id: String, reason: String },

    #[error("resource load failed: {address} - {message}")]
    ResourceLoad { address: String, message: String },

    #[error("invalid resource address: {0}")]
    InvalidAddress(String),

    #[error("failed to activate role '{role_id}': {message}")]
    ActivationFailed { role_id: String, message: String },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn role_not_found(role_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RoleNotFound {
            role_id: role_id.into(),
            reason: reason.into(),
        }
    }

    pub fn resource_load(address: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResourceLoad {
            address: address.into(),
            message: message.into(),
        }
    }

    pub fn activation_failed(role_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ActivationFailed {
            role_id: role_id.into(),
            message: message.into(),
        }
    }
}
