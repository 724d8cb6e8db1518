//! Códigos de estado RPC y su correspondencia con `AppError`

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::{AppError, ErrorKind};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcCode {
    Ok,
    InvalidArgument,
    NotFound,
    FailedPrecondition,
    Unimplemented,
    Internal,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("{code:?}: {message}")]
pub struct RpcStatus {
    pub code: RpcCode,
    pub message: String,
}

impl RpcStatus {
    pub fn new(code: RpcCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(RpcCode::InvalidArgument, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(RpcCode::NotFound, message)
    }

    pub fn unimplemented(method: &str) -> Self {
        Self::new(RpcCode::Unimplemented, format!("unknown method '{}'", method))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RpcCode::Internal, message)
    }
}

impl From<AppError> for RpcStatus {
    fn from(err: AppError) -> Self {
        let code = match err.kind() {
            ErrorKind::InvalidArgument => RpcCode::InvalidArgument,
            ErrorKind::NotFound => RpcCode::NotFound,
            ErrorKind::Conflict => RpcCode::FailedPrecondition,
            ErrorKind::Internal => {
                tracing::error!("❌ Error interno en RPC: {}", err);
                RpcCode::Internal
            }
        };
        Self::new(code, err.public_message())
    }
}
