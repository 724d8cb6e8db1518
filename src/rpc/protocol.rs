//! Sobres JSON del protocolo RPC
//!
//! Cada trama (prefijo de 4 bytes big-endian con la longitud) lleva un
//! único sobre JSON. Las respuestas repiten el `id` de la petición.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::status::{RpcCode, RpcStatus};

/// Tamaño máximo de una trama
pub const MAX_FRAME_LENGTH: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcRequest {
    pub id: u64,
    /// `"Servicio/Método"`, p. ej. `"DriverService/CreateDriver"`
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl RpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self {
            id,
            method: method.into(),
            params,
        }
    }

    /// Separa `"Servicio/Método"`; `None` si el formato no es válido
    pub fn service_and_method(&self) -> Option<(&str, &str)> {
        let (service, method) = self.method.split_once('/')?;
        if service.is_empty() || method.is_empty() {
            return None;
        }
        Some((service, method))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcResponse {
    pub id: u64,
    pub code: RpcCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RpcResponse {
    pub fn ok(id: u64, result: Value) -> Self {
        Self {
            id,
            code: RpcCode::Ok,
            result: Some(result),
            message: None,
        }
    }

    pub fn error(id: u64, status: RpcStatus) -> Self {
        Self {
            id,
            code: status.code,
            result: None,
            message: Some(status.message),
        }
    }

    pub fn into_result(self) -> Result<Value, RpcStatus> {
        match self.code {
            RpcCode::Ok => Ok(self.result.unwrap_or(Value::Null)),
            code => Err(RpcStatus::new(code, self.message.unwrap_or_default())),
        }
    }
}
