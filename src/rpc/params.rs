//! Conversión de parámetros y resultados RPC

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::status::RpcStatus;
use crate::utils::validation::validate_request;

/// Parámetros `{ "id": "..." }`
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: String,
}

pub fn decode<T: DeserializeOwned>(params: Value) -> Result<T, RpcStatus> {
    serde_json::from_value(params).map_err(|e| RpcStatus::invalid_argument(format!("invalid params: {}", e)))
}

pub fn decode_validated<T: DeserializeOwned + Validate>(params: Value) -> Result<T, RpcStatus> {
    let value: T = decode(params)?;
    validate_request(&value)?;
    Ok(value)
}

pub fn encode<T: Serialize>(value: T) -> Result<Value, RpcStatus> {
    serde_json::to_value(value).map_err(|e| RpcStatus::internal(format!("failed to encode result: {}", e)))
}

pub fn empty() -> Result<Value, RpcStatus> {
    Ok(Value::Object(Default::default()))
}
