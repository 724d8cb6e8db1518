//! Cliente RPC
//!
//! Una conexión, peticiones en serie. Lo usan las herramientas y los tests.

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio_util::codec::{Framed, LengthDelimitedCodec};

use super::protocol::{RpcRequest, RpcResponse};
use super::server::frame_codec;
use super::status::RpcStatus;

#[derive(Debug, Error)]
pub enum RpcClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("RPC error: {0}")]
    Status(#[from] RpcStatus),

    #[error("connection closed by server")]
    ConnectionClosed,

    #[error("response id {got} does not match request id {expected}")]
    MismatchedId { expected: u64, got: u64 },
}

pub struct RpcClient {
    framed: Framed<TcpStream, LengthDelimitedCodec>,
    next_id: u64,
}

impl RpcClient {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self, RpcClientError> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self {
            framed: Framed::new(stream, frame_codec()),
            next_id: 1,
        })
    }

    /// Llamada cruda: devuelve `result` o el estado de error
    pub async fn call<P: Serialize>(&mut self, method: &str, params: P) -> Result<Value, RpcClientError> {
        let id = self.next_id;
        self.next_id += 1;

        let request = RpcRequest::new(id, method, serde_json::to_value(params)?);
        self.framed.send(Bytes::from(serde_json::to_vec(&request)?)).await?;

        let frame = self
            .framed
            .next()
            .await
            .ok_or(RpcClientError::ConnectionClosed)??;
        let response: RpcResponse = serde_json::from_slice(&frame)?;

        if response.id != id {
            return Err(RpcClientError::MismatchedId {
                expected: id,
                got: response.id,
            });
        }

        Ok(response.into_result()?)
    }

    /// Llamada tipada: deserializa `result` en `T`
    pub async fn call_as<P, T>(&mut self, method: &str, params: P) -> Result<T, RpcClientError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let result = self.call(method, params).await?;
        Ok(serde_json::from_value(result)?)
    }
}
