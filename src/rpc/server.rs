//! Servidor RPC sobre TCP
//!
//! Tramas con prefijo de longitud (`LengthDelimitedCodec`) y sobres JSON.
//! Cada conexión atiende peticiones en serie; las conexiones corren en
//! paralelo. Al cancelar el token se deja de aceptar y se espera a que las
//! conexiones terminen la petición en curso.

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{stream, SinkExt, Stream, StreamExt};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use super::protocol::{RpcRequest, RpcResponse, MAX_FRAME_LENGTH};
use super::status::RpcStatus;

/// Un grupo de métodos (`DriverService`, `PackageService`, ...)
#[async_trait]
pub trait RpcService: Send + Sync {
    fn name(&self) -> &'static str;

    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcStatus>;
}

/// Tabla de servicios por nombre
#[derive(Default)]
pub struct RpcRouter {
    services: HashMap<&'static str, Arc<dyn RpcService>>,
}

impl RpcRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: RpcService + 'static>(mut self, service: S) -> Self {
        self.services.insert(service.name(), Arc::new(service));
        self
    }

    pub async fn dispatch(&self, request: RpcRequest) -> RpcResponse {
        let Some((service_name, method)) = request.service_and_method() else {
            return RpcResponse::error(request.id, RpcStatus::unimplemented(&request.method));
        };

        let Some(service) = self.services.get(service_name) else {
            return RpcResponse::error(request.id, RpcStatus::unimplemented(&request.method));
        };

        debug!("📨 RPC {} (id {})", request.method, request.id);
        match service.call(method, request.params.clone()).await {
            Ok(result) => RpcResponse::ok(request.id, result),
            Err(status) => {
                debug!("↩️ RPC {} falló: {}", request.method, status);
                RpcResponse::error(request.id, status)
            }
        }
    }
}

/// Pausa tras un error de `accept` antes de reintentar
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub(crate) fn frame_codec() -> LengthDelimitedCodec {
    LengthDelimitedCodec::builder()
        .max_frame_length(MAX_FRAME_LENGTH)
        .new_codec()
}

pub struct RpcServer {
    router: Arc<RpcRouter>,
    shutdown: CancellationToken,
    tracker: TaskTracker,
}

impl RpcServer {
    pub fn new(router: RpcRouter) -> Self {
        Self {
            router: Arc::new(router),
            shutdown: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Token que detiene el servidor al cancelarse
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Acepta conexiones hasta la cancelación y luego drena las activas
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        let local_addr = listener.local_addr()?;
        info!("🛰️ Servidor RPC escuchando en {}", local_addr);

        let incoming = stream::unfold(listener, |listener| async move {
            let accepted = listener.accept().await;
            Some((accepted, listener))
        });
        self.serve_incoming(Box::pin(incoming)).await;
        Ok(())
    }

    /// Los errores de `accept` (EMFILE, ECONNABORTED, ...) no detienen el servidor
    pub(crate) async fn serve_incoming<S>(self, mut incoming: S)
    where
        S: Stream<Item = io::Result<(TcpStream, SocketAddr)>> + Unpin,
    {
        loop {
            let accepted = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                accepted = incoming.next() => accepted,
            };

            let (socket, peer) = match accepted {
                Some(Ok(connection)) => connection,
                Some(Err(e)) => {
                    warn!("⚠️ Error aceptando conexión RPC: {}", e);
                    let cancelled = tokio::select! {
                        _ = self.shutdown.cancelled() => true,
                        _ = tokio::time::sleep(ACCEPT_BACKOFF) => false,
                    };
                    if cancelled {
                        break;
                    }
                    continue;
                }
                None => break,
            };

            debug!("🔗 Conexión RPC aceptada: {}", peer);
            let router = self.router.clone();
            let shutdown = self.shutdown.clone();
            self.tracker
                .spawn(async move { handle_connection(socket, peer, router, shutdown).await });
        }

        self.tracker.close();
        info!("⏳ Drenando {} conexión(es) RPC...", self.tracker.len());
        self.tracker.wait().await;
        info!("✅ Servidor RPC detenido");
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    router: Arc<RpcRouter>,
    shutdown: CancellationToken,
) {
    let mut framed = Framed::new(stream, frame_codec());

    loop {
        let frame = tokio::select! {
            _ = shutdown.cancelled() => break,
            frame = framed.next() => frame,
        };

        let bytes = match frame {
            Some(Ok(bytes)) => bytes,
            Some(Err(e)) => {
                warn!("⚠️ Error leyendo trama de {}: {}", peer, e);
                break;
            }
            None => break,
        };

        let response = match serde_json::from_slice::<RpcRequest>(&bytes) {
            Ok(request) => router.dispatch(request).await,
            Err(e) => RpcResponse::error(0, RpcStatus::invalid_argument(format!("malformed request: {}", e))),
        };

        let payload = match serde_json::to_vec(&response) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("⚠️ No se pudo serializar la respuesta RPC: {}", e);
                break;
            }
        };

        if let Err(e) = framed.send(Bytes::from(payload)).await {
            warn!("⚠️ Error enviando respuesta a {}: {}", peer, e);
            break;
        }
    }

    debug!("🔌 Conexión RPC cerrada: {}", peer);
}
