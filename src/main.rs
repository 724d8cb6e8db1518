use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use delivery_planner::config::EnvironmentConfig;
use delivery_planner::database::connect_store;
use delivery_planner::rpc::{create_rpc_router, RpcServer};
use delivery_planner::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env().context("invalid configuration")?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚚 Delivery Planner");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    // Inicializar document store
    let store = match connect_store(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };

    let state = AppState::new(store, config.clone());
    let app = create_app(state.clone());
    let rpc_server = RpcServer::new(create_rpc_router(&state));
    let rpc_shutdown = rpc_server.shutdown_token();

    let http_listener = TcpListener::bind(config.http_addr())
        .await
        .with_context(|| format!("failed to bind HTTP listener on {}", config.http_addr()))?;
    let rpc_listener = TcpListener::bind(config.rpc_addr())
        .await
        .with_context(|| format!("failed to bind RPC listener on {}", config.rpc_addr()))?;

    info!("🌐 Servidor HTTP en http://{}", config.http_addr());
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health");
    info!("   /api/v1/drivers, /api/v1/packages, /routes");
    info!("🛰️ Servidor RPC en {}", config.rpc_addr());

    let mut http_handle = tokio::spawn(async move { axum::serve(http_listener, app).await });
    let mut rpc_handle = tokio::spawn(rpc_server.serve(rpc_listener));

    // El primer error de cualquiera de los dos servidores detiene el proceso
    let outcome: Result<()> = tokio::select! {
        _ = shutdown_signal() => Ok(()),
        result = &mut http_handle => match result {
            Ok(Ok(())) => Err(anyhow::anyhow!("HTTP server stopped unexpectedly")),
            Ok(Err(e)) => Err(anyhow::Error::new(e).context("HTTP server failed")),
            Err(e) => Err(anyhow::Error::new(e).context("HTTP server task panicked")),
        },
        result = &mut rpc_handle => match result {
            Ok(Ok(())) => Err(anyhow::anyhow!("RPC server stopped unexpectedly")),
            Ok(Err(e)) => Err(anyhow::Error::new(e).context("RPC server failed")),
            Err(e) => Err(anyhow::Error::new(e).context("RPC server task panicked")),
        },
    };

    if let Err(e) = &outcome {
        error!("❌ {:#}", e);
    }

    // Drenar RPC, abortar HTTP
    rpc_shutdown.cancel();
    http_handle.abort();
    if !rpc_handle.is_finished() {
        match rpc_handle.await {
            Ok(Err(e)) => error!("❌ Error drenando el servidor RPC: {}", e),
            Err(e) => error!("❌ Tarea RPC terminó con error: {}", e),
            Ok(Ok(())) => {}
        }
    }

    info!("👋 Servidor terminado");
    outcome
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
