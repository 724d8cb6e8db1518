//! delivery_planner
//!
//! Registro logístico de repartidores, paquetes y rutas con API HTTP/JSON
//! y API RPC sobre un document store (PostgreSQL JSONB o memoria).

pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod rpc;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
