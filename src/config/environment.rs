//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las variables son opcionales y tienen valor por defecto.

use std::env;
use std::str::FromStr;

use thiserror::Error;

use super::database::DatabaseConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub http_port: u16,
    pub rpc_port: u16,
    pub log_level: String,
    pub cors_origins: Vec<String>,
    pub database: DatabaseConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            http_port: 8080,
            rpc_port: 9090,
            log_level: "info".to_string(),
            cors_origins: Vec::new(),
            database: DatabaseConfig::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde el entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Cargar la configuración desde cualquier fuente clave/valor
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut database = defaults.database.clone();
        if let Some(url) = get("DATABASE_URL") {
            database.url = url;
        }
        if let Some(name) = get("DB_NAME") {
            database.database_name = name;
        }
        database.max_connections = parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), database.max_connections)?;

        Ok(Self {
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            host: get("HOST").unwrap_or(defaults.host),
            http_port: parse_or("HTTP_PORT", get("HTTP_PORT"), defaults.http_port)?,
            rpc_port: parse_or("RPC_PORT", get("RPC_PORT"), defaults.rpc_port)?,
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            database,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Dirección del listener HTTP
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Dirección del listener RPC
    pub fn rpc_addr(&self) -> String {
        format!("{}:{}", self.host, self.rpc_port)
    }
}

fn parse_or<T: FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}
