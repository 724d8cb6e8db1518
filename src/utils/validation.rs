//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos en la frontera de los transportes.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use super::errors::{bad_request_error, AppError, AppResult};

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Convertir el identificador de un recurso, con error 400 / INVALID_ARGUMENT
pub fn parse_id(value: &str, resource: &str) -> AppResult<Uuid> {
    validate_uuid(value).map_err(|_| bad_request_error(&format!("invalid {} id", resource)))
}

/// Convertir una lista de identificadores; falla con el primero inválido
pub fn parse_ids(values: &[String], resource: &str) -> AppResult<Vec<Uuid>> {
    values.iter().map(|value| parse_id(value, resource)).collect()
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a datetime
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Fecha programada de una ruta: RFC3339 completo o `YYYY-MM-DD` (medianoche UTC)
pub fn parse_route_date(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(datetime) = validate_datetime(value) {
        return Ok(datetime);
    }

    let date = validate_date(value).map_err(|_| {
        let mut error = ValidationError::new("route_date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"RFC3339 or YYYY-MM-DD".to_string());
        error
    })?;

    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ValidationError::new("route_date"))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Construir un AppError de validación para un campo concreto
pub fn field_error(field: &'static str, error: ValidationError) -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    AppError::Validation(errors)
}

/// Ejecutar las reglas `validator` de un request
pub fn validate_request<T: Validate>(request: &T) -> AppResult<()> {
    request.validate().map_err(AppError::Validation)
}
