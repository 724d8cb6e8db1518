//! Middleware del sistema
//!
//! CORS y trazas HTTP.

pub mod cors;
pub mod trace;

pub use cors::*;
pub use trace::*;
