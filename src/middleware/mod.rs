//! Middleware del sistema
//!
//! Autenticación por token y configuración de CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
