//! Utilidades del sistema
//! 
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT y reloj local.

pub mod errors;
pub mod jwt;
pub mod time;
pub mod validation;
