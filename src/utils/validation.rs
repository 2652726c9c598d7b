//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! que el derive de `validator` no cubre.

use validator::ValidationError;

/// Año mínimo aceptado para un modelo
pub const MIN_MODEL_YEAR: i32 = 1900;

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + serde::Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar año de modelo: entre 1900 y el año siguiente al actual
pub fn validate_model_year(year: i32, current_year: i32) -> Result<(), ValidationError> {
    validate_range(year, MIN_MODEL_YEAR, current_year + 1)
}

/// Escapar comodines de LIKE/ILIKE para buscar el texto literal
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Renault").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(5, 1, 10).is_ok());
        assert!(validate_range(0, 1, 10).is_err());
        assert!(validate_range(15, 1, 10).is_err());
    }

    #[test]
    fn test_validate_model_year() {
        assert!(validate_model_year(1900, 2026).is_ok());
        assert!(validate_model_year(2027, 2026).is_ok());
        assert!(validate_model_year(1899, 2026).is_err());
        assert!(validate_model_year(2028, 2026).is_err());
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("V-Drive"), "V-Drive");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
