//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use std::borrow::Cow;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// Ruta a la que el cliente debe volver cuando no hay sesión
pub const LOGIN_REDIRECT: &str = "/login";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{alert}: {detail}")]
    Persistence { alert: &'static str, detail: String },

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<&'static str>,
}

impl ErrorResponse {
    fn new(error: &str, message: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            details: None,
            code: Some(code.to_string()),
            redirect: None,
        }
    }
}

impl AppError {
    /// Convierte un fallo de almacenamiento en la alerta genérica de la operación.
    /// Los errores de validación y de recurso no encontrado pasan sin cambios.
    pub fn into_persistence(self, alert: &'static str) -> AppError {
        match self {
            AppError::Database(_) | AppError::Storage(_) => {
                let detail = self.to_string();
                tracing::error!("❌ {}: {}", alert, detail);
                AppError::Persistence { alert, detail }
            }
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Database Error",
                        "Ocurrió un error al acceder a la base de datos",
                        "DB_ERROR",
                    ),
                )
            }

            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Storage Error",
                        "Ocurrió un error al acceder a los datos",
                        "STORAGE_ERROR",
                    ),
                )
            }

            AppError::Validation(e) => {
                tracing::debug!("Validation error: {}", e);
                let mut response =
                    ErrorResponse::new("Validation Error", "Los datos enviados no son válidos", "VALIDATION_ERROR");
                response.details = Some(json!(e));
                (StatusCode::BAD_REQUEST, response)
            }

            AppError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized access: {}", msg);
                let mut response = ErrorResponse::new("Unauthorized", msg, "UNAUTHORIZED");
                response.redirect = Some(LOGIN_REDIRECT);
                (StatusCode::UNAUTHORIZED, response)
            }

            AppError::Jwt(msg) => {
                tracing::warn!("JWT error: {}", msg);
                let mut response = ErrorResponse::new("JWT Error", "Sesión inválida o expirada", "JWT_ERROR");
                response.redirect = Some(LOGIN_REDIRECT);
                (StatusCode::UNAUTHORIZED, response)
            }

            AppError::NotFound(msg) => {
                tracing::debug!("Resource not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::new("Not Found", msg, "NOT_FOUND"))
            }

            AppError::Persistence { alert, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Persistence Error", alert, "PERSISTENCE_ERROR"),
            ),

            AppError::Hash(msg) => {
                tracing::error!("Hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Hash Error",
                        "Ocurrió un error al procesar las credenciales",
                        "HASH_ERROR",
                    ),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear un error de validación de un solo campo
pub fn field_error(field: &'static str, code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error.add_param(Cow::Borrowed("field"), &field);
    error
}

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, field_error(field, "custom", message));
    AppError::Validation(errors)
}

/// Cuerpo JSON ilegible: se reporta como error de validación del campo `body`
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("⚠️ Cuerpo JSON rechazado: {}", rejection.body_text());
        validation_error("body", "Solicitud inválida")
    }
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unauthorized_carries_login_redirect() {
        let response = AppError::Unauthorized("Token de autorización requerido".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["redirect"], "/login");
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_persistence_hides_detail() {
        let error = AppError::Storage("disk on fire".into()).into_persistence("Error al guardar vehículo");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Error al guardar vehículo");
        assert!(!body.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_into_persistence_keeps_not_found() {
        let error = not_found_error("Vehicle", "abc").into_persistence("Error al guardar vehículo");
        assert!(matches!(error, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_validation_error_lists_field() {
        let response = validation_error("brand", "Marca es requerida").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["details"]["brand"][0]["message"], "Marca es requerida");
    }
}
