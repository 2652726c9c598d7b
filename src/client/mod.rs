//! Cliente del panel
//!
//! Cliente HTTP tipado para la API más las reglas de interacción de la
//! página: búsqueda con debounce, bloqueo de envíos duplicados y
//! confirmación antes de borrar.

pub mod api_client;
pub mod debounce;
pub mod interaction;

use thiserror::Error;

pub use api_client::{ApiClient, Session};
pub use debounce::{search_channel, SearchDebouncer, SettledSearch};
pub use interaction::{dashboard_url, delete_prompt, Confirm, SubmitGuard, SubmitTicket};

/// Errores del cliente
#[derive(Error, Debug)]
pub enum ClientError {
    /// Respuesta no exitosa; `message` es el mensaje que envió el servidor
    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        redirect: Option<String>,
    },

    #[error("Ya hay una solicitud en curso")]
    Busy,

    #[error("URL inválida: {0}")]
    InvalidUrl(String),

    #[error("No hay sesión iniciada")]
    NotAuthenticated,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// La sesión caducó y hay que volver al login
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status: 401, .. })
    }
}
