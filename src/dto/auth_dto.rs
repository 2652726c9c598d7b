use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::User;
use crate::utils::errors::LOGIN_REDIRECT;

// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 6, message = "Mínimo 6 caracteres"))]
    pub password: String,
}

// Usuario actual, para la cabecera del panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub initial: String,
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name(),
            initial: user.initial(),
        }
    }
}

// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub user: CurrentUserResponse,
}

// Logout response: los tokens no tienen estado, el cliente los descarta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub redirect: String,
}

impl Default for LogoutResponse {
    fn default() -> Self {
        Self {
            redirect: LOGIN_REDIRECT.to_string(),
        }
    }
}
