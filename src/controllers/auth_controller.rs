use std::sync::Arc;

use bcrypt::{hash, verify};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{CurrentUserResponse, LoginRequest, LoginResponse};
use crate::models::User;
use crate::repositories::UserRepository;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

const INVALID_CREDENTIALS: &str = "Credenciales inválidas";

pub struct AuthController {
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            jwt: state.jwt.clone(),
            bcrypt_cost: state.config.bcrypt_cost,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let valid = verify(&request.password, &user.password_hash).map_err(|e| AppError::Hash(e.to_string()))?;
        if !valid {
            warn!("🔒 Intento de login fallido para {}", user.email);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = generate_token(&user, &self.jwt)?;
        info!("🔐 Sesión iniciada: {}", user.email);

        Ok(LoginResponse {
            token,
            expires_in: self.jwt.expiration,
            user: CurrentUserResponse::from(&user),
        })
    }

    pub async fn me(&self, user_id: Uuid) -> AppResult<CurrentUserResponse> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Crea la cuenta si no existe; una cuenta existente no se toca
    pub async fn ensure_account(&self, email: &str, password: &str) -> AppResult<User> {
        if let Some(user) = self.users.find_by_email(email).await? {
            return Ok(user);
        }

        let password_hash = hash(password, self.bcrypt_cost).map_err(|e| AppError::Hash(e.to_string()))?;
        let user = self.users.create(email, &password_hash).await?;
        info!("👤 Cuenta creada: {}", user.email);
        Ok(user)
    }
}
