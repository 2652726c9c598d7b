//! Modelo de User
//! 
//! Cuenta que inicia sesión en el panel. Cada vehículo y cada regla de
//! marca pertenecen a un usuario.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Parte local del email, mostrada en la cabecera del panel
    pub fn display_name(&self) -> String {
        self.email.split('@').next().unwrap_or_default().to_string()
    }

    /// Inicial en mayúscula para el avatar
    pub fn initial(&self) -> String {
        self.email
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_and_initial() {
        let user = User {
            id: Uuid::new_v4(),
            email: "inspector@taller.mx".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        assert_eq!(user.display_name(), "inspector");
        assert_eq!(user.initial(), "I");
    }
}
