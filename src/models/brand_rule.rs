//! Modelo de BrandRule
//! 
//! Regla recordada por el usuario: tipo de prueba por defecto para una marca.
//! Única por (user_id, brand_key), donde brand_key es la marca normalizada.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::TestType;

/// BrandRule - mapea a la tabla brand_rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BrandRule {
    pub id: Uuid,
    pub user_id: Uuid,
    pub brand: String,
    #[serde(skip)]
    pub brand_key: String,
    pub test_type: TestType,
    pub created_at: DateTime<Utc>,
}

impl BrandRule {
    /// Clave de unicidad: marca sin espacios laterales y en minúsculas
    pub fn key_for(brand: &str) -> String {
        brand.trim().to_lowercase()
    }

    pub fn applies_to(&self, brand: &str) -> bool {
        self.brand_key == Self::key_for(brand)
    }
}
