//! Tipo de prueba de verificación
//! 
//! Mapea al ENUM `test_type` de PostgreSQL. Las etiquetas serializadas
//! son las mismas que ve el usuario: "Dinámica" y "Estática".

use serde::{Deserialize, Serialize};
use sqlx::Type;
use std::fmt;
use std::str::FromStr;

/// Tipo de prueba - mapea al ENUM test_type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, Default)]
#[sqlx(type_name = "test_type")]
pub enum TestType {
    #[default]
    #[serde(rename = "Dinámica")]
    #[sqlx(rename = "Dinámica")]
    Dynamic,
    #[serde(rename = "Estática")]
    #[sqlx(rename = "Estática")]
    Static,
}

impl TestType {
    /// Etiqueta tal como se guarda y se muestra
    pub fn label(&self) -> &'static str {
        match self {
            TestType::Dynamic => "Dinámica",
            TestType::Static => "Estática",
        }
    }

    /// Etiqueta en minúsculas, usada en "Marcar marca como ..."
    pub fn lowercase_label(&self) -> &'static str {
        match self {
            TestType::Dynamic => "dinámica",
            TestType::Static => "estática",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error al interpretar una etiqueta de tipo de prueba
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("tipo de prueba desconocido: '{0}'")]
pub struct UnknownTestType(pub String);

impl FromStr for TestType {
    type Err = UnknownTestType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "dinámica" | "dinamica" => Ok(TestType::Dynamic),
            "estática" | "estatica" => Ok(TestType::Static),
            _ => Err(UnknownTestType(value.to_string())),
        }
    }
}
