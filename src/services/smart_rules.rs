//! Inferencia del tipo de prueba
//!
//! Sugiere "Dinámica" o "Estática" a partir de la marca y submarca que el
//! usuario está escribiendo. Consulta dos fuentes en orden:
//!
//! 1. Las reglas de marca que el usuario guardó (`BrandRule`).
//! 2. La lista fija `SMART_RULES`: primero marca + submarca, después la
//!    regla de toda la marca (sin submarca).
//!
//! La primera coincidencia gana. Las comparaciones ignoran mayúsculas y
//! espacios laterales.

use serde::{Deserialize, Serialize};

use crate::models::{BrandRule, TestType};

/// Regla fija, no editable por el usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmartRule {
    pub brand: &'static str,
    /// `None` aplica a toda la marca
    pub sub_brand: Option<&'static str>,
    pub test_type: TestType,
}

impl SmartRule {
    const fn new(brand: &'static str, sub_brand: Option<&'static str>, test_type: TestType) -> Self {
        Self {
            brand,
            sub_brand,
            test_type,
        }
    }
}

/// Reglas por defecto, en orden de prioridad
pub const SMART_RULES: &[SmartRule] = &[
    SmartRule::new("Renault", Some("Kwid"), TestType::Static),
    SmartRule::new("Chevrolet", Some("Beat"), TestType::Static),
    SmartRule::new("Nissan", Some("V-Drive"), TestType::Dynamic),
    SmartRule::new("Volkswagen", Some("Vento"), TestType::Dynamic),
    SmartRule::new("Toyota", Some("Yaris"), TestType::Dynamic),
    SmartRule::new("Mazda", None, TestType::Static),
];

/// De dónde salió la sugerencia
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    UserRule,
    SmartRule,
    BrandDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub test_type: TestType,
    pub source: SuggestionSource,
}

fn same(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Resolver la sugerencia y su origen
pub fn resolve(
    brand: &str,
    sub_brand: &str,
    user_rules: &[BrandRule],
    smart_rules: &[SmartRule],
) -> Option<Suggestion> {
    if brand.trim().is_empty() {
        return None;
    }

    if let Some(rule) = user_rules.iter().find(|r| r.applies_to(brand)) {
        return Some(Suggestion {
            test_type: rule.test_type,
            source: SuggestionSource::UserRule,
        });
    }

    let exact = smart_rules.iter().find(|r| {
        same(r.brand, brand) && r.sub_brand.is_some_and(|sb| same(sb, sub_brand))
    });
    if let Some(rule) = exact {
        return Some(Suggestion {
            test_type: rule.test_type,
            source: SuggestionSource::SmartRule,
        });
    }

    smart_rules
        .iter()
        .find(|r| same(r.brand, brand) && r.sub_brand.is_none())
        .map(|rule| Suggestion {
            test_type: rule.test_type,
            source: SuggestionSource::BrandDefault,
        })
}

/// Tipo de prueba sugerido, si alguna regla aplica
pub fn suggest_test_type(
    brand: &str,
    sub_brand: &str,
    user_rules: &[BrandRule],
    smart_rules: &[SmartRule],
) -> Option<TestType> {
    resolve(brand, sub_brand, user_rules, smart_rules).map(|s| s.test_type)
}
