use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{BrandRule, TestType};
use crate::services::smart_rules::{Suggestion, SuggestionSource};

// Response de regla de marca
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandRuleResponse {
    pub id: Uuid,
    pub brand: String,
    pub test_type: TestType,
    pub created_at: DateTime<Utc>,
}

impl From<BrandRule> for BrandRuleResponse {
    fn from(rule: BrandRule) -> Self {
        Self {
            id: rule.id,
            brand: rule.brand,
            test_type: rule.test_type,
            created_at: rule.created_at,
        }
    }
}

impl BrandRuleResponse {
    /// Regla de dominio para el usuario de la sesión
    pub fn into_rule(self, user_id: Uuid) -> BrandRule {
        BrandRule {
            id: self.id,
            user_id,
            brand_key: BrandRule::key_for(&self.brand),
            brand: self.brand,
            test_type: self.test_type,
            created_at: self.created_at,
        }
    }
}

// Query de sugerencia de tipo de prueba
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub sub_brand: String,
}

// Response de sugerencia; test_type es None cuando ninguna regla aplica
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub brand: String,
    pub sub_brand: String,
    pub test_type: Option<TestType>,
    pub source: Option<SuggestionSource>,
}

impl SuggestionResponse {
    pub fn new(query: SuggestionQuery, suggestion: Option<Suggestion>) -> Self {
        Self {
            brand: query.brand,
            sub_brand: query.sub_brand,
            test_type: suggestion.map(|s| s.test_type),
            source: suggestion.map(|s| s.source),
        }
    }
}
