use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::BrandRuleRepository;
use crate::models::{BrandRule, TestType};
use crate::utils::errors::AppResult;

pub struct PgBrandRuleRepository {
    pool: PgPool,
}

impl PgBrandRuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BrandRuleRepository for PgBrandRuleRepository {
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<BrandRule>> {
        let rules = sqlx::query_as::<_, BrandRule>(
            r#"
            SELECT id, user_id, brand, brand_key, test_type, created_at
            FROM brand_rules
            WHERE user_id = $1
            ORDER BY brand_key
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }

    async fn upsert(&self, user_id: Uuid, brand: &str, test_type: TestType) -> AppResult<BrandRule> {
        let rule = sqlx::query_as::<_, BrandRule>(
            r#"
            INSERT INTO brand_rules (user_id, brand, brand_key, test_type)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, brand_key)
            DO UPDATE SET brand = EXCLUDED.brand, test_type = EXCLUDED.test_type
            RETURNING id, user_id, brand, brand_key, test_type, created_at
            "#,
        )
        .bind(user_id)
        .bind(brand.trim())
        .bind(BrandRule::key_for(brand))
        .bind(test_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(rule)
    }
}
