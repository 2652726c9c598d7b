use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::VehicleRepository;
use crate::models::{Vehicle, VehicleDraft, VehicleFilter};
use crate::utils::errors::AppResult;
use crate::utils::validation::escape_like;

const VEHICLE_COLUMNS: &str = "id, user_id, brand, sub_brand, model_year, test_type, created_at";

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn select(&self, user_id: Uuid, filter: &VehicleFilter) -> AppResult<Vec<Vehicle>> {
        let vehicles = match filter {
            VehicleFilter::CreatedSince(since) => {
                sqlx::query_as::<_, Vehicle>(&format!(
                    "SELECT {VEHICLE_COLUMNS} FROM vehicles \
                     WHERE user_id = $1 AND created_at >= $2 \
                     ORDER BY created_at DESC"
                ))
                .bind(user_id)
                .bind(*since)
                .fetch_all(&self.pool)
                .await?
            }
            VehicleFilter::Search(query) => {
                let pattern = format!("%{}%", escape_like(query));
                sqlx::query_as::<_, Vehicle>(&format!(
                    "SELECT {VEHICLE_COLUMNS} FROM vehicles \
                     WHERE user_id = $1 AND (brand ILIKE $2 OR sub_brand ILIKE $2) \
                     ORDER BY created_at DESC"
                ))
                .bind(user_id)
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(vehicles)
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn insert(&self, user_id: Uuid, draft: &VehicleDraft) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "INSERT INTO vehicles (user_id, brand, sub_brand, model_year, test_type) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {VEHICLE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&draft.brand)
        .bind(&draft.sub_brand)
        .bind(draft.model_year)
        .bind(draft.test_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn update(&self, user_id: Uuid, id: Uuid, draft: &VehicleDraft) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "UPDATE vehicles \
             SET brand = $3, sub_brand = $4, model_year = $5, test_type = $6 \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {VEHICLE_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(&draft.brand)
        .bind(&draft.sub_brand)
        .bind(draft.model_year)
        .bind(draft.test_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
