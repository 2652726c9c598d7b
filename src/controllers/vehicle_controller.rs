use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::dto::brand_rule_dto::{BrandRuleResponse, SuggestionQuery, SuggestionResponse};
use crate::dto::vehicle_dto::{DashboardQuery, DashboardResponse, VehicleCard, VehicleRequest, VehicleResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{VehicleDraft, VehicleFilter};
use crate::repositories::{BrandRuleRepository, VehicleRepository};
use crate::services::smart_rules::{self, SMART_RULES};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::time::LocalClock;

pub const SAVE_ALERT: &str = "Error al guardar vehículo";
pub const DELETE_ALERT: &str = "Error al eliminar el vehículo";
pub const LOAD_ALERT: &str = "Error al cargar los registros";

pub struct VehicleController {
    vehicles: Arc<dyn VehicleRepository>,
    brand_rules: Arc<dyn BrandRuleRepository>,
    clock: LocalClock,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
            brand_rules: state.brand_rules.clone(),
            clock: state.clock,
        }
    }

    /// Registros de hoy, o de cualquier fecha cuando hay búsqueda
    pub async fn dashboard(&self, user: &AuthenticatedUser, query: &DashboardQuery) -> AppResult<DashboardResponse> {
        let term = query.search_term();
        let filter = match term {
            Some(q) => VehicleFilter::Search(q.to_string()),
            None => VehicleFilter::CreatedSince(self.clock.start_of_today()),
        };

        let vehicles = self
            .vehicles
            .select(user.user_id, &filter)
            .await
            .map_err(|e| e.into_persistence(LOAD_ALERT))?;

        let cards = vehicles
            .into_iter()
            .map(|v| VehicleCard::new(v, &self.clock))
            .collect();

        Ok(DashboardResponse::new(term, cards))
    }

    pub async fn get_by_id(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<VehicleResponse> {
        let vehicle = self
            .vehicles
            .find_by_id(user.user_id, id)
            .await
            .map_err(|e| e.into_persistence(LOAD_ALERT))?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: VehicleRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        let save_as_rule = request.save_as_rule;
        let draft = request
            .into_draft(self.clock.current_year())
            .map_err(AppError::Validation)?;

        let vehicle = self
            .vehicles
            .insert(user.user_id, &draft)
            .await
            .map_err(|e| e.into_persistence(SAVE_ALERT))?;

        info!("✅ Vehículo {} creado por {}", vehicle.id, user.user_id);

        if save_as_rule {
            self.remember_brand(user, &draft).await;
        }

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo creado exitosamente",
        ))
    }

    /// Guarda la regla de marca sin afectar al alta si falla
    async fn remember_brand(&self, user: &AuthenticatedUser, draft: &VehicleDraft) {
        match self.brand_rules.upsert(user.user_id, &draft.brand, draft.test_type).await {
            Ok(rule) => info!("💾 Regla de marca '{}' -> {}", rule.brand, rule.test_type),
            Err(e) => error!("❌ Error saving rule: {}", e),
        }
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: VehicleRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        let draft = request
            .into_draft(self.clock.current_year())
            .map_err(AppError::Validation)?;

        let vehicle = self
            .vehicles
            .update(user.user_id, id, &draft)
            .await
            .map_err(|e| e.into_persistence(SAVE_ALERT))?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        info!("✏️ Vehículo {} actualizado", vehicle.id);

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<ApiResponse<()>> {
        let deleted = self
            .vehicles
            .delete(user.user_id, id)
            .await
            .map_err(|e| e.into_persistence(DELETE_ALERT))?;

        if !deleted {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }

        info!("🗑️ Vehículo {} eliminado", id);
        Ok(ApiResponse::message("Vehículo eliminado exitosamente"))
    }

    /// Sugerencia de tipo de prueba para un registro nuevo
    pub async fn suggestion(&self, user: &AuthenticatedUser, query: SuggestionQuery) -> AppResult<SuggestionResponse> {
        let rules = self
            .brand_rules
            .list(user.user_id)
            .await
            .map_err(|e| e.into_persistence(LOAD_ALERT))?;

        let suggestion = smart_rules::resolve(&query.brand, &query.sub_brand, &rules, SMART_RULES);
        Ok(SuggestionResponse::new(query, suggestion))
    }

    pub async fn brand_rules(&self, user: &AuthenticatedUser) -> AppResult<Vec<BrandRuleResponse>> {
        let rules = self
            .brand_rules
            .list(user.user_id)
            .await
            .map_err(|e| e.into_persistence(LOAD_ALERT))?;

        Ok(rules.into_iter().map(BrandRuleResponse::from).collect())
    }
}
