use axum::{extract::State, middleware, routing::get, Extension, Json, Router};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::brand_rule_dto::BrandRuleResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_brand_rule_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/brand-rules", get(list_brand_rules))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn list_brand_rules(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<BrandRuleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.brand_rules(&user).await?;
    Ok(Json(response))
}
