use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    middleware,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::brand_rule_dto::{SuggestionQuery, SuggestionResponse};
use crate::dto::vehicle_dto::{DashboardQuery, DashboardResponse, VehicleRequest, VehicleResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/vehicles", get(dashboard).post(create_vehicle))
        .route("/api/vehicles/suggestion", get(suggest_test_type))
        .route(
            "/api/vehicles/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.dashboard(&user, &query).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let Json(request) = payload?;
    let controller = VehicleController::new(&state);
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.get_by_id(&user, id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let Json(request) = payload?;
    let controller = VehicleController::new(&state);
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.delete(&user, id).await?;
    Ok(Json(response))
}

async fn suggest_test_type(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.suggestion(&user, query).await?;
    Ok(Json(response))
}
