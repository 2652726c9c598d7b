//! Verifi-Check
//!
//! Panel de verificación vehicular: registro de inspecciones, reglas de
//! marca y sugerencia del tipo de prueba (Dinámica / Estática).

pub mod client;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_for;
use crate::state::AppState;

/// Router completo de la API
pub fn create_app(state: AppState) -> Router {
    let cors = cors_for(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .merge(routes::create_auth_router(state.clone()))
        .merge(routes::create_vehicle_router(state.clone()))
        .merge(routes::create_brand_rule_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "verifi-check",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
