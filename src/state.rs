//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    BrandRuleRepository, InMemoryStore, PgBrandRuleRepository, PgUserRepository, PgVehicleRepository,
    UserRepository, VehicleRepository,
};
use crate::utils::jwt::JwtConfig;
use crate::utils::time::LocalClock;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub brand_rules: Arc<dyn BrandRuleRepository>,
    pub users: Arc<dyn UserRepository>,
    pub jwt: JwtConfig,
    pub clock: LocalClock,
}

impl AppState {
    /// Estado respaldado por PostgreSQL
    pub fn postgres(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self::with_repositories(
            config,
            Arc::new(PgVehicleRepository::new(pool.clone())),
            Arc::new(PgBrandRuleRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
        )
    }

    /// Estado respaldado por el almacén en memoria
    pub fn in_memory(store: InMemoryStore, config: EnvironmentConfig) -> Self {
        Self::with_repositories(
            config,
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
        )
    }

    pub fn with_repositories(
        config: EnvironmentConfig,
        vehicles: Arc<dyn VehicleRepository>,
        brand_rules: Arc<dyn BrandRuleRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            jwt: JwtConfig::from(&config),
            clock: LocalClock::new(config.utc_offset),
            config: Arc::new(config),
            vehicles,
            brand_rules,
            users,
        }
    }
}
