//! Repositorios
//! 
//! Acceso a las tablas `vehicles`, `brand_rules` y `users`. Cada tabla se
//! expone con un trait; hay una implementación PostgreSQL (sqlx) y otra en
//! memoria para desarrollo y pruebas.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{BrandRule, TestType, User, Vehicle, VehicleDraft, VehicleFilter};
use crate::utils::errors::AppResult;

pub mod brand_rule_repository;
pub mod memory;
pub mod user_repository;
pub mod vehicle_repository;

pub use brand_rule_repository::PgBrandRuleRepository;
pub use memory::InMemoryStore;
pub use user_repository::PgUserRepository;
pub use vehicle_repository::PgVehicleRepository;

/// Tabla `vehicles`, siempre acotada al dueño
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Registros que cumplen el filtro, del más reciente al más antiguo
    async fn select(&self, user_id: Uuid, filter: &VehicleFilter) -> AppResult<Vec<Vehicle>>;

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Vehicle>>;

    /// Inserta; el id y la fecha de creación los asigna el almacén
    async fn insert(&self, user_id: Uuid, draft: &VehicleDraft) -> AppResult<Vehicle>;

    /// Reemplaza los campos mutables; `None` si no existe para ese dueño
    async fn update(&self, user_id: Uuid, id: Uuid, draft: &VehicleDraft) -> AppResult<Option<Vehicle>>;

    /// `false` si no existía para ese dueño
    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;
}

/// Tabla `brand_rules`
#[async_trait]
pub trait BrandRuleRepository: Send + Sync {
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<BrandRule>>;

    /// Crea o sobrescribe la regla de (user_id, marca)
    async fn upsert(&self, user_id: Uuid, brand: &str, test_type: TestType) -> AppResult<BrandRule>;
}

/// Tabla `users`
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn create(&self, email: &str, password_hash: &str) -> AppResult<User>;
}
