//! Almacén en memoria
//!
//! Implementa los tres repositorios sobre vectores protegidos por un
//! `RwLock` de tokio. Se usa en desarrollo y en pruebas; permite simular
//! fallos de escritura y mover la fecha de creación de un registro.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BrandRuleRepository, UserRepository, VehicleRepository};
use crate::models::{BrandRule, TestType, User, Vehicle, VehicleDraft, VehicleFilter};
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
struct Tables {
    vehicles: Vec<Vehicle>,
    brand_rules: Vec<BrandRule>,
    users: Vec<User>,
    last_created_at: Option<DateTime<Utc>>,
}

impl Tables {
    /// Marca de tiempo estrictamente creciente, como la de un servidor
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(stamp);
        stamp
    }
}

#[derive(Default)]
struct FailureSwitches {
    vehicle_writes: AtomicBool,
    brand_rule_writes: AtomicBool,
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    failures: Arc<FailureSwitches>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hace fallar inserciones, actualizaciones y borrados de vehículos
    pub fn fail_vehicle_writes(&self, fail: bool) {
        self.failures.vehicle_writes.store(fail, Ordering::SeqCst);
    }

    /// Hace fallar el upsert de reglas de marca
    pub fn fail_brand_rule_writes(&self, fail: bool) {
        self.failures.brand_rule_writes.store(fail, Ordering::SeqCst);
    }

    /// Cambia la fecha de creación de un vehículo; `false` si no existe
    pub async fn backdate(&self, id: Uuid, created_at: DateTime<Utc>) -> bool {
        let mut tables = self.tables.write().await;
        match tables.vehicles.iter_mut().find(|v| v.id == id) {
            Some(vehicle) => {
                vehicle.created_at = created_at;
                true
            }
            None => false,
        }
    }

    pub async fn vehicle_count(&self) -> usize {
        self.tables.read().await.vehicles.len()
    }

    fn check(&self, switch: &AtomicBool, table: &str) -> AppResult<()> {
        if switch.load(Ordering::SeqCst) {
            return Err(AppError::Storage(format!("escritura simulada fallida en {}", table)));
        }
        Ok(())
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn select(&self, user_id: Uuid, filter: &VehicleFilter) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.read().await;
        let mut vehicles: Vec<Vehicle> = tables
            .vehicles
            .iter()
            .filter(|v| v.user_id == user_id && filter.matches(v))
            .cloned()
            .collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(vehicles)
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .iter()
            .find(|v| v.id == id && v.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, user_id: Uuid, draft: &VehicleDraft) -> AppResult<Vehicle> {
        self.check(&self.failures.vehicle_writes, "vehicles")?;
        let mut tables = self.tables.write().await;
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            user_id,
            brand: draft.brand.clone(),
            sub_brand: draft.sub_brand.clone(),
            model_year: draft.model_year,
            test_type: draft.test_type,
            created_at: tables.next_timestamp(),
        };
        tables.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, user_id: Uuid, id: Uuid, draft: &VehicleDraft) -> AppResult<Option<Vehicle>> {
        self.check(&self.failures.vehicle_writes, "vehicles")?;
        let mut tables = self.tables.write().await;
        let Some(vehicle) = tables
            .vehicles
            .iter_mut()
            .find(|v| v.id == id && v.user_id == user_id)
        else {
            return Ok(None);
        };
        vehicle.brand = draft.brand.clone();
        vehicle.sub_brand = draft.sub_brand.clone();
        vehicle.model_year = draft.model_year;
        vehicle.test_type = draft.test_type;
        Ok(Some(vehicle.clone()))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        self.check(&self.failures.vehicle_writes, "vehicles")?;
        let mut tables = self.tables.write().await;
        let before = tables.vehicles.len();
        tables.vehicles.retain(|v| !(v.id == id && v.user_id == user_id));
        Ok(tables.vehicles.len() < before)
    }
}

#[async_trait]
impl BrandRuleRepository for InMemoryStore {
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<BrandRule>> {
        let tables = self.tables.read().await;
        let mut rules: Vec<BrandRule> = tables
            .brand_rules
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rules.sort_by(|a, b| a.brand_key.cmp(&b.brand_key));
        Ok(rules)
    }

    async fn upsert(&self, user_id: Uuid, brand: &str, test_type: TestType) -> AppResult<BrandRule> {
        self.check(&self.failures.brand_rule_writes, "brand_rules")?;
        let mut tables = self.tables.write().await;
        let key = BrandRule::key_for(brand);

        if let Some(rule) = tables
            .brand_rules
            .iter_mut()
            .find(|r| r.user_id == user_id && r.brand_key == key)
        {
            rule.brand = brand.trim().to_string();
            rule.test_type = test_type;
            return Ok(rule.clone());
        }

        let rule = BrandRule {
            id: Uuid::new_v4(),
            user_id,
            brand: brand.trim().to_string(),
            brand_key: key,
            test_type,
            created_at: tables.next_timestamp(),
        };
        tables.brand_rules.push(rule.clone());
        Ok(rule)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let wanted = email.trim().to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.to_lowercase() == wanted)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        let email = email.trim().to_string();
        let key = email.to_lowercase();
        if tables.users.iter().any(|u| u.email.to_lowercase() == key) {
            return Err(AppError::Storage(format!("el email '{}' ya existe", email)));
        }
        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash: password_hash.to_string(),
            created_at: tables.next_timestamp(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}
