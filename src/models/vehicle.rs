//! Modelo de Vehicle
//! 
//! Este módulo contiene el struct Vehicle (registro de verificación) y los
//! tipos que usan los repositorios para insertar, actualizar y filtrar.
//! Mapea exactamente a la tabla `vehicles`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::TestType;

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub user_id: Uuid,
    pub brand: String,
    pub sub_brand: String,
    pub model_year: i32,
    pub test_type: TestType,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Primeros 8 caracteres del id, como se muestra en la tarjeta
    pub fn short_id(&self) -> String {
        self.id.to_string().chars().take(8).collect()
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.brand.to_lowercase().contains(&needle)
            || self.sub_brand.to_lowercase().contains(&needle)
    }
}

/// Campos mutables ya validados de un vehículo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDraft {
    pub brand: String,
    pub sub_brand: String,
    pub model_year: i32,
    pub test_type: TestType,
}

/// Alcance de un listado de vehículos
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleFilter {
    /// Registros creados a partir de un instante (medianoche local)
    CreatedSince(DateTime<Utc>),
    /// Registros de cualquier fecha cuya marca o submarca contenga el texto
    Search(String),
}

impl VehicleFilter {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        match self {
            VehicleFilter::CreatedSince(since) => vehicle.created_at >= *since,
            VehicleFilter::Search(query) => vehicle.matches_query(query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(brand: &str, sub_brand: &str) -> Vehicle {
        Vehicle {
            id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap(),
            user_id: Uuid::new_v4(),
            brand: brand.to_string(),
            sub_brand: sub_brand.to_string(),
            model_year: 2020,
            test_type: TestType::Dynamic,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_short_id() {
        assert_eq!(sample("Renault", "Kwid").short_id(), "550e8400");
    }

    #[test]
    fn test_search_filter_is_case_insensitive_on_both_fields() {
        let vehicle = sample("Volkswagen", "Vento");
        assert!(VehicleFilter::Search("WAGEN".into()).matches(&vehicle));
        assert!(VehicleFilter::Search("ent".into()).matches(&vehicle));
        assert!(!VehicleFilter::Search("kwid".into()).matches(&vehicle));
    }

    #[test]
    fn test_created_since_filter() {
        let vehicle = sample("Mazda", "3");
        let earlier = vehicle.created_at - chrono::Duration::hours(1);
        let later = vehicle.created_at + chrono::Duration::hours(1);
        assert!(VehicleFilter::CreatedSince(earlier).matches(&vehicle));
        assert!(!VehicleFilter::CreatedSince(later).matches(&vehicle));
    }
}
