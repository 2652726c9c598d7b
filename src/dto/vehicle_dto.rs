use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::models::{TestType, Vehicle, VehicleDraft};
use crate::utils::errors::field_error;
use crate::utils::time::LocalClock;
use crate::utils::validation::{validate_model_year, validate_not_blank};

// Request para crear o actualizar un vehículo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct VehicleRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Máximo 100 caracteres"))]
    pub brand: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Máximo 100 caracteres"))]
    pub sub_brand: String,

    // Número o texto numérico; cualquier otra cosa queda fuera de rango
    #[serde(default, deserialize_with = "lenient_year")]
    pub model_year: i32,

    #[serde(default)]
    pub test_type: String,

    // Solo se atiende al crear
    #[serde(default)]
    pub save_as_rule: bool,
}

fn lenient_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let year = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(year.unwrap_or(0))
}

impl VehicleRequest {
    /// Validar y convertir en los campos tipados de un vehículo.
    /// Marca y submarca se guardan sin espacios laterales.
    pub fn into_draft(self, current_year: i32) -> Result<VehicleDraft, ValidationErrors> {
        let request = VehicleRequest {
            brand: self.brand.trim().to_string(),
            sub_brand: self.sub_brand.trim().to_string(),
            ..self
        };

        let mut errors = match request.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if validate_not_blank(&request.brand).is_err() {
            errors.add("brand", field_error("brand", "required", "Marca es requerida"));
        }
        if validate_not_blank(&request.sub_brand).is_err() {
            errors.add("sub_brand", field_error("sub_brand", "required", "Submarca es requerida"));
        }
        if validate_model_year(request.model_year, current_year).is_err() {
            errors.add(
                "model_year",
                field_error("model_year", "range", "Año fuera de rango"),
            );
        }
        let test_type = request.test_type.parse::<TestType>();
        if test_type.is_err() {
            errors.add(
                "test_type",
                field_error("test_type", "enum", "Tipo de prueba debe ser Dinámica o Estática"),
            );
        }

        match test_type {
            Ok(test_type) if errors.errors().is_empty() => Ok(VehicleDraft {
                brand: request.brand,
                sub_brand: request.sub_brand,
                model_year: request.model_year,
                test_type,
            }),
            _ => Err(errors),
        }
    }
}

// Response de vehículo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub brand: String,
    pub sub_brand: String,
    pub model_year: i32,
    pub test_type: TestType,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand,
            sub_brand: vehicle.sub_brand,
            model_year: vehicle.model_year,
            test_type: vehicle.test_type,
            created_at: vehicle.created_at,
        }
    }
}

// Tarjeta del listado: vehículo más hora local y id corto
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleCard {
    #[serde(flatten)]
    pub vehicle: VehicleResponse,
    pub registered_at: String,
    pub short_id: String,
}

impl VehicleCard {
    pub fn new(vehicle: Vehicle, clock: &LocalClock) -> Self {
        Self {
            registered_at: clock.format_time(vehicle.created_at),
            short_id: vehicle.short_id(),
            vehicle: VehicleResponse::from(vehicle),
        }
    }
}

// Query del listado
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub q: Option<String>,
}

impl DashboardQuery {
    /// Término de búsqueda efectivo; vacío equivale a no buscar
    pub fn search_term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

pub const TODAY_TITLE: &str = "Registros de Hoy";
pub const EMPTY_MESSAGE: &str = "No hay registros coincidentes.";

// Response del panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub title: String,
    pub query: Option<String>,
    pub total: usize,
    pub empty_message: Option<String>,
    pub vehicles: Vec<VehicleCard>,
}

impl DashboardResponse {
    pub fn new(query: Option<&str>, vehicles: Vec<VehicleCard>) -> Self {
        let title = match query {
            Some(q) => format!("Buscando \"{}\"", q),
            None => TODAY_TITLE.to_string(),
        };
        Self {
            title,
            query: query.map(str::to_string),
            total: vehicles.len(),
            empty_message: vehicles.is_empty().then(|| EMPTY_MESSAGE.to_string()),
            vehicles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(brand: &str, sub_brand: &str, model_year: i32, test_type: &str) -> VehicleRequest {
        VehicleRequest {
            brand: brand.to_string(),
            sub_brand: sub_brand.to_string(),
            model_year,
            test_type: test_type.to_string(),
            save_as_rule: false,
        }
    }

    #[test]
    fn test_valid_request_is_trimmed() {
        let draft = request("  Renault ", "Kwid ", 2020, "Estática").into_draft(2026).unwrap();
        assert_eq!(draft.brand, "Renault");
        assert_eq!(draft.sub_brand, "Kwid");
        assert_eq!(draft.test_type, TestType::Static);
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let errors = request(" ", "", 2020, "Dinámica").into_draft(2026).unwrap_err();
        let fields = errors.errors();
        assert!(fields.contains_key("brand"));
        assert!(fields.contains_key("sub_brand"));
        assert!(!fields.contains_key("model_year"));
    }

    #[test]
    fn test_model_year_bounds() {
        assert!(request("Mazda", "3", 2027, "Dinámica").into_draft(2026).is_ok());
        assert!(request("Mazda", "3", 2028, "Dinámica").into_draft(2026).is_err());
        assert!(request("Mazda", "3", 1899, "Dinámica").into_draft(2026).is_err());
    }

    #[test]
    fn test_unknown_test_type() {
        let errors = request("Mazda", "3", 2020, "Mixta").into_draft(2026).unwrap_err();
        assert!(errors.errors().contains_key("test_type"));
    }

    #[test]
    fn test_model_year_accepts_numeric_text() {
        let request: VehicleRequest = serde_json::from_value(serde_json::json!({
            "brand": "Mazda",
            "sub_brand": "3",
            "model_year": " 2020 ",
            "test_type": "Dinámica"
        }))
        .unwrap();
        assert_eq!(request.model_year, 2020);
        assert!(request.into_draft(2026).is_ok());
    }

    #[test]
    fn test_missing_fields_reach_validation() {
        let request: VehicleRequest = serde_json::from_value(serde_json::json!({
            "model_year": "dos mil"
        }))
        .unwrap();
        let errors = request.into_draft(2026).unwrap_err();
        let fields = errors.errors();
        for field in ["brand", "sub_brand", "model_year", "test_type"] {
            assert!(fields.contains_key(field), "{field}");
        }

        let request: VehicleRequest = serde_json::from_value(serde_json::json!({
            "brand": "Mazda",
            "sub_brand": "3",
            "model_year": 2020.5,
            "test_type": "Dinámica"
        }))
        .unwrap();
        assert!(request.into_draft(2026).unwrap_err().errors().contains_key("model_year"));
    }

    #[test]
    fn test_dashboard_titles() {
        let today = DashboardResponse::new(None, vec![]);
        assert_eq!(today.title, "Registros de Hoy");
        assert_eq!(today.empty_message.as_deref(), Some(EMPTY_MESSAGE));

        let search = DashboardResponse::new(Some("kwid"), vec![]);
        assert_eq!(search.title, "Buscando \"kwid\"");
        assert_eq!(search.query.as_deref(), Some("kwid"));
    }

    #[test]
    fn test_blank_query_means_today() {
        let query = DashboardQuery { q: Some("   ".to_string()) };
        assert_eq!(query.search_term(), None);
        let query = DashboardQuery { q: Some(" vento ".to_string()) };
        assert_eq!(query.search_term(), Some("vento"));
    }
}
