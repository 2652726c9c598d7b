//! Estado del formulario de vehículo
//!
//! Modelo sin interfaz del panel lateral de alta/edición. En modo alta,
//! cada cambio de marca o submarca vuelve a calcular el tipo de prueba con
//! `smart_rules`; en modo edición se conservan los valores guardados hasta
//! que el usuario los cambie a mano.

use uuid::Uuid;

use crate::dto::vehicle_dto::{VehicleRequest, VehicleResponse};
use crate::models::{BrandRule, TestType};
use crate::services::smart_rules::{self, SMART_RULES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { vehicle_id: Uuid },
}

#[derive(Debug, Clone)]
pub struct VehicleForm {
    mode: FormMode,
    brand: String,
    sub_brand: String,
    model_year: i32,
    test_type: TestType,
    save_as_rule: bool,
    user_rules: Vec<BrandRule>,
}

impl VehicleForm {
    /// Formulario vacío para un registro nuevo
    pub fn create(current_year: i32) -> Self {
        Self {
            mode: FormMode::Create,
            brand: String::new(),
            sub_brand: String::new(),
            model_year: current_year,
            test_type: TestType::default(),
            save_as_rule: false,
            user_rules: Vec::new(),
        }
    }

    /// Formulario precargado con un registro existente
    pub fn edit(vehicle: &VehicleResponse) -> Self {
        Self {
            mode: FormMode::Edit {
                vehicle_id: vehicle.id,
            },
            brand: vehicle.brand.clone(),
            sub_brand: vehicle.sub_brand.clone(),
            model_year: vehicle.model_year,
            test_type: vehicle.test_type,
            save_as_rule: false,
            user_rules: Vec::new(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn sub_brand(&self) -> &str {
        &self.sub_brand
    }

    pub fn model_year(&self) -> i32 {
        self.model_year
    }

    pub fn test_type(&self) -> TestType {
        self.test_type
    }

    pub fn save_as_rule(&self) -> bool {
        self.save_as_rule
    }

    /// Reglas del usuario, cargadas al abrir el formulario
    pub fn load_rules(&mut self, rules: Vec<BrandRule>) {
        self.user_rules = rules;
        self.apply_suggestion();
    }

    pub fn set_brand(&mut self, brand: impl Into<String>) {
        self.brand = brand.into();
        self.apply_suggestion();
    }

    pub fn set_sub_brand(&mut self, sub_brand: impl Into<String>) {
        self.sub_brand = sub_brand.into();
        self.apply_suggestion();
    }

    pub fn set_model_year(&mut self, model_year: i32) {
        self.model_year = model_year;
    }

    /// Cambio manual; siempre se respeta
    pub fn set_test_type(&mut self, test_type: TestType) {
        self.test_type = test_type;
    }

    /// "Recordar esta marca" solo existe al crear
    pub fn set_save_as_rule(&mut self, save_as_rule: bool) {
        self.save_as_rule = save_as_rule && !self.is_editing();
    }

    fn apply_suggestion(&mut self) {
        if self.is_editing() {
            return;
        }
        if let Some(test_type) =
            smart_rules::suggest_test_type(&self.brand, &self.sub_brand, &self.user_rules, SMART_RULES)
        {
            self.test_type = test_type;
        }
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Editar Registro"
        } else {
            "Nuevo Registro"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Actualizar Registro"
        } else {
            "Guardar Registro"
        }
    }

    /// Etiqueta de la casilla de recordar, que sigue al tipo elegido
    pub fn remember_label(&self) -> String {
        format!("Marcar marca como {}", self.test_type.lowercase_label())
    }

    pub fn to_request(&self) -> VehicleRequest {
        VehicleRequest {
            brand: self.brand.clone(),
            sub_brand: self.sub_brand.clone(),
            model_year: self.model_year,
            test_type: self.test_type.label().to_string(),
            save_as_rule: self.save_as_rule,
        }
    }
}
