//! Servicios de dominio
//! 
//! Lógica pura del panel: inferencia del tipo de prueba y estado del
//! formulario de vehículo.

pub mod smart_rules;
pub mod vehicle_form;

pub use smart_rules::{resolve, suggest_test_type, SmartRule, Suggestion, SuggestionSource, SMART_RULES};
pub use vehicle_form::{FormMode, VehicleForm};
