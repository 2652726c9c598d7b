//! DTOs de la API
//! 
//! Requests y responses JSON. El módulo `client` reutiliza estos mismos
//! tipos para hablar con el servidor.

pub mod api_response;
pub mod auth_dto;
pub mod brand_rule_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
