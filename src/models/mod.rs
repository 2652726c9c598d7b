//! Modelos del sistema
//! 
//! Este módulo contiene los modelos de datos que mapean exactamente
//! a las tablas PostgreSQL `users`, `vehicles` y `brand_rules`.

pub mod brand_rule;
pub mod test_type;
pub mod user;
pub mod vehicle;

pub use brand_rule::BrandRule;
pub use test_type::TestType;
pub use user::User;
pub use vehicle::{Vehicle, VehicleDraft, VehicleFilter};
