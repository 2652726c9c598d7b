pub mod auth_routes;
pub mod brand_rule_routes;
pub mod vehicle_routes;

pub use auth_routes::create_auth_router;
pub use brand_rule_routes::create_brand_rule_router;
pub use vehicle_routes::create_vehicle_router;
