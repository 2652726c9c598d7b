pub mod auth_controller;
pub mod vehicle_controller;

pub use auth_controller::AuthController;
pub use vehicle_controller::VehicleController;
