pub mod runway;
pub mod config;

pub use runway::{ApproachGeometry, RunwayGeometry};
pub use config::{presets, CollisionPoint, Scenario, ScenarioBuilder};
