pub mod collision;
pub mod controller;
pub mod state;

pub use collision::{scan, time_to_collision, CollisionWarning};
pub use controller::Controller;
pub use state::SimulationState;
