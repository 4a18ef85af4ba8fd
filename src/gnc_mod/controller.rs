use crate::dynamics::state::{BankCommand, KinematicState};
use crate::scenario::runway::ApproachGeometry;

/// Trait for lateral controllers.
///
/// Implement this to plug a different bank policy into the simulation loop.
pub trait Controller {
    /// Compute the bank command for this step from the current state and its
    /// runway-relative geometry.
    fn control(&mut self, state: &KinematicState, geometry: &ApproachGeometry, dt: f64) -> BankCommand;

    /// Reset internal state (phase, first-step flag).
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}
