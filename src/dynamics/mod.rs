pub mod state;
pub mod profile;
pub mod estimate;

pub use state::{BankCommand, KinematicState, LatLon, RollSample, SimConfig, TrackPoint};
pub use profile::{DecelerationProfile, DescentProfile};
pub use estimate::{estimate_cutover, CutoverEstimate};
