pub mod errors;
pub mod physics;
pub mod dynamics;
mod gnc_mod;
pub mod scenario;
pub mod sim;
pub mod post;
pub mod io;

// The gnc module: expose gnc_mod as `gnc` publicly
pub mod gnc {
    pub use crate::gnc_mod::*;
}

pub mod types {
    pub use crate::dynamics::state::{
        BankCommand, KinematicState, LatLon, RollSample, SimConfig, TrackPoint, G_FPS2, KNOTS_TO_FPS,
    };
    pub use crate::errors::{ApproachError, Result};
    pub use crate::scenario::{RunwayGeometry, Scenario};
}
