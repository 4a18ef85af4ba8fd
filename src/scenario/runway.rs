use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::dynamics::state::{KinematicState, LatLon};
use crate::physics::{
    along_and_cross_track, bearing_degrees, distance_feet, local_planar_offset, signed_heading_delta,
};

// ---------------------------------------------------------------------------
// Runway definition (landing threshold + landing heading)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunwayGeometry {
    pub threshold: LatLon,
    pub heading: f64, // deg true, landing direction
}

/// Where the aircraft is relative to the runway. Recomputed every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproachGeometry {
    pub distance_ft: f64,    // great circle to the threshold
    pub bearing: f64,        // deg, aircraft -> threshold
    pub along_track: f64,    // ft, > 0 before the threshold
    pub cross_track: f64,    // ft, > 0 right of centerline
    pub heading_error: f64,  // deg, signed turn from aircraft heading to runway heading
}

impl RunwayGeometry {
    pub fn new(threshold: LatLon, heading: f64) -> Self {
        Self { threshold, heading }
    }

    /// Runway-relative geometry for a state.
    pub fn relate(&self, state: &KinematicState) -> ApproachGeometry {
        self.relate_position(state.pos, state.heading)
    }

    pub fn relate_position(&self, pos: LatLon, heading: f64) -> ApproachGeometry {
        let (along_track, cross_track) = along_and_cross_track(pos, self.threshold, self.heading);
        ApproachGeometry {
            distance_ft: distance_feet(pos, self.threshold),
            bearing: bearing_degrees(pos, self.threshold),
            along_track,
            cross_track,
            heading_error: signed_heading_delta(heading, self.heading),
        }
    }

    /// East/north offset from the threshold in feet.
    pub fn planar(&self, pos: LatLon) -> Vector2<f64> {
        local_planar_offset(pos, self.threshold)
    }
}
