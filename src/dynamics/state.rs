use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{ApproachError, Result};
use crate::gnc::ControlPhase;

// ---------------------------------------------------------------------------
// Physical constants and unit conversions
// ---------------------------------------------------------------------------

pub const G_FPS2: f64 = 32.174; // standard gravity, ft/s^2
pub const EARTH_RADIUS: f64 = 6_371_000.0; // mean Earth radius, m
pub const FEET_PER_METER: f64 = 3.28084;
pub const KNOTS_TO_FPS: f64 = 1.68781;
pub const METERS_PER_DEG_LAT: f64 = 110_540.0;

// ---------------------------------------------------------------------------
// Positions and recorded data
// ---------------------------------------------------------------------------

/// Geodetic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One recorded or simulated track position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub time: NaiveDateTime,
    pub lon: f64,
    pub lat: f64,
    pub alt: f64, // ft MSL
}

impl TrackPoint {
    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

/// Recorded bank angle sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollSample {
    pub time: NaiveDateTime,
    pub bank: f64, // deg, negative = left
}

// ---------------------------------------------------------------------------
// Kinematic state
// ---------------------------------------------------------------------------

/// Point-mass state advanced by the integrator.
/// Heading is kept in [0, 360); bank and turn rate share the sign convention
/// (negative = left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    pub time: f64,        // s since cutover
    pub pos: LatLon,
    pub alt: f64,         // ft
    pub speed: f64,       // kts groundspeed
    pub heading: f64,     // deg true
    pub bank: f64,        // deg
    pub turn_rate: f64,   // deg/s
}

impl KinematicState {
    /// Groundspeed in ft/s.
    pub fn speed_fps(&self) -> f64 {
        self.speed * KNOTS_TO_FPS
    }
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub dt: f64,
    pub max_iterations: usize,
}

impl SimConfig {
    /// A positive step and at least one iteration.
    pub fn validate(&self) -> Result<()> {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(ApproachError::InvalidScenario(format!("dt must be positive, got {}", self.dt)));
        }
        if self.max_iterations == 0 {
            return Err(ApproachError::InvalidScenario("max_iterations must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.5,
            max_iterations: 200,
        }
    }
}

// ---------------------------------------------------------------------------
// Controller output
// ---------------------------------------------------------------------------

/// Lateral command for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BankCommand {
    pub target_bank: f64, // deg
    pub bank: f64,        // deg, after roll rate limiting
    pub turn_rate: f64,   // deg/s
    pub phase: ControlPhase,
}
