use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::runway::RunwayGeometry;
use crate::dynamics::state::{LatLon, SimConfig};
use crate::errors::Result;
use crate::gnc::ApproachGains;

// ---------------------------------------------------------------------------
// Scenario: everything a reconstruction run needs besides the recorded data
// ---------------------------------------------------------------------------

/// Forced aircraft state at the cutover instant, replacing the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionPoint {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64, // ft MSL
}

impl CollisionPoint {
    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub target_speed: f64,             // kts at the threshold
    pub floor_altitude: f64,           // ft MSL
    #[serde(default)]
    pub descent_rate_fpm: Option<f64>, // overrides the planned rate
    pub runway: RunwayGeometry,
    pub cutover: NaiveDateTime,
    #[serde(default)]
    pub output_start: Option<NaiveDateTime>,
    #[serde(default)]
    pub collision_point: Option<CollisionPoint>,
    #[serde(default)]
    pub sim: SimConfig,
    #[serde(default)]
    pub gains: ApproachGains,
}

impl Scenario {
    pub fn from_ron_str(s: &str) -> Result<Self> {
        let scenario: Self = ron::from_str(s)?;
        scenario.sim.validate()?;
        Ok(scenario)
    }

    pub fn from_ron_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }
}

// ---------------------------------------------------------------------------
// Scenario builder
// ---------------------------------------------------------------------------

pub struct ScenarioBuilder {
    name: String,
    target_speed: f64,
    floor_altitude: f64,
    descent_rate_fpm: Option<f64>,
    runway: RunwayGeometry,
    cutover: NaiveDateTime,
    output_start: Option<NaiveDateTime>,
    collision_point: Option<CollisionPoint>,
    sim: SimConfig,
    gains: ApproachGains,
}

impl ScenarioBuilder {
    pub fn new(name: impl Into<String>, runway: RunwayGeometry, cutover: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            target_speed: 100.0,
            floor_altitude: 0.0,
            descent_rate_fpm: None,
            runway,
            cutover,
            output_start: None,
            collision_point: None,
            sim: SimConfig::default(),
            gains: ApproachGains::default(),
        }
    }

    pub fn target_speed(mut self, v: f64) -> Self { self.target_speed = v; self }
    pub fn floor_altitude(mut self, v: f64) -> Self { self.floor_altitude = v; self }
    pub fn descent_rate_fpm(mut self, v: f64) -> Self { self.descent_rate_fpm = Some(v); self }
    pub fn output_start(mut self, t: NaiveDateTime) -> Self { self.output_start = Some(t); self }
    pub fn collision_point(mut self, p: CollisionPoint) -> Self { self.collision_point = Some(p); self }
    pub fn sim(mut self, c: SimConfig) -> Self { self.sim = c; self }
    pub fn gains(mut self, g: ApproachGains) -> Self { self.gains = g; self }

    pub fn build(self) -> Scenario {
        Scenario {
            name: self.name,
            target_speed: self.target_speed,
            floor_altitude: self.floor_altitude,
            descent_rate_fpm: self.descent_rate_fpm,
            runway: self.runway,
            cutover: self.cutover,
            output_start: self.output_start,
            collision_point: self.collision_point,
            sim: self.sim,
            gains: self.gains,
        }
    }
}

// ---------------------------------------------------------------------------
// Preset scenarios
// ---------------------------------------------------------------------------

pub mod presets {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 7, 17)
            .and_then(|d| d.and_hms_milli_opt(h, m, s, ms))
            .unwrap_or_default()
    }

    /// North Las Vegas runway 30L, 2022-07-17 approach.
    pub fn north_las_vegas_30l() -> Scenario {
        let runway = RunwayGeometry::new(LatLon::new(36.205081, -115.190543), 314.5);
        ScenarioBuilder::new("VGT-30L", runway, at(19, 2, 51, 500))
            .target_speed(100.0)
            .floor_altitude(2213.0) // field elevation 2163 + 50
            .output_start(at(19, 1, 0, 0))
            .collision_point(CollisionPoint {
                lat: 36.2028430295,
                lon: -115.1843952238,
                alt: 2270.248736,
            })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_values() {
        let s = presets::north_las_vegas_30l();
        assert_eq!(s.runway.heading, 314.5);
        assert_eq!(s.floor_altitude, 2213.0);
        assert_eq!(s.cutover.to_string(), "2022-07-17 19:02:51.500");
        assert_eq!(s.sim.dt, 0.5);
        assert_eq!(s.sim.max_iterations, 200);
        assert!(s.collision_point.is_some());
    }

    #[test]
    fn ron_with_partial_gains() {
        let text = r#"(
            name: "test",
            target_speed: 95.0,
            floor_altitude: 1000.0,
            runway: (threshold: (lat: 36.2, lon: -115.19), heading: 314.5),
            cutover: "2022-07-17T19:02:51.500",
            sim: (dt: 0.25),
            gains: (max_bank: 15.0),
        )"#;
        let s = Scenario::from_ron_str(text).expect("valid scenario");
        assert_eq!(s.target_speed, 95.0);
        assert_eq!(s.sim.dt, 0.25);
        assert_eq!(s.sim.max_iterations, 200);
        assert_eq!(s.gains.max_bank, 15.0);
        assert_eq!(s.gains.ft_per_degree, 50.0);
        assert!(s.collision_point.is_none());
        assert!(s.descent_rate_fpm.is_none());
    }

    #[test]
    fn ron_round_trip_of_preset() {
        let s = presets::north_las_vegas_30l();
        let text = ron::to_string(&s).expect("serialize");
        let back = Scenario::from_ron_str(&text).expect("parse");
        assert_eq!(back.cutover, s.cutover);
        assert_eq!(back.collision_point, s.collision_point);
        assert_eq!(back.gains, s.gains);
    }

    #[test]
    fn non_positive_step_is_rejected() {
        let base = r#"(
            name: "test",
            target_speed: 95.0,
            floor_altitude: 1000.0,
            runway: (threshold: (lat: 36.2, lon: -115.19), heading: 314.5),
            cutover: "2022-07-17T19:02:51.500",
            sim: SIM,
        )"#;
        for sim in ["(dt: 0.0)", "(dt: -0.5)", "(max_iterations: 0)"] {
            let err = Scenario::from_ron_str(&base.replace("SIM", sim)).unwrap_err();
            assert!(matches!(err, crate::errors::ApproachError::InvalidScenario(_)), "{sim}");
        }
        assert!(Scenario::from_ron_str(&base.replace("SIM", "(dt: 1.0)")).is_ok());
    }

    #[test]
    fn malformed_ron_is_config_error() {
        let err = Scenario::from_ron_str("(name: )").unwrap_err();
        assert!(matches!(err, crate::errors::ApproachError::ConfigError(_)));
    }
}
