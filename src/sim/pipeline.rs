use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};

use super::event::default_detectors;
use super::runner::{simulate_with, Profiles, SimulationRun};
use crate::dynamics::estimate::{estimate_cutover, CutoverEstimate};
use crate::dynamics::state::{KinematicState, LatLon, TrackPoint};
use crate::errors::Result;
use crate::gnc::ApproachController;
use crate::physics::turn_rate_from_radius;
use crate::post::groundspeed::smoothed_groundspeed;
use crate::post::roll::{merge_bank_series, RollSeries, RollSource};
use crate::scenario::Scenario;

// ---------------------------------------------------------------------------
// Recorded track -> cutover estimate -> simulation -> post-processing
// ---------------------------------------------------------------------------

/// Where the bank angle carried into the simulation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BankSource {
    Recorded,
    Estimated,
}

#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub estimate: CutoverEstimate,
    pub cutover_bank: f64,
    pub bank_source: BankSource,
    pub initial: KinematicState,
    pub descent_rate_fpm: f64,
    /// Recorded fixes emitted ahead of the simulation.
    pub history: Vec<TrackPoint>,
    pub run: SimulationRun,
    pub groundspeed: Vec<(NaiveDateTime, f64)>,
    pub bank: Vec<(NaiveDateTime, f64)>,
}

impl Reconstruction {
    /// History followed by the simulated samples.
    pub fn track(&self) -> Vec<TrackPoint> {
        let mut out = self.history.clone();
        out.extend(self.run.samples.iter().map(|s| TrackPoint {
            time: s.timestamp,
            lon: s.lon,
            lat: s.lat,
            alt: s.alt,
        }));
        out
    }
}

/// Reconstruct the approach for `scenario` from a recorded track.
pub fn reconstruct(
    track: &[TrackPoint],
    scenario: &Scenario,
    roll: &dyn RollSource,
) -> Result<Reconstruction> {
    let estimate = estimate_cutover(track, scenario.cutover)?;
    let geom = scenario
        .runway
        .relate_position(LatLon::new(estimate.lat, estimate.lon), estimate.heading);
    info!(
        lat = estimate.lat,
        lon = estimate.lon,
        alt = estimate.alt,
        speed = estimate.speed,
        heading = estimate.heading,
        turn_rate = estimate.turn_rate,
        radius_ft = estimate.radius_ft,
        radius_turn_rate = turn_rate_from_radius(estimate.speed, estimate.radius_ft),
        bank = estimate.bank,
        distance_ft = geom.distance_ft,
        bearing = geom.bearing,
        "cutover analysis"
    );

    let recorded = roll.roll_series();
    let (cutover_bank, bank_source) = match recorded.as_ref().and_then(|r| r.interpolate(scenario.cutover)) {
        Some(bank) => {
            info!(bank, estimated = estimate.bank, "bank at cutover from roll data");
            (bank, BankSource::Recorded)
        }
        None => {
            warn!(bank = estimate.bank, "no roll data, using bank estimated from turn rate");
            (estimate.bank, BankSource::Estimated)
        }
    };

    let initial = initial_state(&estimate, scenario, cutover_bank);
    let history = history(track, &estimate, scenario);

    let profiles = Profiles::for_scenario(scenario, &initial);
    info!(
        rate_fpm = profiles.descent.rate_fpm,
        configured = scenario.descent_rate_fpm.is_some(),
        "descent rate"
    );
    let mut controller =
        ApproachController::new(scenario.runway.heading, cutover_bank, scenario.gains.clone());
    let run = simulate_with(
        &initial,
        scenario.cutover,
        &scenario.runway,
        &profiles,
        &scenario.sim,
        &mut controller,
        &default_detectors(),
    );
    info!(
        iterations = run.iterations,
        samples = run.samples.len(),
        heading = run.final_state.heading,
        speed = run.final_state.speed,
        alt = run.final_state.alt,
        "simulation complete"
    );

    let bank = merge_bank_series(&history, recorded.as_ref(), &run.samples);
    let mut rec = Reconstruction {
        estimate,
        cutover_bank,
        bank_source,
        initial,
        descent_rate_fpm: profiles.descent.rate_fpm,
        history,
        run,
        groundspeed: Vec::new(),
        bank,
    };
    rec.groundspeed = smoothed_groundspeed(&rec.track());
    Ok(rec)
}

/// Estimated state at the cutover, with the collision point override applied.
fn initial_state(estimate: &CutoverEstimate, scenario: &Scenario, bank: f64) -> KinematicState {
    let (pos, alt) = match scenario.collision_point {
        Some(cp) => (cp.position(), cp.alt),
        None => (LatLon::new(estimate.lat, estimate.lon), estimate.alt),
    };
    KinematicState {
        time: 0.0,
        pos,
        alt,
        speed: estimate.speed,
        heading: estimate.heading,
        bank,
        turn_rate: estimate.turn_rate,
    }
}

fn history(track: &[TrackPoint], estimate: &CutoverEstimate, scenario: &Scenario) -> Vec<TrackPoint> {
    let mut out: Vec<TrackPoint> = track[..estimate.split_index]
        .iter()
        .filter(|p| scenario.output_start.map_or(true, |start| p.time >= start))
        .copied()
        .collect();
    if let Some(cp) = scenario.collision_point {
        out.push(TrackPoint {
            time: scenario.cutover,
            lon: cp.lon,
            lat: cp.lat,
            alt: cp.alt,
        });
    }
    out
}
