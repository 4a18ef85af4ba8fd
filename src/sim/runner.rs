use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::event::{default_detectors, StopDetector, StopReason};
use super::integrator::advance;
use crate::dynamics::profile::{DecelerationProfile, DescentProfile};
use crate::dynamics::state::{KinematicState, SimConfig};
use crate::gnc::{ApproachController, ControlPhase, Controller};
use crate::scenario::runway::{ApproachGeometry, RunwayGeometry};
use crate::scenario::Scenario;

// ---------------------------------------------------------------------------
// Output records
// ---------------------------------------------------------------------------

/// One simulated sample, recorded after each step.
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub time: f64, // s since cutover
    pub timestamp: NaiveDateTime,
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,         // ft
    pub x_ft: f64,        // east of threshold
    pub y_ft: f64,        // north of threshold
    pub speed: f64,       // kts
    pub heading: f64,     // deg
    pub bank: f64,        // deg
    pub turn_rate: f64,   // deg/s
    pub cross_track: f64, // ft
    pub phase: ControlPhase,
}

#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub samples: Vec<Sample>,
    pub stop: StopReason,
    pub iterations: usize,
    pub final_state: KinematicState,
    pub final_geometry: ApproachGeometry,
}

/// Speed and altitude laws applied alongside the lateral controller.
#[derive(Debug, Clone, Copy)]
pub struct Profiles {
    pub deceleration: DecelerationProfile,
    pub descent: DescentProfile,
}

impl Profiles {
    /// Deceleration to the scenario's threshold speed and either the configured
    /// descent rate or one planned from `initial`.
    pub fn for_scenario(scenario: &Scenario, initial: &KinematicState) -> Self {
        let descent = match scenario.descent_rate_fpm {
            Some(rate) => DescentProfile::fixed(rate, scenario.floor_altitude),
            None => DescentProfile::plan(
                initial.alt,
                scenario.floor_altitude,
                initial.speed,
                scenario.target_speed,
                scenario.runway.relate(initial).distance_ft,
            ),
        };
        Self {
            deceleration: DecelerationProfile::new(scenario.target_speed),
            descent,
        }
    }
}

// ---------------------------------------------------------------------------
// Simulation loop
// ---------------------------------------------------------------------------

/// Run the fixed-step loop from `initial` with a custom controller and stop
/// detectors. `epoch` is the wall-clock time of `initial`.
pub fn simulate_with(
    initial: &KinematicState,
    epoch: NaiveDateTime,
    runway: &RunwayGeometry,
    profiles: &Profiles,
    config: &SimConfig,
    controller: &mut dyn Controller,
    detectors: &[Box<dyn StopDetector>],
) -> SimulationRun {
    let mut state = *initial;
    let mut samples = Vec::with_capacity(config.max_iterations);
    let mut stop = StopReason::IterationCap;
    let mut iterations = config.max_iterations;

    for iteration in 1..=config.max_iterations {
        let geom = runway.relate(&state);

        if let Some(reason) = detectors.iter().find_map(|d| d.check(&geom)) {
            info!(iteration, ?reason, heading = state.heading, "run stopped");
            stop = reason;
            iterations = iteration;
            break;
        }

        let cmd = controller.control(&state, &geom, config.dt);
        let speed = profiles.deceleration.apply(state.speed, geom.distance_ft, config.dt);
        let alt = profiles.descent.apply(state.alt, config.dt);

        state = advance(&state, &cmd, speed, alt, config.dt);
        samples.push(sample(&state, cmd.phase, runway, epoch));
    }

    if stop == StopReason::IterationCap {
        warn!(
            max_iterations = config.max_iterations,
            controller = controller.name(),
            "iteration cap reached before a stop condition, trajectory is incomplete"
        );
    }
    debug!(samples = samples.len(), "simulation finished");

    SimulationRun {
        samples,
        stop,
        iterations,
        final_state: state,
        final_geometry: runway.relate(&state),
    }
}

/// Simulate with the default ApproachController and stop detectors.
pub fn simulate(
    initial: &KinematicState,
    epoch: NaiveDateTime,
    scenario: &Scenario,
    cutover_bank: f64,
) -> SimulationRun {
    let profiles = Profiles::for_scenario(scenario, initial);
    info!(
        rate_fpm = profiles.descent.rate_fpm,
        floor_ft = profiles.descent.floor_ft,
        "descent planned"
    );
    let mut controller =
        ApproachController::new(scenario.runway.heading, cutover_bank, scenario.gains.clone());
    simulate_with(
        initial,
        epoch,
        &scenario.runway,
        &profiles,
        &scenario.sim,
        &mut controller,
        &default_detectors(),
    )
}

fn sample(
    state: &KinematicState,
    phase: ControlPhase,
    runway: &RunwayGeometry,
    epoch: NaiveDateTime,
) -> Sample {
    let planar = runway.planar(state.pos);
    let geom = runway.relate(state);
    Sample {
        time: state.time,
        timestamp: epoch + TimeDelta::milliseconds((state.time * 1000.0).round() as i64),
        lat: state.pos.lat,
        lon: state.pos.lon,
        alt: state.alt,
        x_ft: planar.x,
        y_ft: planar.y,
        speed: state.speed,
        heading: state.heading,
        bank: state.bank,
        turn_rate: state.turn_rate,
        cross_track: geom.cross_track,
        phase,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
