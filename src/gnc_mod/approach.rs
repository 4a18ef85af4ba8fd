use tracing::{debug, info};

use super::guidance::{holds_turn, roll_rate, rollout_target_bank, ApproachGains};
use super::phase::ControlPhase;
use super::rate_limit::slew;
use crate::dynamics::state::{BankCommand, KinematicState};
use crate::physics::turn_rate_from_bank;
use crate::scenario::runway::ApproachGeometry;

// ---------------------------------------------------------------------------
// Approach controller: continue turn -> roll out -> intercept centerline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ApproachController {
    pub gains: ApproachGains,
    pub runway_heading: f64, // deg
    pub cutover_bank: f64,   // deg, bank carried over from the recorded flight
    phase: ControlPhase,
    first_step: bool,
    steps: usize,
}

impl ApproachController {
    pub fn new(runway_heading: f64, cutover_bank: f64, gains: ApproachGains) -> Self {
        Self {
            gains,
            runway_heading,
            cutover_bank,
            phase: ControlPhase::default(),
            first_step: true,
            steps: 0,
        }
    }

    pub fn phase(&self) -> ControlPhase {
        self.phase
    }

    /// Compute the bank command for this step.
    pub fn update(&mut self, state: &KinematicState, geom: &ApproachGeometry, dt: f64) -> BankCommand {
        self.steps += 1;

        if self.first_step {
            self.first_step = false;
            let bank = self.cutover_bank;
            debug!(bank, "first step, holding cutover bank");
            return BankCommand {
                target_bank: bank,
                bank,
                turn_rate: turn_rate_from_bank(state.speed, bank),
                phase: self.phase,
            };
        }

        let hold = holds_turn(geom, state.heading, self.runway_heading, &self.gains);
        let next = self.phase.next(hold);
        if next != self.phase {
            info!(
                iteration = self.steps,
                heading = state.heading,
                cross_track = geom.cross_track,
                "rollout started"
            );
        }
        self.phase = next;

        let target_bank = match self.phase {
            ControlPhase::ContinuingTurn => self.cutover_bank,
            ControlPhase::RollingOut => rollout_target_bank(geom, &self.gains),
        };

        let max_step = roll_rate(self.phase, geom.heading_error, &self.gains) * dt;
        let bank = slew(state.bank, target_bank, max_step);

        BankCommand {
            target_bank,
            bank,
            turn_rate: turn_rate_from_bank(state.speed, bank),
            phase: self.phase,
        }
    }

    pub fn reset(&mut self) {
        self.phase = ControlPhase::default();
        self.first_step = true;
        self.steps = 0;
    }
}

impl super::Controller for ApproachController {
    fn control(&mut self, state: &KinematicState, geometry: &ApproachGeometry, dt: f64) -> BankCommand {
        self.update(state, geometry, dt)
    }

    fn reset(&mut self) {
        ApproachController::reset(self);
    }

    fn name(&self) -> &str {
        "ApproachController"
    }
}
