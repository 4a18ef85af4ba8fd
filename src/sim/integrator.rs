use crate::dynamics::state::{BankCommand, KinematicState, KNOTS_TO_FPS};
use crate::physics::{destination_point, normalize_heading};

// ---------------------------------------------------------------------------
// Point-mass step with constant bank command over the step
// ---------------------------------------------------------------------------

/// Advance one fixed step. `speed` and `alt` are the profile outputs for this
/// step; heading is advanced first and the position is projected along the new
/// heading by the distance flown at the new speed.
pub fn advance(state: &KinematicState, cmd: &BankCommand, speed: f64, alt: f64, dt: f64) -> KinematicState {
    let heading = normalize_heading(state.heading + cmd.turn_rate * dt);
    let pos = destination_point(state.pos, heading, speed * KNOTS_TO_FPS * dt);

    KinematicState {
        time: state.time + dt,
        pos,
        alt,
        speed,
        heading,
        bank: cmd.bank,
        turn_rate: cmd.turn_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::LatLon;
    use crate::gnc::ControlPhase;
    use crate::physics::{bearing_degrees, distance_feet};

    fn start() -> KinematicState {
        KinematicState {
            time: 0.0,
            pos: LatLon::new(36.2028, -115.1844),
            alt: 2270.0,
            speed: 113.0,
            heading: 2.0,
            bank: 0.0,
            turn_rate: 0.0,
        }
    }

    fn cmd(turn_rate: f64) -> BankCommand {
        BankCommand { target_bank: 0.0, bank: -20.0, turn_rate, phase: ControlPhase::ContinuingTurn }
    }

    #[test]
    fn heading_wraps_through_north() {
        let s = advance(&start(), &cmd(-5.0), 113.0, 2260.0, 0.5);
        assert!((s.heading - 359.5).abs() < 1e-9);
        assert_eq!(s.time, 0.5);
        assert_eq!(s.alt, 2260.0);
        assert_eq!(s.bank, -20.0);
    }

    #[test]
    fn moves_along_new_heading() {
        let s0 = start();
        let s = advance(&s0, &cmd(4.0), 100.0, 2270.0, 0.5);
        let d = distance_feet(s0.pos, s.pos);
        assert!((d - 100.0 * KNOTS_TO_FPS * 0.5).abs() < 0.01, "moved {d}");
        assert!((bearing_degrees(s0.pos, s.pos) - 4.0).abs() < 0.01);
    }
}
