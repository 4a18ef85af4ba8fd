use crate::dynamics::state::{G_FPS2, KNOTS_TO_FPS};

// ---------------------------------------------------------------------------
// Coordinated turn: tan(bank) = V * omega / g
// ---------------------------------------------------------------------------

/// Below this turn rate (deg/s) the bank is treated as wings level.
pub const MIN_TURN_RATE: f64 = 0.01;
/// At or below this bank (deg) the turn rate is treated as zero.
pub const MIN_BANK: f64 = 0.5;
/// Smallest turn radius accepted by `turn_rate_from_radius`, ft.
pub const MIN_RADIUS: f64 = 100.0;

/// Bank angle (deg) for a coordinated turn at the given speed and turn rate.
pub fn bank_from_turn_rate(speed_kts: f64, turn_rate_dps: f64) -> f64 {
    if turn_rate_dps.abs() < MIN_TURN_RATE {
        return 0.0;
    }
    let v = speed_kts * KNOTS_TO_FPS;
    let omega = turn_rate_dps.to_radians();
    (v * omega / G_FPS2).atan().to_degrees()
}

/// Turn rate (deg/s) produced by a coordinated turn at the given bank.
pub fn turn_rate_from_bank(speed_kts: f64, bank_deg: f64) -> f64 {
    let v = speed_kts * KNOTS_TO_FPS;
    if bank_deg.abs() <= MIN_BANK || v <= 0.0 {
        return 0.0;
    }
    (G_FPS2 * bank_deg.to_radians().tan() / v).to_degrees()
}

/// Turn rate (deg/s) for flying a circle of the given radius.
pub fn turn_rate_from_radius(speed_kts: f64, radius_ft: f64) -> f64 {
    let r = radius_ft.max(MIN_RADIUS);
    (speed_kts * KNOTS_TO_FPS / r).to_degrees()
}
