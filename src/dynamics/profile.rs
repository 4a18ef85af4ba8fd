use crate::dynamics::state::KNOTS_TO_FPS;

// ---------------------------------------------------------------------------
// Deceleration: monotonic approach to the threshold speed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct DecelerationProfile {
    pub target_speed: f64, // kts
    pub min_rate: f64,     // kts/s
    pub max_rate: f64,     // kts/s
    pub cutoff_ft: f64,    // speed frozen inside this distance to the threshold
}

impl DecelerationProfile {
    pub fn new(target_speed: f64) -> Self {
        Self {
            target_speed,
            min_rate: 0.3,
            max_rate: 2.0,
            cutoff_ft: 100.0,
        }
    }

    /// Speed after one step of `dt` seconds at `distance_ft` from the threshold.
    /// Never drops below the target speed and never accelerates.
    pub fn apply(&self, speed: f64, distance_ft: f64, dt: f64) -> f64 {
        let excess = speed - self.target_speed;
        if excess <= 0.0 || distance_ft <= self.cutoff_ft {
            return speed;
        }
        let time_to_threshold = distance_ft / (speed * KNOTS_TO_FPS);
        if time_to_threshold <= 1.0 {
            return speed;
        }
        let rate = (excess / time_to_threshold).clamp(self.min_rate, self.max_rate);
        (speed - rate * dt).max(self.target_speed)
    }
}

// ---------------------------------------------------------------------------
// Descent: constant rate down to a floor altitude
// ---------------------------------------------------------------------------

/// Rate used when no time-to-threshold estimate is available, ft/min.
pub const FALLBACK_DESCENT_FPM: f64 = 600.0;

#[derive(Debug, Clone, Copy)]
pub struct DescentProfile {
    pub rate_fpm: f64,  // positive = descending
    pub floor_ft: f64,
}

impl DescentProfile {
    /// Plan a constant descent that reaches `floor_ft` at the threshold,
    /// assuming the average of current and target speed over `distance_ft`.
    pub fn plan(alt: f64, floor_ft: f64, speed: f64, target_speed: f64, distance_ft: f64) -> Self {
        let avg_fps = (speed + target_speed) / 2.0 * KNOTS_TO_FPS;
        let time_to_threshold = if avg_fps > 0.0 { distance_ft / avg_fps } else { 0.0 };
        let rate_fpm = if time_to_threshold > 0.0 {
            (alt - floor_ft) / time_to_threshold * 60.0
        } else {
            FALLBACK_DESCENT_FPM
        };
        Self::fixed(rate_fpm, floor_ft)
    }

    pub fn fixed(rate_fpm: f64, floor_ft: f64) -> Self {
        Self { rate_fpm: rate_fpm.max(0.0), floor_ft }
    }

    /// Altitude after one step. Clamped at the floor; an aircraft already
    /// below the floor holds its altitude.
    pub fn apply(&self, alt: f64, dt: f64) -> f64 {
        if alt <= self.floor_ft {
            return alt;
        }
        (alt - self.rate_fpm / 60.0 * dt).max(self.floor_ft)
    }
}
