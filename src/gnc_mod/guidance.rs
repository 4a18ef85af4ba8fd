use serde::{Deserialize, Serialize};

use super::phase::ControlPhase;
use crate::physics::normalize_heading;
use crate::scenario::runway::ApproachGeometry;

// ---------------------------------------------------------------------------
// Tuned controller constants
// ---------------------------------------------------------------------------

/// Blend between the centerline-intercept bank and the heading-correction bank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendTier {
    pub heading_weight: f64,
    pub heading_gain: f64,
}

/// Empirically tuned gains of the approach controller. Changing them changes
/// the reconstructed path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApproachGains {
    pub hold_cross_track_ft: f64,      // keep turning while further right than this
    pub intercept_offset: f64,         // deg, intercept heading = runway heading - offset
    pub aggressive_heading_error: f64, // deg
    pub aggressive_gain: f64,          // bank deg per deg of heading error
    pub aggressive_max_bank: f64,      // deg
    pub near_cross_track_ft: f64,
    pub mid_cross_track_ft: f64,
    pub near: BlendTier,
    pub mid: BlendTier,
    pub far: BlendTier,
    pub ft_per_degree: f64,            // cross-track feet per degree of intercept bank
    pub max_intercept_bank: f64,       // deg
    pub max_heading_bank: f64,         // deg
    pub max_bank: f64,                 // deg
    pub hold_roll_rate: f64,           // deg/s
    pub aggressive_roll_rate: f64,     // deg/s
    pub rollout_roll_rate: f64,        // deg/s
}

impl Default for ApproachGains {
    fn default() -> Self {
        Self {
            hold_cross_track_ft: 200.0,
            intercept_offset: 5.0,
            aggressive_heading_error: 20.0,
            aggressive_gain: 0.4,
            aggressive_max_bank: 8.0,
            near_cross_track_ft: 100.0,
            mid_cross_track_ft: 300.0,
            near: BlendTier { heading_weight: 0.9, heading_gain: 1.0 },
            mid: BlendTier { heading_weight: 0.7, heading_gain: 0.8 },
            far: BlendTier { heading_weight: 0.4, heading_gain: 0.6 },
            ft_per_degree: 50.0,
            max_intercept_bank: 12.0,
            max_heading_bank: 18.0,
            max_bank: 20.0,
            hold_roll_rate: 3.0,
            aggressive_roll_rate: 8.0,
            rollout_roll_rate: 5.0,
        }
    }
}

impl ApproachGains {
    pub fn blend_tier(&self, cross_track: f64) -> BlendTier {
        let offset = cross_track.abs();
        if offset < self.near_cross_track_ft {
            self.near
        } else if offset < self.mid_cross_track_ft {
            self.mid
        } else {
            self.far
        }
    }
}

// ---------------------------------------------------------------------------
// Guidance: desired bank angle from runway-relative geometry
// ---------------------------------------------------------------------------

/// True when the heading is numerically below the intercept heading. Plain
/// comparison on [0, 360), so headings just past north count as passed.
pub fn passed_intercept(heading: f64, runway_heading: f64, gains: &ApproachGains) -> bool {
    heading < normalize_heading(runway_heading - gains.intercept_offset)
}

/// Hold-turn condition: still well right of centerline and not yet turned
/// through the intercept heading.
pub fn holds_turn(
    geom: &ApproachGeometry,
    heading: f64,
    runway_heading: f64,
    gains: &ApproachGains,
) -> bool {
    geom.cross_track > gains.hold_cross_track_ft && !passed_intercept(heading, runway_heading, gains)
}

/// Target bank during rollout.
///
/// Large right heading errors get a capped shallow right bank that only stops
/// the turn. Otherwise the intercept bank (1 deg per `ft_per_degree` of
/// offset, steering back toward the centerline) is blended with a heading
/// correction, weighted toward heading as the offset shrinks.
pub fn rollout_target_bank(geom: &ApproachGeometry, gains: &ApproachGains) -> f64 {
    let he = geom.heading_error;
    if he > gains.aggressive_heading_error {
        return gains.aggressive_max_bank.min(he * gains.aggressive_gain);
    }

    let tier = gains.blend_tier(geom.cross_track);
    let intercept = (-geom.cross_track / gains.ft_per_degree)
        .clamp(-gains.max_intercept_bank, gains.max_intercept_bank);
    let heading = (he * tier.heading_gain).clamp(-gains.max_heading_bank, gains.max_heading_bank);

    (intercept * (1.0 - tier.heading_weight) + heading * tier.heading_weight)
        .clamp(-gains.max_bank, gains.max_bank)
}

/// Maximum roll rate (deg/s) for the current phase and heading error.
pub fn roll_rate(phase: ControlPhase, heading_error: f64, gains: &ApproachGains) -> f64 {
    match phase {
        ControlPhase::ContinuingTurn => gains.hold_roll_rate,
        ControlPhase::RollingOut if heading_error > gains.aggressive_heading_error => {
            gains.aggressive_roll_rate
        }
        ControlPhase::RollingOut => gains.rollout_roll_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom(cross_track: f64, heading_error: f64) -> ApproachGeometry {
        ApproachGeometry {
            distance_ft: 5000.0,
            bearing: 314.5,
            along_track: 5000.0,
            cross_track,
            heading_error,
        }
    }

    #[test]
    fn aggressive_correction_is_capped() {
        let g = ApproachGains::default();
        assert_eq!(rollout_target_bank(&geom(0.0, 64.5), &g), 8.0);
        assert!((rollout_target_bank(&geom(0.0, 20.5), &g) - 8.0).abs() < 1e-12);
        // 0.4 * 20.1 = 8.04 -> still capped
        assert_eq!(rollout_target_bank(&geom(-500.0, 20.1), &g), 8.0);
    }

    #[test]
    fn near_tier_favors_heading() {
        let g = ApproachGains::default();
        // 50 ft right, 10 deg right error: -1 * 0.1 + 10 * 0.9
        let b = rollout_target_bank(&geom(50.0, 10.0), &g);
        assert!((b - 8.9).abs() < 1e-12, "got {b}");
    }

    #[test]
    fn mid_tier_blend() {
        let g = ApproachGains::default();
        // 200 ft right, -5 deg: -4 * 0.3 + (-4) * 0.7
        let b = rollout_target_bank(&geom(200.0, -5.0), &g);
        assert!((b + 4.0).abs() < 1e-12, "got {b}");
    }

    #[test]
    fn far_tier_saturates_intercept() {
        let g = ApproachGains::default();
        // 2000 ft left: intercept +12, heading -18 (clamped from -0.6 * 40)
        let b = rollout_target_bank(&geom(-2000.0, -40.0), &g);
        assert!((b - (12.0 * 0.6 - 18.0 * 0.4)).abs() < 1e-12, "got {b}");
    }

    #[test]
    fn right_of_centerline_steers_left() {
        let g = ApproachGains::default();
        assert!(rollout_target_bank(&geom(400.0, 0.0), &g) < 0.0);
        assert!(rollout_target_bank(&geom(-400.0, 0.0), &g) > 0.0);
    }

    #[test]
    fn intercept_heading_is_numeric_compare() {
        let g = ApproachGains::default();
        assert!(passed_intercept(250.0, 314.5, &g));
        assert!(!passed_intercept(309.5, 314.5, &g));
        assert!(!passed_intercept(320.0, 314.5, &g));
        // below 309.5 numerically, even though the turn has not reached it
        for h in [20.0, 60.0, 120.0] {
            assert!(passed_intercept(h, 314.5, &g), "heading {h}");
        }
        // runway 002: intercept heading 357
        assert!(passed_intercept(350.0, 2.0, &g));
        assert!(passed_intercept(10.0, 2.0, &g));
        assert!(!passed_intercept(359.0, 2.0, &g));
    }

    #[test]
    fn far_right_offset_releases_hold_near_north() {
        let g = ApproachGains::default();
        for h in [20.0, 60.0, 120.0, 200.0, 300.0] {
            assert!(!holds_turn(&geom(1500.0, 0.0), h, 314.5, &g), "heading {h}");
        }
        assert!(holds_turn(&geom(1500.0, 0.0), 330.0, 314.5, &g));
    }

    #[test]
    fn hold_requires_right_offset() {
        let g = ApproachGains::default();
        assert!(holds_turn(&geom(600.0, -20.0), 334.5, 314.5, &g));
        assert!(!holds_turn(&geom(150.0, -20.0), 334.5, 314.5, &g));
        assert!(!holds_turn(&geom(600.0, 10.0), 304.5, 314.5, &g));
    }

    #[test]
    fn roll_rates_by_phase() {
        let g = ApproachGains::default();
        assert_eq!(roll_rate(ControlPhase::ContinuingTurn, 60.0, &g), 3.0);
        assert_eq!(roll_rate(ControlPhase::RollingOut, 25.0, &g), 8.0);
        assert_eq!(roll_rate(ControlPhase::RollingOut, -25.0, &g), 5.0);
        assert_eq!(roll_rate(ControlPhase::RollingOut, 20.0, &g), 5.0);
    }
}
