use chrono::NaiveDateTime;
use serde::Serialize;

use crate::dynamics::state::{TrackPoint, KNOTS_TO_FPS};
use crate::errors::{ApproachError, Result};
use crate::physics::{bank_from_turn_rate, bearing_degrees, distance_feet, signed_heading_delta};

// ---------------------------------------------------------------------------
// Cutover state from the last recorded fixes (finite differences)
// ---------------------------------------------------------------------------

pub const FALLBACK_TURN_RATE: f64 = -5.0; // deg/s
pub const FALLBACK_SPEED: f64 = 113.0; // kts
pub const FALLBACK_RADIUS: f64 = 2050.0; // ft
const MIN_RADIUS_TURN_RATE: f64 = 0.1; // deg/s

#[derive(Debug, Clone, Serialize)]
pub struct CutoverEstimate {
    pub split_index: usize,
    pub split_time: NaiveDateTime,
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
    pub heading: f64,    // deg
    pub speed: f64,      // kts
    pub turn_rate: f64,  // deg/s
    pub radius_ft: f64,
    pub bank: f64,       // deg, from turn rate
}

/// Index of the first fix at or after `cutover`, or the last fix.
pub fn split_index(track: &[TrackPoint], cutover: NaiveDateTime) -> Option<usize> {
    if track.is_empty() {
        return None;
    }
    Some(track.iter().position(|p| p.time >= cutover).unwrap_or(track.len() - 1))
}

/// Estimate heading, groundspeed and turn rate at the cutover from the split
/// fix and its two predecessors.
pub fn estimate_cutover(track: &[TrackPoint], cutover: NaiveDateTime) -> Result<CutoverEstimate> {
    let idx = split_index(track, cutover)
        .ok_or_else(|| ApproachError::InsufficientTrack("recorded track is empty".into()))?;
    if idx < 2 {
        return Err(ApproachError::InsufficientTrack(format!(
            "need two fixes before the cutover, found {idx}"
        )));
    }

    let p2 = &track[idx - 2];
    let p1 = &track[idx - 1];
    let p0 = &track[idx];

    let heading = bearing_degrees(p1.position(), p0.position());
    let prev_heading = bearing_degrees(p2.position(), p1.position());
    let dt = secs_between(p1.time, p0.time);

    let turn_rate = if dt > 0.0 {
        signed_heading_delta(prev_heading, heading) / dt
    } else {
        FALLBACK_TURN_RATE
    };

    let speed_fps = if dt > 0.0 {
        distance_feet(p1.position(), p0.position()) / dt
    } else {
        FALLBACK_SPEED * KNOTS_TO_FPS
    };
    let speed = speed_fps / KNOTS_TO_FPS;

    let radius_ft = if turn_rate.abs() > MIN_RADIUS_TURN_RATE {
        (speed_fps / turn_rate.to_radians()).abs()
    } else {
        FALLBACK_RADIUS
    };

    Ok(CutoverEstimate {
        split_index: idx,
        split_time: p0.time,
        lat: p0.lat,
        lon: p0.lon,
        alt: p0.alt,
        heading,
        speed,
        turn_rate,
        radius_ft,
        bank: bank_from_turn_rate(speed, turn_rate),
    })
}

/// Signed seconds from `a` to `b`.
pub fn secs_between(a: NaiveDateTime, b: NaiveDateTime) -> f64 {
    let d = b - a;
    match d.num_microseconds() {
        Some(us) => us as f64 * 1e-6,
        None => d.num_milliseconds() as f64 * 1e-3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::LatLon;
    use crate::physics::{destination_point, normalize_heading};
    use chrono::TimeDelta;

    fn t0() -> NaiveDateTime {
        "2022-07-17T19:02:40".parse().unwrap()
    }

    /// Left turn at `rate` deg/s, one fix every half second.
    fn turning_track(n: usize, speed: f64, rate: f64) -> Vec<TrackPoint> {
        let mut pos = LatLon::new(36.21, -115.17);
        let mut hdg = 300.0;
        (0..n)
            .map(|i| {
                if i > 0 {
                    hdg = normalize_heading(hdg + rate * 0.5);
                    pos = destination_point(pos, hdg, speed * KNOTS_TO_FPS * 0.5);
                }
                TrackPoint {
                    time: t0() + TimeDelta::milliseconds(500 * i as i64),
                    lon: pos.lon,
                    lat: pos.lat,
                    alt: 2300.0 - i as f64,
                }
            })
            .collect()
    }

    #[test]
    fn recovers_turn_from_circle() {
        let track = turning_track(10, 113.0, -5.0);
        let cutover = track[6].time;
        let est = estimate_cutover(&track, cutover).unwrap();
        assert_eq!(est.split_index, 6);
        assert!((est.turn_rate + 5.0).abs() < 0.05, "turn rate {}", est.turn_rate);
        assert!((est.speed - 113.0).abs() < 0.5, "speed {}", est.speed);
        // fix 6 was reached flying 300 - 6 * 2.5
        assert!((est.heading - 285.0).abs() < 0.1, "heading {}", est.heading);
        assert!(est.bank < -25.0 && est.bank > -30.0, "bank {}", est.bank);
        assert!((est.radius_ft - 2185.0).abs() < 25.0, "radius {}", est.radius_ft);
    }

    #[test]
    fn split_between_fixes_uses_next_fix() {
        let track = turning_track(10, 113.0, -5.0);
        let cutover = track[4].time + TimeDelta::milliseconds(250);
        assert_eq!(split_index(&track, cutover), Some(5));
    }

    #[test]
    fn cutover_after_track_uses_last_fix() {
        let track = turning_track(5, 113.0, 0.0);
        let cutover = track[4].time + TimeDelta::seconds(30);
        let est = estimate_cutover(&track, cutover).unwrap();
        assert_eq!(est.split_index, 4);
        assert_eq!(est.radius_ft, FALLBACK_RADIUS);
        assert_eq!(est.bank, 0.0);
    }

    #[test]
    fn duplicate_timestamps_fall_back() {
        let mut track = turning_track(4, 113.0, -5.0);
        track[3].time = track[2].time;
        let est = estimate_cutover(&track, track[3].time).unwrap();
        // split lands on index 2 (first fix at the duplicated time)
        assert_eq!(est.split_index, 2);
        assert!(est.speed > 100.0);

        track[2].time = track[1].time;
        let err = estimate_cutover(&track, track[2].time).unwrap_err();
        assert!(matches!(err, ApproachError::InsufficientTrack(_)));
    }

    #[test]
    fn fallbacks_on_zero_dt() {
        let mut track = turning_track(3, 113.0, -5.0);
        track[2].time = track[1].time;
        // cutover past the end selects the last fix
        let est = estimate_cutover(&track, track[1].time + TimeDelta::seconds(1)).unwrap();
        assert_eq!(est.turn_rate, FALLBACK_TURN_RATE);
        assert!((est.speed - FALLBACK_SPEED).abs() < 1e-9);
    }

    #[test]
    fn too_short_track_is_rejected() {
        let track = turning_track(2, 113.0, -5.0);
        assert!(estimate_cutover(&track, track[1].time).is_err());
        assert!(estimate_cutover(&[], t0()).is_err());
    }

    #[test]
    fn fractional_seconds() {
        let a: NaiveDateTime = "2022-07-17T19:02:51.195".parse().unwrap();
        let b: NaiveDateTime = "2022-07-17T19:02:51.547".parse().unwrap();
        assert!((secs_between(a, b) - 0.352).abs() < 1e-9);
        assert!((secs_between(b, a) + 0.352).abs() < 1e-9);
    }
}
