use chrono::NaiveDateTime;

use crate::dynamics::estimate::secs_between;
use crate::dynamics::state::{TrackPoint, KNOTS_TO_FPS};
use crate::physics::distance_feet;

// ---------------------------------------------------------------------------
// Groundspeed from position deltas
// ---------------------------------------------------------------------------

/// Instantaneous groundspeed (kts) stamped at the later point of each
/// consecutive pair. Pairs with a non-positive time delta are skipped; the
/// later point still becomes the reference for the next pair.
pub fn derive_groundspeed(track: &[TrackPoint]) -> Vec<(NaiveDateTime, f64)> {
    let mut out = Vec::with_capacity(track.len().saturating_sub(1));
    let Some(mut prev) = track.first() else {
        return out;
    };
    for p in &track[1..] {
        let dt = secs_between(prev.time, p.time);
        if dt > 0.0 {
            let fps = distance_feet(prev.position(), p.position()) / dt;
            out.push((p.time, fps / KNOTS_TO_FPS));
        }
        prev = p;
    }
    out
}

/// Centered 3-point moving average; the first and last values use the
/// 2-point average with their only neighbour.
pub fn smooth3(raw: &[(NaiveDateTime, f64)]) -> Vec<(NaiveDateTime, f64)> {
    let n = raw.len();
    if n < 2 {
        return raw.to_vec();
    }
    (0..n)
        .map(|i| {
            let v = if i == 0 {
                (raw[0].1 + raw[1].1) / 2.0
            } else if i == n - 1 {
                (raw[i - 1].1 + raw[i].1) / 2.0
            } else {
                (raw[i - 1].1 + raw[i].1 + raw[i + 1].1) / 3.0
            };
            (raw[i].0, v)
        })
        .collect()
}

/// Smoothed groundspeed series for a full track.
pub fn smoothed_groundspeed(track: &[TrackPoint]) -> Vec<(NaiveDateTime, f64)> {
    smooth3(&derive_groundspeed(track))
}
