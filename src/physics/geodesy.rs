use nalgebra::Vector2;

use crate::dynamics::state::{LatLon, EARTH_RADIUS, FEET_PER_METER, METERS_PER_DEG_LAT};

// ---------------------------------------------------------------------------
// Heading arithmetic
// ---------------------------------------------------------------------------

/// Wrap a heading into [0, 360).
pub fn normalize_heading(h: f64) -> f64 {
    let n = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if n >= 360.0 { 0.0 } else { n }
}

/// Shortest signed turn from `from` to `to`, in (-180, 180].
/// Positive = turn right.
pub fn signed_heading_delta(from: f64, to: f64) -> f64 {
    let d = normalize_heading(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

// ---------------------------------------------------------------------------
// Spherical Earth
// ---------------------------------------------------------------------------

/// Great-circle (haversine) distance in feet.
pub fn distance_feet(p1: LatLon, p2: LatLon) -> f64 {
    let phi1 = p1.lat.to_radians();
    let phi2 = p2.lat.to_radians();
    let dphi = (p2.lat - p1.lat).to_radians();
    let dlambda = (p2.lon - p1.lon).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS * c * FEET_PER_METER
}

/// Initial bearing from p1 to p2 in [0, 360).
pub fn bearing_degrees(p1: LatLon, p2: LatLon) -> f64 {
    let phi1 = p1.lat.to_radians();
    let phi2 = p2.lat.to_radians();
    let dlambda = (p2.lon - p1.lon).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    normalize_heading(y.atan2(x).to_degrees())
}

/// Forward projection along a great circle.
pub fn destination_point(p: LatLon, bearing_deg: f64, distance_ft: f64) -> LatLon {
    let r = EARTH_RADIUS * FEET_PER_METER;
    let phi1 = p.lat.to_radians();
    let lambda1 = p.lon.to_radians();
    let theta = bearing_deg.to_radians();
    let d = distance_ft / r;

    let phi2 = (phi1.sin() * d.cos() + phi1.cos() * d.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * d.sin() * phi1.cos()).atan2(d.cos() - phi1.sin() * phi2.sin());

    LatLon::new(phi2.to_degrees(), lambda2.to_degrees())
}

// ---------------------------------------------------------------------------
// Local planar frame (equirectangular, short range only)
// ---------------------------------------------------------------------------

/// Offset of `p` from `origin` in feet: x = east, y = north.
pub fn local_planar_offset(p: LatLon, origin: LatLon) -> Vector2<f64> {
    let ft_per_deg = METERS_PER_DEG_LAT * FEET_PER_METER;
    Vector2::new(
        (p.lon - origin.lon) * ft_per_deg * origin.lat.to_radians().cos(),
        (p.lat - origin.lat) * ft_per_deg,
    )
}

/// Runway-aligned coordinates of `p` relative to a threshold.
/// Returns (along, cross): along > 0 before the threshold, < 0 past it;
/// cross > 0 right of the centerline facing the landing heading.
pub fn along_and_cross_track(p: LatLon, threshold: LatLon, heading_deg: f64) -> (f64, f64) {
    let offset = local_planar_offset(p, threshold);
    let h = heading_deg.to_radians();
    let forward = Vector2::new(h.sin(), h.cos());
    let right = Vector2::new(h.cos(), -h.sin());
    (-offset.dot(&forward), offset.dot(&right))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: LatLon = LatLon { lat: 36.205081, lon: -115.190543 };

    #[test]
    fn identical_points_zero_distance() {
        assert_eq!(distance_feet(THRESHOLD, THRESHOLD), 0.0);
    }

    #[test]
    fn one_minute_of_latitude_is_about_a_nautical_mile() {
        let p = LatLon::new(THRESHOLD.lat + 1.0 / 60.0, THRESHOLD.lon);
        let d = distance_feet(THRESHOLD, p);
        assert!((d - 6080.0).abs() < 15.0, "got {d}");
    }

    #[test]
    fn cardinal_bearings() {
        let north = LatLon::new(THRESHOLD.lat + 0.01, THRESHOLD.lon);
        let east = LatLon::new(THRESHOLD.lat, THRESHOLD.lon + 0.01);
        let south = LatLon::new(THRESHOLD.lat - 0.01, THRESHOLD.lon);
        assert!(bearing_degrees(THRESHOLD, north).abs() < 1e-6);
        assert!((bearing_degrees(THRESHOLD, east) - 90.0).abs() < 0.01);
        assert!((bearing_degrees(THRESHOLD, south) - 180.0).abs() < 1e-6);
    }

    #[test]
    fn destination_is_consistent_with_distance_and_bearing() {
        let p = destination_point(THRESHOLD, 314.5, 5000.0);
        assert!((distance_feet(THRESHOLD, p) - 5000.0).abs() < 0.5);
        assert!((bearing_degrees(THRESHOLD, p) - 314.5).abs() < 0.01);
    }

    #[test]
    fn normalize_wraps_into_range() {
        assert_eq!(normalize_heading(360.0), 0.0);
        assert!((normalize_heading(-10.0) - 350.0).abs() < 1e-12);
        assert!((normalize_heading(725.0) - 5.0).abs() < 1e-12);
        let tiny = normalize_heading(-1e-15);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn signed_delta_range_and_round_trip() {
        let mut h1 = -720.0;
        while h1 <= 720.0 {
            let mut h2 = -360.0;
            while h2 <= 360.0 {
                let d = signed_heading_delta(h1, h2);
                assert!(d > -180.0 && d <= 180.0, "delta({h1},{h2}) = {d}");
                let back = normalize_heading(h1 + d);
                let want = normalize_heading(h2);
                let err = signed_heading_delta(back, want).abs();
                assert!(err < 1e-9, "round trip {h1} -> {h2} off by {err}");
                h2 += 7.5;
            }
            h1 += 13.0;
        }
    }

    #[test]
    fn signed_delta_half_turn_is_positive() {
        assert_eq!(signed_heading_delta(0.0, 180.0), 180.0);
        assert_eq!(signed_heading_delta(180.0, 0.0), 180.0);
        assert!((signed_heading_delta(350.0, 10.0) - 20.0).abs() < 1e-12);
        assert!((signed_heading_delta(10.0, 350.0) + 20.0).abs() < 1e-12);
    }

    #[test]
    fn planar_offset_axes() {
        let ne = LatLon::new(THRESHOLD.lat + 0.001, THRESHOLD.lon + 0.001);
        let v = local_planar_offset(ne, THRESHOLD);
        assert!(v.x > 0.0 && v.y > 0.0);
        assert!((v.y - 0.001 * METERS_PER_DEG_LAT * FEET_PER_METER).abs() < 1e-6);
    }

    #[test]
    fn along_track_sign_convention() {
        // 5000 ft out on the extended centerline (approach side)
        let before = destination_point(THRESHOLD, 134.5, 5000.0);
        let (along, cross) = along_and_cross_track(before, THRESHOLD, 314.5);
        assert!((along - 5000.0).abs() < 50.0, "along {along}");
        assert!(cross.abs() < 25.0, "cross {cross}");

        let past = destination_point(THRESHOLD, 314.5, 2000.0);
        let (along, _) = along_and_cross_track(past, THRESHOLD, 314.5);
        assert!(along < -1900.0);
    }

    #[test]
    fn cross_track_positive_right_of_centerline() {
        // right of a 314.5 final is toward 044.5
        let right = destination_point(THRESHOLD, 44.5, 500.0);
        let (_, cross) = along_and_cross_track(right, THRESHOLD, 314.5);
        assert!((cross - 500.0).abs() < 5.0, "cross {cross}");

        let left = destination_point(THRESHOLD, 224.5, 500.0);
        let (_, cross) = along_and_cross_track(left, THRESHOLD, 314.5);
        assert!(cross < -490.0);
    }
}
