use std::f64::consts::TAU;

use crate::track::{GeoPoint, GroundTrack, TrackParams};

/// Build a stylized ground track for a given inclination.
///
/// Latitude follows `sin(t) * inclination` while longitude advances one degree
/// per degree of `t`, wrapped into [-180, 180]. This only approximates the
/// shape of a track; there is no propagation involved.
pub fn make_ground_track(inclination_deg: f64, params: &TrackParams) -> GroundTrack {
    let inclination = if inclination_deg.is_finite() {
        inclination_deg
    } else {
        0.0
    };
    let num_points = params.num_points.max(1);
    let total_angle = TAU * f64::from(params.num_orbits);

    (0..=num_points)
        .map(|i| {
            let t = total_angle * i as f64 / num_points as f64;
            let lat = t.sin() * inclination;
            let mut lon = t.to_degrees() % 360.0;
            if lon > 180.0 {
                lon -= 360.0;
            }
            GeoPoint::new(lon, lat)
        })
        .collect()
}
