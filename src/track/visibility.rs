use std::f64::consts::FRAC_PI_2;

use crate::track::GeoPoint;

/// Inset from the limb so a selected point sits strictly inside the horizon.
pub const DEFAULT_HORIZON_MARGIN_RAD: f64 = 0.02;

/// Great-circle angle between two points, in radians.
pub fn angular_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lambda0 = a.lon().to_radians();
    let phi0 = a.lat().to_radians();
    let lambda1 = b.lon().to_radians();
    let phi1 = b.lat().to_radians();

    let delta = lambda1 - lambda0;
    let (sin_delta, cos_delta) = delta.sin_cos();
    let (sin_phi0, cos_phi0) = phi0.sin_cos();
    let (sin_phi1, cos_phi1) = phi1.sin_cos();

    let x = cos_phi1 * sin_delta;
    let y = cos_phi0 * sin_phi1 - sin_phi0 * cos_phi1 * cos_delta;
    let z = sin_phi0 * sin_phi1 + cos_phi0 * cos_phi1 * cos_delta;
    (x * x + y * y).sqrt().atan2(z)
}

/// Pick a track point inside the hemisphere centred on `center`.
///
/// The search starts at the satellite's phase offset and walks forward,
/// wrapping around, so the chosen point stays put between frames instead of
/// snapping back to the start of the track. Returns `None` when nothing on
/// the track is within `pi/2 - margin` of the center, or when the center
/// itself could not be determined.
pub fn visible_point(
    center: Option<GeoPoint>,
    track: &[GeoPoint],
    phase: f64,
    margin: f64,
) -> Option<GeoPoint> {
    let center = center.filter(GeoPoint::is_finite)?;
    if track.is_empty() {
        return None;
    }

    let max_angle = FRAC_PI_2 - margin;
    let len = track.len();
    let start = start_index(phase, len);

    (0..len)
        .map(|k| track[(start + k) % len])
        .find(|candidate| angular_distance(center, *candidate) <= max_angle)
}

fn start_index(phase: f64, len: usize) -> usize {
    let phase = if phase.is_finite() {
        phase.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let last = len - 1;
    ((phase * last as f64).floor() as usize).min(last)
}
