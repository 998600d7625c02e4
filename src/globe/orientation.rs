use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::projection::Orthographic;
use crate::track::GeoPoint;

/// Where the globe is looking and how far it is zoomed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GlobeOrientation {
    pub center: GeoPoint,
    pub scale: f64,
}

impl GlobeOrientation {
    /// Rotation that brings `center` to the middle of the view.
    pub fn rotation(&self) -> [f64; 3] {
        [-self.center.lon(), -self.center.lat(), 0.0]
    }

    pub fn of(projection: &Orthographic) -> Option<Self> {
        projection.center().map(|center| Self {
            center,
            scale: projection.scale(),
        })
    }

    pub fn apply(&self, projection: &mut Orthographic) {
        projection.set_rotate(self.rotation());
        projection.set_scale(self.scale);
    }
}

/// Requested fly-to target. A missing scale keeps the current zoom.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct FlyToTarget {
    pub lon: f64,
    pub lat: f64,
    #[serde(default)]
    pub scale: Option<f64>,
}

/// Transition between two projection states.
///
/// Rotation and scale are interpolated independently and linearly; any easing
/// is applied by the caller to the progress value.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyTo {
    start_rotate: [f64; 3],
    start_scale: f64,
    end_rotate: [f64; 3],
    end_scale: f64,
    started_at: DateTime<Utc>,
    duration: Duration,
}

impl FlyTo {
    pub fn new(
        projection: &Orthographic,
        target: FlyToTarget,
        started_at: DateTime<Utc>,
        duration: Duration,
    ) -> Self {
        let start_scale = projection.scale();
        Self {
            start_rotate: projection.rotate(),
            start_scale,
            end_rotate: [-target.lon, -target.lat, 0.0],
            end_scale: target.scale.unwrap_or(start_scale),
            started_at,
            duration,
        }
    }

    /// Fraction of the transition elapsed at `now`, in [0, 1].
    pub fn progress_at(&self, now: DateTime<Utc>) -> f64 {
        let total = self.duration.num_milliseconds();
        if total <= 0 {
            return 1.0;
        }
        let elapsed = (now - self.started_at).num_milliseconds();
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Set the projection to the interpolated state at `progress`.
    pub fn apply(&self, projection: &mut Orthographic, progress: f64) {
        let t = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let rotate = [
            lerp(self.start_rotate[0], self.end_rotate[0], t),
            lerp(self.start_rotate[1], self.end_rotate[1], t),
            lerp(self.start_rotate[2], self.end_rotate[2], t),
        ];
        projection.set_rotate(rotate);
        projection.set_scale(lerp(self.start_scale, self.end_scale, t));
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn target() -> FlyToTarget {
        FlyToTarget {
            lon: 100.0,
            lat: 40.0,
            scale: Some(900.0),
        }
    }

    #[test]
    fn test_orientation_round_trip() {
        let mut projection = Orthographic::fit_size(960.0, 960.0);
        let orientation = GlobeOrientation {
            center: GeoPoint::new(-75.0, 28.5),
            scale: 1200.0,
        };
        orientation.apply(&mut projection);

        let read_back = GlobeOrientation::of(&projection).unwrap();
        assert_abs_diff_eq!(read_back.center.lon(), -75.0, epsilon = 1e-9);
        assert_abs_diff_eq!(read_back.center.lat(), 28.5, epsilon = 1e-9);
        assert_eq!(read_back.scale, 1200.0);
    }

    #[test]
    fn test_fly_to_endpoints() {
        let mut projection = Orthographic::fit_size(960.0, 960.0);
        let fly = FlyTo::new(&projection, target(), Utc::now(), Duration::milliseconds(1500));

        fly.apply(&mut projection, 0.0);
        assert_eq!(projection.rotate(), [0.0, 0.0, 0.0]);
        assert_eq!(projection.scale(), 480.0);

        fly.apply(&mut projection, 0.5);
        assert_eq!(projection.rotate(), [-50.0, -20.0, 0.0]);
        assert_eq!(projection.scale(), 690.0);

        fly.apply(&mut projection, 1.0);
        let center = projection.center().unwrap();
        assert_abs_diff_eq!(center.lon(), 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(center.lat(), 40.0, epsilon = 1e-9);
        assert_eq!(projection.scale(), 900.0);
    }

    #[test]
    fn test_fly_to_keeps_scale() {
        let mut projection = Orthographic::fit_size(600.0, 600.0);
        let fly = FlyTo::new(
            &projection,
            FlyToTarget {
                lon: 10.0,
                lat: 0.0,
                scale: None,
            },
            Utc::now(),
            Duration::seconds(1),
        );
        fly.apply(&mut projection, 1.0);
        assert_eq!(projection.scale(), 300.0);
    }

    #[test]
    fn test_progress() {
        let start = Utc::now();
        let projection = Orthographic::fit_size(960.0, 960.0);
        let fly = FlyTo::new(&projection, target(), start, Duration::milliseconds(1500));

        assert_eq!(fly.progress_at(start - Duration::seconds(1)), 0.0);
        assert_abs_diff_eq!(fly.progress_at(start + Duration::milliseconds(750)), 0.5);
        assert_eq!(fly.progress_at(start + Duration::seconds(10)), 1.0);

        let instant = FlyTo::new(&projection, target(), start, Duration::zero());
        assert_eq!(instant.progress_at(start), 1.0);
    }
}
