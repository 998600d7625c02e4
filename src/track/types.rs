use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::TrackError;

pub const DEFAULT_NUM_POINTS: usize = 300;
pub const DEFAULT_NUM_ORBITS: u32 = 1;

/// Longitude/latitude pair in degrees, serialized as `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint(pub f64, pub f64);

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self(lon, lat)
    }

    pub fn lon(&self) -> f64 {
        self.0
    }

    pub fn lat(&self) -> f64 {
        self.1
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }
}

/// Closed sequence of track points; the last sample repeats the first orbit phase.
pub type GroundTrack = Vec<GeoPoint>;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TrackParams {
    #[serde(default = "default_num_points")]
    pub num_points: usize,
    #[serde(default = "default_num_orbits")]
    pub num_orbits: u32,
}

fn default_num_points() -> usize {
    DEFAULT_NUM_POINTS
}

fn default_num_orbits() -> u32 {
    DEFAULT_NUM_ORBITS
}

impl Default for TrackParams {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_NUM_POINTS,
            num_orbits: DEFAULT_NUM_ORBITS,
        }
    }
}

impl TrackParams {
    pub fn new(num_points: usize, num_orbits: u32) -> Result<Self, TrackError> {
        let params = Self {
            num_points,
            num_orbits,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), TrackError> {
        if self.num_points == 0 {
            return Err(TrackError::InvalidPointCount);
        }
        Ok(())
    }
}
