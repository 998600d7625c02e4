use serde::Serialize;
use utoipa::ToSchema;

use super::projection::Orthographic;
use crate::catalog::Satellite;
use crate::track::{visible_point, GeoPoint};

/// Screen position renderers park hidden dots at.
pub const OFF_SCREEN: [f64; 2] = [-1000.0, -1000.0];

/// Where a satellite dot goes in the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DotPlacement {
    Visible { coord: GeoPoint, x: f64, y: f64 },
    Hidden,
}

impl DotPlacement {
    pub fn translate(&self) -> [f64; 2] {
        match self {
            DotPlacement::Visible { x, y, .. } => [*x, *y],
            DotPlacement::Hidden => OFF_SCREEN,
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, DotPlacement::Visible { .. })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SatelliteDot {
    pub name: String,
    pub norad_id: Option<u32>,
    pub placement: DotPlacement,
}

/// Place one satellite's dot on the globe as currently oriented.
pub fn place_dot(projection: &Orthographic, track: &[GeoPoint], phase: f64, margin: f64) -> DotPlacement {
    let Some(coord) = visible_point(projection.center(), track, phase, margin) else {
        return DotPlacement::Hidden;
    };
    let [x, y] = projection.project(coord);
    if x.is_finite() && y.is_finite() && projection.is_visible(coord) {
        DotPlacement::Visible { coord, x, y }
    } else {
        DotPlacement::Hidden
    }
}

/// Dots for every satellite that has a track.
pub fn build_frame<'a>(
    projection: &Orthographic,
    satellites: impl IntoIterator<Item = &'a Satellite>,
    margin: f64,
) -> Vec<SatelliteDot> {
    satellites
        .into_iter()
        .filter(|sat| !sat.ground_track.is_empty())
        .map(|sat| SatelliteDot {
            name: sat.name.clone(),
            norad_id: sat.norad_id,
            placement: place_dot(projection, &sat.ground_track, sat.phase, margin),
        })
        .collect()
}
