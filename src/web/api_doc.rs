use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::globe::{FrameResponse, GlobeResponse};
use super::api::satellites::{CountryCount, SatellitesResponse, TrackResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::satellites::list_satellites,
        super::api::satellites::get_track,
        super::api::satellites::list_countries,
        super::api::launch_sites::list_launch_sites,
        super::api::launch_sites::site_history,
        super::api::globe::get_globe,
        super::api::globe::fly_to,
        super::api::globe::get_frame,
    ),
    components(
        schemas(
            SatellitesResponse,
            TrackResponse,
            CountryCount,
            GlobeResponse,
            FrameResponse,
            ErrorResponse,
            crate::catalog::SatelliteSummary,
            crate::catalog::OrbitClass,
            crate::catalog::LaunchSiteSummary,
            crate::catalog::PurposeSeries,
            crate::catalog::YearCount,
            crate::globe::GlobeOrientation,
            crate::globe::FlyToTarget,
            crate::globe::SatelliteDot,
            crate::globe::DotPlacement,
            crate::track::GeoPoint,
        )
    ),
    info(
        title = "Sat-Globe API",
        description = "Ground tracks, visible satellite positions and launch sites for an orthographic globe",
        version = "0.1.0"
    ),
    tags(
        (name = "satellites", description = "Satellite catalog and ground tracks"),
        (name = "launch-sites", description = "Launch site aggregates"),
        (name = "globe", description = "Globe orientation and per-frame placements")
    )
)]
pub struct ApiDoc;
