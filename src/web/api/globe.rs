use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::globe::{build_frame, FlyToTarget, GlobeOrientation, SatelliteDot};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct GlobeResponse {
    /// `None` when the viewport centre is off the globe
    pub orientation: Option<GlobeOrientation>,
    pub flying: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FrameQuery {
    /// Transition progress in [0, 1]; defaults to wall-clock progress
    pub progress: Option<f64>,
    /// Only satellites operated by this country
    pub country: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FrameResponse {
    pub orientation: Option<GlobeOrientation>,
    pub dots: Vec<SatelliteDot>,
}

#[utoipa::path(
    get,
    path = "/api/globe",
    tag = "globe",
    responses(
        (status = 200, description = "Current orientation", body = GlobeResponse)
    )
)]
pub async fn get_globe(State(state): State<AppState>) -> Json<GlobeResponse> {
    let mut globe = state.globe.write().await;
    globe.advance(Utc::now());
    Json(GlobeResponse {
        orientation: GlobeOrientation::of(globe.projection()),
        flying: globe.is_flying(),
    })
}

#[utoipa::path(
    post,
    path = "/api/globe/fly-to",
    tag = "globe",
    request_body = FlyToTarget,
    responses(
        (status = 200, description = "Transition started", body = GlobeResponse),
        (status = 400, description = "Invalid target", body = ErrorResponse)
    )
)]
pub async fn fly_to(
    State(state): State<AppState>,
    Json(target): Json<FlyToTarget>,
) -> ApiResult<Json<GlobeResponse>> {
    validate_target(&target)?;

    let duration = chrono::Duration::from_std(state.config.globe.fly_to_duration)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let mut globe = state.globe.write().await;
    globe.start_fly_to(target, Utc::now(), duration);
    log::info!(
        "Flying to ({:.2}, {:.2}) over {:?}",
        target.lon,
        target.lat,
        state.config.globe.fly_to_duration
    );

    Ok(Json(GlobeResponse {
        orientation: GlobeOrientation::of(globe.projection()),
        flying: globe.is_flying(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/globe/frame",
    tag = "globe",
    params(FrameQuery),
    responses(
        (status = 200, description = "Satellite dot placements", body = FrameResponse),
        (status = 400, description = "Invalid progress", body = ErrorResponse)
    )
)]
pub async fn get_frame(
    State(state): State<AppState>,
    Query(query): Query<FrameQuery>,
) -> ApiResult<Json<FrameResponse>> {
    if let Some(progress) = query.progress {
        if !(0.0..=1.0).contains(&progress) {
            return Err(ApiError::Validation("progress must be within [0, 1]".into()));
        }
    }

    let projection = {
        let mut globe = state.globe.write().await;
        match query.progress {
            Some(progress) => globe.preview(progress),
            None => {
                globe.advance(Utc::now());
                globe.projection().clone()
            }
        }
    };

    let satellites = state.catalog.satellites().iter().filter(|sat| {
        match &query.country {
            Some(country) => sat.operator_country.as_deref() == Some(country.as_str()),
            None => true,
        }
    });
    let dots = build_frame(&projection, satellites, state.config.globe.horizon_margin);

    Ok(Json(FrameResponse {
        orientation: GlobeOrientation::of(&projection),
        dots,
    }))
}

fn validate_target(target: &FlyToTarget) -> ApiResult<()> {
    if !target.lon.is_finite() || !(-90.0..=90.0).contains(&target.lat) {
        return Err(ApiError::Validation("target must be a valid lon/lat".into()));
    }
    if let Some(scale) = target.scale {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ApiError::Validation("scale must be positive".into()));
        }
    }
    Ok(())
}
