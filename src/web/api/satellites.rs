use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::catalog::SatelliteSummary;
use crate::track::GeoPoint;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SatellitesQuery {
    /// Only satellites operated by this country
    pub country: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SatellitesResponse {
    pub satellites: Vec<SatelliteSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrackResponse {
    pub name: String,
    pub norad_id: u32,
    pub inclination_deg: f64,
    pub phase: f64,
    pub track: Vec<GeoPoint>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CountryCount {
    pub country: String,
    pub satellites: usize,
}

#[utoipa::path(
    get,
    path = "/api/satellites",
    tag = "satellites",
    params(SatellitesQuery),
    responses(
        (status = 200, description = "Satellite listing", body = SatellitesResponse)
    )
)]
pub async fn list_satellites(
    State(state): State<AppState>,
    Query(query): Query<SatellitesQuery>,
) -> Json<SatellitesResponse> {
    let satellites = state
        .catalog
        .satellites()
        .iter()
        .filter(|sat| match &query.country {
            Some(country) => sat.operator_country.as_deref() == Some(country.as_str()),
            None => true,
        })
        .map(SatelliteSummary::from)
        .collect();

    Json(SatellitesResponse { satellites })
}

#[utoipa::path(
    get,
    path = "/api/satellites/{norad_id}/track",
    tag = "satellites",
    params(("norad_id" = u32, Path, description = "NORAD catalog number")),
    responses(
        (status = 200, description = "Ground track", body = TrackResponse),
        (status = 404, description = "Unknown satellite", body = ErrorResponse)
    )
)]
pub async fn get_track(
    State(state): State<AppState>,
    Path(norad_id): Path<u32>,
) -> ApiResult<Json<TrackResponse>> {
    let sat = state
        .catalog
        .satellite(norad_id)
        .ok_or(ApiError::NotFound("satellite_not_found"))?;

    Ok(Json(TrackResponse {
        name: sat.name.clone(),
        norad_id,
        inclination_deg: sat.inclination_deg,
        phase: sat.phase,
        track: sat.ground_track.clone(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/countries",
    tag = "satellites",
    responses(
        (status = 200, description = "Operator countries", body = Vec<CountryCount>)
    )
)]
pub async fn list_countries(State(state): State<AppState>) -> Json<Vec<CountryCount>> {
    let countries = state
        .catalog
        .satellites_by_operator()
        .into_iter()
        .map(|(country, sats)| CountryCount {
            country: country.to_string(),
            satellites: sats.len(),
        })
        .collect();
    Json(countries)
}
