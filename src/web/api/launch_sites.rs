use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::catalog::{launch_history, summarize_sites, LaunchSiteSummary, PurposeSeries};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LaunchSitesQuery {
    /// Launch country, or `ALL` for every site outside the United States
    pub country: String,
}

#[utoipa::path(
    get,
    path = "/api/launch-sites",
    tag = "launch-sites",
    params(LaunchSitesQuery),
    responses(
        (status = 200, description = "Launch counts per site", body = Vec<LaunchSiteSummary>),
        (status = 400, description = "Missing country", body = ErrorResponse)
    )
)]
pub async fn list_launch_sites(
    State(state): State<AppState>,
    Query(query): Query<LaunchSitesQuery>,
) -> ApiResult<Json<Vec<LaunchSiteSummary>>> {
    let country = query.country.trim();
    if country.is_empty() {
        return Err(ApiError::Validation("country must not be empty".into()));
    }
    Ok(Json(summarize_sites(state.catalog.launches(), country)))
}

#[utoipa::path(
    get,
    path = "/api/launch-sites/{site}/history",
    tag = "launch-sites",
    params(("site" = String, Path, description = "Launch site name")),
    responses(
        (status = 200, description = "Launches per purpose and year", body = Vec<PurposeSeries>),
        (status = 404, description = "Unknown launch site", body = ErrorResponse)
    )
)]
pub async fn site_history(
    State(state): State<AppState>,
    Path(site): Path<String>,
) -> ApiResult<Json<Vec<PurposeSeries>>> {
    if !state.catalog.launch_sites().contains_key(&site) {
        return Err(ApiError::NotFound("launch_site_not_found"));
    }
    let history = launch_history(
        state.catalog.launches(),
        &site,
        state.catalog.year_extent(),
    );
    Ok(Json(history))
}
