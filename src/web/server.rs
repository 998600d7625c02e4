use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::globe::Orthographic;

use super::api::globe as globe_handlers;
use super::api::launch_sites as launch_site_handlers;
use super::api::satellites as satellite_handlers;
use super::api_doc::ApiDoc;
use super::state::{AppState, GlobeState};

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Catalog endpoints
        .route("/api/satellites", get(satellite_handlers::list_satellites))
        .route(
            "/api/satellites/{norad_id}/track",
            get(satellite_handlers::get_track),
        )
        .route("/api/countries", get(satellite_handlers::list_countries))
        .route(
            "/api/launch-sites",
            get(launch_site_handlers::list_launch_sites),
        )
        .route(
            "/api/launch-sites/{site}/history",
            get(launch_site_handlers::site_history),
        )
        // Globe endpoints
        .route("/api/globe", get(globe_handlers::get_globe))
        .route("/api/globe/fly-to", post(globe_handlers::fly_to))
        .route("/api/globe/frame", get(globe_handlers::get_frame))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config, catalog: Catalog) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let projection = Orthographic::fit_size(config.globe.width, config.globe.height);

    let state = AppState {
        config: Arc::new(config),
        catalog: Arc::new(catalog),
        globe: Arc::new(RwLock::new(GlobeState::new(projection))),
    };

    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::catalog::test_support::sample_catalog;

    fn test_router() -> Router {
        let config = Config::from_str(
            "data:\n  satellites: data/info.tsv\n  launch_sites: data/coords.tsv\nglobe:\n  fly_to_duration: 1h\n",
        )
        .unwrap();
        let projection = Orthographic::fit_size(config.globe.width, config.globe.height);
        router(AppState {
            config: Arc::new(config),
            catalog: Arc::new(sample_catalog()),
            globe: Arc::new(RwLock::new(GlobeState::new(projection))),
        })
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn fly_to(app: &Router, target: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/globe/fly-to")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(target.to_string()))
            .unwrap();
        send(app, request).await
    }

    #[tokio::test]
    async fn test_track_lookup() {
        let app = test_router();

        let (status, body) = get(&app, "/api/satellites/25544/track").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "ISS");
        assert_eq!(body["track"].as_array().unwrap().len(), 301);
        assert_eq!(body["track"][0], json!([0.0, 0.0]));

        let (status, body) = get(&app, "/api/satellites/99999/track").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "satellite_not_found");
    }

    #[tokio::test]
    async fn test_satellites_by_country() {
        let app = test_router();

        let (status, body) = get(&app, "/api/satellites?country=ESA").await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["satellites"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Sentinel-2A", "Sentinel-2B"]);
    }

    #[tokio::test]
    async fn test_launch_sites_need_country() {
        let app = test_router();

        let (status, body) = get(&app, "/api/launch-sites?country=%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_failed");

        let (status, _) = get(&app, "/api/launch-sites").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get(&app, "/api/launch-sites?country=France").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["site"], "Guiana Space Center");
        assert_eq!(body[0]["count"], 2);
    }

    #[tokio::test]
    async fn test_unknown_site_history() {
        let app = test_router();

        let (status, body) = get(&app, "/api/launch-sites/Atlantis/history").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "launch_site_not_found");

        let (status, body) = get(&app, "/api/launch-sites/Guiana%20Space%20Center/history").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["category"], "Earth Observation");
    }

    #[tokio::test]
    async fn test_fly_to_rejects_bad_targets() {
        let app = test_router();

        let (status, body) = fly_to(&app, json!({ "lon": 10.0, "lat": 95.0 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_failed");

        let (status, _) = fly_to(&app, json!({ "lon": 10.0, "lat": 0.0, "scale": 0.0 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = fly_to(&app, json!({ "lon": 10.0, "lat": 0.0, "scale": -5.0 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = get(&app, "/api/globe").await;
        assert_eq!(body["flying"], false);
    }

    #[tokio::test]
    async fn test_frame_progress_is_per_request() {
        let app = test_router();

        let (status, body) = fly_to(&app, json!({ "lon": 90.0, "lat": 0.0 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["flying"], true);

        let (status, body) = get(&app, "/api/globe/frame?progress=1").await;
        assert_eq!(status, StatusCode::OK);
        let center = &body["orientation"]["center"];
        assert!((center[0].as_f64().unwrap() - 90.0).abs() < 1e-9);
        assert!(center[1].as_f64().unwrap().abs() < 1e-9);

        // Other clients still see the transition in flight
        let (_, body) = get(&app, "/api/globe").await;
        assert_eq!(body["flying"], true);
    }

    #[tokio::test]
    async fn test_frame_validation_and_filter() {
        let app = test_router();

        let (status, body) = get(&app, "/api/globe/frame?progress=1.5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_failed");

        let (status, _) = get(&app, "/api/globe/frame?progress=-0.1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get(&app, "/api/globe/frame?country=USA").await;
        assert_eq!(status, StatusCode::OK);
        let dots = body["dots"].as_array().unwrap();
        assert_eq!(dots.len(), 1);
        assert_eq!(dots[0]["name"], "Intelsat 35e");
    }
}
