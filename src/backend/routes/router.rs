/**
 * Router Configuration
 *
 * Combines the API routes with the cross-cutting layers:
 *
 * - CORS for the configured browser origins
 * - request tracing through `TraceLayer`
 * - a JSON 404 fallback
 */

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origins: &[String]) -> Router<()> {
    let router = configure_api_routes(Router::new(), app_state.clone());

    router
        .fallback(|| async { BackendError::not_found("Route not found") })
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
