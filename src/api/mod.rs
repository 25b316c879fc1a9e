//! HTTP surface: router construction and middleware stack

pub mod handlers;
pub mod middleware;
pub mod routes;

use std::path::PathBuf;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::ServerConfig, state::AppState};

pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router: Router<AppState> = Router::new()
        .route("/health", get(handlers::questions::health))
        .nest("/api", routes::questions::question_routes());

    if config.ui.enabled {
        let static_dir = PathBuf::from(&config.ui.static_dir);
        router = router
            .route_service("/", ServeFile::new(static_dir.join("index.html")))
            .nest_service("/static", ServeDir::new(&static_dir));
    }

    // ServiceBuilder applies top-down: tracing wraps everything, panics
    // become 500s before the timeout/body-limit/CORS layers apply.
    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::new())
                .layer(DefaultBodyLimit::max(config.server.max_request_body_size))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_seconds,
                )))
                .layer(build_cors_layer(&config.server))
                .layer(axum::middleware::from_fn(
                    middleware::security::security_headers_middleware,
                )),
        )
        .with_state(state)
}

fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origins.iter().any(|origin| origin == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}
