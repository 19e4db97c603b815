//! HTTP API: GraphQL endpoint, health check and static front-end hosting

pub mod graphql;
pub mod health;

use crate::ProjmanServer;
use crate::middleware::{SanitizeConfig, SecurityHeaders, sanitize_request, security_headers};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Build the application router
///
/// - `POST /graphql` executes operations; `GET /graphql` serves GraphiQL in
///   development only
/// - `GET /health` reports server and store status
/// - every other path is served from the static directory, falling back to
///   its `index.html`
pub fn create_router(server: Arc<ProjmanServer>) -> Router {
    let config = &server.config;

    let graphql_route = if config.environment.is_development() {
        info!("GraphiQL enabled at /graphql");
        get(graphql::graphiql).post(graphql::graphql_handler)
    } else {
        post(graphql::graphql_handler)
    };

    let mut router = Router::new()
        .route("/graphql", graphql_route)
        .route("/health", get(health::health_check));

    if let Some(dir) = &config.static_dir {
        if dir.is_dir() {
            info!("Serving static assets from {:?}", dir);
            let index = dir.join("index.html");
            router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
        } else {
            warn!("Static directory {:?} not found; static hosting disabled", dir);
        }
    }

    let sanitize = SanitizeConfig {
        max_body_bytes: config.max_body_bytes,
    };
    let security = Arc::new(SecurityHeaders::for_environment(config.environment));

    router
        .layer(from_fn_with_state(sanitize, sanitize_request))
        .layer(from_fn_with_state(security, security_headers))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}
