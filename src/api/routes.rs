use axum::{
    routing::{get, patch, post, put},
    Router,
};
use std::sync::Arc;

use crate::api::{estimate_handlers, handlers, release_handlers};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // API Documentation
        .route("/docs", get(handlers::get_api_docs::<S>))
        .route("/docs/openapi.json", get(handlers::get_openapi_spec::<S>))
        // Release resource
        .route("/api/v2/release", get(release_handlers::index::<S>))
        .route("/api/v2/release", post(release_handlers::create::<S>))
        .route(
            "/api/v2/release/:release_number",
            put(release_handlers::update::<S>),
        )
        // Estimate resource
        .route("/api/v2/estimate", get(estimate_handlers::index::<S>))
        .route("/api/v2/estimate", post(estimate_handlers::create::<S>))
        .route(
            "/api/v2/estimate/:estimate_number",
            get(estimate_handlers::show::<S>),
        )
        .route(
            "/api/v2/estimate/:estimate_number",
            put(estimate_handlers::customer_approve::<S>),
        )
        .route(
            "/api/v2/estimate/:estimate_number",
            patch(estimate_handlers::allocate::<S>),
        )
}
