use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        portfolio::submit_portfolio_request,
        properties::{
            create_property, delete_property, get_featured_properties, get_property,
            get_property_by_slug, list_properties, update_property,
        },
        uploads::{init_upload, upload_batch, upload_image},
    },
    middleware::{admin_guard, auth},
    service::upload::MAX_UPLOAD_BYTES,
    AppState,
};

// Batch bodies carry several base64-inflated images
const BATCH_BODY_LIMIT_BYTES: usize = 128 * 1024 * 1024;

// Health check handler
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Public on GET, admin editor on POST/PUT/DELETE
    let property_routes = Router::new()
        .route("/", get(list_properties).post(create_property))
        .route("/featured", get(get_featured_properties))
        .route("/slug/:slug", get(get_property_by_slug))
        .route(
            "/:property_id",
            get(get_property).put(update_property).delete(delete_property),
        )
        .layer(middleware::from_fn(admin_guard));

    let upload_routes = Router::new()
        .route("/init", post(init_upload))
        .route(
            "/",
            post(upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES as usize)),
        )
        .route(
            "/batch",
            post(upload_batch).layer(DefaultBodyLimit::max(BATCH_BODY_LIMIT_BYTES)),
        )
        .layer(middleware::from_fn(auth));

    let api_route = Router::new()
        .nest("/properties", property_routes)
        .nest("/upload", upload_routes)
        .route("/portfolio-request", post(submit_portfolio_request))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
