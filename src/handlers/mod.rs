pub mod resolve;
pub mod tables;
pub mod view;

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::session_middleware;
use crate::services::{TenantDirectory, TenantResolver};

/// Build the full application router. The tenant directory is the only
/// injected collaborator; everything below the middleware is stateless.
pub fn router() -> anyhow::Result<Router> {
    let directory = TenantDirectory::from_config()?;
    tracing::info!(tenants = directory.len(), "tenant directory seeded");
    let tenant_resolver: Arc<dyn TenantResolver> = Arc::new(directory);

    let api = Router::new()
        .route("/api/resolve", post(resolve::resolve_post))
        .route("/api/view", get(view::view_root))
        .route("/api/view/", get(view::view_root))
        .route("/api/view/*path", get(view::view_get))
        .route("/api/routes/:mode", get(tables::table_get))
        // Snapshot extraction runs inside the Extension layer so it can see
        // the tenant resolver
        .layer(axum::middleware::from_fn(session_middleware))
        .layer(Extension(tenant_resolver));

    Ok(Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()))
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "portal-router",
        "description": "view-routing resolver for the multi-tenant HR platform"
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
