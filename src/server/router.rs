//! Router builder utilities

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::resource::ResourceDescriptor;
use crate::links::manager::index_url;
use crate::server::handlers::{self, AppState, ResourceState};

/// Build the routes of one resource
///
/// - GET    /{name}      - List
/// - POST   /{name}      - Create
/// - GET    /{name}/{id} - Read
/// - PUT    /{name}/{id} - Update
/// - DELETE /{name}/{id} - Delete
pub fn build_resource_routes(app: AppState, resource: Arc<dyn ResourceDescriptor>) -> Router {
    let index = index_url(resource.name());
    let object = format!("{}/{{id}}", index);

    Router::new()
        .route(&index, get(handlers::list).post(handlers::create))
        .route(
            &object,
            get(handlers::read)
                .put(handlers::update)
                .delete(handlers::delete),
        )
        .with_state(ResourceState { app, resource })
}

/// Build the full router: discovery root, health checks and every resource
pub fn build_router(app: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::root))
        .with_state(app.clone())
        .merge(health_routes());

    for resource in app.registry.iter() {
        router = router.merge(build_resource_routes(app.clone(), resource.clone()));
    }

    router
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "burrow"
    }))
}
