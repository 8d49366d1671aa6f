//! HTTP handlers dispatching requests to resource accessors
//!
//! Every handler is resource-agnostic: the resource comes from the router
//! state, the host used for links comes from the request. Errors from any
//! stage are returned as [`BurrowError`], whose `IntoResponse` impl is the
//! single place translating them into status codes.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::core::error::{BurrowError, Result};
use crate::core::resource::ResourceDescriptor;
use crate::links::manager::LinkManager;
use crate::links::payload::{marshal_many, marshal_one, marshal_root};
use crate::server::registry::Registry;

/// State shared by every route of the service
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    /// Host used for links when the request names none
    pub default_host: Arc<str>,
}

impl AppState {
    pub fn new(registry: Arc<Registry>, default_host: impl Into<Arc<str>>) -> Self {
        Self {
            registry,
            default_host: default_host.into(),
        }
    }

    /// Link manager qualified with the host of this request
    pub fn link_manager(&self, uri: &Uri, headers: &HeaderMap) -> LinkManager<'_> {
        LinkManager::new(&self.registry, request_host(uri, headers, &self.default_host))
    }
}

/// State of the routes of one resource
#[derive(Clone)]
pub struct ResourceState {
    pub app: AppState,
    pub resource: Arc<dyn ResourceDescriptor>,
}

/// Host the request was addressed to
///
/// The `Host` header wins, then the URI authority (HTTP/2 `:authority`),
/// then `default`.
pub fn request_host(uri: &Uri, headers: &HeaderMap, default: &str) -> String {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .filter(|host| !host.is_empty())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .unwrap_or(default)
        .to_string()
}

/// Parse the `{id}` path segment
pub fn parse_id(raw: &str) -> Result<i64> {
    raw.parse().map_err(|_| BurrowError::InvalidId {
        value: raw.to_string(),
    })
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// GET /
pub async fn root(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response> {
    let manager = state.link_manager(&uri, &headers);
    tracing::debug!(host = manager.host(), "root");

    Ok(json_response(StatusCode::OK, marshal_root(&manager)?))
}

/// GET /{name}
pub async fn list(
    State(state): State<ResourceState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response> {
    let resource = state.resource.as_ref();
    tracing::debug!(resource = resource.name(), "list");

    let records = resource.list()?;
    let manager = state.app.link_manager(&uri, &headers);
    Ok(json_response(
        StatusCode::OK,
        marshal_many(&manager, resource, records)?,
    ))
}

/// POST /{name}
pub async fn create(
    State(state): State<ResourceState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response> {
    let resource = state.resource.as_ref();
    tracing::debug!(resource = resource.name(), "create");

    let record = resource.create()?;
    let manager = state.app.link_manager(&uri, &headers);
    Ok(json_response(
        StatusCode::CREATED,
        marshal_one(&manager, resource, record)?,
    ))
}

/// GET /{name}/{id}
pub async fn read(
    State(state): State<ResourceState>,
    Path(id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response> {
    let resource = state.resource.as_ref();
    let id = parse_id(&id)?;
    tracing::debug!(resource = resource.name(), id, "read");

    let record = resource.read(id)?;
    let manager = state.app.link_manager(&uri, &headers);
    Ok(json_response(
        StatusCode::OK,
        marshal_one(&manager, resource, record)?,
    ))
}

/// PUT /{name}/{id}
///
/// The body is a JSON object of field name to new value; omitted fields keep
/// their stored value. The record is read before the body is decoded, so a
/// missing record reports the read error even when the body is malformed.
pub async fn update(
    State(state): State<ResourceState>,
    Path(id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let resource = state.resource.as_ref();
    let id = parse_id(&id)?;
    tracing::debug!(resource = resource.name(), id, "update");

    let record = resource.update(id, &body)?;
    let manager = state.app.link_manager(&uri, &headers);
    Ok(json_response(
        StatusCode::OK,
        marshal_one(&manager, resource, record)?,
    ))
}

/// DELETE /{name}/{id}
pub async fn delete(
    State(state): State<ResourceState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let resource = state.resource.as_ref();
    let id = parse_id(&id)?;
    tracing::debug!(resource = resource.name(), id, "delete");

    resource.delete(id)?;
    Ok(StatusCode::OK)
}
