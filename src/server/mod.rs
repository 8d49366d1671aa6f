//! Server module for building HTTP servers with auto-registered routes
//!
//! This module provides a `ServerBuilder` that registers, for every resource:
//! - GET/POST `/{name}`
//! - GET/PUT/DELETE `/{name}/{id}`
//!
//! plus the `/` discovery document listing every resource's index link.

pub mod builder;
pub mod handlers;
pub mod registry;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{AppState, ResourceState};
pub use registry::{Registry, UnresolvedReference};
pub use router::{build_resource_routes, build_router};
