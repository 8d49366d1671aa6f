//! # Burrow
//!
//! Expose plain record types as hyperlinked REST resources.
//!
//! ## Features
//!
//! - **No per-resource wiring**: register a record type with its accessors and
//!   the list/create/read/update/delete routes are derived
//! - **Hypermedia links**: every response embeds a `links` map with `self`,
//!   `root`, the resource index and one entry per reference field
//! - **Host-aware URLs**: links are qualified with the host of each request
//! - **Optional accessors**: leave an accessor out to disallow that operation
//! - **Partial updates**: `PUT` only touches the fields present in the body
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use burrow::prelude::*;
//!
//! #[derive(Clone, Serialize, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Book {
//!     id: i64,
//!     name: String,
//!     library_id: i64,
//! }
//!
//! impl_record!(Book, "book", id: "Id", refs: ["LibraryId" => "library" as "owner"]);
//!
//! ServerBuilder::new()
//!     .register(Resource::<Book>::new(
//!         Accessors::new().read(move |id| store.get(id)).list(move || store.all()),
//!     ))?
//!     .serve()
//!     .await?;
//! ```
//!
//! `GET /book/0` then answers:
//!
//! ```json
//! {
//!   "Id": 0, "Name": "Dune", "LibraryId": 1,
//!   "links": {
//!     "self": "http://host/book/0",
//!     "book index": "http://host/book",
//!     "root": "http://host/",
//!     "owner": "http://host/library/1"
//!   }
//! }
//! ```

pub mod config;
pub mod core;
pub mod links;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{BurrowError, ConfigError},
        record::{Record, RecordShape},
        resource::{Accessors, Operation, Resource, ResourceDescriptor},
    };

    // === Macros ===
    pub use crate::impl_record;

    // === Links ===
    pub use crate::links::{LinkManager, Links};

    // === Config ===
    pub use crate::config::{LoggingConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{Registry, ServerBuilder};

    // === External dependencies ===
    pub use axum::http::StatusCode;
    pub use serde::{Deserialize, Serialize};
}
