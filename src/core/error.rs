//! Typed error handling for burrow
//!
//! Two error families exist:
//!
//! - [`BurrowError`]: everything that can go wrong while answering a request.
//!   Each variant maps to an HTTP status via [`BurrowError::status_code`] and is
//!   rendered on the wire as a single plain-text line.
//! - [`ConfigError`]: problems detected while configuring the service
//!   (resource registration, configuration loading).
//!
//! Accessors report their own failures with [`BurrowError::api`], which carries
//! an explicit status code, or [`BurrowError::new`], which defaults to 500.
//!
//! ```rust,ignore
//! fn read_book(id: i64) -> burrow::core::Result<Book> {
//!     books.get(&id).cloned().ok_or_else(|| {
//!         BurrowError::api(StatusCode::NOT_FOUND, format!("Could not find book with id: {id}"))
//!     })
//! }
//! ```

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::core::resource::Operation;

/// Result alias used by accessors and the request pipeline
pub type Result<T, E = BurrowError> = std::result::Result<T, E>;

/// Errors raised while serving a request
#[derive(Debug, Error)]
pub enum BurrowError {
    /// The resource has no accessor for the requested operation
    #[error("{operation} {resource} is not allowed")]
    NotAllowed {
        resource: String,
        operation: Operation,
    },

    /// Accessor-defined failure carrying its own HTTP status
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The id segment of the path is not an integer
    #[error("Invalid id '{value}': expected an integer")]
    InvalidId { value: String },

    /// The request body is not a JSON object
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// An update names a field the record does not have
    #[error("Could not find {resource} field {field}")]
    UnknownField { resource: String, field: String },

    /// An update supplies a value the record cannot hold
    #[error("Invalid value for {resource}: {message}")]
    InvalidFieldValue { resource: String, message: String },

    /// A reference-annotated field does not hold an integer
    #[error(
        "Reference of non-integer type: {resource}.{field}. Check to be sure your API models are defined correctly."
    )]
    InvalidReference { resource: String, field: String },

    /// A reference names a resource that is not registered
    #[error("No resource exists named {name}")]
    UnknownResource { name: String },

    /// JSON encoding or decoding of a record failed
    #[error("Could not marshal {resource}: {message}")]
    Marshal { resource: String, message: String },
}

impl BurrowError {
    /// Accessor error without an explicit status (rendered as 500)
    pub fn new(message: impl Into<String>) -> Self {
        Self::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// Accessor error with an explicit status code
    pub fn api(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BurrowError::NotAllowed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            BurrowError::Api { status, .. } => *status,
            BurrowError::InvalidId { .. }
            | BurrowError::InvalidBody { .. }
            | BurrowError::UnknownField { .. }
            | BurrowError::InvalidFieldValue { .. }
            | BurrowError::InvalidReference { .. }
            | BurrowError::UnknownResource { .. } => StatusCode::NOT_ACCEPTABLE,
            BurrowError::Marshal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BurrowError::NotAllowed { .. } => "NOT_ALLOWED",
            BurrowError::Api { .. } => "API_ERROR",
            BurrowError::InvalidId { .. } => "INVALID_ID",
            BurrowError::InvalidBody { .. } => "INVALID_BODY",
            BurrowError::UnknownField { .. } => "UNKNOWN_FIELD",
            BurrowError::InvalidFieldValue { .. } => "INVALID_FIELD_VALUE",
            BurrowError::InvalidReference { .. } => "INVALID_REFERENCE",
            BurrowError::UnknownResource { .. } => "UNKNOWN_RESOURCE",
            BurrowError::Marshal { .. } => "MARSHAL_FAILURE",
        }
    }
}

impl IntoResponse for BurrowError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(status = %status, code = self.error_code(), "{}", self);
        } else {
            tracing::debug!(status = %status, code = self.error_code(), "{}", self);
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{}\n", self),
        )
            .into_response()
    }
}

/// Errors raised while configuring the service
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A resource was registered without a name
    #[error("Resource name must not be empty")]
    EmptyName,

    /// Two resources share the same (case-insensitive) name
    #[error("Resource '{name}' is already registered")]
    DuplicateResource { name: String },

    /// More than one field is marked as the identifier
    #[error("Resource '{resource}' marks more than one identifier field ('{first}', '{second}')")]
    DuplicateIdentifier {
        resource: String,
        first: String,
        second: String,
    },

    /// A single field carries more than one annotation
    #[error("Resource '{resource}' annotates field '{field}' more than once")]
    DuplicateAnnotation { resource: String, field: String },

    /// A reference annotation has an empty target
    #[error("Resource '{resource}' field '{field}' references an empty resource name")]
    EmptyReferenceTarget { resource: String, field: String },

    /// IO error while reading configuration
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
