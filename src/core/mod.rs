//! Core module containing record shapes, resource descriptors and errors

pub mod error;
pub mod macros;
pub mod record;
pub mod resource;

pub use error::{BurrowError, ConfigError, Result};
pub use record::{Annotation, Record, RecordShape, ReferenceField, ResolvedReference};
pub use resource::{Accessors, Operation, Resource, ResourceDescriptor};
