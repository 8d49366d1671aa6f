//! Resource descriptors and accessor capability records
//!
//! A [`Resource`] binds a record type to the accessor functions supplied by the
//! embedding application. Every accessor is optional: a missing slot means the
//! matching HTTP operation answers with [`BurrowError::NotAllowed`].
//!
//! The registry stores resources behind the object-safe [`ResourceDescriptor`]
//! trait, which exchanges records as JSON values so that heterogeneous record
//! types can live side by side.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::core::error::{BurrowError, Result};
use crate::core::record::{Record, RecordShape};

/// The five operations a resource can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Operation::List => "Listing",
            Operation::Create => "Creating",
            Operation::Read => "Reading",
            Operation::Update => "Updating",
            Operation::Delete => "Deleting",
        };
        f.write_str(verb)
    }
}

pub type CreateFn<T> = Arc<dyn Fn() -> Result<T> + Send + Sync>;
pub type ReadFn<T> = Arc<dyn Fn(i64) -> Result<T> + Send + Sync>;
pub type ListFn<T> = Arc<dyn Fn() -> Result<Vec<T>> + Send + Sync>;
pub type UpdateFn<T> = Arc<dyn Fn(T) -> Result<()> + Send + Sync>;
pub type DeleteFn = Arc<dyn Fn(i64) -> Result<()> + Send + Sync>;

/// Capability record holding the optional accessors of one resource
///
/// # Example
///
/// ```rust,ignore
/// let accessors = Accessors::new()
///     .read(move |id| store.get(id))
///     .list(move || store.all());
/// ```
pub struct Accessors<T> {
    create: Option<CreateFn<T>>,
    read: Option<ReadFn<T>>,
    list: Option<ListFn<T>>,
    update: Option<UpdateFn<T>>,
    delete: Option<DeleteFn>,
}

impl<T> Accessors<T> {
    /// Create an empty capability record (every operation disallowed)
    pub fn new() -> Self {
        Self {
            create: None,
            read: None,
            list: None,
            update: None,
            delete: None,
        }
    }

    pub fn create(mut self, f: impl Fn() -> Result<T> + Send + Sync + 'static) -> Self {
        self.create = Some(Arc::new(f));
        self
    }

    pub fn read(mut self, f: impl Fn(i64) -> Result<T> + Send + Sync + 'static) -> Self {
        self.read = Some(Arc::new(f));
        self
    }

    pub fn list(mut self, f: impl Fn() -> Result<Vec<T>> + Send + Sync + 'static) -> Self {
        self.list = Some(Arc::new(f));
        self
    }

    pub fn update(mut self, f: impl Fn(T) -> Result<()> + Send + Sync + 'static) -> Self {
        self.update = Some(Arc::new(f));
        self
    }

    pub fn delete(mut self, f: impl Fn(i64) -> Result<()> + Send + Sync + 'static) -> Self {
        self.delete = Some(Arc::new(f));
        self
    }

    /// Whether an accessor is present for `operation`
    pub fn supports(&self, operation: Operation) -> bool {
        match operation {
            Operation::List => self.list.is_some(),
            Operation::Create => self.create.is_some(),
            Operation::Read => self.read.is_some(),
            Operation::Update => self.update.is_some(),
            Operation::Delete => self.delete.is_some(),
        }
    }
}

impl<T> Default for Accessors<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Accessors<T> {
    fn clone(&self) -> Self {
        Self {
            create: self.create.clone(),
            read: self.read.clone(),
            list: self.list.clone(),
            update: self.update.clone(),
            delete: self.delete.clone(),
        }
    }
}

/// Type-erased view of a registered resource
///
/// Records cross this boundary as their JSON encoding.
pub trait ResourceDescriptor: Send + Sync {
    /// Canonical lower-cased name, used literally in URLs
    fn name(&self) -> &str;

    /// Identifier and reference annotations of the record type
    fn shape(&self) -> &RecordShape;

    /// Whether the resource permits `operation`
    fn supports(&self, operation: Operation) -> bool;

    fn list(&self) -> Result<Vec<Value>>;

    fn create(&self) -> Result<Value>;

    fn read(&self, id: i64) -> Result<Value>;

    /// Apply a partial update and return the stored record
    ///
    /// `body` is a JSON object mapping serialized field names to new values.
    /// Fields not present keep their current value. The record is read
    /// before `body` is decoded.
    fn update(&self, id: i64, body: &[u8]) -> Result<Value>;

    fn delete(&self, id: i64) -> Result<()>;
}

/// A record type bound to its accessors
pub struct Resource<T: Record> {
    shape: RecordShape,
    accessors: Accessors<T>,
}

impl<T: Record> Resource<T> {
    /// Register `T` with the shape declared by its [`Record`] impl
    pub fn new(accessors: Accessors<T>) -> Self {
        Self::with_shape(T::shape(), accessors)
    }

    /// Register `T` with an explicit shape
    pub fn with_shape(shape: RecordShape, accessors: Accessors<T>) -> Self {
        Self { shape, accessors }
    }

    fn not_allowed(&self, operation: Operation) -> BurrowError {
        BurrowError::NotAllowed {
            resource: self.shape.name().to_string(),
            operation,
        }
    }

    fn encode(&self, record: &T) -> Result<Value> {
        serde_json::to_value(record).map_err(|e| BurrowError::Marshal {
            resource: self.shape.name().to_string(),
            message: e.to_string(),
        })
    }
}

impl<T: Record> ResourceDescriptor for Resource<T> {
    fn name(&self) -> &str {
        self.shape.name()
    }

    fn shape(&self) -> &RecordShape {
        &self.shape
    }

    fn supports(&self, operation: Operation) -> bool {
        self.accessors.supports(operation)
    }

    fn list(&self) -> Result<Vec<Value>> {
        let list = self
            .accessors
            .list
            .as_ref()
            .ok_or_else(|| self.not_allowed(Operation::List))?;

        list()?.iter().map(|record| self.encode(record)).collect()
    }

    fn create(&self) -> Result<Value> {
        let create = self
            .accessors
            .create
            .as_ref()
            .ok_or_else(|| self.not_allowed(Operation::Create))?;

        self.encode(&create()?)
    }

    fn read(&self, id: i64) -> Result<Value> {
        let read = self
            .accessors
            .read
            .as_ref()
            .ok_or_else(|| self.not_allowed(Operation::Read))?;

        self.encode(&read(id)?)
    }

    fn update(&self, id: i64, body: &[u8]) -> Result<Value> {
        let update = self
            .accessors
            .update
            .as_ref()
            .ok_or_else(|| self.not_allowed(Operation::Update))?;
        let read = self
            .accessors
            .read
            .as_ref()
            .ok_or_else(|| self.not_allowed(Operation::Read))?;

        let mut current = match self.encode(&read(id)?)? {
            Value::Object(map) => map,
            other => {
                return Err(BurrowError::Marshal {
                    resource: self.shape.name().to_string(),
                    message: format!("expected a JSON object, found {}", json_kind(&other)),
                });
            }
        };

        let fields: Map<String, Value> =
            serde_json::from_slice(body).map_err(|e| BurrowError::InvalidBody {
                message: e.to_string(),
            })?;

        // Keys absent from the stored encoding may still be real fields
        // skipped while empty; they are confirmed after the round trip.
        let unconfirmed: Vec<String> = fields
            .keys()
            .filter(|field| !current.contains_key(*field))
            .cloned()
            .collect();
        current.extend(fields);

        let updated: T = serde_json::from_value(Value::Object(current)).map_err(|e| {
            BurrowError::InvalidFieldValue {
                resource: self.shape.name().to_string(),
                message: e.to_string(),
            }
        })?;

        let encoded = self.encode(&updated)?;
        if let Some(field) = unconfirmed
            .into_iter()
            .find(|field| encoded.get(field).is_none())
        {
            return Err(BurrowError::UnknownField {
                resource: self.shape.name().to_string(),
                field,
            });
        }

        update(updated)?;
        Ok(encoded)
    }

    fn delete(&self, id: i64) -> Result<()> {
        let delete = self
            .accessors
            .delete
            .as_ref()
            .ok_or_else(|| self.not_allowed(Operation::Delete))?;

        delete(id)
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
