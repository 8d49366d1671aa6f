//! Record shapes and introspection
//!
//! A [`RecordShape`] describes how a record type participates in the hypermedia
//! layer: which serialized field is its identifier and which fields reference
//! other resources. Field names are the names the record serializes to, so
//! `#[serde(rename_all = "PascalCase")]` on the struct means annotations use
//! `"Id"`, `"LibraryId"` and so on.
//!
//! Introspection reads values from the record's JSON encoding. This keeps the
//! link layer generic over every record type without runtime reflection.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::error::{BurrowError, ConfigError, Result};

/// Annotation attached to one serialized field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// The field holds the record's numeric identifier
    Identifier,

    /// The field holds the identifier of a record of another resource
    Reference { target: String, label: String },
}

/// A field name paired with its annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAnnotation {
    pub field: String,
    pub annotation: Annotation,
}

/// Borrowed view of a reference annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceField<'a> {
    /// Name of the referenced resource
    pub target: &'a str,
    /// Key used in the link map
    pub label: &'a str,
    /// Serialized field holding the referenced id
    pub field: &'a str,
}

/// A reference resolved against one record value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    pub target: String,
    pub label: String,
    pub id: i64,
}

/// Annotation descriptor for a record type
///
/// # Example
///
/// ```
/// use burrow::core::record::RecordShape;
///
/// let shape = RecordShape::new("Book")
///     .identifier("Id")
///     .reference_as("LibraryId", "library", "owner");
///
/// assert_eq!(shape.name(), "book");
/// assert_eq!(shape.identifier_field(), Some("Id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordShape {
    name: String,
    annotations: Vec<FieldAnnotation>,
}

impl RecordShape {
    /// Create a shape for the resource `name` (stored lower-cased)
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_lowercase(),
            annotations: Vec::new(),
        }
    }

    /// Mark `field` as the identifier
    pub fn identifier(mut self, field: impl Into<String>) -> Self {
        self.annotations.push(FieldAnnotation {
            field: field.into(),
            annotation: Annotation::Identifier,
        });
        self
    }

    /// Mark `field` as referencing `target`, labelled with the target's name
    pub fn reference(self, field: impl Into<String>, target: impl Into<String>) -> Self {
        let target = target.into();
        let label = target.clone();
        self.reference_as(field, target, label)
    }

    /// Mark `field` as referencing `target` under a custom link label
    pub fn reference_as(
        mut self,
        field: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.annotations.push(FieldAnnotation {
            field: field.into(),
            annotation: Annotation::Reference {
                target: target.into(),
                label: label.into(),
            },
        });
        self
    }

    /// Canonical (lower-cased) resource name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All annotations in declaration order
    pub fn annotations(&self) -> &[FieldAnnotation] {
        &self.annotations
    }

    /// First field marked as the identifier, in declaration order
    pub fn identifier_field(&self) -> Option<&str> {
        self.annotations
            .iter()
            .find(|a| a.annotation == Annotation::Identifier)
            .map(|a| a.field.as_str())
    }

    /// Every reference annotation, in declaration order
    pub fn reference_fields(&self) -> Vec<ReferenceField<'_>> {
        self.annotations
            .iter()
            .filter_map(|a| match &a.annotation {
                Annotation::Reference { target, label } => Some(ReferenceField {
                    target,
                    label,
                    field: &a.field,
                }),
                Annotation::Identifier => None,
            })
            .collect()
    }

    /// Check the shape for configuration mistakes
    ///
    /// Rejects an empty name, several identifier fields, fields annotated more
    /// than once and references with an empty target. Duplicate link labels are
    /// allowed; the last reference wins when links are built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }

        let mut identifier: Option<&str> = None;
        for (index, current) in self.annotations.iter().enumerate() {
            if self.annotations[..index]
                .iter()
                .any(|earlier| earlier.field == current.field)
            {
                return Err(ConfigError::DuplicateAnnotation {
                    resource: self.name.clone(),
                    field: current.field.clone(),
                });
            }

            match &current.annotation {
                Annotation::Identifier => {
                    if let Some(first) = identifier {
                        return Err(ConfigError::DuplicateIdentifier {
                            resource: self.name.clone(),
                            first: first.to_string(),
                            second: current.field.clone(),
                        });
                    }
                    identifier = Some(&current.field);
                }
                Annotation::Reference { target, .. } if target.trim().is_empty() => {
                    return Err(ConfigError::EmptyReferenceTarget {
                        resource: self.name.clone(),
                        field: current.field.clone(),
                    });
                }
                Annotation::Reference { .. } => {}
            }
        }

        Ok(())
    }
}

/// Adapter implemented once per record type
///
/// Usually generated with [`impl_record!`](crate::impl_record).
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Describe the record's identifier and reference fields
    fn shape() -> RecordShape;
}

/// Name of the identifier field, if the shape declares one
pub fn find_identifier_field(shape: &RecordShape) -> Option<&str> {
    shape.identifier_field()
}

/// Read the identifier from an encoded record
///
/// Returns `None` when the shape has no identifier or the value is missing or
/// not an integer. A malformed record loses its `self` link instead of failing
/// the whole response.
pub fn find_identifier_value(shape: &RecordShape, record: &Value) -> Option<i64> {
    let field = shape.identifier_field()?;
    record.get(field).and_then(Value::as_i64)
}

/// Reference annotations of a shape, in declaration order
pub fn find_reference_fields(shape: &RecordShape) -> Vec<ReferenceField<'_>> {
    shape.reference_fields()
}

/// Read every reference value from an encoded record
///
/// Unlike the identifier, a reference that does not hold an integer is an
/// error: it means the record type is declared incorrectly.
pub fn resolve_references(shape: &RecordShape, record: &Value) -> Result<Vec<ResolvedReference>> {
    shape
        .reference_fields()
        .into_iter()
        .map(|reference| {
            let id = record
                .get(reference.field)
                .and_then(Value::as_i64)
                .ok_or_else(|| BurrowError::InvalidReference {
                    resource: shape.name().to_string(),
                    field: reference.field.to_string(),
                })?;

            Ok(ResolvedReference {
                target: reference.target.to_string(),
                label: reference.label.to_string(),
                id,
            })
        })
        .collect()
}
