//! Resource registry
//!
//! Ordered collection of every resource exposed by one service. It is filled
//! before the server starts and only read afterwards, so handlers share it
//! behind an `Arc` without locking.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::core::error::ConfigError;
use crate::core::resource::ResourceDescriptor;

/// A reference whose target resource is not registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub resource: String,
    pub field: String,
    pub target: String,
}

/// Registry for all resources in the application
#[derive(Default)]
pub struct Registry {
    resources: IndexMap<String, Arc<dyn ResourceDescriptor>>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            resources: IndexMap::new(),
        }
    }

    /// Register a resource
    ///
    /// Fails when the shape is malformed or the name is already taken.
    pub fn register(&mut self, resource: impl ResourceDescriptor + 'static) -> Result<(), ConfigError> {
        self.register_arc(Arc::new(resource))
    }

    /// Register an already shared resource
    pub fn register_arc(&mut self, resource: Arc<dyn ResourceDescriptor>) -> Result<(), ConfigError> {
        resource.shape().validate()?;

        let key = resource.name().to_lowercase();
        if self.resources.contains_key(&key) {
            return Err(ConfigError::DuplicateResource { name: key });
        }

        self.resources.insert(key, resource);
        Ok(())
    }

    /// Look up a resource by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ResourceDescriptor>> {
        self.resources.get(&name.to_lowercase())
    }

    /// Resources in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ResourceDescriptor>> {
        self.resources.values()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// References naming resources that are not registered
    ///
    /// These still fail per request with `UnknownResource`; the list lets the
    /// server warn about them at startup.
    pub fn unresolved_references(&self) -> Vec<UnresolvedReference> {
        self.iter()
            .flat_map(|resource| {
                resource
                    .shape()
                    .reference_fields()
                    .into_iter()
                    .filter(|reference| self.get(reference.target).is_none())
                    .map(|reference| UnresolvedReference {
                        resource: resource.name().to_string(),
                        field: reference.field.to_string(),
                        target: reference.target.to_string(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
