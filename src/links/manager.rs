//! Hyperlink derivation
//!
//! Builds the `links` map embedded in every response. Object links are
//! qualified with the host of the current request, so a [`LinkManager`] is
//! created per request and never cached. The root document's own `root` and
//! `self` stay the bare path `/`.
//!
//! URL scheme:
//! - index: `/{name}`
//! - object: `/{name}/{id}`
//! - root: `/`

use serde_json::Value;
use std::collections::BTreeMap;

use crate::core::error::{BurrowError, Result};
use crate::core::record::{find_identifier_value, resolve_references};
use crate::core::resource::ResourceDescriptor;
use crate::server::registry::Registry;

/// Link label to absolute URL
pub type Links = BTreeMap<String, String>;

pub const ROOT: &str = "root";
pub const SELF: &str = "self";

/// Label of a resource's index link (e.g. `"book index"`)
pub fn index_label(name: &str) -> String {
    format!("{} index", name)
}

/// Relative index URL of a resource
pub fn index_url(name: &str) -> String {
    format!("/{}", name.to_lowercase())
}

/// Relative URL of one object
pub fn object_url(name: &str, id: i64) -> String {
    format!("{}/{}", index_url(name), id)
}

/// Prefix a relative URL with `http://{host}`
///
/// URLs that already carry a scheme are returned unchanged, so qualifying
/// twice yields the same string.
pub fn qualify(host: &str, url: &str) -> String {
    if url.contains("://") {
        url.to_string()
    } else {
        format!("http://{}{}", host, url)
    }
}

/// Per-request link builder
pub struct LinkManager<'a> {
    registry: &'a Registry,
    host: String,
}

impl<'a> LinkManager<'a> {
    pub fn new(registry: &'a Registry, host: impl Into<String>) -> Self {
        Self {
            registry,
            host: host.into(),
        }
    }

    /// Host the links are qualified with
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Qualify a relative URL with this request's host
    pub fn link(&self, url: &str) -> String {
        qualify(&self.host, url)
    }

    pub fn index_link(&self, resource: &dyn ResourceDescriptor) -> String {
        self.link(&index_url(resource.name()))
    }

    /// Absolute URL of `record`, if its identifier can be read
    pub fn self_link(&self, resource: &dyn ResourceDescriptor, record: &Value) -> Option<String> {
        let id = find_identifier_value(resource.shape(), record)?;
        Some(self.link(&object_url(resource.name(), id)))
    }

    /// Absolute URL of object `id` of the resource named `target`
    pub fn specific_link(&self, target: &str, id: i64) -> Result<String> {
        let resource = self
            .registry
            .get(target)
            .ok_or_else(|| BurrowError::UnknownResource {
                name: target.to_string(),
            })?;
        Ok(self.link(&object_url(resource.name(), id)))
    }

    /// Discovery links: one index link per registered resource plus `root`
    /// and `self`, both the bare path `/`
    pub fn root_links(&self) -> Links {
        let mut links: Links = self
            .registry
            .iter()
            .map(|resource| {
                (
                    index_label(resource.name()),
                    self.index_link(resource.as_ref()),
                )
            })
            .collect();
        links.insert(ROOT.to_string(), "/".to_string());
        links.insert(SELF.to_string(), "/".to_string());
        links
    }

    /// Full link map for one record
    ///
    /// Always contains `root` and the resource's index link; contains `self`
    /// when the identifier is readable, and one entry per reference field.
    /// When two references share a label the later one wins.
    pub fn all_links_for(&self, resource: &dyn ResourceDescriptor, record: &Value) -> Result<Links> {
        let mut links = Links::new();
        links.insert(ROOT.to_string(), self.link("/"));
        links.insert(index_label(resource.name()), self.index_link(resource));

        if let Some(url) = self.self_link(resource, record) {
            links.insert(SELF.to_string(), url);
        }

        for reference in resolve_references(resource.shape(), record)? {
            let url = self.specific_link(&reference.target, reference.id)?;
            links.insert(reference.label, url);
        }

        Ok(links)
    }
}
