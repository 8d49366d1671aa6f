//! Response payload assembly
//!
//! Merges a record's JSON encoding with its link map under the `links` key.

use serde_json::{Map, Value};

use crate::core::error::{BurrowError, Result};
use crate::core::resource::{ResourceDescriptor, json_kind};
use crate::links::manager::{LinkManager, Links};

/// Bytes reserved per object when assembling a list
const BYTES_PER_OBJECT: usize = 100;

/// Encode one record with its `links` map
pub fn marshal_one(
    manager: &LinkManager<'_>,
    resource: &dyn ResourceDescriptor,
    record: Value,
) -> Result<Vec<u8>> {
    let links = manager.all_links_for(resource, &record)?;

    let mut object = match record {
        Value::Object(map) => map,
        other => {
            return Err(BurrowError::Marshal {
                resource: resource.name().to_string(),
                message: format!("expected a JSON object, found {}", json_kind(&other)),
            });
        }
    };
    object.insert("links".to_string(), links_value(links));

    serde_json::to_vec(&Value::Object(object)).map_err(|e| BurrowError::Marshal {
        resource: resource.name().to_string(),
        message: e.to_string(),
    })
}

/// Encode a list of records as a JSON array
///
/// The first failing record aborts the whole list.
pub fn marshal_many(
    manager: &LinkManager<'_>,
    resource: &dyn ResourceDescriptor,
    records: Vec<Value>,
) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(records.len() * BYTES_PER_OBJECT + 2);
    bytes.push(b'[');
    for (index, record) in records.into_iter().enumerate() {
        if index > 0 {
            bytes.push(b',');
        }
        bytes.extend(marshal_one(manager, resource, record)?);
    }
    bytes.push(b']');
    Ok(bytes)
}

/// Encode the root discovery document `{"links": {...}}`
pub fn marshal_root(manager: &LinkManager<'_>) -> Result<Vec<u8>> {
    let mut object = Map::new();
    object.insert("links".to_string(), links_value(manager.root_links()));

    serde_json::to_vec(&Value::Object(object)).map_err(|e| BurrowError::Marshal {
        resource: "root".to_string(),
        message: e.to_string(),
    })
}

fn links_value(links: Links) -> Value {
    Value::Object(
        links
            .into_iter()
            .map(|(label, url)| (label, Value::String(url)))
            .collect(),
    )
}
