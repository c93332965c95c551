//! Resource definitions: a human-readable label paired with a backing collection.

use crate::error::AppError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One REST resource mapped 1:1 to a stored collection. Immutable after startup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    /// Label used in envelopes and messages, e.g. "Producto".
    pub label: String,
    /// Collection name, also the URL mount segment, e.g. "productos".
    pub collection: String,
}

impl Resource {
    pub fn new(label: impl Into<String>, collection: impl Into<String>) -> Result<Self, AppError> {
        let label = label.into();
        let collection = collection.into();
        if label.trim().is_empty() {
            return Err(AppError::Config("resource label must not be empty".into()));
        }
        validate_collection_name(&collection)?;
        Ok(Self { label, collection })
    }
}

/// Collection names reach DDL and query text as identifiers, so only a safe
/// subset is accepted: lowercase ascii, digits and underscores, max 63 bytes
/// (the PostgreSQL identifier limit).
pub fn validate_collection_name(name: &str) -> Result<(), AppError> {
    let re = Regex::new("^[a-z][a-z0-9_]*$").map_err(|e| AppError::Config(e.to_string()))?;
    if name.len() > 63 || !re.is_match(name) {
        return Err(AppError::Config(format!(
            "invalid collection name '{}': expected [a-z][a-z0-9_]*, max 63 chars",
            name
        )));
    }
    Ok(())
}

/// Parse the `Label:collection,Label:collection` config syntax into resource
/// definitions. Duplicate collections are rejected since each one becomes a
/// distinct mount point and table.
pub fn parse_resources(raw: &str) -> Result<Vec<Resource>, AppError> {
    let mut out: Vec<Resource> = Vec::new();
    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (label, collection) = entry.split_once(':').ok_or_else(|| {
            AppError::Config(format!(
                "invalid resource entry '{}': expected Label:collection",
                entry
            ))
        })?;
        let resource = Resource::new(label.trim(), collection.trim())?;
        if out.iter().any(|r| r.collection == resource.collection) {
            return Err(AppError::Config(format!(
                "duplicate collection '{}'",
                resource.collection
            )));
        }
        out.push(resource);
    }
    if out.is_empty() {
        return Err(AppError::Config("no resources configured".into()));
    }
    Ok(out)
}
