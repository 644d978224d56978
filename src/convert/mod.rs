//! Bidirectional conversion between simple and categorized representations.
//!
//! "Simple" is the flat `{type, subtype, ...}` shape used by calling
//! applications; "categorized" is the path-keyed, tier-classified shape used
//! by external preset catalogs. Conversion is lossy in both directions by
//! construction: several pseudopotential families collapse to the single
//! `any` subtype, and a constructed path with no catalog entry degrades to
//! `None` rather than an error, since the catalog is an open-ended external
//! asset that need not contain every valid combination.
//!
//! The path strings built here are exact-match lookup keys against the
//! catalog and must be reproduced byte-for-byte.

pub mod method;
pub mod model;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::CategorizedUnit;

/// A categorized method produced by conversion. Transient: only the fields
/// the conversion layer works with, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimplifiedCategorizedMethod {
    pub name: String,
    pub path: String,
    pub units: Vec<CategorizedUnit>,
}

/// A categorized model produced by conversion. Transient, like its method
/// counterpart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimplifiedCategorizedModel {
    pub name: String,
    pub path: String,
    pub categories: Map<String, Value>,
    pub parameters: Map<String, Value>,
}

/// Extracts a slug from a value that may be a bare string or a
/// `{slug, ...}` object.
pub(crate) fn value_slug(value: &Value) -> Option<&str> {
    match value {
        Value::String(slug) => Some(slug),
        Value::Object(obj) => obj.get("slug").and_then(Value::as_str),
        _ => None,
    }
}

/// The slug stored under one key of a categories/parameters map.
pub(crate) fn slug_in(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(value_slug).map(str::to_string)
}
