//! Method value objects.
//!
//! A [`Method`] wraps a `{type, subtype, data}` configuration. Type and
//! subtype are plain slug strings after construction regardless of the shape
//! the caller supplied; the open `data` map is always replaced wholesale by
//! setters, never mutated in place.

mod factory;
mod pseudopotential;

pub use factory::{AnyMethod, MethodFactory};
pub use pseudopotential::{ExchangeCorrelation, Pseudopotential, PseudopotentialMethod};

use serde_json::{Map, Value};

use crate::defaults;
use crate::types::{MethodConfig, SlugLike};

/// A computational method: the technique used to realize a model.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    kind: String,
    subtype: String,
    precision: Option<f64>,
    data: Map<String, Value>,
    extra: Map<String, Value>,
}

impl Method {
    pub fn new(config: MethodConfig) -> Self {
        Self {
            kind: config.kind,
            subtype: config.subtype.into_slug(),
            precision: config.precision,
            data: config.data,
            extra: config.extra,
        }
    }

    /// The default method configuration (ultrasoft pseudopotential).
    pub fn default_config() -> MethodConfig {
        defaults::pseudopotential_method_config()
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn set_subtype(&mut self, subtype: impl Into<SlugLike>) {
        self.subtype = subtype.into().into_slug();
    }

    pub fn is_unknown(&self) -> bool {
        self.kind == "unknown"
    }

    pub fn precision(&self) -> Option<f64> {
        self.precision
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Replaces the data map wholesale.
    pub fn set_data(&mut self, data: Map<String, Value>) {
        self.data = data;
    }

    pub fn search_text(&self) -> &str {
        self.data
            .get("searchText")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn set_search_text(&mut self, search_text: impl Into<String>) {
        let mut data = self.data.clone();
        data.insert(
            "searchText".to_string(),
            Value::String(search_text.into()),
        );
        self.set_data(data);
    }

    /// True when the method carries no information worth hashing: no data
    /// fields besides an empty `searchText`.
    pub fn omit_in_hash_calculation(&self) -> bool {
        let has_other_fields = self.data.keys().any(|key| key != "searchText");
        self.search_text().is_empty() && !has_other_fields
    }

    /// The data map with the given fields removed.
    pub fn clean_data(&self, fields_to_exclude: &[&str]) -> Map<String, Value> {
        let mut filtered = self.data.clone();
        for field in fields_to_exclude {
            filtered.shift_remove(*field);
        }
        filtered
    }

    pub fn to_json(&self) -> Value {
        let mut obj = self.extra.clone();
        obj.insert("type".to_string(), Value::String(self.kind.clone()));
        obj.insert("subtype".to_string(), Value::String(self.subtype.clone()));
        obj.insert("data".to_string(), Value::Object(self.data.clone()));
        if let Some(precision) = self.precision {
            obj.insert("precision".to_string(), precision.into());
        }
        Value::Object(obj)
    }

    pub fn to_json_with_clean_data(&self, fields_to_exclude: &[&str]) -> Value {
        let mut json = self.to_json();
        if let Value::Object(obj) = &mut json {
            obj.insert(
                "data".to_string(),
                Value::Object(self.clean_data(fields_to_exclude)),
            );
        }
        json
    }

    pub fn clone_without_data(&self) -> Self {
        let mut cloned = self.clone();
        cloned.data = Map::new();
        cloned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn method_with_data(data: Value) -> Method {
        let config: MethodConfig = serde_json::from_value(json!({
            "type": "pseudopotential",
            "subtype": "us",
            "data": data,
        }))
        .unwrap();
        Method::new(config)
    }

    #[test]
    fn subtype_normalized_from_named_object() {
        let config: MethodConfig = serde_json::from_value(json!({
            "type": "pseudopotential",
            "subtype": {"slug": "paw", "name": "Projector Augmented Wave"},
        }))
        .unwrap();
        let mut method = Method::new(config);
        assert_eq!(method.subtype(), "paw");

        method.set_subtype(crate::types::NamedSlug::with_name("us", "Ultrasoft"));
        assert_eq!(method.subtype(), "us");
    }

    #[test]
    fn search_text_round_trips_through_data() {
        let mut method = method_with_data(json!({}));
        assert_eq!(method.search_text(), "");
        method.set_search_text("norm conserving");
        assert_eq!(method.search_text(), "norm conserving");
    }

    #[test]
    fn omitted_from_hash_only_when_data_is_trivial() {
        assert!(method_with_data(json!({})).omit_in_hash_calculation());
        assert!(method_with_data(json!({"searchText": ""})).omit_in_hash_calculation());
        assert!(!method_with_data(json!({"searchText": "x"})).omit_in_hash_calculation());
        assert!(!method_with_data(json!({"pseudo": []})).omit_in_hash_calculation());
    }

    #[test]
    fn clean_data_removes_requested_fields() {
        let method = method_with_data(json!({"pseudo": [], "searchText": "x"}));
        let cleaned = method.clean_data(&["pseudo"]);
        assert!(!cleaned.contains_key("pseudo"));
        assert!(cleaned.contains_key("searchText"));
    }

    #[test]
    fn to_json_preserves_extra_fields_and_precision() {
        let config: MethodConfig = serde_json::from_value(json!({
            "type": "linear",
            "subtype": "least_squares",
            "precision": 0.01,
            "tags": ["ml"],
        }))
        .unwrap();
        let json = Method::new(config).to_json();
        assert_eq!(json["type"], "linear");
        assert_eq!(json["precision"], 0.01);
        assert_eq!(json["tags"], json!(["ml"]));
    }

    #[test]
    fn clone_without_data_empties_data_only() {
        let method = method_with_data(json!({"pseudo": [{"element": "Si"}]}));
        let cloned = method.clone_without_data();
        assert!(cloned.data().is_empty());
        assert_eq!(cloned.kind(), "pseudopotential");
        assert!(!method.data().is_empty());
    }
}
