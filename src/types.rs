use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A machine-readable slug paired with an optional human-readable name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSlug {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NamedSlug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: None,
        }
    }

    pub fn with_name(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: Some(name.into()),
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("slug".to_string(), Value::String(self.slug.clone()));
        if let Some(name) = &self.name {
            obj.insert("name".to_string(), Value::String(name.clone()));
        }
        Value::Object(obj)
    }
}

/// A slug given either as a bare string or as a `{slug, name}` object.
///
/// Configuration inputs accept both shapes; they are collapsed to a plain
/// slug exactly once, at the construction boundary of the value objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlugLike {
    Plain(String),
    Named(NamedSlug),
}

impl SlugLike {
    pub fn slug(&self) -> &str {
        match self {
            SlugLike::Plain(slug) => slug,
            SlugLike::Named(named) => &named.slug,
        }
    }

    pub fn into_slug(self) -> String {
        match self {
            SlugLike::Plain(slug) => slug,
            SlugLike::Named(named) => named.slug,
        }
    }
}

impl Default for SlugLike {
    fn default() -> Self {
        SlugLike::Plain(String::new())
    }
}

impl From<&str> for SlugLike {
    fn from(slug: &str) -> Self {
        SlugLike::Plain(slug.to_string())
    }
}

impl From<String> for SlugLike {
    fn from(slug: String) -> Self {
        SlugLike::Plain(slug)
    }
}

impl From<NamedSlug> for SlugLike {
    fn from(named: NamedSlug) -> Self {
        SlugLike::Named(named)
    }
}

/// The application context a model may be scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfo {
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ApplicationInfo {
    pub fn new(name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_name: short_name.into(),
            version: None,
        }
    }
}

/// One constituent unit of a categorized method preset.
///
/// Category and parameter values are open maps whose values may be bare
/// slugs or `{slug, name}` objects, depending on the catalog's vintage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedUnit {
    #[serde(default)]
    pub categories: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A categorized method preset from the external catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedMethod {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub units: Vec<CategorizedUnit>,
}

/// A categorized model preset from the external catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedModel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Map<String, Value>,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

/// The simple, flat method configuration used by calling applications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodConfig {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub subtype: SlugLike,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MethodConfig {
    pub fn new(kind: impl Into<String>, subtype: impl Into<SlugLike>) -> Self {
        Self {
            kind: kind.into(),
            subtype: subtype.into(),
            ..Self::default()
        }
    }
}

/// The simple, flat model configuration used by calling applications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<SlugLike>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<MethodConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functional: Option<SlugLike>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refiners: Option<Vec<SlugLike>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<SlugLike>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ApplicationInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelConfig {
    pub fn of_type(kind: impl Into<String>, subtype: impl Into<SlugLike>) -> Self {
        Self {
            kind: Some(kind.into()),
            subtype: Some(subtype.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slug_like_accepts_plain_string() {
        let slug: SlugLike = serde_json::from_value(json!("gga")).unwrap();
        assert_eq!(slug.slug(), "gga");
    }

    #[test]
    fn slug_like_accepts_named_object() {
        let slug: SlugLike =
            serde_json::from_value(json!({"slug": "gga", "name": "Generalized Gradient Approximation"}))
                .unwrap();
        assert_eq!(slug.slug(), "gga");
    }

    #[test]
    fn named_slug_without_name_serializes_slug_only() {
        let value = NamedSlug::new("pbe").to_value();
        assert_eq!(value, json!({"slug": "pbe"}));
    }

    #[test]
    fn method_config_preserves_unrecognized_fields() {
        let config: MethodConfig = serde_json::from_value(json!({
            "type": "pseudopotential",
            "subtype": "us",
            "searchTags": ["vasp"]
        }))
        .unwrap();
        assert_eq!(config.kind, "pseudopotential");
        assert_eq!(config.extra.get("searchTags"), Some(&json!(["vasp"])));
    }

    #[test]
    fn model_config_parses_rich_subtype_and_application() {
        let config: ModelConfig = serde_json::from_value(json!({
            "type": "dft",
            "subtype": {"slug": "lda"},
            "application": {"name": "espresso", "shortName": "qe", "version": "7.2"}
        }))
        .unwrap();
        assert_eq!(config.subtype.as_ref().unwrap().slug(), "lda");
        assert_eq!(config.application.as_ref().unwrap().short_name, "qe");
    }

    #[test]
    fn categorized_method_tolerates_missing_fields() {
        let method: CategorizedMethod = serde_json::from_value(json!({
            "path": "/qm/wf/none/pw/none"
        }))
        .unwrap();
        assert!(method.name.is_empty());
        assert!(method.units.is_empty());
    }
}
