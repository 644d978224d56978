//! Pseudopotential method: tracks the selected pseudopotential per chemical
//! element (`pseudo`) and the full candidate list (`allPseudo`), both inside
//! the method's data map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Method;
use crate::types::MethodConfig;

const PSEUDO_FIELD: &str = "pseudo";
const ALL_PSEUDO_FIELD: &str = "allPseudo";

/// One pseudopotential record. Everything besides the element symbol is
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pseudopotential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Pseudopotential {
    pub fn for_element(element: impl Into<String>) -> Self {
        Self {
            element: Some(element.into()),
            extra: Map::new(),
        }
    }

    fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if let Some(element) = &self.element {
            obj.insert("element".to_string(), Value::String(element.clone()));
        }
        obj.extend(self.extra.clone());
        Value::Object(obj)
    }
}

/// The exchange-correlation settings extracted from a subworkflow's model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeCorrelation {
    pub approximation: String,
    pub functional: String,
}

/// A method of the `pseudopotential` type.
#[derive(Debug, Clone, PartialEq)]
pub struct PseudopotentialMethod {
    method: Method,
}

impl PseudopotentialMethod {
    pub fn new(config: MethodConfig) -> Self {
        Self {
            method: Method::new(config),
        }
    }

    pub fn kind(&self) -> &str {
        self.method.kind()
    }

    pub fn subtype(&self) -> &str {
        self.method.subtype()
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn method_mut(&mut self) -> &mut Method {
        &mut self.method
    }

    fn list_field(&self, field: &str) -> Vec<Pseudopotential> {
        match self.method.data().get(field) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    fn store_list_field(&mut self, field: &str, mut pseudos: Vec<Pseudopotential>) {
        pseudos.sort_by(|a, b| a.element.cmp(&b.element));
        let values: Vec<Value> = pseudos.iter().map(Pseudopotential::to_value).collect();
        let mut data = self.method.data().clone();
        data.insert(field.to_string(), Value::Array(values));
        self.method.set_data(data);
    }

    /// The selected pseudopotentials, one per element.
    pub fn pseudo(&self) -> Vec<Pseudopotential> {
        self.list_field(PSEUDO_FIELD)
    }

    /// Every pseudopotential candidate known for the method.
    pub fn all_pseudo(&self) -> Vec<Pseudopotential> {
        self.list_field(ALL_PSEUDO_FIELD)
    }

    /// Replaces the selected list. Entries are deduplicated per element
    /// (the last one offered wins) and stored sorted by element symbol so
    /// serialized output is independent of insertion order.
    pub fn set_pseudopotentials(&mut self, pseudopotentials: Vec<Pseudopotential>) {
        let mut unique: Vec<Pseudopotential> = Vec::with_capacity(pseudopotentials.len());
        for pseudo in pseudopotentials {
            unique.retain(|existing| existing.element != pseudo.element);
            unique.push(pseudo);
        }
        self.store_list_field(PSEUDO_FIELD, unique);
    }

    /// Replaces the candidate list, sorted by element symbol. Candidates may
    /// legitimately repeat an element.
    pub fn set_all_pseudopotentials(&mut self, pseudopotentials: Vec<Pseudopotential>) {
        self.store_list_field(ALL_PSEUDO_FIELD, pseudopotentials);
    }

    /// Selects a pseudopotential for its element, replacing any previous
    /// selection for that element. `None` clears the whole selection.
    pub fn set_pseudopotential_per_element(&mut self, pseudo: Option<Pseudopotential>) {
        let Some(pseudo) = pseudo else {
            self.set_pseudopotentials(Vec::new());
            return;
        };
        let mut selected: Vec<Pseudopotential> = self
            .pseudo()
            .into_iter()
            .filter(|existing| existing.element != pseudo.element)
            .collect();
        selected.push(pseudo);
        self.set_pseudopotentials(selected);
    }

    pub fn add_to_all_pseudos(&mut self, pseudos: Vec<Pseudopotential>) {
        let mut all = self.all_pseudo();
        all.extend(pseudos);
        self.set_all_pseudopotentials(all);
    }

    pub fn has_pseudopotential_for(&self, element: &str) -> bool {
        self.pseudo()
            .iter()
            .any(|pseudo| pseudo.element.as_deref() == Some(element))
    }

    pub fn to_json(&self) -> Value {
        self.method.to_json()
    }

    /// Like [`Method::to_json_with_clean_data`], but always excludes the
    /// candidate list: `allPseudo` is client-side state and is never
    /// persisted with the owning workflow.
    pub fn to_json_with_clean_data(&self, fields_to_exclude: &[&str]) -> Value {
        let mut exclude: Vec<&str> = fields_to_exclude.to_vec();
        exclude.push(ALL_PSEUDO_FIELD);
        self.method.to_json_with_clean_data(&exclude)
    }

    /// Reads the exchange-correlation approximation and functional out of a
    /// subworkflow record's model.
    pub fn extract_exchange_correlation_from_subworkflow(
        subworkflow: &Value,
    ) -> ExchangeCorrelation {
        let model = subworkflow.get("model");
        let approximation = model
            .and_then(|m| m.get("subtype"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let functional = model
            .and_then(|m| m.get("functional"))
            .map(|f| match f {
                Value::String(slug) => slug.clone(),
                Value::Object(obj) => obj
                    .get("slug")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                _ => String::new(),
            })
            .unwrap_or_default();
        ExchangeCorrelation {
            approximation,
            functional,
        }
    }
}
