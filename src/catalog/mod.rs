//! Embedded preset catalog and model→method compatibility rules.
//!
//! The catalog is a read-only list of categorized model and method presets,
//! keyed by canonical path. It is the default source the conversion layer
//! scans; callers with their own catalog pass their slices instead. All
//! embedded data is parsed once on first access.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::convert::slug_in;
use crate::types::{CategorizedMethod, CategorizedModel};

const CATEGORIZED_METHODS_JSON: &str = include_str!("../../resources/categorized_methods.json");
const CATEGORIZED_MODELS_JSON: &str = include_str!("../../resources/categorized_models.json");
const METHOD_COMPATIBILITY_JSON: &str =
    include_str!("../../resources/method_compatibility.json");

static CATEGORIZED_METHODS: OnceLock<Vec<CategorizedMethod>> = OnceLock::new();
static CATEGORIZED_MODELS: OnceLock<Vec<CategorizedModel>> = OnceLock::new();
static COMPATIBILITY: OnceLock<Node> = OnceLock::new();

/// The embedded categorized method presets.
pub fn categorized_methods() -> &'static [CategorizedMethod] {
    CATEGORIZED_METHODS.get_or_init(|| {
        serde_json::from_str(CATEGORIZED_METHODS_JSON)
            .expect("Failed to parse embedded method catalog. This is a library bug.")
    })
}

/// The embedded categorized model presets.
pub fn categorized_models() -> &'static [CategorizedModel] {
    CATEGORIZED_MODELS.get_or_init(|| {
        serde_json::from_str(CATEGORIZED_MODELS_JSON)
            .expect("Failed to parse embedded model catalog. This is a library bug.")
    })
}

/// The embedded method preset with exactly this path, if any.
pub fn find_method_by_path(path: &str) -> Option<&'static CategorizedMethod> {
    categorized_methods()
        .iter()
        .find(|method| method.path == path)
}

/// The embedded model preset with exactly this path, if any.
pub fn find_model_by_path(path: &str) -> Option<&'static CategorizedModel> {
    categorized_models().iter().find(|model| model.path == path)
}

// The compatibility map nests category tiers down to a rule list; rules are
// either exact unit paths or regexes over them.

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRule {
    Path { path: String },
    Pattern { regex: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNode {
    Rules(Vec<RawRule>),
    Children(HashMap<String, RawNode>),
}

#[derive(Debug)]
enum Rule {
    Path(String),
    Pattern(Regex),
}

impl Rule {
    fn matches(&self, fragment: &str) -> bool {
        match self {
            Rule::Path(path) => path == fragment,
            Rule::Pattern(pattern) => pattern.is_match(fragment),
        }
    }
}

#[derive(Debug)]
enum Node {
    Rules(Vec<Rule>),
    Children(HashMap<String, Node>),
}

fn build_node(raw: RawNode) -> Node {
    match raw {
        RawNode::Rules(rules) => Node::Rules(
            rules
                .into_iter()
                .map(|rule| match rule {
                    RawRule::Path { path } => Rule::Path(path),
                    RawRule::Pattern { regex } => Rule::Pattern(
                        Regex::new(&regex).expect(
                            "Failed to compile embedded compatibility rule. This is a library bug.",
                        ),
                    ),
                })
                .collect(),
        ),
        RawNode::Children(children) => Node::Children(
            children
                .into_iter()
                .map(|(key, child)| (key, build_node(child)))
                .collect(),
        ),
    }
}

fn compatibility_map() -> &'static Node {
    COMPATIBILITY.get_or_init(|| {
        let raw: RawNode = serde_json::from_str(METHOD_COMPATIBILITY_JSON)
            .expect("Failed to parse embedded compatibility map. This is a library bug.");
        build_node(raw)
    })
}

const CATEGORY_TIERS: [&str; 5] = ["tier1", "tier2", "tier3", "type", "subtype"];

fn rules_for_categories(categories: &Map<String, Value>) -> Option<&'static [Rule]> {
    let mut node = compatibility_map();
    for tier in CATEGORY_TIERS {
        match node {
            Node::Rules(rules) => return Some(rules),
            Node::Children(children) => {
                let slug = slug_in(categories, tier)?;
                node = children.get(&slug)?;
            }
        }
    }
    match node {
        Node::Rules(rules) => Some(rules),
        Node::Children(_) => None,
    }
}

/// Filters categorized methods down to the ones compatible with a
/// categorized model.
///
/// The model's category tiers select a rule list from the compatibility map;
/// a method is compatible when every `::`-separated fragment of its path
/// satisfies at least one rule. A model whose categories reach no rule list
/// has no compatible methods.
pub fn filter_methods_by_model<'a>(
    model: &CategorizedModel,
    methods: &'a [CategorizedMethod],
) -> Vec<&'a CategorizedMethod> {
    let Some(rules) = rules_for_categories(&model.categories) else {
        return Vec::new();
    };
    methods
        .iter()
        .filter(|method| {
            method
                .path
                .split("::")
                .all(|fragment| rules.iter().any(|rule| rule.matches(fragment)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalogs_parse() {
        assert!(!categorized_methods().is_empty());
        assert!(!categorized_models().is_empty());
    }

    #[test]
    fn finds_presets_by_exact_path() {
        let model = find_model_by_path("/pb/qm/dft/ksdft/gga?functional=pbe").unwrap();
        assert_eq!(model.name, "DFT GGA PBE");

        let method = find_method_by_path(
            "/qm/wf/none/smearing/gaussian::/linalg/diag/none/davidson/none::/qm/wf/none/psp/us::/qm/wf/none/pw/none",
        )
        .unwrap();
        assert_eq!(method.name, "Plane-wave pseudopotential: ultrasoft");

        assert!(find_model_by_path("/pb/qm/dft/ksdft/gga?functional=nope").is_none());
    }

    #[test]
    fn gga_model_accepts_plane_wave_psp_methods() {
        let model = find_model_by_path("/pb/qm/dft/ksdft/gga?functional=pbe").unwrap();
        let compatible = filter_methods_by_model(model, categorized_methods());
        let names: Vec<&str> = compatible.iter().map(|m| m.name.as_str()).collect();
        assert!(names.contains(&"Plane-wave pseudopotential: ultrasoft"));
        assert!(names.contains(&"Plane-wave pseudopotential (any)"));
        assert!(!names.contains(&"Wave function: LCAO - Pople basis set (6-31G)"));
        assert!(!names.contains(&"Linear least squares regression"));
    }

    #[test]
    fn hybrid_model_additionally_accepts_pople_basis() {
        let model = find_model_by_path("/pb/qm/dft/ksdft/hybrid?functional=b3lyp").unwrap();
        let compatible = filter_methods_by_model(model, categorized_methods());
        assert!(
            compatible
                .iter()
                .any(|m| m.name == "Wave function: LCAO - Pople basis set (6-31G)")
        );
    }

    #[test]
    fn regression_model_accepts_only_regression_methods() {
        let model = find_model_by_path("/st/det/ml/re/none").unwrap();
        let compatible = filter_methods_by_model(model, categorized_methods());
        assert!(!compatible.is_empty());
        assert!(compatible.iter().all(|m| m.tags.contains(&"regression".to_string())));
    }

    #[test]
    fn unmapped_categories_have_no_compatible_methods() {
        let model = CategorizedModel::default();
        assert!(filter_methods_by_model(&model, categorized_methods()).is_empty());
    }
}
