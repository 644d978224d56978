//! Model conversion: classifies a categorized model by its tier-3 category
//! and rebuilds the categorized form from a simple configuration.

use serde_json::{Map, Value};

use super::{SimplifiedCategorizedModel, slug_in};
use crate::defaults;
use crate::tree;
use crate::types::{CategorizedModel, ModelConfig, SlugLike};

/// Converts a categorized model to its simple configuration.
pub fn to_simple(categorized: Option<&CategorizedModel>) -> ModelConfig {
    let Some(categorized) = categorized else {
        return defaults::unknown_model_config();
    };
    match slug_in(&categorized.categories, "tier3").as_deref() {
        Some("dft") => dft_to_simple(categorized),
        Some("ml") => ModelConfig::of_type("ml", "re"),
        _ => defaults::unknown_model_config(),
    }
}

fn dft_to_simple(categorized: &CategorizedModel) -> ModelConfig {
    let Some(subtype) = slug_in(&categorized.categories, "subtype") else {
        return defaults::unknown_model_config();
    };
    let functional_slug = slug_in(&categorized.parameters, "functional").unwrap_or_default();

    let mut config = ModelConfig::of_type("dft", subtype);
    config.functional = Some(SlugLike::Named(tree::named_slug(&functional_slug)));
    config
}

/// Converts a simple model configuration to its categorized form.
///
/// DFT models are resolved against `all_models` by exact path match and
/// yield `None` when the catalog lacks the preset; ML models are synthesized
/// without a lookup. Unknown and unrecognized types yield `None`.
pub fn to_categorized(
    simple: Option<&ModelConfig>,
    all_models: &[CategorizedModel],
) -> Option<SimplifiedCategorizedModel> {
    let simple = simple?;
    match simple.kind.as_deref() {
        Some("dft") => dft_to_categorized(simple, all_models),
        Some("ml") => Some(ml_to_categorized(simple)),
        _ => None,
    }
}

fn default_functional_for(subtype: &str) -> &'static str {
    match subtype {
        "lda" => "pz",
        "gga" => "pbe",
        "hybrid" => "b3lyp",
        _ => "pbe",
    }
}

fn dft_to_categorized(
    simple: &ModelConfig,
    all_models: &[CategorizedModel],
) -> Option<SimplifiedCategorizedModel> {
    let subtype = simple
        .subtype
        .as_ref()
        .map(SlugLike::slug)
        .unwrap_or_default();
    let functional = match &simple.functional {
        Some(functional) if !functional.slug().is_empty() => functional.slug().to_string(),
        _ => default_functional_for(subtype).to_string(),
    };

    let path = format!("/pb/qm/dft/ksdft/{subtype}?functional={functional}");

    all_models
        .iter()
        .find(|categorized| categorized.path == path)
        .map(|categorized| SimplifiedCategorizedModel {
            name: categorized.name.clone(),
            path: categorized.path.clone(),
            categories: categorized.categories.clone(),
            parameters: categorized.parameters.clone(),
        })
}

fn ml_to_categorized(simple: &ModelConfig) -> SimplifiedCategorizedModel {
    let subtype = match simple.subtype.as_ref().map(SlugLike::slug) {
        Some("") | None => "re",
        Some(slug) => slug,
    };

    let mut categories = Map::new();
    categories.insert("tier1".to_string(), Value::String("st".to_string()));
    categories.insert("tier2".to_string(), Value::String("det".to_string()));
    categories.insert("tier3".to_string(), Value::String("ml".to_string()));
    categories.insert("type".to_string(), Value::String(subtype.to_string()));

    SimplifiedCategorizedModel {
        name: "Regression".to_string(),
        path: "/st/det/ml/re/none".to_string(),
        categories,
        parameters: Map::new(),
    }
}
