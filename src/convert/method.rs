//! Method conversion: classifies a categorized method by its constituent
//! units, and rebuilds the categorized form from a simple configuration by
//! constructing the canonical catalog path.

use serde_json::{Map, Value};

use super::{SimplifiedCategorizedMethod, slug_in};
use crate::defaults;
use crate::types::{CategorizedMethod, CategorizedUnit, MethodConfig};

/// The compound path standing for "any plane-wave pseudopotential family".
const ANY_PSP_PATH: &str = "/qm/wf/none/psp/us::/qm/wf/none/psp/nc::/qm/wf/none/psp/nc-fr::/qm/wf/none/psp/paw::/qm/wf/none/pw/none";

const AO_POPLE_NAME: &str = "Wave function: LCAO - Pople basis set (6-31G)";
const AO_POPLE_PATH: &str = "/qm/wf/none/ao/pople?basisSlug=6-31G";
const AO_POPLE_BASIS: &str = "6-31G";

/// Converts a categorized method to its simple configuration.
///
/// Classification order: pseudopotential units win, then an atomic-orbital
/// unit, then a regression unit (recognized by its name); anything else,
/// including an absent input, is unknown.
pub fn to_simple(categorized: Option<&CategorizedMethod>) -> MethodConfig {
    let Some(categorized) = categorized else {
        return defaults::unknown_method_config();
    };

    let psp_units: Vec<&CategorizedUnit> = categorized
        .units
        .iter()
        .filter(|unit| slug_in(&unit.categories, "type").as_deref() == Some("psp"))
        .collect();
    if !psp_units.is_empty() {
        return psp_units_to_simple(&psp_units);
    }

    let ao_unit = categorized
        .units
        .iter()
        .find(|unit| slug_in(&unit.categories, "type").as_deref() == Some("ao"));
    if ao_unit.is_some() {
        return defaults::local_orbital_method_config();
    }

    if let Some(unit) = categorized
        .units
        .iter()
        .find(|unit| unit.name.contains("regression"))
    {
        return regression_unit_to_simple(unit);
    }

    defaults::unknown_method_config()
}

fn psp_units_to_simple(units: &[&CategorizedUnit]) -> MethodConfig {
    let Some(first) = units.first() else {
        return defaults::unknown_method_config();
    };
    let Some(subtype) = slug_in(&first.categories, "subtype") else {
        return defaults::unknown_method_config();
    };
    // More than one family in a single method means any family is acceptable.
    let subtype = if units.len() > 1 {
        "any".to_string()
    } else {
        subtype
    };
    MethodConfig::new("pseudopotential", subtype)
}

fn regression_unit_to_simple(unit: &CategorizedUnit) -> MethodConfig {
    let kind = slug_in(&unit.categories, "type").unwrap_or_else(|| "linear".to_string());
    let subtype =
        slug_in(&unit.categories, "subtype").unwrap_or_else(|| "least_squares".to_string());
    let mut config = MethodConfig::new(kind, subtype);
    config.precision = unit.precision;
    if let Some(Value::Object(data)) = &unit.data {
        config.data = data.clone();
    }
    config
}

/// Converts a simple method configuration to its categorized form.
///
/// Pseudopotential methods are resolved against `all_methods` by exact path
/// match and yield `None` when the catalog lacks the preset; local-orbital
/// and regression methods are synthesized without a lookup. Unrecognized
/// types yield `None`.
pub fn to_categorized(
    simple: Option<&MethodConfig>,
    all_methods: &[CategorizedMethod],
) -> Option<SimplifiedCategorizedMethod> {
    let simple = simple?;
    match simple.kind.as_str() {
        "pseudopotential" => psp_to_categorized(simple, all_methods),
        "localorbital" => Some(ao_to_categorized(simple)),
        "linear" | "kernel_ridge" => Some(regression_to_categorized(simple)),
        _ => None,
    }
}

fn psp_to_categorized(
    simple: &MethodConfig,
    all_methods: &[CategorizedMethod],
) -> Option<SimplifiedCategorizedMethod> {
    let subtype = match simple.subtype.slug() {
        "" => "us",
        slug => slug,
    };

    let path = if subtype == "any" {
        ANY_PSP_PATH.to_string()
    } else {
        format!(
            "/qm/wf/none/smearing/gaussian::/linalg/diag/none/davidson/none::/qm/wf/none/psp/{subtype}::/qm/wf/none/pw/none"
        )
    };

    all_methods
        .iter()
        .find(|categorized| categorized.path == path)
        .map(|categorized| SimplifiedCategorizedMethod {
            name: categorized.name.clone(),
            path: categorized.path.clone(),
            units: categorized.units.clone(),
        })
}

fn ao_to_categorized(simple: &MethodConfig) -> SimplifiedCategorizedMethod {
    let subtype = match simple.subtype.slug() {
        "" => "pople",
        slug => slug,
    };

    let mut parameters = Map::new();
    parameters.insert(
        "basisSlug".to_string(),
        Value::String(AO_POPLE_BASIS.to_string()),
    );
    let mut categories = Map::new();
    categories.insert("tier1".to_string(), Value::String("qm".to_string()));
    categories.insert("tier2".to_string(), Value::String("wf".to_string()));
    categories.insert("type".to_string(), Value::String("ao".to_string()));
    categories.insert("subtype".to_string(), Value::String(subtype.to_string()));

    let unit = CategorizedUnit {
        parameters,
        categories,
        tags: vec!["atomic orbital".to_string()],
        name: AO_POPLE_NAME.to_string(),
        path: AO_POPLE_PATH.to_string(),
        ..CategorizedUnit::default()
    };

    SimplifiedCategorizedMethod {
        name: AO_POPLE_NAME.to_string(),
        path: AO_POPLE_PATH.to_string(),
        units: vec![unit],
    }
}

fn regression_word(slug: &str) -> &str {
    match slug {
        "kernel_ridge" => "Kernel ridge",
        "linear" => "Linear",
        "least_squares" => "least squares",
        "ridge" => "ridge",
        other => other,
    }
}

fn regression_to_categorized(simple: &MethodConfig) -> SimplifiedCategorizedMethod {
    let kind = match simple.kind.as_str() {
        "" => "linear",
        slug => slug,
    };
    let subtype = match simple.subtype.slug() {
        "" => "least_squares",
        slug => slug,
    };

    let path = format!("/none/none/none/{kind}/{subtype}");
    let name = format!(
        "{} {} regression",
        regression_word(kind),
        regression_word(subtype)
    );

    let mut categories = Map::new();
    categories.insert("type".to_string(), Value::String(kind.to_string()));
    categories.insert("subtype".to_string(), Value::String(subtype.to_string()));

    let unit = CategorizedUnit {
        categories,
        name: name.clone(),
        path: path.clone(),
        precision: simple.precision,
        data: if simple.data.is_empty() {
            None
        } else {
            Some(Value::Object(simple.data.clone()))
        },
        ..CategorizedUnit::default()
    };

    SimplifiedCategorizedMethod {
        name,
        path,
        units: vec![unit],
    }
}
