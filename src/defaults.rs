//! Default configurations and tree-derived allowed-method lookups.

use crate::tree;
use crate::types::{MethodConfig, ModelConfig, NamedSlug};

/// The default method configuration: ultrasoft pseudopotential.
pub fn pseudopotential_method_config() -> MethodConfig {
    MethodConfig::new("pseudopotential", "us")
}

/// The fixed local-orbital method configuration: Pople basis set.
pub fn local_orbital_method_config() -> MethodConfig {
    MethodConfig::new("localorbital", "pople")
}

/// The fixed unknown method configuration.
pub fn unknown_method_config() -> MethodConfig {
    MethodConfig::new("unknown", "unknown")
}

/// The default model configuration: DFT with the GGA approximation.
pub fn dft_model_config() -> ModelConfig {
    ModelConfig::of_type("dft", "gga")
}

/// The fixed unknown model configuration.
pub fn unknown_model_config() -> ModelConfig {
    ModelConfig::of_type("unknown", "unknown")
}

/// The method types allowed for a `(model type, model subtype)` pair, in
/// tree order. Empty when the pair is not in the tree.
pub fn allowed_method_types(model_kind: &str, model_subtype: &str) -> Vec<NamedSlug> {
    tree::branch_for_subtype(tree::MODEL_TREE, model_kind, model_subtype)
        .methods
        .iter()
        .map(|(kind, _)| tree::named_slug(kind))
        .collect()
}

/// The method subtypes allowed for a model pair and method type, in tree
/// order. Empty when any segment of the lookup is absent.
pub fn allowed_method_subtypes(
    model_kind: &str,
    model_subtype: &str,
    method_kind: &str,
) -> Vec<NamedSlug> {
    tree::branch_for_subtype(tree::MODEL_TREE, model_kind, model_subtype)
        .methods
        .iter()
        .find(|(kind, _)| *kind == method_kind)
        .map(|(_, subtypes)| subtypes.iter().map(|s| tree::named_slug(s)).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_method_is_ultrasoft_pseudopotential() {
        let config = pseudopotential_method_config();
        assert_eq!(config.kind, "pseudopotential");
        assert_eq!(config.subtype.slug(), "us");
    }

    #[test]
    fn allowed_method_types_follow_tree_order() {
        let types = allowed_method_types("dft", "gga");
        let slugs: Vec<&str> = types.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, ["pseudopotential", "localorbital", "unknown"]);
    }

    #[test]
    fn allowed_method_subtypes_carry_display_names() {
        let subtypes = allowed_method_subtypes("dft", "gga", "pseudopotential");
        assert_eq!(subtypes[0].slug, "paw");
        assert_eq!(subtypes[0].name.as_deref(), Some("Projector Augmented Wave"));
    }

    #[test]
    fn unknown_lookups_are_empty() {
        assert!(allowed_method_types("dft", "nope").is_empty());
        assert!(allowed_method_subtypes("dft", "gga", "nope").is_empty());
    }
}
