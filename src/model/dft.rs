//! DFT model: extends the base model with an exchange-correlation
//! functional and optional refiners/modifiers.

use serde_json::Value;

use super::{Model, join_group_slug};
use crate::method::MethodFactory;
use crate::tree;
use crate::types::{ModelConfig, NamedSlug, SlugLike};

/// A model of the `dft` type.
#[derive(Debug, Clone)]
pub struct DftModel {
    model: Model,
    functional: NamedSlug,
    refiners: Vec<NamedSlug>,
    modifiers: Vec<NamedSlug>,
}

impl DftModel {
    pub fn new(mut config: ModelConfig) -> Self {
        let functional_config = config.functional.take();
        let refiners = config.refiners.take().unwrap_or_default();
        let modifiers = config.modifiers.take().unwrap_or_default();

        let model = Model::new(config);
        let functional = match functional_config {
            Some(functional) => tree::to_named(&functional),
            None => default_functional_of(&model),
        };

        Self {
            model,
            functional,
            refiners: refiners.iter().map(tree::to_named).collect(),
            modifiers: modifiers.iter().map(tree::to_named).collect(),
        }
    }

    pub fn as_model(&self) -> &Model {
        &self.model
    }

    pub fn kind(&self) -> &str {
        self.model.kind()
    }

    pub fn subtype(&self) -> &str {
        self.model.subtype()
    }

    pub fn method(&self) -> &crate::method::AnyMethod {
        self.model.method()
    }

    /// The first functional allowed for the current subtype, falling back
    /// to PBE for branches without functionals.
    pub fn default_functional(&self) -> NamedSlug {
        default_functional_of(&self.model)
    }

    pub fn functional(&self) -> &NamedSlug {
        &self.functional
    }

    pub fn refiners(&self) -> &[NamedSlug] {
        &self.refiners
    }

    pub fn modifiers(&self) -> &[NamedSlug] {
        &self.modifiers
    }

    /// Changes the subtype and resets the functional to the new subtype's
    /// first allowed entry (which in turn regenerates the default method).
    pub fn set_subtype(&mut self, subtype: impl Into<SlugLike>) {
        self.model.set_subtype(subtype);
        let functional = self.default_functional();
        self.set_functional(functional);
    }

    /// Changes the functional and regenerates the default method
    /// configuration for the current branch.
    pub fn set_functional(&mut self, functional: impl Into<SlugLike>) {
        self.functional = tree::to_named(&functional.into());
        let method_config = self.model.default_method_config();
        self.model.set_method(MethodFactory::create(method_config));
    }

    pub fn set_refiners(&mut self, refiners: Vec<SlugLike>) {
        self.refiners = refiners.iter().map(tree::to_named).collect();
    }

    pub fn set_modifiers(&mut self, modifiers: Vec<SlugLike>) {
        self.modifiers = modifiers.iter().map(tree::to_named).collect();
    }

    pub fn all_functionals(&self) -> Vec<NamedSlug> {
        self.model
            .tree_branch_for_subtype()
            .functionals
            .iter()
            .map(|slug| tree::named_slug(slug))
            .collect()
    }

    pub fn all_refiners(&self) -> Vec<NamedSlug> {
        self.model
            .tree_branch_for_subtype()
            .refiners
            .iter()
            .map(|slug| tree::named_slug(slug))
            .collect()
    }

    pub fn all_modifiers(&self) -> Vec<NamedSlug> {
        self.model
            .tree_branch_for_subtype()
            .modifiers
            .iter()
            .map(|slug| tree::named_slug(slug))
            .collect()
    }

    /// Like [`Model::group_slug`], extended with the functional and the
    /// `+`-joined refiner and modifier slugs.
    pub fn group_slug(&self) -> String {
        let short_name = self
            .model
            .application()
            .map(|app| app.short_name.as_str())
            .unwrap_or("");
        let refiners = join_plus(&self.refiners);
        let modifiers = join_plus(&self.modifiers);
        join_group_slug([
            short_name,
            self.model.kind(),
            self.model.subtype(),
            self.functional.slug.as_str(),
            refiners.as_str(),
            modifiers.as_str(),
        ])
    }

    /// Base model JSON extended with the functional (slug only), refiners,
    /// and modifiers.
    pub fn to_json(&self) -> Value {
        let mut json = self.model.to_json();
        if let Value::Object(obj) = &mut json {
            obj.insert(
                "functional".to_string(),
                NamedSlug::new(self.functional.slug.as_str()).to_value(),
            );
            obj.insert(
                "refiners".to_string(),
                Value::Array(self.refiners.iter().map(NamedSlug::to_value).collect()),
            );
            obj.insert(
                "modifiers".to_string(),
                Value::Array(self.modifiers.iter().map(NamedSlug::to_value).collect()),
            );
        }
        json
    }
}

fn default_functional_of(model: &Model) -> NamedSlug {
    match model.tree_branch_for_subtype().functionals.first() {
        Some(slug) => tree::named_slug(slug),
        None => tree::named_slug("pbe"),
    }
}

fn join_plus(slugs: &[NamedSlug]) -> String {
    slugs
        .iter()
        .map(|slug| slug.slug.as_str())
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn functional_defaults_to_first_allowed() {
        let gga = DftModel::new(ModelConfig::of_type("dft", "gga"));
        assert_eq!(gga.functional().slug, "pbe");

        let lda = DftModel::new(ModelConfig::of_type("dft", "lda"));
        assert_eq!(lda.functional().slug, "pz");

        let hybrid = DftModel::new(ModelConfig::of_type("dft", "hybrid"));
        assert_eq!(hybrid.functional().slug, "b3lyp");
    }

    #[test]
    fn explicit_functional_is_kept() {
        let config: ModelConfig = serde_json::from_value(json!({
            "type": "dft",
            "subtype": "gga",
            "functional": "pbesol",
        }))
        .unwrap();
        let model = DftModel::new(config);
        assert_eq!(model.functional().slug, "pbesol");
        assert_eq!(model.functional().name.as_deref(), Some("PBE for Solids"));
    }

    #[test]
    fn set_subtype_resets_functional() {
        let mut model = DftModel::new(ModelConfig::of_type("dft", "gga"));
        model.set_functional("pw91");
        assert_eq!(model.functional().slug, "pw91");

        model.set_subtype("lda");
        assert_eq!(model.functional().slug, "pz");
        assert_eq!(model.method().subtype(), "paw");
    }

    #[test]
    fn group_slug_includes_functional_refiners_modifiers() {
        let mut model = DftModel::new(ModelConfig::of_type("dft", "gga"));
        assert_eq!(model.group_slug(), "dft:gga:pbe");

        model.set_refiners(vec!["hse".into(), "g0w0".into()]);
        model.set_modifiers(vec!["soc".into()]);
        assert_eq!(model.group_slug(), "dft:gga:pbe:hse+g0w0:soc");
    }

    #[test]
    fn group_slug_prefixes_application_short_name() {
        let config: ModelConfig = serde_json::from_value(json!({
            "type": "dft",
            "subtype": "gga",
            "application": {"name": "vasp", "shortName": "vasp"},
        }))
        .unwrap();
        let model = DftModel::new(config);
        assert_eq!(model.group_slug(), "vasp:dft:gga:pbe");
    }

    #[test]
    fn all_functionals_follow_tree_order() {
        let model = DftModel::new(ModelConfig::of_type("dft", "gga"));
        let all_functionals = model.all_functionals();
        let slugs: Vec<&str> = all_functionals
            .iter()
            .map(|f| f.slug.as_str())
            .collect();
        assert_eq!(slugs, ["pbe", "pbesol", "pw91", "other"]);
        assert_eq!(model.all_refiners()[0].slug, "hse");
        assert_eq!(model.all_modifiers()[0].slug, "soc");
    }

    #[test]
    fn hybrid_branch_has_no_refiners_or_modifiers() {
        let model = DftModel::new(ModelConfig::of_type("dft", "hybrid"));
        assert!(model.all_refiners().is_empty());
        assert!(model.all_modifiers().is_empty());
    }

    #[test]
    fn to_json_serializes_functional_as_slug_only() {
        let mut model = DftModel::new(ModelConfig::of_type("dft", "gga"));
        model.set_refiners(vec!["hse".into()]);

        let json = model.to_json();
        assert_eq!(json["functional"], json!({"slug": "pbe"}));
        assert_eq!(json["refiners"][0]["slug"], "hse");
        assert_eq!(
            json["refiners"][0]["name"],
            "Heyd-Scuseria-Ernzerhof"
        );
        assert_eq!(json["modifiers"], json!([]));
    }
}
