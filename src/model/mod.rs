//! Model value objects.
//!
//! A [`Model`] wraps a `{type, subtype, method}` configuration and derives
//! its allowed and default choices from the taxonomy tree — either the
//! global tree or the override registered for the model's application.

mod dft;
mod factory;

pub use dft::DftModel;
pub use factory::{AnyModel, ModelFactory};

use serde_json::{Map, Value};

use crate::method::{AnyMethod, Method, MethodFactory};
use crate::tree::{self, MethodTree, ModelTree, SubtypeTree, TreeBranch};
use crate::types::{ApplicationInfo, MethodConfig, ModelConfig, NamedSlug, SlugLike};

/// A computational model: the top-level physics approximation choice.
#[derive(Debug, Clone)]
pub struct Model {
    kind: String,
    subtype: String,
    method: AnyMethod,
    application: Option<ApplicationInfo>,
    extra: Map<String, Value>,
}

fn resolved_tree(application: Option<&ApplicationInfo>) -> ModelTree {
    application
        .and_then(|app| tree::tree_for_application(&app.name, app.version.as_deref()))
        .unwrap_or(tree::MODEL_TREE)
}

fn default_method_config_in(tree: ModelTree, kind: &str, subtype: &str) -> MethodConfig {
    let branch = tree::branch_for_subtype(tree, kind, subtype);
    let Some((method_kind, method_subtypes)) = branch.methods.first() else {
        return Method::default_config();
    };
    let Some(method_subtype) = method_subtypes.first() else {
        return Method::default_config();
    };
    MethodConfig::new(*method_kind, *method_subtype)
}

impl Model {
    /// Builds a model from a configuration. Type and subtype are normalized
    /// to plain slugs; when absent they resolve to the tree defaults, and a
    /// missing method resolves to the branch's default method configuration.
    pub fn new(config: ModelConfig) -> Self {
        let application = config.application;
        let tree = resolved_tree(application.as_ref());

        let kind = match config.kind {
            Some(kind) if !kind.is_empty() => kind,
            _ => tree.first().map(|(slug, _)| *slug).unwrap_or("").to_string(),
        };
        let subtype = match config.subtype {
            Some(subtype) if !subtype.slug().is_empty() => subtype.into_slug(),
            _ => tree::branches_for_type(tree, &kind)
                .first()
                .map(|(slug, _)| *slug)
                .unwrap_or("")
                .to_string(),
        };

        let method_config = config
            .method
            .unwrap_or_else(|| default_method_config_in(tree, &kind, &subtype));
        let method = MethodFactory::create(method_config);

        Self {
            kind,
            subtype,
            method,
            application,
            extra: config.extra,
        }
    }

    /// The default model configuration: DFT/GGA with the default method.
    pub fn default_config() -> ModelConfig {
        let mut config = crate::defaults::dft_model_config();
        config.method = Some(Method::default_config());
        config
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn is_unknown(&self) -> bool {
        self.kind == "unknown"
    }

    pub fn application(&self) -> Option<&ApplicationInfo> {
        self.application.as_ref()
    }

    /// The taxonomy tree in effect: the application's registered override,
    /// or the global tree.
    pub fn tree(&self) -> ModelTree {
        resolved_tree(self.application.as_ref())
    }

    pub fn tree_branch_for_type(&self) -> SubtypeTree {
        tree::branches_for_type(self.tree(), &self.kind)
    }

    pub fn tree_branch_for_subtype(&self) -> TreeBranch {
        tree::branch_for_subtype(self.tree(), &self.kind, &self.subtype)
    }

    pub fn allowed_types(&self) -> Vec<NamedSlug> {
        self.tree()
            .iter()
            .map(|(slug, _)| tree::named_slug(slug))
            .collect()
    }

    pub fn allowed_subtypes(&self) -> Vec<NamedSlug> {
        self.tree_branch_for_type()
            .iter()
            .map(|(slug, _)| tree::named_slug(slug))
            .collect()
    }

    pub fn default_type(&self) -> &'static str {
        self.tree().first().map(|(slug, _)| *slug).unwrap_or("")
    }

    pub fn default_subtype(&self) -> &'static str {
        self.tree_branch_for_type()
            .first()
            .map(|(slug, _)| *slug)
            .unwrap_or("")
    }

    /// The grouping key used by callers to deduplicate models: application
    /// short name (when present), type, and subtype, joined by `:` with
    /// empty segments omitted.
    pub fn group_slug(&self) -> String {
        let short_name = self
            .application
            .as_ref()
            .map(|app| app.short_name.as_str())
            .unwrap_or("");
        join_group_slug([short_name, self.kind.as_str(), self.subtype.as_str()])
    }

    pub fn method(&self) -> &AnyMethod {
        &self.method
    }

    pub fn set_method(&mut self, method: AnyMethod) {
        self.method = method;
    }

    /// Changes the subtype and resets the method to the new branch's default.
    pub fn set_subtype(&mut self, subtype: impl Into<SlugLike>) {
        self.subtype = subtype.into().into_slug();
        self.method = MethodFactory::create(self.default_method_config());
    }

    pub fn methods_from_tree(&self) -> MethodTree {
        self.tree_branch_for_subtype().methods
    }

    pub fn method_types(&self) -> Vec<NamedSlug> {
        self.methods_from_tree()
            .iter()
            .map(|(slug, _)| tree::named_slug(slug))
            .collect()
    }

    /// The method subtypes allowed for the current method's type.
    pub fn method_subtypes(&self) -> Vec<NamedSlug> {
        self.methods_from_tree()
            .iter()
            .find(|(slug, _)| *slug == self.method.kind())
            .map(|(_, subtypes)| subtypes.iter().map(|s| tree::named_slug(s)).collect())
            .unwrap_or_default()
    }

    /// The first method type and subtype of the current branch, or the
    /// static method default when the branch is empty.
    pub fn default_method_config(&self) -> MethodConfig {
        default_method_config_in(self.tree(), &self.kind, &self.subtype)
    }

    /// Every model type of the global tree.
    pub fn all_types() -> Vec<NamedSlug> {
        tree::MODEL_TREE
            .iter()
            .map(|(slug, _)| tree::named_slug(slug))
            .collect()
    }

    pub fn to_json(&self) -> Value {
        let mut obj = self.extra.clone();
        obj.insert("type".to_string(), Value::String(self.kind.clone()));
        obj.insert("subtype".to_string(), Value::String(self.subtype.clone()));
        obj.insert(
            "method".to_string(),
            self.method.to_json_with_clean_data(&[]),
        );
        Value::Object(obj)
    }
}

pub(crate) fn join_group_slug<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(":")
}
