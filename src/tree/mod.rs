//! Static taxonomy trees for models and methods.
//!
//! The trees are hand-authored, read-only tables mapping a model type to its
//! subtypes and each subtype to the method types/subtypes (and, for DFT, the
//! functionals/refiners/modifiers) that are valid for it. Entry order is
//! significant everywhere: it encodes preference, and the first entry of an
//! allowed list is the default.
//!
//! Lookups never fail. A missing type or subtype resolves to an empty branch,
//! and a slug without a registered display name falls back to itself.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::types::{ApplicationInfo, NamedSlug, SlugLike};

/// Method types mapped to their allowed subtypes, in preference order.
pub type MethodTree = &'static [(&'static str, &'static [&'static str])];

/// Subtypes of one model type mapped to their tree branches.
pub type SubtypeTree = &'static [(&'static str, TreeBranch)];

/// Model types mapped to their subtype trees.
pub type ModelTree = &'static [(&'static str, SubtypeTree)];

/// Everything the tree knows about one `(model type, model subtype)` pair.
#[derive(Debug, Clone, Copy)]
pub struct TreeBranch {
    pub methods: MethodTree,
    pub functionals: &'static [&'static str],
    pub refiners: &'static [&'static str],
    pub modifiers: &'static [&'static str],
}

pub const EMPTY_BRANCH: TreeBranch = TreeBranch {
    methods: &[],
    functionals: &[],
    refiners: &[],
    modifiers: &[],
};

pub const METHODS_TREE: MethodTree = &[
    ("pseudopotential", &["paw", "nc", "nc-fr", "us"]),
    ("localorbital", &["pople"]),
    ("unknown", &["unknown"]),
];

/// All pseudopotential method subtypes, in tree order.
pub fn pseudopotential_types() -> &'static [&'static str] {
    METHODS_TREE
        .iter()
        .find(|(kind, _)| *kind == "pseudopotential")
        .map(|(_, subtypes)| *subtypes)
        .unwrap_or(&[])
}

// DFT-specific

const DFT_REFINERS: &[&str] = &["hse", "g0w0"];
const DFT_MODIFIERS: &[&str] = &["soc", "magn"];
const GGA_FUNCTIONALS: &[&str] = &["pbe", "pbesol", "pw91", "other"];
const LDA_FUNCTIONALS: &[&str] = &["pz", "pw", "vwn", "other"];

const DFT_GGA: TreeBranch = TreeBranch {
    methods: METHODS_TREE,
    functionals: GGA_FUNCTIONALS,
    refiners: DFT_REFINERS,
    modifiers: DFT_MODIFIERS,
};

const DFT_LDA: TreeBranch = TreeBranch {
    methods: METHODS_TREE,
    functionals: LDA_FUNCTIONALS,
    refiners: DFT_REFINERS,
    modifiers: DFT_MODIFIERS,
};

const DFT_HYBRID: TreeBranch = TreeBranch {
    methods: METHODS_TREE,
    functionals: &["b3lyp", "hse06"],
    refiners: &[],
    modifiers: &[],
};

const DFT_OTHER: TreeBranch = TreeBranch {
    methods: METHODS_TREE,
    functionals: &["other"],
    refiners: &[],
    modifiers: &[],
};

pub const DFT_MODEL_TREE: SubtypeTree = &[
    ("gga", DFT_GGA),
    ("lda", DFT_LDA),
    ("hybrid", DFT_HYBRID),
    ("other", DFT_OTHER),
];

// ML-specific

const ML_RE: TreeBranch = TreeBranch {
    methods: &[
        ("linear", &["least_squares", "ridge"]),
        ("kernel_ridge", &["rbf", "polynomial"]),
    ],
    functionals: &[],
    refiners: &[],
    modifiers: &[],
};

const UNKNOWN_BRANCH: TreeBranch = TreeBranch {
    methods: &[("unknown", &["unknown"])],
    functionals: &[],
    refiners: &[],
    modifiers: &[],
};

pub const MODEL_TREE: ModelTree = &[
    ("dft", DFT_MODEL_TREE),
    ("ml", &[("re", ML_RE)]),
    ("unknown", &[("unknown", UNKNOWN_BRANCH)]),
];

// Application-specific overrides. Each registered tree must be a subset of
// MODEL_TREE; unregistered applications fall back to the global tree.

const METHODS_PAW_ONLY: MethodTree = &[
    ("pseudopotential", &["paw"]),
    ("localorbital", &["pople"]),
    ("unknown", &["unknown"]),
];

const METHODS_US_FIRST: MethodTree = &[
    ("pseudopotential", &["us", "nc-fr", "nc", "paw"]),
    ("localorbital", &["pople"]),
    ("unknown", &["unknown"]),
];

const VASP_GGA: TreeBranch = TreeBranch {
    methods: METHODS_PAW_ONLY,
    functionals: GGA_FUNCTIONALS,
    refiners: DFT_REFINERS,
    modifiers: DFT_MODIFIERS,
};

const VASP_LDA: TreeBranch = TreeBranch {
    methods: METHODS_PAW_ONLY,
    functionals: LDA_FUNCTIONALS,
    refiners: DFT_REFINERS,
    modifiers: DFT_MODIFIERS,
};

const ESPRESSO_GGA: TreeBranch = TreeBranch {
    methods: METHODS_US_FIRST,
    functionals: GGA_FUNCTIONALS,
    refiners: DFT_REFINERS,
    modifiers: DFT_MODIFIERS,
};

const ESPRESSO_LDA: TreeBranch = TreeBranch {
    methods: METHODS_US_FIRST,
    functionals: LDA_FUNCTIONALS,
    refiners: DFT_REFINERS,
    modifiers: DFT_MODIFIERS,
};

const VASP_TREE: ModelTree = &[(
    "dft",
    &[
        ("gga", VASP_GGA),
        ("lda", VASP_LDA),
        ("hybrid", DFT_HYBRID),
        ("other", DFT_OTHER),
    ],
)];

const ESPRESSO_TREE: ModelTree = &[(
    "dft",
    &[
        ("gga", ESPRESSO_GGA),
        ("lda", ESPRESSO_LDA),
        ("hybrid", DFT_HYBRID),
        ("other", DFT_OTHER),
    ],
)];

const NWCHEM_TREE: ModelTree = &[("dft", DFT_MODEL_TREE)];

const SCRIPTING_TREE: ModelTree = &[("unknown", &[("unknown", UNKNOWN_BRANCH)])];

const APPLICATION_TREES: &[(&str, ModelTree)] = &[
    ("vasp", VASP_TREE),
    ("espresso", ESPRESSO_TREE),
    ("python", SCRIPTING_TREE),
    ("shell", SCRIPTING_TREE),
    ("jupyterLab", SCRIPTING_TREE),
    ("nwchem", NWCHEM_TREE),
    ("deepmd", SCRIPTING_TREE),
];

/// The tree registered for an application, or `None` if the application has
/// no override.
// TODO: filter by version once per-version application trees diverge.
pub fn tree_for_application(name: &str, _version: Option<&str>) -> Option<ModelTree> {
    APPLICATION_TREES
        .iter()
        .find(|(app, _)| *app == name)
        .map(|(_, tree)| *tree)
}

/// The default model type for an application: the first key of its
/// registered tree, or `None` if the application has none.
pub fn default_model_type_for_application(application: &ApplicationInfo) -> Option<&'static str> {
    tree_for_application(&application.name, application.version.as_deref())
        .and_then(|tree| tree.first())
        .map(|(kind, _)| *kind)
}

/// The subtype branches for one model type; empty when the type is absent.
pub fn branches_for_type(tree: ModelTree, kind: &str) -> SubtypeTree {
    tree.iter()
        .find(|(slug, _)| *slug == kind)
        .map(|(_, branches)| *branches)
        .unwrap_or(&[])
}

/// The branch for one `(type, subtype)` pair; empty when either is absent.
pub fn branch_for_subtype(tree: ModelTree, kind: &str, subtype: &str) -> TreeBranch {
    branches_for_type(tree, kind)
        .iter()
        .find(|(slug, _)| *slug == subtype)
        .map(|(_, branch)| *branch)
        .unwrap_or(EMPTY_BRANCH)
}

const DISPLAY_NAMES_TOML: &str = include_str!("../../resources/display_names.toml");

static DISPLAY_NAMES: OnceLock<HashMap<String, String>> = OnceLock::new();

fn display_names() -> &'static HashMap<String, String> {
    DISPLAY_NAMES.get_or_init(|| {
        toml::from_str(DISPLAY_NAMES_TOML)
            .expect("Failed to parse embedded display names. This is a library bug.")
    })
}

/// Pairs a slug with its registered display name, falling back to the slug
/// itself when no name is registered.
pub fn named_slug(slug: &str) -> NamedSlug {
    let name = display_names()
        .get(slug)
        .cloned()
        .unwrap_or_else(|| slug.to_string());
    NamedSlug::with_name(slug, name)
}

/// Normalizes a string-or-object slug to a named one. Plain strings get the
/// registered display name; objects keep whatever name they carry.
pub fn to_named(slug: &SlugLike) -> NamedSlug {
    match slug {
        SlugLike::Plain(s) => named_slug(s),
        SlugLike::Named(named) => named.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_tree_starts_with_dft() {
        let (kind, _) = MODEL_TREE[0];
        assert_eq!(kind, "dft");
    }

    #[test]
    fn pseudopotential_types_in_tree_order() {
        assert_eq!(pseudopotential_types(), &["paw", "nc", "nc-fr", "us"]);
    }

    #[test]
    fn every_subtype_branch_has_methods() {
        for (kind, branches) in MODEL_TREE {
            for (subtype, branch) in branches.iter() {
                assert!(
                    !branch.methods.is_empty(),
                    "empty methods for {kind}/{subtype}"
                );
                for (_, method_subtypes) in branch.methods.iter() {
                    assert!(!method_subtypes.is_empty());
                }
            }
        }
    }

    #[test]
    fn missing_branches_resolve_to_empty() {
        assert!(branches_for_type(MODEL_TREE, "nope").is_empty());
        let branch = branch_for_subtype(MODEL_TREE, "dft", "nope");
        assert!(branch.methods.is_empty());
        assert!(branch.functionals.is_empty());
    }

    #[test]
    fn named_slug_falls_back_to_slug() {
        let named = named_slug("dft");
        assert_eq!(named.name.as_deref(), Some("Density Functional Theory"));

        let unregistered = named_slug("my-custom-slug");
        assert_eq!(unregistered.name.as_deref(), Some("my-custom-slug"));
    }

    #[test]
    fn vasp_tree_restricts_pseudopotentials_to_paw() {
        let tree = tree_for_application("vasp", None).unwrap();
        let branch = branch_for_subtype(tree, "dft", "gga");
        let (kind, subtypes) = branch.methods[0];
        assert_eq!(kind, "pseudopotential");
        assert_eq!(subtypes, &["paw"]);
    }

    #[test]
    fn espresso_tree_puts_ultrasoft_first() {
        let tree = tree_for_application("espresso", None).unwrap();
        let branch = branch_for_subtype(tree, "dft", "lda");
        let (_, subtypes) = branch.methods[0];
        assert_eq!(subtypes, &["us", "nc-fr", "nc", "paw"]);
    }

    #[test]
    fn unregistered_application_has_no_tree() {
        assert!(tree_for_application("lammps", Some("2024")).is_none());
    }

    #[test]
    fn scripting_applications_default_to_unknown() {
        for app in ["python", "shell", "jupyterLab", "deepmd"] {
            let info = ApplicationInfo::new(app, app);
            assert_eq!(default_model_type_for_application(&info), Some("unknown"));
        }
        let vasp = ApplicationInfo::new("vasp", "vasp");
        assert_eq!(default_model_type_for_application(&vasp), Some("dft"));
    }
}
