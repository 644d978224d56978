//! A pure Rust library for classifying computational-chemistry models and
//! methods and normalizing their configurations.
//!
//! `simtax` maps a hand-authored taxonomy tree (model type → subtype →
//! allowed method types/subtypes, plus DFT functionals, refiners, and
//! modifiers) onto simple configuration objects, and converts bidirectionally
//! between the flat "simple" representation used by calling applications and
//! the path-keyed "categorized" representation used by preset catalogs.
//!
//! # Features
//!
//! - **Taxonomy tree** — Ordered, read-only tables of valid model/method
//!   combinations, with per-application overrides and slug → display-name
//!   lookup
//! - **Value objects** — [`Model`]/[`Method`] wrappers that normalize loose
//!   configuration input once, at construction, and derive allowed and
//!   default choices from the tree
//! - **Factories** — [`ModelFactory`]/[`MethodFactory`] dispatch on the
//!   declared type to the concrete representation ([`DftModel`],
//!   [`PseudopotentialMethod`])
//! - **Conversion** — Lossy-by-design translation between simple and
//!   categorized shapes, keyed by byte-exact catalog paths
//! - **Catalog** — An embedded default preset catalog with exact-path lookup
//!   and a model → method compatibility filter
//!
//! # Quick Start
//!
//! ```
//! use simtax::{ModelConfig, ModelFactory};
//!
//! // Build a DFT/GGA model; the functional and method default from the tree.
//! let model = ModelFactory::create(ModelConfig::of_type("dft", "gga"));
//! assert_eq!(model.group_slug(), "dft:gga:pbe");
//!
//! let dft = model.as_dft().unwrap();
//! assert_eq!(dft.functional().slug, "pbe");
//! assert_eq!(dft.method().kind(), "pseudopotential");
//! assert_eq!(dft.method().subtype(), "paw");
//! ```
//!
//! Converting between representations:
//!
//! ```
//! use simtax::{MethodConfig, catalog, convert};
//!
//! let simple = MethodConfig::new("pseudopotential", "us");
//! let preset =
//!     convert::method::to_categorized(Some(&simple), catalog::categorized_methods()).unwrap();
//! assert_eq!(preset.name, "Plane-wave pseudopotential: ultrasoft");
//!
//! // Absent input classifies as unknown rather than failing.
//! let unknown = convert::method::to_simple(None);
//! assert_eq!(unknown.kind, "unknown");
//! ```
//!
//! # Error handling
//!
//! Missing tree branches, missing catalog entries, and absent categorized
//! inputs are valid states: lookups return empty collections, `None`, or the
//! fixed unknown configuration. The only fallible constructor is
//! [`ModelFactory::create_from_application`], which rejects a missing or
//! unregistered application with [`Error`].

pub mod catalog;
pub mod convert;
pub mod defaults;
mod error;
mod method;
mod model;
pub mod tree;
mod types;

pub use error::Error;
pub use method::{
    AnyMethod, ExchangeCorrelation, Method, MethodFactory, Pseudopotential,
    PseudopotentialMethod,
};
pub use model::{AnyModel, DftModel, Model, ModelFactory};
pub use types::{
    ApplicationInfo, CategorizedMethod, CategorizedModel, CategorizedUnit, MethodConfig,
    ModelConfig, NamedSlug, SlugLike,
};
