//! Error types for model and method construction.
//!
//! Missing tree branches, missing catalog entries, and absent categorized
//! inputs are valid states and resolve to empty collections, `None`, or the
//! fixed unknown configuration. The only operations that can fail outright
//! are the application-driven constructors on
//! [`ModelFactory`](crate::ModelFactory).

use thiserror::Error;

/// Input-validation failures raised when deriving a model from an
/// application descriptor.
///
/// Callers should treat these as fatal configuration errors on their side,
/// not as conditions to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No application descriptor was supplied.
    #[error("application is required to create a model from an application")]
    MissingApplication,

    /// The application has no registered taxonomy tree, so no default model
    /// type can be derived for it.
    #[error("cannot determine a model type for application '{0}'")]
    UnknownApplicationModelType(String),
}
