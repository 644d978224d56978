use serde_json::Value;

use super::{Method, PseudopotentialMethod};
use crate::types::MethodConfig;

/// A method of any type, tagged by its concrete representation.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyMethod {
    Pseudopotential(PseudopotentialMethod),
    Generic(Method),
}

impl AnyMethod {
    pub fn kind(&self) -> &str {
        self.as_method().kind()
    }

    pub fn subtype(&self) -> &str {
        self.as_method().subtype()
    }

    pub fn is_unknown(&self) -> bool {
        self.as_method().is_unknown()
    }

    /// The shared method surface, regardless of the concrete type.
    pub fn as_method(&self) -> &Method {
        match self {
            AnyMethod::Pseudopotential(method) => method.method(),
            AnyMethod::Generic(method) => method,
        }
    }

    pub fn as_pseudopotential(&self) -> Option<&PseudopotentialMethod> {
        match self {
            AnyMethod::Pseudopotential(method) => Some(method),
            AnyMethod::Generic(_) => None,
        }
    }

    pub fn as_pseudopotential_mut(&mut self) -> Option<&mut PseudopotentialMethod> {
        match self {
            AnyMethod::Pseudopotential(method) => Some(method),
            AnyMethod::Generic(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        self.as_method().to_json()
    }

    pub fn to_json_with_clean_data(&self, fields_to_exclude: &[&str]) -> Value {
        match self {
            AnyMethod::Pseudopotential(method) => {
                method.to_json_with_clean_data(fields_to_exclude)
            }
            AnyMethod::Generic(method) => method.to_json_with_clean_data(fields_to_exclude),
        }
    }
}

/// Builds the concrete method type declared by a configuration.
pub struct MethodFactory;

impl MethodFactory {
    pub fn create(config: MethodConfig) -> AnyMethod {
        match config.kind.as_str() {
            "pseudopotential" => {
                AnyMethod::Pseudopotential(PseudopotentialMethod::new(config))
            }
            _ => AnyMethod::Generic(Method::new(config)),
        }
    }
}
