use serde_json::Value;

use super::{DftModel, Model};
use crate::error::Error;
use crate::tree;
use crate::types::ModelConfig;

/// A model of any type, tagged by its concrete representation.
#[derive(Debug, Clone)]
pub enum AnyModel {
    Dft(DftModel),
    Generic(Model),
}

impl AnyModel {
    pub fn kind(&self) -> &str {
        self.as_model().kind()
    }

    pub fn subtype(&self) -> &str {
        self.as_model().subtype()
    }

    pub fn is_unknown(&self) -> bool {
        self.as_model().is_unknown()
    }

    pub fn group_slug(&self) -> String {
        match self {
            AnyModel::Dft(model) => model.group_slug(),
            AnyModel::Generic(model) => model.group_slug(),
        }
    }

    /// The shared model surface, regardless of the concrete type.
    pub fn as_model(&self) -> &Model {
        match self {
            AnyModel::Dft(model) => model.as_model(),
            AnyModel::Generic(model) => model,
        }
    }

    pub fn as_dft(&self) -> Option<&DftModel> {
        match self {
            AnyModel::Dft(model) => Some(model),
            AnyModel::Generic(_) => None,
        }
    }

    pub fn as_dft_mut(&mut self) -> Option<&mut DftModel> {
        match self {
            AnyModel::Dft(model) => Some(model),
            AnyModel::Generic(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            AnyModel::Dft(model) => model.to_json(),
            AnyModel::Generic(model) => model.to_json(),
        }
    }
}

/// Builds the concrete model type declared by a configuration.
pub struct ModelFactory;

impl ModelFactory {
    pub fn create(config: ModelConfig) -> AnyModel {
        match config.kind.as_deref() {
            Some("dft") => AnyModel::Dft(DftModel::new(config)),
            _ => AnyModel::Generic(Model::new(config)),
        }
    }

    /// Builds a model for an application, deriving the model type from the
    /// application's registered tree. This is the only constructor that can
    /// fail: an absent application or one without a registered tree is a
    /// caller-side configuration error.
    pub fn create_from_application(mut config: ModelConfig) -> Result<AnyModel, Error> {
        let Some(application) = config.application.as_ref() else {
            return Err(Error::MissingApplication);
        };
        let Some(kind) = tree::default_model_type_for_application(application) else {
            return Err(Error::UnknownApplicationModelType(application.name.clone()));
        };
        config.kind = Some(kind.to_string());
        Ok(Self::create(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApplicationInfo;
    use serde_json::json;

    #[test]
    fn dft_type_gets_specialized_model() {
        let model = ModelFactory::create(ModelConfig::of_type("dft", "gga"));
        assert!(model.as_dft().is_some());
        assert_eq!(model.group_slug(), "dft:gga:pbe");
    }

    #[test]
    fn other_types_get_generic_model() {
        let ml = ModelFactory::create(ModelConfig::of_type("ml", "re"));
        assert!(ml.as_dft().is_none());
        assert_eq!(ml.group_slug(), "ml:re");

        let unknown = ModelFactory::create(ModelConfig::of_type("unknown", "unknown"));
        assert!(unknown.is_unknown());
    }

    #[test]
    fn create_from_application_requires_application() {
        let err = ModelFactory::create_from_application(ModelConfig::default()).unwrap_err();
        assert_eq!(err, Error::MissingApplication);
        assert!(err.to_string().contains("application is required"));
    }

    #[test]
    fn create_from_application_requires_registered_tree() {
        let mut config = ModelConfig::default();
        config.application = Some(ApplicationInfo::new("lammps", "lmp"));
        let err = ModelFactory::create_from_application(config).unwrap_err();
        assert!(err.to_string().contains("cannot determine a model type"));
    }

    #[test]
    fn create_from_application_derives_type_from_tree() {
        let config: ModelConfig = serde_json::from_value(json!({
            "application": {"name": "vasp", "shortName": "vasp"},
        }))
        .unwrap();
        let model = ModelFactory::create_from_application(config).unwrap();
        assert_eq!(model.kind(), "dft");
        assert!(model.as_dft().is_some());
        assert_eq!(model.as_model().method().subtype(), "paw");

        let config: ModelConfig = serde_json::from_value(json!({
            "application": {"name": "python", "shortName": "py"},
        }))
        .unwrap();
        let model = ModelFactory::create_from_application(config).unwrap();
        assert!(model.is_unknown());
    }
}
