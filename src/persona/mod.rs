//! Persona inference: feature observations, rule classifier, stability validator

pub mod features;
pub mod classifier;
pub mod validator;

pub use classifier::{ClassificationResult, ClassifierConfig, PersonaClassifier};
pub use features::{FeatureObservation, Persona};
pub use validator::{PersonaValidator, Stability, StabilityReport, ValidatorConfig};
