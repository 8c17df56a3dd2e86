//! Rule-Based Persona Classification
//!
//! Maps one feature observation to a `(persona, confidence)` pair using fixed
//! rules evaluated in priority order. Stateless and reentrant; all thresholds
//! live in [`ClassifierConfig`] so they can be tuned without touching control
//! flow.

use serde::{Deserialize, Serialize};

use super::features::{FeatureObservation, Persona};

/// Classifier output for one observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Matched persona label
    pub persona: Persona,
    /// Classifier certainty in [0, 1]
    pub confidence: f64,
}

/// Classification thresholds and confidences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Speed below which the novice rule can fire
    pub novice_speed_max: f64,
    /// Idle fraction above which the novice rule can fire
    pub novice_idle_min: f64,
    /// Hesitation above which the novice rule can fire
    pub novice_hesitation_min: f64,
    /// Confidence reported for a novice match
    pub novice_confidence: f64,
    /// Speed above which the expert rule can fire
    pub expert_speed_min: f64,
    /// Idle fraction below which the expert rule can fire
    pub expert_idle_max: f64,
    /// Hesitation below which the expert rule can fire
    pub expert_hesitation_max: f64,
    /// Path entropy above which the expert rule can fire
    pub expert_entropy_min: f64,
    /// Confidence reported for an expert match
    pub expert_confidence: f64,
    /// Confidence reported for the intermediate default
    pub default_confidence: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            novice_speed_max: 0.4,
            novice_idle_min: 0.6,
            novice_hesitation_min: 0.6,
            novice_confidence: 0.9,
            expert_speed_min: 0.7,
            expert_idle_max: 0.3,
            expert_hesitation_max: 0.3,
            expert_entropy_min: 0.6,
            expert_confidence: 0.9,
            default_confidence: 0.7,
        }
    }
}

impl ClassifierConfig {
    /// Validate that every confidence is within [0, 1].
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> crate::Result<()> {
        for (name, value) in [
            ("novice_confidence", self.novice_confidence),
            ("expert_confidence", self.expert_confidence),
            ("default_confidence", self.default_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(crate::Error::Config(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Stateless rule classifier
#[derive(Debug, Clone, Default)]
pub struct PersonaClassifier {
    /// Thresholds and confidences
    pub config: ClassifierConfig,
}

impl PersonaClassifier {
    /// Create with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom thresholds
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify one observation.
    ///
    /// Rules are evaluated in fixed priority order, first match wins. Rules 1
    /// and 2 are mutually exclusive by construction (speed cannot be on both
    /// sides of the [0.4, 0.7] band), but the ordering is load-bearing for
    /// any rule added later.
    pub fn classify(&self, f: &FeatureObservation) -> ClassificationResult {
        let c = &self.config;

        // Rule 1: novice / elderly
        if f.speed < c.novice_speed_max
            && (f.idle > c.novice_idle_min || f.hesitation > c.novice_hesitation_min)
        {
            return ClassificationResult {
                persona: Persona::NoviceOld,
                confidence: c.novice_confidence,
            };
        }

        // Rule 2: expert
        if f.speed > c.expert_speed_min
            && f.idle < c.expert_idle_max
            && f.hesitation < c.expert_hesitation_max
            && f.entropy > c.expert_entropy_min
        {
            return ClassificationResult {
                persona: Persona::Expert,
                confidence: c.expert_confidence,
            };
        }

        // Default: intermediate
        ClassificationResult {
            persona: Persona::Intermediate,
            confidence: c.default_confidence,
        }
    }
}
