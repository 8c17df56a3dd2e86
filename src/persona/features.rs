//! Feature Observations and Persona Labels
//!
//! The core data types flowing through the inference pipeline: one sample of
//! normalized pointer telemetry, and the categorical operator persona it maps
//! to.

use serde::{Deserialize, Serialize};

/// Inferred operator skill/engagement profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// Slow movement with long idle or hesitation phases
    NoviceOld,
    /// Fast, direct, low-idle movement with high path entropy
    Expert,
    /// Everything in between (default)
    Intermediate,
}

impl Persona {
    /// Wire name of the label, as serialized to the policy service and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::NoviceOld => "novice_old",
            Persona::Expert => "expert",
            Persona::Intermediate => "intermediate",
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sample of operator pointer telemetry
///
/// All fields are normalized upstream and are semantically in [0, 1], though
/// values are not hard-clamped here. Missing fields are a deserialization
/// error (no defaults); non-finite values are rejected by [`validate`].
///
/// [`validate`]: FeatureObservation::validate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureObservation {
    /// Mean pointer speed
    pub speed: f64,
    /// Fraction of time spent idle
    pub idle: f64,
    /// Hesitation index (pauses, direction reversals)
    pub hesitation: f64,
    /// Path entropy (trajectory irregularity)
    pub entropy: f64,
}

impl FeatureObservation {
    /// Check that every field carries a usable number.
    ///
    /// A NaN or infinite feature is a caller contract violation, not a
    /// transient condition, so it surfaces as `Error::Validation`.
    pub fn validate(&self) -> crate::Result<()> {
        for (name, value) in [
            ("speed", self.speed),
            ("idle", self.idle),
            ("hesitation", self.hesitation),
            ("entropy", self.entropy),
        ] {
            if !value.is_finite() {
                return Err(crate::Error::Validation(format!(
                    "feature '{}' is not a finite number: {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
