//! Decision Records
//!
//! The flat structured audit artifact of one controller step. Appended to an
//! external log sink and never mutated after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::persona::{Persona, Stability};

/// Audit record of one end-to-end decision step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// When the step completed
    pub timestamp: DateTime<Utc>,
    /// Owning session, when the step ran under a [`SessionRegistry`]
    ///
    /// [`SessionRegistry`]: crate::session::SessionRegistry
    pub session: Option<Uuid>,
    /// Label the classifier produced for this observation
    pub persona_raw: Persona,
    /// Stabilized label the policy was conditioned on
    pub persona_final: Persona,
    /// Classifier confidence in the raw label
    pub confidence: f64,
    /// Stability status of the final label
    pub stability: Stability,
    /// Share of the stability window held by the final label
    pub stability_fraction: f64,
    /// Action taken (policy output, or the configured fallback)
    pub action: i64,
    /// Set when the policy call failed and the fallback action was used
    pub service_error: bool,
}

impl DecisionRecord {
    /// Attach a session id to the record
    pub fn with_session(mut self, session: Uuid) -> Self {
        self.session = Some(session);
        self
    }
}
