//! Adaptive Controller
//!
//! Orchestrates one end-to-end decision step: validate the observation,
//! classify it, stabilize the label through the session's validator, query
//! the decision policy with the fused request, and assemble the audit record.
//!
//! Failure handling is asymmetric on purpose: a malformed observation is a
//! caller contract violation and surfaces immediately, while a failed or
//! late policy call degrades to the configured fallback action so the
//! decision loop never stalls.

use chrono::Utc;
use tracing::{info, warn};

use crate::adaptation::record::DecisionRecord;
use crate::persona::{FeatureObservation, PersonaClassifier, PersonaValidator};
use crate::policy::{DecisionPolicy, DecisionRequest};

/// Orchestrator for adaptive decision steps.
///
/// Holds the stateless classifier and the policy handle; the stateful
/// [`PersonaValidator`] is session-scoped and passed into [`step`] by the
/// caller, so one controller can serve many independent sessions.
///
/// [`step`]: AdaptiveController::step
#[derive(Debug, Clone)]
pub struct AdaptiveController<P: DecisionPolicy> {
    classifier: PersonaClassifier,
    policy: P,
    fallback_action: i64,
}

impl<P: DecisionPolicy> AdaptiveController<P> {
    /// Create with a default classifier and fallback action 0
    pub fn new(policy: P) -> Self {
        Self {
            classifier: PersonaClassifier::new(),
            policy,
            fallback_action: 0,
        }
    }

    /// Create with a custom classifier and fallback action
    pub fn with_parts(classifier: PersonaClassifier, policy: P, fallback_action: i64) -> Self {
        Self {
            classifier,
            policy,
            fallback_action,
        }
    }

    /// Action used when the policy call fails
    pub fn fallback_action(&self) -> i64 {
        self.fallback_action
    }

    /// Run one decision step for the given session validator.
    ///
    /// The validator mutation happens strictly before the policy call, so a
    /// failed call never leaves the window half-updated. Returns
    /// `Error::Validation` for a malformed observation; a policy failure is
    /// recovered locally and flagged on the record instead of propagating.
    pub async fn step(
        &self,
        validator: &mut PersonaValidator,
        features: &FeatureObservation,
        state: &[f64],
    ) -> crate::Result<DecisionRecord> {
        features.validate()?;

        let classified = self.classifier.classify(features);
        let report = validator.update(classified.persona, classified.confidence);

        let request = DecisionRequest {
            state: state.to_vec(),
            persona: report.persona,
        };

        let (action, service_error) = match self.policy.decide(&request).await {
            Ok(response) => (response.action, false),
            Err(e) => {
                warn!(error = %e, fallback = self.fallback_action, "policy call failed, using fallback action");
                (self.fallback_action, true)
            }
        };

        let record = DecisionRecord {
            timestamp: Utc::now(),
            session: None,
            persona_raw: classified.persona,
            persona_final: report.persona,
            confidence: classified.confidence,
            stability: report.stability,
            stability_fraction: report.fraction,
            action,
            service_error,
        };

        info!(
            persona_raw = %record.persona_raw,
            persona_final = %record.persona_final,
            confidence = record.confidence,
            stability = ?record.stability,
            action = record.action,
            service_error = record.service_error,
            "decision step"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{Persona, Stability};
    use crate::policy::DecisionResponse;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Policy stub returning a fixed action or a service error
    struct StubPolicy {
        action: i64,
        fail: bool,
        calls: AtomicU32,
    }

    impl StubPolicy {
        fn ok(action: i64) -> Self {
            Self {
                action,
                fail: false,
                calls: AtomicU32::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                action: 0,
                fail: true,
                calls: AtomicU32::new(0),
            }
        }
    }

    impl DecisionPolicy for StubPolicy {
        async fn decide(&self, _request: &DecisionRequest) -> crate::Result<DecisionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(crate::Error::Service("stub outage".to_string()))
            } else {
                Ok(DecisionResponse {
                    action: self.action,
                })
            }
        }
    }

    fn expert_features() -> FeatureObservation {
        FeatureObservation {
            speed: 0.9,
            idle: 0.1,
            hesitation: 0.1,
            entropy: 0.8,
        }
    }

    #[tokio::test]
    async fn test_step_produces_full_record() {
        let controller = AdaptiveController::new(StubPolicy::ok(7));
        let mut validator = PersonaValidator::new().unwrap();

        let record = controller
            .step(&mut validator, &expert_features(), &[0.1, 0.2])
            .await
            .unwrap();

        assert_eq!(record.persona_raw, Persona::Expert);
        assert_eq!(record.persona_final, Persona::Expert);
        assert_eq!(record.confidence, 0.9);
        assert_eq!(record.action, 7);
        assert!(!record.service_error);
        assert_eq!(validator.history_len(), 1);
    }

    #[tokio::test]
    async fn test_step_uses_stabilized_persona_not_raw() {
        let controller = AdaptiveController::new(StubPolicy::ok(1));
        let mut validator = PersonaValidator::new().unwrap();

        // Fill the window with novice labels first
        let novice = FeatureObservation {
            speed: 0.2,
            idle: 0.8,
            hesitation: 0.1,
            entropy: 0.5,
        };
        for _ in 0..5 {
            controller
                .step(&mut validator, &novice, &[0.0])
                .await
                .unwrap();
        }

        // One expert observation: raw flips, stabilized label does not
        let record = controller
            .step(&mut validator, &expert_features(), &[0.0])
            .await
            .unwrap();
        assert_eq!(record.persona_raw, Persona::Expert);
        assert_eq!(record.persona_final, Persona::NoviceOld);
        assert_eq!(record.stability, Stability::Stable);
    }

    #[tokio::test]
    async fn test_policy_failure_takes_fallback_and_flags_record() {
        let controller =
            AdaptiveController::with_parts(PersonaClassifier::new(), StubPolicy::failing(), 9);
        let mut validator = PersonaValidator::new().unwrap();

        let record = controller
            .step(&mut validator, &expert_features(), &[0.1])
            .await
            .unwrap();

        assert_eq!(record.action, 9);
        assert!(record.service_error);
        // History mutation happened before the failed call and survives it
        assert_eq!(validator.history_len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_observation_surfaces_without_touching_state() {
        let policy = StubPolicy::ok(1);
        let controller = AdaptiveController::new(policy);
        let mut validator = PersonaValidator::new().unwrap();

        let bad = FeatureObservation {
            speed: f64::NAN,
            idle: 0.5,
            hesitation: 0.5,
            entropy: 0.5,
        };
        let result = controller.step(&mut validator, &bad, &[0.1]).await;

        assert!(matches!(result, Err(crate::Error::Validation(_))));
        assert_eq!(validator.history_len(), 0);
        assert_eq!(controller.policy.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_action_is_configurable() {
        let controller =
            AdaptiveController::with_parts(PersonaClassifier::new(), StubPolicy::failing(), -1);
        assert_eq!(controller.fallback_action(), -1);
        let mut validator = PersonaValidator::new().unwrap();
        let record = controller
            .step(&mut validator, &expert_features(), &[])
            .await
            .unwrap();
        assert_eq!(record.action, -1);
    }
}
