//! Decision-Policy Wire Types

use serde::{Deserialize, Serialize};

use crate::persona::Persona;

/// Query sent to the decision policy: current state fused with the
/// stabilized persona.
///
/// The fixed length of `state` is owned by the policy's training
/// configuration; this core treats it as an opaque validated vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// Numeric state vector, validated upstream
    pub state: Vec<f64>,
    /// Stabilized operator persona
    pub persona: Persona,
}

/// Policy response: the selected action id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResponse {
    /// Action identifier chosen by the policy
    pub action: i64,
}

/// An action-selection policy the controller can query.
///
/// Implementations must bound the call (timeout or otherwise); the controller
/// treats any error uniformly as a recoverable service failure and falls back
/// to its configured default action.
pub trait DecisionPolicy {
    /// Select an action for the given state/persona pair
    fn decide(
        &self,
        request: &DecisionRequest,
    ) -> impl std::future::Future<Output = crate::Result<DecisionResponse>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = DecisionRequest {
            state: vec![0.1, 0.2],
            persona: Persona::NoviceOld,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"state":[0.1,0.2],"persona":"novice_old"}"#);
    }

    #[test]
    fn test_response_wire_format() {
        let response: DecisionResponse = serde_json::from_str(r#"{"action": 3}"#).unwrap();
        assert_eq!(response.action, 3);
    }

    #[test]
    fn test_response_rejects_missing_action() {
        let result: Result<DecisionResponse, _> = serde_json::from_str(r#"{"error": "boom"}"#);
        assert!(result.is_err());
    }
}
