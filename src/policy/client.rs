//! HTTP Decision-Policy Client
//!
//! Talks to the external model-serving process that maps `(state, persona)`
//! to an action. The call is bounded by a request timeout sized to the
//! decision loop's latency budget; any failure surfaces as `Error::Service`
//! for the controller's fallback path.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::retry::send_with_retry;
use super::types::{DecisionPolicy, DecisionRequest, DecisionResponse};

/// Route serving action predictions
const PREDICT_ROUTE: &str = "/predict-action";
/// Route serving the readiness probe
const HEALTH_ROUTE: &str = "/health";

/// Policy-service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Base URL of the policy service
    pub endpoint: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Action used when the service fails or times out
    pub fallback_action: i64,
    /// HTTP attempts per decision (kept at 1 by default; the decision loop
    /// cannot absorb backoff delays)
    pub max_attempts: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5001".to_string(),
            timeout_ms: 1200,
            fallback_action: 0,
            max_attempts: 1,
        }
    }
}

impl PolicyConfig {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> crate::Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(crate::Error::Config("endpoint must not be empty".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(crate::Error::Config("timeout_ms must be > 0".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(crate::Error::Config("max_attempts must be > 0".to_string()));
        }
        Ok(())
    }
}

/// HTTP client for the decision-policy service
#[derive(Debug, Clone)]
pub struct HttpPolicyClient {
    /// Service configuration
    pub config: PolicyConfig,
    /// HTTP client, built with the configured timeout
    client: Client,
}

impl HttpPolicyClient {
    /// Create against a base URL with default settings
    pub fn new(endpoint: &str) -> Self {
        let config = PolicyConfig {
            endpoint: endpoint.to_string(),
            ..Default::default()
        };
        // Default config carries a valid timeout, so the builder cannot fail
        // except under platform TLS init problems; fall back to the stock
        // client in that case.
        let client = Self::build_client(&config).unwrap_or_default();
        Self { config, client }
    }

    /// Create with custom settings, failing fast on invalid values
    pub fn with_config(config: PolicyConfig) -> crate::Result<Self> {
        config.validate()?;
        let client = Self::build_client(&config)
            .map_err(|e| crate::Error::Config(format!("HTTP client build failed: {}", e)))?;
        Ok(Self { config, client })
    }

    fn build_client(config: &PolicyConfig) -> Result<Client, reqwest::Error> {
        Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
    }

    fn predict_url(&self) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), PREDICT_ROUTE)
    }

    fn health_url(&self) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), HEALTH_ROUTE)
    }

    /// Probe service readiness. Advisory only: the decision step never
    /// consults this and treats any late or failed response uniformly.
    pub async fn health(&self) -> bool {
        match self.client.get(self.health_url()).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

impl DecisionPolicy for HttpPolicyClient {
    async fn decide(&self, request: &DecisionRequest) -> crate::Result<DecisionResponse> {
        let url = self.predict_url();
        debug!(
            persona = %request.persona,
            state_len = request.state.len(),
            "querying decision policy"
        );

        let response = send_with_retry(
            &self.client,
            |c| c.post(&url).json(request),
            self.config.max_attempts,
            "decision policy",
        )
        .await?;

        let decision: DecisionResponse = response
            .json()
            .await
            .map_err(|e| crate::Error::Service(format!("malformed policy response: {}", e)))?;

        debug!(action = decision.action, "decision policy responded");
        Ok(decision)
    }
}
