//! # Persona Engine
//!
//! Persona inference and stabilization pipeline for an adaptive agent.
//! Pointer-telemetry features are classified into an operator persona,
//! smoothed over a bounded stability window, and fused into the query sent
//! to an external action-selection policy.
//!
//! ## Quick Start
//!
//! ```no_run
//! use persona_engine::{AdaptiveController, FeatureObservation, PersonaValidator};
//! use persona_engine::policy::HttpPolicyClient;
//!
//! # async fn run() -> persona_engine::Result<()> {
//! let policy = HttpPolicyClient::new("http://localhost:5001");
//! let controller = AdaptiveController::new(policy);
//! let mut validator = PersonaValidator::new()?;
//!
//! let features = FeatureObservation {
//!     speed: 0.82,
//!     idle: 0.10,
//!     hesitation: 0.15,
//!     entropy: 0.71,
//! };
//! let state = vec![0.3; 15];
//!
//! let record = controller.step(&mut validator, &features, &state).await?;
//! println!("action {} for {}", record.action, record.persona_final);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`persona`]: feature observations, the rule classifier, and the
//!   stability validator (the only stateful piece)
//! - [`policy`]: the seam to the external decision policy (HTTP client,
//!   timeout, bounded retry)
//! - [`adaptation`]: the controller orchestrating one decision step and the
//!   audit record it produces
//! - [`session`]: per-session validator instances (one operator, one window)
//! - [`logging`]: decision-record sinks (JSONL file, in-memory)
//! - [`app`]: configuration management
//!
//! ## Decision Pipeline
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │  Features    │───▶│  Classifier  │───▶│  Validator   │───▶│  Controller  │
//! │  (telemetry) │    │  (stateless) │    │  (window)    │    │  (fusion)    │
//! └──────────────┘    └──────────────┘    └──────────────┘    └──────┬───────┘
//!                                                                    │
//!                                  ┌──────────────┐    ┌─────────────▼──────┐
//!                                  │   Decision   │◀───│   Policy Service   │
//!                                  │   Record     │    │ (timeout+fallback) │
//!                                  └──────────────┘    └────────────────────┘
//! ```

pub mod persona;
pub mod policy;
pub mod adaptation;
pub mod session;
pub mod logging;
pub mod app;

// Re-export commonly used types
pub use adaptation::{AdaptiveController, DecisionRecord};
pub use persona::{
    ClassificationResult, FeatureObservation, Persona, PersonaClassifier, PersonaValidator,
    Stability, StabilityReport,
};
pub use policy::{DecisionPolicy, DecisionRequest, DecisionResponse};
pub use session::SessionRegistry;

/// Result type alias for the persona engine
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the persona engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed feature observation. A caller contract violation, surfaced
    /// immediately and never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Decision-policy call failed, timed out, or returned malformed output.
    /// Recovered by the controller via the fallback action.
    #[error("Policy service error: {0}")]
    Service(String),

    /// Invalid threshold/window configuration. Fatal at construction time.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
