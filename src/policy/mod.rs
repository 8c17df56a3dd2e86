//! Decision-policy seam: the external action-selection model
//!
//! The controller only sees the [`DecisionPolicy`] trait; the HTTP client is
//! one implementation of it.

pub mod types;
pub mod client;
pub mod retry;

pub use client::{HttpPolicyClient, PolicyConfig};
pub use types::{DecisionPolicy, DecisionRequest, DecisionResponse};
