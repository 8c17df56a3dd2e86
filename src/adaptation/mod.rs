//! Adaptive decision step: orchestration and its audit record

pub mod controller;
pub mod record;

pub use controller::AdaptiveController;
pub use record::DecisionRecord;
