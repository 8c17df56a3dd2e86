//! Decision-record sinks

pub mod decision_log;

pub use decision_log::{DecisionSink, JsonlDecisionLog, MemoryDecisionLog};
