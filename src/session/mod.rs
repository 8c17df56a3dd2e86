//! Per-session validator instances

pub mod registry;

pub use registry::SessionRegistry;
