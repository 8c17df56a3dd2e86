//! Application Layer
//!
//! Configuration management for the inference pipeline.

pub mod config;

pub use config::Config;
