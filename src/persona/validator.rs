//! Temporal Persona Stabilization
//!
//! Turns noisy per-observation labels into a damped signal by majority vote
//! over a bounded FIFO window of recent confident labels. One validator per
//! decision session; never shared across sessions.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::features::Persona;

/// Stability status of the reported persona
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    /// Majority label holds at least the stability-threshold share of the window
    Stable,
    /// Window empty, or no label holds a sufficient share
    Unstable,
}

/// Validator output for one update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityReport {
    /// Stabilized persona (majority, or the raw label when the window is empty)
    pub persona: Persona,
    /// Whether the majority is trustworthy
    pub stability: Stability,
    /// Share of the current window held by the reported persona
    /// (0.0 when the window is empty)
    pub fraction: f64,
}

/// Validator configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Window capacity (accepted labels retained)
    pub window: usize,
    /// Minimum confidence for a label to enter the window
    pub min_confidence: f64,
    /// Minimum majority share for a stable report
    pub stability_threshold: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            window: 10,
            min_confidence: 0.6,
            stability_threshold: 0.6,
        }
    }
}

impl ValidatorConfig {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> crate::Result<()> {
        if self.window == 0 {
            return Err(crate::Error::Config("window must be > 0".to_string()));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(crate::Error::Config(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            )));
        }
        if !(0.0..=1.0).contains(&self.stability_threshold) {
            return Err(crate::Error::Config(format!(
                "stability_threshold must be in [0, 1], got {}",
                self.stability_threshold
            )));
        }
        Ok(())
    }
}

/// Per-session stability filter over recent confident labels
#[derive(Debug, Clone)]
pub struct PersonaValidator {
    config: ValidatorConfig,
    /// Accepted labels, oldest first; never exceeds `config.window`
    history: VecDeque<Persona>,
}

impl PersonaValidator {
    /// Create with default config (window 10, thresholds 0.6)
    pub fn new() -> crate::Result<Self> {
        Self::with_config(ValidatorConfig::default())
    }

    /// Create with custom config, failing fast on invalid values
    pub fn with_config(config: ValidatorConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            history: VecDeque::with_capacity(config.window),
        })
    }

    /// Process one classified observation and report the stabilized persona.
    ///
    /// Labels at or above `min_confidence` enter the window, evicting the
    /// oldest entry at capacity; gated-out labels leave the window untouched
    /// but are still reported raw when the window is empty. The report always
    /// reflects the post-update window.
    ///
    /// Out-of-range confidences are accepted as-is (gating is a plain numeric
    /// comparison); callers should validate ranges upstream.
    pub fn update(&mut self, persona: Persona, confidence: f64) -> StabilityReport {
        if confidence >= self.config.min_confidence {
            if self.history.len() == self.config.window {
                self.history.pop_front();
            }
            self.history.push_back(persona);
        }

        match self.majority() {
            Some(final_persona) => {
                let fraction = self.count(final_persona) as f64 / self.history.len() as f64;
                let stability = if fraction >= self.config.stability_threshold {
                    Stability::Stable
                } else {
                    Stability::Unstable
                };
                StabilityReport {
                    persona: final_persona,
                    stability,
                    fraction,
                }
            }
            // Nothing has ever cleared the confidence gate: report the raw
            // label, unstable, storing nothing.
            None => StabilityReport {
                persona,
                stability: Stability::Unstable,
                fraction: 0.0,
            },
        }
    }

    /// Majority label of the current window.
    ///
    /// Tie-break is deterministic: among max-count labels the most recently
    /// appended wins, with lexical wire-name order as the documented final
    /// fallback (recency always resolves a non-empty window, so the fallback
    /// only anchors the rule).
    fn majority(&self) -> Option<Persona> {
        let max_count = self
            .history
            .iter()
            .map(|&p| self.count(p))
            .max()?;
        self.history
            .iter()
            .rev()
            .copied()
            .find(|&p| self.count(p) == max_count)
    }

    /// Occurrences of a label in the current window
    fn count(&self, persona: Persona) -> usize {
        self.history.iter().filter(|&&p| p == persona).count()
    }

    /// Number of accepted labels currently retained
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Snapshot of the window, oldest first
    pub fn history_snapshot(&self) -> Vec<Persona> {
        self.history.iter().copied().collect()
    }

    /// Active configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}
