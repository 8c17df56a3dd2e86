//! Session Registry
//!
//! Hands out one [`PersonaValidator`] per decision session. Each validator
//! sits behind its own mutex so steps for the same session serialize while
//! distinct sessions proceed fully in parallel. There is deliberately no
//! process-wide validator: cross-session sharing would interleave windows
//! and make stability reports non-reproducible.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::persona::{PersonaValidator, ValidatorConfig};

/// Registry of per-session validators
pub struct SessionRegistry {
    config: ValidatorConfig,
    sessions: Mutex<HashMap<Uuid, Arc<Mutex<PersonaValidator>>>>,
}

impl SessionRegistry {
    /// Create a registry handing out validators with default config
    pub fn new() -> crate::Result<Self> {
        Self::with_config(ValidatorConfig::default())
    }

    /// Create with custom validator config, failing fast on invalid values
    pub fn with_config(config: ValidatorConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sessions: Mutex::new(HashMap::new()),
        })
    }

    /// Start a new session with a fresh, empty validator
    pub fn create_session(&self) -> crate::Result<Uuid> {
        let id = Uuid::new_v4();
        let validator = PersonaValidator::with_config(self.config)?;
        self.sessions
            .lock()
            .insert(id, Arc::new(Mutex::new(validator)));
        Ok(id)
    }

    /// Handle to a session's validator. Lock it for the full duration of a
    /// decision step so the window mutation and the report stay atomic per
    /// session.
    ///
    /// The guard is not `Send`, so a step awaited while holding it cannot
    /// cross threads: run session pipelines on a current-thread runtime, or
    /// give each session its own spawned task that owns the handle for the
    /// whole step. Swap in an async mutex if guards must be held across
    /// `.await` on a multi-threaded runtime.
    pub fn validator(&self, id: Uuid) -> Option<Arc<Mutex<PersonaValidator>>> {
        self.sessions.lock().get(&id).cloned()
    }

    /// End a session, discarding its validator state
    pub fn end_session(&self, id: Uuid) -> bool {
        self.sessions.lock().remove(&id).is_some()
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Whether no sessions are live
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}
