use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// SessionChainState
// ---------------------------------------------------------------------------

/// Chain/gate progress for one session, recovered from the latest
/// prompt-engine response. One record per session id; a missing record
/// means no chain or gate is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionChainState {
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub current_step: u32,
    #[serde(default)]
    pub total_steps: u32,
    #[serde(default)]
    pub pending_gate: Option<String>,
    #[serde(default)]
    pub gate_criteria: Vec<String>,
    #[serde(default)]
    pub last_prompt_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Default for SessionChainState {
    fn default() -> Self {
        Self {
            chain_id: None,
            current_step: 0,
            total_steps: 0,
            pending_gate: None,
            gate_criteria: Vec::new(),
            last_prompt_id: None,
            updated_at: Utc::now(),
        }
    }
}

impl SessionChainState {
    pub fn has_pending_gate(&self) -> bool {
        self.pending_gate.as_deref().is_some_and(|g| !g.is_empty())
    }

    /// A chain is complete when the last step has been reached and no gate
    /// is awaiting a verdict. Complete records are eligible for deletion.
    pub fn is_complete(&self) -> bool {
        self.total_steps > 0 && self.current_step >= self.total_steps && !self.has_pending_gate()
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// Durable per-session store. One JSON file per session id under
/// `<storage_root>/sessions/`; whole-record replace on every save.
///
/// Storage is best-effort: `load` treats missing or corrupt records as
/// absent, and `save`/`clear` swallow I/O failures. A storage problem
/// degrades chain tracking to stateless for that session; it never aborts
/// the surrounding hook.
pub struct SessionStore {
    storage_root: PathBuf,
}

impl SessionStore {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
        }
    }

    fn record_path(&self, session_id: &str) -> PathBuf {
        paths::session_state_path(&self.storage_root, session_id)
    }

    pub fn load(&self, session_id: &str) -> Option<SessionChainState> {
        let path = self.record_path(session_id);
        let data = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&data) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "corrupt session record treated as absent");
                None
            }
        }
    }

    pub fn save(&self, session_id: &str, state: &SessionChainState) {
        let path = self.record_path(session_id);
        let data = match serde_json::to_vec_pretty(state) {
            Ok(d) => d,
            Err(e) => {
                tracing::debug!(error = %e, "session record serialization failed");
                return;
            }
        };
        if let Err(e) = crate::io::atomic_write(&path, &data) {
            tracing::debug!(path = %path.display(), error = %e, "session record write dropped");
        }
    }

    pub fn clear(&self, session_id: &str) {
        let path = self.record_path(session_id);
        if let Err(e) = std::fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "session record remove dropped");
            }
        }
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
