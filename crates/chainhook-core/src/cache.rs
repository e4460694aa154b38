use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Metadata cache (read-only)
// ---------------------------------------------------------------------------

/// Human-readable metadata for a prompt or gate, written by the prompt-engine
/// server. We only ever read it, and only for labels; enforcement decisions
/// never depend on a cache hit.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptMetadata {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub struct MetadataCache {
    cache_dir: PathBuf,
}

impl MetadataCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    fn entry_path(&self, id: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}.json", crate::paths::sanitize_session_id(id)))
    }

    /// Look up metadata by id. Missing or unreadable entries are `None`.
    pub fn lookup(&self, id: &str) -> Option<PromptMetadata> {
        let data = std::fs::read_to_string(self.entry_path(id)).ok()?;
        serde_json::from_str(&data).ok()
    }

    /// Display label for an id: cached name if present, the id otherwise.
    pub fn label(&self, id: &str) -> String {
        self.lookup(id)
            .and_then(|m| m.name)
            .unwrap_or_else(|| id.to_string())
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
