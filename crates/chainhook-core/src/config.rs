use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// HookConfig
// ---------------------------------------------------------------------------

/// Explicit configuration for the hook binary. The CLI resolves a storage
/// root and hands paths in; nothing in core discovers paths on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookConfig {
    /// Root for session records and plan-review markers.
    pub storage_root: PathBuf,
    /// Prompt/gate metadata cache directory.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

impl HookConfig {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        let storage_root = storage_root.into();
        Self {
            cache_dir: None,
            storage_root,
        }
    }

    /// Load `chainhook.yaml` from the storage root when present; otherwise
    /// fall back to defaults rooted at `storage_root`.
    pub fn load_or_default(storage_root: impl Into<PathBuf>) -> Result<Self> {
        let storage_root = storage_root.into();
        let path = paths::config_path(&storage_root);
        if !path.exists() {
            return Ok(Self::new(storage_root));
        }
        let data = std::fs::read_to_string(&path)?;
        let mut config: HookConfig = serde_yaml::from_str(&data)?;
        if config.storage_root.as_os_str().is_empty() {
            config.storage_root = storage_root;
        }
        Ok(config)
    }

    /// Effective cache dir: configured value or `<storage_root>/cache`.
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| self.storage_root.join(paths::CACHE_DIR))
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
