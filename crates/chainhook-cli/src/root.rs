use std::path::{Path, PathBuf};

/// Resolve the storage root for session records and markers.
///
/// Priority:
/// 1. `--storage-root` flag / `CHAINHOOK_STORAGE_ROOT` env var (passed in as `explicit`)
/// 2. `CHAINHOOK_WORKSPACE` env var (user-defined workspace), `.chainhook/` inside it
/// 3. `CLAUDE_PLUGIN_ROOT` env var (set by the plugin system), `.chainhook/` inside it
/// 4. `<temp dir>/chainhook` fallback
pub fn resolve_storage_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    for var in ["CHAINHOOK_WORKSPACE", "CLAUDE_PLUGIN_ROOT"] {
        if let Ok(value) = std::env::var(var) {
            let dir = PathBuf::from(&value);
            if dir.is_dir() {
                return dir.join(".chainhook");
            }
        }
    }

    std::env::temp_dir().join("chainhook")
}
