use crate::sync;
use std::path::{Path, PathBuf};

/// Mirror a dev checkout of the plugin into the installed cache so edited
/// hooks and prompt caches take effect without a reinstall. Silent no-op
/// when either side is missing (marketplace installs have no checkout).
pub fn run(_storage_root: &Path) -> anyhow::Result<i32> {
    let source = dir_from_env("CHAINHOOK_SYNC_SOURCE").or_else(sync::find_source_dir);
    let cache = dir_from_env("CHAINHOOK_SYNC_DEST").or_else(sync::find_cache_dir);

    let (Some(source), Some(cache)) = (source, cache) else {
        return Ok(0);
    };

    let synced = sync::sync_plugin(&source, &cache)?;
    if !synced.is_empty() {
        println!("[Dev Sync] {}", synced.join(", "));
    }
    Ok(0)
}

fn dir_from_env(var: &str) -> Option<PathBuf> {
    std::env::var(var).ok().map(PathBuf::from).filter(|p| p.is_dir())
}
