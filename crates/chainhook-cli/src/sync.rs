use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Directories mirrored from a dev checkout into the installed plugin cache.
const SYNC_DIRS: &[&str] = &[".claude-plugin", "hooks", "server/cache"];

const PLUGIN_NAME: &str = "claude-prompts-mcp";

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Locate a plugin source checkout at the usual dev locations.
pub fn find_source_dir() -> Option<PathBuf> {
    let home = home::home_dir()?;
    ["Applications", "projects", "dev"]
        .iter()
        .map(|base| home.join(base).join(PLUGIN_NAME))
        .find(|c| c.join("server").is_dir() && c.join(".claude-plugin").is_dir())
}

/// Locate the installed plugin cache (first version directory).
pub fn find_cache_dir() -> Option<PathBuf> {
    let base = home::home_dir()?
        .join(".claude/plugins/cache/minipuft-marketplace")
        .join(PLUGIN_NAME);
    let mut versions: Vec<PathBuf> = std::fs::read_dir(&base)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    versions.sort();
    versions.into_iter().next()
}

// ---------------------------------------------------------------------------
// Mirroring
// ---------------------------------------------------------------------------

fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Replace `dst` with the contents of `src`. Returns false when `src` is
/// missing (nothing to sync).
pub fn sync_directory(src: &Path, dst: &Path) -> Result<bool> {
    if !src.is_dir() {
        return Ok(false);
    }
    if dst.exists() {
        std::fs::remove_dir_all(dst)
            .with_context(|| format!("removing stale {}", dst.display()))?;
    }
    copy_tree(src, dst).with_context(|| format!("copying {}", src.display()))?;
    Ok(true)
}

/// Mirror the well-known plugin directories; returns the names synced.
pub fn sync_plugin(source: &Path, cache: &Path) -> Result<Vec<String>> {
    let mut synced = Vec::new();
    for name in SYNC_DIRS {
        let dst = cache.join(name);
        if let Some(parent) = dst.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if sync_directory(&source.join(name), &dst)? {
            synced.push((*name).to_string());
        }
    }
    Ok(synced)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
