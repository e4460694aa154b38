use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

/// Per-session chain/gate records live here, one JSON file per session.
pub const SESSIONS_DIR: &str = "sessions";

/// One-shot plan-review markers, one empty file per session.
pub const PLAN_REVIEW_DIR: &str = "plan-review";

/// Prompt/gate metadata cache (read-only from our side).
pub const CACHE_DIR: &str = "cache";

pub const CONFIG_FILE: &str = "chainhook.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn sessions_dir(storage_root: &Path) -> PathBuf {
    storage_root.join(SESSIONS_DIR)
}

pub fn session_state_path(storage_root: &Path, session_id: &str) -> PathBuf {
    sessions_dir(storage_root).join(format!("{}.json", sanitize_session_id(session_id)))
}

pub fn plan_review_marker(storage_root: &Path, session_id: &str) -> PathBuf {
    storage_root
        .join(PLAN_REVIEW_DIR)
        .join(format!("{}.done", sanitize_session_id(session_id)))
}

pub fn config_path(storage_root: &Path) -> PathBuf {
    storage_root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Session id sanitization
// ---------------------------------------------------------------------------

static UNSAFE_RE: OnceLock<Regex> = OnceLock::new();

fn unsafe_re() -> &'static Regex {
    UNSAFE_RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._\-]").unwrap())
}

/// Reduce a host-supplied session id to a safe filename component.
/// Empty ids map to "default" so a record always has somewhere to live.
pub fn sanitize_session_id(session_id: &str) -> String {
    let cleaned = unsafe_re().replace_all(session_id, "_");
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        "default".to_string()
    } else {
        cleaned.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_passes_safe_ids() {
        assert_eq!(sanitize_session_id("abc-123_XY.z"), "abc-123_XY.z");
    }

    #[test]
    fn sanitize_rewrites_separators() {
        assert_eq!(sanitize_session_id("../../etc/passwd"), "_etc_passwd");
        assert_eq!(sanitize_session_id("a/b\\c"), "a_b_c");
    }

    #[test]
    fn sanitize_empty_is_default() {
        assert_eq!(sanitize_session_id(""), "default");
        assert_eq!(sanitize_session_id("..."), "default");
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/chainhook");
        assert_eq!(
            session_state_path(root, "s1"),
            PathBuf::from("/tmp/chainhook/sessions/s1.json")
        );
        assert_eq!(
            plan_review_marker(root, "s1"),
            PathBuf::from("/tmp/chainhook/plan-review/s1.done")
        );
    }
}
