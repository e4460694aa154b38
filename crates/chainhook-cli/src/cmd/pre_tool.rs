use crate::hook_io::{self, HookInput};
use chainhook_core::enforce::{check, Decision, ProposedInvocation};
use chainhook_core::state::SessionStore;
use chainhook_core::{io, paths};
use std::path::Path;

const EVENT: &str = "PreToolUse";

/// Exit status the host interprets as "block the tool and feed stderr back".
pub const BLOCK_EXIT: i32 = 2;

const PLAN_REVIEW_FRAME: &str = "\
[Plan Review Gate]

Before finalizing, complete this structured reflection:

**Risk Assessment:**
- Critical Risk: (single failure point or \"mitigated\")
- Unvalidated Assumption: (unverified dependency or \"verified\")

**Completeness Check:**
- Coverage Gap: (missing scenario or \"complete\")
- Alternative: (considered trade-off or \"optimal chosen\")

**Refined Plan:**
Incorporate findings above into your plan, then call ExitPlanMode to proceed.";

pub fn run(storage_root: &Path) -> anyhow::Result<i32> {
    let input = HookInput::from_reader(std::io::stdin().lock());

    if input.tool_name == "ExitPlanMode" {
        return Ok(plan_review(storage_root, &input.session_id));
    }

    let call = ProposedInvocation {
        tool_name: input.tool_name.clone(),
        chain_id: input.tool_input_str("chain_id"),
        gate_verdict: input.tool_input_str("gate_verdict"),
        user_response: input.tool_input_str("user_response"),
    };

    let store = SessionStore::new(storage_root);
    if let Decision::Deny { reason } = check(&store, &input.session_id, &call) {
        hook_io::print_deny(EVENT, &reason);
    }
    Ok(0)
}

/// One-shot reflection gate: the first ExitPlanMode of a session is blocked
/// with the reflection frame, later ones pass through. A marker that cannot
/// be written means the one-shot guarantee is lost, so we let the call
/// through rather than block every plan.
fn plan_review(storage_root: &Path, session_id: &str) -> i32 {
    let marker = paths::plan_review_marker(storage_root, session_id);
    if marker.exists() {
        return 0;
    }
    if io::atomic_write(&marker, b"").is_err() {
        return 0;
    }
    eprintln!("{PLAN_REVIEW_FRAME}");
    BLOCK_EXIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn plan_review_blocks_once_per_session() {
        let dir = TempDir::new().unwrap();
        assert_eq!(plan_review(dir.path(), "s1"), BLOCK_EXIT);
        assert_eq!(plan_review(dir.path(), "s1"), 0);
        // A different session gets its own one-shot block.
        assert_eq!(plan_review(dir.path(), "s2"), BLOCK_EXIT);
    }

    #[test]
    fn unwritable_marker_falls_open() {
        let dir = TempDir::new().unwrap();
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, b"").unwrap();
        assert_eq!(plan_review(&blocked, "s1"), 0);
    }
}
