use crate::state::SessionStore;
use crate::verdict::{parse_verdict, GateVerdict};

// ---------------------------------------------------------------------------
// ProposedInvocation / Decision
// ---------------------------------------------------------------------------

/// The protocol-relevant fields of a tool call about to execute.
/// Missing or malformed fields are simply absent; this layer never errors.
#[derive(Debug, Clone, Default)]
pub struct ProposedInvocation {
    pub tool_name: String,
    pub chain_id: Option<String>,
    pub gate_verdict: Option<String>,
    pub user_response: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Allow,
    Deny { reason: String },
}

impl Decision {
    fn deny(reason: impl Into<String>) -> Self {
        Decision::Deny { reason: reason.into() }
    }
}

/// Tools whose name carries this marker are governed by the gate.
const PROTOCOL_TOOL_MARKER: &str = "prompt_engine";

pub fn is_protocol_tool(tool_name: &str) -> bool {
    tool_name.contains(PROTOCOL_TOOL_MARKER)
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

/// Decide whether a prompt-engine invocation may proceed.
///
/// Rules fire in order; the first hit wins. Infrastructure problems
/// (unreadable state) fall through as "no pending gate" — only detected
/// protocol violations deny.
pub fn check(store: &SessionStore, session_id: &str, call: &ProposedInvocation) -> Decision {
    // 1. Non-protocol tools pass unconditionally.
    if !is_protocol_tool(&call.tool_name) {
        return Decision::Allow;
    }

    // Malformed fields count as absent throughout.
    let verdict = call.gate_verdict.as_deref().and_then(parse_verdict);
    let has_chain = present(&call.chain_id);

    // 2. An explicit FAIL verdict blocks until corrected.
    if let Some(GateVerdict::Fail { reason }) = &verdict {
        return Decision::deny(format!(
            "Gate review failed: {reason}. Address the issues above, then re-run with \
             gate_verdict \"GATE_REVIEW: PASS - <what was corrected>\"."
        ));
    }

    // 3. A chain call while a gate awaits its verdict must supply one.
    if has_chain && verdict.is_none() {
        if let Some(state) = store.load(session_id) {
            if let Some(gate) = state.pending_gate.as_deref().filter(|g| !g.is_empty()) {
                return Decision::deny(format!(
                    "Gate \"{gate}\" is awaiting a verdict. Review the gate criteria, then \
                     re-run with gate_verdict \"GATE_REVIEW: PASS|FAIL - <reason>\"."
                ));
            }
        }
    }

    // 4. Chain continuations must carry the prior step's output.
    if has_chain && !present(&call.user_response) {
        return Decision::deny(
            "Chain execution requires the previous step's output. Re-run with user_response \
             set to the prior step's result.",
        );
    }

    // 5. Nothing to object to.
    Decision::Allow
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
