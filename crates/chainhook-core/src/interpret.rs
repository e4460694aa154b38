use crate::state::SessionChainState;
use chrono::Utc;
use regex::Regex;
use std::sync::OnceLock;

/// Gate criteria beyond the first five are discarded.
pub const MAX_GATE_CRITERIA: usize = 5;

// ---------------------------------------------------------------------------
// Pattern matchers
//
// The prompt engine renders natural-language markdown, not a structured
// payload, so each signal gets its own bounded matcher and the first match
// wins. No aggregation across repeated markers.
// ---------------------------------------------------------------------------

static STEP_RE: OnceLock<Regex> = OnceLock::new();
static CHAIN_RE: OnceLock<Regex> = OnceLock::new();
static GATE_NAME_RE: OnceLock<Regex> = OnceLock::new();
static BULLET_RE: OnceLock<Regex> = OnceLock::new();
static PROMPT_RE: OnceLock<Regex> = OnceLock::new();

fn step_re() -> &'static Regex {
    STEP_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:step|progress)\s+(\d{1,3})\s*(?:of|/)\s*(\d{1,3})\b").unwrap()
    })
}

fn chain_re() -> &'static Regex {
    CHAIN_RE.get_or_init(|| Regex::new(r"\bchain[-_]([A-Za-z0-9][A-Za-z0-9_-]*)").unwrap())
}

/// Substring, not word match: the canonical `## Inline Gates` section header
/// and prose like "Quality Gates" must both trigger.
fn has_gate_content(text: &str) -> bool {
    text.contains("Gate")
}

fn gate_name_re() -> &'static Regex {
    GATE_NAME_RE.get_or_init(|| {
        // Individual gates render as ###-level headings under the
        // "## Inline Gates" section; shallower headings are document
        // structure, never gate names.
        Regex::new(r"(?m)###\s*([A-Za-z][A-Za-z0-9 _-]+)$").unwrap()
    })
}

fn bullet_re() -> &'static Regex {
    BULLET_RE.get_or_init(|| Regex::new(r"(?m)^\s*[-•]\s+(.+)$").unwrap())
}

fn prompt_re() -> &'static Regex {
    PROMPT_RE.get_or_init(|| Regex::new(r">>([A-Za-z0-9][A-Za-z0-9_-]*)").unwrap())
}

// ---------------------------------------------------------------------------
// interpret
// ---------------------------------------------------------------------------

/// Scan a prompt-engine response for chain-progress and gate markers.
///
/// Returns `None` when no actionable signal is present (no step counter and
/// no pending gate). The caller must then leave any stored state untouched;
/// a signal-free response is not a reason to overwrite or clear.
pub fn interpret(text: &str) -> Option<SessionChainState> {
    let mut state = SessionChainState {
        updated_at: Utc::now(),
        ..Default::default()
    };

    if let Some(caps) = step_re().captures(text) {
        // Bounded to 3 digits by the pattern, so parse cannot overflow u32.
        state.current_step = caps[1].parse().unwrap_or(0);
        state.total_steps = caps[2].parse().unwrap_or(0);
    }

    if let Some(caps) = chain_re().captures(text) {
        // Only the token after the chain-/chain_ separator is the id.
        state.chain_id = Some(caps[1].to_string());
    }

    if let Some(caps) = prompt_re().captures(text) {
        state.last_prompt_id = Some(caps[1].to_string());
    }

    if has_gate_content(text) {
        // First ###-level heading names the gate. Gate content with no such
        // heading leaves pending_gate absent.
        state.pending_gate = gate_name_re()
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
            .filter(|name| !name.is_empty());

        state.gate_criteria = bullet_re()
            .captures_iter(text)
            .map(|caps| caps[1].trim().to_string())
            .filter(|c| !c.is_empty())
            .take(MAX_GATE_CRITERIA)
            .collect();
    }

    if state.current_step > 0 || state.has_pending_gate() {
        Some(state)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_of_form() {
        let state = interpret("Executing chain... Step 2 of 5 complete.").unwrap();
        assert_eq!(state.current_step, 2);
        assert_eq!(state.total_steps, 5);
    }

    #[test]
    fn progress_slash_form() {
        let state = interpret("Progress 3/7 — continuing").unwrap();
        assert_eq!(state.current_step, 3);
        assert_eq!(state.total_steps, 7);
    }

    #[test]
    fn step_case_insensitive() {
        let state = interpret("STEP 1 OF 4").unwrap();
        assert_eq!(state.current_step, 1);
        assert_eq!(state.total_steps, 4);
    }

    #[test]
    fn first_step_marker_wins() {
        let state = interpret("Step 2 of 5 done. Next: Step 3 of 5.").unwrap();
        assert_eq!(state.current_step, 2);
    }

    #[test]
    fn chain_id_is_the_token_after_the_separator() {
        let state = interpret("Running chain-code-review, Step 1 of 3").unwrap();
        assert_eq!(state.chain_id.as_deref(), Some("code-review"));
    }

    #[test]
    fn chain_id_underscore_form() {
        let state = interpret("chain_audit_v2 Step 1 of 2").unwrap();
        assert_eq!(state.chain_id.as_deref(), Some("audit_v2"));
    }

    #[test]
    fn last_prompt_id_from_shorthand() {
        let state = interpret("Executed >>security-scan\nStep 1 of 2").unwrap();
        assert_eq!(state.last_prompt_id.as_deref(), Some("security-scan"));
    }

    #[test]
    fn inline_gates_section_parsed() {
        // The canonical rendering: an "## Inline Gates" section with one
        // ###-level heading per gate.
        let state = interpret("## Inline Gates\n### Security Review\n- No secrets in diff\n")
            .unwrap();
        assert_eq!(state.pending_gate.as_deref(), Some("Security Review"));
        assert_eq!(state.gate_criteria, vec!["No secrets in diff".to_string()]);
    }

    #[test]
    fn gate_with_heading_and_criteria() {
        let text = "\
## Inline Gates

### Security Review

Verify before continuing:
- No secrets in diff
- Input validation on new endpoints
- Tests cover the failure path
";
        let state = interpret(text).unwrap();
        assert_eq!(state.pending_gate.as_deref(), Some("Security Review"));
        assert_eq!(state.gate_criteria.len(), 3);
        assert_eq!(state.gate_criteria[0], "No secrets in diff");
    }

    #[test]
    fn section_header_is_not_the_gate_name() {
        // "## Inline Gates" triggers detection but names nothing; the first
        // ### heading does.
        let text = "# Rendered Prompt\n## Inline Gates\n### Code Quality\n- lint clean\n";
        let state = interpret(text).unwrap();
        assert_eq!(state.pending_gate.as_deref(), Some("Code Quality"));
    }

    #[test]
    fn gate_word_without_heading_leaves_gate_absent() {
        // Gate content detected but nothing to name it; with no step counter
        // either there is no actionable signal.
        assert!(interpret("A Gate may apply here.").is_none());
    }

    #[test]
    fn shallow_heading_is_not_a_gate_name() {
        let state = interpret("## Quality Gate\nStep 1 of 2").unwrap();
        assert!(state.pending_gate.is_none());
        assert_eq!(state.current_step, 1);
    }

    #[test]
    fn criteria_capped_at_five() {
        let text = "\
## Inline Gates
### Release Gate
- one
- two
- three
- four
- five
- six
- seven
";
        let state = interpret(text).unwrap();
        assert_eq!(state.gate_criteria.len(), 5);
        assert_eq!(state.gate_criteria[4], "five");
    }

    #[test]
    fn criteria_only_collected_for_gate_content() {
        let text = "Step 1 of 2\n- just a list item\n- another";
        let state = interpret(text).unwrap();
        assert!(state.gate_criteria.is_empty());
        assert!(state.pending_gate.is_none());
    }

    #[test]
    fn no_signal_returns_none() {
        assert!(interpret("Here is the refactored function you asked for.").is_none());
        assert!(interpret("").is_none());
    }

    #[test]
    fn delegate_is_not_a_gate() {
        assert!(interpret("We can delegate this to the worker.").is_none());
    }

    #[test]
    fn idempotent() {
        let text = "## Inline Gates\n### Review Gate\nStep 2 of 4\n- criterion";
        let first = interpret(text).unwrap();
        let mut second = interpret(text).unwrap();
        second.updated_at = first.updated_at;
        assert_eq!(first, second);
    }
}
