use crate::state::SessionChainState;

/// Criteria shown in a reminder are truncated to this many characters.
const CRITERION_WIDTH: usize = 40;

/// Criteria shown in a reminder, at most.
const REMINDER_CRITERIA: usize = 3;

// ---------------------------------------------------------------------------
// chain_reminder
// ---------------------------------------------------------------------------

/// Build the `additionalContext` reminder for a freshly parsed state:
/// a gate block when a verdict is owed, a chain line when steps remain.
/// Returns `None` when there is nothing worth saying.
pub fn chain_reminder(state: &SessionChainState) -> Option<String> {
    let mut lines = Vec::new();

    if let Some(gate) = state.pending_gate.as_deref().filter(|g| !g.is_empty()) {
        lines.push(format!("[Gate] {gate}"));
        lines.push("  Respond: GATE_REVIEW: PASS|FAIL - <reason>".to_string());
        let checks: Vec<String> = state
            .gate_criteria
            .iter()
            .take(REMINDER_CRITERIA)
            .map(|c| truncate(c, CRITERION_WIDTH))
            .collect();
        if !checks.is_empty() {
            lines.push(format!("  Check: {}", checks.join(" | ")));
        }
    }

    if state.current_step > 0 && state.current_step < state.total_steps {
        lines.push(format!(
            "[Chain] Step {}/{} - call prompt_engine to continue",
            state.current_step, state.total_steps
        ));
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_reminder_lists_criteria() {
        let state = SessionChainState {
            pending_gate: Some("Security Review".to_string()),
            gate_criteria: vec![
                "No secrets in diff".to_string(),
                "Input validation on new endpoints".to_string(),
                "Tests cover the failure path".to_string(),
                "A fourth criterion nobody sees".to_string(),
            ],
            ..Default::default()
        };
        let text = chain_reminder(&state).unwrap();
        assert!(text.contains("[Gate] Security Review"));
        assert!(text.contains("GATE_REVIEW: PASS|FAIL"));
        assert!(text.contains("No secrets in diff"));
        assert!(!text.contains("fourth criterion"));
    }

    #[test]
    fn mid_chain_reminder() {
        let state = SessionChainState {
            current_step: 2,
            total_steps: 5,
            ..Default::default()
        };
        let text = chain_reminder(&state).unwrap();
        assert!(text.contains("Step 2/5"));
    }

    #[test]
    fn final_step_is_quiet() {
        let state = SessionChainState {
            current_step: 5,
            total_steps: 5,
            ..Default::default()
        };
        assert!(chain_reminder(&state).is_none());
    }

    #[test]
    fn long_criteria_truncated() {
        let state = SessionChainState {
            pending_gate: Some("Review".to_string()),
            gate_criteria: vec!["x".repeat(80)],
            ..Default::default()
        };
        let text = chain_reminder(&state).unwrap();
        let check_line = text.lines().find(|l| l.contains("Check:")).unwrap();
        assert!(check_line.len() < 80);
    }

    #[test]
    fn empty_state_yields_nothing() {
        assert!(chain_reminder(&SessionChainState::default()).is_none());
    }
}
