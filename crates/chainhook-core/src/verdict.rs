use regex::Regex;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// GateVerdict
// ---------------------------------------------------------------------------

/// Outcome supplied for a pending gate: `GATE_REVIEW: <PASS|FAIL> - <reason>`.
/// Derived per invocation, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum GateVerdict {
    Pass { reason: String },
    Fail { reason: String },
}

impl GateVerdict {
    pub fn is_fail(&self) -> bool {
        matches!(self, GateVerdict::Fail { .. })
    }

    pub fn reason(&self) -> &str {
        match self {
            GateVerdict::Pass { reason } | GateVerdict::Fail { reason } => reason,
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

static VERDICT_RE: OnceLock<Regex> = OnceLock::new();

fn verdict_re() -> &'static Regex {
    VERDICT_RE.get_or_init(|| {
        // Reason separator is "-" or ":"; the reason itself is free text.
        Regex::new(r"(?i)GATE_REVIEW:\s*(PASS|FAIL)\s*(?:[-:]\s*(.*))?").unwrap()
    })
}

/// Parse a verdict string. Anything that doesn't carry the literal marker
/// is treated as no verdict at all.
pub fn parse_verdict(text: &str) -> Option<GateVerdict> {
    let caps = verdict_re().captures(text)?;
    let reason = caps
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|r| !r.is_empty())
        .unwrap_or("unspecified")
        .to_string();
    if caps[1].eq_ignore_ascii_case("fail") {
        Some(GateVerdict::Fail { reason })
    } else {
        Some(GateVerdict::Pass { reason })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_with_reason() {
        let v = parse_verdict("GATE_REVIEW: PASS - all checks done").unwrap();
        assert_eq!(v, GateVerdict::Pass { reason: "all checks done".to_string() });
    }

    #[test]
    fn fail_with_reason() {
        let v = parse_verdict("GATE_REVIEW: FAIL - missing tests").unwrap();
        assert!(v.is_fail());
        assert_eq!(v.reason(), "missing tests");
    }

    #[test]
    fn colon_separator() {
        let v = parse_verdict("GATE_REVIEW: FAIL: coverage dropped").unwrap();
        assert_eq!(v.reason(), "coverage dropped");
    }

    #[test]
    fn token_case_insensitive() {
        assert!(parse_verdict("gate_review: fail - x").unwrap().is_fail());
        assert!(!parse_verdict("GATE_REVIEW: pass - x").unwrap().is_fail());
    }

    #[test]
    fn missing_reason_defaults() {
        let v = parse_verdict("GATE_REVIEW: FAIL").unwrap();
        assert_eq!(v.reason(), "unspecified");
        let v = parse_verdict("GATE_REVIEW: FAIL - ").unwrap();
        assert_eq!(v.reason(), "unspecified");
    }

    #[test]
    fn garbage_is_absent() {
        assert!(parse_verdict("").is_none());
        assert!(parse_verdict("looks good to me").is_none());
        assert!(parse_verdict("REVIEW: PASS").is_none());
    }
}
