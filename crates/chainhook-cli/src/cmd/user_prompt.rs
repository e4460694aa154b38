use crate::hook_io::{self, HookInput};
use chainhook_core::cache::MetadataCache;
use chainhook_core::config::HookConfig;
use chainhook_core::reminder::chain_reminder;
use chainhook_core::state::SessionStore;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

const EVENT: &str = "UserPromptSubmit";

/// Inline-gate criteria shown in context, truncated and capped like the
/// post-tool reminder.
const GATE_WIDTH: usize = 40;
const GATE_LIMIT: usize = 3;

/// Inspect a submitted prompt for prompt-engine syntax and replay any
/// recorded chain/gate state, so the assistant routes the work through the
/// prompt engine instead of improvising:
/// - `>>name` prompt invocation shorthand
/// - `>>a --> >>b` chain syntax
/// - `:: 'criteria'` / `:: gate-id` inline gates
pub fn run(storage_root: &Path) -> anyhow::Result<i32> {
    let input = HookInput::from_reader(std::io::stdin().lock());
    if input.prompt.is_empty() {
        return Ok(0);
    }

    let mut lines: Vec<String> = Vec::new();

    // A chain or gate recorded by post-tool-use is still live; surface it
    // before anything about the new prompt.
    if !input.session_id.is_empty() {
        let store = SessionStore::new(storage_root);
        if let Some(reminder) = store.load(&input.session_id).as_ref().and_then(chain_reminder) {
            lines.push(reminder);
            lines.push(String::new());
        }
    }

    if let Some(name) = shorthand_target(&input.prompt) {
        let config = HookConfig::load_or_default(storage_root).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "bad chainhook.yaml ignored");
            HookConfig::new(storage_root)
        });
        let label = MetadataCache::new(config.cache_dir()).label(name);
        lines.push(format!("[MCP] >>{name} ({label})"));
        lines.push(format!("  prompt_engine(command:\">>{name}\")"));
    }

    let steps = chain_steps(&input.prompt);
    if steps.len() > 1 {
        let command = steps
            .iter()
            .map(|s| format!(">>{s}"))
            .collect::<Vec<_>>()
            .join(" --> ");
        lines.push(format!("[MCP Chain] {} steps", steps.len()));
        lines.push(format!("  prompt_engine(command:\"{command}\")"));
    }

    let gates = inline_gates(&input.prompt);
    if !gates.is_empty() {
        let shown = gates
            .iter()
            .take(GATE_LIMIT)
            .map(|g| g.chars().take(GATE_WIDTH).collect::<String>())
            .collect::<Vec<_>>()
            .join(" | ");
        lines.push(format!("[Gates] {shown}"));
        lines.push("  Respond: GATE_REVIEW: PASS|FAIL - <reason>".to_string());
    }

    if !lines.is_empty() {
        hook_io::print_visible_context(EVENT, lines.join("\n").trim_end());
    }
    Ok(0)
}

// ---------------------------------------------------------------------------
// Syntax detection
// ---------------------------------------------------------------------------

static SHORTHAND_RE: OnceLock<Regex> = OnceLock::new();
static CHAIN_STEP_RE: OnceLock<Regex> = OnceLock::new();
static CHAIN_FINAL_RE: OnceLock<Regex> = OnceLock::new();
static GATE_QUOTED_RE: OnceLock<Regex> = OnceLock::new();
static GATE_ID_RE: OnceLock<Regex> = OnceLock::new();

/// `>>name` at the start of the prompt, whitespace after `>>` allowed.
fn shorthand_target(prompt: &str) -> Option<&str> {
    let re = SHORTHAND_RE
        .get_or_init(|| Regex::new(r"^>>\s*([A-Za-z0-9_-]+)").unwrap());
    re.captures(prompt.trim())
        .map(|caps| caps.get(1).unwrap().as_str())
}

/// Prompt ids of a `>>a --> >>b` chain, in order. A lone `>>a` is not a
/// chain; callers check the length.
fn chain_steps(prompt: &str) -> Vec<String> {
    let step_re = CHAIN_STEP_RE
        .get_or_init(|| Regex::new(r">>\s*([A-Za-z0-9_-]+)\s*(?:-->|→)").unwrap());
    let final_re = CHAIN_FINAL_RE
        .get_or_init(|| Regex::new(r"(?:-->|→)\s*>>\s*([A-Za-z0-9_-]+)\s*$").unwrap());

    let mut steps: Vec<String> = step_re
        .captures_iter(prompt)
        .map(|caps| caps[1].to_string())
        .collect();
    if let Some(caps) = final_re.captures(prompt) {
        steps.push(caps[1].to_string());
    }
    steps
}

/// Inline gates: `:: 'quoted criteria'` first, then bare `:: gate-id` forms.
fn inline_gates(prompt: &str) -> Vec<String> {
    let quoted_re = GATE_QUOTED_RE
        .get_or_init(|| Regex::new(r#"::\s*['"]([^'"]+)['"]"#).unwrap());
    let id_re = GATE_ID_RE
        .get_or_init(|| Regex::new(r"::\s*([A-Za-z][A-Za-z0-9_-]*)\b").unwrap());

    quoted_re
        .captures_iter(prompt)
        .chain(id_re.captures_iter(prompt))
        .map(|caps| caps[1].to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
