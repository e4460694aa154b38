use crate::hook_io::{self, HookInput};
use chainhook_core::enforce::is_protocol_tool;
use chainhook_core::interpret::interpret;
use chainhook_core::reminder::chain_reminder;
use chainhook_core::state::SessionStore;
use std::path::Path;

const EVENT: &str = "PostToolUse";

pub fn run(storage_root: &Path) -> anyhow::Result<i32> {
    let input = HookInput::from_reader(std::io::stdin().lock());

    if !is_protocol_tool(&input.tool_name) {
        return Ok(0);
    }

    let text = input.response_text();
    let Some(state) = interpret(&text) else {
        // No signal: existing state stays exactly as it was.
        return Ok(0);
    };

    let store = SessionStore::new(storage_root);
    if state.is_complete() {
        store.clear(&input.session_id);
    } else {
        store.save(&input.session_id, &state);
    }

    if let Some(reminder) = chain_reminder(&state) {
        hook_io::print_context(EVENT, &reminder);
    }
    Ok(0)
}
