mod cmd;
mod hook_io;
mod root;
mod sync;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "chainhook",
    about = "Chain/gate protocol hooks for the prompt-engine plugin",
    version,
    propagate_version = true
)]
struct Cli {
    /// Storage root for session records (default: resolve from env)
    #[arg(long, global = true, env = "CHAINHOOK_STORAGE_ROOT")]
    storage_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// PreToolUse hook: enforce pending gates and chain parameters
    PreToolUse,

    /// PostToolUse hook: parse prompt-engine responses into session state
    PostToolUse,

    /// SessionStart hook: sync a dev checkout into the plugin cache
    SessionStart,

    /// UserPromptSubmit hook: detect prompt-invocation shorthand
    UserPrompt,
}

fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout is reserved for the hook protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let storage_root = root::resolve_storage_root(cli.storage_root.as_deref());

    let result = match cli.command {
        Commands::PreToolUse => cmd::pre_tool::run(&storage_root),
        Commands::PostToolUse => cmd::post_tool::run(&storage_root),
        Commands::SessionStart => cmd::session_start::run(&storage_root),
        Commands::UserPrompt => cmd::user_prompt::run(&storage_root),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
