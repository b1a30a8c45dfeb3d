//! CLI interface for swipe.
//!
//! Drives the engine from scripted input so gestures and thresholds can be
//! exercised without a UI. Each subcommand is non-interactive: arguments in,
//! structured output out.
//!
//! - `swipe session new|list` manage sessions.
//! - `swipe --session <id> session show` and `swipe --session <id> replay`
//!   operate within one.
//!
//! The `--session` flag takes a full UUID or unambiguous prefix.

mod format;
mod replay;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use jiff::Timestamp;
use uuid::Uuid;

use swipe::collaborator::{LogFeedback, StaticEntitlement};
use swipe::config::Config;
use swipe::engine::SwipeEngine;
use swipe::model::{Session, SubjectId};
use swipe::storage::Storage;

use format::{format_entry, format_summary};
use replay::ScriptEvent;

/// Swipe: replay discovery gestures against a session.
#[derive(Debug, Parser)]
#[command(name = "swipe", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Session ID: full UUID or unambiguous prefix (e.g. `a3b`).
    /// Required for `session show` and `replay`.
    #[arg(long, global = true)]
    session: Option<String>,

    /// Config file. Defaults to `~/.swipe/config.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow:
  1. swipe session new --label tonight p1 p2 p3 p4
     → prints a session ID (e.g. a3b0fc12)
  2. swipe --session a3b replay gestures.json --entitled
     → one JSON line per scripted event
  3. swipe --session a3b session show

Script format (JSON array):
  [{"event": "start"},
   {"event": "update", "dx": 0.2, "dy": 0.0},
   {"event": "end", "vx": 0.0, "vy": 0.0},
   {"event": "button", "direction": "up"},
   {"event": "undo"},
   {"event": "load", "count": 5}]"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage sessions: create, list, inspect.
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Feed a gesture script through a fresh engine.
    ///
    /// Decisions and undos are written to the session's log. Rewind history
    /// lives only for the duration of the replay.
    /// Requires `--session`.
    Replay {
        /// JSON file holding an array of script events.
        script: PathBuf,

        /// Grant rewind entitlement for this replay.
        #[arg(long)]
        entitled: bool,
    },

    /// Print the effective configuration as JSON.
    Thresholds,
}

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Create a new session over the given candidates. Prints the session ID.
    New {
        /// Freeform label.
        #[arg(long)]
        label: Option<String>,

        /// Candidate profile IDs, in queue order.
        #[arg(required = true)]
        candidates: Vec<String>,
    },

    /// List sessions.
    List,

    /// Show a session's decision log. Requires `--session`.
    Show,
}

/// Run the CLI, returning an error message on failure.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(|e| e.to_string())?;

    match cli.command {
        Command::Session { command } => {
            let storage = open_storage(&config)?;
            match command {
                SessionCommand::New { label, candidates } => cmd_new(&storage, label, candidates),
                SessionCommand::List => cmd_list(&storage),
                SessionCommand::Show => {
                    let session = require_session(&storage, cli.session.as_deref())?;
                    cmd_show(&storage, &session)
                }
            }
        }
        Command::Replay { script, entitled } => {
            let storage = open_storage(&config)?;
            let session = require_session(&storage, cli.session.as_deref())?;
            cmd_replay(&config, &storage, &session, &script, entitled)
        }
        Command::Thresholds => cmd_thresholds(&config),
    }
}

fn open_storage(config: &Config) -> Result<Storage, String> {
    let root = config
        .storage_root()
        .ok_or("could not determine home directory")?;
    Storage::new(root).map_err(|e| format!("failed to initialize storage: {e}"))
}

/// Require that `--session` was provided and resolve it.
fn require_session(storage: &Storage, session_ref: Option<&str>) -> Result<Session, String> {
    let session_ref = session_ref.ok_or("this command requires --session <id>")?;
    resolve_session(storage, session_ref)
}

fn cmd_new(storage: &Storage, label: Option<String>, candidates: Vec<String>) -> Result<(), String> {
    let mut seen = std::collections::HashSet::new();
    if let Some(dup) = candidates.iter().find(|c| !seen.insert(c.as_str())) {
        return Err(format!("candidate '{dup}' listed twice"));
    }

    let session = Session {
        id: Uuid::new_v4(),
        label,
        created_at: Timestamp::now(),
        candidates: candidates.into_iter().map(SubjectId::from).collect(),
    };

    storage
        .create_session(&session)
        .map_err(|e| format!("failed to create session: {e}"))?;

    println!("{}", session.id);
    Ok(())
}

fn cmd_list(storage: &Storage) -> Result<(), String> {
    let sessions = storage
        .list_sessions()
        .map_err(|e| format!("failed to list sessions: {e}"))?;

    if sessions.is_empty() {
        println!("No sessions");
        return Ok(());
    }

    for s in &sessions {
        let short_id = &s.id.to_string()[..8];
        let label = s.label.as_deref().unwrap_or("-");
        println!("{short_id}  [{} candidates]  {label}", s.candidates.len());
    }

    Ok(())
}

fn cmd_show(storage: &Storage, session: &Session) -> Result<(), String> {
    let log = storage
        .load_log(session.id)
        .map_err(|e| format!("failed to load decision log: {e}"))?;

    let short_id = &session.id.to_string()[..8];
    println!(
        "Session {short_id}: {} candidates, {} log entries",
        session.candidates.len(),
        log.len()
    );
    for entry in &log {
        println!("  {}", format_entry(entry));
    }
    Ok(())
}

fn cmd_replay(
    config: &Config,
    storage: &Storage,
    session: &Session,
    script: &Path,
    entitled: bool,
) -> Result<(), String> {
    let json = fs::read_to_string(script)
        .map_err(|e| format!("failed to read {}: {e}", script.display()))?;
    let events: Vec<ScriptEvent> = serde_json::from_str(&json)
        .map_err(|e| format!("invalid script {}: {e}", script.display()))?;

    let source = storage
        .open_source(session.id)
        .map_err(|e| format!("failed to open session: {e}"))?;
    let mut engine = SwipeEngine::new(config, source, StaticEntitlement(entitled), LogFeedback);

    let steps = replay::run_script(&mut engine, &events);
    for step in &steps {
        let line = serde_json::to_string(step)
            .map_err(|e| format!("failed to serialize step: {e}"))?;
        println!("{line}");
    }

    eprintln!(
        "{} ({} still pending)",
        format_summary(&steps),
        engine.source().pending()
    );
    Ok(())
}

fn cmd_thresholds(config: &Config) -> Result<(), String> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| format!("failed to serialize config: {e}"))?;
    println!("{json}");
    Ok(())
}

/// Resolve a session reference (full UUID or unambiguous prefix) to a session.
fn resolve_session(storage: &Storage, reference: &str) -> Result<Session, String> {
    // Try full UUID first.
    if let Ok(id) = reference.parse::<Uuid>() {
        return storage
            .load_session(id)
            .map_err(|e| format!("session not found: {e}"));
    }

    // Try as a prefix match against all sessions.
    let sessions = storage
        .list_sessions()
        .map_err(|e| format!("failed to list sessions: {e}"))?;

    let matches: Vec<&Session> = sessions
        .iter()
        .filter(|s| s.id.to_string().starts_with(reference))
        .collect();

    match matches.len() {
        0 => Err(format!("no session matching '{reference}'")),
        1 => Ok(matches[0].clone()),
        n => {
            let ids: Vec<String> = matches
                .iter()
                .map(|s| s.id.to_string()[..8].to_string())
                .collect();
            Err(format!(
                "'{reference}' is ambiguous: matches {n} sessions: {}",
                ids.join(", ")
            ))
        }
    }
}
