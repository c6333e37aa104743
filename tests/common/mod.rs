//! Shared test support
//!
//! `FakeHost` stands in for the `tmux` and `git` binaries: it keeps a table of
//! sessions and branches in memory, answers the exact subcommands the crate
//! issues, and records every invocation for later inspection.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use hivemind_agents::{
    CommandOutput, CommandRunner, HiveConfig, HiveError, Invocation, Result, SessionOrchestrator,
};

pub const CREATED_AT: i64 = 1_700_000_000;

/// Initialise test logging once per binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One emulated tmux session
#[derive(Debug, Clone, Default)]
pub struct FakeSession {
    pub path: String,
    pub pane_path: Option<String>,
    pub command: String,
    pub attached: u32,
    pub screen: String,
    pub keys: Vec<String>,
}

#[derive(Debug, Default)]
struct HostState {
    sessions: BTreeMap<String, FakeSession>,
    branches: BTreeSet<String>,
    invocations: Vec<Invocation>,
    failures: HashMap<String, String>,
    has_session_blind: bool,
}

/// In-memory tmux and git
#[derive(Debug, Default)]
pub struct FakeHost {
    state: Mutex<HostState>,
}

impl FakeHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Pretend a session already lives in the multiplexer
    pub fn add_session(&self, id: &str, path: &str) {
        self.state.lock().sessions.insert(
            id.to_string(),
            FakeSession {
                path: path.to_string(),
                ..FakeSession::default()
            },
        );
    }

    /// Pretend a branch already exists in the repository
    pub fn add_branch(&self, branch: &str) {
        self.state.lock().branches.insert(branch.to_string());
    }

    /// Replace what `capture-pane` returns for a session
    pub fn set_screen(&self, id: &str, screen: &str) {
        if let Some(session) = self.state.lock().sessions.get_mut(id) {
            session.screen = screen.to_string();
        }
    }

    pub fn set_attached(&self, id: &str, clients: u32) {
        if let Some(session) = self.state.lock().sessions.get_mut(id) {
            session.attached = clients;
        }
    }

    pub fn set_pane_path(&self, id: &str, path: Option<&str>) {
        if let Some(session) = self.state.lock().sessions.get_mut(id) {
            session.pane_path = path.map(str::to_string);
        }
    }

    /// Make every call of `subcommand` exit 1 with `stderr`
    pub fn fail(&self, subcommand: &str, stderr: &str) {
        self.state
            .lock()
            .failures
            .insert(subcommand.to_string(), stderr.to_string());
    }

    /// Make `has-session` report every session as missing, as a racing
    /// creator would observe just before the other one wins
    pub fn blind_has_session(&self) {
        self.state.lock().has_session_blind = true;
    }

    pub fn kill_behind_our_back(&self, id: &str) {
        self.state.lock().sessions.remove(id);
    }

    pub fn session(&self, id: &str) -> Option<FakeSession> {
        self.state.lock().sessions.get(id).cloned()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.state.lock().sessions.keys().cloned().collect()
    }

    pub fn branches(&self) -> Vec<String> {
        self.state.lock().branches.iter().cloned().collect()
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.state.lock().invocations.clone()
    }

    /// Invocations of `program` whose first argument is `subcommand`
    pub fn calls(&self, program: &str, subcommand: &str) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|i| i.program == program && i.subcommand() == Some(subcommand))
            .collect()
    }

    fn handle(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let mut state = self.state.lock();
        state.invocations.push(invocation.clone());

        if let Some(subcommand) = invocation.subcommand()
            && let Some(stderr) = state.failures.get(subcommand)
        {
            return Ok(CommandOutput::failed(1, stderr.clone()));
        }

        match invocation.program.as_str() {
            "tmux" => Ok(tmux(&mut state, &invocation.args)),
            "git" => Ok(git(&mut state, invocation)),
            other => Err(HiveError::cli_not_found(other)),
        }
    }
}

impl CommandRunner for FakeHost {
    fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<CommandOutput>> + Send {
        let result = self.handle(invocation);
        async move { result }
    }
}

/// Strip tmux's exact-match `=` and trailing pane `:` from a target
fn target(args: &[String]) -> String {
    let raw = args
        .iter()
        .position(|a| a == "-t")
        .and_then(|i| args.get(i + 1))
        .cloned()
        .unwrap_or_default();
    let raw = raw.strip_prefix('=').unwrap_or(&raw);
    raw.strip_suffix(':').unwrap_or(raw).to_string()
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn tmux(state: &mut HostState, args: &[String]) -> CommandOutput {
    let missing = |id: &str| CommandOutput::failed(1, format!("can't find session: {id}"));

    match args.first().map(String::as_str) {
        Some("has-session") => {
            let id = target(args);
            if !state.has_session_blind && state.sessions.contains_key(&id) {
                CommandOutput::ok("")
            } else {
                missing(&id)
            }
        }
        Some("new-session") => {
            let id = flag_value(args, "-s").unwrap_or_default().to_string();
            if state.sessions.contains_key(&id) {
                return CommandOutput::failed(1, format!("duplicate session: {id}"));
            }
            let session = FakeSession {
                path: flag_value(args, "-c").unwrap_or_default().to_string(),
                command: args.last().cloned().unwrap_or_default(),
                ..FakeSession::default()
            };
            state.sessions.insert(id, session);
            CommandOutput::ok("")
        }
        Some("kill-session") => {
            let id = target(args);
            match state.sessions.remove(&id) {
                Some(_) => CommandOutput::ok(""),
                None => missing(&id),
            }
        }
        Some("send-keys") => {
            let id = target(args);
            let Some(session) = state.sessions.get_mut(&id) else {
                return missing(&id);
            };
            if args.iter().any(|a| a == "-l") {
                let text = args.last().cloned().unwrap_or_default();
                session.screen.push_str(&text);
                session.keys.push(text);
            } else {
                session.screen.push('\n');
                session.keys.push(args.last().cloned().unwrap_or_default());
            }
            CommandOutput::ok("")
        }
        Some("capture-pane") => {
            let id = target(args);
            match state.sessions.get(&id) {
                Some(session) => CommandOutput::ok(format!("{}\n\n\n", session.screen)),
                None => missing(&id),
            }
        }
        Some("display-message") => {
            let id = target(args);
            match state.sessions.get(&id) {
                Some(session) => CommandOutput::ok(format!(
                    "{}|{}\n",
                    session.path,
                    session.pane_path.as_deref().unwrap_or_default()
                )),
                None => missing(&id),
            }
        }
        Some("list-sessions") => {
            if state.sessions.is_empty() {
                return CommandOutput::failed(1, "no server running on /tmp/tmux-1000/default");
            }
            let lines: Vec<String> = state
                .sessions
                .iter()
                .map(|(id, s)| format!("{id}|{}|{}|{CREATED_AT}", s.attached, s.path))
                .collect();
            CommandOutput::ok(lines.join("\n") + "\n")
        }
        other => CommandOutput::failed(1, format!("unknown command: {other:?}")),
    }
}

fn git(state: &mut HostState, invocation: &Invocation) -> CommandOutput {
    let args = &invocation.args;
    if args.len() < 3 || args[0] != "worktree" || args[1] != "add" {
        return CommandOutput::failed(129, "usage: git worktree add");
    }
    let path = PathBuf::from(&args[2]);

    let branch = if args.get(3).map(String::as_str) == Some("-b") {
        let Some(branch) = args.get(4) else {
            return CommandOutput::failed(129, "switch `b' requires a value");
        };
        if !state.branches.insert(branch.clone()) {
            return CommandOutput::failed(
                128,
                format!("fatal: a branch named '{branch}' already exists"),
            );
        }
        branch.clone()
    } else {
        let Some(branch) = args.get(3) else {
            return CommandOutput::failed(129, "usage: git worktree add");
        };
        if !state.branches.contains(branch) {
            return CommandOutput::failed(128, format!("fatal: invalid reference: {branch}"));
        }
        branch.clone()
    };

    match std::fs::create_dir_all(&path) {
        Ok(()) => CommandOutput::ok(format!(
            "Preparing worktree (new branch '{branch}')\n"
        )),
        Err(e) => CommandOutput::failed(128, format!("fatal: could not create {}: {e}", path.display())),
    }
}

/// Configuration rooted at `project_dir` with no warm-up delay
pub fn test_config(project_dir: &Path) -> HiveConfig {
    HiveConfig::builder()
        .project_dir(project_dir)
        .warmup_delay(Duration::ZERO)
        .build()
}

/// Orchestrator over a fresh `FakeHost`
pub fn orchestrator(project_dir: &Path) -> (Arc<FakeHost>, SessionOrchestrator<Arc<FakeHost>>) {
    init_logging();
    let host = FakeHost::new();
    let orchestrator = SessionOrchestrator::with_runner(test_config(project_dir), Arc::clone(&host));
    (host, orchestrator)
}
