//! Tests for `SessionOrchestrator`
//!
//! Each test drives a fresh orchestrator against the in-memory tmux and git
//! of `common::FakeHost`.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use hivemind_agents::{AgentProgram, AgentSpec, SessionOrchestrator, SpawnSessionRequest};

use common::FakeHost;

fn aider(model: &str) -> AgentSpec {
    AgentSpec::new(AgentProgram::Aider).model(model).auto_accept(true)
}

#[tokio::test]
async fn test_spawn_aider_with_model() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());

    let spawned = orchestrator
        .spawn(SpawnSessionRequest::new("forge", aider("m1")))
        .await
        .unwrap();

    assert!(spawned.success);
    assert_eq!(spawned.session_name.as_str(), "hive-forge");
    assert_eq!(spawned.short_name, "forge");
    assert_eq!(spawned.command, "aider --model m1 --yes");
    assert_eq!(spawned.working_dir, dir.path());
    assert_eq!(spawned.attach_command, "tmux attach -t hive-forge");
    assert!(!spawned.worktree);
    assert!(!spawned.initial_prompt_sent);

    let session = host.session("hive-forge").unwrap();
    assert_eq!(session.command, "aider --model m1 --yes");
    assert_eq!(session.path, dir.path().display().to_string());
}

#[tokio::test]
async fn test_spawn_existing_name_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());
    host.add_session("hive-forge", "/elsewhere");

    let err = orchestrator
        .spawn(SpawnSessionRequest::new("forge", aider("m1")))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "session_already_exists");
    assert!(host.calls("tmux", "new-session").is_empty());
    assert_eq!(host.session("hive-forge").unwrap().path, "/elsewhere");
}

#[tokio::test]
async fn test_concurrent_spawns_create_one_session() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());

    let (first, second) = tokio::join!(
        orchestrator.spawn(SpawnSessionRequest::new("forge", aider("m1"))),
        orchestrator.spawn(SpawnSessionRequest::new("forge", aider("m2"))),
    );

    let outcomes = [first, second];
    let created = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(created, 1);
    let loser = outcomes.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert_eq!(loser.kind(), "session_already_exists");
    assert_eq!(host.session_ids(), vec!["hive-forge".to_string()]);
}

#[tokio::test]
async fn test_spawn_custom_without_command_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());

    let request =
        SpawnSessionRequest::new("forge", AgentSpec::new(AgentProgram::Custom)).worktree(None);
    let err = orchestrator.spawn(request).await.unwrap_err();

    assert_eq!(err.kind(), "missing_custom_command");
    assert!(host.calls("tmux", "new-session").is_empty());
    assert!(host.calls("git", "worktree").is_empty());
    assert!(!dir.path().join(".worktrees").exists());
}

#[tokio::test]
async fn test_spawn_in_worktree() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());

    let spawned = orchestrator
        .spawn(SpawnSessionRequest::new("scout", AgentSpec::new(AgentProgram::Claude)).worktree(None))
        .await
        .unwrap();

    let expected = dir.path().join(".worktrees").join("scout");
    assert!(spawned.worktree);
    assert_eq!(spawned.working_dir, expected);
    assert!(expected.is_dir());
    assert_eq!(host.branches(), vec!["squad/scout".to_string()]);
    assert_eq!(
        host.session("hive-scout").unwrap().path,
        expected.display().to_string()
    );
}

#[tokio::test]
async fn test_spawn_in_worktree_with_branch_name() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());

    let spawned = orchestrator
        .spawn(
            SpawnSessionRequest::new("scout", aider("m1"))
                .worktree(Some("parser-rewrite".to_string())),
        )
        .await
        .unwrap();

    assert_eq!(
        spawned.working_dir,
        dir.path().join(".worktrees").join("parser-rewrite")
    );
    assert_eq!(host.branches(), vec!["squad/parser-rewrite".to_string()]);
}

#[tokio::test]
async fn test_failed_worktree_leaves_no_session() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());
    host.fail("worktree", "fatal: not a git repository");

    let err = orchestrator
        .spawn(SpawnSessionRequest::new("scout", aider("m1")).worktree(None))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "workspace_provision_error");
    assert!(host.session_ids().is_empty());
}

#[tokio::test]
async fn test_spawn_with_explicit_working_dir() {
    let dir = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());

    let spawned = orchestrator
        .spawn(SpawnSessionRequest::new("forge", aider("m1")).working_dir(other.path()))
        .await
        .unwrap();

    assert_eq!(spawned.working_dir, other.path());
    assert_eq!(
        host.session("hive-forge").unwrap().path,
        other.path().display().to_string()
    );
}

#[tokio::test]
async fn test_initial_prompt_is_typed_and_entered() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());

    let spec = aider("m1").initial_prompt("Read MESSAGES.md");
    let spawned = orchestrator
        .spawn(SpawnSessionRequest::new("forge", spec))
        .await
        .unwrap();

    assert!(spawned.initial_prompt_sent);
    assert_eq!(
        host.session("hive-forge").unwrap().keys,
        vec!["Read MESSAGES.md".to_string(), "Enter".to_string()]
    );
}

#[tokio::test]
async fn test_initial_prompt_failure_keeps_session() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());
    host.fail("send-keys", "not a terminal");

    let spec = aider("m1").initial_prompt("hello");
    let spawned = orchestrator
        .spawn(SpawnSessionRequest::new("forge", spec))
        .await
        .unwrap();

    assert!(!spawned.initial_prompt_sent);
    assert!(host.session("hive-forge").is_some());
}

#[tokio::test]
async fn test_operations_on_missing_session() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());

    assert_eq!(
        orchestrator.kill("ghost", false).await.unwrap_err().kind(),
        "session_not_found"
    );
    assert_eq!(
        orchestrator.send("ghost", "hi", true).await.unwrap_err().kind(),
        "session_not_found"
    );
    assert_eq!(
        orchestrator.read_output("ghost", None).await.unwrap_err().kind(),
        "session_not_found"
    );
    assert_eq!(
        orchestrator.attach_info("ghost").await.unwrap_err().kind(),
        "session_not_found"
    );

    assert!(host.calls("tmux", "kill-session").is_empty());
    assert!(host.calls("tmux", "send-keys").is_empty());
    assert!(host.calls("tmux", "capture-pane").is_empty());
}

#[tokio::test]
async fn test_kill_with_and_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());
    host.add_session("hive-forge", "/w");
    host.add_session("hive-scout", "/w");

    let killed = orchestrator.kill("forge", false).await.unwrap();
    assert_eq!(killed.killed.as_str(), "hive-forge");
    orchestrator.kill("hive-scout", true).await.unwrap();

    assert!(host.session_ids().is_empty());
}

#[tokio::test]
async fn test_send_reports_preview() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());
    host.add_session("hive-forge", "/w");

    let long = "y".repeat(150);
    let sent = orchestrator.send("forge", &long, false).await.unwrap();

    assert_eq!(sent.sent_to.as_str(), "hive-forge");
    assert_eq!(sent.text, format!("{}...", "y".repeat(100)));
    assert_eq!(host.session("hive-forge").unwrap().keys, vec![long]);
}

#[tokio::test]
async fn test_read_output_line_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());
    host.add_session("hive-forge", "/w");
    host.set_screen("hive-forge", "a\nb\nc");

    let read = orchestrator.read_output("forge", Some(2)).await.unwrap();
    assert_eq!(read.output, "b\nc");
    assert_eq!(read.lines_captured, 2);

    let read = orchestrator.read_output("forge", None).await.unwrap();
    assert_eq!(read.output, "a\nb\nc");
    let capture = host.calls("tmux", "capture-pane");
    assert!(capture.last().unwrap().args.contains(&"-50".to_string()));

    for lines in [0, 501] {
        let err = orchestrator.read_output("forge", Some(lines)).await.unwrap_err();
        assert_eq!(err.kind(), "invalid_arguments");
    }
}

#[tokio::test]
async fn test_session_killed_externally_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());

    orchestrator
        .spawn(SpawnSessionRequest::new("forge", aider("m1")))
        .await
        .unwrap();
    host.kill_behind_our_back("hive-forge");

    let listed = orchestrator.list_sessions(None).await.unwrap();
    assert_eq!(listed.count, 0);
    assert_eq!(
        orchestrator.send("forge", "hi", true).await.unwrap_err().kind(),
        "session_not_found"
    );
}

#[tokio::test]
async fn test_list_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());

    assert_eq!(orchestrator.list_sessions(None).await.unwrap().count, 0);

    host.add_session("hive-b", "/b");
    host.add_session("hive-a", "/a");
    host.add_session("scratch", "/s");

    let listed = orchestrator.list_sessions(None).await.unwrap();
    assert_eq!(listed.count, 2);
    assert_eq!(listed.sessions[0].short_name, "a");

    let listed = orchestrator.list_sessions(Some("scr")).await.unwrap();
    assert_eq!(listed.count, 1);
    assert_eq!(listed.sessions[0].short_name, "scratch");
}

#[tokio::test]
async fn test_attach_info() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());
    host.add_session("hive-forge", "/start");
    host.set_pane_path("hive-forge", Some("/start/src"));

    let info = orchestrator.attach_info("forge").await.unwrap();
    assert_eq!(info.attach_command, "tmux attach -t hive-forge");
    assert_eq!(info.working_directory, "/start/src");
}

#[tokio::test]
async fn test_attach_info_falls_back_to_project_dir() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());
    host.add_session("hive-forge", "");

    let info = orchestrator.attach_info("forge").await.unwrap();
    assert_eq!(info.working_directory, dir.path().display().to_string());
}

#[tokio::test]
async fn test_broadcast_reaches_namespace_only() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());
    host.add_session("hive-a", "/a");
    host.add_session("hive-b", "/b");
    host.add_session("scratch", "/s");

    let report = orchestrator.broadcast("status?", true).await.unwrap();

    assert_eq!(report.delivered, 2);
    assert_eq!(report.failed, 0);
    assert!(report.deliveries.iter().all(|d| d.success && d.error.is_none()));
    for id in ["hive-a", "hive-b"] {
        assert_eq!(
            host.session(id).unwrap().keys,
            vec!["status?".to_string(), "Enter".to_string()]
        );
    }
    assert!(host.session("scratch").unwrap().keys.is_empty());
}

#[tokio::test]
async fn test_broadcast_skips_sessions_sharing_only_the_bare_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());
    host.add_session("hive-a", "/a");
    host.add_session("hivemind-dashboard", "/d");

    let report = orchestrator.broadcast("status?", false).await.unwrap();

    assert_eq!(report.delivered, 1);
    assert_eq!(report.deliveries[0].session.as_str(), "hive-a");
    assert!(host.session("hivemind-dashboard").unwrap().keys.is_empty());
}

#[tokio::test]
async fn test_broadcast_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());
    host.add_session("hive-a", "/a");
    host.fail("send-keys", "pane is dead");

    let report = orchestrator.broadcast("status?", false).await.unwrap();
    assert_eq!(report.delivered, 0);
    assert_eq!(report.failed, 1);
    let error = report.deliveries[0].error.as_deref().unwrap();
    assert!(error.contains("pane is dead"));
}

#[tokio::test]
async fn test_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let (host, orchestrator) = common::orchestrator(dir.path());
    host.add_session("hive-a", "/a");

    let report = orchestrator.diagnostics().await;
    assert_eq!(report.prefix, "hive");
    assert_eq!(report.project_dir, dir.path());
    assert_eq!(report.multiplexer.program, "tmux");
    assert_eq!(report.vcs.program, "git");
    assert_eq!(report.live_sessions, Some(1));
    assert!(report.list_error.is_none());
}

#[tokio::test]
async fn test_custom_prefix_namespace() {
    let dir = tempfile::tempdir().unwrap();
    common::init_logging();
    let host = FakeHost::new();
    let config = hivemind_agents::HiveConfig::builder()
        .project_dir(dir.path())
        .prefix("squad")
        .warmup_delay(std::time::Duration::ZERO)
        .build();
    let orchestrator = SessionOrchestrator::with_runner(config, Arc::clone(&host));

    let spawned = orchestrator
        .spawn(SpawnSessionRequest::new("forge", aider("m1")))
        .await
        .unwrap();
    assert_eq!(spawned.session_name.as_str(), "squad-forge");
    assert_eq!(orchestrator.list_sessions(None).await.unwrap().count, 1);
}

#[tokio::test]
async fn test_read_line_bounds_are_clamped_by_the_builder() {
    let dir = tempfile::tempdir().unwrap();
    common::init_logging();
    let host = FakeHost::new();
    host.add_session("hive-forge", "/w");
    host.set_screen("hive-forge", "a\nb\nc");
    let config = hivemind_agents::HiveConfig::builder()
        .project_dir(dir.path())
        .warmup_delay(std::time::Duration::ZERO)
        .read_lines(0, 0)
        .build();
    assert_eq!(config.default_read_lines, 1);
    assert_eq!(config.max_read_lines, 1);
    let orchestrator = SessionOrchestrator::with_runner(config, Arc::clone(&host));

    let read = orchestrator.read_output("forge", None).await.unwrap();
    assert_eq!(read.output, "c");
    let err = orchestrator.read_output("forge", Some(2)).await.unwrap_err();
    assert_eq!(err.kind(), "invalid_arguments");

    let config = hivemind_agents::HiveConfig::builder().read_lines(80, 20).build();
    assert_eq!(config.default_read_lines, 20);
    assert_eq!(config.max_read_lines, 20);
}
