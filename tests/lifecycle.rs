//! End-to-end lifecycle tests against a scripted stand-in tool.
//!
//! The scripted tool records every invocation, so these tests assert the
//! exact command pipeline each trigger produces: status probes at
//! construction, one sql-sync per trigger, and the optional cache clear.

#![cfg(unix)]

use std::path::Path;

use dbsync::error::SyncError;
use dbsync::io::config::SyncConfig;
use dbsync::orchestrator::SyncOrchestrator;
use dbsync::test_support::{read_invocations, scripted_tool, RecordingSink};

fn config(tool: &Path, clear_cache: &str) -> SyncConfig {
    SyncConfig {
        source: "dev".to_string(),
        destination: "stage".to_string(),
        clear_cache: clear_cache.to_string(),
        tool_bin: tool.display().to_string(),
        ..SyncConfig::default()
    }
}

fn count_eq(invocations: &[String], wanted: &str) -> usize {
    invocations.iter().filter(|line| *line == wanted).count()
}

#[test]
fn construction_probes_both_aliases() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = scripted_tool(temp.path(), "page").expect("scripted tool");
    let mut sink = RecordingSink::default();

    SyncOrchestrator::new(config(&tool, "none"), &mut sink).expect("validated");

    let invocations = read_invocations(temp.path());
    assert_eq!(invocations, vec!["@dev st".to_string(), "@stage st".to_string()]);
}

#[test]
fn suite_start_without_cache_target_syncs_once() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = scripted_tool(temp.path(), "page").expect("scripted tool");
    let mut sink = RecordingSink::default();

    let mut cfg = config(&tool, "none");
    cfg.populate = true;
    let orchestrator = SyncOrchestrator::new(cfg, &mut sink).expect("validated");
    orchestrator.on_suite_start(&mut sink).expect("suite start");

    let invocations = read_invocations(temp.path());
    assert_eq!(count_eq(&invocations, "-y sql-sync @dev @stage"), 1);
    assert!(!invocations.iter().any(|line| line.contains(" cc ")));
}

#[test]
fn suite_start_with_cache_target_syncs_then_clears() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = scripted_tool(temp.path(), "page").expect("scripted tool");
    let mut sink = RecordingSink::default();

    let mut cfg = config(&tool, "page");
    cfg.populate = true;
    let orchestrator = SyncOrchestrator::new(cfg, &mut sink).expect("validated");
    orchestrator.on_suite_start(&mut sink).expect("suite start");

    let invocations = read_invocations(temp.path());
    // One simulated probe at construction, then the real pipeline in order.
    assert_eq!(count_eq(&invocations, "-s @stage cc page"), 1);
    assert_eq!(count_eq(&invocations, "-y sql-sync @dev @stage"), 1);
    assert_eq!(count_eq(&invocations, "@stage cc page"), 1);
    assert_eq!(
        invocations.last().map(String::as_str),
        Some("@stage cc page"),
        "cache clear must follow the sync"
    );
}

#[test]
fn test_end_twice_runs_the_pipeline_twice() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = scripted_tool(temp.path(), "page").expect("scripted tool");
    let mut sink = RecordingSink::default();

    let mut cfg = config(&tool, "page");
    cfg.cleanup = true;
    let orchestrator = SyncOrchestrator::new(cfg, &mut sink).expect("validated");
    orchestrator.on_test_end(&mut sink).expect("first test end");
    orchestrator.on_test_end(&mut sink).expect("second test end");

    let invocations = read_invocations(temp.path());
    assert_eq!(count_eq(&invocations, "-y sql-sync @dev @stage"), 2);
    assert_eq!(count_eq(&invocations, "@stage cc page"), 2);
}

#[test]
fn disabled_triggers_do_not_sync() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = scripted_tool(temp.path(), "page").expect("scripted tool");
    let mut sink = RecordingSink::default();

    let orchestrator = SyncOrchestrator::new(config(&tool, "none"), &mut sink).expect("validated");
    orchestrator.on_suite_start(&mut sink).expect("suite start");
    orchestrator.on_test_end(&mut sink).expect("test end");

    let invocations = read_invocations(temp.path());
    assert!(!invocations.iter().any(|line| line.contains("sql-sync")));
    assert!(sink.lines.is_empty());
}

#[test]
fn unreachable_alias_fails_construction() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = scripted_tool(temp.path(), "page").expect("scripted tool");
    let mut sink = RecordingSink::default();

    let mut cfg = config(&tool, "none");
    cfg.source = "bad".to_string();
    let err = SyncOrchestrator::new(cfg, &mut sink).expect_err("alias must be rejected");

    match err {
        SyncError::Configuration(msg) => assert!(msg.contains("@bad"), "got: {msg}"),
        other => panic!("expected configuration error, got: {other}"),
    }
}

#[test]
fn missing_aliases_fail_construction() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = scripted_tool(temp.path(), "page").expect("scripted tool");
    let mut sink = RecordingSink::default();

    let mut cfg = config(&tool, "none");
    cfg.destination = String::new();
    let err = SyncOrchestrator::new(cfg, &mut sink).expect_err("must be rejected");
    assert!(matches!(err, SyncError::Configuration(_)));
    assert!(
        read_invocations(temp.path()).is_empty(),
        "no probe may run before static validation"
    );
}

#[test]
fn rejected_cache_target_reports_cleaned_message() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = scripted_tool(temp.path(), "page").expect("scripted tool");
    let mut sink = RecordingSink::default();

    let err = SyncOrchestrator::new(config(&tool, "foo"), &mut sink)
        .expect_err("cache target must be rejected");

    match err {
        SyncError::Configuration(msg) => assert_eq!(msg, "[error] invalid cache id foo"),
        other => panic!("expected configuration error, got: {other}"),
    }
}

#[test]
fn trigger_message_names_event_and_aliases() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = scripted_tool(temp.path(), "page").expect("scripted tool");
    let mut sink = RecordingSink::default();

    let mut cfg = config(&tool, "none");
    cfg.populate = true;
    cfg.cleanup = true;
    let orchestrator = SyncOrchestrator::new(cfg, &mut sink).expect("validated");

    orchestrator.on_suite_start(&mut sink).expect("suite start");
    orchestrator.on_test_end(&mut sink).expect("test end");

    assert_eq!(
        sink.lines,
        vec![
            "Suite start: will populate target database (@stage) with data from source (@dev)"
                .to_string(),
            "Test end: will cleanup target database (@stage) with data from source (@dev)"
                .to_string(),
        ]
    );
}

#[test]
fn verbose_reemits_commands_and_tool_output() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = scripted_tool(temp.path(), "page").expect("scripted tool");
    let mut sink = RecordingSink::default();

    let mut cfg = config(&tool, "none");
    cfg.populate = true;
    cfg.verbose = true;
    let orchestrator = SyncOrchestrator::new(cfg, &mut sink).expect("validated");
    orchestrator.on_suite_start(&mut sink).expect("suite start");

    assert!(
        sink.lines
            .iter()
            .any(|line| line.starts_with("Executing: ") && line.contains("sql-sync")),
        "verbose mode must announce the executed command"
    );
    assert!(
        sink.lines.contains(&"Tool: sync complete".to_string()),
        "verbose mode must re-emit captured stdout"
    );
}
