// Commands Module Integration Tests
//
// Tests the Command Pattern implementation for IntelRun's operational modes:
// command creation and naming, router priority, and CLI argument parsing.
// All tests use real Args structures and actual command implementations.

use clap::Parser;
use intelrun::commands::{
    AtlasSyncCommand, AttackSyncCommand, AttackVersionsCommand, Command, CommandRouter,
    CveLookupCommand,
};
use intelrun::Args;

// ============================================================================
// Command Creation and Naming Tests
// ============================================================================

#[test]
fn test_cve_lookup_command_creation_and_name() {
    let mut args = Args::default();
    args.cve_id = Some("CVE-2021-30737".to_string());
    let cmd = CveLookupCommand::new(args);
    assert_eq!(cmd.name(), "CveLookupCommand");
}

#[test]
fn test_attack_sync_command_creation_and_name() {
    let mut args = Args::default();
    args.attack.sync = true;
    let cmd = AttackSyncCommand::new(args);
    assert_eq!(cmd.name(), "AttackSyncCommand");
}

#[test]
fn test_attack_versions_command_creation_and_name() {
    let mut args = Args::default();
    args.attack.list_versions = true;
    let cmd = AttackVersionsCommand::new(args);
    assert_eq!(cmd.name(), "AttackVersionsCommand");
}

#[test]
fn test_atlas_sync_command_creation_and_name() {
    let mut args = Args::default();
    args.atlas.sync = true;
    let cmd = AtlasSyncCommand::new(args);
    assert_eq!(cmd.name(), "AtlasSyncCommand");
}

// ============================================================================
// Router Priority Tests
// ============================================================================

#[test]
fn test_router_defaults_to_cve_lookup() {
    let cmd = CommandRouter::route(Args::default()).unwrap();
    assert_eq!(cmd.name(), "CveLookupCommand");
}

#[test]
fn test_router_attack_sync() {
    let mut args = Args::default();
    args.attack.sync = true;
    let cmd = CommandRouter::route(args).unwrap();
    assert_eq!(cmd.name(), "AttackSyncCommand");
}

#[test]
fn test_router_attack_versions_beats_sync() {
    let mut args = Args::default();
    args.attack.sync = true;
    args.attack.list_versions = true;
    let cmd = CommandRouter::route(args).unwrap();
    assert_eq!(cmd.name(), "AttackVersionsCommand");
}

#[test]
fn test_router_attack_beats_atlas() {
    let mut args = Args::default();
    args.attack.sync = true;
    args.atlas.sync = true;
    let cmd = CommandRouter::route(args).unwrap();
    assert_eq!(cmd.name(), "AttackSyncCommand");
}

#[test]
fn test_router_atlas_sync() {
    let mut args = Args::default();
    args.atlas.sync = true;
    let cmd = CommandRouter::route(args).unwrap();
    assert_eq!(cmd.name(), "AtlasSyncCommand");
}

// ============================================================================
// CLI Parsing Tests
// ============================================================================

#[test]
fn test_parse_cve_lookup_args() {
    let args = Args::try_parse_from(["intelrun", "CVE-2021-30737", "--quiet"]).unwrap();
    assert_eq!(args.cve_id.as_deref(), Some("CVE-2021-30737"));
    assert!(args.output.quiet);
    assert!(!args.cve.no_estimate);
}

#[test]
fn test_parse_attack_args_with_defaults() {
    let args = Args::try_parse_from(["intelrun", "--attack"]).unwrap();
    assert!(args.attack.sync);
    assert_eq!(args.attack.domain, "enterprise-attack");
    assert_eq!(args.attack.branch, "master");
    assert!(args.attack.version.is_none());
}

#[test]
fn test_parse_attack_domain_override() {
    let args = Args::try_parse_from([
        "intelrun",
        "--attack",
        "--attack-domain",
        "mobile-attack",
        "--attack-version",
        "14.1",
    ])
    .unwrap();
    assert_eq!(args.attack.domain, "mobile-attack");
    assert_eq!(args.attack.version.as_deref(), Some("14.1"));
}

#[test]
fn test_parse_atlas_args() {
    let args = Args::try_parse_from(["intelrun", "--atlas"]).unwrap();
    assert!(args.atlas.sync);
    assert_eq!(args.atlas.branch, "main");
}

#[test]
fn test_parse_output_overrides() {
    let args = Args::try_parse_from([
        "intelrun",
        "CVE-2024-0001",
        "--files-dir",
        "/tmp/intel",
        "--no-report",
        "--exploitability",
        "3.1",
    ])
    .unwrap();
    assert_eq!(
        args.output.files_dir.as_deref(),
        Some(std::path::Path::new("/tmp/intel"))
    );
    assert!(args.cve.no_report);
    assert_eq!(args.cve.exploitability.as_deref(), Some("3.1"));
}
