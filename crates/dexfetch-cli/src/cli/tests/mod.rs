//! CLI parse tests.

use super::{Cli, CliCommand, ConfigOverrides};
use clap::Parser;
use dexfetch_core::config::FetchConfig;
use std::path::PathBuf;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_run_defaults() {
    match parse(&["dexfetch", "run"]) {
        CliCommand::Run { overrides, quiet } => {
            assert!(!quiet);
            assert!(overrides.config.is_none());
            assert!(overrides.limit.is_none());
            assert!(overrides.base_url.is_none());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_overrides() {
    match parse(&[
        "dexfetch",
        "run",
        "--limit",
        "151",
        "--checkpoint",
        "/tmp/p.csv",
        "--output",
        "/tmp/f.csv",
        "--base-url",
        "http://127.0.0.1:8000/pokemon/",
        "-q",
    ]) {
        CliCommand::Run { overrides, quiet } => {
            assert!(quiet);
            assert_eq!(overrides.limit, Some(151));
            assert_eq!(overrides.checkpoint, Some(PathBuf::from("/tmp/p.csv")));
            assert_eq!(overrides.output, Some(PathBuf::from("/tmp/f.csv")));
            assert_eq!(
                overrides.base_url.as_deref(),
                Some("http://127.0.0.1:8000/pokemon/")
            );
        }
        _ => panic!("expected Run with overrides"),
    }
}

#[test]
fn cli_parse_status_with_config() {
    match parse(&["dexfetch", "status", "--config", "/etc/dexfetch.toml"]) {
        CliCommand::Status { overrides } => {
            assert_eq!(overrides.config, Some(PathBuf::from("/etc/dexfetch.toml")));
        }
        _ => panic!("expected Status"),
    }
}

#[test]
fn cli_rejects_bad_limit() {
    assert!(Cli::try_parse_from(["dexfetch", "run", "--limit", "-3"]).is_err());
    assert!(Cli::try_parse_from(["dexfetch", "fetch"]).is_err());
}

#[test]
fn overrides_replace_file_values() {
    let overrides = ConfigOverrides {
        limit: Some(9),
        output: Some(PathBuf::from("out.csv")),
        ..ConfigOverrides::default()
    };
    let cfg = overrides.apply(FetchConfig::default());
    assert_eq!(cfg.limit, 9);
    assert_eq!(cfg.final_path, PathBuf::from("out.csv"));
    assert_eq!(cfg.checkpoint_path, FetchConfig::default().checkpoint_path);
}

#[test]
fn resolve_reads_explicit_config_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "limit = 12\nmax_attempts = 0\n").unwrap();
    let overrides = ConfigOverrides {
        config: Some(path.clone()),
        ..ConfigOverrides::default()
    };
    assert!(overrides.resolve().is_err());

    std::fs::write(&path, "limit = 12\n").unwrap();
    let cfg = overrides.resolve().unwrap();
    assert_eq!(cfg.limit, 12);
}
