//! Unit tests for CLI argument parsing

use crate::cli::{Cli, Commands, MapByArg};
use crate::resolver::MapControllerBy;
use clap::Parser;

#[test]
fn test_routes_command_with_flags() {
    let cli = Cli::try_parse_from([
        "oasrouter",
        "routes",
        "--spec",
        "api.yaml",
        "--map-by",
        "path",
        "--no-path-fallback",
        "--prefix",
        "/b",
        "--json",
    ])
    .unwrap();

    match cli.command {
        Commands::Routes {
            policy,
            prefix,
            json,
        } => {
            assert_eq!(policy.spec.to_string_lossy(), "api.yaml");
            assert_eq!(policy.map_by, Some(MapByArg::Path));
            assert!(policy.no_path_fallback);
            assert!(!policy.no_index_fallback);
            assert_eq!(prefix.as_deref(), Some("/b"));
            assert!(json);
        }
        Commands::Check { .. } => panic!("Expected Routes command"),
    }
}

#[test]
fn test_check_command_requires_spec() {
    assert!(Cli::try_parse_from(["oasrouter", "check"]).is_err());
}

#[test]
fn test_map_by_rejects_unknown_value() {
    assert!(Cli::try_parse_from(["oasrouter", "check", "--spec", "a.yaml", "--map-by", "operation"]).is_err());
}

#[test]
fn test_flags_override_defaults() {
    let cli = Cli::try_parse_from([
        "oasrouter",
        "check",
        "-s",
        "a.yaml",
        "--map-by",
        "path",
        "--no-index-fallback",
    ])
    .unwrap();
    let Commands::Check { policy } = cli.command else {
        panic!("Expected Check command");
    };
    let config = policy.router_config().unwrap();
    assert_eq!(config.policy.map_controller_by, MapControllerBy::Path);
    assert!(!config.policy.fallback_controller_to_index);
}
