//! CLI command definitions and argument parsing.
//!
//! This module defines all the CLI commands and their arguments using the
//! clap crate. The global target flags are registered on the root command so
//! every subcommand can temporarily re-target.

use clap::{ArgMatches, Command};

pub mod completions;
pub mod config;
pub mod params;
pub mod target;

pub use params::{
    COMMAND_COMPLETE, COMMAND_COMPLETIONS, COMMAND_CONFIG, COMMAND_GARDEN, COMMAND_PATH,
    COMMAND_PROJECT, COMMAND_SEED, COMMAND_SHOOT, COMMAND_TARGET, COMMAND_UNSET, COMMAND_VIEW,
    PARAMETER_CONFIG, PARAMETER_FORMAT, PARAMETER_GARDEN, PARAMETER_LEVEL, PARAMETER_NAME,
    PARAMETER_PRETTY, PARAMETER_PROJECT, PARAMETER_SEED, PARAMETER_SHELL, PARAMETER_SHOOT,
    PARAMETER_TO_COMPLETE,
};

/// Build the full command tree.
///
/// Needed both for parsing and for completion script generation.
pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(params::config_parameter())
        .args(params::global_target_flags())
        .subcommand(target::target_command())
        .subcommand(config::config_command())
        .subcommand(completions::completions_command())
        .subcommand(completions::complete_command())
}

/// Parse the command-line arguments against the full command tree.
pub fn create_cli_commands() -> ArgMatches {
    build_cli().get_matches()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_tree_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_global_flags_reach_subcommands() {
        let matches = build_cli()
            .try_get_matches_from(["glcli", "target", "view", "--garden", "prod"])
            .unwrap();

        let (_, sub) = matches.subcommand().unwrap();
        let (_, view) = sub.subcommand().unwrap();

        assert_eq!(
            view.get_one::<String>(PARAMETER_GARDEN).map(String::as_str),
            Some("prod")
        );
    }

    #[test]
    fn test_unset_rejects_unknown_level() {
        let result = build_cli().try_get_matches_from(["glcli", "target", "unset", "cluster"]);
        assert!(result.is_err());
    }
}
