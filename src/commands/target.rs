//! Target command definitions.
//!
//! This module defines the CLI commands that change or show the current
//! target.

use crate::commands::params::{
    format_parameter, format_pretty_parameter, name_parameter, COMMAND_GARDEN, COMMAND_PROJECT,
    COMMAND_SEED, COMMAND_SHOOT, COMMAND_TARGET, COMMAND_UNSET, COMMAND_VIEW, PARAMETER_LEVEL,
    TARGET_LEVELS,
};
use clap::{Arg, Command};

/// Create the target command with all its subcommands.
pub fn target_command() -> Command {
    Command::new(COMMAND_TARGET)
        .about("Target a garden, project, seed or shoot")
        .subcommand(
            Command::new(COMMAND_GARDEN)
                .about("Target a garden")
                .arg(name_parameter("Garden name or alias")),
        )
        .subcommand(
            Command::new(COMMAND_PROJECT)
                .about("Target a project within the current garden")
                .arg(name_parameter("Project name")),
        )
        .subcommand(
            Command::new(COMMAND_SEED)
                .about("Target a seed within the current garden")
                .arg(name_parameter("Seed name")),
        )
        .subcommand(
            Command::new(COMMAND_SHOOT)
                .about("Target a shoot within the current project or seed")
                .arg(name_parameter("Shoot name")),
        )
        .subcommand(
            Command::new(COMMAND_UNSET)
                .about("Clear one level of the current target")
                .arg(
                    Arg::new(PARAMETER_LEVEL)
                        .num_args(1)
                        .required(true)
                        .value_parser(TARGET_LEVELS)
                        .help("Hierarchy level to clear"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_VIEW)
                .about("Show the current target")
                .arg(format_parameter())
                .arg(format_pretty_parameter()),
        )
}
