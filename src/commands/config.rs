//! Config command definitions.

use crate::commands::params::{
    format_parameter, format_pretty_parameter, COMMAND_CONFIG, COMMAND_PATH, COMMAND_VIEW,
};
use clap::Command;

/// Create the config command with all its subcommands.
pub fn config_command() -> Command {
    Command::new(COMMAND_CONFIG)
        .about("Configuration management")
        .subcommand_required(true)
        .subcommand(Command::new(COMMAND_PATH).about("Print the configuration file path"))
        .subcommand(
            Command::new(COMMAND_VIEW)
                .about("Show the configured gardens")
                .arg(format_parameter())
                .arg(format_pretty_parameter()),
        )
}
