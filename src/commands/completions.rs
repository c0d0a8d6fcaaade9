//! Completion command definitions.
//!
//! Two commands cooperate here: `completions` emits a static script for a
//! shell, and the hidden `complete` command is the callback those scripts
//! (and interactive shells) invoke to list valid names at one hierarchy
//! level, honoring the target flags typed so far.

use crate::commands::params::{
    COMMAND_COMPLETE, COMMAND_COMPLETIONS, PARAMETER_LEVEL, PARAMETER_SHELL, PARAMETER_TO_COMPLETE,
    SUPPORTED_SHELLS, TARGET_LEVELS,
};
use clap::{Arg, Command};

/// Create the completions command for generating shell scripts.
pub fn completions_command() -> Command {
    Command::new(COMMAND_COMPLETIONS)
        .about("Generate shell completion scripts")
        .arg(
            Arg::new(PARAMETER_SHELL)
                .num_args(1)
                .required(true)
                .value_parser(SUPPORTED_SHELLS)
                .help("Shell to generate completions for"),
        )
}

/// Create the hidden completion callback command.
pub fn complete_command() -> Command {
    Command::new(COMMAND_COMPLETE)
        .hide(true)
        .about("List completion candidates for one hierarchy level")
        .arg(
            Arg::new(PARAMETER_LEVEL)
                .num_args(1)
                .required(true)
                .value_parser(TARGET_LEVELS),
        )
        .arg(
            Arg::new(PARAMETER_TO_COMPLETE)
                .num_args(1)
                .required(false)
                .default_value(""),
        )
}
