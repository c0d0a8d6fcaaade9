//! Shared command parameters for all CLI commands.
//!
//! This module defines the command and parameter names in one place, plus
//! the common argument constructors used across command modules.

use crate::format::OutputFormat;
use clap::{Arg, ArgAction};

// Target commands
pub const COMMAND_TARGET: &str = "target";
pub const COMMAND_GARDEN: &str = "garden";
pub const COMMAND_PROJECT: &str = "project";
pub const COMMAND_SEED: &str = "seed";
pub const COMMAND_SHOOT: &str = "shoot";
pub const COMMAND_UNSET: &str = "unset";
pub const COMMAND_VIEW: &str = "view";

// Config commands
pub const COMMAND_CONFIG: &str = "config";
pub const COMMAND_PATH: &str = "path";

// Completion commands
pub const COMMAND_COMPLETIONS: &str = "completions";
pub const COMMAND_COMPLETE: &str = "complete";

// Global target flag names
pub const PARAMETER_GARDEN: &str = "garden";
pub const PARAMETER_PROJECT: &str = "project";
pub const PARAMETER_SEED: &str = "seed";
pub const PARAMETER_SHOOT: &str = "shoot";

// Parameter names
pub const PARAMETER_CONFIG: &str = "config";
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_PRETTY: &str = "pretty";
pub const PARAMETER_NAME: &str = "name";
pub const PARAMETER_LEVEL: &str = "level";
pub const PARAMETER_SHELL: &str = "shell";
pub const PARAMETER_TO_COMPLETE: &str = "to-complete";

pub const TARGET_LEVELS: [&str; 4] = [
    COMMAND_GARDEN,
    COMMAND_PROJECT,
    COMMAND_SEED,
    COMMAND_SHOOT,
];

pub const SUPPORTED_SHELLS: [&str; 5] = ["bash", "zsh", "fish", "powershell", "elvish"];

/// Create the output format parameter used by the view commands.
pub fn format_parameter() -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .env("GLCLI_FORMAT")
        .default_value("text")
        .help("Output data format")
        .value_parser(OutputFormat::names())
}

pub fn format_pretty_parameter() -> Arg {
    Arg::new(PARAMETER_PRETTY)
        .long(PARAMETER_PRETTY)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Format the output pretty")
}

/// Positional name argument for the target mutation commands.
pub fn name_parameter(help: &'static str) -> Arg {
    Arg::new(PARAMETER_NAME).num_args(1).required(true).help(help)
}

fn target_flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .num_args(1)
        .required(false)
        .global(true)
        .help(help)
}

/// The four global flags that temporarily re-target for one invocation.
pub fn global_target_flags() -> Vec<Arg> {
    vec![
        target_flag(
            PARAMETER_GARDEN,
            "Temporarily target this garden (name or alias)",
        ),
        target_flag(PARAMETER_PROJECT, "Temporarily target this project"),
        target_flag(PARAMETER_SEED, "Temporarily target this seed"),
        target_flag(PARAMETER_SHOOT, "Temporarily target this shoot"),
    ]
}

pub fn config_parameter() -> Arg {
    Arg::new(PARAMETER_CONFIG)
        .long(PARAMETER_CONFIG)
        .num_args(1)
        .required(false)
        .global(true)
        .help("Path to the configuration file (default is $HOME/.glcli/config.yaml)")
}
