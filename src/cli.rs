//! Command dispatch.
//!
//! Parses the command line, wires up the execution context (configuration,
//! target flags, manager with the landscape API client) and routes to the
//! action implementations.

use crate::actions;
use crate::commands::{
    self, COMMAND_COMPLETE, COMMAND_COMPLETIONS, COMMAND_CONFIG, COMMAND_GARDEN, COMMAND_PATH,
    COMMAND_PROJECT, COMMAND_SEED, COMMAND_SHOOT, COMMAND_TARGET, COMMAND_UNSET, COMMAND_VIEW,
    PARAMETER_CONFIG, PARAMETER_FORMAT, PARAMETER_PRETTY, PARAMETER_SHELL,
};
use crate::configuration::Configuration;
use crate::error::CliError;
use crate::flags::TargetFlags;
use crate::format::{Formattable, OutputFormat, OutputFormatOptions};
use crate::landscape_api::LandscapeApiClient;
use crate::lookup::NameLookup;
use crate::manager::Manager;
use clap::ArgMatches;
use std::path::PathBuf;
use std::sync::Arc;

fn extract_subcommand_name(sub_matches: &ArgMatches) -> String {
    match sub_matches.subcommand() {
        Some(m) => m.0.to_string(),
        None => "unknown".to_string(),
    }
}

pub async fn execute_command() -> Result<(), CliError> {
    let matches = commands::create_cli_commands();

    let configuration = match matches.get_one::<String>(PARAMETER_CONFIG) {
        Some(path) => Configuration::load_from_file(PathBuf::from(path))?,
        None => Configuration::load_default()?,
    };

    let flags = TargetFlags::from_matches(&matches, &configuration);
    let target_path = Configuration::target_file_path()?;
    let lookup: Arc<dyn NameLookup> = Arc::new(LandscapeApiClient::new(configuration.clone()));
    let manager = Manager::new(configuration.clone(), flags.clone(), lookup, target_path);

    match matches.subcommand() {
        // Target
        Some((COMMAND_TARGET, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_GARDEN, sub_matches)) => {
                Ok(actions::target::target_garden(&manager, sub_matches)?)
            }
            Some((COMMAND_PROJECT, sub_matches)) => {
                Ok(actions::target::target_project(&manager, sub_matches).await?)
            }
            Some((COMMAND_SEED, sub_matches)) => {
                Ok(actions::target::target_seed(&manager, sub_matches).await?)
            }
            Some((COMMAND_SHOOT, sub_matches)) => {
                Ok(actions::target::target_shoot(&manager, sub_matches).await?)
            }
            Some((COMMAND_UNSET, sub_matches)) => {
                Ok(actions::target::unset(&manager, sub_matches)?)
            }
            Some((COMMAND_VIEW, sub_matches)) => {
                Ok(actions::target::view(&manager, sub_matches)?)
            }
            None => Ok(actions::target::view_default(&manager)?),
            _ => unreachable!(),
        },
        // Configuration
        Some((COMMAND_CONFIG, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_PATH, _)) => {
                let path = Configuration::get_default_configuration_file_path()?;
                println!("{}", path.display());
                Ok(())
            }
            Some((COMMAND_VIEW, sub_matches)) => {
                let format = sub_matches.get_one::<String>(PARAMETER_FORMAT).unwrap(); // safe, the argument has a default value
                let pretty = sub_matches.get_flag(PARAMETER_PRETTY);
                let format =
                    OutputFormat::from_string_with_options(format, OutputFormatOptions { pretty })?;

                println!("{}", configuration.format(&format)?.trim_end());
                Ok(())
            }
            None => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
            _ => unreachable!(),
        },
        // Completion scripts
        Some((COMMAND_COMPLETIONS, sub_matches)) => {
            let shell = sub_matches.get_one::<String>(PARAMETER_SHELL).unwrap();
            Ok(actions::completions::generate_completions(shell)?)
        }
        // Completion callback; never fails, a broken lookup must not wedge
        // the invoking shell
        Some((COMMAND_COMPLETE, sub_matches)) => {
            actions::completions::run_complete(&manager, &flags, sub_matches).await;
            Ok(())
        }
        None => Err(CliError::UnsupportedSubcommand(String::from("unknown"))),
        _ => unreachable!(),
    }
}
