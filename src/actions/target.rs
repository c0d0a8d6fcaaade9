//! Target action logic.
//!
//! Each action extracts its parameters from the parsed arguments, drives the
//! manager, and reports the outcome. Mutations resolve their garden context
//! from the effective current target, so the global flags participate the
//! same way persisted state does.

use crate::actions::CliActionError;
use crate::commands::params::{PARAMETER_FORMAT, PARAMETER_LEVEL, PARAMETER_NAME, PARAMETER_PRETTY};
use crate::format::{Formattable, FormattingError, OutputFormat, OutputFormatOptions};
use crate::manager::{Manager, TargetLevel};
use crate::target::Target;
use clap::ArgMatches;
use std::str::FromStr;
use tracing::debug;

/// Serializable view of a target for the `view` command.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TargetInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garden: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoot: Option<String>,
    #[serde(skip)]
    text: String,
}

impl From<&Target> for TargetInfo {
    fn from(target: &Target) -> Self {
        TargetInfo {
            garden: target.garden_name().map(str::to_string),
            project: target.project_name().map(str::to_string),
            seed: target.seed_name().map(str::to_string),
            shoot: target.shoot_name().map(str::to_string),
            text: target.to_string(),
        }
    }
}

impl Formattable for TargetInfo {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(self)?)
                } else {
                    Ok(serde_json::to_string(self)?)
                }
            }
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?),
            OutputFormat::Text => Ok(self.text.clone()),
        }
    }
}

pub fn target_garden(manager: &Manager, sub_matches: &ArgMatches) -> Result<(), CliActionError> {
    let name = sub_matches.get_one::<String>(PARAMETER_NAME).unwrap(); // safe, the argument is mandatory and enforced by clap
    let target = manager.target_garden(name)?;
    println!("Successfully targeted {}", target);
    Ok(())
}

pub async fn target_project(
    manager: &Manager,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let name = sub_matches.get_one::<String>(PARAMETER_NAME).unwrap();
    let garden = effective_garden(manager)?;
    let target = manager.target_project(&garden, name).await?;
    println!("Successfully targeted {}", target);
    Ok(())
}

pub async fn target_seed(
    manager: &Manager,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let name = sub_matches.get_one::<String>(PARAMETER_NAME).unwrap();
    let garden = effective_garden(manager)?;
    let target = manager.target_seed(&garden, name).await?;
    println!("Successfully targeted {}", target);
    Ok(())
}

pub async fn target_shoot(
    manager: &Manager,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let name = sub_matches.get_one::<String>(PARAMETER_NAME).unwrap();
    let target = manager.target_shoot(name).await?;
    println!("Successfully targeted {}", target);
    Ok(())
}

pub fn unset(manager: &Manager, sub_matches: &ArgMatches) -> Result<(), CliActionError> {
    let level = sub_matches.get_one::<String>(PARAMETER_LEVEL).unwrap();
    let level = TargetLevel::from_str(level).unwrap(); // safe, restricted by the value parser

    let target = manager.unset(level)?;
    debug!("Current target after unset: {}", target);
    println!("Successfully unset {}", level);
    Ok(())
}

pub fn view(manager: &Manager, sub_matches: &ArgMatches) -> Result<(), CliActionError> {
    let format_str = sub_matches
        .get_one::<String>(PARAMETER_FORMAT)
        .cloned()
        .unwrap_or_else(|| "text".to_string());
    let pretty = sub_matches.get_flag(PARAMETER_PRETTY);

    let format =
        OutputFormat::from_string_with_options(&format_str, OutputFormatOptions { pretty })?;
    print_target(manager, &format)
}

/// Bare `glcli target` shows the current target in text form.
pub fn view_default(manager: &Manager) -> Result<(), CliActionError> {
    print_target(manager, &OutputFormat::Text)
}

fn print_target(manager: &Manager, format: &OutputFormat) -> Result<(), CliActionError> {
    let target = manager.current_target()?;
    let output = TargetInfo::from(&target).format(format)?;
    println!("{}", output.trim_end());
    Ok(())
}

fn effective_garden(manager: &Manager) -> Result<String, CliActionError> {
    let current = manager.current_target()?;
    match current.garden_name() {
        Some(garden) => Ok(garden.to_string()),
        None => Err(CliActionError::BusinessLogicError(String::from(
            "no garden targeted, target a garden first or pass --garden",
        ))),
    }
}
