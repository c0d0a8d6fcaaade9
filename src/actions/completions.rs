//! Completion action logic.
//!
//! This module generates static shell completion scripts and resolves the
//! dynamic name candidates behind them. Candidate resolution runs under a
//! manager without target flags: the dynamic provider would treat a
//! half-typed `--garden foo` as a decision to re-target the garden and drop
//! the persisted project/seed context, which is exactly the context the
//! deeper completions still need. The flags are instead consulted read-only
//! for display precedence.

use crate::actions::CliActionError;
use crate::commands;
use crate::commands::params::{PARAMETER_LEVEL, PARAMETER_TO_COMPLETE};
use crate::flags::TargetFlags;
use crate::manager::{Manager, TargetLevel};
use clap::ArgMatches;
use clap_complete::Shell;
use std::io;
use std::str::FromStr;

/// Instruction to the invoking shell once candidates are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionDirective {
    /// Do not fall back to file completion; candidates are domain names,
    /// never paths.
    NoFileComp,
}

impl CompletionDirective {
    /// Trailer line understood by the generated completion scripts.
    pub fn token(&self) -> &'static str {
        match self {
            CompletionDirective::NoFileComp => ":4",
        }
    }
}

/// Generate the static completion script for the specified shell and write
/// it to stdout.
pub fn generate_completions(shell: &str) -> Result<(), CliActionError> {
    let shell = match shell {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        other => {
            return Err(CliActionError::BusinessLogicError(format!(
                "Unsupported shell: {}",
                other
            )))
        }
    };

    let mut cmd = commands::build_cli();
    clap_complete::generate(shell, &mut cmd, "glcli", &mut io::stdout());
    Ok(())
}

/// Keep the candidates whose byte prefix matches the typed text, preserving
/// the order the lookup service supplied.
fn filter_by_prefix(to_complete: &str, candidates: Vec<String>) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|candidate| candidate.starts_with(to_complete))
        .collect()
}

fn no_garden() -> CliActionError {
    CliActionError::BusinessLogicError(String::from("no garden targeted"))
}

fn garden_candidates(manager: &Manager, _flags: &TargetFlags) -> Result<Vec<String>, CliActionError> {
    Ok(manager.garden_names())
}

async fn project_candidates(
    manager: &Manager,
    flags: &TargetFlags,
) -> Result<Vec<String>, CliActionError> {
    // any --garden flag has precedence over the persisted target
    let garden = match flags.garden_name() {
        Some(garden) => garden.to_string(),
        None => manager
            .current_target()?
            .garden_name()
            .ok_or_else(no_garden)?
            .to_string(),
    };

    Ok(manager.project_names(&garden).await?)
}

async fn seed_candidates(
    manager: &Manager,
    flags: &TargetFlags,
) -> Result<Vec<String>, CliActionError> {
    let garden = match flags.garden_name() {
        Some(garden) => garden.to_string(),
        None => manager
            .current_target()?
            .garden_name()
            .ok_or_else(no_garden)?
            .to_string(),
    };

    Ok(manager.seed_names(&garden).await?)
}

async fn shoot_candidates(
    manager: &Manager,
    flags: &TargetFlags,
) -> Result<Vec<String>, CliActionError> {
    // errors are okay here, the flags patch the target anyway
    let mut target = manager.current_target().unwrap_or_default();

    if let Some(garden) = flags.garden_name() {
        target = target.with_garden_name(garden);
    }

    if let Some(project) = flags.project_name() {
        target = target.with_project_name(project)?;
    } else if let Some(seed) = flags.seed_name() {
        target = target.with_seed_name(seed)?;
    }

    Ok(manager.shoot_names(&target).await?)
}

/// Resolve the candidate set for one hierarchy level.
///
/// Never fails: lookup or state errors are reported on stderr and produce an
/// empty candidate set, so a broken lookup cannot wedge the invoking shell.
pub async fn resolve_candidates(
    manager: &Manager,
    flags: &TargetFlags,
    level: TargetLevel,
    to_complete: &str,
) -> (Vec<String>, CompletionDirective) {
    let manager = manager.without_target_flags();

    let result = match level {
        TargetLevel::Garden => garden_candidates(&manager, flags),
        TargetLevel::Project => project_candidates(&manager, flags).await,
        TargetLevel::Seed => seed_candidates(&manager, flags).await,
        TargetLevel::Shoot => shoot_candidates(&manager, flags).await,
    };

    match result {
        Ok(candidates) => (
            filter_by_prefix(to_complete, candidates),
            CompletionDirective::NoFileComp,
        ),
        Err(e) => {
            eprintln!("{}", e);
            (Vec::new(), CompletionDirective::NoFileComp)
        }
    }
}

/// Entry point of the hidden `complete` command: one candidate per line,
/// then the directive trailer.
pub async fn run_complete(manager: &Manager, flags: &TargetFlags, sub_matches: &ArgMatches) {
    let level = sub_matches.get_one::<String>(PARAMETER_LEVEL).unwrap(); // safe, restricted by the value parser
    let level = TargetLevel::from_str(level).unwrap();
    let to_complete = sub_matches.get_one::<String>(PARAMETER_TO_COMPLETE).unwrap();

    let (candidates, directive) = resolve_candidates(manager, flags, level, to_complete).await;
    for candidate in candidates {
        println!("{}", candidate);
    }
    println!("{}", directive.token());
}
