//! Transient target overrides sourced from the command line.
//!
//! The four global flags let an operator re-target for a single invocation
//! without touching the persisted state. Merging them with the persisted
//! target implements "moving up": naming a level is an explicit decision to
//! re-target starting at that level, so everything beneath it is discarded.

use crate::commands::params::{
    PARAMETER_GARDEN, PARAMETER_PROJECT, PARAMETER_SEED, PARAMETER_SHOOT,
};
use crate::configuration::Configuration;
use crate::target::{Target, TargetError};
use clap::ArgMatches;
use tracing::trace;

/// Per-invocation target flag values. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetFlags {
    garden: Option<String>,
    project: Option<String>,
    seed: Option<String>,
    shoot: Option<String>,
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TargetFlags {
    pub fn new(
        garden: Option<String>,
        project: Option<String>,
        seed: Option<String>,
        shoot: Option<String>,
    ) -> Self {
        TargetFlags {
            garden: normalize(garden),
            project: normalize(project),
            seed: normalize(seed),
            shoot: normalize(shoot),
        }
    }

    /// Extract the global target flags from parsed arguments.
    ///
    /// The garden value is resolved through the configured alias table here,
    /// before anything compares it against persisted state.
    pub fn from_matches(matches: &ArgMatches, configuration: &Configuration) -> Self {
        let garden = matches
            .get_one::<String>(PARAMETER_GARDEN)
            .map(|name| configuration.canonical_garden_name(name));

        TargetFlags::new(
            garden,
            matches.get_one::<String>(PARAMETER_PROJECT).cloned(),
            matches.get_one::<String>(PARAMETER_SEED).cloned(),
            matches.get_one::<String>(PARAMETER_SHOOT).cloned(),
        )
    }

    pub fn garden_name(&self) -> Option<&str> {
        self.garden.as_deref()
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn seed_name(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    pub fn shoot_name(&self) -> Option<&str> {
        self.shoot.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.garden.is_none()
            && self.project.is_none()
            && self.seed.is_none()
            && self.shoot.is_none()
    }

    /// Merge the flags with the persisted target into the effective one.
    ///
    /// A `--garden` that differs from the persisted garden re-targets the
    /// garden alone; an equal value keeps the deeper context. A `--project`
    /// or `--seed` always re-anchors at that level, clearing the other side
    /// and any shoot. A `--shoot` attaches on top of whatever resulted.
    ///
    /// Fails when a project, seed or shoot flag cannot be anchored because
    /// neither the flags nor the persisted state provide the levels above it.
    pub fn merge(&self, persisted: &Target) -> Result<Target, TargetError> {
        let mut effective = match &self.garden {
            Some(garden) if persisted.garden_name() != Some(garden.as_str()) => {
                trace!("re-targeting garden {}, dropping deeper context", garden);
                Target::Garden {
                    garden: garden.clone(),
                }
            }
            _ => persisted.clone(),
        };

        if let Some(project) = &self.project {
            let garden = effective
                .garden_name()
                .ok_or(TargetError::NoGarden)?
                .to_string();
            effective = Target::Project {
                garden,
                project: project.clone(),
            };
        } else if let Some(seed) = &self.seed {
            let garden = effective
                .garden_name()
                .ok_or(TargetError::NoGarden)?
                .to_string();
            effective = Target::Seed {
                garden,
                seed: seed.clone(),
            };
        }

        if let Some(shoot) = &self.shoot {
            effective = effective.with_shoot_name(shoot)?;
        }

        Ok(effective)
    }
}
