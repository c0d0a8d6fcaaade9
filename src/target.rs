//! Target model for the garden landscape hierarchy.
//!
//! A target addresses a position in the hierarchy: a garden, then a project
//! or a seed (never both), then optionally a shoot. The enum makes the
//! exclusivity rules a property of the type rather than a runtime check.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for invalid target transitions or documents
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    /// A project, seed or shoot was named without a garden context
    #[error("no garden targeted")]
    NoGarden,
    /// A shoot was named without a project or seed to anchor it
    #[error("no project or seed targeted")]
    NoProjectOrSeed,
    /// The persisted target document violates the hierarchy rules
    #[error("malformed target document: {0}")]
    MalformedDocument(String),
}

/// A position in the landscape hierarchy.
///
/// Values are immutable; the `with_*` methods return new targets. A project
/// and a seed can never be addressed at the same time, and a shoot always
/// carries its full addressing context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Target {
    /// Nothing targeted
    #[default]
    Unaddressed,
    /// A garden (management landscape)
    Garden { garden: String },
    /// A project within a garden
    Project { garden: String, project: String },
    /// A seed within a garden
    Seed { garden: String, seed: String },
    /// A shoot addressed via its owning project
    ProjectShoot {
        garden: String,
        project: String,
        shoot: String,
    },
    /// A shoot addressed via its hosting seed
    SeedShoot {
        garden: String,
        seed: String,
        shoot: String,
    },
}

impl Target {
    pub fn garden_name(&self) -> Option<&str> {
        match self {
            Target::Unaddressed => None,
            Target::Garden { garden }
            | Target::Project { garden, .. }
            | Target::Seed { garden, .. }
            | Target::ProjectShoot { garden, .. }
            | Target::SeedShoot { garden, .. } => Some(garden),
        }
    }

    pub fn project_name(&self) -> Option<&str> {
        match self {
            Target::Project { project, .. } | Target::ProjectShoot { project, .. } => Some(project),
            _ => None,
        }
    }

    pub fn seed_name(&self) -> Option<&str> {
        match self {
            Target::Seed { seed, .. } | Target::SeedShoot { seed, .. } => Some(seed),
            _ => None,
        }
    }

    pub fn shoot_name(&self) -> Option<&str> {
        match self {
            Target::ProjectShoot { shoot, .. } | Target::SeedShoot { shoot, .. } => Some(shoot),
            _ => None,
        }
    }

    pub fn is_unaddressed(&self) -> bool {
        matches!(self, Target::Unaddressed)
    }

    /// Replace the garden while keeping the rest of the address.
    ///
    /// An empty name clears the garden, and with it everything beneath it:
    /// no variant can hold a project, seed or shoot without a garden.
    pub fn with_garden_name(&self, garden: &str) -> Target {
        if garden.is_empty() {
            return Target::Unaddressed;
        }

        let garden = garden.to_string();

        match self {
            Target::Unaddressed => Target::Garden { garden },
            Target::Garden { .. } => Target::Garden { garden },
            Target::Project { project, .. } => Target::Project {
                garden,
                project: project.clone(),
            },
            Target::Seed { seed, .. } => Target::Seed {
                garden,
                seed: seed.clone(),
            },
            Target::ProjectShoot { project, shoot, .. } => Target::ProjectShoot {
                garden,
                project: project.clone(),
                shoot: shoot.clone(),
            },
            Target::SeedShoot { seed, shoot, .. } => Target::SeedShoot {
                garden,
                seed: seed.clone(),
                shoot: shoot.clone(),
            },
        }
    }

    /// Address a project, clearing any seed.
    ///
    /// A shoot survives the move (last-write-wins at the field level); a
    /// conflicting seed never does. An empty name clears the project and the
    /// shoot with it, since a shoot cannot outlive its addressing context.
    pub fn with_project_name(&self, project: &str) -> Result<Target, TargetError> {
        if project.is_empty() {
            return Ok(match self {
                Target::Project { garden, .. } | Target::ProjectShoot { garden, .. } => {
                    Target::Garden {
                        garden: garden.clone(),
                    }
                }
                other => other.clone(),
            });
        }

        let project = project.to_string();

        match self {
            Target::Unaddressed => Err(TargetError::NoGarden),
            Target::Garden { garden }
            | Target::Seed { garden, .. }
            | Target::Project { garden, .. } => Ok(Target::Project {
                garden: garden.clone(),
                project,
            }),
            Target::ProjectShoot { garden, shoot, .. } | Target::SeedShoot { garden, shoot, .. } => {
                Ok(Target::ProjectShoot {
                    garden: garden.clone(),
                    project,
                    shoot: shoot.clone(),
                })
            }
        }
    }

    /// Address a seed, clearing any project. Mirror image of
    /// [`with_project_name`](Target::with_project_name).
    pub fn with_seed_name(&self, seed: &str) -> Result<Target, TargetError> {
        if seed.is_empty() {
            return Ok(match self {
                Target::Seed { garden, .. } | Target::SeedShoot { garden, .. } => Target::Garden {
                    garden: garden.clone(),
                },
                other => other.clone(),
            });
        }

        let seed = seed.to_string();

        match self {
            Target::Unaddressed => Err(TargetError::NoGarden),
            Target::Garden { garden }
            | Target::Project { garden, .. }
            | Target::Seed { garden, .. } => Ok(Target::Seed {
                garden: garden.clone(),
                seed,
            }),
            Target::ProjectShoot { garden, shoot, .. } | Target::SeedShoot { garden, shoot, .. } => {
                Ok(Target::SeedShoot {
                    garden: garden.clone(),
                    seed,
                    shoot: shoot.clone(),
                })
            }
        }
    }

    /// Address a shoot within the current project or seed.
    pub fn with_shoot_name(&self, shoot: &str) -> Result<Target, TargetError> {
        if shoot.is_empty() {
            return Ok(match self {
                Target::ProjectShoot {
                    garden, project, ..
                } => Target::Project {
                    garden: garden.clone(),
                    project: project.clone(),
                },
                Target::SeedShoot { garden, seed, .. } => Target::Seed {
                    garden: garden.clone(),
                    seed: seed.clone(),
                },
                other => other.clone(),
            });
        }

        let shoot = shoot.to_string();

        match self {
            Target::Unaddressed => Err(TargetError::NoGarden),
            Target::Garden { .. } => Err(TargetError::NoProjectOrSeed),
            Target::Project { garden, project } | Target::ProjectShoot { garden, project, .. } => {
                Ok(Target::ProjectShoot {
                    garden: garden.clone(),
                    project: project.clone(),
                    shoot,
                })
            }
            Target::Seed { garden, seed } | Target::SeedShoot { garden, seed, .. } => {
                Ok(Target::SeedShoot {
                    garden: garden.clone(),
                    seed: seed.clone(),
                    shoot,
                })
            }
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Target::Unaddressed => write!(f, "<nothing targeted>"),
            Target::Garden { garden } => write!(f, "garden {}", garden),
            Target::Project { garden, project } => {
                write!(f, "garden {}, project {}", garden, project)
            }
            Target::Seed { garden, seed } => write!(f, "garden {}, seed {}", garden, seed),
            Target::ProjectShoot {
                garden,
                project,
                shoot,
            } => write!(f, "garden {}, project {}, shoot {}", garden, project, shoot),
            Target::SeedShoot {
                garden,
                seed,
                shoot,
            } => write!(f, "garden {}, seed {}, shoot {}", garden, seed, shoot),
        }
    }
}

/// Wire form of a target as stored in `target.yaml`.
///
/// Absent fields mean "unset"; the file never carries present-but-empty
/// values. Converting back into a [`Target`] validates the hierarchy, so a
/// hand-edited document naming both a project and a seed is rejected instead
/// of silently picking one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garden: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoot: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl From<&Target> for TargetDocument {
    fn from(target: &Target) -> Self {
        TargetDocument {
            garden: target.garden_name().map(str::to_string),
            project: target.project_name().map(str::to_string),
            seed: target.seed_name().map(str::to_string),
            shoot: target.shoot_name().map(str::to_string),
        }
    }
}

impl TryFrom<TargetDocument> for Target {
    type Error = TargetError;

    fn try_from(doc: TargetDocument) -> Result<Target, TargetError> {
        let garden = non_empty(&doc.garden);
        let project = non_empty(&doc.project);
        let seed = non_empty(&doc.seed);
        let shoot = non_empty(&doc.shoot);

        if project.is_some() && seed.is_some() {
            return Err(TargetError::MalformedDocument(String::from(
                "a target cannot name both a project and a seed",
            )));
        }

        match (garden, project, seed, shoot) {
            (None, None, None, None) => Ok(Target::Unaddressed),
            (None, _, _, _) => Err(TargetError::MalformedDocument(String::from(
                "a project, seed or shoot requires a garden",
            ))),
            (Some(garden), None, None, None) => Ok(Target::Garden {
                garden: garden.to_string(),
            }),
            (Some(garden), Some(project), None, None) => Ok(Target::Project {
                garden: garden.to_string(),
                project: project.to_string(),
            }),
            (Some(garden), None, Some(seed), None) => Ok(Target::Seed {
                garden: garden.to_string(),
                seed: seed.to_string(),
            }),
            (Some(garden), Some(project), None, Some(shoot)) => Ok(Target::ProjectShoot {
                garden: garden.to_string(),
                project: project.to_string(),
                shoot: shoot.to_string(),
            }),
            (Some(garden), None, Some(seed), Some(shoot)) => Ok(Target::SeedShoot {
                garden: garden.to_string(),
                seed: seed.to_string(),
                shoot: shoot.to_string(),
            }),
            (Some(_), None, None, Some(_)) => Err(TargetError::MalformedDocument(String::from(
                "a shoot requires a project or a seed",
            ))),
            (Some(_), Some(_), Some(_), _) => unreachable!("exclusivity checked above"),
        }
    }
}
