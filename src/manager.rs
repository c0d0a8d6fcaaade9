//! Target manager.
//!
//! The manager mediates every read and mutation of the current target. It
//! validates requested names against the configuration (gardens) and the
//! landscape API (projects, seeds, shoots), then persists the result through
//! its provider. Mutations are read-modify-write; a failed validation or
//! lookup leaves the persisted state untouched.

use crate::configuration::Configuration;
use crate::flags::TargetFlags;
use crate::lookup::{LookupError, NameLookup};
use crate::provider::{
    DynamicTargetProvider, FilesystemTargetProvider, ProviderError, TargetProvider,
};
use crate::target::{Target, TargetError};
use std::path::PathBuf;
use std::sync::Arc;
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::debug;

/// Hierarchy level addressed by `target unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TargetLevel {
    Garden,
    Project,
    Seed,
    Shoot,
}

#[derive(Debug, Error)]
pub enum ManagerError {
    /// The requested name does not exist or violates the hierarchy
    #[error("validation failed: {0}")]
    Validation(String),
    /// The persisted state could not be read, or the flag merge could not
    /// produce a well-formed target
    #[error("failed to resolve the current target: {0}")]
    Resolution(#[source] ProviderError),
    /// The new target could not be persisted
    #[error("failed to persist the target: {0}")]
    Persistence(#[source] ProviderError),
    /// The external name lookup failed or was cancelled
    #[error("{0}")]
    Lookup(#[from] LookupError),
}

fn read_error(error: ProviderError) -> ManagerError {
    match error {
        ProviderError::Store { .. } => ManagerError::Persistence(error),
        _ => ManagerError::Resolution(error),
    }
}

fn hierarchy_error(error: TargetError) -> ManagerError {
    ManagerError::Validation(error.to_string())
}

/// Mediates reads and writes of the current target.
pub struct Manager {
    provider: Box<dyn TargetProvider>,
    configuration: Configuration,
    lookup: Arc<dyn NameLookup>,
    target_path: PathBuf,
}

impl Manager {
    /// Manager for normal command execution: reads merge the target flags
    /// into the persisted state ("moving up" semantics).
    pub fn new(
        configuration: Configuration,
        flags: TargetFlags,
        lookup: Arc<dyn NameLookup>,
        target_path: PathBuf,
    ) -> Self {
        let filesystem = FilesystemTargetProvider::new(target_path.clone());
        Manager {
            provider: Box::new(DynamicTargetProvider::new(filesystem, flags)),
            configuration,
            lookup,
            target_path,
        }
    }

    /// An equivalent manager over the bare filesystem provider.
    ///
    /// Used by the completion callbacks: while the user is still composing
    /// flags, the flag merge must not discard the persisted project or seed
    /// context.
    pub fn without_target_flags(&self) -> Manager {
        Manager {
            provider: Box::new(FilesystemTargetProvider::new(self.target_path.clone())),
            configuration: self.configuration.clone(),
            lookup: Arc::clone(&self.lookup),
            target_path: self.target_path.clone(),
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The effective current target as seen through this manager's provider.
    pub fn current_target(&self) -> Result<Target, ManagerError> {
        self.provider.read().map_err(read_error)
    }

    /// Target a garden by name or alias.
    pub fn target_garden(&self, name: &str) -> Result<Target, ManagerError> {
        let garden = match self.configuration.garden(name) {
            Some(entry) => entry.name.clone(),
            None => {
                return Err(ManagerError::Validation(format!(
                    "garden '{}' is not configured",
                    name
                )))
            }
        };

        debug!("Targeting garden {}", garden);
        self.persist(Target::Garden { garden })
    }

    /// Target a project within a garden, replacing any seed or shoot.
    pub async fn target_project(&self, garden: &str, project: &str) -> Result<Target, ManagerError> {
        let garden = self.validated_garden(garden)?;
        let names = self.lookup.project_names(&garden).await?;
        if !names.iter().any(|name| name == project) {
            return Err(ManagerError::Validation(format!(
                "project '{}' does not exist in garden '{}'",
                project, garden
            )));
        }

        debug!("Targeting project {} in garden {}", project, garden);
        self.persist(Target::Project {
            garden,
            project: project.to_string(),
        })
    }

    /// Target a seed within a garden, replacing any project or shoot.
    pub async fn target_seed(&self, garden: &str, seed: &str) -> Result<Target, ManagerError> {
        let garden = self.validated_garden(garden)?;
        let names = self.lookup.seed_names(&garden).await?;
        if !names.iter().any(|name| name == seed) {
            return Err(ManagerError::Validation(format!(
                "seed '{}' does not exist in garden '{}'",
                seed, garden
            )));
        }

        debug!("Targeting seed {} in garden {}", seed, garden);
        self.persist(Target::Seed {
            garden,
            seed: seed.to_string(),
        })
    }

    /// Target a shoot within the currently targeted project or seed.
    pub async fn target_shoot(&self, shoot: &str) -> Result<Target, ManagerError> {
        let current = self.current_target()?;

        if current.garden_name().is_none() {
            return Err(ManagerError::Validation(String::from(
                "no garden targeted, target a garden first",
            )));
        }

        if current.project_name().is_none() && current.seed_name().is_none() {
            return Err(ManagerError::Validation(String::from(
                "no project or seed targeted, target one first to anchor the shoot",
            )));
        }

        let names = self.lookup.shoot_names(&current).await?;
        if !names.iter().any(|name| name == shoot) {
            return Err(ManagerError::Validation(format!(
                "shoot '{}' does not exist in {}",
                shoot, current
            )));
        }

        debug!("Targeting shoot {} in {}", shoot, current);
        let target = current.with_shoot_name(shoot).map_err(hierarchy_error)?;
        self.persist(target)
    }

    /// Clear one level of the current target. Clearing a project or seed
    /// also clears the shoot, which cannot outlive its addressing context;
    /// clearing the garden clears everything.
    pub fn unset(&self, level: TargetLevel) -> Result<Target, ManagerError> {
        let current = self.current_target()?;

        let not_targeted =
            |what: &str| ManagerError::Validation(format!("no {} targeted", what));

        let target = match level {
            TargetLevel::Garden => {
                if current.garden_name().is_none() {
                    return Err(not_targeted("garden"));
                }
                Target::Unaddressed
            }
            TargetLevel::Project => {
                if current.project_name().is_none() {
                    return Err(not_targeted("project"));
                }
                current.with_project_name("").map_err(hierarchy_error)?
            }
            TargetLevel::Seed => {
                if current.seed_name().is_none() {
                    return Err(not_targeted("seed"));
                }
                current.with_seed_name("").map_err(hierarchy_error)?
            }
            TargetLevel::Shoot => {
                if current.shoot_name().is_none() {
                    return Err(not_targeted("shoot"));
                }
                current.with_shoot_name("").map_err(hierarchy_error)?
            }
        };

        debug!("Unset {}, target is now {}", level, target);
        self.persist(target)
    }

    /// Garden names come from the configuration, not the landscape API.
    pub fn garden_names(&self) -> Vec<String> {
        self.configuration.garden_names()
    }

    pub async fn project_names(&self, garden: &str) -> Result<Vec<String>, ManagerError> {
        let garden = self.configuration.canonical_garden_name(garden);
        Ok(self.lookup.project_names(&garden).await?)
    }

    pub async fn seed_names(&self, garden: &str) -> Result<Vec<String>, ManagerError> {
        let garden = self.configuration.canonical_garden_name(garden);
        Ok(self.lookup.seed_names(&garden).await?)
    }

    pub async fn shoot_names(&self, target: &Target) -> Result<Vec<String>, ManagerError> {
        Ok(self.lookup.shoot_names(target).await?)
    }

    fn validated_garden(&self, name: &str) -> Result<String, ManagerError> {
        match self.configuration.garden(name) {
            Some(entry) => Ok(entry.name.clone()),
            None => Err(ManagerError::Validation(format!(
                "garden '{}' is not configured",
                name
            ))),
        }
    }

    fn persist(&self, target: Target) -> Result<Target, ManagerError> {
        match self.provider.write(&target) {
            Ok(()) => Ok(target),
            Err(e) => Err(ManagerError::Persistence(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::GardenConfiguration;
    use async_trait::async_trait;

    /// In-memory lookup double with a fixed name universe.
    struct StaticNameLookup;

    #[async_trait]
    impl NameLookup for StaticNameLookup {
        async fn project_names(&self, _garden: &str) -> Result<Vec<String>, LookupError> {
            Ok(vec!["p1".to_string(), "core".to_string()])
        }

        async fn seed_names(&self, _garden: &str) -> Result<Vec<String>, LookupError> {
            Ok(vec!["s1".to_string(), "aws-eu1".to_string()])
        }

        async fn shoot_names(&self, _target: &Target) -> Result<Vec<String>, LookupError> {
            Ok(vec!["sh1".to_string(), "api-cluster".to_string()])
        }
    }

    fn configuration() -> Configuration {
        Configuration {
            gardens: vec![
                GardenConfiguration {
                    name: "g1".to_string(),
                    api_url: None,
                    aliases: vec!["one".to_string()],
                },
                GardenConfiguration {
                    name: "g2".to_string(),
                    api_url: None,
                    aliases: vec![],
                },
            ],
        }
    }

    fn manager_with_flags(dir: &tempfile::TempDir, flags: TargetFlags) -> Manager {
        Manager::new(
            configuration(),
            flags,
            Arc::new(StaticNameLookup),
            dir.path().join("target.yaml"),
        )
    }

    fn manager(dir: &tempfile::TempDir) -> Manager {
        manager_with_flags(dir, TargetFlags::default())
    }

    #[tokio::test]
    async fn test_targeting_walks_the_hierarchy() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir);

        manager.target_garden("g1").unwrap();
        assert_eq!(
            manager.current_target().unwrap(),
            Target::Garden {
                garden: "g1".to_string()
            }
        );

        manager.target_project("g1", "p1").await.unwrap();
        assert_eq!(
            manager.current_target().unwrap(),
            Target::Project {
                garden: "g1".to_string(),
                project: "p1".to_string()
            }
        );

        manager.target_seed("g1", "s1").await.unwrap();
        assert_eq!(
            manager.current_target().unwrap(),
            Target::Seed {
                garden: "g1".to_string(),
                seed: "s1".to_string()
            }
        );

        manager.unset(TargetLevel::Garden).unwrap();
        assert_eq!(manager.current_target().unwrap(), Target::Unaddressed);
    }

    #[tokio::test]
    async fn test_garden_alias_is_canonicalized() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir);

        let target = manager.target_garden("one").unwrap();

        assert_eq!(target.garden_name(), Some("g1"));
    }

    #[tokio::test]
    async fn test_unknown_garden_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir);

        assert!(matches!(
            manager.target_garden("nope"),
            Err(ManagerError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_project_fails_and_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir);
        manager.target_garden("g1").unwrap();

        let result = manager.target_project("g1", "nope").await;

        assert!(matches!(result, Err(ManagerError::Validation(_))));
        assert_eq!(
            manager.current_target().unwrap(),
            Target::Garden {
                garden: "g1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_shoot_requires_an_anchor() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir);
        manager.target_garden("g1").unwrap();

        assert!(matches!(
            manager.target_shoot("sh1").await,
            Err(ManagerError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_shoot_attaches_to_the_current_project() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir);
        manager.target_garden("g1").unwrap();
        manager.target_project("g1", "p1").await.unwrap();

        let target = manager.target_shoot("sh1").await.unwrap();

        assert_eq!(
            target,
            Target::ProjectShoot {
                garden: "g1".to_string(),
                project: "p1".to_string(),
                shoot: "sh1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unset_project_clears_shoot() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir);
        manager.target_garden("g1").unwrap();
        manager.target_project("g1", "p1").await.unwrap();
        manager.target_shoot("sh1").await.unwrap();

        let target = manager.unset(TargetLevel::Project).unwrap();

        assert_eq!(
            target,
            Target::Garden {
                garden: "g1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unset_of_an_unset_level_fails() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir);
        manager.target_garden("g1").unwrap();

        assert!(matches!(
            manager.unset(TargetLevel::Shoot),
            Err(ManagerError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_flags_shape_the_current_target() {
        let dir = tempfile::tempdir().unwrap();
        {
            let manager = manager(&dir);
            manager.target_garden("g1").unwrap();
            manager.target_project("g1", "p1").await.unwrap();
        }

        let flagged = manager_with_flags(
            &dir,
            TargetFlags::new(Some("g2".to_string()), None, None, None),
        );

        // A different garden flag promotes: the deeper context is dropped.
        assert_eq!(
            flagged.current_target().unwrap(),
            Target::Garden {
                garden: "g2".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_without_target_flags_sees_persisted_state() {
        let dir = tempfile::tempdir().unwrap();
        {
            let manager = manager(&dir);
            manager.target_garden("g1").unwrap();
            manager.target_project("g1", "p1").await.unwrap();
        }

        let flagged = manager_with_flags(
            &dir,
            TargetFlags::new(Some("g2".to_string()), None, None, None),
        );
        let plain = flagged.without_target_flags();

        assert_eq!(
            plain.current_target().unwrap(),
            Target::Project {
                garden: "g1".to_string(),
                project: "p1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_flag_mutations_never_reach_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let flagged = manager_with_flags(
            &dir,
            TargetFlags::new(Some("g2".to_string()), None, None, None),
        );
        flagged.target_garden("g1").unwrap();

        let plain = flagged.without_target_flags();
        assert_eq!(
            plain.current_target().unwrap(),
            Target::Garden {
                garden: "g1".to_string()
            }
        );
    }
}
