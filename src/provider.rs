//! Target persistence providers.
//!
//! Two providers share one capability: reading and writing the current
//! target. The filesystem provider is the durable store; the dynamic
//! provider decorates it with the command-line flag merge and is what
//! normal command execution runs against. Completion deliberately uses the
//! bare filesystem provider, so half-typed flags never promote away the
//! persisted context.

use crate::flags::TargetFlags;
use crate::target::{Target, TargetDocument, TargetError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The target file exists but could not be read or parsed
    #[error("failed to load target from {path:?}: {cause}")]
    Load {
        path: PathBuf,
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The target file could not be written or atomically replaced
    #[error("failed to store target to {path:?}: {cause}")]
    Store {
        path: PathBuf,
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The flag overrides could not be merged into a well-formed target
    #[error("failed to resolve target flags: {0}")]
    Merge(#[from] TargetError),
}

/// Read/write capability over the current target.
pub trait TargetProvider {
    fn read(&self) -> Result<Target, ProviderError>;
    fn write(&self, target: &Target) -> Result<(), ProviderError>;
}

/// Durable provider backed by a YAML document on disk.
#[derive(Debug, Clone)]
pub struct FilesystemTargetProvider {
    path: PathBuf,
}

impl FilesystemTargetProvider {
    pub fn new(path: PathBuf) -> Self {
        FilesystemTargetProvider { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TargetProvider for FilesystemTargetProvider {
    /// Load the persisted target. A missing file is not an error: it simply
    /// means nothing has been targeted yet.
    fn read(&self) -> Result<Target, ProviderError> {
        if !self.path.exists() {
            debug!("No target file at {}, nothing targeted", self.path.display());
            return Ok(Target::Unaddressed);
        }

        let content = fs::read_to_string(&self.path).map_err(|cause| ProviderError::Load {
            path: self.path.clone(),
            cause: Box::new(cause),
        })?;

        let document: TargetDocument =
            serde_yaml::from_str(&content).map_err(|cause| ProviderError::Load {
                path: self.path.clone(),
                cause: Box::new(cause),
            })?;

        Target::try_from(document).map_err(|cause| ProviderError::Load {
            path: self.path.clone(),
            cause: Box::new(cause),
        })
    }

    /// Persist the target atomically.
    ///
    /// The document is written to a temporary file in the target directory
    /// and renamed over the destination, so a crash mid-write leaves either
    /// the old or the new complete state on disk, never a truncated one.
    fn write(&self, target: &Target) -> Result<(), ProviderError> {
        let store_error = |cause: Box<dyn std::error::Error + Send + Sync>| ProviderError::Store {
            path: self.path.clone(),
            cause,
        };

        let directory = match self.path.parent() {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| store_error(Box::new(e)))?;
                parent
            }
            None => Path::new("."),
        };

        let file = NamedTempFile::new_in(directory).map_err(|e| store_error(Box::new(e)))?;
        serde_yaml::to_writer(file.as_file(), &TargetDocument::from(target))
            .map_err(|e| store_error(Box::new(e)))?;
        file.persist(&self.path)
            .map_err(|e| store_error(Box::new(e)))?;

        debug!("Persisted target: {}", target);
        Ok(())
    }
}

/// Provider used for normal command execution: reads merge the transient
/// flag overrides into the persisted target, writes pass through unchanged
/// (flags are never persisted).
pub struct DynamicTargetProvider {
    filesystem: FilesystemTargetProvider,
    flags: TargetFlags,
}

impl DynamicTargetProvider {
    pub fn new(filesystem: FilesystemTargetProvider, flags: TargetFlags) -> Self {
        DynamicTargetProvider { filesystem, flags }
    }
}

impl TargetProvider for DynamicTargetProvider {
    fn read(&self) -> Result<Target, ProviderError> {
        let persisted = self.filesystem.read()?;
        Ok(self.flags.merge(&persisted)?)
    }

    fn write(&self, target: &Target) -> Result<(), ProviderError> {
        self.filesystem.write(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(dir: &tempfile::TempDir) -> FilesystemTargetProvider {
        FilesystemTargetProvider::new(dir.path().join("target.yaml"))
    }

    fn project_target() -> Target {
        Target::Project {
            garden: "prod".to_string(),
            project: "core".to_string(),
        }
    }

    #[test]
    fn test_missing_file_reads_as_unaddressed() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(provider(&dir).read().unwrap(), Target::Unaddressed);
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir);

        provider.write(&project_target()).unwrap();

        assert_eq!(provider.read().unwrap(), project_target());
    }

    #[test]
    fn test_write_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FilesystemTargetProvider::new(dir.path().join("nested").join("target.yaml"));

        provider.write(&project_target()).unwrap();

        assert_eq!(provider.read().unwrap(), project_target());
    }

    #[test]
    fn test_interrupted_write_leaves_prior_state_readable() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir);
        provider.write(&project_target()).unwrap();

        // A crash between temp-file creation and rename leaves a stray file
        // next to the target document. Readers must still see the complete
        // prior state.
        fs::write(dir.path().join(".tmpabc123"), "garden: [truncated").unwrap();

        assert_eq!(provider.read().unwrap(), project_target());
    }

    #[test]
    fn test_corrupt_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir);
        fs::write(provider.path(), "garden: [truncated").unwrap();

        assert!(matches!(
            provider.read(),
            Err(ProviderError::Load { .. })
        ));
    }

    #[test]
    fn test_invariant_violating_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir);
        fs::write(provider.path(), "garden: prod\nproject: core\nseed: aws-eu1\n").unwrap();

        assert!(matches!(
            provider.read(),
            Err(ProviderError::Load { .. })
        ));
    }

    #[test]
    fn test_dynamic_read_applies_flags() {
        let dir = tempfile::tempdir().unwrap();
        let filesystem = provider(&dir);
        filesystem.write(&project_target()).unwrap();

        let flags = TargetFlags::new(None, Some("billing".to_string()), None, None);
        let dynamic = DynamicTargetProvider::new(filesystem, flags);

        assert_eq!(
            dynamic.read().unwrap(),
            Target::Project {
                garden: "prod".to_string(),
                project: "billing".to_string()
            }
        );
    }

    #[test]
    fn test_dynamic_write_does_not_persist_flags() {
        let dir = tempfile::tempdir().unwrap();
        let filesystem = provider(&dir);
        let flags = TargetFlags::new(None, None, None, Some("api-cluster".to_string()));
        let dynamic = DynamicTargetProvider::new(filesystem.clone(), flags);

        dynamic
            .write(&Target::Garden {
                garden: "prod".to_string(),
            })
            .unwrap();

        // The durable state holds exactly what was written, no flag overlay.
        assert_eq!(
            filesystem.read().unwrap(),
            Target::Garden {
                garden: "prod".to_string()
            }
        );
    }

    #[test]
    fn test_unanchorable_flags_are_a_merge_error() {
        let dir = tempfile::tempdir().unwrap();
        let flags = TargetFlags::new(None, Some("billing".to_string()), None, None);
        let dynamic = DynamicTargetProvider::new(provider(&dir), flags);

        assert!(matches!(dynamic.read(), Err(ProviderError::Merge(_))));
    }
}
