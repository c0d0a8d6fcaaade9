//! Name lookup seam for the landscape API.
//!
//! Mutation-time validation and shell completion both need the valid names
//! at the next hierarchy level. The trait keeps the core independent of the
//! concrete API client, so tests can substitute an in-memory double.

use crate::target::Target;
use async_trait::async_trait;
use thiserror::Error;

/// Error emitted by a name lookup service
#[derive(Debug, Error)]
pub enum LookupError {
    /// The service could not be reached or refused access
    #[error("lookup failed: {0}")]
    Unreachable(String),
    /// The addressed garden, project or seed does not exist
    #[error("not found: {0}")]
    NotFound(String),
    /// The call context was cancelled before the lookup finished
    #[error("lookup cancelled: {0}")]
    Cancelled(String),
}

/// Lists valid names at the next hierarchy level for a partially specified
/// target. Implementations must preserve their source ordering; callers do
/// not re-sort.
#[async_trait]
pub trait NameLookup: Send + Sync {
    async fn project_names(&self, garden: &str) -> Result<Vec<String>, LookupError>;

    async fn seed_names(&self, garden: &str) -> Result<Vec<String>, LookupError>;

    /// Shoot names scoped to the target's project or seed. Must be safe to
    /// call with only a garden, in which case shoots across the whole
    /// landscape are listed.
    async fn shoot_names(&self, target: &Target) -> Result<Vec<String>, LookupError>;
}
