//! Landscape API client.
//!
//! Production implementation of the [`NameLookup`](crate::lookup::NameLookup)
//! seam. Each garden entry in the configuration carries the base URL of its
//! landscape API; this client lists projects, seeds and shoots under it.

use crate::configuration::Configuration;
use crate::lookup::{LookupError, NameLookup};
use crate::target::Target;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct NameListResponse {
    names: Vec<String>,
}

pub struct LandscapeApiClient {
    configuration: Configuration,
    client: reqwest::Client,
}

impl LandscapeApiClient {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            client: reqwest::Client::new(),
        }
    }

    fn base_url(&self, garden: &str) -> Result<Url, LookupError> {
        let entry = self.configuration.garden(garden).ok_or_else(|| {
            LookupError::NotFound(format!("garden '{}' is not configured", garden))
        })?;

        entry.api_url.clone().ok_or_else(|| {
            LookupError::Unreachable(format!(
                "garden '{}' has no API endpoint configured",
                garden
            ))
        })
    }

    async fn fetch_names(&self, garden: &str, resource: &str) -> Result<Vec<String>, LookupError> {
        let base = self.base_url(garden)?;
        let url = format!("{}/{}", base.as_str().trim_end_matches('/'), resource);
        debug!("Listing {} for garden {}", resource, garden);

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(format!(
                "{} not found in garden '{}'",
                resource, garden
            )));
        }

        if !response.status().is_success() {
            return Err(LookupError::Unreachable(format!(
                "landscape API returned status {} for {}",
                response.status(),
                url
            )));
        }

        let names: NameListResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Unreachable(e.to_string()))?;

        Ok(names.names)
    }
}

fn map_transport_error(error: reqwest::Error) -> LookupError {
    if error.is_timeout() {
        LookupError::Cancelled(error.to_string())
    } else {
        LookupError::Unreachable(error.to_string())
    }
}

#[async_trait]
impl NameLookup for LandscapeApiClient {
    async fn project_names(&self, garden: &str) -> Result<Vec<String>, LookupError> {
        self.fetch_names(garden, "projects").await
    }

    async fn seed_names(&self, garden: &str) -> Result<Vec<String>, LookupError> {
        self.fetch_names(garden, "seeds").await
    }

    async fn shoot_names(&self, target: &Target) -> Result<Vec<String>, LookupError> {
        let garden = target
            .garden_name()
            .ok_or_else(|| LookupError::NotFound(String::from("no garden targeted")))?;

        // Scope to the project or seed when one is addressed; otherwise list
        // shoots across the whole landscape.
        let resource = if let Some(project) = target.project_name() {
            format!("projects/{}/shoots", project)
        } else if let Some(seed) = target.seed_name() {
            format!("seeds/{}/shoots", seed)
        } else {
            String::from("shoots")
        };

        self.fetch_names(garden, &resource).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::GardenConfiguration;

    fn client() -> LandscapeApiClient {
        LandscapeApiClient::new(Configuration {
            gardens: vec![GardenConfiguration {
                name: "prod".to_string(),
                api_url: None,
                aliases: vec![],
            }],
        })
    }

    #[tokio::test]
    async fn test_unknown_garden_is_not_found() {
        let result = client().project_names("unknown").await;
        assert!(matches!(result, Err(LookupError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_garden_without_endpoint_is_unreachable() {
        let result = client().project_names("prod").await;
        assert!(matches!(result, Err(LookupError::Unreachable(_))));
    }

    #[tokio::test]
    async fn test_shoots_require_a_garden() {
        let result = client().shoot_names(&Target::Unaddressed).await;
        assert!(matches!(result, Err(LookupError::NotFound(_))));
    }
}
