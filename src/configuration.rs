//! Configuration management for the garden landscape CLI.
//!
//! The settings file lists the gardens an operator can target, each with an
//! optional alias list and the API endpoint used for name lookups. Settings
//! live in a dotfile directory under the user's home, overridable with the
//! `GLCLI_HOME` environment variable; the file basename is overridable with
//! `GLCLI_CONFIG_NAME`. The persisted target shares the same directory.

use crate::format::{Formattable, FormattingError, OutputFormat};
use serde::{Deserialize, Serialize};
use std::{fs, io::Write, path::PathBuf};
use tracing::debug;
use url::Url;

pub const DEFAULT_APPLICATION_ID: &str = "glcli";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yaml";
pub const TARGET_FILE_NAME: &str = "target.yaml";

pub const ENV_HOME_DIR: &str = "GLCLI_HOME";
pub const ENV_CONFIG_NAME: &str = "GLCLI_CONFIG_NAME";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration data, because of: {cause:?}")]
    FailedToLoadData { cause: Box<dyn std::error::Error> },
    #[error("failed to write configuration data to file, because of: {cause:?}")]
    FailedToWriteData { cause: Box<dyn std::error::Error> },
}

/// A single garden (management landscape) entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenConfiguration {
    pub name: String,
    /// Endpoint of the landscape API used to list projects, seeds and shoots
    #[serde(default, rename = "apiUrl", skip_serializing_if = "Option::is_none")]
    pub api_url: Option<Url>,
    /// Alternative names accepted wherever a garden can be named
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl GardenConfiguration {
    pub fn matches(&self, name_or_alias: &str) -> bool {
        self.name == name_or_alias || self.aliases.iter().any(|alias| alias == name_or_alias)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gardens: Vec<GardenConfiguration>,
}

impl Configuration {
    /// Resolve the directory holding the settings and target files.
    ///
    /// `GLCLI_HOME` takes precedence; the fallback is `.glcli` under the
    /// user's home directory.
    pub fn settings_directory() -> Result<PathBuf, ConfigurationError> {
        if let Ok(home) = std::env::var(ENV_HOME_DIR) {
            if !home.is_empty() {
                return Ok(PathBuf::from(home));
            }
        }

        match dirs::home_dir() {
            Some(mut home) => {
                home.push(format!(".{}", DEFAULT_APPLICATION_ID));
                Ok(home)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        let mut path = Self::settings_directory()?;
        let name = std::env::var(ENV_CONFIG_NAME)
            .ok()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIGURATION_FILE_NAME.to_string());
        path.push(name);
        Ok(path)
    }

    /// Path of the persisted target document, next to the settings file.
    pub fn target_file_path() -> Result<PathBuf, ConfigurationError> {
        let mut path = Self::settings_directory()?;
        path.push(TARGET_FILE_NAME);
        Ok(path)
    }

    /// Load the default settings file, falling back to an empty
    /// configuration when none exists. First invocations should not fail
    /// just because nothing was configured yet.
    pub fn load_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Self::get_default_configuration_file_path()?;
        debug!(
            "Loading configuration from {}...",
            default_file_path.display()
        );
        Self::load_or_default(default_file_path)
    }

    pub fn load_or_default(path: PathBuf) -> Result<Configuration, ConfigurationError> {
        if !path.exists() {
            debug!("No configuration file found, using empty configuration");
            return Ok(Configuration::default());
        }
        Self::load_from_file(path)
    }

    pub fn load_from_file(path: PathBuf) -> Result<Configuration, ConfigurationError> {
        match fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(configuration) => Ok(configuration),
                Err(cause) => Err(ConfigurationError::FailedToLoadData {
                    cause: Box::new(cause),
                }),
            },
            Err(cause) => Err(ConfigurationError::FailedToLoadData {
                cause: Box::new(cause),
            }),
        }
    }

    pub fn save(&self, path: &PathBuf) -> Result<(), ConfigurationError> {
        match path.parent() {
            Some(parent) => {
                if fs::create_dir_all(parent).is_err() {
                    return Err(ConfigurationError::FailedToFindConfigurationDirectory);
                }
            }
            None => return Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }

        match fs::File::create(path) {
            Ok(file) => {
                let writer: Box<dyn Write> = Box::new(file);
                self.write(writer)
            }
            Err(e) => Err(ConfigurationError::FailedToWriteData { cause: Box::new(e) }),
        }
    }

    pub fn write(&self, writer: Box<dyn Write>) -> Result<(), ConfigurationError> {
        match serde_yaml::to_writer(writer, self) {
            Ok(()) => Ok(()),
            Err(e) => Err(ConfigurationError::FailedToWriteData { cause: Box::new(e) }),
        }
    }

    /// Find the garden entry for a name or one of its aliases.
    pub fn garden(&self, name_or_alias: &str) -> Option<&GardenConfiguration> {
        self.gardens
            .iter()
            .find(|garden| garden.matches(name_or_alias))
    }

    /// Map an alias to its canonical garden name. Unknown values pass
    /// through unchanged so that validation happens in one place.
    pub fn canonical_garden_name(&self, name_or_alias: &str) -> String {
        match self.garden(name_or_alias) {
            Some(garden) => garden.name.clone(),
            None => name_or_alias.to_string(),
        }
    }

    pub fn garden_names(&self) -> Vec<String> {
        self.gardens
            .iter()
            .map(|garden| garden.name.clone())
            .collect()
    }
}

impl Formattable for Configuration {
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
            OutputFormat::Text => {
                if self.gardens.is_empty() {
                    return Ok(String::from("<no gardens configured>"));
                }

                let lines: Vec<String> = self
                    .gardens
                    .iter()
                    .map(|garden| {
                        if garden.aliases.is_empty() {
                            garden.name.clone()
                        } else {
                            format!("{} (aliases: {})", garden.name, garden.aliases.join(", "))
                        }
                    })
                    .collect();
                Ok(lines.join("\n"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration() -> Configuration {
        Configuration {
            gardens: vec![
                GardenConfiguration {
                    name: "prod".to_string(),
                    api_url: Some(Url::parse("https://prod.landscape.example.org/api").unwrap()),
                    aliases: vec!["production".to_string(), "p".to_string()],
                },
                GardenConfiguration {
                    name: "staging".to_string(),
                    api_url: None,
                    aliases: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_alias_resolves_to_canonical_name() {
        let configuration = configuration();

        assert_eq!(configuration.canonical_garden_name("production"), "prod");
        assert_eq!(configuration.canonical_garden_name("p"), "prod");
        assert_eq!(configuration.canonical_garden_name("prod"), "prod");
    }

    #[test]
    fn test_unknown_garden_passes_through() {
        assert_eq!(configuration().canonical_garden_name("unknown"), "unknown");
    }

    #[test]
    fn test_garden_lookup_by_alias() {
        let configuration = configuration();
        let garden = configuration.garden("production").unwrap();

        assert_eq!(garden.name, "prod");
    }

    #[test]
    fn test_garden_names_preserve_order() {
        assert_eq!(configuration().garden_names(), vec!["prod", "staging"]);
    }

    #[test]
    fn test_missing_file_yields_empty_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let configuration = Configuration::load_or_default(dir.path().join("config.yaml")).unwrap();

        assert!(configuration.gardens.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let configuration = configuration();

        configuration.save(&path).unwrap();
        let loaded = Configuration::load_from_file(path).unwrap();

        assert_eq!(loaded, configuration);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "gardens: [ {").unwrap();

        assert!(matches!(
            Configuration::load_from_file(path),
            Err(ConfigurationError::FailedToLoadData { .. })
        ));
    }
}
