use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{EnrichableExt, IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// Name of the configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "npm-health.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the npm registry metadata API
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Base URL of the npm downloads API
    #[serde(default = "default_downloads_url")]
    pub downloads_url: String,

    /// Base URL of the human-facing package pages; the package name is appended
    #[serde(default = "default_package_page_url")]
    pub package_page_url: String,

    /// Base URL of the GitHub REST API
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_registry_url() -> String {
    "https://registry.npmjs.org".to_string()
}

fn default_downloads_url() -> String {
    "https://api.npmjs.org".to_string()
}

fn default_package_page_url() -> String {
    "https://www.npmjs.com/package".to_string()
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    "npm-health".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// An explicit `config_path` must exist. Otherwise `npm-health.toml` is looked up
    /// under `base_dir`, and its absence simply means defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading npm-health configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("no '{path}' found, using default configuration");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading npm-health configuration file '{path}'")),
            }
        };

        let config = Self::parse(&text).map_err(|e| e.enrich_with(|| format!("loading configuration file '{final_path}'")))?;
        log::debug!("loaded configuration from '{final_path}'");

        Ok(config)
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this configuration or holds invalid values
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).into_app_err("parsing configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Timeout applied to each outbound request
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(app_err!("request_timeout_secs must be greater than zero"));
        }

        for (field, value) in [
            ("registry_url", &self.registry_url),
            ("downloads_url", &self.downloads_url),
            ("package_page_url", &self.package_page_url),
            ("github_api_url", &self.github_api_url),
        ] {
            let _ = url::Url::parse(value).into_app_err_with(|| format!("{field} is not a valid URL: '{value}'"))?;
        }

        if self.user_agent.trim().is_empty() {
            return Err(app_err!("user_agent must not be empty"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_url: default_registry_url(),
            downloads_url: default_downloads_url(),
            package_page_url: default_package_page_url(),
            github_api_url: default_github_api_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
