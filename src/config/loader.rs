// file: src/config/loader.rs
// version: 2.0.0
// guid: d4e5f6g7-h8i9-0123-4567-890123defghi

//! Configuration file loading and environment variable substitution

use super::ClientConfig;
use crate::error::FilterError;
use crate::Result;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Command line values that take precedence over files and environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub server: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
    env_vars: HashMap<String, String>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            env_vars: std::env::vars().collect(),
        }
    }

    /// Create a loader that sees only the given variables
    pub fn with_env(env_vars: HashMap<String, String>) -> Self {
        Self { env_vars }
    }

    /// Resolve the full client configuration.
    ///
    /// An explicit path must exist. Without one, the user config file is used
    /// when present, otherwise defaults. Environment overrides are applied next,
    /// then command line overrides, and the result is validated.
    pub fn load(
        &self,
        explicit: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<ClientConfig> {
        let mut config = match explicit {
            Some(path) => self.load_file(path)?,
            None => match Self::user_config_path().filter(|p| p.exists()) {
                Some(path) => self.load_file(&path)?,
                None => {
                    debug!("No configuration file found, using defaults");
                    ClientConfig::default()
                }
            },
        };

        self.apply_env_overrides(&mut config)?;
        Self::apply_overrides(&mut config, overrides);

        config.validate()?;
        Ok(config)
    }

    /// Get the user configuration file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("katello-filter").join("config.toml"))
    }

    /// Load configuration from a TOML or YAML file
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<ClientConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| {
            FilterError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let expanded = self.expand_env_vars(&content)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&expanded)?,
            _ => toml::from_str(&expanded)?,
        };

        Ok(config)
    }

    /// Expand environment variables in configuration content
    fn expand_env_vars(&self, content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| FilterError::config(format!("Invalid regex pattern: {}", e)))?;

        let mut result = content.to_string();
        let mut missing_vars = Vec::new();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];

            if let Some(value) = self.env_vars.get(var_name) {
                result = result.replace(placeholder, value);
            } else if !missing_vars.iter().any(|v| v == var_name) {
                missing_vars.push(var_name.to_string());
            }
        }

        if !missing_vars.is_empty() {
            return Err(FilterError::config(format!(
                "Missing environment variables: {}",
                missing_vars.join(", ")
            )));
        }

        Ok(result)
    }

    /// Apply KATELLO_* environment variable overrides
    fn apply_env_overrides(&self, config: &mut ClientConfig) -> Result<()> {
        if let Some(url) = self.env_vars.get("KATELLO_URL") {
            config.server.url = url.clone();
        }

        if let Some(username) = self.env_vars.get("KATELLO_USERNAME") {
            config.server.username = Some(username.clone());
        }

        if let Some(password) = self.env_vars.get("KATELLO_PASSWORD") {
            config.server.password = Some(password.clone());
        }

        if let Some(timeout) = self.env_vars.get("KATELLO_TIMEOUT") {
            config.server.timeout_seconds = timeout.parse().map_err(|_| {
                FilterError::config(format!("KATELLO_TIMEOUT is not a number: {}", timeout))
            })?;
        }

        Ok(())
    }

    fn apply_overrides(config: &mut ClientConfig, overrides: &ConfigOverrides) {
        if let Some(server) = &overrides.server {
            config.server.url = server.clone();
        }
        if let Some(username) = &overrides.username {
            config.server.username = Some(username.clone());
        }
        if let Some(password) = &overrides.password {
            config.server.password = Some(password.clone());
        }
    }

    /// Set environment variable for substitution
    pub fn set_env_var(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
