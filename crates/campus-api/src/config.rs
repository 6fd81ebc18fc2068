//! Configuration types for the Campus API server.
//!
//! Configuration is read from `campus.json` (camelCase keys). Every field has
//! a default, so an empty object or a missing file is a valid configuration.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CampusError, Result};
use crate::seed::SeedData;
use crate::store::Store;

/// The default config file name.
const CONFIG_FILE_NAME: &str = "campus.json";

/// Default address to bind.
fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default port for the HTTP server.
const fn default_port() -> u16 {
    3000
}

/// Default prefix for resource routes.
fn default_api_prefix() -> String {
    "/api/v2".to_string()
}

/// Main configuration for the Campus API server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// IP address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind. `0` picks a free port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path prefix for the student and course routes.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Optional JSON file with initial students and courses.
    #[serde(default)]
    pub seed_file: Option<String>,

    /// Record served by the `/me` endpoint.
    #[serde(default)]
    pub identity: Identity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            seed_file: None,
            identity: Identity::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the current working directory.
    ///
    /// Looks for `campus.json` in the current directory. If not found,
    /// returns the default configuration.
    pub fn load() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            CampusError::config_parse(
                "<current directory>",
                format!("cannot determine current directory: {e}"),
            )
        })?;
        Self::load_from_dir(&current_dir)
    }

    /// Loads configuration from `campus.json` in a specific directory.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load_from_file(&dir.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from a specific file path.
    ///
    /// If the file does not exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns `CampusError::ConfigParseError` if the file exists but cannot
    /// be read or parsed, and `CampusError::ConfigValidationError` if the
    /// values are invalid.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(e) => {
                return Err(CampusError::config_parse(
                    path,
                    format!("failed to read file: {e}"),
                ));
            }
        };

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| CampusError::config_parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// - `host` must be an IP address
    /// - `apiPrefix` must start with `/` and, unless it is `/`, must not end with `/`
    /// - `seedFile`, when set, must not be empty
    /// - `identity.studentId` must not be empty
    pub fn validate(&self) -> Result<()> {
        if self.host.parse::<IpAddr>().is_err() {
            return Err(CampusError::config_validation(
                format!("host '{}' is not an IP address", self.host),
                "Use an address such as 127.0.0.1 or 0.0.0.0 in your campus.json",
            ));
        }

        if !self.api_prefix.starts_with('/') {
            return Err(CampusError::config_validation(
                "apiPrefix must start with '/'",
                "Set apiPrefix to a path such as /api/v2 in your campus.json",
            ));
        }

        if self.api_prefix.len() > 1 && self.api_prefix.ends_with('/') {
            return Err(CampusError::config_validation(
                "apiPrefix must not end with '/'",
                "Remove the trailing slash from apiPrefix in your campus.json",
            ));
        }

        if self
            .seed_file
            .as_deref()
            .is_some_and(|path| path.trim().is_empty())
        {
            return Err(CampusError::config_validation(
                "seedFile must not be empty",
                "Remove seedFile to use the built-in data, or point it at a JSON file",
            ));
        }

        if self.identity.student_id.trim().is_empty() {
            return Err(CampusError::config_validation(
                "identity.studentId must not be empty",
                "Provide identity.studentId in your campus.json",
            ));
        }

        Ok(())
    }

    /// The socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            CampusError::config_validation(
                format!("host '{}' is not an IP address", self.host),
                "Use an address such as 127.0.0.1 or 0.0.0.0",
            )
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Builds the initial store from `seedFile`, or the built-in data.
    pub fn initial_store(&self) -> Result<Store> {
        match self.seed_file.as_deref() {
            Some(path) => Store::from_seed(SeedData::load(Path::new(path))?),
            None => Ok(Store::builtin()),
        }
    }
}

/// Identity metadata served by `GET /me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Student id of the service owner.
    pub student_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Degree program code.
    pub program: String,
    /// Section code.
    pub section: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            student_id: "670610720".to_string(),
            first_name: "Phavit".to_string(),
            last_name: "Wongdao".to_string(),
            program: "CPE".to_string(),
            section: "001".to_string(),
        }
    }
}
