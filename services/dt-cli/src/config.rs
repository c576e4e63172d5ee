//! Configuration types for the dt command-line tool

use std::fmt;
use std::path::Path;

use dt_api::Credentials;
use dt_gp::HyperParameters;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub devices: DevicesConfig,
    #[serde(default)]
    pub events: EventsConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
}

/// Service account key used for Basic Auth
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Defaults for `dt devices`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DevicesConfig {
    #[serde(default)]
    pub types: Vec<String>,
}

/// Defaults for `dt events`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsConfig {
    #[serde(default)]
    pub event_types: Vec<String>,
}

/// Settings for `dt forecast`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_forecast_points")]
    pub points: usize,
    #[serde(default = "default_noise")]
    pub noise: f64,
    #[serde(default)]
    pub hyper_parameters: HyperParameters,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            points: default_forecast_points(),
            noise: default_noise(),
            hyper_parameters: HyperParameters::default(),
        }
    }
}

fn default_forecast_points() -> usize {
    50
}

fn default_noise() -> f64 {
    0.1
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::CliError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}

/// Merge command-line credentials over the config file.
///
/// A missing password is requested through `prompt`, which receives the prompt
/// text. A missing username is an error.
pub fn resolve_credentials<F>(
    config: &CredentialsConfig,
    username: Option<String>,
    password: Option<String>,
    prompt: F,
) -> crate::Result<Credentials>
where
    F: FnOnce(&str) -> std::io::Result<String>,
{
    let username = username.or_else(|| config.username.clone()).ok_or_else(|| {
        crate::CliError::Config(
            "No username given; pass --username or set credentials.username".to_string(),
        )
    })?;

    let password = match password.or_else(|| config.password.clone()) {
        Some(password) => password,
        None => {
            tracing::debug!("No password configured for {}, prompting", username);
            prompt(&format!("Password for {}: ", username))?
        }
    };

    Ok(Credentials::new(username, password))
}
