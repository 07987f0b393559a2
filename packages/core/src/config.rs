use std::env;

use crate::cli::Cli;
use crate::services::carbon_intensity::DEFAULT_BASE_URL;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub api_base_url: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Defaults, overridden by `PORT`, `CARBON_INTENSITY_URL` and `LOG_LEVEL`
    /// when set.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| format!("PORT must be a valid port number, got {:?}", port))?;
        }

        if let Some(url) = lookup("CARBON_INTENSITY_URL") {
            config.api_base_url = non_empty("CARBON_INTENSITY_URL", url)?;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = non_empty("LOG_LEVEL", level)?;
        }

        Ok(config)
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_cli(mut self, cli: &Cli) -> Result<Self, String> {
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(url) = &cli.api_url {
            self.api_base_url = non_empty("--api-url", url.clone())?;
        }
        if let Some(level) = &cli.log_level {
            self.log_level = non_empty("--log-level", level.clone())?;
        }
        Ok(self)
    }
}

fn non_empty(name: &str, value: String) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{} must not be empty", name));
    }
    Ok(trimmed.to_string())
}
