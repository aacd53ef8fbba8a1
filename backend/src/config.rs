//! Runtime configuration read from environment variables.
//!
//! | variable                              | default                            |
//! |---------------------------------------|------------------------------------|
//! | `FLASHCARDS_HOST`                     | `127.0.0.1`                        |
//! | `FLASHCARDS_PORT`                     | `8080`                             |
//! | `FLASHCARDS_GENERATOR_URL`            | `http://localhost:6969/upload-pdf` |
//! | `FLASHCARDS_GENERATOR_TIMEOUT_SECS`   | `150`                              |
//! | `FLASHCARDS_MAX_UPLOAD_MB`            | `25`                               |
//! | `FLASHCARDS_OPEN_BROWSER`             | `true`                             |

use std::env;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_GENERATOR_URL: &str = "http://localhost:6969/upload-pdf";
const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 150;
const DEFAULT_MAX_UPLOAD_MB: usize = 25;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got `{value}`")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Endpoint of the external service that turns a PDF into flashcards.
    pub generator_url: String,
    pub generator_timeout: Duration,
    pub max_upload_bytes: usize,
    pub open_browser: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    /// Unset and blank variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let var = |name| lookup(name).filter(|value: &String| !value.trim().is_empty());

        let port = match var("FLASHCARDS_PORT") {
            Some(value) => parse("FLASHCARDS_PORT", "a port number", &value)?,
            None => DEFAULT_PORT,
        };
        let timeout_secs: u64 = match var("FLASHCARDS_GENERATOR_TIMEOUT_SECS") {
            Some(value) => parse(
                "FLASHCARDS_GENERATOR_TIMEOUT_SECS",
                "a whole number of seconds",
                &value,
            )?,
            None => DEFAULT_GENERATOR_TIMEOUT_SECS,
        };
        let max_upload_mb: usize = match var("FLASHCARDS_MAX_UPLOAD_MB") {
            Some(value) => parse(
                "FLASHCARDS_MAX_UPLOAD_MB",
                "a whole number of megabytes",
                &value,
            )?,
            None => DEFAULT_MAX_UPLOAD_MB,
        };
        let open_browser = match var("FLASHCARDS_OPEN_BROWSER") {
            Some(value) => parse_flag("FLASHCARDS_OPEN_BROWSER", &value)?,
            None => true,
        };

        Ok(Self {
            host: var("FLASHCARDS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            generator_url: var("FLASHCARDS_GENERATOR_URL")
                .unwrap_or_else(|| DEFAULT_GENERATOR_URL.to_string()),
            generator_timeout: Duration::from_secs(timeout_secs),
            max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
            open_browser,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
    value: &str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        expected,
        value: value.to_string(),
    })
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            expected: "true or false",
            value: value.to_string(),
        }),
    }
}
