//! Runtime configuration read from the environment (and `.env`, if present).

use serde::Serialize;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

use crate::brain::HARD_NEGATIVE_OVERRIDE_THRESHOLD;
use crate::error::AppError;
use crate::scanner::SAFETY_SCAN_INTERVAL;

pub const ENV_SAFETY_SCAN_MS: &str = "FOCUSTUBE_SAFETY_SCAN_MS";
pub const ENV_OVERRIDE_THRESHOLD: &str = "FOCUSTUBE_OVERRIDE_THRESHOLD";
pub const ENV_MODE_FILE: &str = "FOCUSTUBE_MODE_FILE";
pub const ENV_LOG_FORMAT: &str = "FOCUSTUBE_LOG_FORMAT";

const DEFAULT_MODE_FILE: &str = "data/mode.json";

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Pretty,
    Json,
    Bunyan,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "bunyan" => Ok(LogFormat::Bunyan),
            other => Err(AppError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Bunyan => "bunyan",
        };
        write!(f, "{}", label)
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct AppConfig {
    /// Safety sweep period in milliseconds.
    #[validate(range(min = 1, max = 60000))]
    pub safety_scan_ms: u64,
    /// Positive matches needed to override a hard negative.
    #[validate(range(min = 1, max = 16))]
    pub override_threshold: usize,
    /// Settings file holding the productive-mode flag.
    pub mode_file: PathBuf,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            safety_scan_ms: SAFETY_SCAN_INTERVAL.as_millis() as u64,
            override_threshold: HARD_NEGATIVE_OVERRIDE_THRESHOLD,
            mode_file: PathBuf::from(DEFAULT_MODE_FILE),
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if any), then reads and validates the configuration.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_process_env()
    }

    /// Reads the configuration from the current process environment only.
    pub fn from_process_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let config = Self {
            safety_scan_ms: parse_var(ENV_SAFETY_SCAN_MS, defaults.safety_scan_ms)?,
            override_threshold: parse_var(ENV_OVERRIDE_THRESHOLD, defaults.override_threshold)?,
            mode_file: env::var(ENV_MODE_FILE)
                .map(PathBuf::from)
                .unwrap_or(defaults.mode_file),
            log_format: match env::var(ENV_LOG_FORMAT) {
                Ok(raw) => raw.parse()?,
                Err(_) => defaults.log_format,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn safety_interval(&self) -> Duration {
        Duration::from_millis(self.safety_scan_ms)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} is invalid ({:?}): {}", name, raw, e))),
        Err(_) => Ok(default),
    }
}
