use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::{env, path::PathBuf};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATA_PATH: &str = "data/followups.json";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid FOLLOWUP_TZ {value:?}: {reason}")]
    TimeZone { value: String, reason: String },

    #[error("invalid APP_FIXED_NOW {value:?}: {reason}")]
    FixedNow { value: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub time_zone: Tz,
    /// Pins the server clock when set.
    pub fixed_now: Option<DateTime<Utc>>,
    /// `RUST_LOG` as given, used whole as the tracing filter.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            time_zone: Tz::UTC,
            fixed_now: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let data_path = lookup("APP_DATA_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let time_zone = match lookup("FOLLOWUP_TZ") {
            Some(value) if !value.trim().is_empty() => {
                value
                    .trim()
                    .parse::<Tz>()
                    .map_err(|reason| ConfigError::TimeZone {
                        value: value.clone(),
                        reason: reason.to_string(),
                    })?
            }
            _ => defaults.time_zone,
        };

        let fixed_now = match lookup("APP_FIXED_NOW") {
            Some(value) if !value.trim().is_empty() => Some(
                DateTime::parse_from_rfc3339(value.trim())
                    .map_err(|reason| ConfigError::FixedNow {
                        value: value.clone(),
                        reason: reason.to_string(),
                    })?
                    .with_timezone(&Utc),
            ),
            _ => None,
        };

        let log_filter = lookup("RUST_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(Self {
            port,
            data_path,
            time_zone,
            fixed_now,
            log_filter,
        })
    }
}
