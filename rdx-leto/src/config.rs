//! Defines the configuration structures for Leto tools.
//!
//! These structs are deserialized with `serde` from an optional TOML file
//! layered under `LETO_*` environment variables, so the calendar a tool
//! works with can be chosen without recompiling.

use crate::calendar::Calendar;
use crate::calendars;
use crate::definition;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The top-level configuration shared by `letodev` and `letoshell`.
#[derive(Debug, Clone, Deserialize)]
pub struct LetoConfig {
    /// Which calendar definition to load.
    #[serde(default)]
    pub calendar: CalendarChoice,

    /// Default log filter, used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Selects a built-in calendar or a TOML definition on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarChoice {
    /// The proleptic Gregorian calendar.
    #[default]
    Gregorian,
    /// The Julian calendar.
    Julian,
    /// The Old Bulgarian calendar.
    Bulgarian,
    /// Twelve 30-day months.
    Uniform,
    /// A calendar definition file.
    Custom { path: PathBuf },
}

// --- Default value functions for serde ---

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LetoConfig {
    fn default() -> Self {
        Self {
            calendar: CalendarChoice::default(),
            log_level: default_log_level(),
        }
    }
}

impl LetoConfig {
    /// Loads the configuration from `path` (if given) and the environment.
    ///
    /// Environment variables use the `LETO_` prefix, e.g.
    /// `LETO_CALENDAR=julian`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let config = builder
            .add_source(Environment::with_prefix("LETO"))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Builds the configured calendar.
    pub fn calendar(&self) -> anyhow::Result<Calendar> {
        let calendar = match &self.calendar {
            CalendarChoice::Gregorian => calendars::gregorian()?,
            CalendarChoice::Julian => calendars::julian()?,
            CalendarChoice::Bulgarian => calendars::bulgarian()?,
            CalendarChoice::Uniform => calendars::uniform()?,
            CalendarChoice::Custom { path } => definition::load_calendar(path)?,
        };
        Ok(calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(text: &str) -> LetoConfig {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_apply_to_empty_file() {
        let config = from_toml("");
        assert_eq!(config.calendar, CalendarChoice::Gregorian);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn built_in_calendar_by_name() {
        let config = from_toml("calendar = \"julian\"\nlog_level = \"debug\"");
        assert_eq!(config.calendar, CalendarChoice::Julian);
        assert_eq!(config.calendar().unwrap().name(), "julian");
    }

    #[test]
    fn bulgarian_calendar_by_name() {
        let config = from_toml("calendar = \"bulgarian\"");
        assert_eq!(config.calendar, CalendarChoice::Bulgarian);
        assert_eq!(config.calendar().unwrap().name(), "bulgarian");
    }

    #[test]
    fn custom_calendar_path() {
        let config = from_toml("[calendar.custom]\npath = \"calendars/weeks.toml\"");
        assert_eq!(
            config.calendar,
            CalendarChoice::Custom {
                path: PathBuf::from("calendars/weeks.toml")
            }
        );
    }
}
