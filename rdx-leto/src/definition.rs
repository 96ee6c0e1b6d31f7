//! Declarative calendar definitions loaded from TOML.
//!
//! A definition lists period types smallest first and then the structures,
//! each of which may only name structures defined above it:
//!
//! ```toml
//! name = "uniform"
//! epoch_offset_days = 0
//! period_types = ["day", "month", "year"]
//!
//! [[structures]]
//! name = "day"
//! period_type = "day"
//! length_in_days = 1
//!
//! [[structures]]
//! name = "month"
//! period_type = "month"
//! length_in_days = 30
//! sub_periods = [{ structure = "day", repeat = 30 }]
//! ```

use crate::calendar::{Calendar, CalendarBuilder};
use crate::common::StructureId;
use crate::error::DefinitionError;
use config::{Config, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// The serialized form of a calendar.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarDefinition {
    pub name: String,

    /// Days between the calendar's epoch and the Unix epoch.
    #[serde(default)]
    pub epoch_offset_days: i64,

    /// Period type names, smallest first.
    pub period_types: Vec<String>,

    #[serde(default)]
    pub structures: Vec<StructureDefinition>,
}

/// One structure of a `CalendarDefinition`.
#[derive(Debug, Clone, Deserialize)]
pub struct StructureDefinition {
    pub name: String,
    pub period_type: String,
    pub length_in_days: u64,
    #[serde(default)]
    pub sub_periods: Vec<SubPeriodDefinition>,
}

/// A run of identical sub-periods inside a structure.
#[derive(Debug, Clone, Deserialize)]
pub struct SubPeriodDefinition {
    pub structure: String,
    #[serde(default = "default_repeat")]
    pub repeat: usize,
}

// --- Default value functions for serde ---

fn default_repeat() -> usize {
    1
}

impl CalendarDefinition {
    /// Parses a definition from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Reads a definition from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Builds and validates the calendar this definition describes.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] if a name cannot be resolved or the
    /// resulting calendar fails its correctness checks.
    pub fn to_calendar(&self) -> Result<Calendar, DefinitionError> {
        let mut builder = CalendarBuilder::new(&self.name, self.epoch_offset_days);
        let types: HashMap<&str, _> = self
            .period_types
            .iter()
            .map(|name| (name.as_str(), builder.period_type(name)))
            .collect();

        let mut structures: HashMap<&str, StructureId> = HashMap::new();
        for definition in &self.structures {
            let period_type = *types.get(definition.period_type.as_str()).ok_or_else(|| {
                DefinitionError::UnknownPeriodType {
                    name: definition.period_type.clone(),
                }
            })?;
            let mut sub_periods = Vec::new();
            for run in &definition.sub_periods {
                let id = *structures.get(run.structure.as_str()).ok_or_else(|| {
                    DefinitionError::UnknownStructure {
                        name: run.structure.clone(),
                    }
                })?;
                sub_periods.extend(std::iter::repeat(id).take(run.repeat));
            }
            let id = builder.structure(
                &definition.name,
                period_type,
                definition.length_in_days,
                &sub_periods,
            )?;
            structures.insert(definition.name.as_str(), id);
        }

        let calendar = builder.build()?;
        info!(
            "Loaded calendar \"{}\" ({} period types).",
            calendar.name(),
            calendar.period_types().len()
        );
        Ok(calendar)
    }
}

/// Loads and validates a calendar from a TOML file.
pub fn load_calendar(path: &Path) -> anyhow::Result<Calendar> {
    let definition = CalendarDefinition::from_path(path)?;
    Ok(definition.to_calendar()?)
}
