//! The value objects produced by decomposition and consumed by recomposition.

use crate::calendar::{Calendar, PeriodStructure, PeriodType};
use crate::common::{PeriodTypeId, StructureId};
use crate::error::DefinitionError;
use std::fmt;

/// The position of a day within one level of a calendar hierarchy.
///
/// A `Period` borrows its period type and structure from the `Calendar` it
/// was computed against and is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period<'c> {
    period_type: &'c PeriodType,
    number: u64,
    absolute_number: u64,
    name: String,
    start_at_days_after_epoch: Option<u64>,
    structure: Option<&'c PeriodStructure>,
}

impl<'c> Period<'c> {
    pub(crate) fn new(
        period_type: &'c PeriodType,
        number: u64,
        absolute_number: u64,
        start_at_days_after_epoch: Option<u64>,
        structure: Option<&'c PeriodStructure>,
    ) -> Self {
        Self {
            period_type,
            number,
            absolute_number,
            name: number.to_string(),
            start_at_days_after_epoch,
            structure,
        }
    }

    /// Builds a period purely as input for [`crate::engine::recompose`],
    /// e.g. "3 years" with the length of one concrete year structure.
    ///
    /// The absolute number is set to `number` and no start offset is known.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] if the type or structure does not belong
    /// to `calendar`, or if the structure is not one of the type's.
    pub fn synthetic(
        calendar: &'c Calendar,
        period_type: PeriodTypeId,
        structure: StructureId,
        number: u64,
    ) -> Result<Self, DefinitionError> {
        let owner =
            calendar
                .period_type(period_type)
                .ok_or_else(|| DefinitionError::UnknownPeriodType {
                    name: format!("#{}", period_type.index()),
                })?;
        let structure =
            calendar
                .structure(structure)
                .ok_or_else(|| DefinitionError::UnknownStructure {
                    name: format!("{structure:?}"),
                })?;
        if structure.period_type() != period_type {
            return Err(DefinitionError::StructureTypeMismatch {
                period_type: owner.name().to_string(),
                structure: structure.name().to_string(),
                found: calendar.type_name(structure.period_type()),
            });
        }
        Ok(Self::new(owner, number, number, None, Some(structure)))
    }

    /// Replaces the display name, which defaults to the decimal `number`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn period_type(&self) -> &'c PeriodType {
        self.period_type
    }

    /// Zero-based count of this period within its immediate parent.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Count of this period type's units elapsed since the calendar epoch.
    pub fn absolute_number(&self) -> u64 {
        self.absolute_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The day, counted from the calendar epoch, on which this period began.
    pub fn start_at_days_after_epoch(&self) -> Option<u64> {
        self.start_at_days_after_epoch
    }

    /// The concrete structure this period instance has.
    pub fn structure(&self) -> Option<&'c PeriodStructure> {
        self.structure
    }
}

impl fmt::Display for Period<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.period_type.name(), self.name)
    }
}
