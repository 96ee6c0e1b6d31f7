//! Built-in calendar definitions.
//!
//! Each calendar is plain data assembled with a `CalendarBuilder`; the
//! engine treats all of them the same way.

mod bulgarian;
mod gregorian;
mod julian;
mod uniform;

pub use bulgarian::{bulgarian, BULGARIAN_EPOCH_OFFSET_DAYS};
pub use gregorian::{gregorian, GREGORIAN_EPOCH_OFFSET_DAYS};
pub use julian::{julian, JULIAN_EPOCH_OFFSET_DAYS};
pub use uniform::uniform;

use crate::calendar::{repeat, Calendar, CalendarBuilder};
use crate::common::{PeriodTypeId, StructureId};
use crate::error::DefinitionError;

/// Names accepted by [`by_name`].
pub const BUILT_IN: &[&str] = &["bulgarian", "gregorian", "julian", "uniform"];

/// Returns a built-in calendar by its lowercase name.
///
/// # Errors
///
/// Returns [`DefinitionError::UnknownCalendar`] for a name not listed in
/// [`BUILT_IN`].
pub fn by_name(name: &str) -> Result<Calendar, DefinitionError> {
    match name {
        "bulgarian" => bulgarian(),
        "gregorian" => gregorian(),
        "julian" => julian(),
        "uniform" => uniform(),
        _ => Err(DefinitionError::UnknownCalendar {
            name: name.to_string(),
        }),
    }
}

const MONTHS: [(&str, u64); 12] = [
    ("January", 31),
    ("February", 28),
    ("March", 31),
    ("April", 30),
    ("May", 31),
    ("June", 30),
    ("July", 31),
    ("August", 31),
    ("September", 30),
    ("October", 31),
    ("November", 30),
    ("December", 31),
];

/// Defines the day, the months, and the common and leap years shared by
/// the Julian and Gregorian calendars. Returns `(common year, leap year)`.
pub(crate) fn julian_years(
    builder: &mut CalendarBuilder,
    day_type: PeriodTypeId,
    month_type: PeriodTypeId,
    year_type: PeriodTypeId,
) -> Result<(StructureId, StructureId), DefinitionError> {
    let day = builder.structure("day", day_type, 1, &[])?;
    let mut common = Vec::with_capacity(12);
    let mut leap = Vec::with_capacity(12);
    for (name, length) in MONTHS {
        let month = builder.structure(name, month_type, length, &repeat(day, length as usize))?;
        common.push(month);
        if name == "February" {
            leap.push(builder.structure(name, month_type, 29, &repeat(day, 29))?);
        } else {
            leap.push(month);
        }
    }
    let year = builder.structure("year", year_type, 365, &common)?;
    let leap_year = builder.structure("leap year", year_type, 366, &leap)?;
    Ok((year, leap_year))
}
