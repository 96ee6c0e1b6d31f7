//! The Julian calendar: every fourth year is a leap year.

use super::julian_years;
use crate::calendar::{Calendar, CalendarBuilder};
use crate::error::DefinitionError;

/// Days from 1 January of year 1 (Julian) to the Unix epoch.
///
/// That day is two days before 1 January of year 1 in the proleptic
/// Gregorian calendar.
pub const JULIAN_EPOCH_OFFSET_DAYS: i64 = 719_164;

/// Day, month, year, and the four-year leap cycle.
///
/// The cycle is `[year, year, year, leap year]`, so year 4 of the era is
/// the first leap year.
pub fn julian() -> Result<Calendar, DefinitionError> {
    let mut b = CalendarBuilder::new("julian", JULIAN_EPOCH_OFFSET_DAYS);
    let day = b.period_type("day");
    let month = b.period_type("month");
    let year = b.period_type("year");
    let four_years = b.period_type("four years");

    let (common, leap) = julian_years(&mut b, day, month, year)?;
    b.structure(
        "four years",
        four_years,
        1461,
        &[common, common, common, leap],
    )?;
    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PeriodTypeId;

    #[test]
    fn cycle_counts_every_unit() {
        let calendar = julian().unwrap();
        let cycle = calendar.period_types()[3].structures()[0];
        let cycle = calendar.structure(cycle).unwrap();
        assert_eq!(cycle.units_of(PeriodTypeId(0)), 1461);
        assert_eq!(cycle.units_of(PeriodTypeId(1)), 48);
        assert_eq!(cycle.units_of(PeriodTypeId(2)), 4);
        assert_eq!(cycle.units_of(PeriodTypeId(3)), 1);
    }

    #[test]
    fn unix_epoch_is_19_december_1969() {
        let calendar = julian().unwrap();
        let periods = calendar.decompose(JULIAN_EPOCH_OFFSET_DAYS as u64).unwrap();
        assert_eq!(periods[2].absolute_number() + 1, 1969);
        assert_eq!(periods[1].number() + 1, 12);
        assert_eq!(periods[0].number() + 1, 19);
        assert_eq!(periods[1].structure().unwrap().name(), "December");
    }
}
