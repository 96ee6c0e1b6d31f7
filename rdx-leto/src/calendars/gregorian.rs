//! The proleptic Gregorian calendar.
//!
//! Leap years are the years divisible by 4, except centuries that are not
//! divisible by 400. The hierarchy is expressed as nested cycles:
//!
//! | period type    | structures                                   |
//! |----------------|----------------------------------------------|
//! | four centuries | 3 common centuries, then 1 leap century      |
//! | century        | 24 leap four-years + 1 common four-years, or 25 leap four-years |
//! | four years     | 3 common years + 1 leap year, or 4 common years |
//! | year           | 365 or 366 days                              |

use super::julian_years;
use crate::calendar::{repeat, Calendar, CalendarBuilder};
use crate::error::DefinitionError;

/// Days from 1 January of year 1 to the Unix epoch.
pub const GREGORIAN_EPOCH_OFFSET_DAYS: i64 = 719_162;

pub fn gregorian() -> Result<Calendar, DefinitionError> {
    let mut b = CalendarBuilder::new("gregorian", GREGORIAN_EPOCH_OFFSET_DAYS);
    let day = b.period_type("day");
    let month = b.period_type("month");
    let year = b.period_type("year");
    let four_years = b.period_type("four years");
    let century = b.period_type("century");
    let four_centuries = b.period_type("four centuries");

    let (common, leap) = julian_years(&mut b, day, month, year)?;
    let leap_four = b.structure("four years", four_years, 1461, &[common, common, common, leap])?;
    let common_four = b.structure("four common years", four_years, 1460, &repeat(common, 4))?;

    let mut blocks = repeat(leap_four, 24);
    blocks.push(common_four);
    let common_century = b.structure("century", century, 36_524, &blocks)?;
    let leap_century = b.structure("leap century", century, 36_525, &repeat(leap_four, 25))?;

    b.structure(
        "four centuries",
        four_centuries,
        146_097,
        &[common_century, common_century, common_century, leap_century],
    )?;
    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_centuries_hold_400_years() {
        let calendar = gregorian().unwrap();
        let top = calendar.largest_type().unwrap().structures()[0];
        let top = calendar.structure(top).unwrap();
        let year = calendar.period_type_by_name("year").unwrap().id();
        let month = calendar.period_type_by_name("month").unwrap().id();
        assert_eq!(top.units_of(year), 400);
        assert_eq!(top.units_of(month), 4800);
    }

    #[test]
    fn year_100_is_common_and_year_400_is_leap() {
        let calendar = gregorian().unwrap();
        // 1 January of year 100 and year 400.
        let year_100 = calendar.decompose(99 * 365 + 24).unwrap();
        assert_eq!(year_100[2].absolute_number(), 99);
        assert_eq!(year_100[2].structure().unwrap().length_in_days(), 365);

        let year_400 = calendar.decompose(3 * 36_524 + 99 * 365 + 24).unwrap();
        assert_eq!(year_400[2].absolute_number(), 399);
        assert_eq!(year_400[2].structure().unwrap().length_in_days(), 366);
    }
}
