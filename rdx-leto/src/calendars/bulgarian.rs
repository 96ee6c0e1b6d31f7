//! The Old Bulgarian calendar.
//!
//! Each quarter is 31, 30 and 30 days. The twelfth month gains a 31st day,
//! Eni, so a common year has 365 days. In a leap year the sixth month also
//! gains one, Behti, for 366. Every fourth year is a leap year.
//!
//! Only the day, month, year and four-year levels are defined here.

use crate::calendar::{repeat, Calendar, CalendarBuilder};
use crate::error::DefinitionError;

/// Month names and lengths of a common year.
const MONTHS: [(&str, u64); 12] = [
    ("First", 31),
    ("Second", 30),
    ("Third", 30),
    ("Fourth", 31),
    ("Fifth", 30),
    ("Sixth", 30),
    ("Seventh", 31),
    ("Eighth", 30),
    ("Ninth", 30),
    ("Tenth", 31),
    ("Eleventh", 30),
    ("Twelfth", 31),
];

/// The historical epoch is not part of this definition, so day 0 is the
/// Unix epoch.
pub const BULGARIAN_EPOCH_OFFSET_DAYS: i64 = 0;

pub fn bulgarian() -> Result<Calendar, DefinitionError> {
    let mut b = CalendarBuilder::new("bulgarian", BULGARIAN_EPOCH_OFFSET_DAYS);
    let day = b.period_type("day");
    let month = b.period_type("month");
    let year = b.period_type("year");
    let four_years = b.period_type("four years");

    let d = b.structure("day", day, 1, &[])?;
    let mut common = Vec::with_capacity(12);
    let mut leap = Vec::with_capacity(12);
    for (name, length) in MONTHS {
        let m = b.structure(name, month, length, &repeat(d, length as usize))?;
        common.push(m);
        if name == "Sixth" {
            leap.push(b.structure("Sixth (Behti)", month, 31, &repeat(d, 31))?);
        } else {
            leap.push(m);
        }
    }
    let y = b.structure("year", year, 365, &common)?;
    let yl = b.structure("leap year", year, 366, &leap)?;
    b.structure("four years", four_years, 1461, &[y, y, y, yl])?;
    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_and_leap_year_layout() {
        let calendar = bulgarian().unwrap();
        let year = calendar.period_type_by_name("year").unwrap();
        let lengths = |index: usize| -> Vec<u64> {
            let structure = calendar.structure(year.structures()[index]).unwrap();
            structure
                .sub_periods()
                .iter()
                .map(|id| calendar.structure(*id).unwrap().length_in_days())
                .collect()
        };
        assert_eq!(
            lengths(0),
            vec![31, 30, 30, 31, 30, 30, 31, 30, 30, 31, 30, 31]
        );
        assert_eq!(
            lengths(1),
            vec![31, 30, 30, 31, 30, 31, 31, 30, 30, 31, 30, 31]
        );
        assert_eq!(lengths(0).iter().sum::<u64>(), 365);
        assert_eq!(lengths(1).iter().sum::<u64>(), 366);
    }

    #[test]
    fn behti_and_eni_are_the_31st_days() {
        let calendar = bulgarian().unwrap();
        // Day 364 of the first year is Eni.
        let eni = calendar.decompose(364).unwrap();
        assert_eq!(eni[1].structure().unwrap().name(), "Twelfth");
        assert_eq!(eni[0].number(), 30);

        // The leap year starts after three common years; Behti follows
        // 182 days of the first half-year.
        let behti = calendar.decompose(3 * 365 + 182).unwrap();
        assert_eq!(behti[2].number(), 3);
        assert_eq!(behti[1].structure().unwrap().name(), "Sixth (Behti)");
        assert_eq!(behti[0].number(), 30);

        // In a common year the same offset is already the seventh month.
        let common = calendar.decompose(182).unwrap();
        assert_eq!(common[1].structure().unwrap().name(), "Seventh");
        assert_eq!(common[0].number(), 0);
    }
}
