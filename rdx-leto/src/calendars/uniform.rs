//! A toy calendar of twelve 30-day months.

use crate::calendar::{repeat, Calendar, CalendarBuilder};
use crate::error::DefinitionError;

pub fn uniform() -> Result<Calendar, DefinitionError> {
    let mut b = CalendarBuilder::new("uniform", 0);
    let day = b.period_type("day");
    let month = b.period_type("month");
    let year = b.period_type("year");

    let d = b.structure("day", day, 1, &[])?;
    let m = b.structure("month", month, 30, &repeat(d, 30))?;
    b.structure("year", year, 360, &repeat(m, 12))?;
    b.build()
}
