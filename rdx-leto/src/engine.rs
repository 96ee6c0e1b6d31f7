//! The core engine: decomposes day counts into periods and back.

use crate::calendar::{Calendar, PeriodStructure};
use crate::common::PeriodTypeId;
use crate::error::DefinitionError;
use crate::period::Period;
use crate::time::{self, WallClock};
use tracing::{debug, trace};

/// Running totals for one decomposition, indexed by `PeriodTypeId`.
struct Tally<'c> {
    count: Vec<u64>,
    absolute: Vec<u64>,
    start: Vec<Option<u64>>,
    bound: Vec<Option<&'c PeriodStructure>>,
}

impl<'c> Tally<'c> {
    fn new(type_count: usize) -> Self {
        Self {
            count: vec![0; type_count],
            absolute: vec![0; type_count],
            start: vec![None; type_count],
            bound: vec![None; type_count],
        }
    }

    /// Records `times` whole instances of `structure` as elapsed.
    fn consume(
        &mut self,
        calendar: &Calendar,
        structure: &PeriodStructure,
        times: u64,
    ) -> Result<(), DefinitionError> {
        let own = structure.period_type().index();
        self.count[own] = self.count[own]
            .checked_add(times)
            .ok_or_else(|| overflow(calendar, own))?;
        for (index, absolute) in self.absolute.iter_mut().enumerate() {
            let units = structure.units_of(PeriodTypeId(index));
            let total = units
                .checked_mul(times)
                .and_then(|added| absolute.checked_add(added))
                .ok_or_else(|| overflow(calendar, index))?;
            *absolute = total;
        }
        Ok(())
    }

    /// Marks `structure` as the instance that contains the requested day.
    fn land(&mut self, structure: &'c PeriodStructure, days_elapsed: u64) {
        let own = structure.period_type().index();
        self.start[own] = Some(days_elapsed);
        self.bound[own] = Some(structure);
    }

    fn into_periods(self, calendar: &'c Calendar) -> Vec<Period<'c>> {
        calendar
            .period_types()
            .iter()
            .enumerate()
            .map(|(index, period_type)| {
                Period::new(
                    period_type,
                    self.count[index],
                    self.absolute[index],
                    self.start[index],
                    self.bound[index],
                )
            })
            .collect()
    }
}

fn overflow(calendar: &Calendar, index: usize) -> DefinitionError {
    DefinitionError::Overflow {
        period_type: calendar.type_name(PeriodTypeId(index)),
    }
}

impl Calendar {
    /// Splits `days` (counted from the calendar epoch) into one `Period`
    /// per period type, smallest first.
    ///
    /// The single structure of the largest type is divided out first. Then
    /// each level's sub-periods are scanned in order: every sub-period no
    /// longer than the remaining days has fully elapsed and is consumed, the
    /// first longer one contains the day and becomes the next level.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] if the calendar has no period types, if its
    /// largest type does not have exactly one structure, or if a level's
    /// sub-periods run out before the day is placed.
    pub fn decompose(&self, days: u64) -> Result<Vec<Period<'_>>, DefinitionError> {
        let largest = self.largest_type()?;
        let top = match largest.structures() {
            [only] => self.linked(*only),
            [] => {
                return Err(DefinitionError::NoStructures {
                    period_type: largest.name().to_string(),
                })
            }
            many => {
                return Err(DefinitionError::AmbiguousTopLevel {
                    period_type: largest.name().to_string(),
                    count: many.len(),
                })
            }
        };
        if top.length_in_days() == 0 {
            return Err(DefinitionError::ZeroLength {
                period_type: largest.name().to_string(),
                structure: top.name().to_string(),
            });
        }
        debug!("Decomposing day {} in calendar \"{}\".", days, self.name());

        let mut tally = Tally::new(self.period_types().len());
        let value = days / top.length_in_days();
        let mut remaining = days % top.length_in_days();
        let mut days_elapsed = value * top.length_in_days();
        tally.consume(self, top, value)?;
        tally.land(top, days_elapsed);

        let mut current = top;
        'descent: while !current.sub_periods().is_empty() {
            for &candidate_id in current.sub_periods() {
                let candidate = self.linked(candidate_id);
                if candidate.length_in_days() > remaining {
                    trace!(
                        "Landed in \"{}\" at day {}.",
                        candidate.name(),
                        days_elapsed
                    );
                    tally.land(candidate, days_elapsed);
                    current = candidate;
                    continue 'descent;
                }
                remaining -= candidate.length_in_days();
                days_elapsed += candidate.length_in_days();
                tally.consume(self, candidate, 1)?;
            }
            return Err(DefinitionError::SubPeriodsExhausted {
                period_type: self.type_name(current.period_type()),
                structure: current.name().to_string(),
                remaining,
            });
        }

        Ok(tally.into_periods(self))
    }

    /// Days from this calendar's epoch to the current day of `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::BeforeEpoch`] if the clock reads earlier
    /// than the calendar's epoch.
    pub fn days_since_epoch(&self, clock: &impl WallClock) -> Result<u64, DefinitionError> {
        let days = self
            .epoch_offset_days()
            .saturating_add(time::unix_days(clock.now_millis()));
        u64::try_from(days).map_err(|_| DefinitionError::BeforeEpoch {
            calendar: self.name().to_string(),
            days,
        })
    }

    /// Decomposes the current day of `clock`.
    ///
    /// # Errors
    ///
    /// See [`Calendar::days_since_epoch`] and [`Calendar::decompose`].
    pub fn today(&self, clock: &impl WallClock) -> Result<Vec<Period<'_>>, DefinitionError> {
        let days = self.days_since_epoch(clock)?;
        self.decompose(days)
    }

    /// Convenience wrapper around [`recompose`].
    pub fn recompose(&self, periods: &[Period<'_>]) -> Result<u64, DefinitionError> {
        recompose(periods)
    }
}

/// Adds up `number * structure length` over all periods.
///
/// Only `number` and the bound structure are used, so synthetic periods
/// built with [`Period::synthetic`] work as input. Periods are visited from
/// the last index to the first; the sum does not depend on the order.
///
/// # Errors
///
/// Returns [`DefinitionError::MissingStructure`] for a period without a
/// structure and [`DefinitionError::Overflow`] if the total exceeds `u64`.
pub fn recompose(periods: &[Period<'_>]) -> Result<u64, DefinitionError> {
    periods.iter().rev().try_fold(0u64, |days, period| {
        let structure = period
            .structure()
            .ok_or_else(|| DefinitionError::MissingStructure {
                period_type: period.period_type().name().to_string(),
            })?;
        period
            .number()
            .checked_mul(structure.length_in_days())
            .and_then(|length| days.checked_add(length))
            .ok_or_else(|| DefinitionError::Overflow {
                period_type: period.period_type().name().to_string(),
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{repeat, CalendarBuilder};
    use crate::time::{FixedClock, MILLIS_PER_DAY};

    fn uniform() -> Calendar {
        let mut b = CalendarBuilder::new("uniform", 0);
        let day = b.period_type("day");
        let month = b.period_type("month");
        let year = b.period_type("year");
        let d = b.structure("day", day, 1, &[]).unwrap();
        let m = b.structure("month", month, 30, &repeat(d, 30)).unwrap();
        b.structure("year", year, 360, &repeat(m, 12)).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn decompose_day_395() {
        let calendar = uniform();
        let periods = calendar.decompose(395).unwrap();
        let (day, month, year) = (&periods[0], &periods[1], &periods[2]);

        assert_eq!(year.number(), 1);
        assert_eq!(year.absolute_number(), 1);
        assert_eq!(year.start_at_days_after_epoch(), Some(360));

        assert_eq!(month.number(), 1);
        assert_eq!(month.absolute_number(), 13);
        assert_eq!(month.start_at_days_after_epoch(), Some(390));

        assert_eq!(day.number(), 5);
        assert_eq!(day.absolute_number(), 395);
        assert_eq!(day.start_at_days_after_epoch(), Some(395));
        assert_eq!(day.name(), "5");
    }

    #[test]
    fn decompose_month_and_year_only() {
        let mut b = CalendarBuilder::new("months", 0);
        let month = b.period_type("month");
        let year = b.period_type("year");
        let m = b.structure("month", month, 30, &[]).unwrap();
        b.structure("year", year, 360, &repeat(m, 12)).unwrap();
        let calendar = b.build().unwrap();

        let summary = calendar
            .decompose(395)
            .unwrap()
            .iter()
            .map(|p| (p.number(), p.absolute_number(), p.start_at_days_after_epoch()))
            .collect::<Vec<_>>();
        assert_eq!(summary, vec![(1, 13, Some(390)), (1, 1, Some(360))]);
    }

    #[test]
    fn decompose_day_zero() {
        let calendar = uniform();
        let periods = calendar.decompose(0).unwrap();
        for period in &periods {
            assert_eq!(period.number(), 0);
            assert_eq!(period.absolute_number(), 0);
            assert_eq!(period.start_at_days_after_epoch(), Some(0));
            assert!(period.structure().is_some());
        }
    }

    #[test]
    fn recompose_synthetic_periods() {
        let calendar = uniform();
        let month = calendar.period_types()[1].structures()[0];
        let year = calendar.period_types()[2].structures()[0];
        let periods = vec![
            Period::synthetic(&calendar, PeriodTypeId(1), month, 1).unwrap(),
            Period::synthetic(&calendar, PeriodTypeId(2), year, 2).unwrap(),
        ];
        assert_eq!(recompose(&periods).unwrap(), 750);
    }

    #[test]
    fn recompose_requires_structures() {
        let calendar = uniform();
        let types = calendar.period_types();
        let periods = vec![Period::new(&types[0], 3, 3, None, None)];
        assert_eq!(
            recompose(&periods).unwrap_err(),
            DefinitionError::MissingStructure {
                period_type: "day".to_string()
            }
        );
    }

    #[test]
    fn today_uses_epoch_offset_and_bias() {
        let mut b = CalendarBuilder::new("days", 10);
        let day = b.period_type("day");
        b.structure("day", day, 1, &[]).unwrap();
        let calendar = b.build().unwrap();

        let clock = FixedClock(3 * MILLIS_PER_DAY - time::DAY_BOUNDARY_BIAS_MILLIS);
        assert_eq!(calendar.days_since_epoch(&clock).unwrap(), 13);
        let today = calendar.today(&clock).unwrap();
        assert_eq!(today[0].number(), 13);
    }

    #[test]
    fn today_before_epoch_fails() {
        let mut b = CalendarBuilder::new("future", -5);
        let day = b.period_type("day");
        b.structure("day", day, 1, &[]).unwrap();
        let calendar = b.build().unwrap();
        assert_eq!(
            calendar.today(&FixedClock(0)).unwrap_err(),
            DefinitionError::BeforeEpoch {
                calendar: "future".to_string(),
                days: -5,
            }
        );
    }
}
