//! Structural correctness checks for calendar definitions.
//!
//! The checks look only at the definition graph, never at a particular day
//! count. `CalendarBuilder::build` runs them eagerly; calendars made with
//! `build_unchecked` can be checked later through
//! [`Calendar::check_correctness`].

use crate::calendar::{Calendar, PeriodStructure};
use crate::common::PeriodTypeId;

/// One problem found in a calendar definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Defect {
    #[error("the calendar does not define any period types")]
    NoPeriodTypes,

    #[error("period type \"{period_type}\" does not define any structure")]
    NoStructures { period_type: String },

    #[error(
        "the biggest period type \"{period_type}\" has {count} possible structures, \
         but exactly one was expected"
    )]
    AmbiguousTopLevel { period_type: String, count: usize },

    #[error("structure \"{structure}\" is zero days long")]
    ZeroLength { structure: String },

    #[error("structure \"{structure}\" of the smallest period type \"{period_type}\" has sub-periods")]
    LeafWithSubPeriods {
        structure: String,
        period_type: String,
    },

    #[error("structure \"{structure}\" of period type \"{period_type}\" has no sub-periods")]
    MissingSubPeriods {
        structure: String,
        period_type: String,
    },

    #[error(
        "sub-period \"{sub_structure}\" of \"{structure}\" is a \"{found}\", \
         expected a \"{expected}\""
    )]
    WrongSubPeriodType {
        structure: String,
        sub_structure: String,
        expected: String,
        found: String,
    },

    #[error(
        "structure \"{structure}\" is declared {declared} days long, \
         but its sub-periods add up to {summed}"
    )]
    LengthMismatch {
        structure: String,
        declared: u64,
        summed: u64,
    },

    #[error(
        "period type \"{larger}\" is not longer than \"{smaller}\" \
         ({larger_min} <= {smaller_max} days)"
    )]
    GranularityNotIncreasing {
        smaller: String,
        larger: String,
        smaller_max: u64,
        larger_min: u64,
    },
}

/// Runs every check and returns all defects found, in a stable order.
pub fn defects(calendar: &Calendar) -> Vec<Defect> {
    let types = calendar.period_types();
    let Some(largest) = types.last() else {
        return vec![Defect::NoPeriodTypes];
    };

    let mut found = Vec::new();
    if largest.structures().len() > 1 {
        found.push(Defect::AmbiguousTopLevel {
            period_type: largest.name().to_string(),
            count: largest.structures().len(),
        });
    }
    for period_type in types {
        if period_type.structures().is_empty() {
            found.push(Defect::NoStructures {
                period_type: period_type.name().to_string(),
            });
        }
    }
    for (_, structure) in calendar.structures() {
        check_structure(calendar, structure, &mut found);
    }
    for pair in types.windows(2) {
        let lengths = |id: PeriodTypeId| {
            calendar
                .period_types()
                .get(id.index())
                .into_iter()
                .flat_map(|t| t.structures())
                .filter_map(|s| calendar.structure(*s))
                .map(PeriodStructure::length_in_days)
        };
        let (Some(smaller_max), Some(larger_min)) =
            (lengths(pair[0].id()).max(), lengths(pair[1].id()).min())
        else {
            continue;
        };
        if larger_min <= smaller_max {
            found.push(Defect::GranularityNotIncreasing {
                smaller: pair[0].name().to_string(),
                larger: pair[1].name().to_string(),
                smaller_max,
                larger_min,
            });
        }
    }
    found
}

fn check_structure(calendar: &Calendar, structure: &PeriodStructure, found: &mut Vec<Defect>) {
    let own = structure.period_type();
    if structure.length_in_days() == 0 {
        found.push(Defect::ZeroLength {
            structure: structure.name().to_string(),
        });
    }

    let Some(expected) = own.index().checked_sub(1).map(PeriodTypeId) else {
        if !structure.sub_periods().is_empty() {
            found.push(Defect::LeafWithSubPeriods {
                structure: structure.name().to_string(),
                period_type: calendar.type_name(own),
            });
        }
        return;
    };
    if structure.sub_periods().is_empty() {
        found.push(Defect::MissingSubPeriods {
            structure: structure.name().to_string(),
            period_type: calendar.type_name(own),
        });
        return;
    }

    let mut summed = 0u64;
    for sub in structure.sub_periods().iter().map(|id| calendar.linked(*id)) {
        summed = summed.saturating_add(sub.length_in_days());
        if sub.period_type() != expected {
            found.push(Defect::WrongSubPeriodType {
                structure: structure.name().to_string(),
                sub_structure: sub.name().to_string(),
                expected: calendar.type_name(expected),
                found: calendar.type_name(sub.period_type()),
            });
        }
    }
    if summed != structure.length_in_days() {
        found.push(Defect::LengthMismatch {
            structure: structure.name().to_string(),
            declared: structure.length_in_days(),
            summed,
        });
    }
}

impl Calendar {
    /// Checks the definition and describes every defect, one per line.
    ///
    /// Returns `None` when the calendar is well defined.
    pub fn check_correctness(&self) -> Option<String> {
        let found = defects(self);
        if found.is_empty() {
            return None;
        }
        Some(
            found
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}
