//! The declarative calendar definition: period types, their structures, and
//! the builder that assembles them.
//!
//! A calendar is pure data. Concrete calendars (Gregorian, Julian, custom
//! ones loaded from TOML) differ only in the graph of structures they build,
//! never in code paths.

use crate::common::{PeriodTypeId, StructureId};
use crate::error::DefinitionError;
use slotmap::SlotMap;
use tracing::{debug, warn};

/// One granularity level of a calendar hierarchy, such as "month".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodType {
    id: PeriodTypeId,
    name: String,
    structures: Vec<StructureId>,
}

impl PeriodType {
    pub fn id(&self) -> PeriodTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The structures an instance of this period type may have, in the order
    /// they were defined.
    pub fn structures(&self) -> &[StructureId] {
        &self.structures
    }
}

/// One concrete composition of a period type, e.g. "a 29-day February".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodStructure {
    name: String,
    period_type: PeriodTypeId,
    length_in_days: u64,
    sub_periods: Vec<StructureId>,
    /// Units of every period type contained in this structure, indexed by
    /// `PeriodTypeId`. Filled in when the calendar is built.
    units: Vec<u64>,
}

impl PeriodStructure {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn period_type(&self) -> PeriodTypeId {
        self.period_type
    }

    pub fn length_in_days(&self) -> u64 {
        self.length_in_days
    }

    /// The ordered sub-periods this structure is made of. Empty for an
    /// atomic structure such as a day.
    pub fn sub_periods(&self) -> &[StructureId] {
        &self.sub_periods
    }

    /// How many units of `period_type` one instance of this structure holds.
    ///
    /// Yields 1 for the structure's own type and 0 for any larger type.
    pub fn units_of(&self, period_type: PeriodTypeId) -> u64 {
        self.units.get(period_type.index()).copied().unwrap_or(0)
    }
}

/// A complete, read-only calendar definition.
///
/// The calendar owns every `PeriodStructure`; periods produced by the engine
/// borrow from it, so it must outlive them.
#[derive(Debug, Clone)]
pub struct Calendar {
    name: String,
    epoch_offset_days: i64,
    types: Vec<PeriodType>,
    structures: SlotMap<StructureId, PeriodStructure>,
}

impl Calendar {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Days between the calendar's epoch and the Unix epoch.
    pub fn epoch_offset_days(&self) -> i64 {
        self.epoch_offset_days
    }

    /// All period types, smallest first.
    pub fn period_types(&self) -> &[PeriodType] {
        &self.types
    }

    pub fn period_type(&self, id: PeriodTypeId) -> Option<&PeriodType> {
        self.types.get(id.index())
    }

    pub fn period_type_by_name(&self, name: &str) -> Option<&PeriodType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn structure(&self, id: StructureId) -> Option<&PeriodStructure> {
        self.structures.get(id)
    }

    /// Iterates over all structures in definition order.
    pub fn structures(&self) -> impl Iterator<Item = (StructureId, &PeriodStructure)> {
        self.structures.iter()
    }

    /// The largest period type, which sits at the top of the hierarchy.
    pub fn largest_type(&self) -> Result<&PeriodType, DefinitionError> {
        self.types.last().ok_or_else(|| DefinitionError::NoPeriodTypes {
            calendar: self.name.clone(),
        })
    }

    pub(crate) fn type_name(&self, id: PeriodTypeId) -> String {
        self.types
            .get(id.index())
            .map(|t| t.name.clone())
            .unwrap_or_else(|| format!("#{}", id.index()))
    }

    /// Indexes a structure that is known to belong to this calendar.
    ///
    /// The builder only ever links structures it created, so every id found
    /// inside the graph resolves.
    pub(crate) fn linked(&self, id: StructureId) -> &PeriodStructure {
        &self.structures[id]
    }
}

/// Assembles a `Calendar` from period types and structures.
///
/// Period types must be declared smallest first. A structure may only refer
/// to sub-structures that were added before it, so the graph cannot contain
/// cycles.
#[derive(Debug)]
pub struct CalendarBuilder {
    name: String,
    epoch_offset_days: i64,
    types: Vec<PeriodType>,
    structures: SlotMap<StructureId, PeriodStructure>,
    order: Vec<StructureId>,
}

impl CalendarBuilder {
    /// Starts a calendar whose day 0 lies `epoch_offset_days` days before
    /// the Unix epoch.
    pub fn new(name: impl Into<String>, epoch_offset_days: i64) -> Self {
        Self {
            name: name.into(),
            epoch_offset_days,
            types: Vec::new(),
            structures: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Declares the next-larger period type.
    pub fn period_type(&mut self, name: impl Into<String>) -> PeriodTypeId {
        let id = PeriodTypeId(self.types.len());
        self.types.push(PeriodType {
            id,
            name: name.into(),
            structures: Vec::new(),
        });
        id
    }

    /// Defines a structure of `period_type` and registers it as one of the
    /// type's possible structures.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::UnknownPeriodType`] if the type was not
    /// declared, or [`DefinitionError::UnknownStructure`] if a sub-period id
    /// did not come from this builder.
    pub fn structure(
        &mut self,
        name: impl Into<String>,
        period_type: PeriodTypeId,
        length_in_days: u64,
        sub_periods: &[StructureId],
    ) -> Result<StructureId, DefinitionError> {
        let name = name.into();
        if period_type.index() >= self.types.len() {
            return Err(DefinitionError::UnknownPeriodType {
                name: format!("#{}", period_type.index()),
            });
        }
        if let Some(unknown) = sub_periods
            .iter()
            .find(|id| !self.structures.contains_key(**id))
        {
            return Err(DefinitionError::UnknownStructure {
                name: format!("{unknown:?} (sub-period of \"{name}\")"),
            });
        }
        let id = self.structures.insert(PeriodStructure {
            name,
            period_type,
            length_in_days,
            sub_periods: sub_periods.to_vec(),
            units: Vec::new(),
        });
        self.types[period_type.index()].structures.push(id);
        self.order.push(id);
        Ok(id)
    }

    /// Builds the calendar and rejects it if any correctness check fails.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::Rejected`] listing every defect found.
    pub fn build(self) -> Result<Calendar, DefinitionError> {
        let calendar = self.build_unchecked()?;
        match calendar.check_correctness() {
            None => Ok(calendar),
            Some(diagnostics) => {
                warn!(
                    "Rejecting calendar \"{}\": {}",
                    calendar.name,
                    diagnostics.replace('\n', "; ")
                );
                Err(DefinitionError::Rejected {
                    calendar: calendar.name,
                    diagnostics,
                })
            }
        }
    }

    /// Builds the calendar without running the correctness checks.
    ///
    /// The engine still fails on the defects it detects while decomposing,
    /// but malformed lengths may produce silently wrong periods.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::Overflow`] if a structure holds more units
    /// of some period type than fit in a `u64`.
    pub fn build_unchecked(mut self) -> Result<Calendar, DefinitionError> {
        let type_count = self.types.len();
        // Sub-periods always precede their parents in `order`.
        for &id in &self.order {
            let mut units = vec![0u64; type_count];
            let own = self.structures[id].period_type;
            for &sub in &self.structures[id].sub_periods {
                for (index, (slot, sub_units)) in units
                    .iter_mut()
                    .zip(&self.structures[sub].units)
                    .enumerate()
                {
                    *slot = slot.checked_add(*sub_units).ok_or_else(|| {
                        DefinitionError::Overflow {
                            period_type: self.types[index].name.clone(),
                        }
                    })?;
                }
            }
            for slot in units.iter_mut().skip(own.index() + 1) {
                *slot = 0;
            }
            units[own.index()] = 1;
            self.structures[id].units = units;
        }
        debug!(
            "Built calendar \"{}\" with {} period types and {} structures.",
            self.name,
            type_count,
            self.order.len()
        );
        Ok(Calendar {
            name: self.name,
            epoch_offset_days: self.epoch_offset_days,
            types: self.types,
            structures: self.structures,
        })
    }
}

/// Returns `n` copies of a structure id, for sub-period lists such as
/// "thirty days".
pub fn repeat(id: StructureId, n: usize) -> Vec<StructureId> {
    vec![id; n]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level() -> (Calendar, StructureId, StructureId) {
        let mut b = CalendarBuilder::new("test", 0);
        let day = b.period_type("day");
        let week = b.period_type("week");
        let d = b.structure("day", day, 1, &[]).unwrap();
        let w = b.structure("week", week, 7, &repeat(d, 7)).unwrap();
        (b.build().unwrap(), d, w)
    }

    #[test]
    fn units_are_derived_from_sub_periods() {
        let (calendar, d, w) = two_level();
        let week = calendar.structure(w).unwrap();
        assert_eq!(week.units_of(PeriodTypeId(0)), 7);
        assert_eq!(week.units_of(PeriodTypeId(1)), 1);
        let day = calendar.structure(d).unwrap();
        assert_eq!(day.units_of(PeriodTypeId(0)), 1);
        assert_eq!(day.units_of(PeriodTypeId(1)), 0);
    }

    #[test]
    fn structures_register_with_their_type() {
        let (calendar, d, w) = two_level();
        assert_eq!(calendar.period_types()[0].structures(), &[d]);
        assert_eq!(calendar.period_types()[1].structures(), &[w]);
        assert_eq!(calendar.largest_type().unwrap().name(), "week");
    }

    #[test]
    fn unknown_period_type_is_rejected() {
        let mut b = CalendarBuilder::new("test", 0);
        let err = b.structure("day", PeriodTypeId(0), 1, &[]).unwrap_err();
        assert_eq!(
            err,
            DefinitionError::UnknownPeriodType {
                name: "#0".to_string()
            }
        );
    }

    #[test]
    fn unknown_sub_period_is_rejected() {
        let mut b = CalendarBuilder::new("test", 0);
        let day = b.period_type("day");
        let week = b.period_type("week");
        b.structure("day", day, 1, &[]).unwrap();
        assert!(matches!(
            b.structure("week", week, 7, &[StructureId::default()]),
            Err(DefinitionError::UnknownStructure { .. })
        ));
    }

    #[test]
    fn unit_overflow_is_reported() {
        // Level k holds 2^k days, so level 64 no longer fits.
        let mut b = CalendarBuilder::new("doubling", 0);
        let day = b.period_type("day");
        let mut previous = b.structure("day", day, 1, &[]).unwrap();
        for level in 1..=64 {
            let period_type = b.period_type(format!("level {level}"));
            previous = b
                .structure(format!("level {level}"), period_type, u64::MAX, &[previous, previous])
                .unwrap();
        }
        assert_eq!(
            b.build_unchecked().unwrap_err(),
            DefinitionError::Overflow {
                period_type: "day".to_string()
            }
        );
    }

    #[test]
    fn calendar_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<Calendar>();
    }

    #[test]
    fn empty_calendar_has_no_largest_type() {
        let calendar = CalendarBuilder::new("empty", 0).build_unchecked().unwrap();
        assert!(matches!(
            calendar.largest_type(),
            Err(DefinitionError::NoPeriodTypes { .. })
        ));
    }
}
