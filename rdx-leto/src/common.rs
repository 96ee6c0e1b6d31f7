//! Contains common, primitive identifier types.
//!
//! This module defines the identifiers used to address period types and
//! period structures inside a `Calendar`. Using distinct types keeps a
//! structure handle from being confused with a period type position.

use slotmap::new_key_type;

new_key_type! {
    /// Uniquely identifies a `PeriodStructure` within the calendar that owns it.
    ///
    /// Keys are handed out by the `CalendarBuilder` and stay valid for the
    /// lifetime of the built `Calendar`. Structures are never removed, so a key
    /// never goes stale.
    pub struct StructureId;
}

/// Identifies a period type by its position in the calendar's hierarchy.
///
/// Positions follow the smallest-first convention: `PeriodTypeId(0)` is the
/// finest granularity (typically "day") and the last position is the
/// largest period type. Comparing two ids therefore compares granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeriodTypeId(pub usize);

impl PeriodTypeId {
    /// Returns the position as an index into per-type tables.
    pub fn index(self) -> usize {
        self.0
    }
}
