//! Error types for the Leto engine.

/// Error type for every fallible operation over a calendar definition.
///
/// All variants describe deterministic defects of a definition (or of the
/// periods handed back to the engine), so retrying never helps. Each message
/// names the offending period type or structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    /// The calendar defines no period types at all.
    #[error("calendar \"{calendar}\" does not define any period types")]
    NoPeriodTypes {
        /// Name of the calendar.
        calendar: String,
    },

    /// A period type has no possible structure, so its length is unknown.
    #[error(
        "period type \"{period_type}\" does not define any structure, \
         so it is not defined how long in days this period could be"
    )]
    NoStructures {
        /// Name of the period type.
        period_type: String,
    },

    /// The largest period type must have exactly one structure.
    #[error(
        "the biggest period type \"{period_type}\" has {count} possible structures, \
         but exactly one was expected"
    )]
    AmbiguousTopLevel {
        /// Name of the largest period type.
        period_type: String,
        /// Number of structures it actually has.
        count: usize,
    },

    /// A structure that must be consumed or divided by has zero length.
    #[error("structure \"{structure}\" of period type \"{period_type}\" is zero days long")]
    ZeroLength {
        /// Name of the period type.
        period_type: String,
        /// Name of the structure.
        structure: String,
    },

    /// Every sub-period of a structure elapsed without reaching the day.
    #[error(
        "sub-periods of \"{structure}\" ({period_type}) ran out with {remaining} days \
         still to place; their lengths do not add up to the parent"
    )]
    SubPeriodsExhausted {
        /// Name of the period type of the parent structure.
        period_type: String,
        /// Name of the parent structure.
        structure: String,
        /// Days left over after the last sub-period.
        remaining: u64,
    },

    /// A period handed to the recomposer has no bound structure.
    #[error("period of type \"{period_type}\" has no structure, its length in days is unknown")]
    MissingStructure {
        /// Name of the period type.
        period_type: String,
    },

    /// A count or day total does not fit in 64 bits.
    #[error("day arithmetic overflowed while counting period type \"{period_type}\"")]
    Overflow {
        /// Name of the period type being counted.
        period_type: String,
    },

    /// The wall clock is earlier than the calendar's epoch.
    #[error("calendar \"{calendar}\" starts after the requested day ({days} days from its epoch)")]
    BeforeEpoch {
        /// Name of the calendar.
        calendar: String,
        /// The (negative) day count that was computed.
        days: i64,
    },

    /// A period type referenced by name or id does not exist.
    #[error("unknown period type \"{name}\"")]
    UnknownPeriodType {
        /// The name or id that was looked up.
        name: String,
    },

    /// A structure referenced by name or id does not exist.
    #[error("unknown structure \"{name}\"")]
    UnknownStructure {
        /// The name or id that was looked up.
        name: String,
    },

    /// A structure was paired with a period type it does not belong to.
    #[error("structure \"{structure}\" is a \"{found}\", not a \"{period_type}\"")]
    StructureTypeMismatch {
        /// Name of the requested period type.
        period_type: String,
        /// Name of the structure.
        structure: String,
        /// Name of the period type the structure belongs to.
        found: String,
    },

    /// No built-in calendar carries this name.
    #[error("unknown calendar \"{name}\"")]
    UnknownCalendar {
        /// The name that was looked up.
        name: String,
    },

    /// The definition failed its correctness checks.
    #[error("calendar \"{calendar}\" is not well defined:\n{diagnostics}")]
    Rejected {
        /// Name of the calendar.
        calendar: String,
        /// One line per defect found.
        diagnostics: String,
    },
}
