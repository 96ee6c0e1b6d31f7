//! # Leto
//!
//! A data-driven engine that splits a count of days into a hierarchy of
//! calendar periods, and adds such periods back up into days.
//!
//! A calendar is described purely as data: an ordered list of period types
//! (smallest first, e.g. day, month, year) and, for each type, one or more
//! possible structures. A structure knows its length in days and the ordered
//! sub-periods it is made of, so variable-length months and leap years need
//! no special code.
//!
//! ## Core Concepts
//!
//! - **Calendar**: the read-only definition graph, built with a
//!   `CalendarBuilder` or loaded from a TOML `CalendarDefinition`.
//! - **Decomposition**: `Calendar::decompose(days)` returns one `Period` per
//!   period type with its number inside the parent, its absolute number
//!   since the epoch, the day it started on, and its concrete structure.
//! - **Recomposition**: `recompose(&periods)` adds `number * length` over
//!   the periods.
//! - **Correctness checks**: `Calendar::check_correctness()` describes every
//!   structural defect of a definition. `CalendarBuilder::build` refuses
//!   calendars that have any.
//!
//! ## Example Usage
//!
//! ```rust
//! use leto::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut builder = CalendarBuilder::new("uniform", 0);
//!     let day = builder.period_type("day");
//!     let month = builder.period_type("month");
//!     let year = builder.period_type("year");
//!     let d = builder.structure("day", day, 1, &[])?;
//!     let m = builder.structure("month", month, 30, &repeat(d, 30))?;
//!     builder.structure("year", year, 360, &repeat(m, 12))?;
//!     let calendar = builder.build()?;
//!
//!     let periods = calendar.decompose(395)?;
//!     assert_eq!(periods[2].number(), 1); // second year
//!     assert_eq!(periods[1].absolute_number(), 13); // 14th month overall
//!     assert_eq!(recompose(&periods)?, 395);
//!     Ok(())
//! }
//! ```

pub const ENGINE_NAME: &str = "Leto Engine";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod calendar;
pub mod calendars;
pub mod common;
pub mod config;
pub mod definition;
pub mod engine;
pub mod error;
pub mod logging;
pub mod period;
pub mod time;
pub mod validate;

/// A prelude module for easy importing of the most common Leto types.
pub mod prelude {
    pub use crate::calendar::{repeat, Calendar, CalendarBuilder, PeriodStructure, PeriodType};
    pub use crate::common::{PeriodTypeId, StructureId};
    pub use crate::config::{CalendarChoice, LetoConfig};
    pub use crate::definition::CalendarDefinition;
    pub use crate::engine::recompose;
    pub use crate::error::DefinitionError;
    pub use crate::period::Period;
    pub use crate::time::{FixedClock, SystemClock, WallClock};
}
