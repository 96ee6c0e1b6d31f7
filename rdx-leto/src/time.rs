//! The wall-clock collaborator used to find "today".

use chrono::Utc;

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Forward bias applied to the wall clock before truncating to whole days.
///
/// Days roll over two hours ahead of UTC. Existing day numbers depend on
/// this exact value, so it is not configurable.
pub const DAY_BOUNDARY_BIAS_MILLIS: i64 = 2 * 60 * 60 * 1000;

/// A source of "now", in milliseconds since the Unix epoch.
pub trait WallClock {
    fn now_millis(&self) -> i64;
}

/// The real clock of the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock frozen at a given instant. Useful for tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl WallClock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Whole days elapsed since the Unix epoch at `millis`, after the bias.
pub fn unix_days(millis: i64) -> i64 {
    millis
        .saturating_add(DAY_BOUNDARY_BIAS_MILLIS)
        .div_euclid(MILLIS_PER_DAY)
}
