//! Countdown to the next release window
//!
//! Episodes drop on a fixed 15-day cycle measured from a fixed anchor. The
//! engine keeps the nearest boundary at or after "now" and recomputes it
//! from scratch whenever it has been passed, so skipped ticks never cause
//! drift.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Serialize;
use std::fmt;

/// Length of one release cycle
pub const CYCLE_DAYS: i64 = 15;

const MS_PER_SEC: i64 = 1_000;
const SECS_PER_MIN: i64 = 60;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_DAY: i64 = 86_400;

/// Fixed schedule anchor (2024-01-01T00:00:00Z)
pub fn default_anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Time left until the next boundary, truncated to whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    pub fn from_millis(ms: i64) -> Self {
        let total = ms.max(0) / MS_PER_SEC;
        Self {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MIN,
            seconds: total % SECS_PER_MIN,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * SECS_PER_DAY + self.hours * SECS_PER_HOUR + self.minutes * SECS_PER_MIN + self.seconds
    }

    pub fn is_zero(&self) -> bool {
        self.total_seconds() == 0
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02} : {:02} : {:02} : {:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Repeating-cycle countdown
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    anchor: DateTime<Utc>,
    cycle: Duration,
    target: Option<DateTime<Utc>>,
}

impl CountdownEngine {
    /// Create an engine for the given anchor and cycle length.
    ///
    /// Non-positive cycles are clamped to one second.
    pub fn new(anchor: DateTime<Utc>, cycle: Duration) -> Self {
        let cycle = if cycle <= Duration::zero() {
            Duration::seconds(1)
        } else {
            cycle
        };
        Self {
            anchor,
            cycle,
            target: None,
        }
    }

    /// The series schedule: default anchor, 15-day cycle
    pub fn standard() -> Self {
        Self::new(default_anchor(), Duration::days(CYCLE_DAYS))
    }

    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    pub fn cycle(&self) -> Duration {
        self.cycle
    }

    /// Current target boundary, if a tick has happened
    pub fn target(&self) -> Option<DateTime<Utc>> {
        self.target
    }

    /// Smallest `anchor + k * cycle` (k >= 0) that is not before `now`
    pub fn next_boundary(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let elapsed = (now - self.anchor).num_milliseconds();
        let cycle = self.cycle.num_milliseconds();
        let k = if elapsed <= 0 {
            0
        } else {
            (elapsed + cycle - 1) / cycle
        };
        self.anchor + Duration::milliseconds(k * cycle)
    }

    /// Advance to `now` and report what is left.
    ///
    /// The target is derived from `now` on every call, so the clock may jump
    /// in either direction.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Remaining {
        let target = self.next_boundary(now);
        if self.target != Some(target) {
            tracing::debug!(target_at = %target, "countdown target recomputed");
            self.target = Some(target);
        }
        Remaining::from_millis((target - now).num_milliseconds())
    }
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::standard()
    }
}
