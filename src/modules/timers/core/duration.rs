// Pure duration arithmetic over a single entry.
//
// Boundaries
// - No input or output, no clock reads: callers pass `now` explicitly.

use chrono::{DateTime, Duration, Utc};

use crate::modules::timers::core::entry::{PauseInterval, TimeEntry};

/// Length of one pause interval; an open interval is measured up to `as_of`.
/// Never negative.
fn interval_duration(interval: &PauseInterval, as_of: DateTime<Utc>) -> Duration {
    let resumed = interval.resumed_at.unwrap_or(as_of);
    (resumed - interval.paused_at).max(Duration::zero())
}

/// Total paused time up to `as_of`, recomputed from the intervals. This is
/// the recomputation path behind the `accumulated_paused_minutes` cache.
pub fn paused_duration(entry: &TimeEntry, as_of: DateTime<Utc>) -> Duration {
    entry
        .pause_intervals
        .iter()
        .fold(Duration::zero(), |acc, interval| {
            acc + interval_duration(interval, as_of)
        })
}

/// Sum of completed pause intervals in whole minutes, the value the
/// `accumulated_paused_minutes` cache must always equal.
pub fn recomputed_paused_minutes(entry: &TimeEntry) -> i64 {
    entry
        .pause_intervals
        .iter()
        .filter_map(|interval| {
            let resumed = interval.resumed_at?;
            Some((resumed - interval.paused_at).max(Duration::zero()))
        })
        .fold(Duration::zero(), |acc, duration| acc + duration)
        .num_minutes()
}

fn worked_between(entry: &TimeEntry, effective_end: DateTime<Utc>) -> i64 {
    let elapsed = effective_end - entry.start.time;
    let paused = paused_duration(entry, effective_end);
    (elapsed - paused).max(Duration::zero()).num_minutes()
}

/// Worked minutes of a closed entry; `None` while the entry is still open.
/// Only closed entries count toward persisted totals.
pub fn worked_minutes(entry: &TimeEntry) -> Option<i64> {
    let end = entry.end.as_ref()?;
    Some(worked_between(entry, end.time))
}

/// Display-only live estimate for an open entry, measured up to `now`.
/// Never persisted.
pub fn live_worked_minutes(entry: &TimeEntry, now: DateTime<Utc>) -> i64 {
    let effective_end = entry.end.as_ref().map(|end| end.time).unwrap_or(now);
    worked_between(entry, effective_end)
}
