// Pure transition functions for the timer state machine.
//
// Responsibilities
// - Validate the requested transition against the current state and apply it.
// - Distinguish an applied change from an idempotent no-op, so duplicate
//   client retries converge without errors.
// - Never perform input or output; callers pass `now` explicitly.

use chrono::{DateTime, Utc};

use crate::modules::timers::core::duration::recomputed_paused_minutes;
use crate::modules::timers::core::entry::{Checkpoint, EntryState, PauseInterval, TimeEntry};
use crate::modules::timers::core::error::TimerError;

/// Outcome of a transition. `Noop` means the entry was already in the
/// requested state and nothing needs to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Changed,
    Noop,
}

/// `Active -> Paused`, opening a new pause interval. Pausing a paused entry
/// is an idempotent success: a flaky client cannot tell whether its previous
/// request landed, and erroring here would force client-side state tracking.
pub fn pause(entry: &mut TimeEntry, now: DateTime<Utc>) -> Result<Applied, TimerError> {
    match entry.state {
        EntryState::Paused => Ok(Applied::Noop),
        EntryState::Closed => Err(TimerError::InvalidState {
            operation: "pause",
            state: entry.state,
        }),
        EntryState::Active => {
            entry.pause_intervals.push(PauseInterval {
                paused_at: now,
                resumed_at: None,
            });
            entry.state = EntryState::Paused;
            entry.updated_at = now;
            Ok(Applied::Changed)
        }
    }
}

/// `Paused -> Active`, closing the open pause interval and folding its
/// duration into the cache. Resuming an active entry is an idempotent no-op.
pub fn resume(entry: &mut TimeEntry, now: DateTime<Utc>) -> Result<Applied, TimerError> {
    match entry.state {
        EntryState::Active => Ok(Applied::Noop),
        EntryState::Closed => Err(TimerError::InvalidState {
            operation: "resume",
            state: entry.state,
        }),
        EntryState::Paused => {
            if let Some(interval) = entry
                .pause_intervals
                .last_mut()
                .filter(|interval| interval.resumed_at.is_none())
            {
                interval.resumed_at = Some(now.max(interval.paused_at));
            }
            entry.accumulated_paused_minutes = recomputed_paused_minutes(entry);
            entry.state = EntryState::Active;
            entry.updated_at = now;
            Ok(Applied::Changed)
        }
    }
}

/// `Active | Paused -> Closed`. Stopping a paused entry implicitly resumes
/// it at `end.time`, so the trailing span counts as paused, not worked.
/// Repeating a stop with the identical end payload is an idempotent no-op;
/// a differing payload against a closed entry is rejected.
pub fn stop(
    entry: &mut TimeEntry,
    end: Checkpoint,
    now: DateTime<Utc>,
) -> Result<Applied, TimerError> {
    match entry.state {
        EntryState::Closed => {
            if entry.end.as_ref() == Some(&end) {
                Ok(Applied::Noop)
            } else {
                Err(TimerError::InvalidState {
                    operation: "stop",
                    state: entry.state,
                })
            }
        }
        EntryState::Active | EntryState::Paused => {
            if end.time < entry.start.time {
                return Err(TimerError::Validation {
                    field: "end.time",
                    message: format!(
                        "end time {} precedes start time {}",
                        end.time, entry.start.time
                    ),
                });
            }
            if let Some(interval) = entry.pause_intervals.last_mut() {
                match interval.resumed_at {
                    Some(resumed) if end.time < resumed => {
                        return Err(TimerError::Validation {
                            field: "end.time",
                            message: format!("end time {end_time} precedes the last resume at {resumed}", end_time = end.time),
                        });
                    }
                    Some(_) => {}
                    None => {
                        if end.time < interval.paused_at {
                            return Err(TimerError::Validation {
                                field: "end.time",
                                message: format!(
                                    "end time {end_time} precedes the open pause at {paused}",
                                    end_time = end.time,
                                    paused = interval.paused_at
                                ),
                            });
                        }
                        interval.resumed_at = Some(end.time);
                    }
                }
            }
            entry.accumulated_paused_minutes = recomputed_paused_minutes(entry);
            entry
                .photo_refs
                .extend(end.photo_refs.iter().cloned());
            entry.end = Some(end);
            entry.state = EntryState::Closed;
            entry.updated_at = now;
            Ok(Applied::Changed)
        }
    }
}

/// Data-integrity check applied after corrective edits: edits bypass the
/// transition guard but may never leave the temporal fields inconsistent.
pub fn validate_temporal(entry: &TimeEntry) -> Result<(), TimerError> {
    let mut previous_bound = entry.start.time;
    let last_index = entry.pause_intervals.len().saturating_sub(1);
    for (index, interval) in entry.pause_intervals.iter().enumerate() {
        if interval.paused_at < previous_bound {
            return Err(TimerError::Validation {
                field: "pause_intervals",
                message: format!(
                    "interval {index} pauses at {} before the previous bound {previous_bound}",
                    interval.paused_at
                ),
            });
        }
        match interval.resumed_at {
            Some(resumed) => {
                if resumed < interval.paused_at {
                    return Err(TimerError::Validation {
                        field: "pause_intervals",
                        message: format!(
                            "interval {index} resumes at {resumed} before it pauses at {}",
                            interval.paused_at
                        ),
                    });
                }
                previous_bound = resumed;
            }
            None => {
                if index != last_index || entry.state != EntryState::Paused {
                    return Err(TimerError::Validation {
                        field: "pause_intervals",
                        message: format!("interval {index} is open on a non-paused entry"),
                    });
                }
                previous_bound = interval.paused_at;
            }
        }
    }
    if let Some(end) = &entry.end {
        if end.time < entry.start.time {
            return Err(TimerError::Validation {
                field: "end.time",
                message: format!(
                    "end time {} precedes start time {}",
                    end.time, entry.start.time
                ),
            });
        }
        if end.time < previous_bound {
            return Err(TimerError::Validation {
                field: "end.time",
                message: format!("end time {} precedes the last pause bound {previous_bound}", end.time),
            });
        }
    }
    Ok(())
}
