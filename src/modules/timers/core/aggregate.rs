// Aggregation over a worker's entries: totals and calendar leave days.
//
// Leave counting deliberately ignores the list's pagination and date
// filters: it is anchored to the worker's first-ever entry, so switching
// filters never changes the leave total for the same worker.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::modules::timers::core::duration::worked_minutes;
use crate::modules::timers::core::entry::TimeEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntrySummary {
    /// Entries in the filtered set.
    pub total_count: u64,
    /// Worked minutes summed over closed entries in the filtered set; open
    /// entries contribute 0 to the persisted total.
    pub total_duration: i64,
    /// Calendar days with zero recorded work, counted over the unfiltered
    /// history between the first entry and yesterday.
    pub total_leaves: u32,
}

/// Days `d` with `first_entry_date <= d <= yesterday` on which no entry in
/// `history` starts. Today is excluded because the day is not over yet.
/// Calendar-day membership is computed in UTC, the storage zone.
pub fn leave_days(history: &[TimeEntry], today: NaiveDate) -> u32 {
    let Some(first) = history.iter().map(TimeEntry::start_day).min() else {
        return 0;
    };
    let worked: HashSet<NaiveDate> = history.iter().map(TimeEntry::start_day).collect();

    let mut day = first;
    let mut leaves = 0;
    while day < today {
        if !worked.contains(&day) {
            leaves += 1;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    leaves
}

/// Summary for a listing: `filtered` is the (unpaginated) filtered set the
/// page is drawn from, `history` the full unfiltered set leave counting
/// scans.
pub fn summarize(filtered: &[TimeEntry], history: &[TimeEntry], today: NaiveDate) -> EntrySummary {
    EntrySummary {
        total_count: filtered.len() as u64,
        total_duration: filtered.iter().filter_map(worked_minutes).sum(),
        total_leaves: leave_days(history, today),
    }
}

#[cfg(test)]
mod aggregate_tests {
    use super::*;
    use crate::test_support::fixtures::{closed_entry, entry_started_at, ts};
    use rstest::rstest;

    #[rstest]
    fn it_should_count_leave_days_between_the_first_entry_and_yesterday() {
        // first entry on D, work on D and D+2, today = D+4 => D+1 and D+3
        let history = vec![
            closed_entry(
                "worker-0001",
                ts("2026-03-02T08:00:00Z"),
                ts("2026-03-02T16:00:00Z"),
            ),
            closed_entry(
                "worker-0001",
                ts("2026-03-04T08:00:00Z"),
                ts("2026-03-04T16:00:00Z"),
            ),
        ];
        let today = ts("2026-03-06T10:00:00Z").date_naive();

        assert_eq!(leave_days(&history, today), 2);
    }

    #[rstest]
    fn it_should_exclude_today_from_leave_counting() {
        let history = vec![closed_entry(
            "worker-0001",
            ts("2026-03-02T08:00:00Z"),
            ts("2026-03-02T16:00:00Z"),
        )];
        // today immediately follows the only worked day
        let today = ts("2026-03-03T00:30:00Z").date_naive();

        assert_eq!(leave_days(&history, today), 0);
    }

    #[rstest]
    fn it_should_report_zero_leaves_for_an_empty_history() {
        assert_eq!(leave_days(&[], ts("2026-03-06T10:00:00Z").date_naive()), 0);
    }

    #[rstest]
    fn it_should_sum_durations_over_closed_entries_only() {
        let filtered = vec![
            closed_entry(
                "worker-0001",
                ts("2026-03-02T08:00:00Z"),
                ts("2026-03-02T09:30:00Z"),
            ),
            // still running, contributes 0
            entry_started_at("worker-0001", ts("2026-03-03T08:00:00Z")),
        ];
        let summary = summarize(&filtered, &filtered, ts("2026-03-03T12:00:00Z").date_naive());

        assert_eq!(summary.total_count, 2);
        assert_eq!(summary.total_duration, 90);
        assert_eq!(summary.total_leaves, 0);
    }

    #[rstest]
    fn it_should_anchor_leaves_to_the_full_history_not_the_filtered_set() {
        let history = vec![
            closed_entry(
                "worker-0001",
                ts("2026-03-02T08:00:00Z"),
                ts("2026-03-02T09:00:00Z"),
            ),
            closed_entry(
                "worker-0001",
                ts("2026-03-05T08:00:00Z"),
                ts("2026-03-05T09:00:00Z"),
            ),
        ];
        // date filter narrowed the visible list down to the second entry
        let filtered = vec![history[1].clone()];
        let today = ts("2026-03-06T10:00:00Z").date_naive();

        let summary = summarize(&filtered, &history, today);

        assert_eq!(summary.total_count, 1);
        assert_eq!(summary.total_duration, 60);
        // leaves still cover 2026-03-03 and 2026-03-04
        assert_eq!(summary.total_leaves, 2);
    }
}
