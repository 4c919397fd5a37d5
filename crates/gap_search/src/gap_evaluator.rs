use chrono::NaiveDate;
use log::debug;

use crate::date_set::DateSet;
use crate::scan_types::{GapRule, SearchWindow};

/// Outcome of evaluating one campsite against a search window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The window can be booked without leaving a forbidden gap
    Safe,
    /// The window collides with an existing reservation on `day`
    AlreadyBooked {
        /// First day of the window found to be taken
        day: NaiveDate,
    },
    /// Booking the window would leave a run of free days of exactly `size`
    ForbiddenGap {
        /// Size of the rule that matched
        size: i64,
    },
}

impl Verdict {
    /// Whether the campsite belongs in the safe list
    pub fn is_safe(&self) -> bool {
        matches!(self, Verdict::Safe)
    }
}

/// Free-day run lengths on either side of a simulated booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GapScan {
    /// Free days immediately before the window
    pub trailing: i64,
    /// Free days immediately after the window
    pub leading: i64,
}

/// Decides whether placing a window at a campsite leaves a forbidden gap
#[derive(Debug, Clone, Copy)]
pub struct GapEvaluator<'a> {
    rules: &'a [GapRule],
}

impl<'a> GapEvaluator<'a> {
    /// Create an evaluator for the given rules
    pub fn new(rules: &'a [GapRule]) -> Self {
        Self { rules }
    }

    /// Evaluate `window` against one campsite's reserved days.
    ///
    /// The set is consumed: the window is inserted into it while simulating
    /// the booking and the result is thrown away with the verdict.
    pub fn evaluate(&self, mut reserved: DateSet, window: &SearchWindow) -> Verdict {
        if reserved.is_empty() {
            return Verdict::Safe;
        }

        if let Some(day) = window.days().find(|day| reserved.contains(*day)) {
            return Verdict::AlreadyBooked { day };
        }

        reserved.insert_range(window.start_date(), window.end_date());

        let Some(scan) = scan_adjacent_gaps(&reserved, window) else {
            return Verdict::Safe;
        };
        debug!(
            "Window {} leaves {} free day(s) before and {} after",
            window, scan.trailing, scan.leading
        );

        self.rules
            .iter()
            .find(|rule| rule.matches(scan.trailing) || rule.matches(scan.leading))
            .map_or(Verdict::Safe, |rule| Verdict::ForbiddenGap { size: rule.size })
    }
}

/// Count the free days on both sides of `window` in a set that already
/// contains it. Returns `None` when the set is empty.
///
/// Scans never leave the span between the earliest and latest reserved day.
pub fn scan_adjacent_gaps(reserved: &DateSet, window: &SearchWindow) -> Option<GapScan> {
    let (first, last) = reserved.bounds()?;

    let mut trailing = 0;
    let mut pivot = window.start_date().pred_opt();
    while let Some(day) = pivot.filter(|day| *day > first) {
        if reserved.contains(day) {
            break;
        }
        trailing += 1;
        pivot = day.pred_opt();
    }

    let mut leading = 0;
    let mut pivot = window.end_date().succ_opt();
    while let Some(day) = pivot.filter(|day| *day < last) {
        if reserved.contains(day) {
            break;
        }
        leading += 1;
        pivot = day.succ_opt();
    }

    Some(GapScan { trailing, leading })
}
