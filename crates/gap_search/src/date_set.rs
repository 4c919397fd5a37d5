use chrono::NaiveDate;
use std::collections::HashSet;

/// The set of days a single campsite is reserved on.
///
/// Membership is hash based; ordering is only computed when asked for via
/// [`DateSet::ordered`] or [`DateSet::bounds`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSet {
    days: HashSet<NaiveDate>,
}

impl DateSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a day, returning `false` if it was already present
    pub fn insert(&mut self, day: NaiveDate) -> bool {
        self.days.insert(day)
    }

    /// Add every day of the closed interval `[start, end]`
    pub fn insert_range(&mut self, start: NaiveDate, end: NaiveDate) {
        for day in start.iter_days().take_while(|day| *day <= end) {
            self.days.insert(day);
        }
    }

    /// Whether the given day is reserved
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    /// Number of reserved days
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether no day is reserved
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// All reserved days, earliest first
    pub fn ordered(&self) -> Vec<NaiveDate> {
        let mut ordered: Vec<NaiveDate> = self.days.iter().copied().collect();
        ordered.sort_unstable();
        ordered
    }

    /// Earliest and latest reserved day, or `None` for an empty set
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.days.iter().min()?;
        let last = self.days.iter().max()?;
        Some((*first, *last))
    }
}

impl FromIterator<NaiveDate> for DateSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

impl Extend<NaiveDate> for DateSet {
    fn extend<I: IntoIterator<Item = NaiveDate>>(&mut self, iter: I) {
        self.days.extend(iter);
    }
}
