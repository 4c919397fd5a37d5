use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

/// A campsite that reservations can be placed at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Campsite {
    /// Unique identifier of the campsite within a dataset
    pub id: i64,
    /// Display name of the campsite
    pub name: String,
}

impl Campsite {
    /// Create a new campsite record
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// An existing booking covering the closed interval `[start_date, end_date]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// ID of the campsite the reservation is held at
    pub campsite_id: i64,
    /// First reserved day
    pub start_date: NaiveDate,
    /// Last reserved day (inclusive)
    pub end_date: NaiveDate,
}

impl Reservation {
    /// Create a new reservation record
    pub fn new(campsite_id: i64, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            campsite_id,
            start_date,
            end_date,
        }
    }

    /// Every day covered by the reservation, in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        days_between(self.start_date, self.end_date)
    }
}

/// A forbidden length for a run of free days next to a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GapRule {
    /// Number of free days that must not be left behind
    pub size: i64,
}

impl GapRule {
    /// Create a new gap rule
    pub fn new(size: i64) -> Self {
        Self { size }
    }

    /// Rules with a size below one never apply
    pub fn is_active(&self) -> bool {
        self.size >= 1
    }

    /// Whether a free run of `run_length` days violates this rule.
    ///
    /// Only an exact match counts; a run one day longer or shorter is fine.
    pub fn matches(&self, run_length: i64) -> bool {
        self.is_active() && run_length == self.size
    }
}

/// The candidate reservation a search is performed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchWindow {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl SearchWindow {
    /// Create a search window, rejecting a start date after the end date
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, GapError> {
        if start_date > end_date {
            return Err(GapError::InvalidWindow {
                start: start_date,
                end: end_date,
            });
        }

        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// First day of the window
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the window (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Every day covered by the window, in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        days_between(self.start_date, self.end_date)
    }
}

impl std::fmt::Display for SearchWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start_date, self.end_date)
    }
}

fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// A validated snapshot of campsites, reservations and gap rules.
///
/// The only way to build one is [`Dataset::new`], so every reservation held
/// here is known to reference a campsite of the same dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    campsites: Vec<Campsite>,
    reservations: Vec<Reservation>,
    gap_rules: Vec<GapRule>,
}

impl Dataset {
    /// Build a dataset, checking campsite ids and reservation references
    pub fn new(
        campsites: Vec<Campsite>,
        reservations: Vec<Reservation>,
        gap_rules: Vec<GapRule>,
    ) -> Result<Self, GapError> {
        let mut known_ids = HashSet::with_capacity(campsites.len());
        for campsite in &campsites {
            if !known_ids.insert(campsite.id) {
                return Err(GapError::DuplicateCampsite {
                    campsite_id: campsite.id,
                });
            }
        }

        for reservation in &reservations {
            if !known_ids.contains(&reservation.campsite_id) {
                return Err(GapError::UnknownCampsite {
                    campsite_id: reservation.campsite_id,
                });
            }

            if reservation.start_date > reservation.end_date {
                return Err(GapError::InvalidReservationRange {
                    campsite_id: reservation.campsite_id,
                    start: reservation.start_date,
                    end: reservation.end_date,
                });
            }
        }

        Ok(Self {
            campsites,
            reservations,
            gap_rules,
        })
    }

    /// Campsites in load order
    pub fn campsites(&self) -> &[Campsite] {
        &self.campsites
    }

    /// All reservations in load order
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Configured gap rules, including inactive ones
    pub fn gap_rules(&self) -> &[GapRule] {
        &self.gap_rules
    }

    /// Reservations held at the given campsite
    pub fn reservations_for(&self, campsite_id: i64) -> impl Iterator<Item = &Reservation> {
        self.reservations
            .iter()
            .filter(move |reservation| reservation.campsite_id == campsite_id)
    }
}

/// Errors raised while assembling search data
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GapError {
    /// A reservation references a campsite that does not exist
    #[error("Reservation references unknown campsite id {campsite_id}")]
    UnknownCampsite {
        /// The unresolved campsite id
        campsite_id: i64,
    },

    /// Two campsites share the same id
    #[error("Duplicate campsite id {campsite_id}")]
    DuplicateCampsite {
        /// The repeated campsite id
        campsite_id: i64,
    },

    /// A reservation ends before it starts
    #[error("Reservation at campsite {campsite_id} ends ({end}) before it starts ({start})")]
    InvalidReservationRange {
        /// Campsite the reservation is held at
        campsite_id: i64,
        /// Reservation start date
        start: NaiveDate,
        /// Reservation end date
        end: NaiveDate,
    },

    /// The search window ends before it starts
    #[error("Invalid search window: end date {end} is before start date {start}")]
    InvalidWindow {
        /// Window start date
        start: NaiveDate,
        /// Window end date
        end: NaiveDate,
    },
}
