use chrono::NaiveDate;
use gap_search::{Dataset, GapError, SearchWindow};
use serde::Deserialize;
use std::path::PathBuf;
use validator::{Validate, ValidationError};

/// Actions an input document can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Find the campsites a window can be booked at
    Search,
}

impl Action {
    /// Every action the loader understands, by its document key
    pub const ALL: [(&'static str, Action); 1] = [("search", Action::Search)];
}

/// The `search` object of an input document
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RawSearch {
    /// Start of the requested window (YYYY-MM-DD)
    #[validate(custom(function = "validate_calendar_date"))]
    pub start_date: String,

    /// End of the requested window (YYYY-MM-DD)
    #[validate(custom(function = "validate_calendar_date"))]
    pub end_date: String,
}

/// One element of the `gapRules` array
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGapRule {
    /// Forbidden number of free days
    pub gap_size: i64,
}

/// One element of the `campsites` array
#[derive(Debug, Deserialize, Validate)]
pub struct RawCampsite {
    /// Campsite identifier referenced by reservations
    pub id: i64,

    /// Display name of the campsite
    #[validate(length(min = 1, message = "Campsite name is required"))]
    pub name: String,
}

/// One element of the `reservations` array
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RawReservation {
    /// ID of the campsite the reservation is held at
    pub campsite_id: i64,

    /// First reserved day (YYYY-MM-DD)
    #[validate(custom(function = "validate_calendar_date"))]
    pub start_date: String,

    /// Last reserved day (YYYY-MM-DD)
    #[validate(custom(function = "validate_calendar_date"))]
    pub end_date: String,
}

/// A fully loaded search request, ready to hand to the search core
#[derive(Debug, Clone)]
pub struct SearchInput {
    /// The candidate reservation window
    pub window: SearchWindow,
    /// Campsites, reservations and gap rules of the document
    pub dataset: Dataset,
}

/// Custom error type for loading input documents
#[derive(thiserror::Error, Debug)]
pub enum InputError {
    /// The input file could not be read
    #[error("Unable to read {}: {source}", .path.display())]
    Io {
        /// Path of the input file
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// The document is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document requests none of the supported actions
    #[error("No valid action requested")]
    NoAction,

    /// A required top-level array is missing or is not an array
    #[error("Missing or malformed `{0}` array")]
    MissingSection(&'static str),

    /// A required object could not be parsed
    #[error("Malformed `{section}` object: {source}")]
    InvalidSection {
        /// Name of the offending object
        section: &'static str,
        /// Parse failure
        source: serde_json::Error,
    },

    /// A date is not a real calendar day in YYYY-MM-DD form
    #[error("Invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A record violates a field constraint
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// The records do not form a consistent dataset
    #[error("Data integrity error: {0}")]
    Dataset(#[from] GapError),
}

/// Parse a strict `YYYY-MM-DD` calendar date
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, InputError> {
    let parts: Vec<&str> = value.split('-').collect();
    let well_formed = matches!(parts.as_slice(), [year, month, day]
        if year.len() == 4 && month.len() == 2 && day.len() == 2)
        && parts
            .iter()
            .all(|part| part.bytes().all(|byte| byte.is_ascii_digit()));

    if !well_formed {
        return Err(InputError::InvalidDate(value.to_string()));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| InputError::InvalidDate(value.to_string()))
}

/// Custom validation function for date strings
fn validate_calendar_date(value: &str) -> Result<(), ValidationError> {
    parse_calendar_date(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_calendar_date"))
}
