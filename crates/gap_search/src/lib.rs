//! # Gap Search
//!
//! This crate decides which campsites can take a new reservation without
//! leaving a forbidden run of free days next to an existing booking.
//! It works on an already loaded, validated [`Dataset`] and never parses input.

/// Records shared by the search: campsites, reservations, gap rules and windows
mod scan_types;
pub use scan_types::*;

/// Per-campsite set of reserved days
mod date_set;
pub use date_set::*;

/// Gap detection for a single campsite
mod gap_evaluator;
pub use gap_evaluator::*;

/// Orchestration of a search over every campsite of a dataset
mod search_coordinator;
pub use search_coordinator::*;
