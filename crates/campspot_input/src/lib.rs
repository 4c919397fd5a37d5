//! # Campspot Input
//!
//! This crate loads campspot-style JSON documents (a `search` window plus
//! `campsites`, `reservations` and `gapRules` arrays) into the validated
//! dataset consumed by the `gap_search` crate.

/// Raw input records, loader errors and date parsing
mod input_types;
pub use input_types::*;

/// Loading of whole documents from text, values or files
mod json_loader;
pub use json_loader::*;
