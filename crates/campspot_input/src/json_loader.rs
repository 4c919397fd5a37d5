use gap_search::{Campsite, Dataset, GapRule, Reservation, SearchWindow};
use log::{debug, info};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;
use validator::Validate;

use crate::input_types::*;

/// Read and load an input document from disk
pub fn load_from_path(path: impl AsRef<Path>) -> Result<SearchInput, InputError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Read {} byte(s) from {}", contents.len(), path.display());
    load_from_str(&contents)
}

/// Load an input document from its JSON text
pub fn load_from_str(contents: &str) -> Result<SearchInput, InputError> {
    let document: Value = serde_json::from_str(contents)?;
    load_from_value(&document)
}

/// Load an already parsed input document
pub fn load_from_value(document: &Value) -> Result<SearchInput, InputError> {
    let root = match document.as_object() {
        Some(root) if !root.is_empty() => root,
        _ => return Err(InputError::NoAction),
    };

    match requested_action(root) {
        Some(Action::Search) => load_search(root),
        None => Err(InputError::NoAction),
    }
}

/// The first supported action named by the document's keys
fn requested_action(root: &Map<String, Value>) -> Option<Action> {
    Action::ALL
        .iter()
        .find(|(key, _)| root.contains_key(*key))
        .map(|(key, action)| {
            debug!("Valid action requested: {}", key);
            *action
        })
}

fn load_search(root: &Map<String, Value>) -> Result<SearchInput, InputError> {
    let search = root.get("search").ok_or(InputError::NoAction)?;
    let raw_search = RawSearch::deserialize(search).map_err(|source| InputError::InvalidSection {
        section: "search",
        source,
    })?;
    raw_search.validate()?;

    let window = SearchWindow::new(
        parse_calendar_date(&raw_search.start_date)?,
        parse_calendar_date(&raw_search.end_date)?,
    )?;
    debug!("Search window is {}", window);

    let gap_rules: Vec<GapRule> = section_elements::<RawGapRule>(root, "gapRules", true)?
        .into_iter()
        .map(|raw| GapRule::new(raw.gap_size))
        .collect();

    // Without gap rules every campsite is safe, so the rest may be omitted.
    let required = !gap_rules.is_empty();

    let campsites = section_elements::<RawCampsite>(root, "campsites", required)?
        .into_iter()
        .map(|raw| {
            raw.validate()?;
            Ok(Campsite::new(raw.id, raw.name))
        })
        .collect::<Result<Vec<_>, InputError>>()?;

    let reservations = section_elements::<RawReservation>(root, "reservations", required)?
        .into_iter()
        .map(|raw| {
            raw.validate()?;
            Ok(Reservation::new(
                raw.campsite_id,
                parse_calendar_date(&raw.start_date)?,
                parse_calendar_date(&raw.end_date)?,
            ))
        })
        .collect::<Result<Vec<_>, InputError>>()?;

    info!(
        "Loaded {} campsite(s), {} reservation(s) and {} gap rule(s)",
        campsites.len(),
        reservations.len(),
        gap_rules.len()
    );

    let dataset = Dataset::new(campsites, reservations, gap_rules)?;
    Ok(SearchInput { window, dataset })
}

/// Deserialize every usable element of a top-level array, skipping damaged ones.
/// An absent array that is not `required` loads as empty.
fn section_elements<T: DeserializeOwned>(
    root: &Map<String, Value>,
    section: &'static str,
    required: bool,
) -> Result<Vec<T>, InputError> {
    let elements = match root.get(section) {
        Some(value) => value
            .as_array()
            .ok_or(InputError::MissingSection(section))?,
        None if !required => {
            debug!("No `{}` array and no gap rules, treating it as empty", section);
            return Ok(Vec::new());
        }
        None => return Err(InputError::MissingSection(section)),
    };

    let parsed = elements
        .iter()
        .filter_map(|element| match T::deserialize(element) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("Skipping damaged `{}` element {}: {}", section, element, e);
                None
            }
        })
        .collect();

    Ok(parsed)
}
