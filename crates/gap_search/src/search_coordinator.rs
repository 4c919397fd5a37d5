use log::{debug, info};
use serde::Serialize;

use crate::date_set::DateSet;
use crate::gap_evaluator::{GapEvaluator, Verdict};
use crate::scan_types::{Campsite, Dataset, SearchWindow};

/// Per-campsite result of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CampsiteVerdict<'a> {
    /// The evaluated campsite
    pub campsite: &'a Campsite,
    /// Whether the window can be booked there without leaving a gap
    pub safe: bool,
}

/// Informational notes attached to a search result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchNote {
    /// No gap rules are configured, so every campsite is safe
    NoGapRules,
    /// The dataset holds no campsites
    NoCampsites,
    /// The dataset holds no reservations
    NoReservations,
    /// Every campsite was excluded
    NoSafeCampsites,
}

impl SearchNote {
    /// Human readable form of the note for the given window
    pub fn message(&self, window: &SearchWindow) -> String {
        match self {
            SearchNote::NoGapRules => format!(
                "No gaps rules were relevant between {} and {}.",
                window.start_date(),
                window.end_date()
            ),
            SearchNote::NoCampsites => {
                "Note: No campsites were detected. Ergo, a search returns no results.".to_string()
            }
            SearchNote::NoReservations => {
                "Note: No campsite reservations were detected.".to_string()
            }
            SearchNote::NoSafeCampsites => "No campsites without gaps were present.".to_string(),
        }
    }
}

/// Everything a presentation layer needs to render a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport<'a> {
    /// The searched window
    pub search: SearchWindow,
    /// Names of the campsites safe to book, in load order
    pub safe_campsites: Vec<&'a str>,
    /// One verdict per campsite, in load order
    pub verdicts: Vec<CampsiteVerdict<'a>>,
    /// Informational notes about degenerate input or results
    pub notes: Vec<SearchNote>,
}

/// Runs a search window against every campsite of a dataset
#[derive(Debug, Clone, Copy)]
pub struct SearchCoordinator<'a> {
    dataset: &'a Dataset,
}

impl<'a> SearchCoordinator<'a> {
    /// Create a coordinator over a loaded dataset
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Lazily evaluate every campsite in load order
    pub fn verdicts(
        &self,
        window: SearchWindow,
    ) -> impl Iterator<Item = CampsiteVerdict<'a>> + use<'a> {
        let dataset = self.dataset;
        let has_rules = !dataset.gap_rules().is_empty();
        let evaluator = GapEvaluator::new(dataset.gap_rules());

        dataset.campsites().iter().map(move |campsite| {
            let safe = !has_rules || evaluate_campsite(dataset, evaluator, campsite, &window);
            CampsiteVerdict { campsite, safe }
        })
    }

    /// Names of the campsites the window can be booked at, in load order
    pub fn find_safe_campsites(&self, window: SearchWindow) -> Vec<&'a str> {
        self.verdicts(window)
            .filter(|verdict| verdict.safe)
            .map(|verdict| verdict.campsite.name.as_str())
            .collect()
    }

    /// Run a full search and collect the verdicts with their notes
    pub fn search(&self, window: SearchWindow) -> SearchReport<'a> {
        let mut notes = Vec::new();

        if self.dataset.gap_rules().is_empty() {
            notes.push(SearchNote::NoGapRules);
        }
        if self.dataset.campsites().is_empty() {
            notes.push(SearchNote::NoCampsites);
        } else if self.dataset.reservations().is_empty() {
            notes.push(SearchNote::NoReservations);
        }

        let verdicts: Vec<CampsiteVerdict<'a>> = self.verdicts(window).collect();
        let safe_campsites: Vec<&'a str> = verdicts
            .iter()
            .filter(|verdict| verdict.safe)
            .map(|verdict| verdict.campsite.name.as_str())
            .collect();

        if safe_campsites.is_empty() && !self.dataset.campsites().is_empty() {
            notes.push(SearchNote::NoSafeCampsites);
        }

        info!(
            "Window {} is safe at {} of {} campsite(s)",
            window,
            safe_campsites.len(),
            verdicts.len()
        );

        SearchReport {
            search: window,
            safe_campsites,
            verdicts,
            notes,
        }
    }
}

/// Names of the campsites in `dataset` that `window` can be booked at
pub fn find_safe_campsites(dataset: &Dataset, window: SearchWindow) -> Vec<String> {
    SearchCoordinator::new(dataset)
        .find_safe_campsites(window)
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn evaluate_campsite(
    dataset: &Dataset,
    evaluator: GapEvaluator<'_>,
    campsite: &Campsite,
    window: &SearchWindow,
) -> bool {
    let mut reserved = DateSet::new();
    for reservation in dataset.reservations_for(campsite.id) {
        reserved.extend(reservation.days());
    }

    if log::log_enabled!(log::Level::Debug) {
        for day in reserved.ordered() {
            debug!("Campsite #{} reserved on {}", campsite.id, day);
        }
    }

    let verdict = evaluator.evaluate(reserved, window);
    match verdict {
        Verdict::Safe => debug!("Campsite #{} ({}) is safe", campsite.id, campsite.name),
        Verdict::AlreadyBooked { day } => debug!(
            "Campsite #{} ({}) was already booked on {}",
            campsite.id, campsite.name, day
        ),
        Verdict::ForbiddenGap { size } => debug!(
            "Gap of size {} was detected in campsite #{} ({})",
            size, campsite.id, campsite.name
        ),
    }

    verdict.is_safe()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_types::{GapRule, Reservation};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(start: NaiveDate, end: NaiveDate) -> SearchWindow {
        SearchWindow::new(start, end).unwrap()
    }

    fn sample_dataset(gap_rules: Vec<GapRule>) -> Dataset {
        Dataset::new(
            vec![
                Campsite::new(1, "Cozy Cabin"),
                Campsite::new(2, "Comfy Cabin"),
                Campsite::new(3, "Rustic Cabin"),
            ],
            vec![
                Reservation::new(1, date(2017, 2, 1), date(2017, 2, 10)),
                Reservation::new(2, date(2017, 2, 14), date(2017, 2, 16)),
                Reservation::new(3, date(2017, 2, 20), date(2017, 2, 25)),
            ],
            gap_rules,
        )
        .unwrap()
    }

    #[test]
    fn test_campsite_with_forbidden_gap_is_excluded() {
        let dataset = sample_dataset(vec![GapRule::new(2)]);
        let safe = find_safe_campsites(&dataset, window(date(2017, 2, 13), date(2017, 2, 15)));

        // Cozy: 2 free days before the window. Comfy: overlap.
        assert_eq!(safe, vec!["Rustic Cabin".to_string()]);
    }

    #[test]
    fn test_campsite_with_larger_gap_is_included() {
        let dataset = Dataset::new(
            vec![Campsite::new(1, "Cozy Cabin")],
            vec![Reservation::new(1, date(2017, 2, 1), date(2017, 2, 10))],
            vec![GapRule::new(2)],
        )
        .unwrap();

        let safe = find_safe_campsites(&dataset, window(date(2017, 2, 20), date(2017, 2, 22)));
        assert_eq!(safe, vec!["Cozy Cabin".to_string()]);
    }

    #[test]
    fn test_empty_rules_make_every_campsite_safe() {
        let dataset = sample_dataset(vec![]);
        let report = SearchCoordinator::new(&dataset)
            .search(window(date(2017, 2, 14), date(2017, 2, 15)));

        // Comfy overlaps the window, but without rules nothing is scanned.
        assert_eq!(
            report.safe_campsites,
            vec!["Cozy Cabin", "Comfy Cabin", "Rustic Cabin"]
        );
        assert_eq!(report.notes, vec![SearchNote::NoGapRules]);
    }

    #[test]
    fn test_empty_campsites_yield_note_not_error() {
        let dataset = Dataset::new(vec![], vec![], vec![GapRule::new(2)]).unwrap();
        let report = SearchCoordinator::new(&dataset)
            .search(window(date(2017, 2, 14), date(2017, 2, 15)));

        assert!(report.safe_campsites.is_empty());
        assert!(report.verdicts.is_empty());
        assert_eq!(report.notes, vec![SearchNote::NoCampsites]);
    }

    #[test]
    fn test_all_unsafe_adds_note() {
        let dataset = sample_dataset(vec![GapRule::new(2)]);
        let report = SearchCoordinator::new(&dataset)
            .search(window(date(2017, 2, 1), date(2017, 2, 25)));

        assert!(report.safe_campsites.is_empty());
        assert_eq!(report.notes, vec![SearchNote::NoSafeCampsites]);
    }

    #[test]
    fn test_campsites_without_reservations_are_safe() {
        let dataset = Dataset::new(
            vec![Campsite::new(1, "Cozy Cabin"), Campsite::new(2, "Empty Lot")],
            vec![],
            vec![GapRule::new(1), GapRule::new(2)],
        )
        .unwrap();
        let report = SearchCoordinator::new(&dataset)
            .search(window(date(2017, 2, 14), date(2017, 2, 15)));

        assert_eq!(report.safe_campsites, vec!["Cozy Cabin", "Empty Lot"]);
        assert_eq!(report.notes, vec![SearchNote::NoReservations]);
    }

    #[test]
    fn test_verdicts_preserve_load_order() {
        let dataset = sample_dataset(vec![GapRule::new(2)]);
        let coordinator = SearchCoordinator::new(&dataset);

        let verdicts: Vec<(i64, bool)> = coordinator
            .verdicts(window(date(2017, 2, 13), date(2017, 2, 15)))
            .map(|verdict| (verdict.campsite.id, verdict.safe))
            .collect();

        assert_eq!(verdicts, vec![(1, false), (2, false), (3, true)]);
    }

    #[test]
    fn test_reservations_at_other_campsites_are_ignored() {
        // Campsite 2's reservation would leave a 2 day gap if it were shared.
        let dataset = Dataset::new(
            vec![Campsite::new(1, "Cozy Cabin"), Campsite::new(2, "Comfy Cabin")],
            vec![Reservation::new(2, date(2017, 2, 1), date(2017, 2, 10))],
            vec![GapRule::new(2)],
        )
        .unwrap();

        let safe = find_safe_campsites(&dataset, window(date(2017, 2, 13), date(2017, 2, 15)));
        assert_eq!(safe, vec!["Cozy Cabin".to_string()]);
    }

    #[test]
    fn test_repeated_searches_agree() {
        let dataset = sample_dataset(vec![GapRule::new(2), GapRule::new(3)]);
        let coordinator = SearchCoordinator::new(&dataset);
        let candidate = window(date(2017, 2, 12), date(2017, 2, 12));

        assert_eq!(
            coordinator.find_safe_campsites(candidate),
            coordinator.find_safe_campsites(candidate)
        );
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let dataset = sample_dataset(vec![GapRule::new(2)]);
        let report = SearchCoordinator::new(&dataset)
            .search(window(date(2017, 2, 13), date(2017, 2, 15)));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["search"]["startDate"], "2017-02-13");
        assert_eq!(json["safeCampsites"], serde_json::json!(["Rustic Cabin"]));
        assert_eq!(json["verdicts"][0]["campsite"]["name"], "Cozy Cabin");
        assert_eq!(json["verdicts"][0]["safe"], false);
    }
}
