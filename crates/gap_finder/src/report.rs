use gap_search::{SearchNote, SearchReport};
use std::fmt::Write;

const RULE: &str = "------------------------------------------------------------";

/// Render a report the way the search has always been printed
pub fn render_text(report: &SearchReport<'_>) -> String {
    let mut out = String::new();

    for note in &report.notes {
        if *note != SearchNote::NoSafeCampsites {
            let _ = writeln!(out, "{}", note.message(&report.search));
        }
    }

    if report.safe_campsites.is_empty() {
        let _ = writeln!(out, "{}", SearchNote::NoSafeCampsites.message(&report.search));
        return out;
    }

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "The requested campsite reservation between...\n");
    let _ = writeln!(
        out,
        "{} and {}",
        report.search.start_date(),
        report.search.end_date()
    );
    let _ = writeln!(
        out,
        "\n... can be safely placed without creating new gaps at:"
    );
    let _ = writeln!(out, "{RULE}");
    for name in &report.safe_campsites {
        let _ = writeln!(out, "{name}");
    }
    let _ = writeln!(out, "{RULE}");

    out
}

/// Render a report as pretty printed JSON
pub fn render_json(report: &SearchReport<'_>) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gap_search::{Campsite, CampsiteVerdict, SearchWindow};

    fn window() -> SearchWindow {
        SearchWindow::new(
            "2018-06-04".parse().unwrap(),
            "2018-06-06".parse().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_render_text_lists_safe_campsites() {
        let cozy = Campsite::new(1, "Cozy Cabin");
        let comfy = Campsite::new(2, "Comfy Cabin");
        let report = SearchReport {
            search: window(),
            safe_campsites: vec!["Cozy Cabin"],
            verdicts: vec![
                CampsiteVerdict { campsite: &cozy, safe: true },
                CampsiteVerdict { campsite: &comfy, safe: false },
            ],
            notes: vec![],
        };

        let text = render_text(&report);
        assert!(text.contains("2018-06-04 and 2018-06-06"));
        assert!(text.contains("\nCozy Cabin\n"));
        assert!(!text.contains("Comfy Cabin"));
    }

    #[test]
    fn test_render_text_without_safe_campsites() {
        let report = SearchReport {
            search: window(),
            safe_campsites: vec![],
            verdicts: vec![],
            notes: vec![SearchNote::NoCampsites],
        };

        let text = render_text(&report);
        assert!(text.starts_with("Note: No campsites were detected."));
        assert!(text.ends_with("No campsites without gaps were present.\n"));
        assert!(!text.contains(RULE));
    }

    #[test]
    fn test_render_json() {
        let report = SearchReport {
            search: window(),
            safe_campsites: vec![],
            verdicts: vec![],
            notes: vec![SearchNote::NoCampsites],
        };

        let json = render_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["notes"], serde_json::json!(["noCampsites"]));
        assert_eq!(value["search"]["endDate"], "2018-06-06");
    }
}
