use std::fmt::Write;

use textfill_core::Outcome;
use textfill_layout::SceneReport;

/// Render a report as a fixed-width table.
pub fn table(report: &SceneReport) -> String {
    let name_width = report
        .entries
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0)
        .max("box".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  {:<7}  {:>6}  {:>5}  {:>5}  available",
        "box", "outcome", "font", "H", "W"
    );

    for entry in &report.entries {
        let element = &entry.element;
        let outcome = match element.outcome {
            Outcome::Success => "ok",
            Outcome::Failure => "FAIL",
        };
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<7}  {:>6}  {:>5}  {:>5}  {}x{}",
            entry.name,
            outcome,
            element.font_size,
            axis_fit(element.height_fit),
            axis_fit(element.width_fit),
            element.available.width,
            element.available.height,
        );
    }

    let _ = writeln!(out, "{} succeeded, {} failed", report.succeeded, report.failed);
    out
}

fn axis_fit(fit: Option<u32>) -> String {
    fit.map_or_else(|| "-".to_owned(), |px| px.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use textfill_core::{ElementReport, Size};
    use textfill_layout::SceneEntry;

    fn entry(name: &str, outcome: Outcome, height_fit: Option<u32>) -> SceneEntry {
        SceneEntry {
            name: name.to_owned(),
            id: Default::default(),
            element: ElementReport {
                index: 0,
                outcome,
                available: Size::new(200.0, 40.0),
                height_fit,
                width_fit: Some(30),
                font_size: 24.0,
                original_font_size: 16.0,
            },
        }
    }

    #[test]
    fn test_table_rows() {
        let report = SceneReport {
            entries: vec![
                entry("headline", Outcome::Success, Some(24)),
                entry("caption", Outcome::Failure, None),
            ],
            succeeded: 1,
            failed: 1,
        };
        let text = table(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("box"));
        assert!(lines[1].starts_with("headline"));
        assert!(lines[1].contains("ok"));
        assert!(lines[1].contains("200x40"));
        assert!(lines[2].contains("FAIL"));
        assert!(lines[2].contains(" - "));
        assert_eq!(lines[3], "1 succeeded, 1 failed");
    }
}
