// ============================================================
// Layer 1 — Evaluation Report Rendering
// ============================================================
// Turns an EvaluationSummary into terminal output and an
// optional JSON file.
//
// The confusion matrix is drawn as a heatmap: every cell is
// shaded on a blue scale by its share of the largest count,
// with the count printed in the middle.
//
//                        Predicted
//                    Negative  Positive
//   Actual Negative    11873       627
//          Positive      912     11588

use anyhow::{Context, Result};
use colored::*;
use std::{fs, path::Path};

use crate::domain::{
    confusion::{ConfusionMatrix, EvaluationSummary},
    review::Sentiment,
};

const CELL_WIDTH:  usize = 10;
const LABEL_WIDTH: usize = 16;

// Light and dark ends of the "Blues" colour scale
const BLUE_LIGHT: (u8, u8, u8) = (247, 251, 255);
const BLUE_DARK:  (u8, u8, u8) = (8, 48, 107);

/// Colour for `intensity` in [0, 1]: 0 = near white, 1 = dark blue.
pub fn blues(intensity: f64) -> (u8, u8, u8) {
    let t = if intensity.is_finite() { intensity.clamp(0.0, 1.0) } else { 0.0 };
    let mix = |light: u8, dark: u8| -> u8 {
        (light as f64 + (dark as f64 - light as f64) * t).round() as u8
    };
    (
        mix(BLUE_LIGHT.0, BLUE_DARK.0),
        mix(BLUE_LIGHT.1, BLUE_DARK.1),
        mix(BLUE_LIGHT.2, BLUE_DARK.2),
    )
}

pub fn render_confusion_matrix(cm: &ConfusionMatrix) -> String {
    let max = cm.rows().iter().flatten().copied().max().unwrap_or(0);
    let mut out = String::new();

    out.push_str(&format!("{}\n", "Confusion Matrix".bold()));
    out.push_str(&format!(
        "{:LABEL_WIDTH$}{:^width$}\n",
        "", "Predicted".bold(), width = CELL_WIDTH * Sentiment::ALL.len(),
    ));
    out.push_str(&format!("{:LABEL_WIDTH$}", ""));
    for predicted in Sentiment::ALL {
        out.push_str(&format!("{:^CELL_WIDTH$}", predicted.name()));
    }
    out.push('\n');

    for (row, actual) in Sentiment::ALL.into_iter().enumerate() {
        let prefix = if row == 0 { "Actual" } else { "" };
        out.push_str(&format!("{:<7}{:<9}", prefix.bold(), actual.name()));

        for predicted in Sentiment::ALL {
            let count     = cm.count(actual, predicted);
            let intensity = if max == 0 { 0.0 } else { count as f64 / max as f64 };
            let (r, g, b) = blues(intensity);
            let text = format!("{:^CELL_WIDTH$}", count);
            // Dark cells get white text, light cells black
            let cell = if intensity > 0.5 {
                text.truecolor(255, 255, 255).on_truecolor(r, g, b)
            } else {
                text.truecolor(0, 0, 0).on_truecolor(r, g, b)
            };
            out.push_str(&cell.to_string());
        }
        out.push('\n');
    }
    out
}

/// One line per class, e.g. `Positive  precision 0.9487  recall 0.9270`.
pub fn render_class_metrics(cm: &ConfusionMatrix) -> String {
    let fmt = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |x| format!("{x:.4}"));

    Sentiment::ALL
        .into_iter()
        .map(|class| {
            format!(
                "{:<9} precision {}  recall {}\n",
                class.name(), fmt(cm.precision(class)), fmt(cm.recall(class)),
            )
        })
        .collect()
}

/// Write the summary as pretty JSON, creating parent directories.
pub fn write_json_report(path: &Path, summary: &EvaluationSummary) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json).with_context(|| format!("Cannot write report '{}'", path.display()))?;
    tracing::info!("Evaluation report written to '{}'", path.display());
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use Sentiment::{Negative as N, Positive as P};

    fn strip_ansi(s: &str) -> String {
        regex::Regex::new("\x1b\\[[0-9;]*m").unwrap().replace_all(s, "").into_owned()
    }

    fn sample_matrix() -> ConfusionMatrix {
        let actual    = [N, N, N, P, P, P, P];
        let predicted = [N, N, P, P, P, P, N];
        ConfusionMatrix::from_labels(&actual, &predicted).unwrap()
    }

    #[test]
    fn test_blues_endpoints() {
        assert_eq!(blues(0.0), BLUE_LIGHT);
        assert_eq!(blues(1.0), BLUE_DARK);
        assert_eq!(blues(7.5), BLUE_DARK);
        assert_eq!(blues(f64::NAN), BLUE_LIGHT);
    }

    #[test]
    fn test_blues_darkens_monotonically() {
        let (_, g1, _) = blues(0.25);
        let (_, g2, _) = blues(0.75);
        assert!(g2 < g1);
    }

    #[test]
    fn test_matrix_shows_labels_and_counts() {
        let text = strip_ansi(&render_confusion_matrix(&sample_matrix()));
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].contains("Confusion Matrix"));
        assert!(lines[1].contains("Predicted"));
        assert!(lines[2].contains("Negative") && lines[2].contains("Positive"));

        // Row "Actual Negative": 2 correct, 1 predicted positive
        let neg_row: Vec<&str> = lines[3].split_whitespace().collect();
        assert_eq!(neg_row, vec!["Actual", "Negative", "2", "1"]);
        let pos_row: Vec<&str> = lines[4].split_whitespace().collect();
        assert_eq!(pos_row, vec!["Positive", "1", "3"]);
    }

    #[test]
    fn test_empty_matrix_renders() {
        let text = strip_ansi(&render_confusion_matrix(&ConfusionMatrix::new()));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_class_metrics_lines() {
        let text = render_class_metrics(&sample_matrix());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        // Negative: precision 2/3, recall 2/3
        assert!(lines[0].starts_with("Negative"));
        assert!(lines[0].contains("precision 0.6667"));
        // Positive: precision 3/4, recall 3/4
        assert!(lines[1].contains("recall 0.7500"));

        let none = render_class_metrics(&ConfusionMatrix::new());
        assert!(none.contains("n/a"));
    }

    #[test]
    fn test_json_report_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/eval.json");
        let summary = EvaluationSummary::from(sample_matrix());
        write_json_report(&path, &summary).unwrap();

        let back: EvaluationSummary =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.examples, 7);
        assert_eq!(back.confusion_matrix, sample_matrix());
        assert!((back.accuracy - 5.0 / 7.0).abs() < 1e-12);
    }
}
