// ============================================================
// Layer 3 — Confusion Matrix
// ============================================================
// A 2x2 table of (actual, predicted) counts.
//
//                    predicted
//                  Negative  Positive
//   actual Negative   TN        FP
//          Positive   FN        TP
//
// Rows are actual classes, columns are predicted classes, so
// row sums are the per-class example counts of the test split.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::domain::review::Sentiment;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// counts[actual][predicted]
    counts: [[u64; 2]; 2],
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a matrix from parallel slices of actual and predicted labels.
    pub fn from_labels(actual: &[Sentiment], predicted: &[Sentiment]) -> Result<Self> {
        ensure!(
            actual.len() == predicted.len(),
            "label count ({}) does not match prediction count ({})",
            actual.len(),
            predicted.len()
        );
        let mut cm = Self::new();
        for (&a, &p) in actual.iter().zip(predicted) {
            cm.record(a, p);
        }
        Ok(cm)
    }

    pub fn record(&mut self, actual: Sentiment, predicted: Sentiment) {
        self.counts[actual.index()][predicted.index()] += 1;
    }

    pub fn count(&self, actual: Sentiment, predicted: Sentiment) -> u64 {
        self.counts[actual.index()][predicted.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    pub fn correct(&self) -> u64 {
        Sentiment::ALL.iter().map(|&s| self.count(s, s)).sum()
    }

    /// Number of examples whose true label is `actual`.
    pub fn row_sum(&self, actual: Sentiment) -> u64 {
        self.counts[actual.index()].iter().sum()
    }

    /// Number of examples the model labelled `predicted`.
    pub fn column_sum(&self, predicted: Sentiment) -> u64 {
        self.counts.iter().map(|row| row[predicted.index()]).sum()
    }

    /// Fraction of correct predictions. Zero for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.correct() as f64 / total as f64
    }

    pub fn error_rate(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        1.0 - self.accuracy()
    }

    /// TP / (TP + FP) for the given class; None when nothing was predicted as it.
    pub fn precision(&self, class: Sentiment) -> Option<f64> {
        let predicted = self.column_sum(class);
        (predicted > 0).then(|| self.count(class, class) as f64 / predicted as f64)
    }

    /// TP / (TP + FN) for the given class; None when the class never occurs.
    pub fn recall(&self, class: Sentiment) -> Option<f64> {
        let actual = self.row_sum(class);
        (actual > 0).then(|| self.count(class, class) as f64 / actual as f64)
    }

    pub fn rows(&self) -> &[[u64; 2]; 2] {
        &self.counts
    }
}

/// Final evaluation numbers, written to the optional JSON report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub examples:         u64,
    pub accuracy:         f64,
    pub error_rate:       f64,
    pub confusion_matrix: ConfusionMatrix,
}

impl From<ConfusionMatrix> for EvaluationSummary {
    fn from(cm: ConfusionMatrix) -> Self {
        Self {
            examples:         cm.total(),
            accuracy:         cm.accuracy(),
            error_rate:       cm.error_rate(),
            confusion_matrix: cm,
        }
    }
}
