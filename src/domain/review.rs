// ============================================================
// Layer 3 — Review Domain Types
// ============================================================
// A review is raw text plus one of exactly two labels.
// The dataset stores labels as integers (0 = negative,
// 1 = positive); anything else is rejected at the boundary
// so the rest of the pipeline can rely on the enum.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Binary sentiment class. The discriminant is the class index
/// used by the classifier head and the dataset label column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Negative = 0,
    Positive = 1,
}

impl Sentiment {
    /// Both classes in index order.
    pub const ALL: [Sentiment; 2] = [Sentiment::Negative, Sentiment::Positive];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Map a class index (e.g. an argmax result) back to a label.
    pub fn from_index(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Sentiment::Negative),
            1 => Ok(Sentiment::Positive),
            other => bail!("class index {other} is not a sentiment (expected 0 or 1)"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative",
            Sentiment::Positive => "Positive",
        }
    }
}

impl TryFrom<i64> for Sentiment {
    type Error = anyhow::Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Sentiment::Negative),
            1 => Ok(Sentiment::Positive),
            other => bail!("label {other} is not a sentiment (expected 0 or 1)"),
        }
    }
}

/// One labelled movie review, exactly as read from the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub text:  String,
    pub label: Sentiment,
}

impl Review {
    pub fn new(text: impl Into<String>, label: Sentiment) -> Self {
        Self { text: text.into(), label }
    }
}
