// ============================================================
// Layer 4 — Review Dataset
// ============================================================
// Implements Burn's Dataset trait over tokenised reviews so the
// DataLoader can call .get(index) and .len() on it.
//
// Reference: Burn Book §4 (Datasets)

use anyhow::{ensure, Result};
use burn::data::dataset::Dataset;

use crate::domain::review::Sentiment;

/// One review after tokenisation.
/// Sequence format: [CLS] review tokens [SEP] [PAD]...
///
/// Both sequences always have exactly the encoder's max length;
/// `new` refuses anything else.
#[derive(Debug, Clone)]
pub struct TokenizedReview {
    input_ids:      Vec<u32>,
    attention_mask: Vec<u32>,
    label:          Sentiment,
}

impl TokenizedReview {
    pub fn new(
        input_ids:      Vec<u32>,
        attention_mask: Vec<u32>,
        label:          Sentiment,
        max_seq_len:    usize,
    ) -> Result<Self> {
        ensure!(
            input_ids.len() == max_seq_len && attention_mask.len() == max_seq_len,
            "tokenised review has {} ids and {} mask entries, expected {}",
            input_ids.len(),
            attention_mask.len(),
            max_seq_len
        );
        Ok(Self { input_ids, attention_mask, label })
    }

    pub fn input_ids(&self) -> &[u32] { &self.input_ids }

    pub fn attention_mask(&self) -> &[u32] { &self.attention_mask }

    pub fn label(&self) -> Sentiment { self.label }

    pub fn seq_len(&self) -> usize { self.input_ids.len() }

    /// Number of real (non-padding) tokens, [CLS] and [SEP] included.
    pub fn real_tokens(&self) -> usize {
        self.attention_mask.iter().filter(|&&m| m == 1).count()
    }
}

pub struct ReviewDataset {
    samples: Vec<TokenizedReview>,
}

impl ReviewDataset {
    pub fn new(samples: Vec<TokenizedReview>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }

    /// Per-class example counts, indexed by `Sentiment::index`.
    pub fn class_counts(&self) -> [usize; 2] {
        let mut counts = [0usize; 2];
        for s in &self.samples {
            counts[s.label().index()] += 1;
        }
        counts
    }

    /// Reviews with no padding left: they either fit exactly or were cut
    /// off at max_seq_len.
    pub fn full_length_count(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| s.real_tokens() == s.seq_len())
            .count()
    }
}

impl Dataset<TokenizedReview> for ReviewDataset {
    fn get(&self, index: usize) -> Option<TokenizedReview> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
