// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// one goal each: fine-tune a model, or evaluate a checkpoint.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing of results here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

use anyhow::{ensure, Result};

use crate::data::{dataset::ReviewDataset, encoder::ReviewEncoder, sampler::subsample};
use crate::domain::traits::{ReviewSource, Split};

/// The fine-tuning workflow
pub mod train_use_case;

/// The test-set evaluation workflow
pub mod evaluate_use_case;

/// Load one split, optionally subsample it, and tokenise it.
/// Shared by both workflows so train and test are prepared identically.
pub fn prepare_split(
    source:  &dyn ReviewSource,
    split:   Split,
    encoder: &ReviewEncoder,
    limit:   Option<usize>,
    seed:    u64,
) -> Result<ReviewDataset> {
    let reviews = source.load_split(split)?;
    let total   = reviews.len();
    let reviews = subsample(reviews, limit, seed);
    ensure!(!reviews.is_empty(), "The {} split contains no reviews", split.name());

    if reviews.len() < total {
        tracing::info!("Using a random subset of {} of {} {} reviews", reviews.len(), total, split.name());
    }

    let dataset = ReviewDataset::new(encoder.encode_all(&reviews)?);
    let [neg, pos] = dataset.class_counts();
    tracing::info!(
        "Tokenised {} {} reviews ({} negative, {} positive, max_seq_len={})",
        dataset.sample_count(), split.name(), neg, pos, encoder.max_seq_len(),
    );
    tracing::debug!(
        "{} reviews fill all {} positions (possibly truncated)",
        dataset.full_length_count(), encoder.max_seq_len(),
    );
    Ok(dataset)
}
