// ============================================================
// Layer 4 — Review Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec of
// TokenizedReview into tensors on the target device.
//
//   Input:  N samples, each with sequences of length S
//   Output: ReviewBatch with [N, S] id/mask tensors and [N] labels
//
// Every sample is already padded to the same length by the
// encoder, so stacking is a flatten + reshape.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::TokenizedReview;

// ─── ReviewBatch ──────────────────────────────────────────────────────────────
/// A batch of reviews ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct ReviewBatch<B: Backend> {
    /// Token ID sequences — shape: [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// Attention masks — shape: [batch_size, seq_len]
    /// 1 = real token, 0 = padding
    pub attention_mask: Tensor<B, 2, Int>,

    /// Class indices — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── ReviewBatcher ────────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct ReviewBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ReviewBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<TokenizedReview, ReviewBatch<B>> for ReviewBatcher<B> {
    fn batch(&self, items: Vec<TokenizedReview>) -> ReviewBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.first().map_or(0, TokenizedReview::seq_len);

        let ids_flat: Vec<i64> = items
            .iter()
            .flat_map(|s| s.input_ids().iter().map(|&x| i64::from(x)))
            .collect();

        let mask_flat: Vec<i64> = items
            .iter()
            .flat_map(|s| s.attention_mask().iter().map(|&x| i64::from(x)))
            .collect();

        let labels: Vec<i64> = items
            .iter()
            .map(|s| s.label().index() as i64)
            .collect();

        let input_ids = Tensor::<B, 2, Int>::from_data(
            TensorData::new(ids_flat, [batch_size, seq_len]),
            &self.device,
        );
        let attention_mask = Tensor::<B, 2, Int>::from_data(
            TensorData::new(mask_flat, [batch_size, seq_len]),
            &self.device,
        );
        let labels = Tensor::<B, 1, Int>::from_data(
            TensorData::new(labels, [batch_size]),
            &self.device,
        );

        ReviewBatch { input_ids, attention_mask, labels }
    }
}
