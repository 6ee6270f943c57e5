// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Runs a trained classifier over tokenised reviews without
// gradients. Used on the inner (non-autodiff) backend, where
// dropout is inactive, so predictions are deterministic.
//
// Predicted class = argmax over the two logits.

use anyhow::{anyhow, ensure, Result};
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    prelude::*,
};
use std::sync::Arc;

use crate::data::{
    batcher::{ReviewBatch, ReviewBatcher},
    dataset::ReviewDataset,
};
use crate::domain::{confusion::ConfusionMatrix, review::Sentiment};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::BertClassifier;

pub struct Inferencer<B: Backend> {
    model:  BertClassifier<B>,
    device: B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn new(model: BertClassifier<B>, device: B::Device) -> Self {
        Self { model, device }
    }

    /// Rebuild the architecture from `model_config.json` and load the weights.
    pub fn from_checkpoint(ckpt: &CheckpointManager, device: &B::Device) -> Result<Self> {
        ckpt.ensure_exists()?;
        let cfg   = ckpt.load_model_config()?;
        let model = ckpt.load_model(cfg.init::<B>(device), device)?;

        tracing::info!(
            "Model loaded from '{}' ({} parameters, {} layers)",
            ckpt.dir().display(), model.num_params(), cfg.num_hidden_layers,
        );
        Ok(Self::new(model, device.clone()))
    }

    /// Predicted sentiment for every row of the batch.
    pub fn predict_batch(&self, batch: ReviewBatch<B>) -> Result<Vec<Sentiment>> {
        let logits = self.model.forward(batch.input_ids, batch.attention_mask);
        // argmax(1) returns shape [batch, 1]
        let classes = logits.argmax(1).squeeze::<1>(1);
        to_sentiments(classes)
    }

    /// Classify the whole dataset in order and tally actual vs. predicted.
    pub fn evaluate(&self, dataset: ReviewDataset, batch_size: usize) -> Result<ConfusionMatrix> {
        ensure!(batch_size > 0, "Batch size must be at least 1");
        ensure!(dataset.sample_count() > 0, "The evaluation set is empty");

        let loader = eval_loader::<B>(dataset, batch_size, &self.device);

        let mut actual    = Vec::new();
        let mut predicted = Vec::new();
        for batch in loader.iter() {
            actual.extend(to_sentiments(batch.labels.clone())?);
            predicted.extend(self.predict_batch(batch)?);
        }

        let matrix = ConfusionMatrix::from_labels(&actual, &predicted)?;

        tracing::info!("Evaluated {} reviews", matrix.total());
        Ok(matrix)
    }
}

/// Evaluation batches, in dataset order.
fn eval_loader<B: Backend>(
    dataset:    ReviewDataset,
    batch_size: usize,
    device:     &B::Device,
) -> Arc<dyn DataLoader<ReviewBatch<B>>> {
    DataLoaderBuilder::new(ReviewBatcher::<B>::new(device.clone()))
        .batch_size(batch_size)
        .num_workers(1)
        .build(dataset)
}

fn to_sentiments<B: Backend>(classes: Tensor<B, 1, Int>) -> Result<Vec<Sentiment>> {
    classes
        .into_data()
        .convert::<i64>()
        .to_vec::<i64>()
        .map_err(|e| anyhow!("Cannot read class ids from tensor: {e:?}"))?
        .into_iter()
        .map(|class| Sentiment::from_index(usize::try_from(class)?))
        .collect()
}
