// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Fine-tunes the classifier with Burn's DataLoader and plain SGD.
//
// Per epoch:
//   - the loader reshuffles the training set (seeded)
//   - every batch: forward → cross-entropy → backward → SGD step
//   - the mean batch loss is printed and recorded
//
// There is no validation phase: the held-out split is only
// touched by the `evaluate` command.
//
// Reference: Burn Book §5 (Custom Training Loop)

use anyhow::{ensure, Result};
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    optim::{GradientsParams, Optimizer, SgdConfig},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

use crate::application::train_use_case::TrainConfig;
use crate::data::{
    batcher::{ReviewBatch, ReviewBatcher},
    dataset::ReviewDataset,
};
use crate::infra::metrics::EpochMetrics;
use crate::ml::model::BertClassifier;

const PROGRESS_TEMPLATE: &str =
    "epoch {prefix} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} batches ({eta})";

/// Train `model` for `cfg.epochs` epochs and return it with the per-epoch losses.
pub fn run_training<B: AutodiffBackend>(
    cfg:     &TrainConfig,
    model:   BertClassifier<B>,
    dataset: ReviewDataset,
    device:  &B::Device,
) -> Result<(BertClassifier<B>, Vec<EpochMetrics>)> {
    ensure!(dataset.sample_count() > 0, "The training set is empty");
    ensure!(cfg.batch_size > 0, "Batch size must be at least 1");

    let mut model = model;
    let mut optim = SgdConfig::new().init();

    let loader = train_loader::<B>(cfg, dataset, device);
    let batches_per_epoch = loader.num_items().div_ceil(cfg.batch_size);
    tracing::info!(
        "Training on {} reviews ({} batches/epoch) for {} epochs, lr={}",
        loader.num_items(), batches_per_epoch, cfg.epochs, cfg.lr,
    );

    let style   = ProgressStyle::with_template(PROGRESS_TEMPLATE)?.progress_chars("=>-");
    let mut log = Vec::with_capacity(cfg.epochs);

    for epoch in 1..=cfg.epochs {
        let progress = ProgressBar::new(batches_per_epoch as u64)
            .with_style(style.clone())
            .with_prefix(format!("{epoch}/{}", cfg.epochs));

        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        for batch in loader.iter() {
            let (loss, _) = model.forward_loss(
                batch.input_ids,
                batch.attention_mask,
                batch.labels,
            );

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            ensure!(loss_val.is_finite(), "Loss diverged in epoch {epoch} (batch {})", batches + 1);
            loss_sum += loss_val;
            batches  += 1;

            // θ = θ - lr * ∇θ
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);

            progress.inc(1);
        }
        progress.finish_and_clear();

        ensure!(batches > 0, "Epoch {epoch} produced no batches");
        let avg_loss = loss_sum / batches as f64;

        println!("Epoch {}, Average Loss: {:.4}", epoch, avg_loss);
        log.push(EpochMetrics::new(epoch, avg_loss, batches));
    }

    tracing::info!("Training complete!");
    Ok((model, log))
}

/// Training batches. Every call to `iter()` draws a fresh seeded
/// permutation, so each epoch sees the reviews in a new order.
fn train_loader<B: Backend>(
    cfg:     &TrainConfig,
    dataset: ReviewDataset,
    device:  &B::Device,
) -> Arc<dyn DataLoader<ReviewBatch<B>>> {
    DataLoaderBuilder::new(ReviewBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(dataset)
}
