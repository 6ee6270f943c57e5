// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full fine-tuning pipeline in order:
//
//   Step 1: Fetch pretrained BERT files   (Layer 6 - infra)
//   Step 2: Build the fixed-length encoder (Layer 4 - data)
//   Step 3: Load + tokenise train split   (Layer 4 - data)
//   Step 4: Build model, load weights     (Layer 5 - ml)
//   Step 5: Run training loop             (Layer 5 - ml)
//   Step 6: Save the checkpoint           (Layer 6 - infra)
//
// Reference: Burn Book §5 (Training)

use anyhow::{ensure, Result};
use burn::module::AutodiffModule;
use burn::prelude::Backend;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::prepare_split;
use crate::data::{encoder::ReviewEncoder, loader::ImdbLoader};
use crate::domain::{review::Sentiment, traits::Split};
use crate::infra::{
    checkpoint::CheckpointManager,
    hub::HubClient,
    metrics::{EpochMetrics, MetricsLogger},
    tokenizer_store::TokenizerStore,
};
use crate::ml::{
    pretrained::{load_pretrained_encoder, PretrainedBertConfig},
    trainer::run_training,
    TrainBackend,
};

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run.
// Saved as train_config.json next to the weights; evaluation
// reads max_seq_len back from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub dataset:        String,
    pub pretrained:     String,
    pub checkpoint_dir: String,
    pub max_seq_len:    usize,
    pub batch_size:     usize,
    pub epochs:         usize,
    pub lr:             f64,
    pub seed:           u64,
    /// Train on a seeded random subset of this many reviews
    pub limit:          Option<usize>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset:        "stanfordnlp/imdb".to_string(),
            pretrained:     "bert-base-uncased".to_string(),
            checkpoint_dir: "bert_imdb_model".to_string(),
            max_seq_len:    128,
            batch_size:     16,
            epochs:         2,
            lr:             0.01,
            seed:           42,
            limit:          None,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.epochs > 0, "--epochs must be at least 1");
        ensure!(self.batch_size > 0, "--batch-size must be at least 1");
        // [CLS] and [SEP] alone take two positions
        ensure!(self.max_seq_len >= 2, "--max-seq-len must be at least 2");
        ensure!(self.lr > 0.0 && self.lr.is_finite(), "--lr must be a positive number");
        ensure!(self.limit != Some(0), "--limit must be at least 1");
        Ok(())
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Where the checkpoint of this run ends up
    pub fn checkpoint_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.checkpoint_dir)
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<Vec<EpochMetrics>> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Pretrained config, tokenizer and weights ──────────────────
        // Downloaded into the hub cache on the first run only
        let hub   = HubClient::new()?;
        let files = hub.pretrained(&cfg.pretrained)?;

        // ── Step 2: Tokenizer with fixed padding + truncation ─────────────────
        let tokenizer = TokenizerStore::from_file(&files.tokenizer)?;
        let encoder   = ReviewEncoder::new(tokenizer, cfg.max_seq_len)?;

        // ── Step 3: Training split ────────────────────────────────────────────
        let source  = ImdbLoader::new(hub, &cfg.dataset);
        let dataset = prepare_split(&source, Split::Train, &encoder, cfg.limit, cfg.seed)?;

        // ── Step 4: Model ─────────────────────────────────────────────────────
        // Encoder weights come from the pretrained checkpoint; the
        // classification head starts from random initialisation.
        let model_cfg = PretrainedBertConfig::from_file(&files.config)?
            .classifier_config(Sentiment::ALL.len());
        ensure!(
            cfg.max_seq_len <= model_cfg.max_position_embeddings,
            "--max-seq-len {} exceeds the model's {} position embeddings",
            cfg.max_seq_len, model_cfg.max_position_embeddings,
        );

        let device = burn::backend::wgpu::WgpuDevice::default();
        tracing::info!("Using WGPU device: {:?}", device);
        TrainBackend::seed(cfg.seed);

        let model = model_cfg.init::<TrainBackend>(&device);
        let model = load_pretrained_encoder(model, &files.weights, &device)?;

        // ── Step 5: Fine-tune ─────────────────────────────────────────────────
        let (model, epochs) = run_training(cfg, model, dataset, &device)?;

        // ── Step 6: Save everything evaluation needs ──────────────────────────
        let ckpt = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt.save_model(&model.valid())?;
        ckpt.save_model_config(&model_cfg)?;
        ckpt.save_train_config(cfg)?;
        TokenizerStore::new(&cfg.checkpoint_dir).save(encoder.tokenizer())?;
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir);
        metrics.write_all(&epochs)?;
        tracing::info!("Epoch losses written to '{}'", metrics.csv_path().display());

        tracing::info!("Checkpoint written to '{}'", ckpt.dir().display());
        Ok(epochs)
    }
}
