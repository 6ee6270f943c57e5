// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Evaluates a saved checkpoint on the held-out test split:
//
//   Step 1: Check the checkpoint exists       (Layer 6 - infra)
//   Step 2: Reload tokenizer + sequence length (Layer 6 - infra)
//   Step 3: Load + tokenise test split        (Layer 4 - data)
//   Step 4: Rebuild model from checkpoint     (Layer 5 - ml)
//   Step 5: Predict and tally the results     (Layer 5 - ml)

use anyhow::{ensure, Result};

use crate::application::prepare_split;
use crate::data::{encoder::ReviewEncoder, loader::ImdbLoader};
use crate::domain::{confusion::EvaluationSummary, traits::Split};
use crate::infra::{
    checkpoint::CheckpointManager,
    hub::HubClient,
    tokenizer_store::TokenizerStore,
};
use crate::ml::{inferencer::Inferencer, InferBackend};

#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub dataset:        String,
    pub checkpoint_dir: String,
    pub batch_size:     usize,
    pub seed:           u64,
    /// Evaluate on a seeded random subset of this many reviews
    pub limit:          Option<usize>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            dataset:        "stanfordnlp/imdb".to_string(),
            checkpoint_dir: "bert_imdb_model".to_string(),
            batch_size:     16,
            seed:           42,
            limit:          None,
        }
    }
}

pub struct EvaluateUseCase {
    config: EvalConfig,
}

impl EvaluateUseCase {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<EvaluationSummary> {
        let cfg = &self.config;
        ensure!(cfg.batch_size > 0, "--batch-size must be at least 1");
        ensure!(cfg.limit != Some(0), "--limit must be at least 1");

        // ── Step 1: Fail fast before any download ─────────────────────────────
        let ckpt = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt.ensure_exists()?;

        // ── Step 2: Tokenise exactly like the training run did ────────────────
        let train_cfg = ckpt.load_train_config()?;
        let tokenizer = TokenizerStore::new(&cfg.checkpoint_dir).load()?;
        let encoder   = ReviewEncoder::new(tokenizer, train_cfg.max_seq_len)?;

        // ── Step 3: Test split ────────────────────────────────────────────────
        let source  = ImdbLoader::new(HubClient::new()?, &cfg.dataset);
        let dataset = prepare_split(&source, Split::Test, &encoder, cfg.limit, cfg.seed)?;

        // ── Step 4: Model ─────────────────────────────────────────────────────
        let device = burn::backend::wgpu::WgpuDevice::default();
        tracing::info!("Using WGPU device: {:?}", device);
        let inferencer = Inferencer::<InferBackend>::from_checkpoint(&ckpt, &device)?;

        // ── Step 5: Predict ───────────────────────────────────────────────────
        let matrix = inferencer.evaluate(dataset, cfg.batch_size)?;
        Ok(EvaluationSummary::from(matrix))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_checkpoint_fails_before_download() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = EvalConfig {
            checkpoint_dir: dir.path().join("absent").display().to_string(),
            ..EvalConfig::default()
        };

        let err = EvaluateUseCase::new(cfg).execute().unwrap_err();
        assert!(err.to_string().contains("Have you run 'train' first?"));
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let cfg = EvalConfig { batch_size: 0, ..EvalConfig::default() };
        assert!(EvaluateUseCase::new(cfg).execute().is_err());
    }
}
