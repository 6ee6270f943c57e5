// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores the fine-tuned classifier.
//
// Checkpoint directory layout:
//   bert_imdb_model/
//     model.mpk.gz        ← all learned parameters
//     model_config.json   ← architecture, to rebuild the model
//     train_config.json   ← the run's hyperparameters
//     tokenizer.json      ← written by TokenizerStore
//     metrics.csv         ← written by MetricsLogger
//
// Weights are stored as gzip'd MessagePack at full precision,
// so a reloaded model reproduces the saved one's logits.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{bail, Context, Result};
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkGzFileRecorder, Recorder},
};
use std::{fs, path::{Path, PathBuf}};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::{BertClassifier, BertClassifierConfig};

type CheckpointRecorder = NamedMpkGzFileRecorder<FullPrecisionSettings>;

const MODEL_FILE:        &str = "model";
const MODEL_CONFIG_FILE: &str = "model_config.json";
const TRAIN_CONFIG_FILE: &str = "train_config.json";

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Point at a checkpoint directory. Nothing is created until a save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Fail early with a helpful message when evaluating before training.
    pub fn ensure_exists(&self) -> Result<()> {
        if !self.dir.is_dir() {
            bail!(
                "Checkpoint directory '{}' does not exist. Have you run 'train' first?",
                self.dir.display()
            );
        }
        Ok(())
    }

    fn create_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create checkpoint directory '{}'", self.dir.display()))
    }

    pub fn save_model<B: Backend>(&self, model: &BertClassifier<B>) -> Result<()> {
        self.create_dir()?;
        // Without extension — the recorder adds .mpk.gz
        let path = self.dir.join(MODEL_FILE);

        CheckpointRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save checkpoint to '{}'", path.display()))?;

        tracing::debug!("Saved model weights to '{}'", path.display());
        Ok(())
    }

    /// Load saved weights into `model`, which must have the saved architecture.
    pub fn load_model<B: Backend>(
        &self,
        model:  BertClassifier<B>,
        device: &B::Device,
    ) -> Result<BertClassifier<B>> {
        let path = self.dir.join(MODEL_FILE);

        let record = CheckpointRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display())
            })?;

        Ok(model.load_record(record))
    }

    pub fn save_model_config(&self, cfg: &BertClassifierConfig) -> Result<()> {
        self.write_json(MODEL_CONFIG_FILE, &serde_json::to_string_pretty(cfg)?)
    }

    pub fn load_model_config(&self) -> Result<BertClassifierConfig> {
        Ok(serde_json::from_str(&self.read_json(MODEL_CONFIG_FILE)?)?)
    }

    pub fn save_train_config(&self, cfg: &TrainConfig) -> Result<()> {
        self.write_json(TRAIN_CONFIG_FILE, &serde_json::to_string_pretty(cfg)?)
    }

    pub fn load_train_config(&self) -> Result<TrainConfig> {
        Ok(serde_json::from_str(&self.read_json(TRAIN_CONFIG_FILE)?)?)
    }

    fn write_json(&self, name: &str, json: &str) -> Result<()> {
        self.create_dir()?;
        let path = self.dir.join(name);
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Saved '{}'", path.display());
        Ok(())
    }

    fn read_json(&self, name: &str) -> Result<String> {
        let path = self.dir.join(name);
        fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read '{}'. Make sure you have run 'train' before 'evaluate'.",
                path.display()
            )
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use burn::backend::NdArray;
    use burn::data::dataloader::batcher::Batcher;
    use crate::data::batcher::ReviewBatcher;
    use crate::test_support::{sample_tokenized, tiny_bert_config};

    type TestBackend = NdArray;

    fn logits(model: &BertClassifier<TestBackend>) -> Vec<f32> {
        let batch = ReviewBatcher::<TestBackend>::new(Default::default()).batch(sample_tokenized());
        model
            .forward(batch.input_ids, batch.attention_mask)
            .into_data()
            .convert::<f32>()
            .to_vec()
            .unwrap()
    }

    #[test]
    fn test_reload_reproduces_logits() {
        let dir    = tempfile::tempdir().unwrap();
        let ckpt   = CheckpointManager::new(dir.path().join("ckpt"));
        let device = Default::default();
        let cfg    = tiny_bert_config();

        let trained: BertClassifier<TestBackend> = cfg.init(&device);
        ckpt.save_model(&trained).unwrap();
        ckpt.save_model_config(&cfg).unwrap();

        let cfg_back = ckpt.load_model_config().unwrap();
        let fresh: BertClassifier<TestBackend> = cfg_back.init(&device);
        let reloaded = ckpt.load_model(fresh, &device).unwrap();

        let before = logits(&trained);
        let after  = logits(&reloaded);
        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(&after) {
            assert_abs_diff_eq!(b, a, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_train_config_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());
        let cfg  = TrainConfig { epochs: 3, limit: Some(100), ..TrainConfig::default() };
        ckpt.save_train_config(&cfg).unwrap();

        let back = ckpt.load_train_config().unwrap();
        assert_eq!(back.epochs, 3);
        assert_eq!(back.limit, Some(100));
        assert_eq!(back.max_seq_len, 128);
    }

    #[test]
    fn test_missing_checkpoint_is_reported() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path().join("never-trained"));
        assert!(ckpt.ensure_exists().is_err());
        assert!(ckpt.load_model_config().is_err());
    }
}
