// ============================================================
// Layer 6 — Hugging Face Hub Client
// ============================================================
// Thin wrapper over hf-hub's blocking API. Files are downloaded
// once into the shared hub cache (~/.cache/huggingface/hub, or
// $HF_HOME) and served from there on later runs.
//
// Reference: hf-hub crate documentation

use anyhow::{Context, Result};
use hf_hub::api::sync::Api;
use std::path::PathBuf;

pub struct HubClient {
    api: Api,
}

/// Local paths of everything needed to start fine-tuning.
#[derive(Debug, Clone)]
pub struct PretrainedFiles {
    pub config:    PathBuf,
    pub tokenizer: PathBuf,
    pub weights:   PathBuf,
}

impl HubClient {
    pub fn new() -> Result<Self> {
        let api = Api::new().context("Cannot initialise the Hugging Face Hub client")?;
        Ok(Self { api })
    }

    /// Fetch one file from a model repository, e.g. `bert-base-uncased`.
    pub fn model_file(&self, repo_id: &str, file: &str) -> Result<PathBuf> {
        tracing::debug!("Fetching '{}' from model '{}'", file, repo_id);
        self.api
            .model(repo_id.to_string())
            .get(file)
            .with_context(|| format!("Cannot fetch '{file}' from model '{repo_id}'"))
    }

    /// Fetch one file from a dataset repository, e.g. `stanfordnlp/imdb`.
    pub fn dataset_file(&self, repo_id: &str, file: &str) -> Result<PathBuf> {
        tracing::debug!("Fetching '{}' from dataset '{}'", file, repo_id);
        self.api
            .dataset(repo_id.to_string())
            .get(file)
            .with_context(|| format!("Cannot fetch '{file}' from dataset '{repo_id}'"))
    }

    pub fn pretrained(&self, repo_id: &str) -> Result<PretrainedFiles> {
        let files = PretrainedFiles {
            config:    self.model_file(repo_id, "config.json")?,
            tokenizer: self.model_file(repo_id, "tokenizer.json")?,
            weights:   self.model_file(repo_id, "pytorch_model.bin")?,
        };
        tracing::info!("Pretrained model '{}' available locally", repo_id);
        Ok(files)
    }
}
