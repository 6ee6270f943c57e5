// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Saves the fine-tuning tokenizer next to the model weights and
// loads it back for evaluation. The saved JSON carries the
// padding/truncation settings, so evaluation tokenises exactly
// like training did.

use anyhow::{anyhow, Context, Result};
use std::{fs, path::{Path, PathBuf}};
use tokenizers::Tokenizer;

const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKENIZER_FILE)
    }

    /// Load the tokenizer saved with a checkpoint
    pub fn load(&self) -> Result<Tokenizer> {
        Self::from_file(&self.path())
    }

    pub fn save(&self, tokenizer: &Tokenizer) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.path();
        tokenizer
            .save(&path, true)
            .map_err(|e| anyhow!("Cannot write tokenizer to '{}': {}", path.display(), e))?;

        tracing::debug!("Saved tokenizer to '{}'", path.display());
        Ok(())
    }

    /// Load any `tokenizer.json`, e.g. the pretrained one from the hub cache.
    pub fn from_file(path: &Path) -> Result<Tokenizer> {
        Tokenizer::from_file(path)
            .map_err(|e| anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e))
    }
}
