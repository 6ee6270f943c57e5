// ============================================================
// Layer 5 — Pretrained Weights
// ============================================================
// Loads the `bert-base-uncased` PyTorch checkpoint into the
// Burn module tree from model.rs.
//
// PyTorch and Burn name the same tensors differently:
//
//   bert.embeddings.LayerNorm.gamma                  → embeddings.layer_norm.gamma
//   bert.encoder.layer.3.attention.self.query.weight → encoder.layers.3.attention.query.weight
//   bert.encoder.layer.3.attention.output.dense.bias → encoder.layers.3.attention.output.bias
//   bert.encoder.layer.3.attention.output.LayerNorm.* → encoder.layers.3.attention_norm.*
//   bert.encoder.layer.3.intermediate.dense.*        → encoder.layers.3.intermediate.*
//   bert.encoder.layer.3.output.dense.*              → encoder.layers.3.output.*
//   bert.encoder.layer.3.output.LayerNorm.*          → encoder.layers.3.output_norm.*
//   bert.pooler.dense.*                              → pooler.*
//
// Each pattern matches both the original PyTorch key and its
// partially renamed form. Masked-LM heads (`cls.*`) have no
// counterpart and are skipped; the classification head starts
// from random weights.
//
// Reference: burn-import PyTorchFileRecorder documentation

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, Recorder},
};
use burn_import::pytorch::{LoadArgs, PyTorchFileRecorder};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::ml::model::{BertClassifier, BertClassifierConfig, BertModelRecord};

const KEY_REMAPS: &[(&str, &str)] = &[
    (r"^bert\.", ""),
    (r"embeddings\.LayerNorm", "embeddings.layer_norm"),
    (r"encoder\.layer\.([0-9]+)", "encoder.layers.$1"),
    (r"attention\.self\.", "attention."),
    (r"attention\.output\.dense", "attention.output"),
    (r"attention\.output\.LayerNorm", "attention_norm"),
    (r"intermediate\.dense", "intermediate"),
    (r"\.output\.dense", ".output"),
    (r"\.output\.LayerNorm", ".output_norm"),
    (r"pooler\.dense", "pooler"),
    // Newer exports use weight/bias for LayerNorm; Burn calls them gamma/beta.
    (r"(LayerNorm|_norm)\.weight$", "$1.gamma"),
    (r"(LayerNorm|_norm)\.bias$", "$1.beta"),
];

/// The subset of a Hugging Face BERT `config.json` the model needs.
#[derive(Debug, Clone, Deserialize)]
pub struct PretrainedBertConfig {
    pub vocab_size:              usize,
    pub hidden_size:             usize,
    pub num_hidden_layers:       usize,
    pub num_attention_heads:     usize,
    pub intermediate_size:       usize,
    pub max_position_embeddings: usize,
    pub type_vocab_size:         usize,
    #[serde(default = "default_layer_norm_eps")]
    pub layer_norm_eps:          f64,
    #[serde(default = "default_dropout")]
    pub hidden_dropout_prob:     f64,
    #[serde(default = "default_dropout")]
    pub attention_probs_dropout_prob: f64,
}

fn default_layer_norm_eps() -> f64 { 1e-12 }
fn default_dropout() -> f64 { 0.1 }

impl PretrainedBertConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read model config '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a BERT config", path.display()))
    }

    /// Architecture for a classifier with `num_labels` outputs on top.
    pub fn classifier_config(&self, num_labels: usize) -> BertClassifierConfig {
        BertClassifierConfig::new(
            self.vocab_size,
            self.hidden_size,
            self.num_hidden_layers,
            self.num_attention_heads,
            self.intermediate_size,
            self.max_position_embeddings,
            self.type_vocab_size,
        )
        .with_layer_norm_eps(self.layer_norm_eps)
        .with_hidden_dropout_prob(self.hidden_dropout_prob)
        .with_attention_probs_dropout_prob(self.attention_probs_dropout_prob)
        .with_num_labels(num_labels)
    }
}

/// Load pretrained encoder weights from a PyTorch `.bin` file into `model`.
pub fn load_pretrained_encoder<B: Backend>(
    model:   BertClassifier<B>,
    weights: &Path,
    device:  &B::Device,
) -> Result<BertClassifier<B>> {
    let args = KEY_REMAPS
        .iter()
        .fold(LoadArgs::new(weights.to_path_buf()), |args, (pattern, replacement)| {
            args.with_key_remap(pattern, replacement)
        });

    let record: BertModelRecord<B> = PyTorchFileRecorder::<FullPrecisionSettings>::default()
        .load(args, device)
        .with_context(|| format!("Cannot load pretrained weights from '{}'", weights.display()))?;

    tracing::info!("Pretrained encoder weights loaded from '{}'", weights.display());
    Ok(model.with_encoder_record(record))
}
