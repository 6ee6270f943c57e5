// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `train` and `evaluate`, and all
// their configurable flags. Defaults reproduce the reference
// fine-tuning run: bert-base-uncased, 128 tokens, batch 16,
// 2 epochs of SGD at lr 0.01.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::{evaluate_use_case::EvalConfig, train_use_case::TrainConfig};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fine-tune BERT on the IMDB training split and save a checkpoint
    Train(TrainArgs),

    /// Evaluate a saved checkpoint on the IMDB test split
    Evaluate(EvaluateArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Hugging Face Hub dataset with `text`/`label` parquet splits
    #[arg(long, default_value = "stanfordnlp/imdb")]
    pub dataset: String,

    /// Hugging Face Hub model to start from
    #[arg(long, default_value = "bert-base-uncased")]
    pub pretrained: String,

    /// Directory to save the fine-tuned model and tokenizer
    #[arg(long, default_value = "bert_imdb_model")]
    pub checkpoint_dir: String,

    /// Tokens per review after padding/truncation, [CLS] and [SEP] included
    #[arg(long, default_value_t = 128)]
    pub max_seq_len: usize,

    #[arg(long, default_value_t = 16)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 2)]
    pub epochs: usize,

    /// SGD learning rate
    #[arg(long, default_value_t = 0.01)]
    pub lr: f64,

    /// Seed for shuffling, subsampling and head initialisation
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Train on a random subset of this many reviews
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            dataset:        a.dataset,
            pretrained:     a.pretrained,
            checkpoint_dir: a.checkpoint_dir,
            max_seq_len:    a.max_seq_len,
            batch_size:     a.batch_size,
            epochs:         a.epochs,
            lr:             a.lr,
            seed:           a.seed,
            limit:          a.limit,
        }
    }
}

/// All arguments for the `evaluate` command
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[arg(long, default_value = "stanfordnlp/imdb")]
    pub dataset: String,

    /// Directory written by `train`
    #[arg(long, default_value = "bert_imdb_model")]
    pub checkpoint_dir: String,

    #[arg(long, default_value_t = 16)]
    pub batch_size: usize,

    /// Seed for subsampling with --limit
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Evaluate on a random subset of this many reviews
    #[arg(long)]
    pub limit: Option<usize>,

    /// Also write accuracy, error rate and the confusion matrix as JSON
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl From<&EvaluateArgs> for EvalConfig {
    fn from(a: &EvaluateArgs) -> Self {
        EvalConfig {
            dataset:        a.dataset.clone(),
            checkpoint_dir: a.checkpoint_dir.clone(),
            batch_size:     a.batch_size,
            seed:           a.seed,
            limit:          a.limit,
        }
    }
}
