// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All pipeline logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`    — fine-tunes BERT and saves a checkpoint
//   2. `evaluate` — loads the checkpoint and scores the test split
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;
pub mod report;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvaluateArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "bert-imdb-sentiment",
    version,
    about = "Fine-tune BERT for IMDB sentiment classification, then evaluate it."
)]
pub struct Cli {
    /// The subcommand to run (train or evaluate)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Evaluate(args) => run_evaluate(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Fine-tuning '{}' on '{}'", args.pretrained, args.dataset);

    let use_case = TrainUseCase::new(args.into());
    use_case.execute()?;

    println!("Model saved to '{}/'", use_case.checkpoint_dir().display());
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    use crate::application::evaluate_use_case::EvaluateUseCase;

    let summary = EvaluateUseCase::new((&args).into()).execute()?;

    println!("Test Accuracy: {:.4}", summary.accuracy);
    println!("Test Error Rate: {:.4}", summary.error_rate);
    println!();
    print!("{}", report::render_confusion_matrix(&summary.confusion_matrix));
    println!();
    print!("{}", report::render_class_metrics(&summary.confusion_matrix));

    if let Some(path) = &args.report {
        report::write_json_report(path, &summary)?;
    }
    Ok(())
}
