// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records the average training loss of every epoch to a CSV
// file in the checkpoint directory, so a run's learning curve
// survives after the terminal output is gone.
//
// Example CSV output:
//   epoch,avg_loss,batches
//   1,0.412345,1563
//   2,0.254321,1563
//
// The file is rewritten from scratch for every training run,
// like the rest of the checkpoint.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Mean cross-entropy over all training batches of the epoch
    pub avg_loss: f64,

    /// Number of batches the average was taken over
    pub batches: usize,
}

impl EpochMetrics {
    pub fn new(epoch: usize, avg_loss: f64, batches: usize) -> Self {
        Self { epoch, avg_loss, batches }
    }
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { csv_path: dir.into().join("metrics.csv") }
    }

    /// Write the header plus one row per epoch, replacing any old file.
    pub fn write_all(&self, epochs: &[EpochMetrics]) -> Result<()> {
        if let Some(parent) = self.csv_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.csv_path)
            .with_context(|| format!("Cannot create '{}'", self.csv_path.display()))?;
        let mut f = BufWriter::new(file);

        writeln!(f, "epoch,avg_loss,batches")?;
        for m in epochs {
            writeln!(f, "{},{:.6},{}", m.epoch, m.avg_loss, m.batches)?;
        }
        f.flush()?;

        tracing::debug!("Logged {} epochs to '{}'", epochs.len(), self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_header_and_rows() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path());
        logger
            .write_all(&[EpochMetrics::new(1, 0.6931, 10), EpochMetrics::new(2, 0.5, 10)])
            .unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["epoch,avg_loss,batches", "1,0.693100,10", "2,0.500000,10"]);
    }

    #[test]
    fn test_rewrite_replaces_previous_run() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path());
        logger.write_all(&[EpochMetrics::new(1, 1.0, 3), EpochMetrics::new(2, 0.9, 3)]).unwrap();
        logger.write_all(&[EpochMetrics::new(1, 0.7, 3)]).unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        assert_eq!(csv.lines().count(), 2);
    }
}
