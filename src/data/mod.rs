// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the Hub parquet shards and the tensor
// batches the model consumes:
//
//   parquet shard (text, label)
//       │
//       ▼
//   ImdbLoader        → reads rows into Review records
//       │
//       ▼
//   subsample         → optional seeded subset for quick runs
//       │
//       ▼
//   ReviewEncoder     → fixed-length ids + attention mask
//       │
//       ▼
//   ReviewDataset     → implements Burn's Dataset trait
//       │
//       ▼
//   ReviewBatcher     → stacks samples into tensor batches
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads IMDB parquet splits from the Hugging Face Hub
pub mod loader;

/// Seeded random subsets of a split
pub mod sampler;

/// Tokenises reviews into fixed-length id/mask pairs
pub mod encoder;

/// Implements Burn's Dataset trait for tokenised reviews
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
