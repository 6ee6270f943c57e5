// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the network or the checkpoint
// directory on disk:
//
//   hub.rs             — Hugging Face Hub downloads
//                        Pretrained BERT files and the IMDB
//                        parquet shards, cached locally.
//
//   checkpoint.rs      — Saving and loading model weights
//                        Full-precision MessagePack records plus
//                        the model and training configs as JSON,
//                        so evaluation can rebuild the model.
//
//   tokenizer_store.rs — Tokenizer persistence
//                        Saves the padded/truncating tokenizer
//                        with the checkpoint so evaluation uses
//                        exactly the training vocabulary.
//
//   metrics.rs         — Training metrics logging
//                        Writes the average loss of each epoch
//                        to a CSV file.
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Hugging Face Hub client
pub mod hub;

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Tokenizer saving and loading
pub mod tokenizer_store;

/// Training metrics CSV logger
pub mod metrics;
