// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer asks for reviews through this trait
// and never sees where they come from (Hub parquet shards,
// local files, an in-memory fixture in tests).
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::review::Review;

/// The two splits every sentiment dataset provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub fn name(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test  => "test",
        }
    }
}

// ─── ReviewSource ─────────────────────────────────────────────────────────────
/// Any component that can load labelled reviews for a split.
///
/// Implementations:
///   - ImdbLoader → parquet shards from the Hugging Face Hub
pub trait ReviewSource {
    /// Load every review of the given split, in dataset order.
    fn load_split(&self, split: Split) -> Result<Vec<Review>>;
}
