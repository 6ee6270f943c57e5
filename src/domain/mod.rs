// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types for the sentiment task: what a review is,
// what the two classes are, and how predictions are scored.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A labelled movie review and its sentiment class
pub mod review;

// Accuracy, error rate and the 2x2 confusion matrix
pub mod confusion;

// Core abstractions (traits) that other layers implement
pub mod traits;
