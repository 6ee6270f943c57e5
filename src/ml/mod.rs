// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All model code lives here: the BERT encoder with its
// classification head, loading of the pretrained PyTorch
// weights, the fine-tuning loop and batched inference.
//
//   model.rs      — BERT embeddings + encoder + pooler,
//                   dropout and a linear head over [CLS]
//
//   pretrained.rs — maps `bert-base-uncased` config.json and
//                   pytorch_model.bin onto the module tree
//
//   trainer.rs    — forward, cross-entropy, backward and an
//                   SGD step per batch; one loss line per epoch
//
//   inferencer.rs — gradient-free predictions and the
//                   confusion matrix over a dataset
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Devlin et al. (2019) BERT

/// Training runs on WGPU with automatic differentiation
pub type TrainBackend = burn::backend::Autodiff<burn::backend::Wgpu>;

/// Evaluation runs on the inner backend, without gradient tracking
pub type InferBackend = burn::backend::Wgpu;

/// BERT sequence classifier architecture
pub mod model;

/// Pretrained weight and config loading
pub mod pretrained;

/// Fine-tuning loop
pub mod trainer;

/// Batched inference and evaluation
pub mod inferencer;
