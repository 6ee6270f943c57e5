// ============================================================
// Layer 5 — BERT Sequence Classifier (Burn)
// ============================================================
// The BERT encoder (Devlin et al., 2019) with a two-way
// classification head on the pooled [CLS] representation:
//
//   ids ─► word + position + token-type embeddings ─► LayerNorm
//       ─► N × [self-attention ─► add&norm ─► GELU FFN ─► add&norm]
//       ─► pooler: tanh(W · h[CLS])
//       ─► dropout ─► linear(hidden → num_labels) ─► logits
//
// Field names mirror the pretrained checkpoint layout closely
// enough that `pretrained.rs` can map every PyTorch tensor onto
// this tree with a handful of regex renames.

use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        loss::CrossEntropyLossConfig,
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::gelu,
};

/// Architecture hyperparameters. Field names follow the Hugging Face
/// `config.json` keys; the whole struct is saved with the checkpoint.
#[derive(Config, Debug)]
pub struct BertClassifierConfig {
    pub vocab_size:              usize,
    pub hidden_size:             usize,
    pub num_hidden_layers:       usize,
    pub num_attention_heads:     usize,
    pub intermediate_size:       usize,
    pub max_position_embeddings: usize,
    pub type_vocab_size:         usize,
    #[config(default = 1e-12)]
    pub layer_norm_eps:          f64,
    #[config(default = 0.1)]
    pub hidden_dropout_prob:     f64,
    #[config(default = 0.1)]
    pub attention_probs_dropout_prob: f64,
    #[config(default = 2)]
    pub num_labels:              usize,
}

impl BertClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> BertClassifier<B> {
        BertClassifier {
            bert:       self.init_encoder(device),
            dropout:    DropoutConfig::new(self.hidden_dropout_prob).init(),
            classifier: LinearConfig::new(self.hidden_size, self.num_labels).init(device),
        }
    }

    /// The pretrained part of the network (everything except the head).
    pub fn init_encoder<B: Backend>(&self, device: &B::Device) -> BertModel<B> {
        let embeddings = BertEmbeddings {
            word_embeddings:       EmbeddingConfig::new(self.vocab_size, self.hidden_size).init(device),
            position_embeddings:   EmbeddingConfig::new(self.max_position_embeddings, self.hidden_size).init(device),
            token_type_embeddings: EmbeddingConfig::new(self.type_vocab_size, self.hidden_size).init(device),
            layer_norm:            self.layer_norm(device),
            dropout:               DropoutConfig::new(self.hidden_dropout_prob).init(),
        };
        let layers = (0..self.num_hidden_layers)
            .map(|_| self.build_layer(device))
            .collect();

        BertModel {
            embeddings,
            encoder: BertEncoder { layers },
            pooler:  LinearConfig::new(self.hidden_size, self.hidden_size).init(device),
        }
    }

    fn build_layer<B: Backend>(&self, device: &B::Device) -> BertLayer<B> {
        BertLayer {
            attention: MultiHeadAttentionConfig::new(self.hidden_size, self.num_attention_heads)
                .with_dropout(self.attention_probs_dropout_prob)
                .init(device),
            attention_norm: self.layer_norm(device),
            intermediate:   LinearConfig::new(self.hidden_size, self.intermediate_size).init(device),
            output:         LinearConfig::new(self.intermediate_size, self.hidden_size).init(device),
            output_norm:    self.layer_norm(device),
            dropout:        DropoutConfig::new(self.hidden_dropout_prob).init(),
        }
    }

    fn layer_norm<B: Backend>(&self, device: &B::Device) -> LayerNorm<B> {
        LayerNormConfig::new(self.hidden_size)
            .with_epsilon(self.layer_norm_eps)
            .init(device)
    }
}

#[derive(Module, Debug)]
pub struct BertEmbeddings<B: Backend> {
    pub word_embeddings:       Embedding<B>,
    pub position_embeddings:   Embedding<B>,
    pub token_type_embeddings: Embedding<B>,
    pub layer_norm:            LayerNorm<B>,
    pub dropout:               Dropout,
}

impl<B: Backend> BertEmbeddings<B> {
    /// input_ids: [batch, seq_len] → [batch, seq_len, hidden]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let [batch_size, seq_len] = input_ids.dims();
        let device = input_ids.device();

        let positions: Vec<i64> = (0..batch_size)
            .flat_map(|_| 0..seq_len as i64)
            .collect();
        let positions = Tensor::<B, 2, Int>::from_data(
            TensorData::new(positions, [batch_size, seq_len]),
            &device,
        );
        // Single-segment input: every token belongs to segment 0.
        let token_types = Tensor::<B, 2, Int>::zeros([batch_size, seq_len], &device);

        let x = self.word_embeddings.forward(input_ids)
            + self.position_embeddings.forward(positions)
            + self.token_type_embeddings.forward(token_types);

        self.dropout.forward(self.layer_norm.forward(x))
    }
}

#[derive(Module, Debug)]
pub struct BertLayer<B: Backend> {
    pub attention:      MultiHeadAttention<B>,
    pub attention_norm: LayerNorm<B>,
    pub intermediate:   Linear<B>,
    pub output:         Linear<B>,
    pub output_norm:    LayerNorm<B>,
    pub dropout:        Dropout,
}

impl<B: Backend> BertLayer<B> {
    /// Post-norm encoder block. `mask_pad` is true at padding positions.
    pub fn forward(&self, x: Tensor<B, 3>, mask_pad: Tensor<B, 2, Bool>) -> Tensor<B, 3> {
        let attn = self
            .attention
            .forward(MhaInput::self_attn(x.clone()).mask_pad(mask_pad))
            .context;
        let x = self.attention_norm.forward(x + self.dropout.forward(attn));

        let ffn = self.output.forward(gelu(self.intermediate.forward(x.clone())));
        self.output_norm.forward(x + self.dropout.forward(ffn))
    }
}

#[derive(Module, Debug)]
pub struct BertEncoder<B: Backend> {
    pub layers: Vec<BertLayer<B>>,
}

#[derive(Module, Debug)]
pub struct BertModel<B: Backend> {
    pub embeddings: BertEmbeddings<B>,
    pub encoder:    BertEncoder<B>,
    pub pooler:     Linear<B>,
}

impl<B: Backend> BertModel<B> {
    /// Returns the pooled [CLS] vector: [batch, hidden].
    pub fn forward(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        attention_mask: Tensor<B, 2, Int>,
    ) -> Tensor<B, 2> {
        let mask_pad = attention_mask.equal_elem(0);

        let mut x = self.embeddings.forward(input_ids);
        for layer in &self.encoder.layers {
            x = layer.forward(x, mask_pad.clone());
        }

        let [batch_size, _, hidden] = x.dims();
        let cls = x.slice([0..batch_size, 0..1]).reshape([batch_size, hidden]);
        self.pooler.forward(cls).tanh()
    }
}

#[derive(Module, Debug)]
pub struct BertClassifier<B: Backend> {
    pub bert:       BertModel<B>,
    pub dropout:    Dropout,
    pub classifier: Linear<B>,
}

impl<B: Backend> BertClassifier<B> {
    /// input_ids, attention_mask: [batch, seq_len] → logits: [batch, num_labels]
    pub fn forward(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        attention_mask: Tensor<B, 2, Int>,
    ) -> Tensor<B, 2> {
        let pooled = self.bert.forward(input_ids, attention_mask);
        self.classifier.forward(self.dropout.forward(pooled))
    }

    /// Mean cross-entropy of the logits against `labels` ([batch]).
    pub fn forward_loss(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        attention_mask: Tensor<B, 2, Int>,
        labels:         Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(input_ids, attention_mask);
        let loss = CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits.clone(), labels);
        (loss, logits)
    }

    /// Replace the encoder weights, keeping the (freshly initialised) head.
    pub fn with_encoder_record(self, record: BertModelRecord<B>) -> Self {
        Self {
            bert: self.bert.load_record(record),
            ..self
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use crate::test_support::tiny_bert_config;

    type TestBackend = NdArray;

    fn ids(batch: usize, seq: usize) -> (Tensor<TestBackend, 2, Int>, Tensor<TestBackend, 2, Int>) {
        let device = Default::default();
        let ids: Vec<i64>  = (0..batch * seq).map(|i| 101 + (i % 20) as i64).collect();
        let mask: Vec<i64> = (0..batch * seq).map(|i| i64::from(i % seq < seq - 2)).collect();
        (
            Tensor::from_data(TensorData::new(ids, [batch, seq]), &device),
            Tensor::from_data(TensorData::new(mask, [batch, seq]), &device),
        )
    }

    #[test]
    fn test_logits_shape() {
        let device = Default::default();
        let model: BertClassifier<TestBackend> = tiny_bert_config().init(&device);
        let (input_ids, mask) = ids(3, 10);
        let logits = model.forward(input_ids, mask);
        assert_eq!(logits.dims(), [3, 2]);
    }

    #[test]
    fn test_loss_is_finite_scalar() {
        let device = Default::default();
        let model: BertClassifier<TestBackend> = tiny_bert_config().init(&device);
        let (input_ids, mask) = ids(2, 8);
        let labels = Tensor::from_data(TensorData::new(vec![0i64, 1], [2]), &device);

        let (loss, logits) = model.forward_loss(input_ids, mask, labels);
        assert_eq!(loss.dims(), [1]);
        assert_eq!(logits.dims(), [2, 2]);
        let value: f64 = loss.into_scalar().elem::<f64>();
        assert!(value.is_finite() && value > 0.0);
    }

    #[test]
    fn test_encoder_record_swap_changes_only_encoder() {
        let device = Default::default();
        let cfg = tiny_bert_config();
        let a: BertClassifier<TestBackend> = cfg.init(&device);
        let b: BertClassifier<TestBackend> = cfg.init(&device);

        let head_before = a.classifier.weight.val().into_data();
        let swapped = a.with_encoder_record(b.bert.clone().into_record());

        swapped.classifier.weight.val().into_data().assert_eq(&head_before, true);
        swapped
            .bert
            .pooler
            .weight
            .val()
            .into_data()
            .assert_eq(&b.bert.pooler.weight.val().into_data(), true);
    }
}
