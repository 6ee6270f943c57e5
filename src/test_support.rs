// Shared fixtures for unit tests: a word-level tokenizer with
// BERT's special-token layout and a tiny BERT configuration, so
// nothing in the test suite touches the network.

use tokenizers::Tokenizer;

use crate::data::dataset::{ReviewDataset, TokenizedReview};
use crate::data::encoder::ReviewEncoder;
use crate::domain::review::{Review, Sentiment};
use crate::ml::model::BertClassifierConfig;

pub const CLS_ID: u32 = 101;
pub const SEP_ID: u32 = 102;
pub const TINY_VOCAB: usize = 160;
pub const TINY_SEQ_LEN: usize = 12;

const WORDS: &[&str] = &[
    "the", "a", "movie", "film", "was", "great", "bad", "and", "acting",
    "plot", "worse", "loved", "hated", "it", "boring", "fun", ",", ".", "!",
];

pub fn tiny_tokenizer() -> Tokenizer {
    let mut vocab = serde_json::json!({
        "[PAD]":  0,
        "[UNK]":  1,
        "[CLS]":  CLS_ID,
        "[SEP]":  SEP_ID,
        "[MASK]": 103,
    });
    for (i, word) in WORDS.iter().enumerate() {
        vocab[*word] = serde_json::json!(104 + i);
    }

    let special = |id: u32, content: &str| serde_json::json!({
        "id": id, "content": content, "single_word": false, "lstrip": false,
        "rstrip": false, "normalized": false, "special": true
    });

    let json = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [
            special(0, "[PAD]"),
            special(1, "[UNK]"),
            special(CLS_ID, "[CLS]"),
            special(SEP_ID, "[SEP]"),
            special(103, "[MASK]"),
        ],
        "normalizer": {
            "type": "BertNormalizer",
            "clean_text": true,
            "handle_chinese_chars": true,
            "strip_accents": null,
            "lowercase": true
        },
        "pre_tokenizer": { "type": "BertPreTokenizer" },
        "post_processor": {
            "type": "BertProcessing",
            "sep": ["[SEP]", SEP_ID],
            "cls": ["[CLS]", CLS_ID]
        },
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "[UNK]"
        }
    });

    json.to_string().parse().expect("fixture tokenizer JSON is valid")
}

pub fn tiny_encoder() -> ReviewEncoder {
    ReviewEncoder::new(tiny_tokenizer(), TINY_SEQ_LEN).unwrap()
}

pub fn tiny_bert_config() -> BertClassifierConfig {
    BertClassifierConfig::new(TINY_VOCAB, 16, 2, 2, 32, 32, 2)
}

pub fn sample_reviews() -> Vec<Review> {
    vec![
        Review::new("I loved it, a great film!", Sentiment::Positive),
        Review::new("The plot was bad and the acting was worse.", Sentiment::Negative),
        Review::new("Fun movie, great acting.", Sentiment::Positive),
        Review::new("Boring. I hated it.", Sentiment::Negative),
        Review::new("The movie was great", Sentiment::Positive),
    ]
}

pub fn sample_tokenized() -> Vec<TokenizedReview> {
    tiny_encoder().encode_all(&sample_reviews()).unwrap()
}

pub fn sample_dataset() -> ReviewDataset {
    ReviewDataset::new(sample_tokenized())
}
