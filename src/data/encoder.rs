// ============================================================
// Layer 4 — Review Encoder
// ============================================================
// Turns review text into the fixed-length input BERT expects:
//
//   "A great film"  →  [CLS] a great film [SEP] [PAD] ... [PAD]
//   attention mask  →    1   1   1     1    1     0   ...   0
//
// Padding and truncation are configured on the tokenizer itself
// (pad to exactly max_seq_len, cut from the right beyond it), so
// the same settings are saved with the checkpoint and reused at
// evaluation time.
//
// Reference: tokenizers crate documentation (PaddingParams,
//            TruncationParams)

use anyhow::{anyhow, Result};
use tokenizers::{
    Encoding, PaddingParams, PaddingStrategy, Tokenizer, TruncationParams,
};

use crate::data::dataset::TokenizedReview;
use crate::domain::review::Review;

// Reviews are encoded in chunks so progress can be logged and
// the batch encoder's thread pool gets sizeable work units.
const ENCODE_CHUNK: usize = 1024;

pub struct ReviewEncoder {
    tokenizer:   Tokenizer,
    max_seq_len: usize,
}

impl ReviewEncoder {
    /// Wrap a tokenizer and pin its padding/truncation to `max_seq_len`.
    pub fn new(mut tokenizer: Tokenizer, max_seq_len: usize) -> Result<Self> {
        let pad_token = "[PAD]".to_string();
        let pad_id    = tokenizer.token_to_id(&pad_token).unwrap_or(0);

        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::Fixed(max_seq_len),
            pad_id,
            pad_token,
            ..Default::default()
        }));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_seq_len,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Cannot configure truncation: {e}"))?;

        Ok(Self { tokenizer, max_seq_len })
    }

    pub fn max_seq_len(&self) -> usize {
        self.max_seq_len
    }

    /// The configured tokenizer, for saving alongside the checkpoint.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Encode a whole split, preserving order.
    pub fn encode_all(&self, reviews: &[Review]) -> Result<Vec<TokenizedReview>> {
        let mut out = Vec::with_capacity(reviews.len());

        for chunk in reviews.chunks(ENCODE_CHUNK) {
            let texts: Vec<&str> = chunk.iter().map(|r| r.text.as_str()).collect();
            let encodings = self
                .tokenizer
                .encode_batch(texts, true)
                .map_err(|e| anyhow!("Tokenisation error: {e}"))?;

            for (review, enc) in chunk.iter().zip(&encodings) {
                let (ids, mask) = split_encoding(enc);
                out.push(TokenizedReview::new(ids, mask, review.label, self.max_seq_len)?);
            }
            tracing::debug!("Tokenised {}/{} reviews", out.len(), reviews.len());
        }

        Ok(out)
    }
}

fn split_encoding(enc: &Encoding) -> (Vec<u32>, Vec<u32>) {
    (enc.get_ids().to_vec(), enc.get_attention_mask().to_vec())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::Sentiment;
    use crate::test_support::{tiny_tokenizer, CLS_ID, SEP_ID};

    const LEN: usize = 8;

    fn encoder() -> ReviewEncoder {
        ReviewEncoder::new(tiny_tokenizer(), LEN).unwrap()
    }

    impl ReviewEncoder {
        /// Single-text path, checked against `encode_all` below.
        pub(crate) fn encode_text(&self, text: &str) -> Result<(Vec<u32>, Vec<u32>)> {
            let enc = self
                .tokenizer
                .encode(text, true)
                .map_err(|e| anyhow!("Tokenisation error: {e}"))?;
            Ok(split_encoding(&enc))
        }
    }

    #[test]
    fn test_short_text_is_padded() {
        let (ids, mask) = encoder().encode_text("a great film").unwrap();
        assert_eq!(ids.len(), LEN);
        assert_eq!(mask.len(), LEN);
        // [CLS] a great film [SEP] + 3 padding
        assert_eq!(ids[0], CLS_ID);
        assert_eq!(ids[4], SEP_ID);
        assert_eq!(&ids[5..], &[0, 0, 0]);
        assert_eq!(mask, vec![1, 1, 1, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_long_text_is_truncated() {
        let text = "the movie was a great film and the acting was great and the plot was bad";
        let (ids, mask) = encoder().encode_text(text).unwrap();
        assert_eq!(ids.len(), LEN);
        assert!(mask.iter().all(|&m| m == 1));
        // Special tokens survive truncation
        assert_eq!(ids[0], CLS_ID);
        assert_eq!(ids[LEN - 1], SEP_ID);
    }

    #[test]
    fn test_exact_fit_is_full_length_but_not_cut() {
        // LEN - 2 words: [CLS] + 6 words + [SEP] fills every position
        let text = "the movie was a great film";
        let (ids, mask) = encoder().encode_text(text).unwrap();
        assert!(mask.iter().all(|&m| m == 1));

        // A longer limit shows nothing was dropped
        let wide = ReviewEncoder::new(tiny_tokenizer(), LEN + 1).unwrap();
        let (wide_ids, wide_mask) = wide.encode_text(text).unwrap();
        assert_eq!(&wide_ids[..LEN], &ids[..]);
        assert_eq!(wide_mask[LEN], 0);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let enc  = encoder();
        let text = "The acting was BAD, the plot was worse.";
        let first = enc.encode_text(text).unwrap();
        for _ in 0..5 {
            assert_eq!(enc.encode_text(text).unwrap(), first);
        }
        // A second encoder built from the same vocabulary agrees
        assert_eq!(encoder().encode_text(text).unwrap(), first);
    }

    #[test]
    fn test_batch_and_single_encoding_agree() {
        let enc = encoder();
        let reviews = vec![
            Review::new("a great film", Sentiment::Positive),
            Review::new("the plot was bad and the acting was worse", Sentiment::Negative),
            Review::new("", Sentiment::Negative),
        ];
        let batch = enc.encode_all(&reviews).unwrap();
        assert_eq!(batch.len(), 3);
        for (review, tok) in reviews.iter().zip(&batch) {
            let (ids, mask) = enc.encode_text(&review.text).unwrap();
            assert_eq!(tok.input_ids(), ids.as_slice());
            assert_eq!(tok.attention_mask(), mask.as_slice());
            assert_eq!(tok.label(), review.label);
            assert_eq!(tok.seq_len(), LEN);
        }
    }

    #[test]
    fn test_unknown_words_map_to_unk() {
        let (ids, _) = encoder().encode_text("zyzzyva").unwrap();
        assert_eq!(ids[1], 1); // [UNK]
    }
}
