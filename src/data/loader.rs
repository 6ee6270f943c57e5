// ============================================================
// Layer 4 — IMDB Loader
// ============================================================
// Loads the IMDB movie-review splits from the Hugging Face Hub.
//
// The Hub stores each split as a single parquet shard:
//   plain_text/train-00000-of-00001.parquet
//   plain_text/test-00000-of-00001.parquet
//
// Each row has two columns:
//   text  — the raw review (UTF-8 string, may contain <br /> tags)
//   label — 0 = negative, 1 = positive (int64)
//
// The shard is downloaded once into the local hub cache and
// read row by row with the parquet record API.
//
// Reference: parquet crate documentation (record API)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use parquet::{
    file::reader::{FileReader, SerializedFileReader},
    record::{Field, Row},
};
use std::{fs::File, path::Path};

use crate::domain::review::{Review, Sentiment};
use crate::domain::traits::{ReviewSource, Split};
use crate::infra::hub::HubClient;

/// Loads IMDB splits from a Hub dataset repository.
/// Implements the ReviewSource trait from Layer 3.
pub struct ImdbLoader {
    hub:        HubClient,
    dataset_id: String,
}

impl ImdbLoader {
    pub fn new(hub: HubClient, dataset_id: impl Into<String>) -> Self {
        Self { hub, dataset_id: dataset_id.into() }
    }

    fn shard_name(split: Split) -> String {
        format!("plain_text/{}-00000-of-00001.parquet", split.name())
    }
}

impl ReviewSource for ImdbLoader {
    fn load_split(&self, split: Split) -> Result<Vec<Review>> {
        let shard = Self::shard_name(split);
        let path  = self.hub.dataset_file(&self.dataset_id, &shard)?;

        let reviews = read_parquet_reviews(&path)
            .with_context(|| format!("Cannot read {} split of '{}'", split.name(), self.dataset_id))?;

        tracing::info!("Loaded {} {} reviews", reviews.len(), split.name());
        Ok(reviews)
    }
}

/// Read every (text, label) row of a parquet file, in file order.
pub fn read_parquet_reviews(path: &Path) -> Result<Vec<Review>> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open '{}'", path.display()))?;
    let reader = SerializedFileReader::new(file)
        .with_context(|| format!("'{}' is not a parquet file", path.display()))?;

    let num_rows = reader.metadata().file_metadata().num_rows();
    let mut reviews = Vec::with_capacity(usize::try_from(num_rows).unwrap_or(0));

    for (index, row) in reader.get_row_iter(None)?.enumerate() {
        let row = row?;
        let review = review_from_row(&row)
            .with_context(|| format!("Bad row {index} in '{}'", path.display()))?;
        reviews.push(review);
    }

    Ok(reviews)
}

/// Pick the `text` and `label` columns out of one parquet row.
/// Columns are matched by name so extra columns are ignored.
fn review_from_row(row: &Row) -> Result<Review> {
    let mut text  = None;
    let mut label = None;

    for (name, field) in row.get_column_iter() {
        match (name.as_str(), field) {
            ("text", Field::Str(s))   => text  = Some(s.clone()),
            ("label", Field::Long(v)) => label = Some(*v),
            ("label", Field::Int(v))  => label = Some(i64::from(*v)),
            _ => {}
        }
    }

    let text  = text.context("row has no string 'text' column")?;
    let label = label.context("row has no integer 'label' column")?;
    Ok(Review::new(text, Sentiment::try_from(label)?))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use parquet::{
        data_type::{ByteArray, ByteArrayType, Int64Type},
        file::{properties::WriterProperties, writer::SerializedFileWriter},
        schema::parser::parse_message_type,
    };
    use std::sync::Arc;

    /// Write a two-column shard shaped like the Hub's IMDB files.
    fn write_shard(path: &Path, texts: &[&str], labels: &[i64]) {
        let schema = Arc::new(
            parse_message_type(
                "message schema { REQUIRED BYTE_ARRAY text (UTF8); REQUIRED INT64 label; }",
            )
            .unwrap(),
        );
        let props = Arc::new(WriterProperties::builder().build());
        let file  = File::create(path).unwrap();
        let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();

        let mut row_group = writer.next_row_group().unwrap();

        let mut text_col = row_group.next_column().unwrap().unwrap();
        let values: Vec<ByteArray> = texts.iter().map(|&t| ByteArray::from(t)).collect();
        text_col.typed::<ByteArrayType>().write_batch(&values, None, None).unwrap();
        text_col.close().unwrap();

        let mut label_col = row_group.next_column().unwrap().unwrap();
        label_col.typed::<Int64Type>().write_batch(labels, None, None).unwrap();
        label_col.close().unwrap();

        row_group.close().unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn test_reads_rows_in_order() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.parquet");
        write_shard(&path, &["a dull film", "a great film"], &[0, 1]);

        let reviews = read_parquet_reviews(&path).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].text, "a dull film");
        assert_eq!(reviews[0].label, Sentiment::Negative);
        assert_eq!(reviews[1].label, Sentiment::Positive);
    }

    #[test]
    fn test_bad_label_fails_the_split() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.parquet");
        write_shard(&path, &["fine", "unlabelled"], &[1, -1]);

        assert!(read_parquet_reviews(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_parquet_reviews(&dir.path().join("nope.parquet")).is_err());
    }

    #[test]
    fn test_shard_names() {
        assert_eq!(ImdbLoader::shard_name(Split::Train), "plain_text/train-00000-of-00001.parquet");
        assert_eq!(ImdbLoader::shard_name(Split::Test),  "plain_text/test-00000-of-00001.parquet");
    }
}
