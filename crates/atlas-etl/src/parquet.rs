//! Columnar encode/decode over serde row types
//!
//! Serde + Arrow + Parquet bridging: [`encode`] turns a slice of rows into
//! Parquet file bytes, [`decode`] reads them back. The Arrow schema is
//! inferred from the rows themselves at write time (`from_samples`), so
//! optional fields that happen to be all-null still encode. Both functions
//! work on in-memory byte buffers because the same bytes go to local disk
//! and to object storage.

use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use atlas_common::{AtlasError, Result};
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::file::properties::WriterProperties;
use serde::{de::DeserializeOwned, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};
use serde_arrow::{from_record_batch, to_record_batch};

/// Encode rows as Parquet file bytes.
///
/// Zero rows is an error: no schema can be inferred from an empty sample
/// set, and an empty raw file is never a meaningful pipeline artifact.
pub fn encode<T: Serialize>(rows: &[T]) -> Result<Vec<u8>> {
    if rows.is_empty() {
        return Err(AtlasError::EmptyPayload(
            "cannot encode zero rows to Parquet".to_string(),
        ));
    }

    let options = TracingOptions::default().allow_null_fields(true);
    let fields: Vec<FieldRef> = Vec::<FieldRef>::from_samples(rows, options)
        .map_err(|e| AtlasError::Encode(format!("infer Arrow schema from rows: {e}")))?;

    let batch: RecordBatch = to_record_batch(&fields, &rows)
        .map_err(|e| AtlasError::Encode(format!("convert rows to RecordBatch: {e}")))?;

    let mut buffer = Vec::new();
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(&mut buffer, batch.schema(), Some(props))
        .map_err(|e| AtlasError::Encode(format!("create ArrowWriter: {e}")))?;

    writer
        .write(&batch)
        .map_err(|e| AtlasError::Encode(format!("write batch: {e}")))?;
    writer
        .close()
        .map_err(|e| AtlasError::Encode(format!("close ArrowWriter: {e}")))?;

    Ok(buffer)
}

/// Decode Parquet file bytes back into typed rows, row order preserved from
/// write time.
pub fn decode<T: DeserializeOwned>(bytes: Vec<u8>) -> Result<Vec<T>> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(bytes))
        .map_err(|e| AtlasError::Decode(format!("open Parquet reader: {e}")))?;

    let mut reader = builder
        .build()
        .map_err(|e| AtlasError::Decode(format!("build Parquet reader: {e}")))?;

    let mut rows: Vec<T> = Vec::new();
    while let Some(batch) = reader
        .next()
        .transpose()
        .map_err(|e| AtlasError::Decode(format!("read next batch: {e}")))?
    {
        let mut decoded: Vec<T> = from_record_batch(&batch)
            .map_err(|e| AtlasError::Decode(format!("deserialize batch rows: {e}")))?;
        rows.append(&mut decoded);
    }

    Ok(rows)
}
