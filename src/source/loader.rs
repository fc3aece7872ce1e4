//! Trace file loading.
//!
//! Accepts plain JSON or gzip-compressed JSON. Compression is detected
//! from a `.gz` extension or from the gzip magic bytes.

use super::schema::{TraceDocument, TraceEvent};
use crate::utils::error::FormatError;
use flate2::read::GzDecoder;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Load the trace document at `path` and return its event collection
///
/// # Errors
/// * `FormatError::ReadFailed` - File cannot be opened or read
/// * `FormatError::JsonError` - Not valid JSON, broken gzip stream, or wrong shape
/// * `FormatError::MissingField` - No `traceEvents` key
pub fn load_trace_events(path: impl AsRef<Path>) -> Result<Vec<TraceEvent>, FormatError> {
    let path = path.as_ref();
    let read_failed = |source| FormatError::ReadFailed {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_failed)?;
    let mut reader = BufReader::new(file);

    let compressed = has_gz_extension(path) || {
        let header = reader.fill_buf().map_err(read_failed)?;
        header.starts_with(&GZIP_MAGIC)
    };

    let document = if compressed {
        debug!("Reading gzip-compressed trace: {}", path.display());
        parse_document(BufReader::new(GzDecoder::new(reader)))?
    } else {
        debug!("Reading plain JSON trace: {}", path.display());
        parse_document(reader)?
    };

    document
        .trace_events
        .ok_or(FormatError::MissingField("traceEvents"))
}

/// Parse a trace document from any reader
pub fn parse_document(reader: impl Read) -> Result<TraceDocument, FormatError> {
    Ok(serde_json::from_reader(reader)?)
}

fn has_gz_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
