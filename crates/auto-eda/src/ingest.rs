//! CSV ingestion.
//!
//! Turns an uploaded byte stream into a [`Table`]. Column types are whatever
//! the polars CSV reader infers; there are no user overrides.

use crate::config::EdaConfig;
use crate::error::{EdaError, Result};
use crate::types::Table;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

/// Field values read as missing, in addition to empty fields.
pub const NULL_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parse an uploaded CSV byte stream into a [`Table`].
///
/// Column types are inferred from the first `infer_schema_length` rows. A
/// failed parse is retried with types inferred from the whole file, then
/// once more on sanitized content before giving up.
///
/// # Errors
///
/// - [`EdaError::EmptyInput`] when the upload has no content
/// - [`EdaError::Ingestion`] on invalid UTF-8 or malformed CSV
pub fn read_csv(bytes: &[u8], source_name: &str, config: &EdaConfig) -> Result<Table> {
    let content = std::str::from_utf8(bytes)
        .map_err(|e| EdaError::ingestion(format!("file is not valid UTF-8 ({})", e)))?;

    if content.trim().is_empty() {
        return Err(EdaError::EmptyInput);
    }

    let df = match parse(content.as_bytes().to_vec(), config.infer_schema_length) {
        Ok(df) => df,
        Err(first) => {
            debug!("Standard loading failed: {}", first);
            load_with_fallbacks(content, source_name, config).map_err(|e| {
                warn!("Could not parse '{}': {}", source_name, e);
                EdaError::ingestion(first.to_string())
            })?
        }
    };

    info!(
        "Loaded '{}': {} rows x {} columns",
        source_name,
        df.height(),
        df.width()
    );
    Ok(Table::new(df, source_name))
}

/// Read a `.csv` file from disk into a [`Table`].
pub fn read_csv_file(path: impl AsRef<Path>, config: &EdaConfig) -> Result<Table> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("upload.csv")
        .to_string();

    if !is_csv_name(&name) {
        return Err(EdaError::UnsupportedFile(name));
    }

    let bytes = std::fs::read(path)?;
    read_csv(&bytes, &name, config)
}

/// Whether a file name carries the `.csv` extension (case-insensitive).
pub fn is_csv_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn load_with_fallbacks(
    content: &str,
    source_name: &str,
    config: &EdaConfig,
) -> PolarsResult<DataFrame> {
    // a late value of another type breaks a schema guessed from a prefix
    if config.infer_schema_length.is_some() {
        match parse(content.as_bytes().to_vec(), None) {
            Ok(df) => {
                debug!("Loaded '{}' with full-file schema inference", source_name);
                return Ok(df);
            }
            Err(e) => debug!("Full-file schema inference failed: {}", e),
        }
    }

    let df = parse_sanitized(content)?;
    warn!(
        "'{}' was only readable after collapsing doubled quotes and dropping blank lines; \
         cell contents may differ from the file",
        source_name
    );
    Ok(df)
}

fn parse_sanitized(content: &str) -> PolarsResult<DataFrame> {
    parse(clean_csv_content(content).into_bytes(), None)
}

fn parse(bytes: Vec<u8>, infer_schema_length: Option<usize>) -> PolarsResult<DataFrame> {
    let null_values = NullValues::AllColumns(NULL_MARKERS.iter().map(|s| (*s).into()).collect());

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(null_values)),
        )
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
