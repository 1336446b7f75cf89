//! Tabular file reading with encoding and delimiter auto-detection.
//!
//! Spreadsheet exports arrive in whatever encoding and separator the
//! exporting tool picked. This module sniffs both before handing the
//! content to the `csv` reader, and returns headers plus owned string
//! rows. No release-specific logic here.

use crate::error::{DatasetError, DatasetResult};
use std::path::Path;

/// A parsed tabular file.
#[derive(Debug, Clone)]
pub struct Table {
    /// Column headers from the first row.
    pub headers: Vec<String>,
    /// Data rows, padded to the header width.
    pub rows: Vec<Vec<String>>,
    /// Detected encoding.
    pub encoding: String,
    /// Detected delimiter.
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> DatasetResult<String> {
    let content = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).to_string()),
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.to_string()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => {
            // Fallback: UTF-8 with lossy conversion
            String::from_utf8_lossy(bytes).to_string()
        }
    };

    Ok(content)
}

/// Detect the delimiter by counting occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse a tabular file with auto-detection of encoding and delimiter.
pub fn read_table_file<P: AsRef<Path>>(path: P) -> DatasetResult<Table> {
    let bytes = std::fs::read(path.as_ref())
        .map_err(|e| DatasetError::unavailable(path.as_ref(), &e))?;

    read_table_bytes(&bytes)
}

/// Parse tabular bytes with auto-detection of encoding and delimiter.
pub fn read_table_bytes(bytes: &[u8]) -> DatasetResult<Table> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;

    // A UTF-8 BOM would otherwise end up glued to the first header
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    if content.trim().is_empty() {
        return Err(DatasetError::EmptyFile);
    }

    let delimiter = detect_delimiter(content);
    parse_table(content, delimiter, encoding)
}

/// Parse decoded CSV content with an explicit delimiter.
pub fn parse_table(content: &str, delimiter: char, encoding: String) -> DatasetResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DatasetError::Parse(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(DatasetError::NoHeaders);
    }

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| DatasetError::Parse(e.to_string()))?;
        let mut row: Vec<String> = record.iter().map(|c| c.to_string()).collect();

        if row.iter().all(|c| c.is_empty()) {
            continue;
        }

        // Short rows read as empty cells
        while row.len() < headers.len() {
            row.push(String::new());
        }

        rows.push(row);
    }

    Ok(Table {
        headers,
        rows,
        encoding,
        delimiter,
    })
}
