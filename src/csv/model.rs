//! Table data model types
//!
//! A `Table` is produced fresh by every parse and never mutated afterwards;
//! edits build a new table (see [`Table::with_cell`]).

use serde::{Deserialize, Serialize};

/// Supported field delimiters
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Semicolon,
}

impl Delimiter {
    /// All candidates, in tie-breaking order (first declared wins)
    pub const ALL: [Delimiter; 3] = [Delimiter::Comma, Delimiter::Tab, Delimiter::Semicolon];

    /// Get the character for this delimiter
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
        }
    }

    /// Lowercase name, as accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            Delimiter::Comma => "comma",
            Delimiter::Tab => "tab",
            Delimiter::Semicolon => "semicolon",
        }
    }

    /// Delimiter implied by a file extension, if the extension pins one
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "tsv" | "tab" => Some(Delimiter::Tab),
            _ => None,
        }
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Bounds applied while parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseLimits {
    /// Inputs larger than this are rejected before tokenizing
    pub max_file_size_bytes: u64,
    /// Cells longer than this (in chars) are truncated
    pub max_cell_length: usize,
    /// Keep at most this many data rows (header excluded)
    pub row_limit: Option<usize>,
    /// Keep at most this many columns per row, header included
    pub column_limit: Option<usize>,
}

/// 50 MiB
pub const MAX_FILE_SIZE_BYTES: u64 = 50 * 1024 * 1024;

pub const MAX_CELL_LENGTH: usize = 10_000;

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_file_size_bytes: MAX_FILE_SIZE_BYTES,
            max_cell_length: MAX_CELL_LENGTH,
            row_limit: None,
            column_limit: None,
        }
    }
}

impl ParseLimits {
    /// Limits for a bounded preview of the first `rows` x `columns`
    pub fn preview(rows: usize, columns: usize) -> Self {
        Self {
            row_limit: Some(rows),
            column_limit: Some(columns),
            ..Self::default()
        }
    }
}

/// A parsed table: header row plus ragged data rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub delimiter: Delimiter,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: Delimiter) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of header columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Widest row in the table, header included
    pub fn max_row_width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.headers.len())
    }

    /// True when there is neither a header nor any rows
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Get a data cell, `None` when the row is short or out of range
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
    }

    /// Human-readable size, e.g. "3 rows × 2 columns"
    pub fn summary(&self) -> String {
        format!(
            "{} rows × {} columns",
            self.row_count(),
            self.column_count()
        )
    }

    /// Build a copy with one cell replaced.
    ///
    /// `row == None` addresses the header. Short rows are extended with empty
    /// cells up to `col`. Returns `None` if the data row does not exist.
    pub fn with_cell(&self, row: Option<usize>, col: usize, value: &str) -> Option<Table> {
        let mut table = self.clone();
        let target = match row {
            None => &mut table.headers,
            Some(r) => table.rows.get_mut(r)?,
        };
        if target.len() <= col {
            target.resize(col + 1, String::new());
        }
        target[col] = value.to_string();
        Some(table)
    }

    /// Serialize back to delimited text (RFC 4180 quoting, `\n` line endings)
    pub fn to_delimited(&self) -> String {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter.char() as u8)
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        for record in std::iter::once(&self.headers).chain(self.rows.iter()) {
            if record.is_empty() {
                continue;
            }
            // Writing into a Vec cannot fail
            let _ = writer.write_record(record);
        }

        match writer.into_inner() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::warn!("Failed to flush delimited output: {}", e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["Name".into(), "Age".into()],
            vec![
                vec!["John".into(), "30".into(), "Extra".into()],
                vec!["Jane".into()],
            ],
            Delimiter::Comma,
        )
    }

    #[test]
    fn test_counts_and_summary() {
        let table = sample();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.max_row_width(), 3);
        assert_eq!(table.summary(), "2 rows × 2 columns");
    }

    #[test]
    fn test_cell_access_on_ragged_rows() {
        let table = sample();
        assert_eq!(table.cell(0, 2), Some("Extra"));
        assert_eq!(table.cell(1, 1), None);
        assert_eq!(table.cell(5, 0), None);
    }

    #[test]
    fn test_with_cell_extends_short_row() {
        let table = sample();
        let edited = table.with_cell(Some(1), 2, "x").unwrap();
        assert_eq!(edited.rows[1], vec!["Jane", "", "x"]);
        // The original is untouched
        assert_eq!(table.rows[1], vec!["Jane"]);
    }

    #[test]
    fn test_with_cell_header_and_missing_row() {
        let table = sample();
        let edited = table.with_cell(None, 0, "Full Name").unwrap();
        assert_eq!(edited.headers[0], "Full Name");
        assert!(table.with_cell(Some(9), 0, "x").is_none());
    }

    #[test]
    fn test_to_delimited_quotes_when_needed() {
        let table = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec!["x,y".into(), "say \"hi\"".into()]],
            Delimiter::Comma,
        );
        assert_eq!(table.to_delimited(), "a,b\n\"x,y\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_to_delimited_uses_table_delimiter() {
        let table = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "2".into()]],
            Delimiter::Semicolon,
        );
        assert_eq!(table.to_delimited(), "a;b\n1;2\n");
    }

    #[test]
    fn test_delimiter_from_extension() {
        assert_eq!(Delimiter::from_extension("TSV"), Some(Delimiter::Tab));
        assert_eq!(Delimiter::from_extension("csv"), None);
    }
}
