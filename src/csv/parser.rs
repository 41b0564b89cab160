//! Quote-aware tokenizer
//!
//! A two-state machine (unquoted / in quotes) walks the input once. Malformed
//! content never fails: ragged rows are kept as-is, an unclosed quote runs to
//! end of input, and an empty input is an empty table. The only errors are
//! the size ceiling and, for [`parse_file`], the file itself being unreadable.

use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

use thiserror::Error;

use super::model::{Delimiter, ParseLimits, Table};
use super::sanitize::sanitize_field;
use crate::error::SourceReason;

const QUOTE: char = '"';

/// How often (in rows) a cancellable parse polls its cancel check
const CANCEL_CHECK_INTERVAL: usize = 256;

/// Error type for table parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input exceeds `ParseLimits::max_file_size_bytes`
    #[error("input is too large ({size} bytes, limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },
    /// The source file could not be read
    #[error("cannot read {}: {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: SourceReason },
}

/// Fail with `FileTooLarge` if `size` exceeds the configured ceiling
pub fn check_size(size: u64, limits: &ParseLimits) -> Result<(), ParseError> {
    if size > limits.max_file_size_bytes {
        return Err(ParseError::FileTooLarge {
            size,
            limit: limits.max_file_size_bytes,
        });
    }
    Ok(())
}

/// Parse delimited text into a table.
///
/// The first row becomes the header, the rest become data rows.
pub fn parse_table(
    content: &str,
    delimiter: Delimiter,
    limits: &ParseLimits,
) -> Result<Table, ParseError> {
    let table = parse_table_cancellable(content, delimiter, limits, || false)?;
    Ok(table.unwrap_or_default())
}

/// Parse like [`parse_table`], polling `is_cancelled` periodically.
///
/// Returns `Ok(None)` if the parse was abandoned.
pub fn parse_table_cancellable(
    content: &str,
    delimiter: Delimiter,
    limits: &ParseLimits,
    is_cancelled: impl Fn() -> bool,
) -> Result<Option<Table>, ParseError> {
    check_size(content.len() as u64, limits)?;

    let mut tokenizer = Tokenizer::new(content, delimiter, limits);
    let headers = tokenizer.next().unwrap_or_default();

    let mut rows = Vec::new();
    let row_limit = limits.row_limit.unwrap_or(usize::MAX);
    while rows.len() < row_limit {
        if rows.len() % CANCEL_CHECK_INTERVAL == 0 && is_cancelled() {
            tracing::debug!("Parse cancelled after {} rows", rows.len());
            return Ok(None);
        }
        match tokenizer.next() {
            Some(row) => rows.push(row),
            None => break,
        }
    }

    tracing::debug!(
        "Parsed {} rows x {} columns ({} bytes, delimiter {})",
        rows.len(),
        headers.len(),
        content.len(),
        delimiter
    );

    Ok(Some(Table::new(headers, rows, delimiter)))
}

/// Read a file and parse it.
///
/// The size ceiling is checked against the file's metadata before reading.
pub fn parse_file(
    path: &Path,
    delimiter: Delimiter,
    limits: &ParseLimits,
) -> Result<Table, ParseError> {
    let unavailable = |e: std::io::Error| ParseError::SourceUnavailable {
        path: path.to_path_buf(),
        reason: SourceReason::from(&e),
    };

    let metadata = std::fs::metadata(path).map_err(unavailable)?;
    if metadata.is_dir() {
        return Err(ParseError::SourceUnavailable {
            path: path.to_path_buf(),
            reason: SourceReason::IsDirectory,
        });
    }
    check_size(metadata.len(), limits)?;

    let bytes = std::fs::read(path).map_err(unavailable)?;
    parse_table(&String::from_utf8_lossy(&bytes), delimiter, limits)
}

/// Accumulates the fields of one row
struct RowBuilder {
    cells: Vec<String>,
    field: String,
    /// The current field has consumed at least one character (or opening quote)
    field_started: bool,
    /// Anything at all was consumed for this row
    touched: bool,
    max_cell_length: usize,
    column_limit: usize,
}

impl RowBuilder {
    fn new(limits: &ParseLimits) -> Self {
        Self {
            cells: Vec::new(),
            field: String::new(),
            field_started: false,
            touched: false,
            max_cell_length: limits.max_cell_length,
            column_limit: limits.column_limit.unwrap_or(usize::MAX),
        }
    }

    fn push_char(&mut self, ch: char) {
        self.field.push(ch);
        self.field_started = true;
        self.touched = true;
    }

    fn open_quote(&mut self) {
        self.field_started = true;
        self.touched = true;
    }

    fn end_field(&mut self) {
        let raw = std::mem::take(&mut self.field);
        if self.cells.len() < self.column_limit {
            self.cells.push(sanitize_field(raw, self.max_cell_length));
        }
        self.field_started = false;
        self.touched = true;
    }

    fn is_blank(&self) -> bool {
        !self.touched
    }

    fn finish(mut self) -> Vec<String> {
        self.end_field();
        self.cells
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Unquoted,
    InQuotes,
}

/// Iterator over sanitized rows of delimited text
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    delimiter: char,
    limits: &'a ParseLimits,
}

impl<'a> Tokenizer<'a> {
    pub fn new(content: &'a str, delimiter: Delimiter, limits: &'a ParseLimits) -> Self {
        Self {
            chars: content.chars().peekable(),
            delimiter: delimiter.char(),
            limits,
        }
    }

    /// Consume the `\n` of a `\r\n` pair
    fn skip_lf_after_cr(&mut self) {
        if self.chars.peek() == Some(&'\n') {
            self.chars.next();
        }
    }

    /// Tokenize one physical row. Returns the row and whether input ran out.
    fn read_row(&mut self) -> (RowBuilder, bool) {
        let mut row = RowBuilder::new(self.limits);
        let mut state = QuoteState::Unquoted;

        while let Some(ch) = self.chars.next() {
            match state {
                QuoteState::InQuotes => match ch {
                    QUOTE if self.chars.peek() == Some(&QUOTE) => {
                        self.chars.next();
                        row.push_char(QUOTE);
                    }
                    QUOTE => state = QuoteState::Unquoted,
                    '\r' => {
                        self.skip_lf_after_cr();
                        row.push_char('\n');
                    }
                    _ => row.push_char(ch),
                },
                QuoteState::Unquoted => match ch {
                    c if c == self.delimiter => row.end_field(),
                    '\n' => return (row, false),
                    '\r' => {
                        self.skip_lf_after_cr();
                        return (row, false);
                    }
                    // Only a quote opening a field starts a quoted section
                    QUOTE if !row.field_started => {
                        row.open_quote();
                        state = QuoteState::InQuotes;
                    }
                    _ => row.push_char(ch),
                },
            }
        }

        if state == QuoteState::InQuotes {
            tracing::debug!("Unclosed quote at end of input");
        }
        (row, true)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (row, at_eof) = self.read_row();
            if !row.is_blank() {
                return Some(row.finish());
            }
            if at_eof {
                return None;
            }
            // Blank line: no row
        }
    }
}
