//! Delimited-text ingestion
//!
//! Turns raw, untrusted text into a [`Table`]:
//!
//! ```text
//! raw text ──► detect_delimiter (first load only)
//!          ──► Tokenizer (quote-aware state machine)
//!          ──► sanitize_field (per cell: strip controls/bidi, truncate)
//!          ──► Table { headers, rows, delimiter }
//! ```

mod detect;
mod model;
mod parser;
mod sanitize;

pub use detect::{detect_delimiter, SAMPLE_LINES};
pub use model::{Delimiter, ParseLimits, Table, MAX_CELL_LENGTH, MAX_FILE_SIZE_BYTES};
pub use parser::{
    check_size, parse_file, parse_table, parse_table_cancellable, ParseError, Tokenizer,
};
pub use sanitize::{is_stripped, sanitize_field};
