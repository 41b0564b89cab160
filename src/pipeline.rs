//! Parse + render as a single unit
//!
//! Document kinds are a closed set chosen once when a document is opened.
//! Only the delimited-table pipeline lives in this crate.

use std::path::Path;

use crate::csv::{
    detect_delimiter, parse_table_cancellable, Delimiter, ParseError, ParseLimits, Table,
};
use crate::render::{render_table_with, RenderOptions};
use crate::util::has_table_extension;

/// How a document is turned into markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Delimited text, optionally with a delimiter pinned by the extension
    Delimited { hint: Option<Delimiter> },
}

impl DocumentKind {
    /// Select the pipeline for a path.
    ///
    /// Unknown extensions are still treated as delimited text.
    pub fn from_path(path: &Path) -> Self {
        let hint = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Delimiter::from_extension);
        if !has_table_extension(path) {
            tracing::debug!(
                "No table extension on {}, treating as delimited text",
                path.display()
            );
        }
        DocumentKind::Delimited { hint }
    }

    /// Delimiter to use on first load: the extension hint, else detection
    pub fn initial_delimiter(&self, content: &str) -> Delimiter {
        match self {
            DocumentKind::Delimited { hint: Some(d) } => *d,
            DocumentKind::Delimited { hint: None } => detect_delimiter(content),
        }
    }
}

/// Result of one parse + render cycle
#[derive(Debug, Clone)]
pub struct Rendered {
    pub table: Table,
    pub markup: String,
}

/// Parse and render, polling `is_cancelled` between and during the stages.
///
/// `Ok(None)` means the work was abandoned in favor of a newer request.
pub fn parse_and_render(
    content: &str,
    delimiter: Delimiter,
    limits: &ParseLimits,
    options: &RenderOptions,
    is_cancelled: impl Fn() -> bool,
) -> Result<Option<Rendered>, ParseError> {
    let Some(table) = parse_table_cancellable(content, delimiter, limits, &is_cancelled)? else {
        return Ok(None);
    };
    if is_cancelled() {
        return Ok(None);
    }
    let markup = render_table_with(&table, options);
    Ok(Some(Rendered { table, markup }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_tsv_extension_pins_tab() {
        let kind = DocumentKind::from_path(Path::new("data.tsv"));
        assert_eq!(kind, DocumentKind::Delimited { hint: Some(Delimiter::Tab) });
        assert_eq!(kind.initial_delimiter("a,b,c"), Delimiter::Tab);
    }

    #[test]
    fn test_kind_from_csv_detects() {
        let kind = DocumentKind::from_path(Path::new("data.csv"));
        assert_eq!(kind.initial_delimiter("a;b;c\n1;2;3"), Delimiter::Semicolon);
    }

    #[test]
    fn test_parse_and_render() {
        let rendered = parse_and_render(
            "a,b\n1,2",
            Delimiter::Comma,
            &ParseLimits::default(),
            &RenderOptions::default(),
            || false,
        )
        .unwrap()
        .unwrap();
        assert_eq!(rendered.table.row_count(), 1);
        assert!(rendered.markup.contains("<td>1</td><td>2</td>"));
    }

    #[test]
    fn test_parse_and_render_cancelled() {
        let result = parse_and_render(
            "a,b\n1,2",
            Delimiter::Comma,
            &ParseLimits::default(),
            &RenderOptions::default(),
            || true,
        )
        .unwrap();
        assert!(result.is_none());
    }
}
