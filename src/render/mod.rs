//! Sanitizing table renderer
//!
//! Turns a [`Table`] into a complete, self-contained HTML document. Every
//! header and cell is entity-escaped, and the document head carries a content
//! policy that forbids scripts and plugins outright.
//!
//! Small tables render as one `<table>`; from `virtual_scroll_threshold` rows
//! on, header and body are split into separate containers and the body is
//! capped at `max_rendered_rows`.

mod escape;
mod html;
mod theme;

use serde::{Deserialize, Serialize};

use crate::csv::Table;

pub use escape::{escape_html, push_escaped};
pub use html::CONTENT_SECURITY_POLICY;
pub use theme::TableTheme;

pub const VIRTUAL_SCROLL_THRESHOLD: usize = 100;

pub const MAX_RENDERED_ROWS: usize = 2000;

/// Renderer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Row count at which the virtual-scrolling layout is used
    pub virtual_scroll_threshold: usize,
    /// Hard cap on rows emitted in the virtual-scrolling layout
    pub max_rendered_rows: usize,
    pub theme: TableTheme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            virtual_scroll_threshold: VIRTUAL_SCROLL_THRESHOLD,
            max_rendered_rows: MAX_RENDERED_ROWS,
            theme: TableTheme::default(),
        }
    }
}

/// Layout chosen for a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Nothing to show
    Empty,
    /// One complete table
    Standard,
    /// Split header/body with at most `shown` rows
    Virtual { shown: usize },
}

impl RenderMode {
    pub fn select(table: &Table, options: &RenderOptions) -> Self {
        if table.is_empty() {
            RenderMode::Empty
        } else if table.row_count() < options.virtual_scroll_threshold {
            RenderMode::Standard
        } else {
            RenderMode::Virtual {
                shown: table.row_count().min(options.max_rendered_rows),
            }
        }
    }
}

/// Render with default options
pub fn render_table(table: &Table) -> String {
    render_table_with(table, &RenderOptions::default())
}

/// Render a table into a complete HTML document
pub fn render_table_with(table: &Table, options: &RenderOptions) -> String {
    let theme = options.theme.sanitized();
    let mode = RenderMode::select(table, options);

    let body = match mode {
        RenderMode::Empty => html::no_data(),
        RenderMode::Standard => html::standard_table(table),
        RenderMode::Virtual { shown } => html::virtual_table(table, shown),
    };

    tracing::debug!(
        "Rendered {} ({:?}, {} bytes)",
        table.summary(),
        mode,
        body.len()
    );

    html::document(&table.summary(), &body, &theme)
}
