//! HTML document templates for rendered tables

use super::escape::push_escaped;
use super::theme::TableTheme;
use crate::csv::Table;

/// Content policy embedded in every document: no scripts, no plugins, no
/// network loads. Inline styles are the only thing allowed.
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; script-src 'none'; \
object-src 'none'; style-src 'unsafe-inline'; img-src 'none'; \
base-uri 'none'; form-action 'none'; frame-ancestors 'none'";

/// Fixed column width used to keep split header/body tables aligned
const VIRTUAL_COLUMN_WIDTH_EM: usize = 12;

/// Wrap a body fragment into a complete document
pub fn document(summary: &str, body: &str, theme: &TableTheme) -> String {
    let mut escaped_summary = String::new();
    push_escaped(&mut escaped_summary, summary);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta http-equiv="Content-Security-Policy" content="{csp}">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>{css}</style>
</head>
<body>
    <header class="table-header">
        <div class="table-summary">{summary}</div>
    </header>
{body}
</body>
</html>"#,
        csp = CONTENT_SECURITY_POLICY,
        css = generate_css(theme),
        summary = escaped_summary,
        body = body,
    )
}

/// Fragment shown for a table with no header and no rows
pub fn no_data() -> String {
    "    <div class=\"no-data\">No data</div>\n".to_string()
}

fn push_header_row(out: &mut String, headers: &[String]) {
    out.push_str("<tr>");
    for header in headers {
        out.push_str("<th>");
        push_escaped(out, header);
        out.push_str("</th>");
    }
    out.push_str("</tr>\n");
}

fn push_body_rows(out: &mut String, rows: &[Vec<String>]) {
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            push_escaped(out, cell);
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
}

/// Single complete `<table>` with every row
pub fn standard_table(table: &Table) -> String {
    let mut out = String::with_capacity(64 * (table.row_count() + 1) * table.column_count().max(1));
    out.push_str("    <div class=\"table-container\">\n<table class=\"data-table\">\n<thead>\n");
    push_header_row(&mut out, &table.headers);
    out.push_str("</thead>\n<tbody>\n");
    push_body_rows(&mut out, &table.rows);
    out.push_str("</tbody>\n</table>\n    </div>\n");
    out
}

fn push_colgroup(out: &mut String, columns: usize) {
    out.push_str("<colgroup>");
    for _ in 0..columns {
        out.push_str("<col>");
    }
    out.push_str("</colgroup>\n");
}

/// Split header/body layout capped at `max_rows` rendered rows.
///
/// Both tables sit inside one horizontal scroller and share fixed column
/// widths, so the header follows the body sideways without any script;
/// only the body scrolls vertically.
pub fn virtual_table(table: &Table, max_rows: usize) -> String {
    let shown = table.row_count().min(max_rows);
    let columns = table.max_row_width();
    let width_em = columns.max(1) * VIRTUAL_COLUMN_WIDTH_EM;

    let mut out = String::with_capacity(64 * (shown + 1) * columns.max(1));
    out.push_str(&format!(
        "    <div class=\"row-notice\">Showing first {} of {} rows</div>\n",
        shown,
        table.row_count()
    ));
    out.push_str(&format!(
        "    <div class=\"virtual-table\" data-total-rows=\"{}\" data-rendered-rows=\"{}\">\n",
        table.row_count(),
        shown
    ));
    out.push_str("<div class=\"scroll-x\">\n");

    out.push_str("<div class=\"header-container\">\n");
    out.push_str(&format!(
        "<table class=\"header-table\" style=\"width: {}em\">\n",
        width_em
    ));
    push_colgroup(&mut out, columns);
    out.push_str("<thead>\n");
    push_header_row(&mut out, &table.headers);
    out.push_str("</thead>\n</table>\n</div>\n");

    out.push_str("<div class=\"body-container\">\n");
    out.push_str(&format!(
        "<table class=\"body-table\" style=\"width: {}em\">\n",
        width_em
    ));
    push_colgroup(&mut out, columns);
    out.push_str("<tbody>\n");
    push_body_rows(&mut out, &table.rows[..shown]);
    out.push_str("</tbody>\n</table>\n</div>\n");

    out.push_str("</div>\n    </div>\n");
    out
}

/// Generate CSS from theme colors
fn generate_css(theme: &TableTheme) -> String {
    format!(
        r#"
* {{
    box-sizing: border-box;
}}

body {{
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
    font-size: 13px;
    line-height: 1.4;
    color: {text};
    background: {background};
    margin: 0;
    padding: 12px;
}}

.table-header {{
    margin-bottom: 8px;
}}

.table-summary {{
    color: {muted};
    font-size: 12px;
}}

.no-data {{
    color: {muted};
    padding: 24px;
    text-align: center;
}}

table {{
    border-collapse: collapse;
    border-spacing: 0;
}}

th, td {{
    padding: 4px 10px;
    border: 1px solid {border};
    text-align: left;
    vertical-align: top;
    white-space: pre-wrap;
    overflow-wrap: anywhere;
}}

th {{
    font-weight: 600;
    color: {header_text};
    background: {header_background};
}}

tbody tr:nth-child(2n) {{
    background: {stripe};
}}

.table-container {{
    overflow: auto;
}}

.data-table thead th {{
    position: sticky;
    top: 0;
}}

.row-notice {{
    background: {notice_background};
    color: {text};
    padding: 4px 10px;
    margin-bottom: 8px;
    border-radius: 3px;
}}

.virtual-table .scroll-x {{
    overflow-x: auto;
    overflow-y: hidden;
}}

.virtual-table table {{
    table-layout: fixed;
}}

.virtual-table col {{
    width: {col_width}em;
}}

.virtual-table .body-container {{
    max-height: calc(100vh - 120px);
    overflow-y: auto;
    overflow-x: hidden;
    display: inline-block;
}}
"#,
        text = theme.text,
        background = theme.background,
        muted = theme.muted,
        border = theme.border,
        header_text = theme.header_text,
        header_background = theme.header_background,
        stripe = theme.stripe,
        notice_background = theme.notice_background,
        col_width = VIRTUAL_COLUMN_WIDTH_EM,
    )
}
