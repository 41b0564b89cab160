//! Shared helpers for benchmarks

use tabview::{parse_table, Delimiter, ParseLimits, Table};

/// Comma-separated text with a header and `rows` x `cols` cells
#[allow(dead_code)]
pub fn make_csv(rows: usize, cols: usize) -> String {
    let mut out = String::with_capacity(rows * cols * 8);
    for c in 0..cols {
        if c > 0 {
            out.push(',');
        }
        out.push_str(&format!("col{}", c));
    }
    out.push('\n');
    for r in 0..rows {
        for c in 0..cols {
            if c > 0 {
                out.push(',');
            }
            // Every seventh cell needs quoting
            if (r + c) % 7 == 0 {
                out.push_str(&format!("\"r{}, c{}\"", r, c));
            } else {
                out.push_str(&format!("r{}c{}", r, c));
            }
        }
        out.push('\n');
    }
    out
}

/// Parsed table with `rows` x `cols` cells
#[allow(dead_code)]
pub fn make_table(rows: usize, cols: usize) -> Table {
    parse_table(&make_csv(rows, cols), Delimiter::Comma, &ParseLimits::default())
        .unwrap_or_default()
}
