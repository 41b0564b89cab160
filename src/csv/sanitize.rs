//! Field sanitization applied as each cell is finalized
//!
//! Control characters and invisible bidi/formatting characters are removed
//! here, at parse time, so nothing downstream ever sees them. Line feeds and
//! tabs that survived tokenization (i.e. inside quoted fields) are content.

/// Invisible formatting characters that are always stripped
const INVISIBLE_FORMATTING: &[char] = &[
    '\u{061C}', // arabic letter mark
    '\u{200B}', // zero width space
    '\u{200E}', // left-to-right mark
    '\u{200F}', // right-to-left mark
    '\u{202A}', // left-to-right embedding
    '\u{202B}', // right-to-left embedding
    '\u{202C}', // pop directional formatting
    '\u{202D}', // left-to-right override
    '\u{202E}', // right-to-left override
    '\u{2060}', // word joiner
    '\u{2066}', // left-to-right isolate
    '\u{2067}', // right-to-left isolate
    '\u{2068}', // first strong isolate
    '\u{2069}', // pop directional isolate
    '\u{FEFF}', // zero width no-break space / BOM
];

/// Whether a character is dropped from cell content
#[inline]
pub fn is_stripped(ch: char) -> bool {
    (ch.is_control() && ch != '\n' && ch != '\t') || INVISIBLE_FORMATTING.contains(&ch)
}

/// Strip unsafe characters and truncate to `max_chars` characters
pub fn sanitize_field(raw: String, max_chars: usize) -> String {
    // Byte length bounds char count, so short clean fields need no copy
    if raw.len() <= max_chars && !raw.chars().any(is_stripped) {
        return raw;
    }

    raw.chars()
        .filter(|&ch| !is_stripped(ch))
        .take(max_chars)
        .collect()
}
