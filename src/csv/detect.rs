//! Delimiter detection by counting candidates in a sample

use super::model::Delimiter;

/// Number of leading lines inspected
pub const SAMPLE_LINES: usize = 10;

/// Split on `\n`, `\r\n` and bare `\r`
pub(crate) fn sample_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .flat_map(|line| line.split('\r'))
}

/// Detect the delimiter by analyzing the first few lines.
///
/// The candidate with the most occurrences wins; ties (including no
/// occurrences at all) go to the earliest candidate, so comma is the default.
pub fn detect_delimiter(content: &str) -> Delimiter {
    let mut counts = [0usize; Delimiter::ALL.len()];

    for line in sample_lines(content).take(SAMPLE_LINES) {
        for ch in line.chars() {
            if let Some(idx) = Delimiter::ALL.iter().position(|d| d.char() == ch) {
                counts[idx] += 1;
            }
        }
    }

    let mut best = 0;
    for (idx, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = idx;
        }
    }

    tracing::debug!(
        "Delimiter counts: comma={} tab={} semicolon={} -> {}",
        counts[0],
        counts[1],
        counts[2],
        Delimiter::ALL[best]
    );

    Delimiter::ALL[best]
}
