//! Table theme - colors for rendered table markup (CSS-formatted)

use serde::{Deserialize, Serialize};

/// Theme colors for table rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableTheme {
    pub background: String,
    pub text: String,
    pub header_background: String,
    pub header_text: String,
    pub border: String,
    pub stripe: String,
    pub muted: String,
    pub notice_background: String,
}

impl Default for TableTheme {
    fn default() -> Self {
        Self {
            background: "#1e1e1e".to_string(),
            text: "#d4d4d4".to_string(),
            header_background: "#252526".to_string(),
            header_text: "#569cd6".to_string(),
            border: "#3c3c3c".to_string(),
            stripe: "#232323".to_string(),
            muted: "#858585".to_string(),
            notice_background: "#3a3d41".to_string(),
        }
    }
}

impl TableTheme {
    /// Copy of the theme where every color is a plain hex color.
    ///
    /// Theme values come from user config and end up inside a `<style>`
    /// element; anything but `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` is
    /// replaced with the default for that slot.
    pub fn sanitized(&self) -> TableTheme {
        let defaults = TableTheme::default();
        let pick = |value: &str, fallback: String| {
            if is_hex_color(value) {
                value.to_string()
            } else {
                tracing::warn!("Ignoring invalid theme color {:?}", value);
                fallback
            }
        };

        TableTheme {
            background: pick(&self.background, defaults.background),
            text: pick(&self.text, defaults.text),
            header_background: pick(&self.header_background, defaults.header_background),
            header_text: pick(&self.header_text, defaults.header_text),
            border: pick(&self.border, defaults.border),
            stripe: pick(&self.stripe, defaults.stripe),
            muted: pick(&self.muted, defaults.muted),
            notice_background: pick(&self.notice_background, defaults.notice_background),
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}
