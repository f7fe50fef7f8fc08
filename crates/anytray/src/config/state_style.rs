use serde::{Deserialize, Serialize};

/// Symbol drawn over the colored disc of a state's icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    /// `!`
    Exclamation,
    /// `?`
    Question,
}

impl Glyph {
    /// 5x7 bitmap, one row per byte, most significant of the low five bits
    /// on the left.
    pub fn bitmap(self) -> [u8; 7] {
        match self {
            Glyph::Exclamation => [
                0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100,
            ],
            Glyph::Question => [
                0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100,
            ],
        }
    }
}

/// How one recognized state looks in the tray.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateStyle {
    /// Command string that selects this state.
    pub name: String,
    /// Fill color as `#rrggbb`.
    pub color: String,
    /// Optional overlay symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph: Option<Glyph>,
}

impl StateStyle {
    /// Convenience constructor.
    pub fn new(name: &str, color: &str, glyph: Option<Glyph>) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            glyph,
        }
    }

    /// Parsed fill color, or `None` if `color` is not `#rrggbb`.
    pub fn rgb(&self) -> Option<[u8; 3]> {
        parse_hex_color(&self.color)
    }

    /// The built-in palette.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("black", "#1b1b1b", None),
            Self::new("blue", "#0074d9", None),
            Self::new("cyan", "#39cccc", None),
            Self::new("exclamation", "#ffdc00", Some(Glyph::Exclamation)),
            Self::new("green", "#2ecc40", None),
            Self::new("orange", "#ff851b", None),
            Self::new("purple", "#b10dc9", None),
            Self::new("question", "#0074d9", Some(Glyph::Question)),
            Self::new("red", "#ff4136", None),
            Self::new("white", "#ffffff", None),
            Self::new("yellow", "#ffdc00", None),
        ]
    }
}

/// Parse `#rrggbb` (case-insensitive hex) into RGB bytes.
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    // from_str_radix alone would accept a leading '+'
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
