//! Accent palette keyed by gradient id.
//!
//! The main app stores a gradient id on every activity; the widget only needs
//! its solid accent color. Unknown ids fall back to `ember`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GRADIENT_ID: &str = "ember";

/// Alpha applied to filled heat-map cells (80% opacity).
pub const FILLED_CELL_ALPHA: u8 = 204;

/// An sRGB color with alpha, 0-255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub const fn opaque(hex: u32) -> Self {
        Rgba {
            red: ((hex >> 16) & 0xFF) as u8,
            green: ((hex >> 8) & 0xFF) as u8,
            blue: (hex & 0xFF) as u8,
            alpha: 0xFF,
        }
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        Rgba { alpha, ..self }
    }

    /// `#RRGGBB` for opaque colors, `#AARRGGBB` otherwise (Android's ordering).
    pub fn to_hex(&self) -> String {
        if self.alpha == 0xFF {
            format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                self.alpha, self.red, self.green, self.blue
            )
        }
    }
}

/// Background of a heat-map cell with nothing logged.
pub const EMPTY_CELL_COLOR: Rgba = Rgba::opaque(0x1A1A1F);

/// The fixed palette, in the order the main app presents it.
pub const GRADIENTS: [(&str, Rgba); 20] = [
    ("ember", Rgba::opaque(0xFF6B1A)),
    ("coral", Rgba::opaque(0xFF6B6B)),
    ("sunflower", Rgba::opaque(0xFFD93D)),
    ("mint", Rgba::opaque(0x6BCC78)),
    ("ocean", Rgba::opaque(0x4D96FF)),
    ("lavender", Rgba::opaque(0xB085F5)),
    ("rose", Rgba::opaque(0xFF8FAB)),
    ("teal", Rgba::opaque(0x4DD1E0)),
    ("sand", Rgba::opaque(0xD4A673)),
    ("silver", Rgba::opaque(0xB0B0B0)),
    ("ruby", Rgba::opaque(0xE63836)),
    ("peach", Rgba::opaque(0xFFAB91)),
    ("lime", Rgba::opaque(0xADEB00)),
    ("sky", Rgba::opaque(0x82D4FA)),
    ("violet", Rgba::opaque(0x7D4DFF)),
    ("magenta", Rgba::opaque(0xFF4082)),
    ("amber", Rgba::opaque(0xFFB300)),
    ("sage", Rgba::opaque(0xA6D6A6)),
    ("slate", Rgba::opaque(0x8FA3AD)),
    ("copper", Rgba::opaque(0xB87333)),
];

/// Returns the accent color for a gradient id, or the `ember` color if unknown.
pub fn gradient_color(gradient_id: &str) -> Rgba {
    GRADIENTS
        .iter()
        .find(|(id, _)| *id == gradient_id)
        .map(|(_, color)| *color)
        .unwrap_or(GRADIENTS[0].1)
}

/// Color of one heat-map cell for the given logged value.
pub fn cell_color(gradient_id: &str, value: f64) -> Rgba {
    if value > 0.0 {
        gradient_color(gradient_id).with_alpha(FILLED_CELL_ALPHA)
    } else {
        EMPTY_CELL_COLOR
    }
}

#[uniffi::export]
pub fn gradient_color_for(gradient_id: String) -> Rgba {
    gradient_color(&gradient_id)
}
