//! Domain types for model-detected slide regions and their styling.

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// A region detected by the vision model on one slide image.
///
/// The model reports a JSON array of objects discriminated by a `type`
/// field; anything other than the two known kinds fails to deserialize
/// and is skipped by the lenient parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Region {
    /// A text region, reconstructed as an editable text box.
    TextBlock {
        /// The recognized text content.
        #[serde(default)]
        content: String,

        /// Region bounds in the normalized 0-1000 space.
        #[serde(default)]
        box_2d: BoundingBox,

        /// Style hints reported alongside the text.
        #[serde(default)]
        style: TextStyle,
    },

    /// A non-text region, reconstructed as a cropped picture.
    VisualElement {
        /// Region bounds in the normalized 0-1000 space.
        #[serde(default)]
        box_2d: BoundingBox,
    },
}

impl Region {
    /// The bounding box of this region.
    pub fn bounds(&self) -> &BoundingBox {
        match self {
            Region::TextBlock { box_2d, .. } | Region::VisualElement { box_2d } => box_2d,
        }
    }

    /// Whether this region is a visual (picture) element.
    pub fn is_visual(&self) -> bool {
        matches!(self, Region::VisualElement { .. })
    }
}

/// Style hints the model attaches to a text block.
///
/// Every field is optional in the model output; defaults mirror plain
/// body text (12pt, regular weight, black, left-aligned).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Font size in points, as estimated by the model.
    pub font_size: f32,

    /// Whether the text is bold.
    pub is_bold: bool,

    /// Text color as a `#RRGGBB` hex string.
    pub color_hex: String,

    /// Horizontal paragraph alignment.
    pub alignment: Alignment,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            is_bold: false,
            color_hex: "#000000".to_string(),
            alignment: Alignment::Left,
        }
    }
}

impl TextStyle {
    /// Font size clamped to the range the composer will actually use.
    ///
    /// Model size estimates are occasionally wild; anything outside
    /// 8-100pt is pulled back into range.
    pub fn clamped_font_size(&self) -> f32 {
        self.font_size.clamp(8.0, 100.0)
    }

    /// Parse the color hint, falling back to black on malformed input.
    pub fn color(&self) -> Rgb {
        Rgb::from_hex(&self.color_hex).unwrap_or(Rgb::BLACK)
    }
}

/// Horizontal paragraph alignment.
///
/// Deserialized from the model's free-form string; anything that is not
/// `center` or `right` means left, matching how the hints are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl From<String> for Alignment {
    fn from(value: String) -> Self {
        match value.as_str() {
            "center" => Alignment::Center,
            "right" => Alignment::Right,
            _ => Alignment::Left,
        }
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::Left
    }
}

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Parse a `#RRGGBB` (or `RRGGBB`) hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Rgb { r, g, b })
    }

    /// Format as the uppercase `RRGGBB` form DrawingML expects.
    pub fn to_drawingml(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
