//! Free-standing text element.

use super::{DEFAULT_FONT_SIZE, clamp_dimension, clamp_font_size};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Minimum box width reported for any text.
const MIN_TEXT_WIDTH: f64 = 20.0;
/// Average glyph advance relative to the font size.
const CHAR_WIDTH_FACTOR: f64 = 0.55;
/// Line height relative to the font size.
const LINE_HEIGHT: f64 = 1.2;

/// Text payload. The anchor is the top-left corner of the text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub content: String,
    pub font_size: f64,
    /// Box size last reported by the presentation layer, if any.
    #[serde(default)]
    pub size: Option<Size>,
}

impl Text {
    /// Content given to text placed with the text tool.
    pub const PLACEHOLDER: &'static str = "Click to edit";

    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: DEFAULT_FONT_SIZE,
            size: None,
        }
    }

    /// Replace the content. A cached box size no longer matches and is dropped.
    pub fn set_content(&mut self, content: &str) {
        if self.content != content {
            self.content = content.to_string();
            self.size = None;
        }
    }

    /// Approximate box size from the content and font size.
    pub fn estimated_size(&self) -> Size {
        let widest = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let mut line_count = self.content.lines().count().max(1);
        if self.content.ends_with('\n') {
            line_count += 1;
        }
        Size::new(
            (widest as f64 * self.font_size * CHAR_WIDTH_FACTOR).max(MIN_TEXT_WIDTH),
            line_count as f64 * self.font_size * LINE_HEIGHT,
        )
    }

    /// Cached size when known, the estimate otherwise.
    pub fn box_size(&self) -> Size {
        match self.size {
            Some(size) => Size::new(size.width.max(MIN_TEXT_WIDTH), size.height),
            None => self.estimated_size(),
        }
    }

    /// Bake a transformer scale into the font size and cached box.
    ///
    /// `rendered` is the box the presentation layer measured before the
    /// scale was applied.
    pub fn apply_scale(&mut self, sx: f64, sy: f64, rendered: Option<Size>) {
        let base = rendered.unwrap_or_else(|| self.box_size());
        self.font_size = clamp_font_size(self.font_size * sx.min(sy));
        self.size = Some(Size::new(
            clamp_dimension(base.width * sx),
            clamp_dimension(base.height * sy),
        ));
    }
}
