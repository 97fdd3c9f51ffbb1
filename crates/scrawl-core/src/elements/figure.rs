//! Figure payloads: box-shaped, radius-based and the smiley face.

use super::{DEFAULT_FONT_SIZE, clamp_dimension, clamp_font_size};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Number of sides drawn for a triangle.
pub const TRIANGLE_SIDES: usize = 3;

/// Optional caption drawn centered inside a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub text: Option<String>,
    pub font_size: f64,
}

impl Default for Caption {
    fn default() -> Self {
        Self {
            text: None,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl Caption {
    /// Caption text, empty when unset.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }

    /// Scale the font by `factor`, never going below the minimum font size.
    pub fn scale_font(&mut self, factor: f64) {
        self.font_size = clamp_font_size(self.font_size * factor);
    }
}

/// Width/height figure (rect and rhombus).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxFigure {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub caption: Caption,
}

impl BoxFigure {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            caption: Caption::default(),
        }
    }

    /// Bake a transformer scale into the dimensions.
    pub fn apply_scale(&mut self, sx: f64, sy: f64) {
        self.width = clamp_dimension(self.width * sx);
        self.height = clamp_dimension(self.height * sy);
        self.caption.scale_font(sx.min(sy));
    }
}

/// Radius-based figure (triangle and circle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialFigure {
    pub radius: f64,
    #[serde(default)]
    pub caption: Caption,
}

impl RadialFigure {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            caption: Caption::default(),
        }
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Bake a transformer scale into the radius. Only the X scale applies.
    pub fn apply_scale(&mut self, sx: f64, sy: f64) {
        self.radius = clamp_dimension(self.diameter() * sx) / 2.0;
        self.caption.scale_font(sx.min(sy));
    }
}

/// Smiley face. Width and height are tracked but the face is drawn at a fixed size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Smile {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub caption: Caption,
}

impl Smile {
    pub const FACE_RADIUS: f64 = 25.0;
    pub const EYE_RADIUS: f64 = 5.0;
    /// Offset of the right eye from the face center; the left eye mirrors it.
    pub const EYE_OFFSET: Vec2 = Vec2::new(10.0, -10.0);
    pub const MOUTH_START: Point = Point::new(-15.0, 10.0);
    pub const MOUTH_END: Point = Point::new(15.0, 10.0);

    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            caption: Caption::default(),
        }
    }

    pub fn apply_scale(&mut self, sx: f64, sy: f64) {
        self.width = clamp_dimension(self.width * sx);
        self.height = clamp_dimension(self.height * sy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{MIN_BOX_SIZE, MIN_FONT_SIZE};

    #[test]
    fn test_box_scale() {
        let mut rect = BoxFigure::new(100.0, 100.0);
        rect.apply_scale(1.5, 0.5);
        assert!((rect.width - 150.0).abs() < f64::EPSILON);
        assert!((rect.height - 50.0).abs() < f64::EPSILON);
        assert!((rect.caption.font_size - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_box_scale_clamps() {
        let mut rect = BoxFigure::new(100.0, 100.0);
        rect.apply_scale(0.001, 0.001);
        assert!((rect.width - MIN_BOX_SIZE).abs() < f64::EPSILON);
        assert!((rect.height - MIN_BOX_SIZE).abs() < f64::EPSILON);
        assert!((rect.caption.font_size - MIN_FONT_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_infinite_scale_falls_back_to_minimum() {
        let mut rect = BoxFigure::new(100.0, 100.0);
        rect.apply_scale(f64::INFINITY, 1.0);
        assert!((rect.width - MIN_BOX_SIZE).abs() < f64::EPSILON);
        assert!((rect.height - 100.0).abs() < f64::EPSILON);
        assert!((rect.caption.font_size - 16.0).abs() < f64::EPSILON);

        rect.caption.scale_font(f64::INFINITY);
        assert!((rect.caption.font_size - MIN_FONT_SIZE).abs() < f64::EPSILON);

        let mut smile = Smile::new(40.0, 40.0);
        smile.apply_scale(f64::NAN, f64::INFINITY);
        assert!((smile.width - MIN_BOX_SIZE).abs() < f64::EPSILON);
        assert!((smile.height - MIN_BOX_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_radial_ignores_y_scale() {
        let mut circle = RadialFigure::new(50.0);
        circle.apply_scale(2.0, 7.0);
        assert!((circle.radius - 100.0).abs() < f64::EPSILON);
        circle.apply_scale(0.0, 1.0);
        assert!((circle.radius - MIN_BOX_SIZE / 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_caption_text() {
        let mut caption = Caption::default();
        assert_eq!(caption.text(), "");
        caption.set_text("Decision");
        assert_eq!(caption.text(), "Decision");
    }
}
