//! Element definitions for the diagram scene.
//!
//! Every placed element shares an id, a world-space anchor, a rotation and a
//! style. Geometry specific to a type lives in its [`ElementKind`] payload.

mod figure;
mod stroke;
mod text;

pub use figure::{BoxFigure, Caption, RadialFigure, Smile, TRIANGLE_SIDES};
pub use stroke::Stroke;
pub use text::Text;

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Default font size for text and captions.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;
/// Lower bound for any font size after a resize.
pub const MIN_FONT_SIZE: f64 = 5.0;
/// Lower bound for a box side (width, height, diameter) after a resize.
pub const MIN_BOX_SIZE: f64 = 5.0;

/// Clamp a scaled dimension to the minimum box size.
pub(crate) fn clamp_dimension(value: f64) -> f64 {
    if value.is_finite() {
        value.max(MIN_BOX_SIZE)
    } else {
        MIN_BOX_SIZE
    }
}

/// Clamp a font size to the minimum font size.
pub(crate) fn clamp_font_size(value: f64) -> f64 {
    if value.is_finite() {
        value.max(MIN_FONT_SIZE)
    } else {
        MIN_FONT_SIZE
    }
}

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized color: {0}")]
pub struct ColorParseError(pub String);

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

const NAMED_COLORS: &[(&str, SerializableColor)] = &[
    ("black", SerializableColor::BLACK),
    ("white", SerializableColor::WHITE),
    ("skyblue", SerializableColor::SKY_BLUE),
    ("yellow", SerializableColor::YELLOW),
    ("red", SerializableColor::new(255, 0, 0, 255)),
    ("green", SerializableColor::new(0, 128, 0, 255)),
    ("blue", SerializableColor::new(0, 0, 255, 255)),
    ("orange", SerializableColor::new(255, 165, 0, 255)),
    ("gray", SerializableColor::new(128, 128, 128, 255)),
    ("transparent", SerializableColor::TRANSPARENT),
];

impl SerializableColor {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const SKY_BLUE: Self = Self::new(135, 206, 235, 255);
    pub const YELLOW: Self = Self::new(255, 255, 0, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a color from `#rgb`, `#rrggbb`, `#rrggbbaa` or a known color name.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        let err = || ColorParseError(input.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(err());
            }
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16).map_err(|_| err())
            };
            return match hex.len() {
                3 => Ok(Self::new(
                    channel(0..1)? * 17,
                    channel(1..2)? * 17,
                    channel(2..3)? * 17,
                    255,
                )),
                6 => Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
                8 => Ok(Self::new(
                    channel(0..2)?,
                    channel(2..4)?,
                    channel(4..6)?,
                    channel(6..8)?,
                )),
                _ => Err(err()),
            };
        }

        let lower = trimmed.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, color)| *color)
            .ok_or_else(err)
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Paint properties shared by every element type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Fill color (None = no fill).
    pub fill: Option<SerializableColor>,
    /// Stroke color (None = no outline).
    pub stroke: Option<SerializableColor>,
    /// Stroke width in world units.
    pub stroke_width: Option<f64>,
}

impl ShapeStyle {
    pub fn new(
        fill: Option<SerializableColor>,
        stroke: Option<SerializableColor>,
        stroke_width: Option<f64>,
    ) -> Self {
        Self {
            fill,
            stroke,
            stroke_width,
        }
    }

    /// Get the fill color as a peniko Color.
    pub fn fill_color(&self) -> Option<Color> {
        self.fill.map(Into::into)
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke_color(&self) -> Option<Color> {
        self.stroke.map(Into::into)
    }
}

/// Type tag of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Rect,
    Triangle,
    Circle,
    Rhombus,
    Smile,
    Text,
    Line,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Rect => "rect",
            ElementType::Triangle => "triangle",
            ElementType::Circle => "circle",
            ElementType::Rhombus => "rhombus",
            ElementType::Smile => "smile",
            ElementType::Text => "text",
            ElementType::Line => "line",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-type geometry payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Rect(BoxFigure),
    Triangle(RadialFigure),
    Circle(RadialFigure),
    Rhombus(BoxFigure),
    Smile(Smile),
    Text(Text),
    Line(Stroke),
}

/// Which string field of an element a text edit writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextField {
    /// The content of a `text` element.
    Content,
    /// The caption (`shapeText`) of a figure or smile.
    Caption,
}

/// A placed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: ElementId,
    /// World-space anchor. Always the origin for `line`.
    pub position: Point,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Paint properties.
    pub style: ShapeStyle,
    /// Type-specific geometry.
    pub kind: ElementKind,
}

impl Element {
    /// Create an element with a fresh id.
    pub fn new(position: Point, style: ShapeStyle, kind: ElementKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            rotation: 0.0,
            style,
            kind,
        }
    }

    fn figure_style() -> ShapeStyle {
        ShapeStyle::new(
            Some(SerializableColor::SKY_BLUE),
            Some(SerializableColor::BLACK),
            Some(1.0),
        )
    }

    /// A 100 x 100 rectangle anchored at its top-left corner.
    pub fn rect(at: Point) -> Self {
        Self::new(at, Self::figure_style(), ElementKind::Rect(BoxFigure::new(100.0, 100.0)))
    }

    /// An 80 x 80 rhombus centered on `at`.
    pub fn rhombus(at: Point) -> Self {
        Self::new(at, Self::figure_style(), ElementKind::Rhombus(BoxFigure::new(80.0, 80.0)))
    }

    /// An upward triangle of radius 50 centered on `at`.
    pub fn triangle(at: Point) -> Self {
        Self::new(at, Self::figure_style(), ElementKind::Triangle(RadialFigure::new(50.0)))
    }

    /// A circle of radius 50 centered on `at`.
    pub fn circle(at: Point) -> Self {
        Self::new(at, Self::figure_style(), ElementKind::Circle(RadialFigure::new(50.0)))
    }

    /// A smiley face centered on `at`.
    pub fn smile(at: Point) -> Self {
        let style = ShapeStyle::new(
            Some(SerializableColor::YELLOW),
            Some(SerializableColor::BLACK),
            Some(2.0),
        );
        Self::new(at, style, ElementKind::Smile(Smile::new(50.0, 50.0)))
    }

    /// A text element with its top-left corner at `at`.
    pub fn text(at: Point, content: impl Into<String>) -> Self {
        let style = ShapeStyle::new(Some(SerializableColor::BLACK), None, None);
        Self::new(at, style, ElementKind::Text(Text::new(content)))
    }

    /// A freehand stroke starting at `start`. Its anchor is the origin.
    pub fn line(start: Point) -> Self {
        let style = ShapeStyle::new(None, Some(SerializableColor::BLACK), Some(3.0));
        Self::new(Point::ZERO, style, ElementKind::Line(Stroke::starting_at(start)))
    }

    /// Get the unique identifier.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Get the type tag.
    pub fn element_type(&self) -> ElementType {
        match &self.kind {
            ElementKind::Rect(_) => ElementType::Rect,
            ElementKind::Triangle(_) => ElementType::Triangle,
            ElementKind::Circle(_) => ElementType::Circle,
            ElementKind::Rhombus(_) => ElementType::Rhombus,
            ElementKind::Smile(_) => ElementType::Smile,
            ElementKind::Text(_) => ElementType::Text,
            ElementKind::Line(_) => ElementType::Line,
        }
    }

    /// Caption of a figure or smile.
    pub fn caption(&self) -> Option<&Caption> {
        match &self.kind {
            ElementKind::Rect(f) | ElementKind::Rhombus(f) => Some(&f.caption),
            ElementKind::Triangle(f) | ElementKind::Circle(f) => Some(&f.caption),
            ElementKind::Smile(s) => Some(&s.caption),
            ElementKind::Text(_) | ElementKind::Line(_) => None,
        }
    }

    pub fn caption_mut(&mut self) -> Option<&mut Caption> {
        match &mut self.kind {
            ElementKind::Rect(f) | ElementKind::Rhombus(f) => Some(&mut f.caption),
            ElementKind::Triangle(f) | ElementKind::Circle(f) => Some(&mut f.caption),
            ElementKind::Smile(s) => Some(&mut s.caption),
            ElementKind::Text(_) | ElementKind::Line(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match &self.kind {
            ElementKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match &self.kind {
            ElementKind::Line(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_stroke_mut(&mut self) -> Option<&mut Stroke> {
        match &mut self.kind {
            ElementKind::Line(s) => Some(s),
            _ => None,
        }
    }

    /// Font size of the text or caption (default for strokes).
    pub fn font_size(&self) -> f64 {
        match &self.kind {
            ElementKind::Text(t) => t.font_size,
            ElementKind::Line(_) => DEFAULT_FONT_SIZE,
            _ => self.caption().map_or(DEFAULT_FONT_SIZE, |c| c.font_size),
        }
    }

    pub fn set_font_size(&mut self, size: f64) {
        let size = clamp_font_size(size);
        if let ElementKind::Text(t) = &mut self.kind {
            t.font_size = size;
        } else if let Some(caption) = self.caption_mut() {
            caption.font_size = size;
        }
    }

    /// The field a direct text edit on this element targets.
    ///
    /// Smiles and strokes are not directly editable.
    pub fn editable_field(&self) -> Option<TextField> {
        match &self.kind {
            ElementKind::Text(_) => Some(TextField::Content),
            ElementKind::Smile(_) | ElementKind::Line(_) => None,
            _ => Some(TextField::Caption),
        }
    }

    /// Read a text field. Missing captions read as empty.
    pub fn text_field(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Content => self.as_text().map(|t| t.content.as_str()),
            TextField::Caption => self.caption().map(|c| c.text()),
        }
    }

    /// Write a text field. Returns false when the element has no such field.
    pub fn set_text_field(&mut self, field: TextField, value: &str) -> bool {
        match field {
            TextField::Content => match &mut self.kind {
                ElementKind::Text(t) => {
                    t.set_content(value);
                    true
                }
                _ => false,
            },
            TextField::Caption => match self.caption_mut() {
                Some(caption) => {
                    caption.set_text(value);
                    true
                }
                None => false,
            },
        }
    }

    /// Unrotated bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        let p = self.position;
        match &self.kind {
            ElementKind::Rect(f) => Rect::new(p.x, p.y, p.x + f.width, p.y + f.height),
            ElementKind::Rhombus(f) => {
                Rect::from_center_size(p, (f.width, f.height))
            }
            ElementKind::Triangle(f) | ElementKind::Circle(f) => {
                Rect::from_center_size(p, (f.diameter(), f.diameter()))
            }
            ElementKind::Smile(_) => {
                let d = Smile::FACE_RADIUS * 2.0;
                Rect::from_center_size(p, (d, d))
            }
            ElementKind::Text(t) => {
                let size = t.box_size();
                Rect::new(p.x, p.y, p.x + size.width, p.y + size.height)
            }
            ElementKind::Line(s) => s.bounds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_defaults() {
        let rect = Element::rect(Point::new(120.0, 80.0));
        assert_eq!(rect.element_type(), ElementType::Rect);
        assert_eq!(rect.position, Point::new(120.0, 80.0));
        assert_eq!(rect.style.fill, Some(SerializableColor::SKY_BLUE));
        assert_eq!(rect.style.stroke, Some(SerializableColor::BLACK));
        match &rect.kind {
            ElementKind::Rect(f) => {
                assert!((f.width - 100.0).abs() < f64::EPSILON);
                assert!((f.height - 100.0).abs() < f64::EPSILON);
                assert!(f.caption.text.is_none());
            }
            other => panic!("Expected rect, got {other:?}"),
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Element::circle(Point::ZERO);
        let b = Element::circle(Point::ZERO);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_line_anchor_is_origin() {
        let line = Element::line(Point::new(10.0, 10.0));
        assert_eq!(line.position, Point::ZERO);
        assert_eq!(line.as_stroke().map(|s| s.flat_points()), Some(vec![10.0, 10.0]));
        assert_eq!(line.style.fill, None);
    }

    #[test]
    fn test_editable_fields() {
        assert_eq!(Element::rect(Point::ZERO).editable_field(), Some(TextField::Caption));
        assert_eq!(Element::text(Point::ZERO, "hi").editable_field(), Some(TextField::Content));
        assert_eq!(Element::smile(Point::ZERO).editable_field(), None);
        assert_eq!(Element::line(Point::ZERO).editable_field(), None);
    }

    #[test]
    fn test_set_text_field() {
        let mut rect = Element::rect(Point::ZERO);
        assert_eq!(rect.text_field(TextField::Caption), Some(""));
        assert!(rect.set_text_field(TextField::Caption, "Start"));
        assert_eq!(rect.text_field(TextField::Caption), Some("Start"));
        assert!(!rect.set_text_field(TextField::Content, "nope"));
        assert_eq!(rect.text_field(TextField::Content), None);

        let mut line = Element::line(Point::ZERO);
        assert!(!line.set_text_field(TextField::Caption, "nope"));
    }

    #[test]
    fn test_font_size_floor() {
        let mut text = Element::text(Point::ZERO, "a");
        text.set_font_size(1.0);
        assert!((text.font_size() - MIN_FONT_SIZE).abs() < f64::EPSILON);
        text.set_font_size(f64::NAN);
        assert!((text.font_size() - MIN_FONT_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds_are_centered_for_radial_figures() {
        let circle = Element::circle(Point::new(100.0, 100.0));
        let bounds = circle.bounds();
        assert!((bounds.x0 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_colors() {
        assert_eq!(SerializableColor::parse("skyblue"), Ok(SerializableColor::SKY_BLUE));
        assert_eq!(SerializableColor::parse("#fff"), Ok(SerializableColor::WHITE));
        assert_eq!(
            SerializableColor::parse("#ff000080"),
            Ok(SerializableColor::new(255, 0, 0, 128))
        );
        assert!(SerializableColor::parse("#12345").is_err());
        assert!(SerializableColor::parse("#ggg").is_err());
        assert!(SerializableColor::parse("chartreuse-ish").is_err());
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(SerializableColor::SKY_BLUE.to_hex(), "#87ceeb");
        assert_eq!(SerializableColor::TRANSPARENT.to_hex(), "#00000000");
    }
}
