//! Property panel contract: snapshot, validation and partial save.

use crate::elements::{
    Element, ElementId, ElementKind, ElementType, SerializableColor, DEFAULT_FONT_SIZE,
    clamp_dimension,
};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PANEL_FONT_SIZE: f64 = 8.0;
pub const MAX_PANEL_FONT_SIZE: f64 = 72.0;
const DEFAULT_FILL: &str = "#ffffff";

/// Errors from validating panel values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PanelError {
    #[error("Width must be at least 1, got {0}")]
    Width(f64),
    #[error("Height must be at least 1, got {0}")]
    Height(f64),
    #[error("Font size must be between 8 and 72, got {0}")]
    FontSize(f64),
    #[error("Rotation must be between 0 and 360, got {0}")]
    Rotation(f64),
    #[error(transparent)]
    Fill(#[from] crate::elements::ColorParseError),
}

/// Editable values shown in the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelValues {
    pub element_type: ElementType,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub font_size: f64,
    pub text: String,
    pub shape_text: String,
    pub fill: String,
}

impl PanelValues {
    /// Capture the current values of an element.
    pub fn snapshot(element: &Element) -> Self {
        let size = match &element.kind {
            ElementKind::Rect(f) | ElementKind::Rhombus(f) => Size::new(f.width, f.height),
            ElementKind::Triangle(f) | ElementKind::Circle(f) => {
                Size::new(f.diameter(), f.diameter())
            }
            ElementKind::Smile(s) => Size::new(s.width, s.height),
            ElementKind::Text(t) => t.box_size(),
            ElementKind::Line(_) => Size::ZERO,
        };
        let font_size = match element.element_type() {
            ElementType::Line => DEFAULT_FONT_SIZE,
            _ => element.font_size(),
        };
        Self {
            element_type: element.element_type(),
            width: size.width,
            height: size.height,
            rotation: element.rotation,
            font_size,
            text: element.as_text().map(|t| t.content.clone()).unwrap_or_default(),
            shape_text: element.caption().map(|c| c.text().to_string()).unwrap_or_default(),
            fill: element
                .style
                .fill
                .map_or_else(|| DEFAULT_FILL.to_string(), |c| c.to_hex()),
        }
    }

    fn has_dimensions(&self) -> bool {
        self.element_type != ElementType::Line
    }

    /// Check the values are within the ranges the panel accepts.
    pub fn validate(&self) -> Result<(), PanelError> {
        if self.has_dimensions() {
            if !(self.width >= 1.0) {
                return Err(PanelError::Width(self.width));
            }
            if !(self.height >= 1.0) {
                return Err(PanelError::Height(self.height));
            }
        }
        if !(MIN_PANEL_FONT_SIZE..=MAX_PANEL_FONT_SIZE).contains(&self.font_size) {
            return Err(PanelError::FontSize(self.font_size));
        }
        if !(0.0..=360.0).contains(&self.rotation) {
            return Err(PanelError::Rotation(self.rotation));
        }
        SerializableColor::parse(&self.fill)?;
        Ok(())
    }
}

/// Fields to overwrite on save. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelEdit {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub font_size: Option<f64>,
    pub text: Option<String>,
    pub shape_text: Option<String>,
    pub fill: Option<SerializableColor>,
}

fn changed<T: PartialEq + Clone>(before: &T, after: &T) -> Option<T> {
    (before != after).then(|| after.clone())
}

impl PanelEdit {
    /// Validate `edited` and keep only the fields that differ from `original`.
    pub fn between(original: &PanelValues, edited: &PanelValues) -> Result<Self, PanelError> {
        edited.validate()?;
        let fill = match changed(&original.fill, &edited.fill) {
            Some(fill) => Some(SerializableColor::parse(&fill)?),
            None => None,
        };
        Ok(Self {
            width: changed(&original.width, &edited.width),
            height: changed(&original.height, &edited.height),
            rotation: changed(&original.rotation, &edited.rotation),
            font_size: changed(&original.font_size, &edited.font_size),
            text: changed(&original.text, &edited.text),
            shape_text: changed(&original.shape_text, &edited.shape_text),
            fill,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the set fields into an element. Fields its type lacks are ignored.
    pub fn apply_to(&self, element: &mut Element) {
        if let Some(rotation) = self.rotation {
            element.rotation = rotation;
        }
        let is_line = element.element_type() == ElementType::Line;
        if let Some(fill) = self.fill.filter(|_| !is_line) {
            element.style.fill = Some(fill);
        }
        if let (Some(shape_text), Some(caption)) = (&self.shape_text, element.caption_mut()) {
            caption.set_text(shape_text);
        }

        match &mut element.kind {
            ElementKind::Rect(f) | ElementKind::Rhombus(f) => {
                if let Some(width) = self.width {
                    f.width = clamp_dimension(width);
                }
                if let Some(height) = self.height {
                    f.height = clamp_dimension(height);
                }
            }
            ElementKind::Triangle(f) | ElementKind::Circle(f) => {
                if let Some(width) = self.width {
                    f.radius = clamp_dimension(width) / 2.0;
                }
            }
            ElementKind::Smile(s) => {
                if let Some(width) = self.width {
                    s.width = clamp_dimension(width);
                }
                if let Some(height) = self.height {
                    s.height = clamp_dimension(height);
                }
            }
            ElementKind::Text(t) => {
                if let Some(text) = &self.text {
                    t.set_content(text);
                }
                if self.width.is_some() || self.height.is_some() {
                    let current = t.box_size();
                    t.size = Some(Size::new(
                        self.width.map_or(current.width, clamp_dimension),
                        self.height.map_or(current.height, clamp_dimension),
                    ));
                }
            }
            ElementKind::Line(_) => {}
        }

        if let Some(font_size) = self.font_size.filter(|_| !is_line) {
            element.set_font_size(font_size);
        }
    }
}

/// An open property panel: the target element and the values being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyPanel {
    pub target: ElementId,
    original: PanelValues,
    /// Local values. Discarded if the panel closes without saving.
    pub values: PanelValues,
}

impl PropertyPanel {
    pub fn open(element: &Element) -> Self {
        let values = PanelValues::snapshot(element);
        Self {
            target: element.id(),
            original: values.clone(),
            values,
        }
    }

    /// Values as they were when the panel opened.
    pub fn original(&self) -> &PanelValues {
        &self.original
    }

    /// Validate the local values and build the edit to save.
    pub fn edit(&self) -> Result<PanelEdit, PanelError> {
        PanelEdit::between(&self.original, &self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_snapshot_rect() {
        let rect = Element::rect(Point::new(10.0, 20.0));
        let values = PanelValues::snapshot(&rect);
        assert_eq!(values.element_type, ElementType::Rect);
        assert!((values.width - 100.0).abs() < f64::EPSILON);
        assert!((values.font_size - 16.0).abs() < f64::EPSILON);
        assert_eq!(values.shape_text, "");
        assert_eq!(values.text, "");
        assert_eq!(values.fill, "#87ceeb");
    }

    #[test]
    fn test_snapshot_circle_reports_diameter() {
        let values = PanelValues::snapshot(&Element::circle(Point::ZERO));
        assert!((values.width - 100.0).abs() < f64::EPSILON);
        assert!((values.height - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snapshot_line_defaults() {
        let values = PanelValues::snapshot(&Element::line(Point::ZERO));
        assert!((values.width).abs() < f64::EPSILON);
        assert_eq!(values.fill, "#ffffff");
        assert!(values.validate().is_ok());
    }

    #[test]
    fn test_validation_bounds() {
        let base = PanelValues::snapshot(&Element::rect(Point::ZERO));
        assert!(base.validate().is_ok());

        let mut v = base.clone();
        v.width = 0.5;
        assert_eq!(v.validate(), Err(PanelError::Width(0.5)));

        let mut v = base.clone();
        v.height = f64::NAN;
        assert!(matches!(v.validate(), Err(PanelError::Height(_))));

        let mut v = base.clone();
        v.font_size = 7.0;
        assert_eq!(v.validate(), Err(PanelError::FontSize(7.0)));
        v.font_size = 72.0;
        assert!(v.validate().is_ok());

        let mut v = base.clone();
        v.rotation = 361.0;
        assert_eq!(v.validate(), Err(PanelError::Rotation(361.0)));

        let mut v = base;
        v.fill = "not a color".to_string();
        assert!(matches!(v.validate(), Err(PanelError::Fill(_))));
    }

    #[test]
    fn test_edit_keeps_only_changes() {
        let rect = Element::rect(Point::ZERO);
        let mut panel = PropertyPanel::open(&rect);
        panel.values.width = 150.0;
        panel.values.shape_text = "Start".to_string();
        let edit = panel.edit().expect("valid");
        assert_eq!(edit.width, Some(150.0));
        assert_eq!(edit.shape_text.as_deref(), Some("Start"));
        assert_eq!(edit.height, None);
        assert_eq!(edit.fill, None);
    }

    #[test]
    fn test_apply_to_rect() {
        let mut rect = Element::rect(Point::ZERO);
        let edit = PanelEdit {
            width: Some(150.0),
            rotation: Some(45.0),
            fill: Some(SerializableColor::YELLOW),
            shape_text: Some("Start".to_string()),
            text: Some("ignored".to_string()),
            ..PanelEdit::default()
        };
        edit.apply_to(&mut rect);
        match &rect.kind {
            ElementKind::Rect(f) => {
                assert!((f.width - 150.0).abs() < f64::EPSILON);
                assert!((f.height - 100.0).abs() < f64::EPSILON);
                assert_eq!(f.caption.text(), "Start");
            }
            other => panic!("Expected rect, got {other:?}"),
        }
        assert!((rect.rotation - 45.0).abs() < f64::EPSILON);
        assert_eq!(rect.style.fill, Some(SerializableColor::YELLOW));
    }

    #[test]
    fn test_apply_to_circle_width_sets_radius() {
        let mut circle = Element::circle(Point::ZERO);
        PanelEdit {
            width: Some(60.0),
            height: Some(500.0),
            ..PanelEdit::default()
        }
        .apply_to(&mut circle);
        match &circle.kind {
            ElementKind::Circle(f) => assert!((f.radius - 30.0).abs() < f64::EPSILON),
            other => panic!("Expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_to_text() {
        let mut text = Element::text(Point::ZERO, "Click to edit");
        PanelEdit {
            text: Some("Title".to_string()),
            font_size: Some(24.0),
            width: Some(120.0),
            ..PanelEdit::default()
        }
        .apply_to(&mut text);
        let t = text.as_text().expect("text");
        assert_eq!(t.content, "Title");
        assert!((t.font_size - 24.0).abs() < f64::EPSILON);
        assert!((t.box_size().width - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_edit() {
        let panel = PropertyPanel::open(&Element::smile(Point::ZERO));
        assert!(panel.edit().expect("valid").is_empty());
    }
}
