//! Events consumed from the presentation layer and the responses sent back.

use crate::elements::ElementId;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// One-shot result of a transformer gesture.
///
/// The presentation layer resets the node scale to 1 after sending this, so
/// `scale_x`/`scale_y` are relative to the element's current geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformCommit {
    pub id: ElementId,
    /// New world-space anchor.
    pub position: Point,
    /// New rotation in degrees.
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Box measured by the presentation layer before scaling (text only).
    #[serde(default)]
    pub rendered_size: Option<Size>,
}

/// Input event from the presentation layer.
///
/// Pointer positions are in screen space. A position is `None` when the
/// stage could not report one, and handlers ignore such events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown { position: Option<Point> },
    PointerMove { position: Option<Point> },
    PointerUp,
    /// Click that landed on empty canvas.
    StageClick { position: Option<Point> },
    ElementClick { id: ElementId },
    ElementDoubleClick { id: ElementId },
    /// Drag finished. `position` is the element's new world-space anchor.
    DragEnd { id: ElementId, position: Point },
    TransformEnd(TransformCommit),
    Wheel { pointer: Option<Point>, delta_y: f64 },
    /// New value of the text-edit box.
    TextInput { value: String },
    TextBlur,
    Resize { size: Size },
}

/// What changed while handling an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Response {
    /// The event did something.
    pub handled: bool,
    /// Elements were added or modified.
    pub scene_changed: bool,
    /// Selection changed; re-query the transformer target.
    pub selection_changed: bool,
    /// Camera or viewport changed.
    pub view_changed: bool,
    /// Text-edit focus or the property panel opened or closed.
    pub focus_changed: bool,
}

impl Response {
    /// Nothing happened.
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    pub fn with_scene_changed(mut self) -> Self {
        self.scene_changed = true;
        self
    }

    pub fn with_selection_changed(mut self) -> Self {
        self.selection_changed = true;
        self
    }

    pub fn with_view_changed(mut self) -> Self {
        self.view_changed = true;
        self
    }

    pub fn with_focus_changed(mut self) -> Self {
        self.focus_changed = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_builders() {
        assert!(!Response::ignored().handled);
        let response = Response::handled().with_scene_changed().with_selection_changed();
        assert!(response.handled);
        assert!(response.scene_changed);
        assert!(response.selection_changed);
        assert!(!response.view_changed);
        assert!(!response.focus_changed);
    }

    #[test]
    fn test_commit_from_json_without_rendered_size() {
        let json = r#"{
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "position": {"x": 1.0, "y": 2.0},
            "rotation": 30.0,
            "scale_x": 2.0,
            "scale_y": 1.0
        }"#;
        let commit: TransformCommit = serde_json::from_str(json).expect("valid commit");
        assert_eq!(commit.rendered_size, None);
        assert!((commit.scale_x - 2.0).abs() < f64::EPSILON);
    }
}
