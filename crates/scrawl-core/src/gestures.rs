//! Gesture handlers: turn input events into scene mutations.

use crate::canvas::Canvas;
use crate::elements::{Element, ElementId, ElementKind, TextField};
use crate::input::{Response, TransformCommit};
use crate::panel::PropertyPanel;
use crate::tools::ToolKind;
use kurbo::{Point, Size, Vec2};

/// Bake a transformer commit into an element's geometry.
///
/// Scale factors are taken by magnitude; a mirrored resize keeps its size.
pub fn apply_transform(element: &mut Element, commit: &TransformCommit) {
    let sx = commit.scale_x.abs();
    let sy = commit.scale_y.abs();
    match &mut element.kind {
        ElementKind::Rect(f) | ElementKind::Rhombus(f) => f.apply_scale(sx, sy),
        ElementKind::Triangle(f) | ElementKind::Circle(f) => f.apply_scale(sx, sy),
        ElementKind::Smile(s) => s.apply_scale(sx, sy),
        ElementKind::Text(t) => t.apply_scale(sx, sy, commit.rendered_size),
        ElementKind::Line(_) => {}
    }
    move_to(element, commit.position);
    // Stroke points are absolute, so a rotation about the origin would not
    // match the handle's pose.
    if element.as_stroke().is_none() {
        element.rotation = commit.rotation;
    }
}

/// Move an element's anchor. Strokes keep their anchor at the origin and
/// shift their points instead.
fn move_to(element: &mut Element, position: Point) {
    let anchor = element.position;
    match element.as_stroke_mut() {
        Some(stroke) => {
            let delta: Vec2 = position - anchor;
            for point in &mut stroke.points {
                *point += delta;
            }
        }
        None => element.position = position,
    }
}

/// Finite and not negative in both directions.
pub(crate) fn valid_viewport(size: Size) -> bool {
    size.is_finite() && size.width >= 0.0 && size.height >= 0.0
}

impl Canvas {
    fn is_cursor(&self) -> bool {
        self.tools.current_tool == ToolKind::Cursor
    }

    pub(crate) fn on_wheel(&mut self, pointer: Option<Point>, delta_y: f64) -> Response {
        let Some(pointer) = pointer else {
            log::trace!("Wheel without pointer position");
            return Response::ignored();
        };
        self.camera.zoom_at(pointer, delta_y);
        Response::handled().with_view_changed()
    }

    pub(crate) fn on_stage_click(&mut self, position: Option<Point>) -> Response {
        let Some(position) = position else {
            return Response::ignored();
        };
        let had_panel = self.panel.take().is_some();
        match self.tools.current_tool {
            ToolKind::Cursor => {
                let had_focus = self.scene.end_text_edit().is_some() || had_panel;
                let had_selection = self.scene.selected().is_some();
                self.scene.clear_selection();
                let mut response = Response::handled();
                if had_selection {
                    response = response.with_selection_changed();
                }
                if had_focus {
                    response = response.with_focus_changed();
                }
                response
            }
            ToolKind::Pencil => Response::ignored(),
            tool => {
                let world = self.camera.screen_to_world(position);
                let Some(element) = self.tools.placement(world, &self.config().text_placeholder)
                else {
                    return Response::ignored();
                };
                let id = self.scene.add(element);
                self.scene.select(id);
                let mut response = Response::handled().with_scene_changed().with_selection_changed();
                match tool {
                    ToolKind::Figures => self.tools.figure_picker_open = false,
                    ToolKind::Text => {
                        self.scene.begin_text_edit(id, TextField::Content);
                        response = response.with_focus_changed();
                    }
                    _ => {}
                }
                response
            }
        }
    }

    pub(crate) fn on_pointer_down(&mut self, position: Option<Point>) -> Response {
        if self.tools.current_tool != ToolKind::Pencil {
            return Response::ignored();
        }
        let Some(position) = position else {
            return Response::ignored();
        };
        let world = self.camera.screen_to_world(position);
        let id = self.scene.add(Element::line(world));
        self.tools.begin_stroke(id);
        Response::handled().with_scene_changed()
    }

    pub(crate) fn on_pointer_move(&mut self, position: Option<Point>) -> Response {
        let Some(stroke_id) = self.tools.active_stroke() else {
            return Response::ignored();
        };
        let Some(position) = position else {
            return Response::ignored();
        };
        let world = self.camera.screen_to_world(position);
        match self.scene.get_mut(stroke_id).and_then(|e| e.as_stroke_mut()) {
            Some(stroke) => {
                stroke.push(world);
                Response::handled().with_scene_changed()
            }
            None => {
                log::warn!("Active stroke {stroke_id} is not a line, dropping sample");
                Response::ignored()
            }
        }
    }

    pub(crate) fn on_pointer_up(&mut self) -> Response {
        match self.tools.end_stroke() {
            Some(id) => {
                log::debug!("Finished stroke {id}");
                Response::handled()
            }
            None => Response::ignored(),
        }
    }

    pub(crate) fn on_element_click(&mut self, id: ElementId) -> Response {
        if !self.is_cursor() {
            return Response::ignored();
        }
        let Some(element) = self.scene.get(id) else {
            log::debug!("Click on unknown element {id}");
            return Response::ignored();
        };
        let is_text = element.as_text().is_some();
        let panel = (!is_text).then(|| PropertyPanel::open(element));

        self.scene.select(id);
        self.panel = panel;
        if is_text {
            self.scene.begin_text_edit(id, TextField::Content);
        }
        Response::handled().with_selection_changed().with_focus_changed()
    }

    pub(crate) fn on_element_double_click(&mut self, id: ElementId) -> Response {
        if !self.is_cursor() {
            return Response::ignored();
        }
        let Some(field) = self.scene.get(id).and_then(|e| e.editable_field()) else {
            return Response::ignored();
        };
        self.scene.select(id);
        self.scene.begin_text_edit(id, field);
        Response::handled().with_selection_changed().with_focus_changed()
    }

    pub(crate) fn on_drag_end(&mut self, id: ElementId, position: Point) -> Response {
        if !self.is_cursor() {
            return Response::ignored();
        }
        if self.scene.update(id, |element| move_to(element, position)) {
            Response::handled().with_scene_changed()
        } else {
            Response::ignored()
        }
    }

    pub(crate) fn on_transform_end(&mut self, commit: &TransformCommit) -> Response {
        if !self.is_cursor() {
            return Response::ignored();
        }
        if self.scene.update(commit.id, |element| apply_transform(element, commit)) {
            Response::handled().with_scene_changed()
        } else {
            log::debug!("Transform for unknown element {}", commit.id);
            Response::ignored()
        }
    }

    pub(crate) fn on_text_input(&mut self, value: &str) -> Response {
        if self.scene.set_text_value(value) {
            Response::handled().with_scene_changed()
        } else {
            Response::ignored()
        }
    }

    pub(crate) fn on_text_blur(&mut self) -> Response {
        match self.scene.end_text_edit() {
            Some(_) => Response::handled().with_focus_changed(),
            None => Response::ignored(),
        }
    }

    pub(crate) fn on_resize(&mut self, size: Size) -> Response {
        if !valid_viewport(size) {
            log::warn!("Ignoring invalid viewport size {}x{}", size.width, size.height);
            return Response::ignored();
        }
        self.viewport_size = size;
        Response::handled().with_view_changed()
    }
}
