//! Projection of a canvas into declarative draw descriptions.

use crate::grid::{GridLine, grid_lines};
use crate::renderer::{GridStyle, RenderContext};
use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape, Size};
use peniko::Color;
use scrawl_core::canvas::Canvas;
use scrawl_core::elements::{Element, ElementId, ElementKind, Smile, TRIANGLE_SIDES, Text};
use std::f64::consts::TAU;

const PATH_TOLERANCE: f64 = 0.1;
/// Caption box shift for triangles, as a fraction of the box height.
const TRIANGLE_CAPTION_LIFT: f64 = 0.1;
const SMILE_MOUTH_WIDTH: f64 = 2.0;

fn caption_color() -> Color {
    Color::from_rgba8(0, 0, 0, 255)
}

/// Outline paint.
#[derive(Debug, Clone, Copy)]
pub struct StrokePaint {
    pub color: Color,
    pub width: f64,
}

/// How text sits in its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Top-left aligned (text elements).
    Start,
    /// Centered both ways (captions).
    Center,
}

/// A drawing primitive in element-local coordinates.
#[derive(Debug, Clone)]
pub enum Primitive {
    Path {
        path: BezPath,
        fill: Option<Color>,
        stroke: Option<StrokePaint>,
    },
    Text {
        text: String,
        bounds: Rect,
        font_size: f64,
        color: Color,
        align: TextAlign,
    },
}

/// Everything drawn for one element.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub id: ElementId,
    /// Element-local to world transform (anchor translation, then rotation).
    pub transform: Affine,
    pub primitives: Vec<Primitive>,
}

/// Resize/rotate handle attached to the selected element.
#[derive(Debug, Clone)]
pub struct TransformerOverlay {
    pub id: ElementId,
    /// Unrotated element box in world coordinates.
    pub bounds: Rect,
    /// Rotation in degrees around the element anchor.
    pub rotation: f64,
    pub anchor: Point,
    pub color: Color,
}

/// A full frame, ready for a [`Renderer`](crate::Renderer).
#[derive(Debug, Clone)]
pub struct SceneDescription {
    /// World to screen transform, applied to every item.
    pub view: Affine,
    pub viewport: Size,
    pub background: Color,
    /// Grid lines in screen space.
    pub grid: Vec<GridLine>,
    /// Items back to front.
    pub items: Vec<DrawItem>,
    pub transformer: Option<TransformerOverlay>,
    /// Element whose text is being edited in place.
    pub editing: Option<ElementId>,
}

impl SceneDescription {
    pub fn item(&self, id: ElementId) -> Option<&DrawItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Project a canvas with the default render settings.
pub fn build_scene(canvas: &Canvas) -> SceneDescription {
    RenderContext::new(canvas).build()
}

pub(crate) fn build_with(ctx: &RenderContext) -> SceneDescription {
    let canvas = ctx.canvas;
    let grid = match ctx.grid_style {
        GridStyle::Lines => grid_lines(ctx.viewport_size, ctx.grid_size),
        GridStyle::None => Vec::new(),
    };
    let items: Vec<DrawItem> = canvas.elements().iter().map(draw_item).collect();
    let transformer = canvas
        .transformer_target()
        .and_then(|id| canvas.scene.get(id))
        .map(|element| TransformerOverlay {
            id: element.id(),
            bounds: element.bounds(),
            rotation: element.rotation,
            anchor: element.position,
            color: ctx.selection_color,
        });
    log::trace!("Built scene with {} items", items.len());

    SceneDescription {
        view: canvas.camera.transform(),
        viewport: ctx.viewport_size,
        background: ctx.background_color,
        grid,
        items,
        transformer,
        editing: canvas.scene.editing_text_id(),
    }
}

/// Draw description of a single element.
pub fn draw_item(element: &Element) -> DrawItem {
    let style = &element.style;
    let fill = style.fill_color();
    let stroke = style.stroke_color().map(|color| StrokePaint {
        color,
        width: style.stroke_width.unwrap_or(1.0),
    });
    let shape = |path: BezPath| Primitive::Path { path, fill, stroke };

    let mut primitives = Vec::new();
    match &element.kind {
        ElementKind::Rect(f) => {
            let local = Rect::new(0.0, 0.0, f.width, f.height);
            primitives.push(shape(local.to_path(PATH_TOLERANCE)));
            push_caption(&mut primitives, f.caption.text(), f.caption.font_size, local);
        }
        ElementKind::Rhombus(f) => {
            primitives.push(shape(rhombus_path(f.width, f.height)));
            let local = Rect::from_center_size(Point::ZERO, (f.width, f.height));
            push_caption(&mut primitives, f.caption.text(), f.caption.font_size, local);
        }
        ElementKind::Triangle(f) => {
            primitives.push(shape(regular_polygon(TRIANGLE_SIDES, f.radius)));
            let d = f.diameter();
            let local = Rect::from_center_size(Point::new(0.0, -d * TRIANGLE_CAPTION_LIFT), (d, d));
            push_caption(&mut primitives, f.caption.text(), f.caption.font_size, local);
        }
        ElementKind::Circle(f) => {
            primitives.push(shape(Circle::new(Point::ZERO, f.radius).to_path(PATH_TOLERANCE)));
            let d = f.diameter();
            let local = Rect::from_center_size(Point::ZERO, (d, d));
            push_caption(&mut primitives, f.caption.text(), f.caption.font_size, local);
        }
        ElementKind::Smile(_) => {
            primitives.push(shape(
                Circle::new(Point::ZERO, Smile::FACE_RADIUS).to_path(PATH_TOLERANCE),
            ));
            primitives.extend(smile_features());
        }
        ElementKind::Text(t) => primitives.push(text_primitive(t, fill)),
        ElementKind::Line(s) => primitives.push(Primitive::Path {
            path: s.to_path(),
            fill: None,
            stroke,
        }),
    }

    DrawItem {
        id: element.id(),
        transform: Affine::translate(element.position.to_vec2())
            * Affine::rotate(element.rotation.to_radians()),
        primitives,
    }
}

fn push_caption(primitives: &mut Vec<Primitive>, text: &str, font_size: f64, bounds: Rect) {
    if text.is_empty() {
        return;
    }
    primitives.push(Primitive::Text {
        text: text.to_string(),
        bounds,
        font_size,
        color: caption_color(),
        align: TextAlign::Center,
    });
}

fn text_primitive(text: &Text, fill: Option<Color>) -> Primitive {
    let size = text.box_size();
    Primitive::Text {
        text: text.content.clone(),
        bounds: Rect::new(0.0, 0.0, size.width, size.height),
        font_size: text.font_size,
        color: fill.unwrap_or_else(caption_color),
        align: TextAlign::Start,
    }
}

/// Closed rhombus centered on the origin, top vertex first.
fn rhombus_path(width: f64, height: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((0.0, -height / 2.0));
    path.line_to((width / 2.0, 0.0));
    path.line_to((0.0, height / 2.0));
    path.line_to((-width / 2.0, 0.0));
    path.close_path();
    path
}

/// Closed regular polygon centered on the origin with its first vertex straight up.
fn regular_polygon(sides: usize, radius: f64) -> BezPath {
    let mut path = BezPath::new();
    for i in 0..sides {
        let angle = TAU * i as f64 / sides as f64;
        let vertex = Point::new(radius * angle.sin(), -radius * angle.cos());
        if i == 0 {
            path.move_to(vertex);
        } else {
            path.line_to(vertex);
        }
    }
    path.close_path();
    path
}

/// Eyes and mouth. Always black, independent of the element style.
fn smile_features() -> Vec<Primitive> {
    let black = caption_color();
    let eye = |center: Point| Primitive::Path {
        path: Circle::new(center, Smile::EYE_RADIUS).to_path(PATH_TOLERANCE),
        fill: Some(black),
        stroke: None,
    };
    let right = Point::ZERO + Smile::EYE_OFFSET;
    let left = Point::new(-right.x, right.y);

    let mut mouth = BezPath::new();
    mouth.move_to(Smile::MOUTH_START);
    mouth.line_to(Smile::MOUTH_END);

    vec![
        eye(left),
        eye(right),
        Primitive::Path {
            path: mouth,
            fill: None,
            stroke: Some(StrokePaint {
                color: black,
                width: SMILE_MOUTH_WIDTH,
            }),
        },
    ]
}
