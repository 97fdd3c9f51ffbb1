//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom level.
pub const MIN_SCALE: f64 = 0.5;
/// Largest allowed zoom level.
pub const MAX_SCALE: f64 = 2.0;
/// Multiplicative zoom factor applied per wheel notch.
pub const ZOOM_STEP: f64 = 1.05;

/// Convert a screen point to world coordinates for the given pan offset and scale.
pub fn screen_to_world(screen: Point, position: Vec2, scale: f64) -> Point {
    Point::new(
        (screen.x - position.x) / scale,
        (screen.y - position.y) / scale,
    )
}

/// Convert a world point to screen coordinates for the given pan offset and scale.
pub fn world_to_screen(world: Point, position: Vec2, scale: f64) -> Point {
    Point::new(
        world.x * scale + position.x,
        world.y * scale + position.y,
    )
}

/// Apply one wheel zoom step around `pointer` using the default limits.
///
/// A positive `delta_y` zooms out, anything else zooms in. The world point
/// under the pointer stays at the same screen position.
pub fn zoom_at(pointer: Point, position: Vec2, scale: f64, delta_y: f64) -> (f64, Vec2) {
    zoom_step(pointer, position, scale, delta_y, ZOOM_STEP, MIN_SCALE, MAX_SCALE)
}

fn zoom_step(
    pointer: Point,
    position: Vec2,
    scale: f64,
    delta_y: f64,
    step: f64,
    min_scale: f64,
    max_scale: f64,
) -> (f64, Vec2) {
    let new_scale = if delta_y > 0.0 { scale / step } else { scale * step };
    // Not `clamp`: inverted limits must not panic.
    let new_scale = new_scale.min(max_scale).max(min_scale);

    let anchor = screen_to_world(pointer, position, scale);
    let new_position = Vec2::new(
        pointer.x - anchor.x * new_scale,
        pointer.y - anchor.y * new_scale,
    );
    (new_scale, new_position)
}

/// Camera manages the view transform for the canvas.
///
/// `offset` is the pan in screen pixels and `scale` the zoom factor; every
/// element is drawn under `translate(offset) * scale(scale)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan)
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%)
    pub scale: f64,
    /// Minimum allowed zoom level
    pub min_scale: f64,
    /// Maximum allowed zoom level
    pub max_scale: f64,
    /// Factor applied per wheel step
    pub zoom_step: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with custom zoom limits and step.
    pub fn with_limits(min_scale: f64, max_scale: f64, zoom_step: f64) -> Self {
        Self {
            min_scale,
            max_scale,
            zoom_step,
            ..Self::default()
        }
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        screen_to_world(screen_point, self.offset, self.scale)
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        world_to_screen(world_point, self.offset, self.scale)
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Apply one wheel step, keeping the world point under `pointer` fixed.
    pub fn zoom_at(&mut self, pointer: Point, delta_y: f64) {
        let (scale, offset) = zoom_step(
            pointer,
            self.offset,
            self.scale,
            delta_y,
            self.zoom_step,
            self.min_scale,
            self.max_scale,
        );
        self.scale = scale;
        self.offset = offset;
    }
}
