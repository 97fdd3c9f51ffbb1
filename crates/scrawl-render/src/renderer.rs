//! Renderer trait abstraction.

use crate::scene::{SceneDescription, build_with};
use kurbo::Size;
use peniko::Color;
use scrawl_core::canvas::Canvas;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// No grid (plain background).
    None,
    /// Full grid lines.
    #[default]
    Lines,
}

impl GridStyle {
    /// Cycle to the next grid style.
    pub fn next(self) -> Self {
        match self {
            GridStyle::None => GridStyle::Lines,
            GridStyle::Lines => GridStyle::None,
        }
    }

    /// Get display name for this grid style.
    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Lines => "Lines",
        }
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Viewport size in screen pixels.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Grid display style.
    pub grid_style: GridStyle,
    /// Spacing between grid lines in screen pixels.
    pub grid_size: f64,
    /// Transformer outline color.
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a render context using the canvas viewport and grid settings.
    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            viewport_size: canvas.viewport_size,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            grid_style: GridStyle::Lines,
            grid_size: canvas.config().grid_size,
            selection_color: Color::from_rgba8(0, 161, 255, 255),
        }
    }

    /// Override the viewport size.
    pub fn with_viewport_size(mut self, size: Size) -> Self {
        self.viewport_size = size;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    /// Set the transformer outline color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// Project the canvas into draw descriptions.
    pub fn build(&self) -> SceneDescription {
        build_with(self)
    }
}

/// Trait for rendering backends.
///
/// Backends receive a fully built [`SceneDescription`] and own everything
/// pixel related.
pub trait Renderer {
    /// Draw one frame.
    fn render(&mut self, scene: &SceneDescription) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, scene: &SceneDescription) -> Color {
        scene.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_style_cycle() {
        assert_eq!(GridStyle::default(), GridStyle::Lines);
        assert_eq!(GridStyle::Lines.next(), GridStyle::None);
        assert_eq!(GridStyle::None.next().name(), "Lines");
    }

    #[test]
    fn test_context_defaults_follow_canvas() {
        let mut canvas = Canvas::new();
        canvas.set_viewport_size(320.0, 240.0);
        let ctx = RenderContext::new(&canvas);
        assert_eq!(ctx.viewport_size, Size::new(320.0, 240.0));
        assert!((ctx.grid_size - 50.0).abs() < f64::EPSILON);

        let ctx = ctx.with_grid(GridStyle::None).with_viewport_size(Size::new(10.0, 10.0));
        assert_eq!(ctx.grid_style, GridStyle::None);
        assert_eq!(ctx.viewport_size, Size::new(10.0, 10.0));
    }
}
