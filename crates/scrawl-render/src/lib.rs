//! Scrawl Render Library
//!
//! Presentation adapter for Scrawl: turns the editor state into draw
//! descriptions and defines the trait pixel-producing backends implement.

pub mod grid;
mod renderer;
pub mod scene;

pub use grid::{GRID_LINE_WIDTH, GridLine, grid_lines};
pub use renderer::{GridStyle, RenderContext, RenderResult, Renderer, RendererError};
pub use scene::{
    DrawItem, Primitive, SceneDescription, StrokePaint, TextAlign, TransformerOverlay,
    build_scene, draw_item,
};
