//! Scrawl Core Library
//!
//! Platform-agnostic scene model and interaction logic for the Scrawl diagram editor.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod elements;
pub mod gestures;
pub mod input;
pub mod panel;
pub mod scene;
pub mod tools;

pub use camera::Camera;
pub use canvas::Canvas;
pub use config::{ConfigError, EditorConfig, GRID_SIZE};
pub use elements::{Element, ElementId, ElementKind, ElementType, SerializableColor, ShapeStyle};
pub use input::{InputEvent, Response, TransformCommit};
pub use panel::{PanelEdit, PanelError, PanelValues, PropertyPanel};
pub use scene::SceneStore;
pub use tools::{FigureKind, ToolKind, ToolManager};
