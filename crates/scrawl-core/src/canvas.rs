//! Editor state and event routing.

use crate::camera::Camera;
use crate::config::{ConfigError, EditorConfig};
use crate::elements::{Element, ElementId};
use crate::input::{InputEvent, Response};
use crate::panel::{PanelEdit, PanelError, PropertyPanel};
use crate::scene::SceneStore;
use crate::tools::{FigureKind, ToolKind, ToolManager};
use kurbo::Size;

/// Runtime editor state.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Placed elements with selection and text-edit focus.
    pub scene: SceneStore,
    /// Camera for view transform.
    pub camera: Camera,
    /// Tool manager.
    pub tools: ToolManager,
    /// Viewport size in screen pixels.
    pub viewport_size: Size,
    pub(crate) panel: Option<PropertyPanel>,
    config: EditorConfig,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create an empty canvas with the default configuration.
    pub fn new() -> Self {
        Self::from_config(EditorConfig::default())
    }

    /// Create an empty canvas from a configuration, rejecting invalid settings.
    pub fn with_config(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: EditorConfig) -> Self {
        Self {
            scene: SceneStore::new(),
            camera: Camera::with_limits(config.min_scale, config.max_scale, config.zoom_step),
            tools: ToolManager::new(),
            viewport_size: config.viewport,
            panel: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Route one input event to its handler.
    pub fn handle_event(&mut self, event: InputEvent) -> Response {
        match event {
            InputEvent::PointerDown { position } => self.on_pointer_down(position),
            InputEvent::PointerMove { position } => self.on_pointer_move(position),
            InputEvent::PointerUp => self.on_pointer_up(),
            InputEvent::StageClick { position } => self.on_stage_click(position),
            InputEvent::ElementClick { id } => self.on_element_click(id),
            InputEvent::ElementDoubleClick { id } => self.on_element_double_click(id),
            InputEvent::DragEnd { id, position } => self.on_drag_end(id, position),
            InputEvent::TransformEnd(commit) => self.on_transform_end(&commit),
            InputEvent::Wheel { pointer, delta_y } => self.on_wheel(pointer, delta_y),
            InputEvent::TextInput { value } => self.on_text_input(&value),
            InputEvent::TextBlur => self.on_text_blur(),
            InputEvent::Resize { size } => self.on_resize(size),
        }
    }

    /// Set the viewport size. Non-finite or negative sizes are ignored.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.on_resize(Size::new(width, height));
    }

    /// Set the current tool. Closes the property panel.
    pub fn set_tool(&mut self, tool: ToolKind) {
        log::debug!("Tool: {:?} -> {:?}", self.tools.current_tool, tool);
        self.close_panel();
        self.tools.set_tool(tool);
    }

    /// Choose the figure the figures tool places next.
    pub fn select_figure(&mut self, kind: FigureKind) {
        self.tools.select_figure(kind);
    }

    /// Elements in z-order (back to front).
    pub fn elements(&self) -> &[Element] {
        self.scene.elements()
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.scene.selected()
    }

    /// Element the transformer handle attaches to. Only shown under the cursor tool.
    pub fn transformer_target(&self) -> Option<ElementId> {
        match self.tools.current_tool {
            ToolKind::Cursor => self.scene.selected(),
            _ => None,
        }
    }

    /// Elements can be dragged only under the cursor tool.
    pub fn elements_draggable(&self) -> bool {
        self.tools.current_tool == ToolKind::Cursor
    }

    /// The open property panel, if any.
    pub fn editing_element(&self) -> Option<&PropertyPanel> {
        self.panel.as_ref()
    }

    /// Mutable access to the panel's local values.
    pub fn panel_mut(&mut self) -> Option<&mut PropertyPanel> {
        self.panel.as_mut()
    }

    /// Apply `edit` to the panel's element and close the panel.
    pub fn save_panel(&mut self, edit: PanelEdit) -> bool {
        let Some(panel) = self.panel.take() else {
            return false;
        };
        let saved = self.scene.update(panel.target, |element| edit.apply_to(element));
        if !saved {
            log::warn!("Property panel target {} no longer exists", panel.target);
        }
        saved
    }

    /// Validate the panel's local values and save what changed.
    ///
    /// On a validation error the panel stays open.
    pub fn submit_panel(&mut self) -> Result<bool, PanelError> {
        let Some(panel) = self.panel.as_ref() else {
            return Ok(false);
        };
        let edit = panel.edit()?;
        Ok(self.save_panel(edit))
    }

    /// Close the panel, discarding its local values.
    pub fn close_panel(&mut self) {
        self.panel = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementKind, SerializableColor};
    use kurbo::Point;

    #[test]
    fn test_new_canvas() {
        let canvas = Canvas::new();
        assert!(canvas.elements().is_empty());
        assert_eq!(canvas.viewport_size, Size::new(800.0, 600.0));
        assert_eq!(canvas.tools.current_tool, ToolKind::Cursor);
        assert!(canvas.editing_element().is_none());
    }

    #[test]
    fn test_with_config_applies_limits() {
        let config = EditorConfig {
            max_scale: 8.0,
            viewport: Size::new(1024.0, 768.0),
            ..EditorConfig::default()
        };
        let canvas = Canvas::with_config(config).expect("valid config");
        assert!((canvas.camera.max_scale - 8.0).abs() < f64::EPSILON);
        assert_eq!(canvas.viewport_size, Size::new(1024.0, 768.0));
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = EditorConfig {
            min_scale: 0.5,
            max_scale: 0.1,
            ..EditorConfig::default()
        };
        let err = Canvas::with_config(config).expect_err("inverted limits");
        assert!(matches!(err, ConfigError::ZoomLimits { .. }));

        let config = EditorConfig {
            viewport: Size::new(f64::INFINITY, 600.0),
            ..EditorConfig::default()
        };
        assert!(matches!(
            Canvas::with_config(config),
            Err(ConfigError::Viewport(..))
        ));
    }

    #[test]
    fn test_set_viewport_size_ignores_invalid() {
        let mut canvas = Canvas::new();
        canvas.set_viewport_size(f64::NAN, 100.0);
        assert_eq!(canvas.viewport_size, Size::new(800.0, 600.0));
        canvas.set_viewport_size(640.0, 480.0);
        assert_eq!(canvas.viewport_size, Size::new(640.0, 480.0));
    }

    #[test]
    fn test_transformer_target_follows_tool() {
        let mut canvas = Canvas::new();
        let id = canvas.scene.add(Element::rect(Point::ZERO));
        canvas.scene.select(id);
        assert_eq!(canvas.transformer_target(), Some(id));
        assert!(canvas.elements_draggable());

        canvas.set_tool(ToolKind::Pencil);
        assert_eq!(canvas.transformer_target(), None);
        assert!(!canvas.elements_draggable());
        assert_eq!(canvas.selected(), Some(id));
    }

    #[test]
    fn test_submit_panel() {
        let mut canvas = Canvas::new();
        let id = canvas.scene.add(Element::rect(Point::ZERO));
        canvas.handle_event(InputEvent::ElementClick { id });

        let panel = canvas.panel_mut().expect("panel open");
        panel.values.height = 40.0;
        panel.values.fill = "#ff0000".to_string();
        assert_eq!(canvas.submit_panel(), Ok(true));
        assert!(canvas.editing_element().is_none());

        let element = canvas.scene.get(id).expect("rect");
        assert_eq!(element.style.fill, Some(SerializableColor::new(255, 0, 0, 255)));
        match &element.kind {
            ElementKind::Rect(f) => {
                assert!((f.width - 100.0).abs() < f64::EPSILON);
                assert!((f.height - 40.0).abs() < f64::EPSILON);
            }
            other => panic!("Expected rect, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_panel_stays_open() {
        let mut canvas = Canvas::new();
        let id = canvas.scene.add(Element::rect(Point::ZERO));
        canvas.handle_event(InputEvent::ElementClick { id });
        if let Some(panel) = canvas.panel_mut() {
            panel.values.font_size = 100.0;
        }
        assert_eq!(canvas.submit_panel(), Err(PanelError::FontSize(100.0)));
        assert!(canvas.editing_element().is_some());
    }

    #[test]
    fn test_close_panel_discards() {
        let mut canvas = Canvas::new();
        let id = canvas.scene.add(Element::rect(Point::ZERO));
        canvas.handle_event(InputEvent::ElementClick { id });
        if let Some(panel) = canvas.panel_mut() {
            panel.values.width = 300.0;
        }
        canvas.close_panel();
        assert!(canvas.editing_element().is_none());
        assert!(!canvas.save_panel(PanelEdit::default()));
        match &canvas.scene.get(id).expect("rect").kind {
            ElementKind::Rect(f) => assert!((f.width - 100.0).abs() < f64::EPSILON),
            other => panic!("Expected rect, got {other:?}"),
        }
    }
}
