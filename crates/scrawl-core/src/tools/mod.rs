//! Tool system for the editor.

use crate::elements::{Element, ElementId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Cursor,
    Figures,
    Pencil,
    Text,
    Smiles,
}

/// Figure placed by the figures tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FigureKind {
    #[default]
    Square,
    Triangle,
    Circle,
    Rhombus,
}

impl FigureKind {
    /// Create a figure of this kind at a world point.
    pub fn create(&self, at: Point) -> Element {
        match self {
            FigureKind::Square => Element::rect(at),
            FigureKind::Triangle => Element::triangle(at),
            FigureKind::Circle => Element::circle(at),
            FigureKind::Rhombus => Element::rhombus(at),
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    /// Waiting for interaction.
    #[default]
    Idle,
    /// A pencil stroke is in progress.
    Drawing {
        /// The line element receiving the samples.
        stroke_id: ElementId,
    },
}

/// Manages the current tool and its state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Figure the next figures-tool click places.
    pub figure_kind: FigureKind,
    /// Whether the figure picker is showing.
    pub figure_picker_open: bool,
    /// Current state of the tool.
    pub state: ToolState,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool.
    ///
    /// Selecting figures toggles the picker, any other tool closes it. An
    /// in-progress stroke ends.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.figure_picker_open = tool == ToolKind::Figures && !self.figure_picker_open;
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Choose the pending figure kind and close the picker.
    pub fn select_figure(&mut self, kind: FigureKind) {
        self.figure_kind = kind;
        self.figure_picker_open = false;
    }

    /// Element a click on empty canvas places with the current tool.
    pub fn placement(&self, at: Point, placeholder: &str) -> Option<Element> {
        match self.current_tool {
            ToolKind::Figures => Some(self.figure_kind.create(at)),
            ToolKind::Smiles => Some(Element::smile(at)),
            ToolKind::Text => Some(Element::text(at, placeholder)),
            ToolKind::Cursor | ToolKind::Pencil => None,
        }
    }

    /// Record the line element a pencil stroke writes into.
    pub fn begin_stroke(&mut self, stroke_id: ElementId) {
        self.state = ToolState::Drawing { stroke_id };
    }

    /// Finish the active stroke, returning its id.
    pub fn end_stroke(&mut self) -> Option<ElementId> {
        let id = self.active_stroke();
        self.state = ToolState::Idle;
        id
    }

    /// Check if a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ToolState::Drawing { .. })
    }

    pub fn active_stroke(&self) -> Option<ElementId> {
        match self.state {
            ToolState::Drawing { stroke_id } => Some(stroke_id),
            ToolState::Idle => None,
        }
    }
}
