//! Background grid.
//!
//! The grid lives in screen space: it always covers the viewport from the
//! top-left corner and does not move with pan or zoom.

use kurbo::{Line, Point, Size};
use peniko::Color;

/// Stroke width of grid lines in pixels.
pub const GRID_LINE_WIDTH: f64 = 1.0;

/// Color of vertical grid lines (`#acacac`).
pub fn vertical_line_color() -> Color {
    Color::from_rgba8(0xac, 0xac, 0xac, 255)
}

/// Color of horizontal grid lines (`#e0e0e0`).
pub fn horizontal_line_color() -> Color {
    Color::from_rgba8(0xe0, 0xe0, 0xe0, 255)
}

/// A single grid line in screen coordinates.
#[derive(Debug, Clone, Copy)]
pub struct GridLine {
    pub line: Line,
    pub color: Color,
    pub width: f64,
}

/// Offsets `0, spacing, 2 * spacing, ...` strictly below `extent`. Empty for a
/// non-finite extent.
fn offsets(extent: f64, spacing: f64) -> impl Iterator<Item = f64> {
    let count = if spacing > 0.0 && extent > 0.0 && (extent / spacing).is_finite() {
        (extent / spacing).ceil() as usize
    } else {
        0
    };
    (0..count).map(move |i| i as f64 * spacing)
}

/// Grid lines covering a viewport, vertical lines first.
pub fn grid_lines(viewport: Size, spacing: f64) -> Vec<GridLine> {
    let vertical = offsets(viewport.width, spacing).map(|x| GridLine {
        line: Line::new(Point::new(x, 0.0), Point::new(x, viewport.height)),
        color: vertical_line_color(),
        width: GRID_LINE_WIDTH,
    });
    let horizontal = offsets(viewport.height, spacing).map(|y| GridLine {
        line: Line::new(Point::new(0.0, y), Point::new(viewport.width, y)),
        color: horizontal_line_color(),
        width: GRID_LINE_WIDTH,
    });
    vertical.chain(horizontal).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrawl_core::SerializableColor;

    #[test]
    fn test_line_counts() {
        let lines = grid_lines(Size::new(800.0, 600.0), 50.0);
        let vertical = lines.iter().filter(|l| l.line.p0.x == l.line.p1.x).count();
        assert_eq!(vertical, 16);
        assert_eq!(lines.len(), 16 + 12);
    }

    #[test]
    fn test_partial_cell_gets_a_line() {
        let lines = grid_lines(Size::new(120.0, 50.0), 50.0);
        let xs: Vec<f64> = lines.iter().take(3).map(|l| l.line.p0.x).collect();
        assert_eq!(xs, vec![0.0, 50.0, 100.0]);
        // Height of exactly one cell yields only the top line.
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_colors() {
        let lines = grid_lines(Size::new(100.0, 100.0), 50.0);
        assert_eq!(SerializableColor::from(lines[0].color).to_hex(), "#acacac");
        let last = lines.last().expect("horizontal line");
        assert_eq!(SerializableColor::from(last.color).to_hex(), "#e0e0e0");
        assert!((last.line.p1.x - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_viewport() {
        assert!(grid_lines(Size::ZERO, 50.0).is_empty());
        assert!(grid_lines(Size::new(100.0, 100.0), 0.0).is_empty());
    }

    #[test]
    fn test_unbounded_viewport() {
        assert!(grid_lines(Size::new(f64::INFINITY, f64::NAN), 50.0).is_empty());
        let lines = grid_lines(Size::new(f64::INFINITY, 100.0), 50.0);
        assert_eq!(lines.len(), 2);
    }
}
