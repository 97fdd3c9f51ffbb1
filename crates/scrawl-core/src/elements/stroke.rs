//! Freehand stroke drawn with the pencil.

use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// Points of a freehand line, in absolute world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    /// Start a stroke with a single point.
    pub fn starting_at(point: Point) -> Self {
        Self {
            points: vec![point],
        }
    }

    /// Append a sample. Strokes only grow.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points as a flat `[x0, y0, x1, y1, ...]` list.
    pub fn flat_points(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// Open polyline through every point.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for point in iter {
                path.line_to(*point);
            }
        }
        path
    }

    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_points() {
        let mut stroke = Stroke::starting_at(Point::new(10.0, 10.0));
        stroke.push(Point::new(20.0, 10.0));
        stroke.push(Point::new(20.0, 20.0));
        assert_eq!(stroke.flat_points(), vec![10.0, 10.0, 20.0, 10.0, 20.0, 20.0]);
        assert_eq!(stroke.len(), 3);
    }

    #[test]
    fn test_bounds() {
        let mut stroke = Stroke::starting_at(Point::new(5.0, 30.0));
        stroke.push(Point::new(-5.0, 10.0));
        assert_eq!(stroke.bounds(), Rect::new(-5.0, 10.0, 5.0, 30.0));
    }

    #[test]
    fn test_duplicate_samples_are_kept() {
        let mut stroke = Stroke::starting_at(Point::ZERO);
        stroke.push(Point::ZERO);
        assert_eq!(stroke.len(), 2);
    }

    #[test]
    fn test_path_segments() {
        let mut stroke = Stroke::starting_at(Point::ZERO);
        stroke.push(Point::new(1.0, 0.0));
        stroke.push(Point::new(1.0, 1.0));
        assert_eq!(stroke.to_path().elements().len(), 3);
    }
}
