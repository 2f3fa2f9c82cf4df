//! Freehand stroke.

use super::{DrawStyle, DrawableId, DrawableTrait, point_to_polyline_dist};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand path. Points are kept exactly as sampled, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: DrawableId,
    /// Sampled points in canvas coordinates.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: DrawStyle,
    /// Eraser strokes composite with destination-out.
    #[serde(default)]
    pub is_eraser: bool,
}

impl Stroke {
    /// Start a stroke at its first point.
    pub fn new(start: Point, style: DrawStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![start],
            style,
            is_eraser: false,
        }
    }

    /// Start an eraser stroke at its first point.
    pub fn eraser(start: Point, style: DrawStyle) -> Self {
        Self {
            is_eraser: true,
            ..Self::new(start, style)
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl DrawableTrait for Stroke {
    fn id(&self) -> DrawableId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        let rect = self
            .points
            .iter()
            .fold(Rect::from_points(*first, *first), |acc, p| {
                acc.union_pt(*p)
            });
        let half = self.style.width / 2.0;
        rect.inflate(half, half)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_polyline_dist(point, &self.points) <= tolerance + self.style.width / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            if self.points.len() == 1 {
                // Zero-length segment so round caps paint a dot
                path.line_to(*first);
            }
            for p in iter {
                path.line_to(*p);
            }
        }
        path
    }

    fn color(&self) -> &str {
        &self.style.color
    }
}
