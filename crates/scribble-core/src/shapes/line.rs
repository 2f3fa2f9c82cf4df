//! Straight line shape.

use super::{DrawStyle, DrawableId, DrawableTrait, point_to_segment_dist};
use kurbo::{BezPath, Line as KurboLine, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single straight segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: DrawableId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Style properties.
    pub style: DrawStyle,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point, style: DrawStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style,
        }
    }

    /// Recompute geometry from a drag gesture: the end tracks the pointer.
    pub fn drag_to(&mut self, start: Point, current: Point) {
        self.start = start;
        self.end = current;
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.start, self.end)
    }
}

impl DrawableTrait for Line {
    fn id(&self) -> DrawableId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let half = self.style.width / 2.0;
        Rect::from_points(self.start, self.end).inflate(half, half)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start, self.end) <= tolerance + self.style.width / 2.0
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn color(&self) -> &str {
        &self.style.color
    }
}
