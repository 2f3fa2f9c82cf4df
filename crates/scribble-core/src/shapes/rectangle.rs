//! Rectangle shape.

use super::{DrawStyle, DrawableId, DrawableTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: DrawableId,
    /// Top-left corner position.
    pub origin: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Style properties.
    pub style: DrawStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(origin: Point, width: f64, height: f64, style: DrawStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            width,
            height,
            style,
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(p1: Point, p2: Point, style: DrawStyle) -> Self {
        let mut rect = Self::new(p1, 0.0, 0.0, style);
        rect.drag_to(p1, p2);
        rect
    }

    /// Recompute geometry from a drag gesture. The origin is always the
    /// top-left corner whichever way the pointer moved.
    pub fn drag_to(&mut self, start: Point, current: Point) {
        self.origin = Point::new(start.x.min(current.x), start.y.min(current.y));
        self.width = (current.x - start.x).abs();
        self.height = (current.y - start.y).abs();
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.width,
            self.origin.y + self.height,
        )
    }
}

impl DrawableTrait for Rectangle {
    fn id(&self) -> DrawableId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let half = self.style.width / 2.0;
        self.as_rect().inflate(half, half)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rect = self.as_rect();
        let band = tolerance + self.style.width / 2.0;
        let outer = rect.inflate(band, band);
        let inner = rect.inflate(-band, -band);
        // A thin rectangle has no interior hole
        let hollow = inner.width() > 0.0 && inner.height() > 0.0;
        outer.contains(point) && !(hollow && inner.contains(point))
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }

    fn color(&self) -> &str {
        &self.style.color
    }
}
