//! Circle shape.

use super::{DrawStyle, DrawableId, DrawableTrait};
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stroked circle outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: DrawableId,
    /// Center point.
    pub center: Point,
    /// Radius in canvas pixels.
    pub radius: f64,
    /// Style properties.
    pub style: DrawStyle,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64, style: DrawStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            style,
        }
    }

    /// Recompute geometry from a drag gesture.
    ///
    /// The center stays at the drag start and the radius is half the drag
    /// distance, so the outline does not pass through the pointer.
    pub fn drag_to(&mut self, start: Point, current: Point) {
        self.center = start;
        self.radius = start.distance(current) / 2.0;
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center, self.radius)
    }
}

impl DrawableTrait for Circle {
    fn id(&self) -> DrawableId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let r = self.radius + self.style.width / 2.0;
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        // Outline only: distance from the ring
        let ring = (point.distance(self.center) - self.radius).abs();
        ring <= tolerance + self.style.width / 2.0
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn color(&self) -> &str {
        &self.style.color
    }
}
