//! Drawable definitions for the annotation layer.

mod circle;
mod line;
mod rectangle;
mod stroke;
mod text;

pub use circle::Circle;
pub use line::Line;
pub use rectangle::Rectangle;
pub use stroke::Stroke;
pub use text::TextAnnotation;

use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for drawables.
pub type DrawableId = Uuid;

/// Outline style shared by strokes and geometric shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawStyle {
    /// CSS color string, kept verbatim.
    pub color: String,
    /// Line width in canvas pixels.
    pub width: f64,
}

impl DrawStyle {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self::new("#000000", 4.0)
    }
}

/// Distance from a point to a line segment (a to b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}

/// Minimum distance from a point to a polyline.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => point.distance(*only),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Common behaviour of every drawable variant.
pub trait DrawableTrait {
    /// Get the unique identifier.
    fn id(&self) -> DrawableId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in canvas coordinates) hits this drawable.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Outline path used by the render layer. Text has no path.
    fn to_path(&self) -> BezPath;

    /// CSS color of the mark.
    fn color(&self) -> &str;
}

/// One discrete object on the annotation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drawable {
    Stroke(Stroke),
    Circle(Circle),
    Rectangle(Rectangle),
    Line(Line),
    Text(TextAnnotation),
}

impl Drawable {
    pub fn id(&self) -> DrawableId {
        match self {
            Drawable::Stroke(d) => d.id(),
            Drawable::Circle(d) => d.id(),
            Drawable::Rectangle(d) => d.id(),
            Drawable::Line(d) => d.id(),
            Drawable::Text(d) => d.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Drawable::Stroke(d) => d.bounds(),
            Drawable::Circle(d) => d.bounds(),
            Drawable::Rectangle(d) => d.bounds(),
            Drawable::Line(d) => d.bounds(),
            Drawable::Text(d) => d.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Drawable::Stroke(d) => d.hit_test(point, tolerance),
            Drawable::Circle(d) => d.hit_test(point, tolerance),
            Drawable::Rectangle(d) => d.hit_test(point, tolerance),
            Drawable::Line(d) => d.hit_test(point, tolerance),
            Drawable::Text(d) => d.hit_test(point, tolerance),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Drawable::Stroke(d) => d.to_path(),
            Drawable::Circle(d) => d.to_path(),
            Drawable::Rectangle(d) => d.to_path(),
            Drawable::Line(d) => d.to_path(),
            Drawable::Text(d) => d.to_path(),
        }
    }

    pub fn color(&self) -> &str {
        match self {
            Drawable::Stroke(d) => d.color(),
            Drawable::Circle(d) => d.color(),
            Drawable::Rectangle(d) => d.color(),
            Drawable::Line(d) => d.color(),
            Drawable::Text(d) => d.color(),
        }
    }

    /// Outline style, if this variant is stroked.
    pub fn style(&self) -> Option<&DrawStyle> {
        match self {
            Drawable::Stroke(d) => Some(&d.style),
            Drawable::Circle(d) => Some(&d.style),
            Drawable::Rectangle(d) => Some(&d.style),
            Drawable::Line(d) => Some(&d.style),
            Drawable::Text(_) => None,
        }
    }

    /// Whether every stored coordinate and size is finite. Snapshots cannot
    /// represent anything else.
    pub fn is_finite(&self) -> bool {
        match self {
            Drawable::Stroke(s) => {
                s.style.width.is_finite() && s.points.iter().all(|p| p.is_finite())
            }
            Drawable::Circle(c) => {
                c.center.is_finite() && c.radius.is_finite() && c.style.width.is_finite()
            }
            Drawable::Rectangle(r) => {
                r.origin.is_finite()
                    && r.width.is_finite()
                    && r.height.is_finite()
                    && r.style.width.is_finite()
            }
            Drawable::Line(l) => {
                l.start.is_finite() && l.end.is_finite() && l.style.width.is_finite()
            }
            Drawable::Text(t) => t.position.is_finite() && t.font_size.is_finite(),
        }
    }

    /// Whether this drawable subtracts from the marks beneath it.
    pub fn is_eraser(&self) -> bool {
        matches!(self, Drawable::Stroke(s) if s.is_eraser)
    }

    pub fn as_text(&self) -> Option<&TextAnnotation> {
        match self {
            Drawable::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextAnnotation> {
        match self {
            Drawable::Text(t) => Some(t),
            _ => None,
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Drawable {
                fn from(value: $ty) -> Self {
                    Drawable::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant!(
    Stroke(Stroke),
    Circle(Circle),
    Rectangle(Rectangle),
    Line(Line),
    Text(TextAnnotation),
);
