//! Text annotation.

use super::{DrawableId, DrawableTrait};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A text callout anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub(crate) id: DrawableId,
    /// Position (top-left corner of text bounding box).
    pub position: Point,
    /// The text content.
    pub content: String,
    /// CSS color string.
    pub color: String,
    /// Font size in pixels.
    pub font_size: f64,
}

impl TextAnnotation {
    /// Font size used unless configured otherwise.
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;

    /// Create a new text annotation.
    pub fn new(position: Point, content: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content: content.into(),
            color: color.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
        }
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Replace the content. Returns false if nothing changed.
    pub fn set_content(&mut self, content: &str) -> bool {
        if self.content == content {
            return false;
        }
        self.content = content.to_string();
        true
    }

    fn approximate_width(&self) -> f64 {
        let widest = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        widest as f64 * self.font_size * 0.55
    }

    fn approximate_height(&self) -> f64 {
        let mut line_count = self.content.lines().count().max(1);
        if self.content.ends_with('\n') {
            line_count += 1;
        }
        line_count as f64 * self.font_size * 1.2
    }
}

impl DrawableTrait for TextAnnotation {
    fn id(&self) -> DrawableId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let width = self.approximate_width().max(20.0);
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + width,
            self.position.y + self.approximate_height(),
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        // Glyphs are laid out by the host renderer
        BezPath::new()
    }

    fn color(&self) -> &str {
        &self.color
    }
}
