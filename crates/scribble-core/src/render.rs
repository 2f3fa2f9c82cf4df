//! Backend-neutral display list built from a scene.
//!
//! The surface hands one of these to its backend on every repaint. Paths are
//! in canvas coordinates; nothing is rescaled when the viewport changes.

use crate::scene::Scene;
use crate::shapes::{Drawable, DrawableId};
use kurbo::{BezPath, Cap, Join, Point, Size, Stroke};
use peniko::{BlendMode, Color, Compose, Mix};

/// Blend mode for marks that subtract from what is beneath them.
pub const ERASE_BLEND: BlendMode = BlendMode::new(Mix::Normal, Compose::DestOut);

/// Resolve a CSS color string. Unparsable colors fall back to opaque black.
pub fn resolve_color(css: &str) -> Color {
    match peniko::color::parse_color(css) {
        Ok(color) => color.to_alpha_color(),
        Err(err) => {
            log::warn!("Unrecognized color {css:?}: {err}");
            Color::BLACK
        }
    }
}

/// One paint operation.
#[derive(Debug, Clone)]
pub enum DisplayItem {
    /// Stroke an outline path.
    Path {
        id: DrawableId,
        path: BezPath,
        stroke: Stroke,
        color: Color,
        blend: BlendMode,
    },
    /// Lay out and draw text.
    Text {
        id: DrawableId,
        origin: Point,
        content: String,
        font_size: f64,
        color: Color,
        /// The text currently has editing focus.
        editing: bool,
    },
}

impl DisplayItem {
    fn from_drawable(drawable: &Drawable, editing: Option<DrawableId>) -> Self {
        let style = match drawable {
            Drawable::Text(text) => {
                return DisplayItem::Text {
                    id: text.id,
                    origin: text.position,
                    content: text.content.clone(),
                    font_size: text.font_size,
                    color: resolve_color(&text.color),
                    editing: editing == Some(text.id),
                };
            }
            Drawable::Stroke(s) => &s.style,
            Drawable::Circle(c) => &c.style,
            Drawable::Rectangle(r) => &r.style,
            Drawable::Line(l) => &l.style,
        };
        let blend = if drawable.is_eraser() {
            ERASE_BLEND
        } else {
            BlendMode::default()
        };
        DisplayItem::Path {
            id: drawable.id(),
            path: drawable.to_path(),
            stroke: Stroke::new(style.width)
                .with_caps(Cap::Round)
                .with_join(Join::Round),
            color: resolve_color(&style.color),
            blend,
        }
    }

    pub fn id(&self) -> DrawableId {
        match self {
            DisplayItem::Path { id, .. } | DisplayItem::Text { id, .. } => *id,
        }
    }
}

/// Everything needed to repaint the annotation layer once.
#[derive(Debug, Clone)]
pub struct DisplayList {
    /// Canvas size at the time of the repaint.
    pub size: Size,
    /// Clear to transparent instead of an opaque backdrop.
    pub background_transparent: bool,
    /// Paint operations, back to front. The in-progress drawable, if any, is last.
    pub items: Vec<DisplayItem>,
}

impl DisplayList {
    /// Build the display list for a scene plus an optional gesture preview.
    pub fn build(
        scene: &Scene,
        preview: Option<&Drawable>,
        editing: Option<DrawableId>,
        size: Size,
    ) -> Self {
        let items = scene
            .iter()
            .chain(preview)
            .map(|d| DisplayItem::from_drawable(d, editing))
            .collect();
        Self {
            size,
            background_transparent: scene.background_transparent(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
