//! Drag-to-size shape tools (circle, rectangle, line).

use super::{ToolHandler, ToolOutcome, ToolSettings};
use crate::shapes::{Circle, DrawStyle, Drawable, Line, Rectangle};
use kurbo::Point;

/// A shape whose geometry is derived from a drag gesture.
pub trait DragShape: Clone + Into<Drawable> {
    /// Degenerate shape at the drag start.
    fn begin(start: Point, style: DrawStyle) -> Self;

    /// Recompute geometry from the drag start to the current pointer.
    fn drag_to(&mut self, start: Point, current: Point);
}

impl DragShape for Circle {
    fn begin(start: Point, style: DrawStyle) -> Self {
        Circle::new(start, 0.0, style)
    }

    fn drag_to(&mut self, start: Point, current: Point) {
        Circle::drag_to(self, start, current);
    }
}

impl DragShape for Rectangle {
    fn begin(start: Point, style: DrawStyle) -> Self {
        Rectangle::new(start, 0.0, 0.0, style)
    }

    fn drag_to(&mut self, start: Point, current: Point) {
        Rectangle::drag_to(self, start, current);
    }
}

impl DragShape for Line {
    fn begin(start: Point, style: DrawStyle) -> Self {
        Line::new(start, start, style)
    }

    fn drag_to(&mut self, start: Point, current: Point) {
        Line::drag_to(self, start, current);
    }
}

/// In-progress drag: where it started and the shape it is growing.
#[derive(Debug, Clone)]
struct Drag<S> {
    start: Point,
    shape: S,
}

/// Generic handler for drag-to-size shapes.
#[derive(Debug, Clone)]
pub struct DragTool<S> {
    drag: Option<Drag<S>>,
}

impl<S> Default for DragTool<S> {
    fn default() -> Self {
        Self { drag: None }
    }
}

pub type CircleTool = DragTool<Circle>;
pub type RectangleTool = DragTool<Rectangle>;
pub type LineTool = DragTool<Line>;

impl<S: DragShape> ToolHandler for DragTool<S> {
    fn pointer_down(&mut self, point: Point, settings: &ToolSettings) -> ToolOutcome {
        self.drag = Some(Drag {
            start: point,
            shape: S::begin(point, settings.brush_style()),
        });
        ToolOutcome::Updated
    }

    fn pointer_move(&mut self, point: Point) -> ToolOutcome {
        match &mut self.drag {
            Some(drag) => {
                drag.shape.drag_to(drag.start, point);
                ToolOutcome::Updated
            }
            None => ToolOutcome::Ignored,
        }
    }

    fn pointer_up(&mut self, point: Point) -> ToolOutcome {
        match self.drag.take() {
            Some(Drag { start, mut shape }) => {
                shape.drag_to(start, point);
                ToolOutcome::Committed(shape.into())
            }
            None => ToolOutcome::Ignored,
        }
    }

    fn in_progress(&self) -> Option<Drawable> {
        self.drag.as_ref().map(|drag| drag.shape.clone().into())
    }

    fn drag_start(&self) -> Option<Point> {
        self.drag.as_ref().map(|drag| drag.start)
    }
}
