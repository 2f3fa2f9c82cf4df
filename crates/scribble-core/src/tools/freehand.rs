//! Freehand tools: pen and eraser.

use super::{ToolHandler, ToolOutcome, ToolSettings};
use crate::shapes::{Drawable, Stroke};
use kurbo::Point;

/// Draws freehand strokes with the brush color and size.
#[derive(Debug, Clone, Default)]
pub struct PenTool {
    stroke: Option<Stroke>,
}

/// Draws destination-out strokes, wider than the brush.
#[derive(Debug, Clone, Default)]
pub struct EraserTool {
    stroke: Option<Stroke>,
}

fn extend(stroke: &mut Option<Stroke>, point: Point) -> ToolOutcome {
    match stroke {
        Some(stroke) => {
            stroke.add_point(point);
            ToolOutcome::Updated
        }
        None => ToolOutcome::Ignored,
    }
}

fn finish(stroke: &mut Option<Stroke>, point: Point) -> ToolOutcome {
    match stroke.take() {
        Some(mut stroke) => {
            // The release position is a sample too, unless it repeats the last one
            if stroke.last_point() != Some(point) {
                stroke.add_point(point);
            }
            ToolOutcome::Committed(stroke.into())
        }
        None => ToolOutcome::Ignored,
    }
}

impl ToolHandler for PenTool {
    fn pointer_down(&mut self, point: Point, settings: &ToolSettings) -> ToolOutcome {
        self.stroke = Some(Stroke::new(point, settings.brush_style()));
        ToolOutcome::Updated
    }

    fn pointer_move(&mut self, point: Point) -> ToolOutcome {
        extend(&mut self.stroke, point)
    }

    fn pointer_up(&mut self, point: Point) -> ToolOutcome {
        finish(&mut self.stroke, point)
    }

    fn in_progress(&self) -> Option<Drawable> {
        self.stroke.clone().map(Drawable::from)
    }

    fn drag_start(&self) -> Option<Point> {
        self.stroke.as_ref().and_then(|s| s.points.first().copied())
    }
}

impl ToolHandler for EraserTool {
    fn pointer_down(&mut self, point: Point, settings: &ToolSettings) -> ToolOutcome {
        self.stroke = Some(Stroke::eraser(point, settings.eraser_style()));
        ToolOutcome::Updated
    }

    fn pointer_move(&mut self, point: Point) -> ToolOutcome {
        extend(&mut self.stroke, point)
    }

    fn pointer_up(&mut self, point: Point) -> ToolOutcome {
        finish(&mut self.stroke, point)
    }

    fn in_progress(&self) -> Option<Drawable> {
        self.stroke.clone().map(Drawable::from)
    }

    fn drag_start(&self) -> Option<Point> {
        self.stroke.as_ref().and_then(|s| s.points.first().copied())
    }
}
