//! Tool system: turns raw pointer gestures into drawables.
//!
//! Each tool has its own handler type. The controller holds exactly one of
//! them inside [`ActiveTool`], so switching tools drops whatever gesture the
//! previous handler had in progress.

mod drag;
mod freehand;

pub use drag::{CircleTool, DragShape, DragTool, LineTool, RectangleTool};
pub use freehand::{EraserTool, PenTool};

use crate::config::EngineConfig;
use crate::shapes::{DrawStyle, Drawable, TextAnnotation};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Pointer events fall through to whatever lies beneath the layer.
    #[default]
    Select,
    Pen,
    Eraser,
    Circle,
    Rectangle,
    Line,
    Text,
}

impl ToolKind {
    /// Whether the drawing surface captures pointer events for this tool.
    pub fn intercepts_pointer(self) -> bool {
        self != ToolKind::Select
    }

    /// Get all tools in toolbar order.
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Select,
            ToolKind::Pen,
            ToolKind::Eraser,
            ToolKind::Circle,
            ToolKind::Rectangle,
            ToolKind::Line,
            ToolKind::Text,
        ]
    }
}

/// Settings applied to drawables created by any tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    /// CSS color for new marks.
    pub color: String,
    /// Brush size in pixels.
    pub brush_size: u32,
    /// Eraser width relative to the brush size.
    pub eraser_width_multiplier: f64,
    /// Content of a freshly placed text annotation.
    pub text_placeholder: String,
    /// Font size of new text annotations.
    pub text_font_size: f64,
}

impl ToolSettings {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            color: config.default_color.clone(),
            brush_size: config.default_brush_size,
            eraser_width_multiplier: config.eraser_width_multiplier,
            text_placeholder: config.text_placeholder.clone(),
            text_font_size: config.text_font_size,
        }
    }

    /// Style for pen strokes and shapes.
    pub fn brush_style(&self) -> DrawStyle {
        DrawStyle::new(self.color.clone(), f64::from(self.brush_size))
    }

    /// Style for eraser strokes.
    pub fn eraser_style(&self) -> DrawStyle {
        DrawStyle::new(
            self.color.clone(),
            f64::from(self.brush_size) * self.eraser_width_multiplier,
        )
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// What a pointer event did.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Nothing changed.
    Ignored,
    /// The in-progress drawable was started or changed.
    Updated,
    /// A gesture finished and produced an immutable drawable.
    Committed(Drawable),
}

/// Gesture handling for one tool.
pub trait ToolHandler {
    fn pointer_down(&mut self, point: Point, settings: &ToolSettings) -> ToolOutcome;

    fn pointer_move(&mut self, point: Point) -> ToolOutcome;

    fn pointer_up(&mut self, point: Point) -> ToolOutcome;

    /// The drawable being dragged, if any.
    fn in_progress(&self) -> Option<Drawable>;

    /// Where the current gesture started, if one is in progress.
    fn drag_start(&self) -> Option<Point>;
}

/// Click-through mode: the layer does not take part in pointer handling.
#[derive(Debug, Default)]
pub struct SelectTool;

impl ToolHandler for SelectTool {
    fn pointer_down(&mut self, _point: Point, _settings: &ToolSettings) -> ToolOutcome {
        ToolOutcome::Ignored
    }

    fn pointer_move(&mut self, _point: Point) -> ToolOutcome {
        ToolOutcome::Ignored
    }

    fn pointer_up(&mut self, _point: Point) -> ToolOutcome {
        ToolOutcome::Ignored
    }

    fn in_progress(&self) -> Option<Drawable> {
        None
    }

    fn drag_start(&self) -> Option<Point> {
        None
    }
}

/// Places a text annotation with a single click. There is no drag phase.
#[derive(Debug, Default)]
pub struct TextTool;

impl ToolHandler for TextTool {
    fn pointer_down(&mut self, point: Point, settings: &ToolSettings) -> ToolOutcome {
        let text = TextAnnotation::new(point, settings.text_placeholder.clone(), settings.color.clone())
            .with_font_size(settings.text_font_size);
        ToolOutcome::Committed(text.into())
    }

    fn pointer_move(&mut self, _point: Point) -> ToolOutcome {
        ToolOutcome::Ignored
    }

    fn pointer_up(&mut self, _point: Point) -> ToolOutcome {
        ToolOutcome::Ignored
    }

    fn in_progress(&self) -> Option<Drawable> {
        None
    }

    fn drag_start(&self) -> Option<Point> {
        None
    }
}

/// The active tool together with its gesture state.
#[derive(Debug)]
pub enum ActiveTool {
    Select(SelectTool),
    Pen(PenTool),
    Eraser(EraserTool),
    Circle(CircleTool),
    Rectangle(RectangleTool),
    Line(LineTool),
    Text(TextTool),
}

impl ActiveTool {
    /// Fresh, idle handler for a tool.
    pub fn new(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Select => ActiveTool::Select(SelectTool),
            ToolKind::Pen => ActiveTool::Pen(PenTool::default()),
            ToolKind::Eraser => ActiveTool::Eraser(EraserTool::default()),
            ToolKind::Circle => ActiveTool::Circle(CircleTool::default()),
            ToolKind::Rectangle => ActiveTool::Rectangle(RectangleTool::default()),
            ToolKind::Line => ActiveTool::Line(LineTool::default()),
            ToolKind::Text => ActiveTool::Text(TextTool),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ActiveTool::Select(_) => ToolKind::Select,
            ActiveTool::Pen(_) => ToolKind::Pen,
            ActiveTool::Eraser(_) => ToolKind::Eraser,
            ActiveTool::Circle(_) => ToolKind::Circle,
            ActiveTool::Rectangle(_) => ToolKind::Rectangle,
            ActiveTool::Line(_) => ToolKind::Line,
            ActiveTool::Text(_) => ToolKind::Text,
        }
    }

    fn handler(&self) -> &dyn ToolHandler {
        match self {
            ActiveTool::Select(t) => t,
            ActiveTool::Pen(t) => t,
            ActiveTool::Eraser(t) => t,
            ActiveTool::Circle(t) => t,
            ActiveTool::Rectangle(t) => t,
            ActiveTool::Line(t) => t,
            ActiveTool::Text(t) => t,
        }
    }

    fn handler_mut(&mut self) -> &mut dyn ToolHandler {
        match self {
            ActiveTool::Select(t) => t,
            ActiveTool::Pen(t) => t,
            ActiveTool::Eraser(t) => t,
            ActiveTool::Circle(t) => t,
            ActiveTool::Rectangle(t) => t,
            ActiveTool::Line(t) => t,
            ActiveTool::Text(t) => t,
        }
    }
}

/// Read-only view of the transient gesture state. Never part of history.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    pub active_tool: ToolKind,
    pub is_pointer_down: bool,
    pub drag_start: Option<Point>,
    pub in_progress: Option<Drawable>,
}

/// Routes pointer events to the active tool.
#[derive(Debug)]
pub struct ToolController {
    active: ActiveTool,
    settings: ToolSettings,
}

impl Default for ToolController {
    fn default() -> Self {
        Self::new(ToolSettings::default())
    }
}

impl ToolController {
    /// Create a controller with the select tool active.
    pub fn new(settings: ToolSettings) -> Self {
        Self {
            active: ActiveTool::new(ToolKind::default()),
            settings,
        }
    }

    /// Get the current tool.
    pub fn kind(&self) -> ToolKind {
        self.active.kind()
    }

    /// Switch tools. Any gesture in progress is dropped without committing.
    /// Returns true if a gesture was abandoned.
    pub fn set_tool(&mut self, kind: ToolKind) -> bool {
        let abandoned = self.is_pointer_down();
        self.active = ActiveTool::new(kind);
        abandoned
    }

    /// Abandon the current gesture, keeping the tool.
    /// Returns true if a gesture was abandoned.
    pub fn cancel(&mut self) -> bool {
        self.set_tool(self.kind())
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Set the color for subsequent gestures.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.settings.color = color.into();
    }

    /// Set the brush size for subsequent gestures.
    pub fn set_brush_size(&mut self, size: u32) {
        self.settings.brush_size = size;
    }

    pub fn pointer_down(&mut self, point: Point) -> ToolOutcome {
        if !is_finite(point) {
            log::debug!("Ignoring pointer down at non-finite position {point:?}");
            return ToolOutcome::Ignored;
        }
        let settings = &self.settings;
        let outcome = self.active.handler_mut().pointer_down(point, settings);
        reject_overflow(outcome)
    }

    pub fn pointer_move(&mut self, point: Point) -> ToolOutcome {
        if !is_finite(point) {
            return ToolOutcome::Ignored;
        }
        self.active.handler_mut().pointer_move(point)
    }

    pub fn pointer_up(&mut self, point: Point) -> ToolOutcome {
        if !is_finite(point) {
            // The gesture still ends, but nothing is committed
            if self.cancel() {
                log::debug!("Abandoned gesture released at non-finite position");
            }
            return ToolOutcome::Ignored;
        }
        let outcome = self.active.handler_mut().pointer_up(point);
        reject_overflow(outcome)
    }

    /// Check if a gesture is in progress.
    pub fn is_pointer_down(&self) -> bool {
        self.active.handler().drag_start().is_some()
    }

    /// Get the drawable being dragged, for preview rendering.
    pub fn in_progress(&self) -> Option<Drawable> {
        self.active.handler().in_progress()
    }

    pub fn interaction(&self) -> InteractionState {
        let handler = self.active.handler();
        InteractionState {
            active_tool: self.kind(),
            is_pointer_down: handler.drag_start().is_some(),
            drag_start: handler.drag_start(),
            in_progress: handler.in_progress(),
        }
    }
}

fn is_finite(point: Point) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

/// Geometry computed from finite points can still overflow. Such a gesture
/// is dropped like an abandoned one.
fn reject_overflow(outcome: ToolOutcome) -> ToolOutcome {
    match outcome {
        ToolOutcome::Committed(drawable) if !drawable.is_finite() => {
            log::warn!("Dropping gesture {} with non-finite geometry", drawable.id());
            ToolOutcome::Ignored
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(kind: ToolKind) -> ToolController {
        let mut tc = ToolController::default();
        tc.set_tool(kind);
        tc
    }

    #[test]
    fn test_tool_selection() {
        let mut tc = ToolController::default();
        assert_eq!(tc.kind(), ToolKind::Select);

        tc.set_tool(ToolKind::Rectangle);
        assert_eq!(tc.kind(), ToolKind::Rectangle);
        assert!(!tc.is_pointer_down());
    }

    #[test]
    fn test_select_tool_ignores_pointer() {
        let mut tc = controller(ToolKind::Select);
        assert_eq!(tc.pointer_down(Point::new(0.0, 0.0)), ToolOutcome::Ignored);
        assert_eq!(tc.pointer_move(Point::new(10.0, 10.0)), ToolOutcome::Ignored);
        assert_eq!(tc.pointer_up(Point::new(10.0, 10.0)), ToolOutcome::Ignored);
        assert!(!ToolKind::Select.intercepts_pointer());
    }

    #[test]
    fn test_rectangle_interaction() {
        let mut tc = controller(ToolKind::Rectangle);
        assert_eq!(tc.pointer_down(Point::new(50.0, 50.0)), ToolOutcome::Updated);
        assert!(tc.is_pointer_down());
        assert_eq!(tc.interaction().drag_start, Some(Point::new(50.0, 50.0)));

        // Degenerate while nothing has moved yet
        let Some(Drawable::Rectangle(preview)) = tc.in_progress() else {
            panic!("expected rectangle preview");
        };
        assert!(preview.width.abs() < f64::EPSILON);

        tc.pointer_move(Point::new(60.0, 70.0));
        let ToolOutcome::Committed(Drawable::Rectangle(rect)) = tc.pointer_up(Point::new(20.0, 10.0))
        else {
            panic!("expected committed rectangle");
        };
        assert_eq!(rect.origin, Point::new(20.0, 10.0));
        assert!((rect.width - 30.0).abs() < f64::EPSILON);
        assert!((rect.height - 40.0).abs() < f64::EPSILON);
        assert!(!tc.is_pointer_down());
        assert!(tc.in_progress().is_none());
    }

    #[test]
    fn test_circle_commit() {
        let mut tc = controller(ToolKind::Circle);
        tc.pointer_down(Point::new(10.0, 10.0));
        let ToolOutcome::Committed(Drawable::Circle(circle)) = tc.pointer_up(Point::new(10.0, 30.0))
        else {
            panic!("expected committed circle");
        };
        assert_eq!(circle.center, Point::new(10.0, 10.0));
        assert!((circle.radius - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_line_commit() {
        let mut tc = controller(ToolKind::Line);
        tc.pointer_down(Point::new(1.0, 2.0));
        tc.pointer_move(Point::new(3.0, 4.0));
        let ToolOutcome::Committed(Drawable::Line(line)) = tc.pointer_up(Point::new(5.0, 6.0)) else {
            panic!("expected committed line");
        };
        assert_eq!(line.start, Point::new(1.0, 2.0));
        assert_eq!(line.end, Point::new(5.0, 6.0));
    }

    #[test]
    fn test_shapes_use_brush() {
        let mut tc = controller(ToolKind::Line);
        tc.set_color("#ff0000");
        tc.set_brush_size(7);
        tc.pointer_down(Point::ZERO);
        let ToolOutcome::Committed(line) = tc.pointer_up(Point::new(1.0, 1.0)) else {
            panic!("expected committed line");
        };
        let style = line.style().unwrap();
        assert_eq!(style.color, "#ff0000");
        assert!((style.width - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_switching_tool_abandons_gesture() {
        let mut tc = controller(ToolKind::Rectangle);
        tc.pointer_down(Point::new(0.0, 0.0));
        tc.pointer_move(Point::new(40.0, 40.0));

        assert!(tc.set_tool(ToolKind::Pen));
        assert!(!tc.is_pointer_down());
        assert!(tc.in_progress().is_none());
        // The stale release belongs to no gesture
        assert_eq!(tc.pointer_up(Point::new(50.0, 50.0)), ToolOutcome::Ignored);
    }

    #[test]
    fn test_cancel_keeps_tool() {
        let mut tc = controller(ToolKind::Pen);
        assert!(!tc.cancel());
        tc.pointer_down(Point::ZERO);
        assert!(tc.cancel());
        assert_eq!(tc.kind(), ToolKind::Pen);
        assert!(!tc.is_pointer_down());
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let mut tc = controller(ToolKind::Circle);
        assert_eq!(tc.pointer_move(Point::new(5.0, 5.0)), ToolOutcome::Ignored);
        assert_eq!(tc.pointer_up(Point::new(5.0, 5.0)), ToolOutcome::Ignored);
    }

    #[test]
    fn test_text_single_click() {
        let mut tc = controller(ToolKind::Text);
        let ToolOutcome::Committed(Drawable::Text(text)) = tc.pointer_down(Point::new(100.0, 100.0))
        else {
            panic!("expected committed text");
        };
        assert_eq!(text.position, Point::new(100.0, 100.0));
        assert_eq!(text.content, "Text");
        assert!((text.font_size - 20.0).abs() < f64::EPSILON);
        assert!(!tc.is_pointer_down());
        assert_eq!(tc.pointer_up(Point::new(100.0, 100.0)), ToolOutcome::Ignored);
    }

    #[test]
    fn test_non_finite_points_ignored() {
        let mut tc = controller(ToolKind::Pen);
        assert_eq!(tc.pointer_down(Point::new(f64::NAN, 0.0)), ToolOutcome::Ignored);
        assert!(!tc.is_pointer_down());

        tc.pointer_down(Point::new(1.0, 1.0));
        assert_eq!(tc.pointer_move(Point::new(f64::INFINITY, 0.0)), ToolOutcome::Ignored);
        let Some(Drawable::Stroke(stroke)) = tc.in_progress() else {
            panic!("expected stroke preview");
        };
        assert_eq!(stroke.len(), 1);
        assert_eq!(tc.pointer_up(Point::new(f64::NAN, f64::NAN)), ToolOutcome::Ignored);
        assert!(!tc.is_pointer_down());
    }

    #[test]
    fn test_overflowing_geometry_not_committed() {
        let mut tc = controller(ToolKind::Rectangle);
        tc.pointer_down(Point::new(-1e308, 0.0));
        tc.pointer_move(Point::new(1e308, 10.0));
        assert_eq!(tc.pointer_up(Point::new(1e308, 10.0)), ToolOutcome::Ignored);
        assert!(!tc.is_pointer_down());

        tc.set_tool(ToolKind::Circle);
        tc.pointer_down(Point::new(-1e308, -1e308));
        assert_eq!(tc.pointer_up(Point::new(1e308, 1e308)), ToolOutcome::Ignored);

        let mut eraser = ToolController::new(ToolSettings {
            brush_size: 10,
            eraser_width_multiplier: f64::MAX,
            ..ToolSettings::default()
        });
        eraser.set_tool(ToolKind::Eraser);
        eraser.pointer_down(Point::new(0.0, 0.0));
        assert_eq!(eraser.pointer_up(Point::new(5.0, 5.0)), ToolOutcome::Ignored);
        assert!(!eraser.is_pointer_down());

        // Large but representable geometry still commits
        tc.set_tool(ToolKind::Line);
        tc.pointer_down(Point::new(-1e300, 0.0));
        assert!(matches!(
            tc.pointer_up(Point::new(1e300, 0.0)),
            ToolOutcome::Committed(Drawable::Line(_))
        ));
    }

    #[test]
    fn test_interaction_state_view() {
        let mut tc = controller(ToolKind::Pen);
        let idle = tc.interaction();
        assert_eq!(idle.active_tool, ToolKind::Pen);
        assert!(!idle.is_pointer_down);
        assert!(idle.in_progress.is_none());

        tc.pointer_down(Point::new(3.0, 4.0));
        let active = tc.interaction();
        assert!(active.is_pointer_down);
        assert_eq!(active.drag_start, Some(Point::new(3.0, 4.0)));
        assert!(matches!(active.in_progress, Some(Drawable::Stroke(_))));
        assert!(active.in_progress.unwrap().bounds().width() >= 0.0);
    }

    #[test]
    fn test_all_tools_start_idle() {
        for &kind in ToolKind::all() {
            let tc = controller(kind);
            assert_eq!(tc.kind(), kind);
            assert!(!tc.is_pointer_down());
            assert_eq!(tc.interaction().active_tool.intercepts_pointer(), kind != ToolKind::Select);
        }
    }
}
