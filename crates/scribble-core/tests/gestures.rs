use kurbo::{Point, Size};
use scribble_core::shapes::Drawable;
use scribble_core::surface::BackendCall;
use scribble_core::{
    EngineConfig, RecordingBackend, Snapshot, Surface, SurfaceCommand, SurfaceError, ToolKind,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn mount() -> Surface<RecordingBackend> {
    init_logging();
    Surface::mount(
        RecordingBackend::new(),
        Size::new(1280.0, 720.0),
        EngineConfig::default(),
    )
    .unwrap()
}

fn drag(surface: &mut Surface<RecordingBackend>, from: Point, to: Point) {
    surface.pointer_down(from);
    surface.pointer_move(from.midpoint(to));
    surface.pointer_move(to);
    surface.pointer_up(to);
}

fn snapshot(surface: &Surface<RecordingBackend>) -> Snapshot {
    surface.export_snapshot().unwrap()
}

#[test]
fn test_each_gesture_is_one_entry() {
    let mut surface = mount();
    let tools = [
        ToolKind::Pen,
        ToolKind::Eraser,
        ToolKind::Circle,
        ToolKind::Rectangle,
        ToolKind::Line,
        ToolKind::Text,
    ];
    for (n, tool) in tools.into_iter().enumerate() {
        surface.set_tool(tool).unwrap();
        let offset = n as f64 * 20.0;
        drag(
            &mut surface,
            Point::new(offset, offset),
            Point::new(offset + 15.0, offset + 5.0),
        );
        assert_eq!(surface.history().len(), n + 2);
        assert_eq!(surface.history().cursor(), n + 1);
    }
    assert_eq!(surface.scene().len(), tools.len());
}

#[test]
fn test_undo_then_redo_is_identity() {
    let mut surface = mount();
    surface.set_tool(ToolKind::Pen).unwrap();
    drag(&mut surface, Point::new(1.0, 2.0), Point::new(40.0, 30.0));
    surface.set_tool(ToolKind::Circle).unwrap();
    drag(&mut surface, Point::new(100.0, 100.0), Point::new(130.0, 140.0));

    let before = snapshot(&surface);
    assert!(surface.request_undo().unwrap());
    assert_ne!(snapshot(&surface), before);
    assert!(surface.request_redo().unwrap());
    assert_eq!(snapshot(&surface), before);
}

#[test]
fn test_push_after_undo_drops_redo_branch() {
    let mut surface = mount();
    surface.set_tool(ToolKind::Line).unwrap();
    for i in 0..4 {
        let y = f64::from(i) * 10.0;
        drag(&mut surface, Point::new(0.0, y), Point::new(50.0, y));
    }
    surface.request_undo().unwrap();
    surface.request_undo().unwrap();
    assert!(surface.history_state().can_redo);
    assert_eq!(surface.history().len(), 5);

    drag(&mut surface, Point::new(5.0, 5.0), Point::new(6.0, 60.0));
    assert!(!surface.history_state().can_redo);
    assert_eq!(surface.history().len(), 4);
    assert_eq!(surface.history().cursor(), 3);
    assert_eq!(surface.scene().len(), 3);
}

#[test]
fn test_clear_then_undo_restores_drawing() {
    let mut surface = mount();
    surface.set_tool(ToolKind::Rectangle).unwrap();
    drag(&mut surface, Point::new(10.0, 10.0), Point::new(90.0, 60.0));
    surface.set_tool(ToolKind::Text).unwrap();
    surface.pointer_down(Point::new(200.0, 200.0));
    let before = snapshot(&surface);

    surface.request_clear().unwrap();
    assert!(surface.scene().is_empty());
    assert_eq!(surface.history().len(), 4);

    surface.request_undo().unwrap();
    assert_eq!(snapshot(&surface), before);
    assert_eq!(surface.scene().len(), 2);
}

#[test]
fn test_abandoned_shape_leaves_history() {
    let mut surface = mount();
    surface.set_tool(ToolKind::Pen).unwrap();
    drag(&mut surface, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
    let scene = surface.scene().clone();
    let entries = surface.history().len();

    surface.set_tool(ToolKind::Rectangle).unwrap();
    surface.pointer_down(Point::new(20.0, 20.0));
    surface.pointer_move(Point::new(80.0, 90.0));
    surface.set_tool(ToolKind::Pen).unwrap();
    // The release now belongs to no gesture
    surface.pointer_up(Point::new(80.0, 90.0));

    assert_eq!(surface.history().len(), entries);
    assert_eq!(surface.scene(), &scene);
    assert!(surface.interaction().in_progress.is_none());
}

#[test]
fn test_circle_centered_on_drag_start() {
    let mut surface = mount();
    surface.set_tool(ToolKind::Circle).unwrap();
    drag(&mut surface, Point::new(10.0, 10.0), Point::new(10.0, 30.0));

    let Drawable::Circle(circle) = &surface.scene().objects()[0] else {
        panic!("expected a circle");
    };
    assert_eq!(circle.center, Point::new(10.0, 10.0));
    assert!((circle.radius - 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_rectangle_normalized_origin() {
    let mut surface = mount();
    surface.set_tool(ToolKind::Rectangle).unwrap();
    drag(&mut surface, Point::new(50.0, 50.0), Point::new(20.0, 10.0));

    let Drawable::Rectangle(rect) = &surface.scene().objects()[0] else {
        panic!("expected a rectangle");
    };
    assert_eq!(rect.origin, Point::new(20.0, 10.0));
    assert!((rect.width - 30.0).abs() < f64::EPSILON);
    assert!((rect.height - 40.0).abs() < f64::EPSILON);
}

#[test]
fn test_text_single_click_commit() {
    let mut surface = mount();
    surface.set_tool(ToolKind::Text).unwrap();
    surface.pointer_down(Point::new(64.0, 48.0));
    surface.pointer_move(Point::new(70.0, 50.0));
    surface.pointer_up(Point::new(70.0, 50.0));

    assert_eq!(surface.history().len(), 2);
    let drawable = &surface.scene().objects()[0];
    let Drawable::Text(text) = drawable else {
        panic!("expected text");
    };
    assert_eq!(text.position, Point::new(64.0, 48.0));
    assert_eq!(text.content, "Text");
    assert_eq!(surface.editing(), Some(drawable.id()));
}

#[test]
fn test_resize_keeps_coordinates() {
    let mut surface = mount();
    surface.set_tool(ToolKind::Line).unwrap();
    drag(&mut surface, Point::new(100.0, 100.0), Point::new(1200.0, 700.0));
    let scene = surface.scene().clone();
    let entries = surface.history().len();

    surface.resize(Size::new(640.0, 360.0)).unwrap();
    assert_eq!(surface.scene(), &scene);
    assert_eq!(surface.history().len(), entries);

    let calls = surface.backend().calls();
    assert!(calls.contains(&BackendCall::Resize(Size::new(640.0, 360.0))));
    assert_eq!(
        calls.last(),
        Some(&BackendCall::Paint {
            items: 1,
            size: Size::new(640.0, 360.0)
        })
    );
    assert!(matches!(
        surface.resize(Size::new(-1.0, 10.0)),
        Err(SurfaceError::InvalidSize { .. })
    ));
}

#[test]
fn test_eraser_is_undoable() {
    let mut surface = mount();
    surface.dispatch(SurfaceCommand::SetTool(ToolKind::Pen)).unwrap();
    drag(&mut surface, Point::new(0.0, 50.0), Point::new(100.0, 50.0));
    surface.dispatch(SurfaceCommand::SetTool(ToolKind::Eraser)).unwrap();
    drag(&mut surface, Point::new(50.0, 0.0), Point::new(50.0, 100.0));

    assert_eq!(surface.scene().len(), 2);
    assert!(surface.scene().objects()[1].is_eraser());

    surface.dispatch(SurfaceCommand::Undo).unwrap();
    assert_eq!(surface.scene().len(), 1);
    assert!(!surface.scene().objects()[0].is_eraser());
}

#[test]
fn test_released_surface_ignores_everything() {
    let mut surface = mount();
    surface.set_tool(ToolKind::Circle).unwrap();
    surface.pointer_down(Point::new(10.0, 10.0));
    surface.release();

    let paints = surface.backend().paint_count();
    surface.pointer_move(Point::new(40.0, 40.0));
    surface.pointer_up(Point::new(40.0, 40.0));
    assert!(matches!(
        surface.resize(Size::new(100.0, 100.0)),
        Err(SurfaceError::Disposed)
    ));
    assert!(matches!(
        surface.dispatch(SurfaceCommand::Clear),
        Err(SurfaceError::Disposed)
    ));

    assert!(surface.scene().is_empty());
    assert_eq!(surface.history().len(), 1);
    assert_eq!(surface.backend().paint_count(), paints);
    assert!(surface.backend().is_released());
}
