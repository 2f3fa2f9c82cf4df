//! Surface lifecycle: one mounted annotation layer over a media viewer.
//!
//! A [`Surface`] exclusively owns its scene, history and tool state, so two
//! viewers never share undo stacks. Every committed gesture flows through a
//! single commit path that records exactly one history entry.

mod backend;

pub use backend::{BackendCall, RecordingBackend, SurfaceBackend};

use crate::config::{ConfigError, EngineConfig};
use crate::history::{History, HistoryState};
use crate::render::DisplayList;
use crate::scene::Scene;
use crate::shapes::{Drawable, DrawableId};
use crate::snapshot::{Snapshot, SnapshotError};
use crate::tools::{InteractionState, ToolController, ToolKind, ToolOutcome, ToolSettings};
use kurbo::{Point, Size};
use thiserror::Error;

/// Surface errors. None of them leave the drawing in a changed state.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Surface has been released")]
    Disposed,
    #[error("Invalid surface size {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
    #[error("Brush size must be positive")]
    InvalidBrushSize,
    #[error("No text annotation with id {0}")]
    UnknownText(DrawableId),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// An explicit request from the toolbar or host.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    SetTool(ToolKind),
    SetColor(String),
    SetBrushSize(u32),
    Clear,
    Undo,
    Redo,
    Resize(Size),
}

/// Receives undo/redo availability after every push, undo, redo and clear.
pub type HistoryListener = Box<dyn FnMut(HistoryState)>;

#[derive(Debug, Clone, Copy)]
enum Step {
    Back,
    Forward,
}

/// The annotation layer for one mounted viewer.
pub struct Surface<B: SurfaceBackend> {
    backend: B,
    scene: Scene,
    history: History,
    tools: ToolController,
    viewport: Size,
    config: EngineConfig,
    /// Text annotation holding editing focus.
    editing: Option<DrawableId>,
    listener: Option<HistoryListener>,
    live: bool,
}

impl<B: SurfaceBackend> Surface<B> {
    /// Create the canvas, record the initial empty snapshot and paint it.
    pub fn mount(mut backend: B, viewport: Size, config: EngineConfig) -> SurfaceResult<Self> {
        config.validate()?;
        validate_size(viewport)?;

        let tools = ToolController::new(ToolSettings::from_config(&config));
        backend.create(viewport);
        backend.set_pointer_passthrough(!tools.kind().intercepts_pointer());

        let mut surface = Self {
            backend,
            scene: Scene::new(),
            history: History::with_capacity(config.history_capacity),
            tools,
            viewport,
            config,
            editing: None,
            listener: None,
            live: true,
        };
        // Undo from the first gesture must land on a known empty canvas
        surface.history.record(&surface.scene)?;
        surface.repaint();
        log::debug!(
            "Surface mounted at {}x{}",
            surface.viewport.width,
            surface.viewport.height
        );
        Ok(surface)
    }

    /// Install the history listener. It is called immediately with the
    /// current state so the toolbar starts in sync.
    pub fn set_history_listener(&mut self, listener: impl FnMut(HistoryState) + 'static) {
        self.listener = Some(Box::new(listener));
        self.notify();
    }

    pub fn pointer_down(&mut self, point: Point) {
        if self.ensure_live().is_err() {
            return;
        }
        match self.tools.pointer_down(point) {
            ToolOutcome::Committed(drawable) => self.commit(drawable),
            ToolOutcome::Updated => {
                self.editing = None;
                self.repaint();
            }
            ToolOutcome::Ignored => {}
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        if self.ensure_live().is_err() {
            return;
        }
        if let ToolOutcome::Updated = self.tools.pointer_move(point) {
            self.repaint();
        }
    }

    pub fn pointer_up(&mut self, point: Point) {
        if self.ensure_live().is_err() {
            return;
        }
        let was_down = self.tools.is_pointer_down();
        match self.tools.pointer_up(point) {
            ToolOutcome::Committed(drawable) => self.commit(drawable),
            // Dropped gesture: clear its preview
            _ if was_down => self.repaint(),
            _ => {}
        }
    }

    /// The pointer was released outside the surface: drop the gesture.
    pub fn pointer_leave(&mut self) {
        if self.ensure_live().is_err() {
            return;
        }
        if self.tools.cancel() {
            log::debug!("Abandoned {:?} gesture on pointer leave", self.tools.kind());
            self.repaint();
        }
    }

    /// Switch tools, abandoning any gesture in progress.
    pub fn set_tool(&mut self, kind: ToolKind) -> SurfaceResult<()> {
        self.ensure_live()?;
        if self.tools.set_tool(kind) {
            log::debug!("Abandoned in-progress gesture on switch to {kind:?}");
        }
        self.backend.set_pointer_passthrough(!kind.intercepts_pointer());
        self.editing = None;
        self.repaint();
        Ok(())
    }

    pub fn set_color(&mut self, color: impl Into<String>) -> SurfaceResult<()> {
        self.ensure_live()?;
        self.tools.set_color(color);
        Ok(())
    }

    pub fn set_brush_size(&mut self, size: u32) -> SurfaceResult<()> {
        self.ensure_live()?;
        if size == 0 {
            return Err(SurfaceError::InvalidBrushSize);
        }
        self.tools.set_brush_size(size);
        Ok(())
    }

    /// Step back one gesture. Returns false if there was nothing to undo.
    pub fn request_undo(&mut self) -> SurfaceResult<bool> {
        self.ensure_live()?;
        self.step(Step::Back)
    }

    /// Step forward one gesture. Returns false if there was nothing to redo.
    pub fn request_redo(&mut self) -> SurfaceResult<bool> {
        self.ensure_live()?;
        self.step(Step::Forward)
    }

    /// Empty the scene as one undoable action.
    pub fn request_clear(&mut self) -> SurfaceResult<()> {
        self.ensure_live()?;
        self.tools.cancel();
        self.scene.clear();
        self.editing = None;
        log::debug!("Cleared scene");
        self.record();
        self.repaint();
        Ok(())
    }

    /// Change the visible canvas bounds. Drawables keep their coordinates.
    pub fn resize(&mut self, size: Size) -> SurfaceResult<()> {
        self.ensure_live()?;
        validate_size(size)?;
        self.viewport = size;
        self.backend.resize(size);
        self.repaint();
        Ok(())
    }

    /// Give editing focus to an existing text annotation.
    pub fn begin_text_edit(&mut self, id: DrawableId) -> SurfaceResult<()> {
        self.ensure_live()?;
        if self.scene.get(id).and_then(Drawable::as_text).is_none() {
            return Err(SurfaceError::UnknownText(id));
        }
        self.editing = Some(id);
        self.repaint();
        Ok(())
    }

    /// Replace a text annotation's content. A real change is one gesture.
    /// Returns false if the content was unchanged.
    pub fn commit_text_edit(&mut self, id: DrawableId, content: &str) -> SurfaceResult<bool> {
        self.ensure_live()?;
        let text = self
            .scene
            .text_mut(id)
            .ok_or(SurfaceError::UnknownText(id))?;
        if !text.set_content(content) {
            return Ok(false);
        }
        log::debug!("Edited text {id}");
        self.record();
        self.repaint();
        Ok(true)
    }

    /// Drop text editing focus.
    pub fn end_text_edit(&mut self) {
        if self.editing.take().is_some() && self.live {
            self.repaint();
        }
    }

    /// Apply a toolbar or host command.
    pub fn dispatch(&mut self, command: SurfaceCommand) -> SurfaceResult<()> {
        match command {
            SurfaceCommand::SetTool(kind) => self.set_tool(kind),
            SurfaceCommand::SetColor(color) => self.set_color(color),
            SurfaceCommand::SetBrushSize(size) => self.set_brush_size(size),
            SurfaceCommand::Clear => self.request_clear(),
            SurfaceCommand::Undo => self.request_undo().map(|_| ()),
            SurfaceCommand::Redo => self.request_redo().map(|_| ()),
            SurfaceCommand::Resize(size) => self.resize(size),
        }
    }

    /// Capture the current scene, e.g. before teardown.
    pub fn export_snapshot(&self) -> SurfaceResult<Snapshot> {
        self.ensure_live()?;
        Ok(Snapshot::capture(&self.scene)?)
    }

    /// Detach from the backend. Safe to call more than once; every later
    /// call on this surface is a no-op.
    pub fn release(&mut self) {
        if !self.live {
            return;
        }
        if self.tools.cancel() {
            log::debug!("Abandoned in-progress gesture on release");
        }
        self.backend.release();
        self.live = false;
        self.listener = None;
        self.editing = None;
        log::debug!("Surface released");
    }

    /// Tear the surface down.
    pub fn unmount(mut self) {
        self.release();
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_state(&self) -> HistoryState {
        self.history.state()
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.kind()
    }

    pub fn tool_settings(&self) -> &ToolSettings {
        self.tools.settings()
    }

    pub fn interaction(&self) -> InteractionState {
        self.tools.interaction()
    }

    pub fn editing(&self) -> Option<DrawableId> {
        self.editing
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Drawables under a point, front to back, using the configured slop.
    pub fn drawables_at(&self, point: Point) -> Vec<DrawableId> {
        self.scene.drawables_at_point(point, self.config.hit_tolerance)
    }

    fn commit(&mut self, drawable: Drawable) {
        let id = drawable.id();
        self.editing = drawable.as_text().map(|_| id);
        self.scene.append(drawable);
        log::debug!("Committed {:?} gesture as {id}", self.tools.kind());
        self.record();
        self.repaint();
    }

    fn step(&mut self, step: Step) -> SurfaceResult<bool> {
        let restored = match step {
            Step::Back => self.history.undo_with(Snapshot::restore),
            Step::Forward => self.history.redo_with(Snapshot::restore),
        };
        match restored {
            None => Ok(false),
            Some(Ok(scene)) => {
                self.tools.cancel();
                self.scene.replace_with(scene);
                self.editing = None;
                log::debug!("{step:?} to history entry {}", self.history.cursor());
                self.repaint();
                self.notify();
                Ok(true)
            }
            Some(Err(err)) => {
                log::warn!("Keeping current drawing, history entry could not be restored: {err}");
                Err(err.into())
            }
        }
    }

    fn record(&mut self) {
        if let Err(err) = self.history.record(&self.scene) {
            log::warn!("Failed to record history entry: {err}");
        }
        self.notify();
    }

    fn notify(&mut self) {
        let state = self.history.state();
        if let Some(listener) = self.listener.as_mut() {
            listener(state);
        }
    }

    fn repaint(&mut self) {
        let preview = self.tools.in_progress();
        let list = DisplayList::build(&self.scene, preview.as_ref(), self.editing, self.viewport);
        self.backend.paint(&list);
    }

    fn ensure_live(&self) -> SurfaceResult<()> {
        if self.live {
            Ok(())
        } else {
            log::warn!("Ignoring call on released surface");
            Err(SurfaceError::Disposed)
        }
    }
}

impl<B: SurfaceBackend> Drop for Surface<B> {
    fn drop(&mut self) {
        self.release();
    }
}

fn validate_size(size: Size) -> SurfaceResult<()> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(size.width) && valid(size.height) {
        Ok(())
    } else {
        Err(SurfaceError::InvalidSize {
            width: size.width,
            height: size.height,
        })
    }
}
