//! Drawing backend seam.

use crate::render::DisplayList;
use kurbo::Size;

/// The canvas library the surface draws through.
///
/// Implementations own the platform canvas: a web canvas element, a GPU
/// texture, or nothing at all for headless use.
pub trait SurfaceBackend {
    /// Allocate the canvas at the given size.
    fn create(&mut self, size: Size);

    /// Change the canvas bounds. Existing content is repainted afterwards.
    fn resize(&mut self, size: Size);

    /// Repaint everything from a display list.
    fn paint(&mut self, list: &DisplayList);

    /// Let pointer events fall through to whatever is beneath the layer.
    fn set_pointer_passthrough(&mut self, passthrough: bool);

    /// Detach listeners and free the canvas.
    fn release(&mut self);
}

/// A call received by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Create(Size),
    Resize(Size),
    Paint { items: usize, size: Size },
    PointerPassthrough(bool),
    Release,
}

/// Backend that records every call and keeps the last display list.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    last_frame: Option<DisplayList>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// The most recently painted display list.
    pub fn last_frame(&self) -> Option<&DisplayList> {
        self.last_frame.as_ref()
    }

    pub fn paint_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, BackendCall::Paint { .. }))
            .count()
    }

    pub fn is_released(&self) -> bool {
        self.calls.last() == Some(&BackendCall::Release)
    }
}

impl SurfaceBackend for RecordingBackend {
    fn create(&mut self, size: Size) {
        self.calls.push(BackendCall::Create(size));
    }

    fn resize(&mut self, size: Size) {
        self.calls.push(BackendCall::Resize(size));
    }

    fn paint(&mut self, list: &DisplayList) {
        self.calls.push(BackendCall::Paint {
            items: list.len(),
            size: list.size,
        });
        self.last_frame = Some(list.clone());
    }

    fn set_pointer_passthrough(&mut self, passthrough: bool) {
        self.calls.push(BackendCall::PointerPassthrough(passthrough));
    }

    fn release(&mut self) {
        self.calls.push(BackendCall::Release);
    }
}

impl<B: SurfaceBackend + ?Sized> SurfaceBackend for Box<B> {
    fn create(&mut self, size: Size) {
        (**self).create(size);
    }

    fn resize(&mut self, size: Size) {
        (**self).resize(size);
    }

    fn paint(&mut self, list: &DisplayList) {
        (**self).paint(list);
    }

    fn set_pointer_passthrough(&mut self, passthrough: bool) {
        (**self).set_pointer_passthrough(passthrough);
    }

    fn release(&mut self) {
        (**self).release();
    }
}

impl<B: SurfaceBackend + ?Sized> SurfaceBackend for &mut B {
    fn create(&mut self, size: Size) {
        (**self).create(size);
    }

    fn resize(&mut self, size: Size) {
        (**self).resize(size);
    }

    fn paint(&mut self, list: &DisplayList) {
        (**self).paint(list);
    }

    fn set_pointer_passthrough(&mut self, passthrough: bool) {
        (**self).set_pointer_passthrough(passthrough);
    }

    fn release(&mut self) {
        (**self).release();
    }
}
