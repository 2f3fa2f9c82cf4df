//! Bridge from a host toolbar to surface commands.
//!
//! Toolbars that publish state as values (a selected tool, a color, and
//! monotonically increasing clear/undo/redo counters) are diffed here into
//! explicit [`SurfaceCommand`]s. A counter change means "do this once"; the
//! value `0` means nothing has been requested yet and never fires.

use crate::surface::{Surface, SurfaceBackend, SurfaceCommand};
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};

/// Action counters published by the toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerCounters {
    pub clear: u64,
    pub undo: u64,
    pub redo: u64,
}

/// Drawing settings published by the toolbar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarSettings {
    pub tool: ToolKind,
    pub color: String,
    pub brush_size: u32,
}

impl ToolbarSettings {
    pub fn new(tool: ToolKind, color: impl Into<String>, brush_size: u32) -> Self {
        Self {
            tool,
            color: color.into(),
            brush_size,
        }
    }
}

/// Remembers the last observed toolbar state and emits commands for changes.
#[derive(Debug, Clone, Default)]
pub struct ToolbarBridge {
    triggers: TriggerCounters,
    settings: Option<ToolbarSettings>,
}

impl ToolbarBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands for counters that changed since the last observation,
    /// in clear, undo, redo order.
    pub fn observe_triggers(&mut self, counters: TriggerCounters) -> Vec<SurfaceCommand> {
        let previous = std::mem::replace(&mut self.triggers, counters);
        let fired = |now: u64, before: u64| now != 0 && now != before;

        let mut commands = Vec::new();
        if fired(counters.clear, previous.clear) {
            commands.push(SurfaceCommand::Clear);
        }
        if fired(counters.undo, previous.undo) {
            commands.push(SurfaceCommand::Undo);
        }
        if fired(counters.redo, previous.redo) {
            commands.push(SurfaceCommand::Redo);
        }
        commands
    }

    /// Commands for settings that changed. The first observation emits all.
    pub fn observe_settings(&mut self, settings: &ToolbarSettings) -> Vec<SurfaceCommand> {
        let mut commands = Vec::new();
        let previous = self.settings.as_ref();

        if previous.is_none_or(|p| p.tool != settings.tool) {
            commands.push(SurfaceCommand::SetTool(settings.tool));
        }
        if previous.is_none_or(|p| p.color != settings.color) {
            commands.push(SurfaceCommand::SetColor(settings.color.clone()));
        }
        if previous.is_none_or(|p| p.brush_size != settings.brush_size) {
            commands.push(SurfaceCommand::SetBrushSize(settings.brush_size));
        }

        self.settings = Some(settings.clone());
        commands
    }

    /// Observe both and dispatch the resulting commands to a surface.
    /// Settings apply before triggers. Rejected commands are logged and skipped.
    pub fn apply<B: SurfaceBackend>(
        &mut self,
        surface: &mut Surface<B>,
        settings: &ToolbarSettings,
        counters: TriggerCounters,
    ) {
        let commands = self
            .observe_settings(settings)
            .into_iter()
            .chain(self.observe_triggers(counters));
        for command in commands {
            if let Err(err) = surface.dispatch(command.clone()) {
                log::warn!("Toolbar command {command:?} rejected: {err}");
            }
        }
    }
}
