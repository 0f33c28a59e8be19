//! Editor events and the queue they are broadcast on

use crate::collab::ExportKind;
use crate::command::ManipulatorMode;
use crate::panels::PanelId;
use crowdscape_core::{ScenarioId, Vec3};
use serde::Serialize;

/// Something the controller changed, for front ends to react to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditorEvent {
    PanelOpened { panel: PanelId },
    PanelClosed { panel: PanelId },
    ScenarioCreated { id: ScenarioId },
    ScenarioRemoved { id: ScenarioId },
    ToolSelected { mode: ManipulatorMode },
    LevelExported { kind: ExportKind },
    ExportRejected { kind: ExportKind },
    ImportFailed,
    TerrainResized { size: Vec3 },
    ViewZoomed { index: usize },
    ViewsReset,
    SimulationFinished,
}

/// A simple event queue that the controller pushes to and front ends drain
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<EditorEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: EditorEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}
