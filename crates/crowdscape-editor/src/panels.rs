//! Popup panel visibility.
//!
//! Each popup surface has exactly one visible flag. There is no stacking:
//! opening a panel never hides another one, and the editor only asks
//! whether *any* popup is showing so it can suppress hotkeys underneath.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A popup surface of the level editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    LoadPreset,
    ConfirmLoad,
    ConfirmClear,
    SaveFailed,
    LoadFailed,
    SimulationRunning,
}

impl PanelId {
    pub const COUNT: usize = 6;

    pub const ALL: [PanelId; Self::COUNT] = [
        PanelId::LoadPreset,
        PanelId::ConfirmLoad,
        PanelId::ConfirmClear,
        PanelId::SaveFailed,
        PanelId::LoadFailed,
        PanelId::SimulationRunning,
    ];

    /// Panels closed by a cancel-all (escape) signal.
    pub const DISMISSABLE: [PanelId; 5] = [
        PanelId::ConfirmLoad,
        PanelId::SaveFailed,
        PanelId::ConfirmClear,
        PanelId::SimulationRunning,
        PanelId::LoadFailed,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            PanelId::LoadPreset => "load_preset",
            PanelId::ConfirmLoad => "confirm_load",
            PanelId::ConfirmClear => "confirm_clear",
            PanelId::SaveFailed => "save_failed",
            PanelId::LoadFailed => "load_failed",
            PanelId::SimulationRunning => "simulation_running",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Visible flags for every [`PanelId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    visible: [bool; PanelId::COUNT],
    /// Whether the cancel-all signal also closes the preset picker.
    escape_closes_load_preset: bool,
}

impl PanelState {
    /// All panels start closed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_escape_policy(escape_closes_load_preset: bool) -> Self {
        Self {
            escape_closes_load_preset,
            ..Self::default()
        }
    }

    /// Show a panel. Returns true if it was previously hidden.
    pub fn open(&mut self, panel: PanelId) -> bool {
        let was_open = std::mem::replace(&mut self.visible[panel.index()], true);
        !was_open
    }

    /// Hide a panel. Returns true if it was previously visible.
    pub fn close(&mut self, panel: PanelId) -> bool {
        std::mem::replace(&mut self.visible[panel.index()], false)
    }

    pub fn is_open(&self, panel: PanelId) -> bool {
        self.visible[panel.index()]
    }

    pub fn is_any_open(&self) -> bool {
        self.visible.iter().any(|&v| v)
    }

    /// Panels currently visible, in [`PanelId::ALL`] order.
    pub fn open_panels(&self) -> Vec<PanelId> {
        PanelId::ALL
            .into_iter()
            .filter(|p| self.is_open(*p))
            .collect()
    }

    /// Close the dismissable panels, returning the ones that were open.
    ///
    /// The preset picker is left alone unless the escape policy says otherwise.
    pub fn close_all_dismissable(&mut self) -> Vec<PanelId> {
        let mut closed: Vec<PanelId> = PanelId::DISMISSABLE
            .into_iter()
            .filter(|p| self.close(*p))
            .collect();
        if self.escape_closes_load_preset && self.close(PanelId::LoadPreset) {
            closed.push(PanelId::LoadPreset);
        }
        closed
    }

    pub fn reset(&mut self) {
        self.visible = [false; PanelId::COUNT];
    }
}
