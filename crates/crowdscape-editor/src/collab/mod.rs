//! Collaborators the editor delegates real work to.
//!
//! The controller never looks inside models, level files or simulation
//! worlds. It calls through these traits and only reacts to success or
//! failure, usually by showing a panel.

pub mod memory;

use crate::scenario::ScenarioRegistry;
use crowdscape_core::{Result, Vec3};
use serde::{Deserialize, Serialize};

/// What an export is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    /// Write the level out for the user to keep
    Download,
    /// Hand the level to the simulator and run it
    RunScene,
}

/// Kind of object currently selected in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Spawner,
    Obstacle,
    Goal,
}

/// Loads and clears the 3D models placed in the level
pub trait ModelImporter {
    fn clear_all_loaded_models(&mut self);

    /// Load the preset at `index` in the preset list
    fn load_preset(&mut self, index: usize) -> Result<()>;

    fn loaded_model_count(&self) -> usize;
}

/// Validates and writes levels
pub trait LevelExporter {
    fn is_valid_export(&self, scenarios: &ScenarioRegistry) -> bool;

    fn export_level(
        &mut self,
        scenarios: &ScenarioRegistry,
        importer: &dyn ModelImporter,
        kind: ExportKind,
    ) -> Result<()>;
}

/// Reads a level back in. An `Err` means the level was rejected.
pub trait LevelImporter {
    fn import_level(&mut self, importer: &mut dyn ModelImporter) -> Result<()>;
}

/// The crowd simulation world behind one scenario
pub trait SimulationWorld {
    fn update_terrain_size(&mut self, size: Vec3);

    fn terrain_size(&self) -> Vec3;

    /// Copy this world for a new alternative scenario
    fn duplicate(&self) -> Box<dyn SimulationWorld>;
}

/// Builds the world for a fresh main scenario
pub trait WorldFactory {
    fn create_world(&mut self) -> Box<dyn SimulationWorld>;
}

/// Current object selection in the scene
pub trait ObjectSelection {
    fn selected(&self) -> Option<ItemKind>;

    fn unselect(&mut self);
}

/// Everything the controller talks to
pub struct Collaborators {
    pub importer: Box<dyn ModelImporter>,
    pub exporter: Box<dyn LevelExporter>,
    pub level_importer: Box<dyn LevelImporter>,
    pub worlds: Box<dyn WorldFactory>,
    pub selection: Box<dyn ObjectSelection>,
}
