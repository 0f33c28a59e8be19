//! Crowdscape Editor - Headless level editor controller
//!
//! Holds the presentation state of the crowd-simulation level editor and
//! routes UI commands to the collaborators that do the real work:
//! - `PanelState`: popup visibility and the "any popup open" query
//! - `ViewportLayout`: fixed tiling of up to four scenario cameras, plus zoom
//! - `ScenarioRegistry`: owned alternative scenarios addressed by handle
//! - `EditorCommand` / `LevelEditorController`: one command per UI action
//! - `EditorInput`: per-frame hotkeys
//! - `EditorConfig`: layered TOML configuration

pub mod collab;
pub mod command;
pub mod config;
pub mod controller;
pub mod events;
pub mod input;
pub mod layout;
pub mod panels;
pub mod scenario;
pub mod terrain;

pub use collab::{
    Collaborators, ExportKind, ItemKind, LevelExporter, LevelImporter, ModelImporter,
    ObjectSelection, SimulationWorld, WorldFactory,
};
pub use command::{EditorCommand, ManipulatorMode};
pub use config::EditorConfig;
pub use controller::{
    Affordances, ContextPanels, EditorReport, FrameContext, LevelEditorController,
    ScenarioSummary, TerrainFields,
};
pub use events::{EditorEvent, EventBus};
pub use input::{EditorInput, KeyBinding};
pub use layout::{ViewSlot, ViewportLayout, MAX_VIEWS};
pub use panels::{PanelId, PanelState};
pub use scenario::{Scenario, ScenarioRegistry};
pub use terrain::{ExtentLimits, TerrainAxis};
