//! In-memory collaborators for headless sessions and tests.
//!
//! Handles that a caller may want to inspect after giving the collaborator
//! to the controller ([`RecordingExporter`], [`SharedSelection`]) share
//! their state through `Rc`, so keep a clone before boxing.

use super::{
    Collaborators, ExportKind, ItemKind, LevelExporter, LevelImporter, ModelImporter,
    ObjectSelection, SimulationWorld, WorldFactory,
};
use crate::scenario::ScenarioRegistry;
use crowdscape_core::{CrowdscapeError, Result, Vec3};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{info, warn};

/// A world that only tracks its terrain extent
#[derive(Debug, Clone)]
pub struct MemoryWorld {
    terrain_size: Vec3,
}

impl MemoryWorld {
    pub fn new(terrain_size: Vec3) -> Self {
        Self { terrain_size }
    }
}

impl SimulationWorld for MemoryWorld {
    fn update_terrain_size(&mut self, size: Vec3) {
        self.terrain_size = size;
    }

    fn terrain_size(&self) -> Vec3 {
        self.terrain_size
    }

    fn duplicate(&self) -> Box<dyn SimulationWorld> {
        Box::new(self.clone())
    }
}

/// Creates [`MemoryWorld`]s with a fixed starting terrain
#[derive(Debug, Clone)]
pub struct MemoryWorldFactory {
    pub initial_terrain: Vec3,
}

impl WorldFactory for MemoryWorldFactory {
    fn create_world(&mut self) -> Box<dyn SimulationWorld> {
        Box::new(MemoryWorld::new(self.initial_terrain))
    }
}

/// Importer backed by a named preset list
#[derive(Debug, Clone, Default)]
pub struct PresetImporter {
    presets: Vec<String>,
    loaded: Vec<String>,
}

impl PresetImporter {
    pub fn new(presets: Vec<String>) -> Self {
        Self {
            presets,
            loaded: Vec::new(),
        }
    }

    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }
}

impl ModelImporter for PresetImporter {
    fn clear_all_loaded_models(&mut self) {
        self.loaded.clear();
    }

    fn load_preset(&mut self, index: usize) -> Result<()> {
        let preset = self.presets.get(index).ok_or_else(|| {
            CrowdscapeError::InvalidArgument(format!(
                "preset {} does not exist ({} available)",
                index,
                self.presets.len()
            ))
        })?;
        info!(preset = %preset, "loaded preset");
        self.loaded.push(preset.clone());
        Ok(())
    }

    fn loaded_model_count(&self) -> usize {
        self.loaded.len()
    }
}

/// One call to [`LevelExporter::export_level`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub kind: ExportKind,
    pub scenarios: usize,
    pub models: usize,
}

/// Exporter that accepts or rejects every level and remembers exports
#[derive(Debug, Clone, Default)]
pub struct RecordingExporter {
    accept: bool,
    records: Rc<RefCell<Vec<ExportRecord>>>,
}

impl RecordingExporter {
    pub fn new(accept: bool) -> Self {
        Self {
            accept,
            records: Rc::default(),
        }
    }

    pub fn records(&self) -> Vec<ExportRecord> {
        self.records.borrow().clone()
    }
}

impl LevelExporter for RecordingExporter {
    fn is_valid_export(&self, scenarios: &ScenarioRegistry) -> bool {
        self.accept && !scenarios.is_empty()
    }

    fn export_level(
        &mut self,
        scenarios: &ScenarioRegistry,
        importer: &dyn ModelImporter,
        kind: ExportKind,
    ) -> Result<()> {
        self.records.borrow_mut().push(ExportRecord {
            kind,
            scenarios: scenarios.len(),
            models: importer.loaded_model_count(),
        });
        Ok(())
    }
}

/// Level importer that either fails or replaces the models with presets
#[derive(Debug, Clone, Default)]
pub struct ScriptedLevelImporter {
    /// Rejection reason; `None` means imports succeed
    pub failure: Option<String>,
    /// Presets the imported level consists of
    pub presets: Vec<usize>,
}

impl LevelImporter for ScriptedLevelImporter {
    fn import_level(&mut self, importer: &mut dyn ModelImporter) -> Result<()> {
        if let Some(reason) = &self.failure {
            warn!(%reason, "level rejected");
            return Err(CrowdscapeError::ImportFailed(reason.clone()));
        }
        importer.clear_all_loaded_models();
        for &index in &self.presets {
            importer.load_preset(index)?;
        }
        Ok(())
    }
}

/// Selection that can be changed from outside the controller
#[derive(Debug, Clone, Default)]
pub struct SharedSelection {
    selected: Rc<Cell<Option<ItemKind>>>,
}

impl SharedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&self, kind: ItemKind) {
        self.selected.set(Some(kind));
    }
}

impl ObjectSelection for SharedSelection {
    fn selected(&self) -> Option<ItemKind> {
        self.selected.get()
    }

    fn unselect(&mut self) {
        self.selected.set(None);
    }
}

/// Bundle of in-memory collaborators
pub fn collaborators(
    importer: PresetImporter,
    exporter: RecordingExporter,
    level_importer: ScriptedLevelImporter,
    selection: SharedSelection,
    initial_terrain: Vec3,
) -> Collaborators {
    Collaborators {
        importer: Box::new(importer),
        exporter: Box::new(exporter),
        level_importer: Box::new(level_importer),
        worlds: Box::new(MemoryWorldFactory { initial_terrain }),
        selection: Box::new(selection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_importer_rejects_unknown_index() {
        let mut importer = PresetImporter::new(vec!["plaza".into()]);
        assert!(importer.load_preset(3).is_err());
        importer.load_preset(0).unwrap();
        assert_eq!(importer.loaded(), ["plaza".to_string()]);
        importer.clear_all_loaded_models();
        assert_eq!(importer.loaded_model_count(), 0);
    }

    #[test]
    fn scripted_import_replaces_models() {
        let mut importer = PresetImporter::new(vec!["plaza".into(), "station".into()]);
        importer.load_preset(0).unwrap();

        let mut level = ScriptedLevelImporter {
            failure: None,
            presets: vec![1, 1],
        };
        level.import_level(&mut importer).unwrap();
        assert_eq!(importer.loaded(), ["station".to_string(), "station".to_string()]);
    }

    #[test]
    fn scripted_import_failure() {
        let mut importer = PresetImporter::default();
        let mut level = ScriptedLevelImporter {
            failure: Some("corrupt".into()),
            presets: Vec::new(),
        };
        assert!(matches!(
            level.import_level(&mut importer),
            Err(CrowdscapeError::ImportFailed(_))
        ));
    }

    #[test]
    fn shared_selection_is_visible_through_clones() {
        let handle = SharedSelection::new();
        let mut boxed: Box<dyn ObjectSelection> = Box::new(handle.clone());
        handle.select(ItemKind::Obstacle);
        assert_eq!(boxed.selected(), Some(ItemKind::Obstacle));
        boxed.unselect();
        assert_eq!(handle.selected(), None);
    }

    #[test]
    fn world_duplicates_are_independent() {
        let world = MemoryWorld::new(Vec3::new(30.0, 600.0, 30.0));
        let mut copy = world.duplicate();
        copy.update_terrain_size(Vec3::new(10.0, 600.0, 10.0));
        assert_eq!(world.terrain_size(), Vec3::new(30.0, 600.0, 30.0));
    }
}
