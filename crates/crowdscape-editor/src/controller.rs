//! The level editor controller.
//!
//! Owns the presentation state of the editor and routes every UI command to
//! the collaborators. Front ends call [`LevelEditorController::dispatch`]
//! for each UI action and [`LevelEditorController::update`] once per frame,
//! then draw from the accessors and drain the event queue.

use crate::collab::{Collaborators, ExportKind, ItemKind, SimulationWorld};
use crate::command::{EditorCommand, ManipulatorMode};
use crate::config::EditorConfig;
use crate::events::{EditorEvent, EventBus};
use crate::input::{EditorInput, CANCEL, TERRAIN_PANEL};
use crate::layout::{ViewSlot, ViewportLayout};
use crate::panels::{PanelId, PanelState};
use crate::scenario::ScenarioRegistry;
use crate::terrain::{self, TerrainAxis};
use crowdscape_core::{CrowdscapeError, Result, ScenarioId, Vec3};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Per-frame facts the controller cannot observe itself
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameContext {
    /// A text field has keyboard focus, so hotkeys must not fire
    pub input_field_focused: bool,
}

/// Non-modal panels and hints that follow the current tool and selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContextPanels {
    pub objects: bool,
    pub edit_spawner: bool,
    pub edit_obstacle: bool,
    pub edit_object_hint: bool,
    pub edit_goal_hint: bool,
    pub terrain_size: bool,
}

/// Which buttons the front end should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Affordances {
    pub import_models: bool,
    pub clear_models: bool,
    pub create_alternative: bool,
    pub remove_alternative: bool,
    pub run_scene: bool,
    pub simulation_label: bool,
}

/// Contents of the terrain size text fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TerrainFields {
    pub width: String,
    pub depth: String,
}

/// Summary of one scenario for reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    pub id: ScenarioId,
    pub name: String,
    pub origin: Vec3,
    pub terrain_size: Vec3,
}

/// Serializable snapshot of the whole editor state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorReport {
    pub mode: ManipulatorMode,
    pub open_panels: Vec<PanelId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoomed_view: Option<usize>,
    pub loaded_models: usize,
    pub simulation_running: bool,
    pub terrain_fields: TerrainFields,
    pub context_panels: ContextPanels,
    pub affordances: Affordances,
    pub views: Vec<ViewSlot>,
    pub scenarios: Vec<ScenarioSummary>,
}

pub struct LevelEditorController {
    config: EditorConfig,
    panels: PanelState,
    layout: ViewportLayout,
    scenarios: ScenarioRegistry,
    collab: Collaborators,
    mode: ManipulatorMode,
    context: ContextPanels,
    terrain_fields: TerrainFields,
    simulation_running: bool,
    events: EventBus,
}

impl LevelEditorController {
    /// Build the editor with every popup closed and one main scenario
    /// sized to the default terrain.
    pub fn new(config: EditorConfig, collab: Collaborators) -> Result<Self> {
        config.validate()?;

        let mut editor = Self {
            panels: PanelState::with_escape_policy(config.escape_closes_load_preset),
            layout: ViewportLayout::new(),
            scenarios: ScenarioRegistry::new(config.max_scenarios, config.scenario_spacing),
            config,
            collab,
            mode: ManipulatorMode::default(),
            context: ContextPanels::default(),
            terrain_fields: TerrainFields::default(),
            simulation_running: false,
            events: EventBus::new(),
        };

        let world = editor.collab.worlds.create_world();
        editor.add_scenario(world)?;
        editor.apply_default_terrain();
        editor.refresh_context_panels();
        Ok(editor)
    }

    /// Handle one UI action.
    pub fn dispatch(&mut self, command: EditorCommand) -> Result<()> {
        debug!(?command, "dispatch");
        match command {
            EditorCommand::ImportModels => self.open_panel(PanelId::LoadPreset),
            EditorCommand::ClearModels => self.collab.importer.clear_all_loaded_models(),
            EditorCommand::ConfirmPreset { index } => {
                if let Some(index) = index {
                    self.collab.importer.load_preset(index)?;
                }
                self.close_panel(PanelId::LoadPreset);
            }
            EditorCommand::CancelPreset => self.close_panel(PanelId::LoadPreset),

            EditorCommand::LoadScene => {
                self.set_mode(ManipulatorMode::Create);
                self.collab.selection.unselect();
                self.open_panel(PanelId::ConfirmLoad);
            }
            EditorCommand::SaveScene | EditorCommand::ConfirmLoadSave => {
                self.export(ExportKind::Download)?;
            }
            EditorCommand::RunScene => {
                if self.export(ExportKind::RunScene)? {
                    self.simulation_running = true;
                    self.open_panel(PanelId::SimulationRunning);
                }
            }
            EditorCommand::CreateAlternative => {
                self.create_alternative()?;
            }
            EditorCommand::RemoveAlternative => self.remove_alternative()?,

            EditorCommand::ConfirmLoadAnyway => {
                let result = self
                    .collab
                    .level_importer
                    .import_level(self.collab.importer.as_mut());
                match result {
                    Ok(()) => info!("level imported"),
                    Err(e) => {
                        warn!(error = %e, "level import failed");
                        self.invalid_import();
                    }
                }
                self.close_panel(PanelId::ConfirmLoad);
            }
            EditorCommand::CancelLoad => self.close_panel(PanelId::ConfirmLoad),

            EditorCommand::ClearScene => self.open_panel(PanelId::ConfirmClear),
            EditorCommand::ConfirmClear => {
                self.clear_level()?;
                self.close_panel(PanelId::ConfirmClear);
            }
            EditorCommand::CancelClear => self.close_panel(PanelId::ConfirmClear),

            EditorCommand::DismissSaveFailed => self.close_panel(PanelId::SaveFailed),
            EditorCommand::DismissLoadFailed => self.close_panel(PanelId::LoadFailed),
            EditorCommand::DismissSimulationRunning => {
                self.close_panel(PanelId::SimulationRunning)
            }

            EditorCommand::ZoomView { index } => {
                self.layout.zoom(index)?;
                self.events.push(EditorEvent::ViewZoomed { index });
            }
            EditorCommand::ResetViews => self.reset_views()?,
            EditorCommand::SelectTool { mode } => self.set_mode(mode),

            EditorCommand::SetTerrainWidth { text } => self.edit_terrain(TerrainAxis::Width, &text),
            EditorCommand::SetTerrainDepth { text } => self.edit_terrain(TerrainAxis::Depth, &text),
            EditorCommand::ToggleTerrainPanel => self.toggle_terrain_panel(),

            EditorCommand::CancelAll => self.cancel_all(),
        }
        Ok(())
    }

    /// Per-frame pass: hotkeys, then context panels.
    pub fn update(&mut self, input: &EditorInput, frame: FrameContext) {
        if !frame.input_field_focused && !self.panels.is_any_open() {
            if let Some(mode) = input.tool_just_pressed().and_then(ManipulatorMode::from_index) {
                self.set_mode(mode);
            }
        }

        if input.is_action_just_pressed(CANCEL) && self.panels.is_any_open() {
            self.cancel_all();
        }

        if input.is_action_just_pressed(TERRAIN_PANEL) {
            self.toggle_terrain_panel();
        }

        self.refresh_context_panels();
    }

    /// The level importer rejected a level.
    pub fn invalid_import(&mut self) {
        self.events.push(EditorEvent::ImportFailed);
        self.open_panel(PanelId::LoadFailed);
    }

    /// The simulator finished a run started with [`EditorCommand::RunScene`].
    pub fn simulation_finished(&mut self) {
        self.simulation_running = false;
        self.events.push(EditorEvent::SimulationFinished);
    }

    /// Add an alternative scenario copied from the main one.
    pub fn create_alternative(&mut self) -> Result<ScenarioId> {
        if self.scenarios.is_full() {
            warn!(max = self.scenarios.max(), "alternative refused: scenario limit reached");
            return Err(CrowdscapeError::LimitReached {
                what: "scenarios".into(),
                max: self.scenarios.max(),
            });
        }

        let world = match self.scenarios.main() {
            Some(main) => main.world.duplicate(),
            None => self.collab.worlds.create_world(),
        };
        self.add_scenario(world)
    }

    /// Remove the newest alternative. The main scenario always stays.
    pub fn remove_alternative(&mut self) -> Result<()> {
        if self.scenarios.len() <= 1 {
            return Err(CrowdscapeError::InvalidArgument(
                "the main scenario cannot be removed".into(),
            ));
        }
        if let Some(removed) = self.scenarios.remove_last() {
            self.layout.remove_slot();
            self.events.push(EditorEvent::ScenarioRemoved { id: removed.id });
        }
        self.layout.relayout()
    }

    fn add_scenario(&mut self, world: Box<dyn SimulationWorld>) -> Result<ScenarioId> {
        let id = self.scenarios.create(world)?;
        if let Err(e) = self.layout.add_slot(id) {
            self.scenarios.remove_last();
            return Err(e);
        }
        self.layout.relayout()?;
        self.events.push(EditorEvent::ScenarioCreated { id });
        Ok(id)
    }

    fn export(&mut self, kind: ExportKind) -> Result<bool> {
        if !self.collab.exporter.is_valid_export(&self.scenarios) {
            warn!(?kind, "export rejected by validation");
            self.events.push(EditorEvent::ExportRejected { kind });
            self.open_panel(PanelId::SaveFailed);
            return Ok(false);
        }

        self.collab
            .exporter
            .export_level(&self.scenarios, self.collab.importer.as_ref(), kind)?;
        info!(?kind, scenarios = self.scenarios.len(), "level exported");
        self.events.push(EditorEvent::LevelExported { kind });
        Ok(true)
    }

    fn clear_level(&mut self) -> Result<()> {
        self.set_mode(ManipulatorMode::Create);
        self.collab.importer.clear_all_loaded_models();

        for id in self.scenarios.ids() {
            self.events.push(EditorEvent::ScenarioRemoved { id });
        }
        self.scenarios.clear();
        self.layout.clear();

        let world = self.collab.worlds.create_world();
        self.add_scenario(world)?;
        self.apply_default_terrain();
        info!("level cleared");
        Ok(())
    }

    fn reset_views(&mut self) -> Result<()> {
        self.layout.relayout()?;
        self.events.push(EditorEvent::ViewsReset);
        Ok(())
    }

    fn cancel_all(&mut self) {
        for panel in self.panels.close_all_dismissable() {
            self.events.push(EditorEvent::PanelClosed { panel });
        }
    }

    fn set_mode(&mut self, mode: ManipulatorMode) {
        if self.mode != mode {
            debug!(%mode, "tool selected");
            self.mode = mode;
            self.events.push(EditorEvent::ToolSelected { mode });
        }
    }

    fn open_panel(&mut self, panel: PanelId) {
        if self.panels.open(panel) {
            debug!(%panel, "panel opened");
            self.events.push(EditorEvent::PanelOpened { panel });
        }
    }

    fn close_panel(&mut self, panel: PanelId) {
        if self.panels.close(panel) {
            debug!(%panel, "panel closed");
            self.events.push(EditorEvent::PanelClosed { panel });
        }
    }

    fn main_terrain_size(&self) -> Vec3 {
        self.scenarios
            .main()
            .map(|s| s.terrain_size())
            .unwrap_or_else(|| self.config.default_terrain())
    }

    fn apply_default_terrain(&mut self) {
        self.resize_terrain(self.config.default_terrain());
        self.refresh_terrain_fields();
    }

    fn resize_terrain(&mut self, size: Vec3) {
        self.scenarios.update_terrain_size(size);
        self.events.push(EditorEvent::TerrainResized { size });
    }

    fn edit_terrain(&mut self, axis: TerrainAxis, text: &str) {
        let limits = self.config.terrain_limits();
        let (size, normalized) = terrain::apply_extent(self.main_terrain_size(), axis, text, &limits);
        match axis {
            TerrainAxis::Width => self.terrain_fields.width = normalized,
            TerrainAxis::Depth => self.terrain_fields.depth = normalized,
        }
        self.resize_terrain(size);
    }

    fn refresh_terrain_fields(&mut self) {
        let size = self.main_terrain_size();
        self.terrain_fields = TerrainFields {
            width: terrain::extent_text(size, TerrainAxis::Width),
            depth: terrain::extent_text(size, TerrainAxis::Depth),
        };
    }

    fn toggle_terrain_panel(&mut self) {
        self.context.terrain_size = !self.context.terrain_size;
        self.refresh_terrain_fields();
    }

    fn refresh_context_panels(&mut self) {
        let selected = self.collab.selection.selected();
        let editing = matches!(self.mode, ManipulatorMode::Edit | ManipulatorMode::Link);

        self.context.objects = self.mode == ManipulatorMode::Create;
        match (editing, selected) {
            (true, Some(ItemKind::Spawner)) => {
                self.context.edit_spawner = true;
                self.context.edit_obstacle = false;
            }
            (true, Some(ItemKind::Obstacle)) => {
                self.context.edit_spawner = false;
                self.context.edit_obstacle = true;
            }
            // Other selections keep whatever edit panel was showing
            (true, Some(_)) => {}
            _ => {
                self.context.edit_spawner = false;
                self.context.edit_obstacle = false;
            }
        }
        self.context.edit_object_hint = self.mode == ManipulatorMode::Edit && selected.is_none();
        self.context.edit_goal_hint = self.mode == ManipulatorMode::Link;
    }

    pub fn affordances(&self) -> Affordances {
        let models = self.collab.importer.loaded_model_count();
        Affordances {
            import_models: models == 0,
            clear_models: models > 0,
            create_alternative: !self.scenarios.is_full(),
            remove_alternative: self.scenarios.len() > 1,
            run_scene: !self.simulation_running,
            simulation_label: self.simulation_running,
        }
    }

    pub fn report(&self) -> EditorReport {
        EditorReport {
            mode: self.mode,
            open_panels: self.panels.open_panels(),
            zoomed_view: self.layout.zoomed(),
            loaded_models: self.collab.importer.loaded_model_count(),
            simulation_running: self.simulation_running,
            terrain_fields: self.terrain_fields.clone(),
            context_panels: self.context,
            affordances: self.affordances(),
            views: self.layout.slots().to_vec(),
            scenarios: self
                .scenarios
                .iter()
                .map(|s| ScenarioSummary {
                    id: s.id,
                    name: s.name.clone(),
                    origin: s.origin,
                    terrain_size: s.terrain_size(),
                })
                .collect(),
        }
    }

    /// Drain all pending editor events
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        self.events.drain()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn panels(&self) -> &PanelState {
        &self.panels
    }

    pub fn layout(&self) -> &ViewportLayout {
        &self.layout
    }

    pub fn scenarios(&self) -> &ScenarioRegistry {
        &self.scenarios
    }

    pub fn mode(&self) -> ManipulatorMode {
        self.mode
    }

    pub fn context_panels(&self) -> ContextPanels {
        self.context
    }

    pub fn terrain_fields(&self) -> &TerrainFields {
        &self.terrain_fields
    }

    pub fn is_simulation_running(&self) -> bool {
        self.simulation_running
    }
}
