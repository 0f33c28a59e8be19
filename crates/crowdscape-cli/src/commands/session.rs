//! Session command: replay a scripted editing session
//!
//! A script is a TOML file with an optional `[session]` table describing the
//! in-memory collaborators and a list of `[[step]]` entries. Each step is
//! either an editor command (`command = "..."`) or a hook (`hook = "..."`)
//! standing in for something outside the editor: the simulator finishing,
//! the user selecting an object, or a key press.

use anyhow::{Context, Result};
use crowdscape_editor::collab::memory::{
    self, ExportRecord, PresetImporter, RecordingExporter, ScriptedLevelImporter, SharedSelection,
};
use crowdscape_editor::{
    EditorCommand, EditorConfig, EditorEvent, EditorInput, EditorReport, FrameContext, ItemKind,
    LevelEditorController, ObjectSelection,
};
use keys::parse_key_chord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub struct SessionArgs {
    pub script: String,
    pub config: Option<String>,
    pub strict: bool,
    pub format: String,
}

#[derive(Debug, Deserialize)]
struct SessionScript {
    #[serde(default)]
    session: SessionSetup,
    #[serde(default)]
    step: Vec<SessionStep>,
}

#[derive(Debug, Deserialize)]
struct SessionSetup {
    /// Preset names offered by the preset picker
    #[serde(default)]
    presets: Vec<String>,
    /// Whether the exporter accepts the level
    #[serde(default = "default_true")]
    accept_exports: bool,
    /// Reason the level importer gives when rejecting a level
    #[serde(default)]
    import_failure: Option<String>,
    /// Presets an imported level consists of
    #[serde(default)]
    import_presets: Vec<usize>,
}

impl Default for SessionSetup {
    fn default() -> Self {
        Self {
            presets: Vec::new(),
            accept_exports: true,
            import_failure: None,
            import_presets: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SessionStep {
    Command(EditorCommand),
    Hook(Hook),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "hook", rename_all = "snake_case")]
enum Hook {
    SimulationFinished,
    Select { item: ItemKind },
    Unselect,
    /// Key chord such as `"2"`, `"escape"` or `"alt+t"`
    Press {
        key: String,
        #[serde(default)]
        input_focused: bool,
    },
}

#[derive(Debug, Serialize)]
struct SessionOutput {
    report: EditorReport,
    exports: Vec<ExportRecord>,
    refused: Vec<String>,
    events: Vec<EditorEvent>,
}

pub fn run(args: SessionArgs) -> Result<()> {
    let content = fs::read_to_string(&args.script).context("Failed to read session script")?;
    let script: SessionScript =
        toml::from_str(&content).context("Failed to parse session script")?;

    let config = match &args.config {
        Some(path) => EditorConfig::load_from_file(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path))?,
        None => EditorConfig::load().context("Failed to load editor config")?,
    };

    let output = replay(script, config, args.strict)?;

    if args.format == "text" {
        print_text(&output);
    } else {
        println!("{}", super::format_structured(&output, &args.format)?);
    }

    Ok(())
}

fn replay(script: SessionScript, config: EditorConfig, strict: bool) -> Result<SessionOutput> {
    let setup = script.session;
    let exporter = RecordingExporter::new(setup.accept_exports);
    let selection = SharedSelection::new();
    let initial_terrain = config.default_terrain();
    let collab = memory::collaborators(
        PresetImporter::new(setup.presets),
        exporter.clone(),
        ScriptedLevelImporter {
            failure: setup.import_failure,
            presets: setup.import_presets,
        },
        selection.clone(),
        initial_terrain,
    );

    let mut editor =
        LevelEditorController::new(config, collab).context("Failed to start the editor")?;
    let mut events = editor.drain_events();
    let mut refused = Vec::new();

    for (n, step) in script.step.into_iter().enumerate() {
        let result = match step {
            SessionStep::Command(command) => editor.dispatch(command).map_err(anyhow::Error::from),
            SessionStep::Hook(hook) => apply_hook(&mut editor, &selection, hook),
        };

        if let Err(e) = result {
            let message = format!("step {}: {}", n + 1, e);
            if strict {
                anyhow::bail!("Session aborted at {}", message);
            }
            warn!("{}", message);
            refused.push(message);
        }
        events.extend(editor.drain_events());
    }

    info!(steps = events.len(), "session replayed");
    Ok(SessionOutput {
        report: editor.report(),
        exports: exporter.records(),
        refused,
        events,
    })
}

fn apply_hook(
    editor: &mut LevelEditorController,
    selection: &SharedSelection,
    hook: Hook,
) -> Result<()> {
    match hook {
        Hook::SimulationFinished => editor.simulation_finished(),
        Hook::Select { item } => selection.select(item),
        Hook::Unselect => {
            let mut handle = selection.clone();
            handle.unselect();
        }
        Hook::Press { key, input_focused } => {
            let mut input = EditorInput::new();
            for code in parse_key_chord(&key)? {
                input.process_key_down(code);
            }
            editor.update(
                &input,
                FrameContext {
                    input_field_focused: input_focused,
                },
            );
        }
    }
    Ok(())
}

fn print_text(output: &SessionOutput) {
    let report = &output.report;
    println!("Tool: {}", report.mode);

    if report.open_panels.is_empty() {
        println!("Open panels: (none)");
    } else {
        let names: Vec<&str> = report.open_panels.iter().map(|p| p.name()).collect();
        println!("Open panels: {}", names.join(", "));
    }

    println!(
        "Terrain fields: width {}, height {}",
        report.terrain_fields.width, report.terrain_fields.depth
    );
    println!("Loaded models: {}", report.loaded_models);

    println!("Scenarios:");
    for (scenario, view) in report.scenarios.iter().zip(&report.views) {
        let state = if view.enabled { "" } else { " [disabled]" };
        println!(
            "  {} (id {}) view {}{}",
            scenario.name, scenario.id, view.rect, state
        );
    }
    if let Some(index) = report.zoomed_view {
        println!("Zoomed view: {}", index);
    }

    if !output.exports.is_empty() {
        println!("Exports:");
        for export in &output.exports {
            println!(
                "  {:?}: {} scenarios, {} models",
                export.kind, export.scenarios, export.models
            );
        }
    }

    for message in &output.refused {
        println!("Refused {}", message);
    }

    if !output.events.is_empty() {
        println!("Events:");
        for line in event_lines(&output.events) {
            println!("  {}", line);
        }
    }
}

fn event_lines(events: &[EditorEvent]) -> Vec<String> {
    events
        .iter()
        .map(|event| match event {
            EditorEvent::PanelOpened { panel } => format!("panel opened: {}", panel),
            EditorEvent::PanelClosed { panel } => format!("panel closed: {}", panel),
            EditorEvent::ScenarioCreated { id } => format!("scenario created: {}", id),
            EditorEvent::ScenarioRemoved { id } => format!("scenario removed: {}", id),
            EditorEvent::ToolSelected { mode } => format!("tool selected: {}", mode),
            EditorEvent::LevelExported { kind } => format!("level exported: {:?}", kind),
            EditorEvent::ExportRejected { kind } => format!("export rejected: {:?}", kind),
            EditorEvent::ImportFailed => "import failed".to_string(),
            EditorEvent::TerrainResized { size } => {
                format!("terrain resized: {} x {}", size.x, size.z)
            }
            EditorEvent::ViewZoomed { index } => format!("view zoomed: {}", index),
            EditorEvent::ViewsReset => "views reset".to_string(),
            EditorEvent::SimulationFinished => "simulation finished".to_string(),
        })
        .collect()
}

/// Key names accepted by `hook = "press"`
mod keys {
    use anyhow::Result;
    use crowdscape_editor::input::KeyCode;

    pub fn parse_key_chord(chord: &str) -> Result<Vec<KeyCode>> {
        chord
            .split('+')
            .map(|part| parse_key(part.trim()))
            .collect()
    }

    fn parse_key(name: &str) -> Result<KeyCode> {
        let code = match name.to_ascii_lowercase().as_str() {
            "1" => KeyCode::Digit1,
            "2" => KeyCode::Digit2,
            "3" => KeyCode::Digit3,
            "4" => KeyCode::Digit4,
            "escape" | "esc" => KeyCode::Escape,
            "alt" => KeyCode::AltLeft,
            "t" => KeyCode::KeyT,
            _ => anyhow::bail!("Unknown key: {}", name),
        };
        Ok(code)
    }
}
