//! UI commands.
//!
//! Every button, toggle and field in the editor maps to one
//! [`EditorCommand`] value, handled by
//! [`LevelEditorController::dispatch`](crate::LevelEditorController::dispatch).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The editing tool bound to the action toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManipulatorMode {
    /// Place new spawners, obstacles and goals
    #[default]
    Create,
    /// Move and edit the selected object
    Edit,
    /// Link spawners to goals
    Link,
    /// Delete objects
    Remove,
}

impl ManipulatorMode {
    pub const ALL: [ManipulatorMode; 4] = [
        ManipulatorMode::Create,
        ManipulatorMode::Edit,
        ManipulatorMode::Link,
        ManipulatorMode::Remove,
    ];

    /// Tool for the action toggle at `index`
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for ManipulatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ManipulatorMode::Create => "create",
            ManipulatorMode::Edit => "edit",
            ManipulatorMode::Link => "link",
            ManipulatorMode::Remove => "remove",
        };
        f.write_str(name)
    }
}

/// One UI action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Open the preset picker
    ImportModels,
    ClearModels,
    /// Load the chosen preset; `None` when no preset toggle is on
    ConfirmPreset {
        #[serde(default)]
        index: Option<usize>,
    },
    CancelPreset,

    /// Ask for confirmation before loading a level
    LoadScene,
    SaveScene,
    RunScene,
    CreateAlternative,
    RemoveAlternative,

    /// "Save first" in the load confirmation
    ConfirmLoadSave,
    ConfirmLoadAnyway,
    CancelLoad,

    /// Ask for confirmation before clearing the level
    ClearScene,
    ConfirmClear,
    CancelClear,

    DismissSaveFailed,
    DismissLoadFailed,
    DismissSimulationRunning,

    ZoomView {
        index: usize,
    },
    ResetViews,
    SelectTool {
        mode: ManipulatorMode,
    },

    SetTerrainWidth {
        text: String,
    },
    SetTerrainDepth {
        text: String,
    },
    ToggleTerrainPanel,

    /// Escape: close every dismissable popup
    CancelAll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Script {
        step: Vec<EditorCommand>,
    }

    #[test]
    fn commands_deserialize_from_toml() {
        let script: Script = toml::from_str(
            r#"
[[step]]
command = "create_alternative"

[[step]]
command = "zoom_view"
index = 1

[[step]]
command = "set_terrain_width"
text = "abc"

[[step]]
command = "select_tool"
mode = "link"

[[step]]
command = "confirm_preset"
"#,
        )
        .unwrap();

        assert_eq!(
            script.step,
            vec![
                EditorCommand::CreateAlternative,
                EditorCommand::ZoomView { index: 1 },
                EditorCommand::SetTerrainWidth { text: "abc".into() },
                EditorCommand::SelectTool {
                    mode: ManipulatorMode::Link
                },
                EditorCommand::ConfirmPreset { index: None },
            ]
        );
    }

    #[test]
    fn tool_indices() {
        assert_eq!(ManipulatorMode::from_index(0), Some(ManipulatorMode::Create));
        assert_eq!(ManipulatorMode::from_index(3), Some(ManipulatorMode::Remove));
        assert_eq!(ManipulatorMode::from_index(4), None);
    }
}
