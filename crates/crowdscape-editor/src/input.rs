//! Editor hotkey state

use std::collections::{HashMap, HashSet};
pub use winit::keyboard::KeyCode;

/// Actions that select the editing tools, in toggle order
pub const TOOL_ACTIONS: [&str; 4] = ["tool_1", "tool_2", "tool_3", "tool_4"];
/// Close dismissable popups
pub const CANCEL: &str = "cancel";
/// Show or hide the terrain size panel
pub const TERRAIN_PANEL: &str = "terrain_panel";

/// A key, optionally combined with a modifier that must be held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifier: Option<KeyCode>,
}

impl KeyBinding {
    pub fn key(key: KeyCode) -> Self {
        Self {
            key,
            modifier: None,
        }
    }

    pub fn with_modifier(modifier: KeyCode, key: KeyCode) -> Self {
        Self {
            key,
            modifier: Some(modifier),
        }
    }
}

/// Tracks keyboard state per frame
pub struct EditorInput {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,

    /// Action map: action name -> bindings
    action_map: HashMap<String, Vec<KeyBinding>>,
}

impl Default for EditorInput {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorInput {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            action_map: Self::default_action_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<KeyBinding>> {
        let mut map = HashMap::new();
        let digits = [
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
        ];
        for (action, key) in TOOL_ACTIONS.iter().zip(digits) {
            map.insert(action.to_string(), vec![KeyBinding::key(key)]);
        }
        map.insert(CANCEL.into(), vec![KeyBinding::key(KeyCode::Escape)]);
        map.insert(
            TERRAIN_PANEL.into(),
            vec![KeyBinding::with_modifier(KeyCode::AltLeft, KeyCode::KeyT)],
        );
        map
    }

    /// Bind an action to one or more key combinations
    pub fn bind_action(&mut self, action: impl Into<String>, bindings: Vec<KeyBinding>) {
        self.action_map.insert(action.into(), bindings);
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    fn binding_triggered(&self, binding: &KeyBinding) -> bool {
        self.keys_just_pressed.contains(&binding.key)
            && binding.modifier.map_or(true, |m| self.keys_down.contains(&m))
    }

    /// Was an action triggered this frame?
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|bindings| bindings.iter().any(|b| self.binding_triggered(b)))
            .unwrap_or(false)
    }

    /// Index of the first tool hotkey pressed this frame
    pub fn tool_just_pressed(&self) -> Option<usize> {
        TOOL_ACTIONS
            .iter()
            .position(|action| self.is_action_just_pressed(action))
    }
}
