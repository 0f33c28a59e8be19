//! Layered editor configuration
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `CROWDSCAPE_MAX_SCENARIOS`,
//!    `CROWDSCAPE_ESCAPE_CLOSES_LOAD_PRESET`
//! 2. Project-local: `.crowdscape/editor.toml`
//! 3. Global: `~/.crowdscape/editor.toml`

use crate::layout::MAX_VIEWS;
use crate::terrain::ExtentLimits;
use crowdscape_core::{CrowdscapeError, Result, Vec3};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Editor settings. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// How many scenarios may exist side by side (1..=4)
    pub max_scenarios: usize,
    /// X distance between scenario origins
    pub scenario_spacing: f32,
    /// Terrain size applied on start and after clearing the level
    pub default_terrain_size: [f32; 3],
    pub terrain_min: i64,
    pub terrain_max: i64,
    /// Extent used when a terrain field holds no number
    pub terrain_fallback: i64,
    /// Whether escape also closes the preset picker
    pub escape_closes_load_preset: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_scenarios: MAX_VIEWS,
            scenario_spacing: 1000.0,
            default_terrain_size: [30.0, 600.0, 30.0],
            terrain_min: 10,
            terrain_max: 200,
            terrain_fallback: 10,
            escape_closes_load_preset: false,
        }
    }
}

/// Partial config as written in a file; unset fields do not override lower layers
#[derive(Debug, Clone, Default, Deserialize)]
struct EditorConfigFile {
    max_scenarios: Option<usize>,
    scenario_spacing: Option<f32>,
    default_terrain_size: Option<[f32; 3]>,
    terrain_min: Option<i64>,
    terrain_max: Option<i64>,
    terrain_fallback: Option<i64>,
    escape_closes_load_preset: Option<bool>,
}

impl EditorConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = EditorConfig::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.merge(Self::load_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(".crowdscape/editor.toml");
        if local_path.exists() {
            config.merge(Self::load_file(&local_path)?);
        }

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file path only (env overrides still apply)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = EditorConfig::default();
        config.merge(Self::load_file(path)?);
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the editor cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.max_scenarios == 0 || self.max_scenarios > MAX_VIEWS {
            return Err(CrowdscapeError::ConfigError(format!(
                "max_scenarios must be between 1 and {}, got {}",
                MAX_VIEWS, self.max_scenarios
            )));
        }
        if self.terrain_min > self.terrain_max {
            return Err(CrowdscapeError::ConfigError(format!(
                "terrain_min ({}) is greater than terrain_max ({})",
                self.terrain_min, self.terrain_max
            )));
        }
        if !(self.terrain_min..=self.terrain_max).contains(&self.terrain_fallback) {
            return Err(CrowdscapeError::ConfigError(format!(
                "terrain_fallback ({}) is outside {}..={}",
                self.terrain_fallback, self.terrain_min, self.terrain_max
            )));
        }
        Ok(())
    }

    pub fn terrain_limits(&self) -> ExtentLimits {
        ExtentLimits {
            min: self.terrain_min,
            max: self.terrain_max,
            fallback: self.terrain_fallback,
        }
    }

    pub fn default_terrain(&self) -> Vec3 {
        Vec3::from_array(self.default_terrain_size)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".crowdscape").join("editor.toml"))
    }

    fn load_file(path: &Path) -> Result<EditorConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let file: EditorConfigFile = toml::from_str(&content).map_err(|e| {
            CrowdscapeError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "loaded editor config");
        Ok(file)
    }

    fn merge(&mut self, overlay: EditorConfigFile) {
        if let Some(v) = overlay.max_scenarios {
            self.max_scenarios = v;
        }
        if let Some(v) = overlay.scenario_spacing {
            self.scenario_spacing = v;
        }
        if let Some(v) = overlay.default_terrain_size {
            self.default_terrain_size = v;
        }
        if let Some(v) = overlay.terrain_min {
            self.terrain_min = v;
        }
        if let Some(v) = overlay.terrain_max {
            self.terrain_max = v;
        }
        if let Some(v) = overlay.terrain_fallback {
            self.terrain_fallback = v;
        }
        if let Some(v) = overlay.escape_closes_load_preset {
            self.escape_closes_load_preset = v;
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("CROWDSCAPE_MAX_SCENARIOS") {
            self.max_scenarios = value.trim().parse().map_err(|_| {
                CrowdscapeError::ConfigError(format!(
                    "CROWDSCAPE_MAX_SCENARIOS is not a number: {}",
                    value
                ))
            })?;
        }
        if let Ok(value) = std::env::var("CROWDSCAPE_ESCAPE_CLOSES_LOAD_PRESET") {
            self.escape_closes_load_preset = matches!(value.trim(), "1" | "true" | "yes");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "crowdscape_config_test_{}",
            uuid::Uuid::new_v4()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("editor.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn cleanup(path: &Path) {
        std::fs::remove_file(path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_terrain(), Vec3::new(30.0, 600.0, 30.0));
        assert_eq!(config.terrain_limits(), ExtentLimits::default());
        assert!(!config.escape_closes_load_preset);
    }

    #[test]
    fn test_load_config_from_file() {
        let path = temp_config(
            r#"
scenario_spacing = 500.0
default_terrain_size = [50.0, 600.0, 80.0]
terrain_max = 150
"#,
        );
        let config = EditorConfig::load_from_file(&path).unwrap();

        assert_eq!(config.scenario_spacing, 500.0);
        assert_eq!(config.default_terrain(), Vec3::new(50.0, 600.0, 80.0));
        assert_eq!(config.terrain_limits().max, 150);
        // Untouched fields keep their defaults
        assert_eq!(config.terrain_min, 10);

        cleanup(&path);
    }

    #[test]
    fn test_rejects_too_many_scenarios() {
        let path = temp_config("max_scenarios = 6\n");
        let err = EditorConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, CrowdscapeError::ConfigError(_)));
        cleanup(&path);
    }

    #[test]
    fn test_rejects_inverted_terrain_range() {
        let config = EditorConfig {
            terrain_min: 300,
            ..EditorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_fallback_outside_terrain_range() {
        let path = temp_config("terrain_fallback = 0\n");
        let err = EditorConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, CrowdscapeError::ConfigError(_)));
        cleanup(&path);

        let config = EditorConfig {
            terrain_fallback: 250,
            ..EditorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_file() {
        let path = temp_config("max_scenarios = \"four\"\n");
        assert!(EditorConfig::load_from_file(&path).is_err());
        cleanup(&path);
    }

    #[test]
    fn test_serializes_back_to_toml() {
        let text = toml::to_string_pretty(&EditorConfig::default()).unwrap();
        let parsed: EditorConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, EditorConfig::default());
    }
}
