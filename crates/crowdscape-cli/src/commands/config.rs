//! Config command

use anyhow::{Context, Result};
use crowdscape_editor::EditorConfig;
use std::path::Path;

pub fn run(file: Option<&str>) -> Result<()> {
    let config = resolve(file)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn resolve(file: Option<&str>) -> Result<EditorConfig> {
    match file {
        Some(path) => EditorConfig::load_from_file(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path)),
        None => EditorConfig::load().context("Failed to load editor config"),
    }
}
