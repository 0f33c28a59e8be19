//! CLI command implementations

pub mod config;
pub mod layout;
pub mod session;

use anyhow::Result;
use serde::Serialize;

/// Serialize a command result as JSON or TOML
pub fn format_structured<T: Serialize>(value: &T, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(value)?),
        "toml" => Ok(toml::to_string_pretty(value)?),
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}
