//! Crowdscape Core - Foundational types for the Crowdscape level editor
//!
//! This crate provides the types that the editor crates share:
//! - `ScenarioId` - Stable handles for simulation scenarios
//! - `Vec3` - Terrain extents and world offsets
//! - `ViewRect` - Normalized screen rectangles for camera views
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{CrowdscapeError, Result};
pub use id::ScenarioId;
pub use types::{Vec3, ViewRect};
