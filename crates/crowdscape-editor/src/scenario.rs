//! Scenario registry.
//!
//! A scenario is one alternative version of the level: its own simulation
//! world, shown through its own camera view. The registry owns them in
//! display order and hands out [`ScenarioId`] handles; a removed scenario's
//! handle stops resolving.

use crate::collab::SimulationWorld;
use crowdscape_core::{CrowdscapeError, Result, ScenarioId, Vec3};
use tracing::{debug, info};

/// One alternative of the level
pub struct Scenario {
    pub id: ScenarioId,
    pub name: String,
    /// World-space origin; alternatives are laid out side by side along X
    pub origin: Vec3,
    pub world: Box<dyn SimulationWorld>,
}

impl Scenario {
    pub fn terrain_size(&self) -> Vec3 {
        self.world.terrain_size()
    }
}

/// Owns every scenario, in display order
pub struct ScenarioRegistry {
    scenarios: Vec<Scenario>,
    max: usize,
    spacing: f32,
}

impl ScenarioRegistry {
    pub fn new(max: usize, spacing: f32) -> Self {
        Self {
            scenarios: Vec::with_capacity(max),
            max,
            spacing,
        }
    }

    /// Add a scenario around `world`. Refused once the registry is full.
    pub fn create(&mut self, world: Box<dyn SimulationWorld>) -> Result<ScenarioId> {
        if self.scenarios.len() >= self.max {
            return Err(CrowdscapeError::LimitReached {
                what: "scenarios".into(),
                max: self.max,
            });
        }

        let index = self.scenarios.len();
        let id = ScenarioId::new();
        let scenario = Scenario {
            id,
            name: format!("SimulationScenario{}", index + 1),
            origin: Vec3::new(self.spacing, 0.0, 0.0) * index as f32,
            world,
        };
        info!(scenario = %scenario.name, id = %id, "created scenario");
        self.scenarios.push(scenario);
        Ok(id)
    }

    /// Remove the most recently added scenario.
    pub fn remove_last(&mut self) -> Option<Scenario> {
        let removed = self.scenarios.pop()?;
        info!(scenario = %removed.name, id = %removed.id, "removed scenario");
        Some(removed)
    }

    pub fn clear(&mut self) {
        debug!(count = self.scenarios.len(), "clearing scenarios");
        self.scenarios.clear();
    }

    pub fn get(&self, id: ScenarioId) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// The first scenario; alternatives are copies of it.
    pub fn main(&self) -> Option<&Scenario> {
        self.scenarios.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn ids(&self) -> Vec<ScenarioId> {
        self.scenarios.iter().map(|s| s.id).collect()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.scenarios.len() >= self.max
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Resize the terrain of every scenario's world.
    pub fn update_terrain_size(&mut self, size: Vec3) {
        for scenario in &mut self.scenarios {
            scenario.world.update_terrain_size(size);
        }
        debug!(x = size.x, y = size.y, z = size.z, "terrain resized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::memory::MemoryWorld;

    fn world() -> Box<dyn SimulationWorld> {
        Box::new(MemoryWorld::new(Vec3::new(30.0, 600.0, 30.0)))
    }

    #[test]
    fn names_and_origins_follow_position() {
        let mut registry = ScenarioRegistry::new(4, 1000.0);
        registry.create(world()).unwrap();
        let second = registry.create(world()).unwrap();

        let scenario = registry.get(second).unwrap();
        assert_eq!(scenario.name, "SimulationScenario2");
        assert_eq!(scenario.origin, Vec3::new(1000.0, 0.0, 0.0));
        assert_eq!(registry.main().unwrap().name, "SimulationScenario1");
    }

    #[test]
    fn refuses_beyond_max() {
        let mut registry = ScenarioRegistry::new(4, 1000.0);
        for _ in 0..4 {
            registry.create(world()).unwrap();
        }
        let ids = registry.ids();

        let err = registry.create(world()).unwrap_err();
        assert!(matches!(err, CrowdscapeError::LimitReached { max: 4, .. }));
        assert_eq!(registry.ids(), ids);
        assert!(registry.is_full());
    }

    #[test]
    fn removed_handles_stop_resolving() {
        let mut registry = ScenarioRegistry::new(4, 1000.0);
        let first = registry.create(world()).unwrap();
        let second = registry.create(world()).unwrap();

        let removed = registry.remove_last().unwrap();
        assert_eq!(removed.id, second);
        assert!(registry.get(second).is_none());
        assert!(registry.get(first).is_some());

        // A new scenario never reuses the old handle
        let third = registry.create(world()).unwrap();
        assert_ne!(third, second);
        assert_eq!(registry.get(third).unwrap().name, "SimulationScenario2");
    }

    #[test]
    fn terrain_resize_reaches_every_world() {
        let mut registry = ScenarioRegistry::new(4, 1000.0);
        registry.create(world()).unwrap();
        registry.create(world()).unwrap();

        registry.update_terrain_size(Vec3::new(75.0, 600.0, 40.0));
        for scenario in registry.iter() {
            assert_eq!(scenario.terrain_size(), Vec3::new(75.0, 600.0, 40.0));
        }
    }

    #[test]
    fn clear_empties_registry() {
        let mut registry = ScenarioRegistry::new(4, 1000.0);
        registry.create(world()).unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.main().is_none());
        assert!(registry.remove_last().is_none());
    }
}
