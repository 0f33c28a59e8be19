//! Multi-viewport camera tiling.
//!
//! Up to four scenario cameras share the screen. Rectangles come from a fixed
//! table keyed by the number of views; a single view can be zoomed to fill
//! the screen, which disables the others until the layout is reapplied.
//!
//! Adding or removing a slot does not recompute rectangles. Callers follow a
//! mutation with [`ViewportLayout::set_slot_count`] or
//! [`ViewportLayout::relayout`].

use crowdscape_core::{CrowdscapeError, Result, ScenarioId, ViewRect};
use serde::Serialize;
use tracing::debug;

/// Maximum number of simultaneous views
pub const MAX_VIEWS: usize = 4;

const ONE: [ViewRect; 1] = [ViewRect::FULL];

const TWO: [ViewRect; 2] = [
    ViewRect::new(0.0, 0.0, 0.5, 1.0),
    ViewRect::new(0.5, 0.0, 0.5, 1.0),
];

// Two views on top, the third spans the bottom half.
const THREE: [ViewRect; 3] = [
    ViewRect::new(0.0, 0.5, 0.5, 0.5),
    ViewRect::new(0.5, 0.5, 0.5, 0.5),
    ViewRect::new(0.0, 0.0, 1.0, 0.5),
];

const FOUR: [ViewRect; 4] = [
    ViewRect::new(0.0, 0.5, 0.5, 0.5),
    ViewRect::new(0.5, 0.5, 0.5, 0.5),
    ViewRect::new(0.0, 0.0, 0.5, 0.5),
    ViewRect::new(0.5, 0.0, 0.5, 0.5),
];

/// The fixed tiling for `count` views.
pub fn tiling(count: usize) -> Result<&'static [ViewRect]> {
    match count {
        1 => Ok(&ONE),
        2 => Ok(&TWO),
        3 => Ok(&THREE),
        4 => Ok(&FOUR),
        _ => Err(CrowdscapeError::InvalidArgument(format!(
            "view count must be between 1 and {}, got {}",
            MAX_VIEWS, count
        ))),
    }
}

/// One camera view on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewSlot {
    /// Scenario whose camera renders into this slot
    pub view: ScenarioId,
    pub rect: ViewRect,
    pub enabled: bool,
}

/// Ordered view slots plus an optional zoom target
#[derive(Debug, Clone, Default)]
pub struct ViewportLayout {
    slots: Vec<ViewSlot>,
    zoomed: Option<usize>,
}

impl ViewportLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a view. Rectangles are left untouched until the next relayout.
    /// While a view is zoomed the new slot starts disabled.
    pub fn add_slot(&mut self, view: ScenarioId) -> Result<()> {
        if self.slots.len() >= MAX_VIEWS {
            return Err(CrowdscapeError::LimitReached {
                what: "views".into(),
                max: MAX_VIEWS,
            });
        }
        let enabled = !self.is_zoomed();
        self.slots.push(ViewSlot {
            view,
            rect: ViewRect::FULL,
            enabled,
        });
        Ok(())
    }

    /// Remove the last view, if any.
    pub fn remove_slot(&mut self) -> Option<ViewSlot> {
        let removed = self.slots.pop()?;
        if self.zoomed.is_some_and(|z| z >= self.slots.len()) {
            self.zoomed = None;
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.zoomed = None;
    }

    /// Apply the fixed tiling for `count` views and re-enable every slot.
    ///
    /// `count` must be in `1..=4` and match the number of slots.
    pub fn set_slot_count(&mut self, count: usize) -> Result<()> {
        let rects = tiling(count)?;
        if count != self.slots.len() {
            return Err(CrowdscapeError::InvalidArgument(format!(
                "layout for {} views requested but {} are present",
                count,
                self.slots.len()
            )));
        }

        self.zoomed = None;
        for (slot, rect) in self.slots.iter_mut().zip(rects) {
            slot.enabled = true;
            slot.rect = *rect;
        }
        debug!(count, "applied viewport tiling");
        Ok(())
    }

    /// Reapply the tiling for the current number of slots.
    pub fn relayout(&mut self) -> Result<()> {
        self.set_slot_count(self.slots.len())
    }

    /// Make one view fill the screen and disable all others.
    ///
    /// Zooming a different view replaces the target; the previous target
    /// is disabled rather than restored.
    pub fn zoom(&mut self, index: usize) -> Result<()> {
        if index >= self.slots.len() {
            return Err(CrowdscapeError::InvalidArgument(format!(
                "cannot zoom view {}: only {} views",
                index,
                self.slots.len()
            )));
        }

        for (i, slot) in self.slots.iter_mut().enumerate() {
            if i == index {
                slot.rect = ViewRect::FULL;
                slot.enabled = true;
            } else {
                slot.enabled = false;
            }
        }
        self.zoomed = Some(index);
        debug!(index, "zoomed view");
        Ok(())
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed.is_some()
    }

    /// Index of the zoomed slot
    pub fn zoomed(&self) -> Option<usize> {
        self.zoomed
    }

    pub fn slots(&self) -> &[ViewSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot showing the given scenario
    pub fn slot_for(&self, view: ScenarioId) -> Option<&ViewSlot> {
        self.slots.iter().find(|s| s.view == view)
    }
}
