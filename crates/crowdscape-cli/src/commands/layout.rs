//! Layout command

use anyhow::{Context, Result};
use crowdscape_core::ScenarioId;
use crowdscape_editor::{ViewSlot, ViewportLayout};
use serde::Serialize;

#[derive(Serialize)]
struct LayoutOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    zoomed: Option<usize>,
    views: Vec<ViewSlot>,
}

pub fn run(views: usize, zoom: Option<usize>, format: &str) -> Result<()> {
    let layout = build(views, zoom)?;

    let output = LayoutOutput {
        zoomed: layout.zoomed(),
        views: layout.slots().to_vec(),
    };

    if format == "text" {
        for (i, slot) in output.views.iter().enumerate() {
            let state = if slot.enabled { "" } else { " [disabled]" };
            println!("view {}: {}{}", i, slot.rect, state);
        }
    } else {
        println!("{}", super::format_structured(&output, format)?);
    }

    Ok(())
}

fn build(views: usize, zoom: Option<usize>) -> Result<ViewportLayout> {
    let mut layout = ViewportLayout::new();
    for _ in 0..views {
        layout
            .add_slot(ScenarioId::new())
            .context("Too many views")?;
    }
    layout.set_slot_count(views).context("Invalid view count")?;

    if let Some(index) = zoom {
        layout.zoom(index).context("Invalid zoom target")?;
    }
    Ok(layout)
}
