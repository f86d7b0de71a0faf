//! Phase 3: Panel Box Placement.
//!
//! Places each panel as a fixed-size box sitting just above its floor line,
//! horizontally centered in the viewport, and carves the box into a loop
//! output section (with a labeled header slot per configured loop) and a
//! fixed-width power section. Panels that cannot resolve a floor, or whose
//! band is too short, are skipped with a diagnostic — never squeezed in.

use log::debug;

use crate::config::LayoutConfig;
use crate::model::Panel;
use crate::types::{Diagnostic, ElementKind, HeaderSlot, LevelBand, PanelBox, Rect, SkipReason};

/// Place all panels against the level lines produced by the band mapper.
pub fn place_panels(
    panels: &[Panel],
    bands: &[LevelBand],
    cfg: &LayoutConfig,
) -> (Vec<PanelBox>, Vec<Diagnostic>) {
    let mut boxes = Vec::new();
    let mut diagnostics = Vec::new();

    for panel in panels {
        match place_panel(panel, bands, cfg) {
            Ok(b) => boxes.push(b),
            Err(reason) => {
                debug!("skipping panel {}: {:?}", panel.id, reason);
                diagnostics.push(Diagnostic {
                    element: ElementKind::Panel,
                    id: panel.id.clone(),
                    reason,
                });
            }
        }
    }

    (boxes, diagnostics)
}

fn place_panel(panel: &Panel, bands: &[LevelBand], cfg: &LayoutConfig) -> Result<PanelBox, SkipReason> {
    let elevation = panel.elevation.ok_or(SkipReason::NoFloorLevel)?;

    // Floor: highest level line at or below the panel elevation.
    let floor = bands
        .iter()
        .filter(|b| b.elevation <= elevation + cfg.floor_epsilon)
        .max_by(|a, b| a.elevation.total_cmp(&b.elevation))
        .ok_or(SkipReason::NoFloorLevel)?;

    // Ceiling: lowest level line strictly above the floor, else the top margin.
    let ceiling_y = bands
        .iter()
        .filter(|b| b.elevation > floor.elevation + cfg.floor_epsilon)
        .min_by(|a, b| a.elevation.total_cmp(&b.elevation))
        .map(|b| b.y)
        .unwrap_or(cfg.margin_top);

    // Y grows downward, so the band height is floor minus ceiling.
    let band_height = floor.y - ceiling_y;
    if band_height < cfg.panel_height + cfg.panel_min_clearance {
        return Err(SkipReason::InsufficientZoneSpace);
    }

    let x = (cfg.viewport_width - cfg.panel_width) / 2.0;
    let bottom = floor.y - cfg.panel_floor_offset;
    let rect = Rect::new(x, bottom - cfg.panel_height, cfg.panel_width, cfg.panel_height);

    let loop_width = cfg.panel_width - cfg.power_section_width;
    let loop_section = Rect::new(rect.x, rect.y, loop_width, rect.h);
    let power_section = Rect::new(rect.x + loop_width, rect.y, cfg.power_section_width, rect.h);

    Ok(PanelBox {
        panel_id: panel.id.clone(),
        name: panel.name.clone(),
        rect,
        loop_section,
        power_section,
        header_slots: header_slots(panel, loop_section, cfg),
    })
}

/// Split the loop-section header into equal labeled slots, one per
/// configured loop up to the slot cap. Slots past the actual loop list get
/// a positional label.
fn header_slots(panel: &Panel, loop_section: Rect, cfg: &LayoutConfig) -> Vec<HeaderSlot> {
    let count = panel.loop_capacity.min(cfg.max_loop_slots) as usize;
    if count == 0 {
        return Vec::new();
    }

    let slot_width = loop_section.w / count as f64;
    (0..count)
        .map(|i| {
            let label = panel
                .loops
                .get(i)
                .map(|l| l.id.clone())
                .unwrap_or_else(|| format!("L{}", i + 1));
            HeaderSlot {
                label,
                rect: Rect::new(
                    loop_section.x + slot_width * i as f64,
                    loop_section.y,
                    slot_width,
                    cfg.header_height,
                ),
            }
        })
        .collect()
}
