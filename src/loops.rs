//! Phase 4: Loop Placement Engine.
//!
//! Resolves each loop to one elevation band and one side of its panel,
//! stacks loops sharing a `(band, side)` bucket without overlap, and emits
//! the ladder geometry: a spine down from the panel edge, a far-edge rail,
//! one horizontal segment per wire, and device markers spaced by the wire
//! distributor. Loops that cannot fit their zone are skipped with a
//! diagnostic, never clamped into overlapping geometry.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::bands::ElevationMap;
use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::model::{Loop, Topology, Visibility};
use crate::types::{
    Diagnostic, ElementKind, LevelBand, LoopFigure, PanelBox, Point, Rect, Segment, Side,
    SkipReason,
};
use crate::wires::{device_offsets, distribute_devices};

/// Place every loop in the topology against the already-placed panel boxes.
///
/// Returns a hard error only when a loop names a panel id that does not
/// exist in the topology at all; a panel that exists but was skipped by
/// panel placement produces a `panel-not-placed` diagnostic instead.
pub fn place_loops(
    topology: &Topology,
    bands: &[LevelBand],
    map: &ElevationMap,
    panel_boxes: &[PanelBox],
    cfg: &LayoutConfig,
) -> Result<(Vec<LoopFigure>, Vec<Diagnostic>), LayoutError> {
    let box_by_id: HashMap<&str, &PanelBox> =
        panel_boxes.iter().map(|b| (b.panel_id.as_str(), b)).collect();

    let mut diagnostics = Vec::new();

    // Bucket loops by (panel, rounded majority elevation, side). BTreeMap
    // keeps the output order independent of hash iteration.
    let mut buckets: BTreeMap<(String, i64, u8), Vec<BucketEntry<'_>>> = BTreeMap::new();

    for panel in &topology.panels {
        for lp in &panel.loops {
            if topology.panel(&lp.panel_id).is_none() {
                return Err(LayoutError::UnknownPanel {
                    loop_id: lp.id.clone(),
                    panel_id: lp.panel_id.clone(),
                });
            }

            let Some(majority) = majority_elevation(lp, topology, cfg) else {
                debug!("skipping loop {}: no majority elevation", lp.id);
                diagnostics.push(Diagnostic {
                    element: ElementKind::Loop,
                    id: lp.id.clone(),
                    reason: SkipReason::NoMajorityElevation,
                });
                continue;
            };

            let side = if lp.flipped { Side::Right } else { Side::Left };
            let key = (lp.panel_id.clone(), round_millis(majority), side as u8);
            buckets.entry(key).or_default().push(BucketEntry {
                lp,
                majority,
                side,
            });
        }
    }

    let mut figures = Vec::new();

    for entries in buckets.values_mut() {
        // Explicit deterministic rank: override first, then stable loop id.
        entries.sort_by(|a, b| {
            let ka = (a.lp.rank_override.unwrap_or(u32::MAX), a.lp.id.as_str());
            let kb = (b.lp.rank_override.unwrap_or(u32::MAX), b.lp.id.as_str());
            ka.cmp(&kb)
        });

        let bucket_len = entries.len();
        for (rank, entry) in entries.iter().enumerate() {
            match place_loop(entry, rank, bucket_len, bands, map, &box_by_id, cfg) {
                Ok(figure) => figures.push(figure),
                Err(reason) => {
                    debug!("skipping loop {}: {:?}", entry.lp.id, reason);
                    diagnostics.push(Diagnostic {
                        element: ElementKind::Loop,
                        id: entry.lp.id.clone(),
                        reason,
                    });
                }
            }
        }
    }

    Ok((figures, diagnostics))
}

struct BucketEntry<'a> {
    lp: &'a Loop,
    majority: f64,
    side: Side,
}

fn place_loop(
    entry: &BucketEntry<'_>,
    rank: usize,
    bucket_len: usize,
    bands: &[LevelBand],
    map: &ElevationMap,
    box_by_id: &HashMap<&str, &PanelBox>,
    cfg: &LayoutConfig,
) -> Result<LoopFigure, SkipReason> {
    let lp = entry.lp;
    let pbox = box_by_id
        .get(lp.panel_id.as_str())
        .ok_or(SkipReason::PanelNotPlaced)?;

    let wire_count = cfg.clamp_wire_count(lp.wire_count);
    let loop_height = cfg.wire_spacing * (wire_count - 1) as f64;

    // Clip the band line against the panel top so ladders never run into
    // the box.
    let level_y = map.y(entry.majority);
    let effective_level_y =
        level_y.min(pbox.rect.y - cfg.loop_min_height - cfg.loop_zone_padding);

    // Zone top: nearest level line strictly above the majority band.
    let zone_top_y = bands
        .iter()
        .filter(|b| b.elevation > entry.majority + cfg.floor_epsilon)
        .min_by(|a, b| a.elevation.total_cmp(&b.elevation))
        .map(|b| b.y)
        .unwrap_or(cfg.margin_top);

    let zone_avail = effective_level_y - zone_top_y;
    if zone_avail < loop_height + cfg.loop_zone_padding {
        return Err(SkipReason::InsufficientZoneSpace);
    }

    // Even vertical distribution of the bucket with slack top and bottom.
    // Consecutive ranks sit one pitch apart, so a ladder taller than the
    // pitch would overlap its neighbor below (and, at rank 0, run past the
    // clipped band line). Skip it rather than draw invalid geometry.
    let pitch = zone_avail / (bucket_len as f64 + 1.0);
    if pitch < loop_height {
        return Err(SkipReason::InsufficientZoneSpace);
    }
    let top_y = effective_level_y - pitch * (rank as f64 + 1.0);
    let bot_y = top_y + loop_height;

    let (near_x, dir) = match entry.side {
        Side::Left => (pbox.rect.x, -1.0),
        Side::Right => (pbox.rect.x + pbox.rect.w, 1.0),
    };
    let far_x = near_x + dir * cfg.loop_span;

    let spine = Segment::new(Point::new(near_x, pbox.rect.y), Point::new(near_x, top_y));
    let far_edge = Segment::new(Point::new(far_x, top_y), Point::new(far_x, bot_y));

    let mut wire_segments = Vec::with_capacity(wire_count as usize);
    let mut device_markers = Vec::new();

    let per_wire = distribute_devices(lp.devices.len(), wire_count as usize);
    for (wire, &count) in per_wire.iter().enumerate() {
        let y = top_y + wire as f64 * cfg.wire_spacing;
        wire_segments.push(Segment::new(Point::new(near_x, y), Point::new(far_x, y)));

        for offset in device_offsets(cfg.loop_span, count) {
            device_markers.push(Point::new(near_x + dir * offset, y));
        }
    }

    Ok(LoopFigure {
        key: format!("{}::{}", lp.panel_id, lp.id),
        panel_id: lp.panel_id.clone(),
        loop_id: lp.id.clone(),
        side: entry.side,
        spine,
        far_edge,
        wire_segments,
        device_markers,
        hit_rect: Rect::new(near_x.min(far_x), top_y, cfg.loop_span, loop_height),
    })
}

/// Majority elevation of a loop: the level whose band holds the most of the
/// loop's devices. Ties break toward the earlier level in the snapshot's
/// level list. Devices below every level line do not vote.
fn majority_elevation(lp: &Loop, topology: &Topology, cfg: &LayoutConfig) -> Option<f64> {
    let active: Vec<(usize, f64)> = topology
        .levels
        .iter()
        .enumerate()
        .filter(|(_, l)| l.visibility != Visibility::Deleted)
        .map(|(i, l)| (i, l.elevation))
        .collect();

    let mut counts: HashMap<usize, usize> = HashMap::new();
    for device in &lp.devices {
        // Device band: highest level at or below the device.
        let floor = active
            .iter()
            .filter(|(_, e)| *e <= device.elevation + cfg.floor_epsilon)
            .max_by(|a, b| a.1.total_cmp(&b.1));
        if let Some(&(idx, _)) = floor {
            *counts.entry(idx).or_default() += 1;
        }
    }

    // First occurrence in level-list order wins ties.
    let mut best: Option<(usize, f64)> = None;
    for &(idx, elevation) in &active {
        let count = counts.get(&idx).copied().unwrap_or(0);
        if count == 0 {
            continue;
        }
        match best {
            Some((best_count, _)) if count <= best_count => {}
            _ => best = Some((count, elevation)),
        }
    }

    best.map(|(_, elevation)| elevation)
}

/// Bucket key precision: elevations equal to three decimals share a band.
fn round_millis(elevation: f64) -> i64 {
    (elevation * 1000.0).round() as i64
}
