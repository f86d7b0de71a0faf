//! Deterministic riser-schematic layout for addressable-device networks.
//!
//! Converts a topology snapshot — control panels, wiring loops, devices,
//! and building levels — into a positioned 2-D [`Scene`] suitable for:
//!
//! 1. **Diagram rendering** — level bands, panel boxes, loop ladders, and
//!    device markers, plus hit-test rectangles keyed `"panelId::loopId"`
//! 2. **Cable estimation** — Manhattan-routed wire length per loop
//!
//! # Pipeline
//!
//! ```text
//! Topology
//!   → Level bands     (elevation → normalized Y, deleted levels excluded)
//!   → Panel boxes     (fixed-size boxes above their floor lines)
//!   → Loop ladders    (majority band + side bucketing, stacked placement)
//!   → Scene           (JSON-serializable output + skip diagnostics)
//! ```
//!
//! Every phase is a pure function over the immutable snapshot; nothing is
//! cached or mutated across calls, so concurrent callers can share one
//! snapshot freely. Missing or partial spatial data degrades into
//! [`types::Diagnostic`] entries; the only hard error is a loop naming a
//! panel that does not exist.

pub mod bands;
pub mod cable;
pub mod config;
pub mod error;
pub mod loops;
pub mod model;
pub mod panels;
pub mod types;
pub mod wires;

pub use cable::loop_cable_length;
pub use config::LayoutConfig;
pub use error::LayoutError;
pub use model::Topology;
pub use types::{CableResult, Scene};

use types::Bounds;

/// Current scene format version.
const SCENE_VERSION: u32 = 1;

/// Generate a complete riser scene from a topology snapshot.
///
/// This is the main entry point. It runs the band, panel, and loop phases
/// in order and returns a [`Scene`] that can be handed to a renderer or
/// serialized with [`to_json`].
pub fn generate_scene(topology: &Topology, cfg: &LayoutConfig) -> Result<Scene, LayoutError> {
    // Phase 1: map level elevations onto the vertical axis
    let (level_bands, elevation_map) = bands::map_level_bands(&topology.levels, cfg);

    // Phase 2: place panel boxes against their floor lines
    let (panel_boxes, mut diagnostics) = panels::place_panels(&topology.panels, &level_bands, cfg);

    // Phase 3: bucket and stack loops, clipping against the panel boxes
    let (loop_figures, loop_diags) =
        loops::place_loops(topology, &level_bands, &elevation_map, &panel_boxes, cfg)?;
    diagnostics.extend(loop_diags);

    Ok(Scene {
        version: SCENE_VERSION,
        bounds: Bounds {
            width: cfg.viewport_width,
            height: cfg.viewport_height,
        },
        bands: level_bands,
        panels: panel_boxes,
        loops: loop_figures,
        diagnostics,
    })
}

/// Serialize a scene to pretty-printed JSON.
pub fn to_json(scene: &Scene) -> String {
    serde_json::to_string_pretty(scene).expect("scene serialization should not fail")
}
