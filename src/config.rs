//! Layout configuration.
//!
//! Every constant the engine uses lives here as an explicit value object so
//! tests can pin a viewport and callers can scale the drawing without
//! recompiling. `LayoutConfig::default()` carries the stock drawing-unit
//! constants.

use serde::{Deserialize, Serialize};

/// All layout constants, in drawing units unless noted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Viewport width.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,
    /// Viewport height. Must be ≥ 1 for finite band mapping.
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    /// Top margin above the highest level line.
    #[serde(default = "default_margin_top")]
    pub margin_top: f64,
    /// Bottom margin below the lowest level line.
    #[serde(default = "default_margin_bottom")]
    pub margin_bottom: f64,
    /// Panel box width.
    #[serde(default = "default_panel_width")]
    pub panel_width: f64,
    /// Panel box height.
    #[serde(default = "default_panel_height")]
    pub panel_height: f64,
    /// Gap between the panel bottom edge and its floor line.
    #[serde(default = "default_panel_floor_offset")]
    pub panel_floor_offset: f64,
    /// Minimum floor-to-ceiling clearance required to draw a panel.
    #[serde(default = "default_panel_min_clearance")]
    pub panel_min_clearance: f64,
    /// Width of the fixed right-hand power section inside the panel box.
    #[serde(default = "default_power_section_width")]
    pub power_section_width: f64,
    /// Height of the loop-label header strip inside the loop section.
    #[serde(default = "default_header_height")]
    pub header_height: f64,
    /// Maximum labeled loop slots in the header.
    #[serde(default = "default_max_loop_slots")]
    pub max_loop_slots: u32,
    /// Vertical spacing between parallel wire lines of one loop.
    #[serde(default = "default_wire_spacing")]
    pub wire_spacing: f64,
    /// Horizontal span of a loop ladder, panel edge to far edge.
    #[serde(default = "default_loop_span")]
    pub loop_span: f64,
    /// Minimum loop ladder height used when clipping against the panel top.
    #[serde(default = "default_loop_min_height")]
    pub loop_min_height: f64,
    /// Required slack above a loop ladder inside its zone.
    #[serde(default = "default_loop_zone_padding")]
    pub loop_zone_padding: f64,
    /// Inclusive wire-count bounds applied to every loop.
    #[serde(default = "default_wire_count_min")]
    pub wire_count_min: u32,
    #[serde(default = "default_wire_count_max")]
    pub wire_count_max: u32,
    /// Elevation range below this collapses to 1.0 (single-level case).
    #[serde(default = "default_range_epsilon")]
    pub range_epsilon: f64,
    /// Tolerance for matching a panel elevation to a floor line.
    #[serde(default = "default_floor_epsilon")]
    pub floor_epsilon: f64,
}

fn default_viewport_width() -> f64 { 1600.0 }
fn default_viewport_height() -> f64 { 900.0 }
fn default_margin_top() -> f64 { 40.0 }
fn default_margin_bottom() -> f64 { 40.0 }
fn default_panel_width() -> f64 { 120.0 }
fn default_panel_height() -> f64 { 80.0 }
fn default_panel_floor_offset() -> f64 { 10.0 }
fn default_panel_min_clearance() -> f64 { 20.0 }
fn default_power_section_width() -> f64 { 36.0 }
fn default_header_height() -> f64 { 18.0 }
fn default_max_loop_slots() -> u32 { 16 }
fn default_wire_spacing() -> f64 { 8.0 }
fn default_loop_span() -> f64 { 260.0 }
fn default_loop_min_height() -> f64 { 8.0 }
fn default_loop_zone_padding() -> f64 { 4.0 }
fn default_wire_count_min() -> u32 { 2 }
fn default_wire_count_max() -> u32 { 8 }
fn default_range_epsilon() -> f64 { 1e-3 }
fn default_floor_epsilon() -> f64 { 1e-6 }

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            margin_top: default_margin_top(),
            margin_bottom: default_margin_bottom(),
            panel_width: default_panel_width(),
            panel_height: default_panel_height(),
            panel_floor_offset: default_panel_floor_offset(),
            panel_min_clearance: default_panel_min_clearance(),
            power_section_width: default_power_section_width(),
            header_height: default_header_height(),
            max_loop_slots: default_max_loop_slots(),
            wire_spacing: default_wire_spacing(),
            loop_span: default_loop_span(),
            loop_min_height: default_loop_min_height(),
            loop_zone_padding: default_loop_zone_padding(),
            wire_count_min: default_wire_count_min(),
            wire_count_max: default_wire_count_max(),
            range_epsilon: default_range_epsilon(),
            floor_epsilon: default_floor_epsilon(),
        }
    }
}

impl LayoutConfig {
    /// Drawable height between the top and bottom margins.
    pub fn drawable_height(&self) -> f64 {
        (self.viewport_height - self.margin_top - self.margin_bottom).max(1.0)
    }

    /// Clamp a loop's configured wire count into the allowed bounds.
    pub fn clamp_wire_count(&self, wire_count: u32) -> u32 {
        wire_count.clamp(self.wire_count_min, self.wire_count_max)
    }
}
