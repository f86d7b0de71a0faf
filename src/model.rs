//! Input topology snapshot: levels, panels, loops, and devices.
//!
//! These types mirror what the host system hands us and nothing more. The
//! layout engine never mutates a snapshot; every call recomputes its output
//! from scratch, so callers are free to share one snapshot across views.

use serde::{Deserialize, Serialize};

/// Drawing state of a building level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// Drawn normally.
    Visible,
    /// Counts for the elevation range but is not drawn.
    Hidden,
    /// Removed from range computation and drawing, still addressable.
    Deleted,
}

/// A building level (floor line) with its elevation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    /// Elevation in the source length unit (feet).
    pub elevation: f64,
    pub visibility: Visibility,
}

/// A 3-D coordinate in the source length unit. Present only when all three
/// components are known; partial locations are represented as `None` on the
/// owning element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A control panel owning one or more loops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Panel {
    /// Stable identifier (unique within a topology).
    pub id: String,
    /// Display name shown on the panel box.
    pub name: String,
    /// Panel elevation; a panel without one cannot be placed.
    pub elevation: Option<f64>,
    /// 3-D location used as the cable-route origin.
    pub location: Option<Point3>,
    /// Loops in panel order.
    pub loops: Vec<Loop>,
    /// Configured loop capacity; drives the header slot count.
    pub loop_capacity: u32,
}

/// A wiring circuit connecting addressable devices back to a panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loop {
    /// Stable identifier (unique within a topology).
    pub id: String,
    /// Parent panel id. Must resolve when panel-relative geometry is
    /// requested; a dangling id is a hard error, not a skip.
    pub panel_id: String,
    /// Devices in storage order. Cable routing re-sorts by address.
    pub devices: Vec<Device>,
    /// false = drawn on the left of the panel, true = right.
    #[serde(default)]
    pub flipped: bool,
    /// Parallel wire lines for this loop, clamped to [2, 8] by the engine.
    #[serde(default = "default_wire_count")]
    pub wire_count: u32,
    /// Explicit stacking rank within a bucket; overrides the id sort.
    #[serde(default)]
    pub rank_override: Option<u32>,
}

fn default_wire_count() -> u32 {
    2
}

/// An addressable device on a loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Address string; may be non-numeric (`"A-5"`, `"007"`).
    pub address: String,
    /// Device type string (`"smoke"`, `"pull_station"`, ...).
    pub kind: String,
    /// Elevation in the source length unit.
    pub elevation: f64,
    /// 3-D location; devices without one are skipped by the cable route.
    pub location: Option<Point3>,
}

/// A complete read-only topology snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    /// Levels in host order; elevation order is not assumed.
    pub levels: Vec<Level>,
    pub panels: Vec<Panel>,
}

impl Topology {
    /// Look up a panel by id.
    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }
}
