//! Output types for the riser layout engine.
//!
//! All types derive [`serde::Serialize`] and [`serde::Deserialize`] so a
//! scene can be handed to a renderer process or written to JSON for
//! headless inspection. Nothing here is persisted by the engine itself.

use serde::{Deserialize, Serialize};

/// Complete riser scene — the output of [`crate::generate_scene`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Format version (currently 1).
    pub version: u32,
    /// Canvas bounds in drawing units.
    pub bounds: Bounds,
    /// Level bands ordered by descending elevation (top of canvas first).
    pub bands: Vec<LevelBand>,
    /// Placed panel boxes.
    pub panels: Vec<PanelBox>,
    /// Placed loop ladders.
    pub loops: Vec<LoopFigure>,
    /// Elements omitted from the scene, with reasons.
    pub diagnostics: Vec<Diagnostic>,
}

/// Canvas dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

/// A level line mapped to its Y coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelBand {
    pub name: String,
    /// Source elevation, kept for downstream labeling.
    pub elevation: f64,
    pub y: f64,
    /// Hidden levels keep their geometry but are not drawn.
    pub visible: bool,
}

/// A placed panel box with its internal sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelBox {
    pub panel_id: String,
    pub name: String,
    /// Outer rectangle.
    pub rect: Rect,
    /// Left loop-output section.
    pub loop_section: Rect,
    /// Fixed-width right power section.
    pub power_section: Rect,
    /// Labeled loop slots across the loop-section header.
    pub header_slots: Vec<HeaderSlot>,
}

/// One labeled slot in a panel's loop header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderSlot {
    pub label: String,
    pub rect: Rect,
}

/// Which side of the panel a loop is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// A placed loop ladder: two vertical rails joined by one horizontal
/// segment per wire, with device markers on the wires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopFigure {
    /// Interaction key, `"panelId::loopId"`.
    pub key: String,
    pub panel_id: String,
    pub loop_id: String,
    pub side: Side,
    /// Vertical run from the panel edge down to the ladder top.
    pub spine: Segment,
    /// Vertical far-edge rail closing the ladder.
    pub far_edge: Segment,
    /// One horizontal segment per wire, top to bottom.
    pub wire_segments: Vec<Segment>,
    /// Device marker positions across the wires.
    pub device_markers: Vec<Point>,
    /// Hit-test rectangle covering the ladder.
    pub hit_rect: Rect,
}

/// A straight line segment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }
}

/// Why an element was omitted from the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The vertical zone cannot hold the element without overlap.
    InsufficientZoneSpace,
    /// No level line at or below the panel elevation.
    NoFloorLevel,
    /// The loop has no devices mapped to any level.
    NoMajorityElevation,
    /// The parent panel exists but was itself skipped.
    PanelNotPlaced,
}

/// Kind of skipped element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Panel,
    Loop,
}

/// A skipped-element record. Diagnostics are part of the scene, not errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub element: ElementKind,
    pub id: String,
    pub reason: SkipReason,
}

/// Cable-length estimate for one loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CableResult {
    /// Total Manhattan-routed length in metres.
    pub total_length_m: f64,
    /// Devices included in the route.
    pub routed_devices: usize,
    /// Devices omitted for missing coordinates.
    pub skipped_devices: usize,
    /// Whether the panel origin anchored the route ends.
    pub panel_origin_available: bool,
}

// ---------------------------------------------------------------------------
// Geometry helpers
// ---------------------------------------------------------------------------

/// Point in 2-D drawing space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle (used for sections and hit-testing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}
