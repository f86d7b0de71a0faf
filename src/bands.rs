//! Phase 1: Level Band Mapper.
//!
//! Maps level elevations onto the vertical axis of the canvas. Y grows
//! downward, so the highest elevation lands just below the top margin and
//! the lowest sits above the bottom margin. Deleted levels drop out of the
//! range computation and the band list entirely; Hidden levels keep their
//! line (later phases clip against it) but are marked not visible.

use crate::config::LayoutConfig;
use crate::model::{Level, Visibility};
use crate::types::LevelBand;

/// Linear elevation → Y mapping shared by every later phase.
///
/// Pure value type; building one never fails and `y` is finite for any
/// finite elevation as long as the viewport height is at least 1.
#[derive(Debug, Clone, Copy)]
pub struct ElevationMap {
    min_elevation: f64,
    range: f64,
    margin_top: f64,
    drawable_height: f64,
}

impl ElevationMap {
    /// Build the mapping from the non-deleted levels of a snapshot.
    pub fn from_levels(levels: &[Level], cfg: &LayoutConfig) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for level in levels {
            if level.visibility == Visibility::Deleted {
                continue;
            }
            min = min.min(level.elevation);
            max = max.max(level.elevation);
        }

        // No usable levels at all: anchor at zero with a unit range.
        if !min.is_finite() {
            min = 0.0;
            max = 0.0;
        }

        let mut range = max - min;
        if range < cfg.range_epsilon {
            // Single-level degenerate case; keep the division well defined.
            range = 1.0;
        }

        Self {
            min_elevation: min,
            range,
            margin_top: cfg.margin_top,
            drawable_height: cfg.drawable_height(),
        }
    }

    /// Y coordinate for an elevation. Higher elevations map to smaller Y.
    pub fn y(&self, elevation: f64) -> f64 {
        let t = (elevation - self.min_elevation) / self.range;
        self.margin_top + (1.0 - t) * self.drawable_height
    }
}

/// Map every non-deleted level to a band, ordered by descending elevation.
///
/// The returned bands double as the level lines later phases use for
/// floor/ceiling and zone resolution.
pub fn map_level_bands(levels: &[Level], cfg: &LayoutConfig) -> (Vec<LevelBand>, ElevationMap) {
    let map = ElevationMap::from_levels(levels, cfg);

    let mut bands: Vec<LevelBand> = levels
        .iter()
        .filter(|l| l.visibility != Visibility::Deleted)
        .map(|l| LevelBand {
            name: l.name.clone(),
            elevation: l.elevation,
            y: map.y(l.elevation),
            visible: l.visibility == Visibility::Visible,
        })
        .collect();

    bands.sort_by(|a, b| {
        b.elevation
            .partial_cmp(&a.elevation)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    (bands, map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(name: &str, elevation: f64, visibility: Visibility) -> Level {
        Level {
            name: name.into(),
            elevation,
            visibility,
        }
    }

    fn cfg() -> LayoutConfig {
        LayoutConfig {
            viewport_height: 900.0,
            margin_top: 40.0,
            margin_bottom: 40.0,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn higher_elevation_maps_to_smaller_y() {
        let levels = vec![
            level("L1", 0.0, Visibility::Visible),
            level("L2", 12.0, Visibility::Visible),
            level("L3", 24.0, Visibility::Visible),
        ];
        let (bands, _) = map_level_bands(&levels, &cfg());

        // Ordered by descending elevation, so Y must be strictly increasing.
        for pair in bands.windows(2) {
            assert!(pair[0].elevation > pair[1].elevation);
            assert!(pair[0].y < pair[1].y);
        }
    }

    #[test]
    fn extremes_land_on_margins() {
        let levels = vec![
            level("Ground", 0.0, Visibility::Visible),
            level("Roof", 30.0, Visibility::Visible),
        ];
        let c = cfg();
        let (bands, _) = map_level_bands(&levels, &c);
        assert!((bands[0].y - c.margin_top).abs() < 1e-9);
        assert!((bands[1].y - (c.viewport_height - c.margin_bottom)).abs() < 1e-9);
    }

    #[test]
    fn single_level_is_finite() {
        let levels = vec![level("Only", 7.5, Visibility::Visible)];
        let (bands, map) = map_level_bands(&levels, &cfg());
        assert!(bands[0].y.is_finite());
        assert!(map.y(7.5).is_finite());
        assert!(map.y(100.0).is_finite());
    }

    #[test]
    fn deleted_levels_do_not_widen_the_range() {
        let with_deleted = vec![
            level("L1", 0.0, Visibility::Visible),
            level("L2", 12.0, Visibility::Visible),
            level("Old roof", 500.0, Visibility::Deleted),
        ];
        let without = vec![
            level("L1", 0.0, Visibility::Visible),
            level("L2", 12.0, Visibility::Visible),
        ];
        let c = cfg();
        let (bands_a, _) = map_level_bands(&with_deleted, &c);
        let (bands_b, _) = map_level_bands(&without, &c);

        assert_eq!(bands_a.len(), 2);
        for (a, b) in bands_a.iter().zip(&bands_b) {
            assert!((a.y - b.y).abs() < 1e-9);
        }
    }

    #[test]
    fn hidden_levels_keep_their_line_but_not_their_drawing() {
        let levels = vec![
            level("L1", 0.0, Visibility::Visible),
            level("Mezzanine", 6.0, Visibility::Hidden),
            level("L2", 12.0, Visibility::Visible),
        ];
        let (bands, _) = map_level_bands(&levels, &cfg());
        assert_eq!(bands.len(), 3);
        let mezz = bands.iter().find(|b| b.name == "Mezzanine").unwrap();
        assert!(!mezz.visible);
    }

    #[test]
    fn monotonic_over_arbitrary_elevations() {
        let levels = vec![
            level("A", -10.0, Visibility::Visible),
            level("B", 35.0, Visibility::Visible),
        ];
        let (_, map) = map_level_bands(&levels, &cfg());
        let mut prev_y = f64::NEG_INFINITY;
        let mut e = 35.0;
        while e >= -10.0 {
            let y = map.y(e);
            assert!(y.is_finite());
            assert!(y > prev_y);
            prev_y = y;
            e -= 1.7;
        }
    }
}
