//! Cable Length Calculator.
//!
//! Estimates the physical wire run of a loop by walking its devices in
//! address order and summing Manhattan distances, modeling orthogonal
//! conduit/tray routing. Independent of the 2-D layout phases; safe to call
//! from any view at any time because it holds no state.

use crate::model::{Device, Loop, Panel, Point3};
use crate::types::CableResult;

/// Source length unit (feet) to metres.
const FEET_TO_METRES: f64 = 0.3048;

/// Sentinel sort key for addresses without any digits; sorts last.
const NO_NUMERIC_KEY: i64 = i64::MAX;

/// Compute the routed cable length for one loop.
///
/// The route runs panel → devices in address order → panel. Devices without
/// a full 3-D location are skipped (the chain connects their neighbors) and
/// counted; a panel without a full location drops the leading and trailing
/// legs. Never fails on partial data.
pub fn loop_cable_length(lp: &Loop, panel: Option<&Panel>) -> CableResult {
    let origin = panel.and_then(|p| p.location);

    let mut ordered: Vec<&Device> = lp.devices.iter().collect();
    ordered.sort_by(|a, b| {
        address_sort_key(&a.address)
            .cmp(&address_sort_key(&b.address))
            .then_with(|| {
                a.address
                    .to_lowercase()
                    .cmp(&b.address.to_lowercase())
            })
    });

    let mut waypoints: Vec<Point3> = Vec::with_capacity(ordered.len() + 2);
    if let Some(o) = origin {
        waypoints.push(o);
    }
    let mut skipped = 0usize;
    let mut routed = 0usize;
    for device in ordered {
        match device.location {
            Some(p) => {
                waypoints.push(p);
                routed += 1;
            }
            None => skipped += 1,
        }
    }
    if let Some(o) = origin {
        waypoints.push(o);
    }

    let total_feet: f64 = waypoints
        .windows(2)
        .map(|pair| manhattan(pair[0], pair[1]))
        .sum();

    CableResult {
        total_length_m: total_feet * FEET_TO_METRES,
        routed_devices: routed,
        skipped_devices: skipped,
        panel_origin_available: origin.is_some(),
    }
}

/// Numeric ordering key for a device address.
///
/// Whole-string integer parses win (`"007"` → 7); otherwise the trailing
/// contiguous digit run counts (`"A-5"` → 5); addresses with no digits sort
/// last via the sentinel.
pub fn address_sort_key(address: &str) -> i64 {
    let trimmed = address.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return v;
    }

    let digits: String = trimmed
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if digits.is_empty() {
        return NO_NUMERIC_KEY;
    }
    digits.parse::<i64>().unwrap_or(NO_NUMERIC_KEY)
}

fn manhattan(a: Point3, b: Point3) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs() + (a.z - b.z).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(address: &str, location: Option<Point3>) -> Device {
        Device {
            address: address.into(),
            kind: "smoke".into(),
            elevation: 0.0,
            location,
        }
    }

    fn at(x: f64, y: f64, z: f64) -> Option<Point3> {
        Some(Point3 { x, y, z })
    }

    fn lp(devices: Vec<Device>) -> Loop {
        Loop {
            id: "A1".into(),
            panel_id: "P1".into(),
            devices,
            flipped: false,
            wire_count: 2,
            rank_override: None,
        }
    }

    fn panel_at(location: Option<Point3>) -> Panel {
        Panel {
            id: "P1".into(),
            name: "Panel P1".into(),
            elevation: Some(0.0),
            location,
            loops: Vec::new(),
            loop_capacity: 1,
        }
    }

    #[test]
    fn address_key_examples() {
        assert_eq!(address_sort_key("1"), 1);
        assert_eq!(address_sort_key("007"), 7);
        assert_eq!(address_sort_key("A-5"), 5);
        assert_eq!(address_sort_key(""), i64::MAX);
        assert_eq!(address_sort_key("pump room"), i64::MAX);
    }

    #[test]
    fn round_trip_route_in_metres() {
        // Panel at origin, two devices out and back: 10 + 10 + 20 = 40 ft.
        let panel = panel_at(at(0.0, 0.0, 0.0));
        let devices = vec![
            device("1", at(10.0, 0.0, 0.0)),
            device("2", at(10.0, 10.0, 0.0)),
        ];
        let result = loop_cable_length(&lp(devices), Some(&panel));

        assert!((result.total_length_m - 12.19).abs() < 0.01);
        assert_eq!(result.routed_devices, 2);
        assert_eq!(result.skipped_devices, 0);
        assert!(result.panel_origin_available);
    }

    #[test]
    fn storage_order_does_not_matter() {
        let panel = panel_at(at(0.0, 0.0, 0.0));
        let forward = vec![
            device("1", at(10.0, 0.0, 0.0)),
            device("2", at(10.0, 10.0, 0.0)),
        ];
        let reversed = vec![
            device("2", at(10.0, 10.0, 0.0)),
            device("1", at(10.0, 0.0, 0.0)),
        ];
        let a = loop_cable_length(&lp(forward), Some(&panel));
        let b = loop_cable_length(&lp(reversed), Some(&panel));
        assert_eq!(a.total_length_m.to_bits(), b.total_length_m.to_bits());
    }

    #[test]
    fn device_without_location_is_skipped_not_fatal() {
        let panel = panel_at(at(0.0, 0.0, 0.0));
        let devices = vec![
            device("1", at(10.0, 0.0, 0.0)),
            device("2", None),
            device("3", at(10.0, 10.0, 0.0)),
        ];
        let result = loop_cable_length(&lp(devices), Some(&panel));

        // Same route as without device 2: its neighbors connect directly.
        assert!((result.total_length_m - 40.0 * 0.3048).abs() < 1e-9);
        assert_eq!(result.routed_devices, 2);
        assert_eq!(result.skipped_devices, 1);
    }

    #[test]
    fn missing_panel_origin_drops_the_end_legs() {
        let devices = vec![
            device("1", at(10.0, 0.0, 0.0)),
            device("2", at(10.0, 10.0, 0.0)),
        ];
        let result = loop_cable_length(&lp(devices), None);

        // Only the device-to-device leg remains: 10 ft.
        assert!((result.total_length_m - 10.0 * 0.3048).abs() < 1e-9);
        assert!(!result.panel_origin_available);
    }

    #[test]
    fn non_numeric_addresses_sort_last() {
        let panel = panel_at(at(0.0, 0.0, 0.0));
        let devices = vec![
            device("annex", at(0.0, 100.0, 0.0)),
            device("2", at(10.0, 0.0, 0.0)),
            device("A-1", at(5.0, 0.0, 0.0)),
        ];
        let result = loop_cable_length(&lp(devices), Some(&panel));

        // Order: A-1 (1), 2, annex (sentinel). Route:
        // P→(5,0,0)=5, →(10,0,0)=5, →(0,100,0)=110, →P=100. Total 220 ft.
        assert!((result.total_length_m - 220.0 * 0.3048).abs() < 1e-9);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let panel = panel_at(at(3.25, -7.5, 12.125));
        let devices = vec![
            device("12", at(101.5, 44.0, 12.125)),
            device("3", at(17.0, -2.0, 24.25)),
            device("stairwell", None),
        ];
        let looped = lp(devices);
        let a = loop_cable_length(&looped, Some(&panel));
        let b = loop_cable_length(&looped, Some(&panel));
        assert_eq!(a.total_length_m.to_bits(), b.total_length_m.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn empty_loop_routes_nothing() {
        let result = loop_cable_length(&lp(Vec::new()), None);
        assert_eq!(result.total_length_m, 0.0);
        assert_eq!(result.routed_devices, 0);
        assert_eq!(result.skipped_devices, 0);
    }
}
