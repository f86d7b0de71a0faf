//! Phase 2: Wire Device Distributor.
//!
//! Balances a loop's devices across its parallel wire lines and spaces them
//! evenly along each wire. Distribution is count-based: device identity does
//! not influence which wire or slot a marker lands on.

/// Split `total` devices across `wires` lines as evenly as possible.
///
/// For wire `i` the share is `ceil(remaining / (wires − i))`, which
/// guarantees the counts sum to `total` and differ by at most one. An empty
/// result is returned only for `wires == 0`.
pub fn distribute_devices(total: usize, wires: usize) -> Vec<usize> {
    let mut counts = Vec::with_capacity(wires);
    let mut remaining = total;
    for i in 0..wires {
        let left = wires - i;
        let share = remaining.div_ceil(left);
        counts.push(share);
        remaining -= share;
    }
    counts
}

/// Evenly spaced offsets for `count` device markers along a wire of the
/// given span, measured from the panel-side edge. The pitch is
/// `span / (count + 1)`, leaving equal clearance at both ends. Mirroring
/// for flipped loops is the caller's concern.
pub fn device_offsets(span: f64, count: usize) -> Vec<f64> {
    let pitch = span / (count as f64 + 1.0);
    (0..count).map(|slot| pitch * (slot as f64 + 1.0)).collect()
}
