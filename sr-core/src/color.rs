//! Color scales for cluster markers and safety scores.

/// Stops of the sequential orange-red scheme used for cluster severity.
const OR_RD: [(u8, u8, u8); 9] = [
    (0xff, 0xf7, 0xec),
    (0xfe, 0xe8, 0xc8),
    (0xfd, 0xd4, 0x9e),
    (0xfd, 0xbb, 0x84),
    (0xfc, 0x8d, 0x59),
    (0xef, 0x65, 0x48),
    (0xd7, 0x30, 0x1f),
    (0xb3, 0x00, 0x00),
    (0x7f, 0x00, 0x00),
];

const SAFETY_LOW: (u8, u8, u8) = (0xff, 0x00, 0x00);
const SAFETY_HIGH: (u8, u8, u8) = (0x00, 0x80, 0x00);

/// Safety scores span this range.
pub const SAFETY_SCORE_MAX: f64 = 10.0;

/// Orange-red color for `t` in `[0, 1]` (clamped).
pub fn or_rd(t: f64) -> String {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (OR_RD.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(OR_RD.len() - 1);
    hex(mix(OR_RD[lo], OR_RD[hi], scaled - lo as f64))
}

/// Color for a cluster's severity relative to the observed `(min, max)` extent.
pub fn severity_color(severity: f64, extent: (f64, f64)) -> String {
    let (min, max) = extent;
    let t = if max > min {
        (severity - min) / (max - min)
    } else {
        0.5
    };
    or_rd(t)
}

/// Red (0) to green (10) color for a safety score.
pub fn safety_color(score: f64) -> String {
    let t = (score / SAFETY_SCORE_MAX).clamp(0.0, 1.0);
    hex(mix(SAFETY_LOW, SAFETY_HIGH, t))
}

fn mix(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let channel = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
    (channel(a.0, b.0), channel(a.1, b.1), channel(a.2, b.2))
}

fn hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
