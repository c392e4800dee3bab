//! Packed colors. Land tables hand out 0xRRGGBB; the queue stores 0xRRGGBBAA.

/// Halves every channel of an 0xRRGGBB color `lev` times.
#[inline]
pub fn darkened_by(mut col: u32, lev: u32) -> u32 {
    for _ in 0..lev.min(8) {
        col = (col & 0xFE_FEFE) >> 1;
    }
    col
}

/// 0xRRGGBB darkened `lev` times, with alpha `a` appended.
#[inline]
pub fn darkena(col: u32, lev: u32, a: u8) -> u32 {
    (darkened_by(col & 0xFF_FFFF, lev) << 8) | a as u32
}

/// Channel-wise blend of `c0` (at `v0`) and `c1` (at `v1`) evaluated at `v`.
/// Works on any packing; every byte is blended independently.
pub fn gradient(c0: u32, c1: u32, v0: f64, v: f64, v1: f64) -> u32 {
    let span = v1 - v0;
    let t = if span == 0.0 { 1.0 } else { ((v - v0) / span).clamp(0.0, 1.0) };
    let mut out = 0u32;
    for shift in [0, 8, 16, 24] {
        let a = ((c0 >> shift) & 0xFF) as f64;
        let b = ((c1 >> shift) & 0xFF) as f64;
        let ch = (a + (b - a) * t).round().clamp(0.0, 255.0) as u32;
        out |= ch << shift;
    }
    out
}

/// 0xRRGGBB as seen through `mirrors` reflections: odd counts lean towards
/// the mirror color, even ones towards the cloud color.
pub fn darkened(col: u32, mirrors: u32) -> u32 {
    match mirrors {
        0 => col,
        m if m % 2 == 1 => gradient(col, 0xC0_C0FF, 0.0, 0.5, 1.0),
        _ => gradient(col, 0xE0_E0FF, 0.0, 0.5, 1.0),
    }
}

/// Replaces the alpha byte of an 0xRRGGBBAA color.
#[inline]
pub fn with_alpha(rgba: u32, a: u8) -> u32 {
    (rgba & 0xFFFF_FF00) | a as u32
}

#[inline]
pub fn alpha(rgba: u32) -> u8 {
    (rgba & 0xFF) as u8
}

/// Splits 0xRRGGBB into channels.
#[inline]
pub fn channels(col: u32) -> [u32; 3] {
    [(col >> 16) & 0xFF, (col >> 8) & 0xFF, col & 0xFF]
}

/// Fire colors from yellow (`t = 0`) to red (`t = 1`).
pub fn fire_gradient(t: f64) -> u32 {
    gradient(0xFF_FF00, 0xFF_0000, 0.0, t, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflections_tint_alternately() {
        assert_eq!(darkened(0x10_2030, 0), 0x10_2030);
        assert_eq!(darkened(0x00_0000, 1), 0x60_6080);
        assert_eq!(darkened(0x00_0000, 2), 0x70_7080);
    }

    #[test]
    fn darkena_halves_and_appends_alpha() {
        assert_eq!(darkena(0x80_8080, 0, 0xFF), 0x8080_80FF);
        assert_eq!(darkena(0x80_8080, 1, 0x40), 0x4040_4040);
        assert_eq!(darkena(0xFF_FFFF, 2, 0), 0x3F3F_3F00);
    }

    #[test]
    fn gradient_ends_and_middle() {
        assert_eq!(gradient(0x00_0000, 0xFF_FFFF, 0.0, 0.0, 1.0), 0);
        assert_eq!(gradient(0x00_0000, 0xFF_FFFF, 0.0, 1.0, 1.0), 0xFF_FFFF);
        assert_eq!(gradient(0x00_0000, 0x80_4020, 0.0, 1.0, 2.0), 0x40_2010);
        // clamped outside the range
        assert_eq!(gradient(0x10, 0x20, 0.0, 5.0, 1.0), 0x20);
    }

    #[test]
    fn alpha_helpers() {
        assert_eq!(with_alpha(0x1122_33FF, 0x80), 0x1122_3380);
        assert_eq!(alpha(0x1122_3344), 0x44);
        assert_eq!(channels(0x12_3456), [0x12, 0x34, 0x56]);
    }
}
