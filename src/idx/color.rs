//! Mapping between stored intensity bytes and 16-bit RGBA colors.
//!
//! Stored intensities use inverted polarity: `0` is paper (white) and `255`
//! is ink (black). Colors are [`image::Rgba<u16>`] values, fully opaque.

use image::Rgba;

/// Alpha of every color produced by [`to_color`].
pub const OPAQUE: u16 = u16::MAX;

/// Widens an 8-bit channel value to 16 bits as `floor(v / 255 * 65535)`.
#[inline]
pub fn widen(value: u8) -> u16 {
    (f64::from(value) / f64::from(u8::MAX) * f64::from(u16::MAX)) as u16
}

/// Renders a stored intensity as an opaque gray.
#[inline]
pub fn to_color(intensity: u8) -> Rgba<u16> {
    let gray = widen(u8::MAX - intensity);
    Rgba([gray, gray, gray, widen(u8::MAX)])
}

/// Converts a 16-bit color back to a stored intensity. Alpha is ignored.
///
/// The channel average is subtracted from 255 and truncated to 8 bits
/// (modulo 256, not clamped). Since widened channels are multiples of 257,
/// the low byte of the average is the original 8-bit channel and no
/// separate scale-down is needed.
#[inline]
pub fn to_intensity(color: Rgba<u16>) -> u8 {
    let [r, g, b, _] = color.0;
    let avg = (u32::from(r) + u32::from(g) + u32::from(b)) / 3;
    255u32.wrapping_sub(avg) as u8
}
