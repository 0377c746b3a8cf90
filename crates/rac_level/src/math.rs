//! Color value types and the fixed-point quantization used by the
//! RAC2/RAC3/Deadlocked light and ambient sound layouts.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An 8-bit RGB color as the editor sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }
}

/// A color stored on disk as three i32 channels, each nominally 0..=255.
///
/// Several records use a negative red channel as an "unset" sentinel, so the
/// raw channel values are kept verbatim and only interpreted on access. This
/// is what keeps re-encoding byte-exact for sentinels like `(-1, 0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RgbSlot([i32; 3]);

impl RgbSlot {
    /// The conventional "unset" sentinel.
    pub const EMPTY: RgbSlot = RgbSlot([-1, 0, 0]);

    pub const fn from_raw(raw: [i32; 3]) -> RgbSlot {
        RgbSlot(raw)
    }

    /// The channel values exactly as they appear in the record.
    pub const fn raw(self) -> [i32; 3] {
        self.0
    }

    /// The color, or `None` when any channel carries a negative sentinel.
    pub fn get(self) -> Option<Rgb> {
        let [r, g, b] = self.0;
        if r < 0 || g < 0 || b < 0 {
            return None;
        }
        Some(Rgb::new(
            r.min(255) as u8,
            g.min(255) as u8,
            b.min(255) as u8,
        ))
    }

    pub fn set(&mut self, color: Rgb) {
        self.0 = [color.r as i32, color.g as i32, color.b as i32];
    }

    pub fn clear(&mut self) {
        *self = RgbSlot::EMPTY;
    }

    pub fn is_empty(self) -> bool {
        self.get().is_none()
    }
}

impl From<Rgb> for RgbSlot {
    fn from(color: Rgb) -> RgbSlot {
        RgbSlot([color.r as i32, color.g as i32, color.b as i32])
    }
}

/// 16-bit fixed point with 6 fractional bits, used for positions and radii
/// in the post-RAC1 light layouts.
pub fn fixed_to_f32(raw: i16) -> f32 {
    raw as f32 / 64.0
}

/// Round-to-nearest inverse of [`fixed_to_f32`].
pub fn f32_to_fixed(value: f32) -> i16 {
    (value * 64.0).round() as i16
}

/// 16-bit color channel scaled to 0..=1.
pub fn color16_to_f32(raw: u16) -> f32 {
    raw as f32 / 65535.0
}

/// Round-to-nearest inverse of [`color16_to_f32`].
pub fn f32_to_color16(value: f32) -> u16 {
    (value * 65535.0).round().clamp(0.0, 65535.0) as u16
}

/// 8-bit color channel scaled to 0..=1, used by the RAC1 light layout.
pub fn color8_to_f32(raw: u8) -> f32 {
    raw as f32 / 255.0
}

/// Round-to-nearest inverse of [`color8_to_f32`].
pub fn f32_to_color8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
