//! Integer HSV value type with wrap/clamp normalization and RGB conversion.

use serde::{Deserialize, Serialize};

/// Lower bound shared by all three channels.
pub const CHANNEL_MIN: i32 = 0;
/// Upper bound for saturation and value (percent).
pub const CHANNEL_MAX: i32 = 100;
/// Full hue circle in degrees; hues are stored in `[0, HUE_DEGREES)`.
pub const HUE_DEGREES: i32 = 360;

/// An immutable HSV color with integer channels.
///
/// Hue is wrapped into `[0, 360)` by modulo arithmetic; saturation and value
/// are clamped into `[0, 100]`. Normalization happens on construction, so a
/// stored color is always in range. Two colors are equal iff all three
/// channels match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawHsv", into = "RawHsv")]
pub struct HsvColor {
    hue: i32,
    saturation: i32,
    value: i32,
}

impl HsvColor {
    /// Build a color from raw channel values, wrapping the hue and clamping
    /// saturation and value.
    #[must_use]
    pub fn new(hue: i32, saturation: i32, value: i32) -> Self {
        Self {
            hue: wrap_hue(hue),
            saturation: saturation.clamp(CHANNEL_MIN, CHANNEL_MAX),
            value: value.clamp(CHANNEL_MIN, CHANNEL_MAX),
        }
    }

    /// Hue in degrees, always in `[0, 360)`.
    #[must_use]
    pub fn hue(self) -> i32 {
        self.hue
    }

    /// Saturation percent, always in `[0, 100]`.
    #[must_use]
    pub fn saturation(self) -> i32 {
        self.saturation
    }

    /// Brightness (value) percent, always in `[0, 100]`.
    #[must_use]
    pub fn value(self) -> i32 {
        self.value
    }

    /// Convert to 8-bit RGB with the standard hexagonal HSV conversion.
    #[must_use]
    pub fn to_rgb(self) -> Rgb888 {
        let s = f64::from(self.saturation) / f64::from(CHANNEL_MAX);
        let v = f64::from(self.value) / f64::from(CHANNEL_MAX);

        let (r, g, b) = if s == 0.0 {
            (v, v, v)
        } else {
            // Stored hue is < 360, so the sector index lands in 0..=5.
            let h = f64::from(self.hue) / (f64::from(HUE_DEGREES) / 6.0);
            let sector = h.trunc() as i32;
            let f = h - h.trunc();

            let p = v * (1.0 - s);
            let q = v * (1.0 - s * f);
            let t = v * (1.0 - s * (1.0 - f));

            match sector {
                0 => (v, t, p),
                1 => (q, v, p),
                2 => (p, v, t),
                3 => (p, q, v),
                4 => (t, p, v),
                _ => (v, p, q),
            }
        };

        Rgb888 {
            r: channel_to_byte(r),
            g: channel_to_byte(g),
            b: channel_to_byte(b),
        }
    }
}

/// A packed 8-bit-per-channel RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb888 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb888 {
    /// Render as a `#RRGGBB` hex string.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

fn wrap_hue(hue: i32) -> i32 {
    (hue % HUE_DEGREES + HUE_DEGREES) % HUE_DEGREES
}

fn channel_to_byte(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// On-the-wire representation; deserialization re-normalizes through
/// [`HsvColor::new`] so out-of-range persisted values cannot bypass the
/// invariants.
#[derive(Serialize, Deserialize)]
struct RawHsv {
    hue: i32,
    saturation: i32,
    value: i32,
}

impl From<RawHsv> for HsvColor {
    fn from(raw: RawHsv) -> Self {
        Self::new(raw.hue, raw.saturation, raw.value)
    }
}

impl From<HsvColor> for RawHsv {
    fn from(color: HsvColor) -> Self {
        Self {
            hue: color.hue,
            saturation: color.saturation,
            value: color.value,
        }
    }
}
