use crate::error::{MapartError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit RGB color. Serializes as a `[r, g, b]` array, which is also the cache key format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b)
    }

    pub fn r(&self) -> u8 {
        self.0
    }

    pub fn g(&self) -> u8 {
        self.1
    }

    pub fn b(&self) -> u8 {
        self.2
    }

    /// Sum of squared per-channel differences.
    pub fn squared_distance(&self, other: &Color) -> u32 {
        let dr = self.0 as i32 - other.0 as i32;
        let dg = self.1 as i32 - other.1 as i32;
        let db = self.2 as i32 - other.2 as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Sum of the three channels.
    pub fn channel_sum(&self) -> u32 {
        self.0 as u32 + self.1 as u32 + self.2 as u32
    }

    /// Converts to (hue, saturation, value), each in `0.0..=1.0`.
    pub fn to_hsv(&self) -> (f64, f64, f64) {
        let r = self.0 as f64 / 255.0;
        let g = self.1 as f64 / 255.0;
        let b = self.2 as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let value = max;
        if max == min {
            return (0.0, 0.0, value);
        }

        let delta = max - min;
        let saturation = delta / max;
        let rc = (max - r) / delta;
        let gc = (max - g) / delta;
        let bc = (max - b) / delta;
        let hue = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        ((hue / 6.0).rem_euclid(1.0), saturation, value)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color(r, g, b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color(r, g, b)
    }
}

/// Builds a color from untyped integer components. Anything other than exactly three
/// values in `0..=255` is an `InvalidKey`.
impl TryFrom<&[i64]> for Color {
    type Error = MapartError;

    fn try_from(components: &[i64]) -> Result<Self> {
        let [r, g, b] = components else {
            return Err(MapartError::InvalidKey(format!(
                "expected 3 components, got {}",
                components.len()
            )));
        };
        let channel = |v: i64| {
            u8::try_from(v)
                .map_err(|_| MapartError::InvalidKey(format!("component {} is out of range", v)))
        };
        Ok(Color(channel(*r)?, channel(*g)?, channel(*b)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0, self.1, self.2)
    }
}
