// Color conversion utilities

use std::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};

/// RGB color triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `rrggbb`, optionally preceded by a single marker character
    /// such as `#`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = match s.len() {
            6 => s,
            7 => s.get(1..).ok_or_else(|| Error::InvalidColor(s.to_string()))?,
            _ => return Err(Error::InvalidColor(s.to_string())),
        };
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Lowercase hex with the given prefix, e.g. `"#ff99ff"` or `"ff99ff"`.
    pub fn to_hex(self, prefix: &str) -> String {
        rgb_to_hex((self.r, self.g, self.b), prefix)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

/// Format an RGB triple as two lowercase hex digits per channel.
pub fn rgb_to_hex(rgb: (u8, u8, u8), prefix: &str) -> String {
    format!("{prefix}{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2)
}

/// Interpolate `slices` colors strictly between `from` and `to`.
///
/// Each channel is rounded independently, half to even. With
/// `include_bounds` the endpoints are added, giving `slices + 2` entries.
pub fn gradient(from: Rgb, to: Rgb, slices: usize, include_bounds: bool) -> Vec<Rgb> {
    let steps = (slices + 1) as f64;
    let lerp = |a: u8, b: u8, i: usize| -> u8 {
        let v = a as f64 + (b as f64 - a as f64) * i as f64 / steps;
        v.round_ties_even().clamp(0.0, 255.0) as u8
    };

    let mut out = Vec::with_capacity(slices + 2);
    if include_bounds {
        out.push(from);
    }
    for i in 1..=slices {
        out.push(Rgb::new(
            lerp(from.r, to.r, i),
            lerp(from.g, to.g, i),
            lerp(from.b, to.b, i),
        ));
    }
    if include_bounds {
        out.push(to);
    }
    out
}

/// Hex-in, hex-out form of [`gradient`].
pub fn gradient_hex(
    from: &str,
    to: &str,
    slices: usize,
    include_bounds: bool,
    prefix: &str,
) -> Result<Vec<String>> {
    let from = Rgb::from_hex(from)?;
    let to = Rgb::from_hex(to)?;
    Ok(gradient(from, to, slices, include_bounds)
        .into_iter()
        .map(|c| c.to_hex(prefix))
        .collect())
}
