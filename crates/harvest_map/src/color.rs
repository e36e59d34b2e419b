//! 8-bit RGB colors, hex encoding, blending and the color ramps used by each map mode.
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the `#rgb` shorthand (case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(hex.to_owned());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        match digits.len() {
            6 => {
                let v = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                Ok(Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8))
            }
            3 => {
                let v = u16::from_str_radix(digits, 16).map_err(|_| invalid())?;
                let expand = |n: u16| ((n & 0xf) as u8) * 0x11;
                Ok(Self::new(expand(v >> 8), expand(v >> 4), expand(v)))
            }
            _ => Err(invalid()),
        }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Per-channel average, rounded half up.
    pub fn blend(self, other: Rgb) -> Rgb {
        #[inline]
        fn avg(a: u8, b: u8) -> u8 {
            ((a as u16 + b as u16 + 1) / 2) as u8
        }
        Rgb::new(
            avg(self.r, other.r),
            avg(self.g, other.g),
            avg(self.b, other.b),
        )
    }
}

/// Blend two hex colors, returning the result as lowercase hex.
pub fn blend(a: &str, b: &str) -> Result<String> {
    Ok(Rgb::from_hex(a)?.blend(Rgb::from_hex(b)?).to_hex())
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// An ordered list of colors, one per class.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Ramp(Vec<Rgb>);

impl Ramp {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self(colors)
    }

    pub fn from_slice(colors: &[Rgb]) -> Self {
        Self(colors.to_vec())
    }

    /// Parse a list of hex strings.
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self> {
        colors
            .iter()
            .map(|c| Rgb::from_hex(c.as_ref()))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.0
    }

    /// Color for class `index`; indices past the end reuse the last color.
    pub fn color(&self, index: usize) -> Rgb {
        self.0
            .get(index)
            .or_else(|| self.0.last())
            .copied()
            .unwrap_or(NEUTRAL_GRAY)
    }
}

/// Fill used when no variable is shown in bivariate mode.
pub const NEUTRAL_GRAY: Rgb = Rgb::new(0xcc, 0xcc, 0xcc);
/// Fill for bivariate legend cells when no variable is shown.
pub const LEGEND_GRAY: Rgb = Rgb::new(0xee, 0xee, 0xee);

pub mod ramps {
    //! Default ramps, low class first.
    use super::Rgb;

    /// Single-variable (yield) choropleth, 6 classes.
    pub const YIELD_GREENS: [Rgb; 6] = [
        Rgb::new(0xed, 0xf8, 0xe9),
        Rgb::new(0xba, 0xe4, 0xb3),
        Rgb::new(0x74, 0xc4, 0x76),
        Rgb::new(0x31, 0xa3, 0x54),
        Rgb::new(0x00, 0x6d, 0x2c),
        Rgb::new(0x00, 0x44, 0x1b),
    ];

    /// Dot-density background (production), 10 classes.
    pub const PRODUCTION_BLUES: [Rgb; 10] = [
        Rgb::new(0xf7, 0xfb, 0xff),
        Rgb::new(0xde, 0xeb, 0xf7),
        Rgb::new(0xc6, 0xdb, 0xef),
        Rgb::new(0x9e, 0xca, 0xe1),
        Rgb::new(0x6b, 0xae, 0xd6),
        Rgb::new(0x42, 0x92, 0xc6),
        Rgb::new(0x21, 0x71, 0xb5),
        Rgb::new(0x08, 0x51, 0x9c),
        Rgb::new(0x08, 0x30, 0x6b),
        Rgb::new(0x04, 0x1f, 0x49),
    ];

    /// Bivariate production axis, 5 classes.
    pub const BIVARIATE_PRODUCTION: [Rgb; 5] = [
        Rgb::new(0xed, 0xf8, 0xe9),
        Rgb::new(0xba, 0xe4, 0xb3),
        Rgb::new(0x74, 0xc4, 0x76),
        Rgb::new(0x31, 0xa3, 0x54),
        Rgb::new(0x00, 0x6d, 0x2c),
    ];

    /// Bivariate area axis, 5 classes.
    pub const BIVARIATE_AREA: [Rgb; 5] = [
        Rgb::new(0xff, 0xf5, 0xeb),
        Rgb::new(0xfe, 0xe6, 0xce),
        Rgb::new(0xfd, 0xae, 0x6b),
        Rgb::new(0xe6, 0x55, 0x0d),
        Rgb::new(0xa6, 0x36, 0x03),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb::from_hex("#654321").unwrap(), Rgb::new(0x65, 0x43, 0x21));
        assert_eq!(Rgb::from_hex("#CCC").unwrap(), NEUTRAL_GRAY);
        assert_eq!(Rgb::from_hex("#222").unwrap(), Rgb::new(0x22, 0x22, 0x22));
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["654321", "#12345", "#gggggg", "#+12345", ""] {
            assert!(
                matches!(Rgb::from_hex(bad), Err(Error::InvalidColor(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn hex_encoding_is_lowercase_and_padded() {
        assert_eq!(Rgb::new(0, 0x6d, 0x2c).to_hex(), "#006d2c");
        assert_eq!(Rgb::new(0xAB, 0x0C, 0x01).to_string(), "#ab0c01");
    }

    #[test]
    fn blend_averages_and_rounds_half_up() {
        assert_eq!(blend("#000000", "#ffffff").unwrap(), "#808080");
        assert_eq!(blend("#fff5eb", "#edf8e9").unwrap(), "#f6f7ea");
        assert_eq!(blend("#010203", "#010203").unwrap(), "#010203");
    }

    #[test]
    fn blend_is_commutative() {
        for a in ramps::BIVARIATE_AREA {
            for p in ramps::BIVARIATE_PRODUCTION {
                assert_eq!(a.blend(p), p.blend(a));
            }
        }
        assert_eq!(
            blend("#a63603", "#74c476").unwrap(),
            blend("#74c476", "#a63603").unwrap()
        );
    }

    #[test]
    fn ramp_clamps_out_of_range_index() {
        let ramp = Ramp::from_slice(&ramps::YIELD_GREENS);
        assert_eq!(ramp.color(0).to_hex(), "#edf8e9");
        assert_eq!(ramp.color(42).to_hex(), "#00441b");
        assert_eq!(Ramp::new(Vec::new()).color(0), NEUTRAL_GRAY);
    }

    #[test]
    fn ramp_from_hex_propagates_errors() {
        assert_eq!(Ramp::from_hex(&["#fff", "#000000"]).unwrap().len(), 2);
        assert!(Ramp::from_hex(&["#fff", "nope"]).is_err());
    }
}
