use std::fmt::{self, Write};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An opaque 24-bit color.
///
/// With the `serde` feature, colors are (de)serialized as `#rrggbb` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct RGB {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RGB {
    pub const BLACK: RGB = RGB::new(0, 0, 0);
    pub const WHITE: RGB = RGB::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        RGB { r, g, b }
    }

    pub fn append_as_hex(&self, output: &mut String) {
        let _ = write!(output, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b);
    }
}

impl fmt::Display for RGB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color \"{}\", expected #rgb or #rrggbb", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for RGB {
    type Err = ParseColorError;

    /// Parses `#rgb` and `#rrggbb` hex notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
        match hex.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (i, value) in rgb.iter_mut().enumerate() {
                    *value = channel(i..i + 1).map_err(|_| err())? * 17;
                }
                Ok(RGB::new(rgb[0], rgb[1], rgb[2]))
            }
            6 => Ok(RGB::new(
                channel(0..2).map_err(|_| err())?,
                channel(2..4).map_err(|_| err())?,
                channel(4..6).map_err(|_| err())?,
            )),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for RGB {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RGB> for String {
    fn from(color: RGB) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_long_and_short_hex() {
        assert_eq!("#ff8000".parse::<RGB>(), Ok(RGB::new(255, 128, 0)));
        assert_eq!("#f80".parse::<RGB>(), Ok(RGB::new(255, 136, 0)));
        assert!("ff8000".parse::<RGB>().is_err());
        assert!("#ff80".parse::<RGB>().is_err());
        assert!("#gg0000".parse::<RGB>().is_err());
    }

    #[test]
    fn hex_output() {
        let mut out = String::new();
        RGB::new(1, 171, 255).append_as_hex(&mut out);
        assert_eq!(out, "#01abff");
        assert_eq!(RGB::BLACK.to_string(), "#000000");
    }
}
