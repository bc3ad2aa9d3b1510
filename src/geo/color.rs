//! ARGB colours and their `#AARRGGBB` text form.

use std::fmt;
use std::str::FromStr;

use crate::error::GeomarkError;

/// A 32-bit colour with straight (non-premultiplied) alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb {
    pub const RED: Argb = Argb::new(0xFF, 0xFF, 0x00, 0x00);
    pub const BLACK: Argb = Argb::new(0xFF, 0x00, 0x00, 0x00);

    /// Creates a colour from its alpha, red, green and blue channels.
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Creates a fully opaque colour.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(0xFF, r, g, b)
    }
}

impl Default for Argb {
    fn default() -> Self {
        Self::RED
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

/// Parses `#AARRGGBB` or `#RRGGBB` (implied opaque), case-insensitive.
impl FromStr for Argb {
    type Err = GeomarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GeomarkError::InvalidColor(s.to_string());

        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        let [a, r, g, b] = value.to_be_bytes();
        match hex.len() {
            8 => Ok(Argb::new(a, r, g, b)),
            6 => Ok(Argb::opaque(r, g, b)),
            _ => Err(invalid()),
        }
    }
}
