//! Color values.
//!
//! `GameColor` is a 24-bit RGB value packed into a `u32`. It is the only
//! color type the engine core deals in; mapping onto what a terminal can
//! actually show is the job of [`palette::ColorPalette`].

pub mod palette;

use std::fmt;
use std::str::FromStr;

use crossterm::style;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("HEX value must be 6 or 7 characters, got {0}")]
    InvalidLength(usize),

    #[error("7 character HEX value must start with '#'")]
    MissingHashPrefix,

    #[error("invalid HEX digits in {0:?}")]
    InvalidDigit(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameColor(u32);

impl GameColor {
    /// [R=255,G=255,B=255]
    pub const WHITE: GameColor = GameColor(0xFFFFFF);
    /// [R=0,G=0,B=0]
    pub const BLACK: GameColor = GameColor(0x000000);
    /// [R=255,G=0,B=0]
    pub const RED: GameColor = GameColor(0xFF0000);
    /// [R=0,G=255,B=0]
    pub const GREEN: GameColor = GameColor(0x00FF00);
    /// [R=0,G=0,B=255]
    pub const BLUE: GameColor = GameColor(0x0000FF);
    /// [R=255,G=0,B=255]
    pub const MAGENTA: GameColor = GameColor(0xFF00FF);
    /// [R=255,G=255,B=0]
    pub const YELLOW: GameColor = GameColor(0xFFFF00);
    /// [R=0,G=255,B=255]
    pub const CYAN: GameColor = GameColor(0x00FFFF);

    /// Wrap a packed `0xRRGGBB` value. Bits above the low 24 are dropped.
    pub const fn new(packed: u32) -> Self {
        GameColor(packed & 0xFF_FFFF)
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        GameColor(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Parse `#RRGGBB` or `RRGGBB`.
    ///
    /// # Errors
    ///
    /// Anything that is not exactly six hex digits, optionally behind a
    /// single `#`, is rejected.
    pub fn parse(hex: &str) -> Result<Self, ColorParseError> {
        let digits = match hex.len() {
            6 => hex,
            7 => hex
                .strip_prefix('#')
                .ok_or(ColorParseError::MissingHashPrefix)?,
            len => return Err(ColorParseError::InvalidLength(len)),
        };

        // from_str_radix tolerates a leading sign, so check digits first.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(hex.to_string()));
        }

        u32::from_str_radix(digits, 16)
            .map(GameColor)
            .map_err(|_| ColorParseError::InvalidDigit(hex.to_string()))
    }

    /// Like [`GameColor::parse`] but without the error detail.
    ///
    /// `try_parse(s).unwrap_or_default()` yields the zero color on failure.
    pub fn try_parse(hex: &str) -> Option<Self> {
        Self::parse(hex).ok()
    }

    pub const fn packed(&self) -> u32 {
        self.0
    }

    pub const fn r(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(&self) -> u8 {
        self.0 as u8
    }

    /// Six uppercase hex digits, no prefix.
    pub fn to_hex(&self) -> String {
        format!("{:06X}", self.0)
    }

    /// Squared euclidean distance in RGB space.
    pub fn distance_sq(&self, other: GameColor) -> u32 {
        let d = |a: u8, b: u8| {
            let diff = u32::from(a.abs_diff(b));
            diff * diff
        };
        d(self.r(), other.r()) + d(self.g(), other.g()) + d(self.b(), other.b())
    }
}

impl fmt::Display for GameColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl FromStr for GameColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GameColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<GameColor> for String {
    fn from(color: GameColor) -> Self {
        color.to_string()
    }
}

impl From<GameColor> for style::Color {
    fn from(color: GameColor) -> Self {
        style::Color::Rgb {
            r: color.r(),
            g: color.g(),
            b: color.b(),
        }
    }
}
