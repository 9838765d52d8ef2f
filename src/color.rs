// src/color.rs

//! Defines the fixed drawing palette (`PaletteColor`) and its conversions.

use serde::{Deserialize, Serialize};

/// Number of colors in the drawing palette.
pub const PALETTE_LEN: u8 = 8;

/// The 8 standard ANSI colors available for painting, in cycling order.
/// `Black` doubles as the background ("empty") value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PaletteColor {
    #[default]
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

/// The background color every canvas cell starts as and reverts to on clear.
pub const BACKGROUND: PaletteColor = PaletteColor::Black;

impl PaletteColor {
    /// Converts a u8 index (0-7) to a `PaletteColor`.
    ///
    /// # Panics
    /// Panics if the index is out of the valid range (0-7).
    pub fn from_index(idx: u8) -> Self {
        if idx >= PALETTE_LEN {
            panic!("Invalid PaletteColor index: {}. Must be 0-7.", idx);
        }
        // SAFETY: The check above ensures idx is within the valid range for PaletteColor's repr(u8).
        unsafe { std::mem::transmute(idx) }
    }

    /// Returns the palette index of this color.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The next color in cycling order, wrapping from `White` back to `Black`.
    pub fn next(self) -> Self {
        Self::from_index((self as u8 + 1) % PALETTE_LEN)
    }

    /// The previous color in cycling order, wrapping from `Black` back to `White`.
    pub fn prev(self) -> Self {
        if self as u8 == 0 {
            Self::from_index(PALETTE_LEN - 1)
        } else {
            Self::from_index(self as u8 - 1)
        }
    }

    /// Lowercase color name as it appears in saved records and the status line.
    pub fn name(self) -> &'static str {
        match self {
            PaletteColor::Black => "black",
            PaletteColor::Red => "red",
            PaletteColor::Green => "green",
            PaletteColor::Yellow => "yellow",
            PaletteColor::Blue => "blue",
            PaletteColor::Magenta => "magenta",
            PaletteColor::Cyan => "cyan",
            PaletteColor::White => "white",
        }
    }

    /// SGR code selecting this color as the foreground (30-37).
    pub fn sgr_fg(self) -> u16 {
        30 + self as u16
    }

    /// SGR code selecting this color as the background (40-47).
    pub fn sgr_bg(self) -> u16 {
        40 + self as u16
    }
}
