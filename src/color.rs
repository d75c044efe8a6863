//! B/W Color for the e-paper panel

use embedded_graphics::pixelcolor::BinaryColor;

/// Drawing colors: `Off` is black ink, `On` is white paper
pub use embedded_graphics::pixelcolor::BinaryColor::{Off as Black, On as White};

/// Only for the Black/White-Displays
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    /// Black color
    Black,
    /// White color
    White,
}

impl Color {
    /// Gets a full byte of black or white pixels
    pub fn get_byte_value(self) -> u8 {
        match self {
            Color::White => 0xff,
            Color::Black => 0x00,
        }
    }
}

impl From<BinaryColor> for Color {
    fn from(b: BinaryColor) -> Color {
        match b {
            BinaryColor::On => Color::White,
            BinaryColor::Off => Color::Black,
        }
    }
}

impl From<Color> for BinaryColor {
    fn from(c: Color) -> BinaryColor {
        match c {
            Color::White => BinaryColor::On,
            Color::Black => BinaryColor::Off,
        }
    }
}

impl From<u8> for Color {
    fn from(value: u8) -> Self {
        if value == 0 {
            Color::Black
        } else {
            Color::White
        }
    }
}
