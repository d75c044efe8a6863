//! Graphics Support for EPDs

use crate::color::Color;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

/// 4.26in Black/White 800x480
pub mod waveshare_4in26;

/// Necessary traits for all displays to implement for drawing
///
/// Adds support for:
/// - Drawing (With the help of DrawTarget/Embedded Graphics)
/// - Clearing
/// - Reading pixels back
pub trait Display: DrawTarget {
    /// Clears the buffer of the display with the chosen background color
    fn clear_buffer(&mut self, background_color: Color) {
        let fill_color = background_color.get_byte_value();
        for elem in self.get_mut_buffer().iter_mut() {
            *elem = fill_color
        }
    }

    /// Returns the buffer
    fn buffer(&self) -> &[u8];

    /// Returns a mutable buffer
    fn get_mut_buffer(&mut self) -> &mut [u8];

    /// Helperfunction for the Embedded Graphics draw trait
    fn draw_helper(
        &mut self,
        width: u32,
        height: u32,
        pixel: Pixel<BinaryColor>,
    ) -> Result<(), Self::Error> {
        let buffer = self.get_mut_buffer();

        let Pixel(point, color) = pixel;
        if outside_display(point, width, height) {
            return Ok(());
        }

        // Give us index inside the buffer and the bit-position in that u8 which needs to be changed
        let (index, bit) = find_position(point.x as u32, point.y as u32, width);
        let index = index as usize;

        // "Draw" the Pixel on that bit
        match Color::from(color) {
            Color::White => buffer[index] |= bit,
            Color::Black => buffer[index] &= !bit,
        }
        Ok(())
    }

    /// Reads back the pixel at `point`, `None` when it lies off the panel
    fn pixel_helper(&self, width: u32, height: u32, point: Point) -> Option<Color> {
        if outside_display(point, width, height) {
            return None;
        }
        let (index, bit) = find_position(point.x as u32, point.y as u32, width);
        Some(Color::from(self.buffer()[index as usize] & bit))
    }
}

// Checks if a pos is outside the defined display
fn outside_display(p: Point, width: u32, height: u32) -> bool {
    if p.x < 0 || p.y < 0 {
        return true;
    }
    let (x, y) = (p.x as u32, p.y as u32);
    x >= width || y >= height
}

#[rustfmt::skip]
//returns index position in the u8-slice and the bit-position inside that u8
fn find_position(x: u32, y: u32, width: u32) -> (u32, u8) {
    (
        x / 8 + width.div_ceil(8) * y,
        0x80 >> (x % 8)
    )
}

/// Computes the needed buffer length. Takes care of rounding up in case width
/// is not divisible by 8.
#[must_use]
pub const fn buffer_len(width: usize, height: usize) -> usize {
    width.div_ceil(8) * height
}
