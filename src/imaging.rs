//! Photo to 1-bit conversion for the right pane.
//!
//! The pipeline is: decode, grayscale, downscale to fit (never upscale),
//! Floyd–Steinberg dither at a fixed threshold. No step uses randomness, so
//! the same file and pane always give the same bits.

use std::path::{Path, PathBuf};

use embedded_graphics::{
    image::ImageRaw,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::Rectangle,
};
use image::{imageops, imageops::FilterType, GrayImage};
use log::debug;
use thiserror::Error;

/// Gray levels below this become black
pub const THRESHOLD: i32 = 128;

/// Why an image could not be turned into a pane block. Always recoverable.
#[derive(Debug, Error)]
pub enum AdaptError {
    /// The file is missing, unreadable or not a decodable image
    #[error("cannot load image {}: {source}", path.display())]
    Load {
        /// Requested source
        path: PathBuf,
        /// Decoder or I/O failure
        #[source]
        source: image::ImageError,
    },

    /// The target pane has no area
    #[error("pane {width}x{height} has no area")]
    EmptyPane {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

/// Narrow imaging capability used by the right pane
pub trait ImageAdapter {
    /// Loads `source` and returns a dithered block no larger than the pane
    fn adapt(&self, source: &Path, pane_width: u32, pane_height: u32)
        -> Result<MonoBlock, AdaptError>;
}

/// A dithered 1-bit image, rows packed MSB first, 1 = white
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonoBlock {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl MonoBlock {
    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed rows, each padded to a whole byte
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Color at (`x`, `y`), `None` outside the block
    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let byte = self.data[(x / 8 + self.width.div_ceil(8) * y) as usize];
        Some(BinaryColor::from(byte & (0x80 >> (x % 8)) != 0))
    }

    /// View usable with `embedded_graphics::image::Image`
    pub fn raw(&self) -> ImageRaw<'_, BinaryColor> {
        ImageRaw::new(&self.data, self.width)
    }

    /// Top-left corner that centers this block inside `pane`
    pub fn centered_in(&self, pane: &Rectangle) -> Point {
        let dx = (pane.size.width.saturating_sub(self.width) / 2) as i32;
        let dy = (pane.size.height.saturating_sub(self.height) / 2) as i32;
        pane.top_left + Point::new(dx, dy)
    }
}

/// Largest size with the same aspect ratio as `width`x`height` that fits
/// the pane. Images that already fit are returned unchanged.
pub fn fit_within(width: u32, height: u32, pane_width: u32, pane_height: u32) -> (u32, u32) {
    if width <= pane_width && height <= pane_height {
        return (width, height);
    }
    let scale = f64::min(
        f64::from(pane_width) / f64::from(width),
        f64::from(pane_height) / f64::from(height),
    );
    let scaled = |v: u32, max: u32| ((f64::from(v) * scale).round() as u32).clamp(1, max);
    (scaled(width, pane_width), scaled(height, pane_height))
}

/// Floyd–Steinberg error diffusion in raster order.
///
/// Residuals go 7/16 right, 3/16 below-left, 5/16 below and 1/16
/// below-right, using integer arithmetic.
pub fn floyd_steinberg(gray: &GrayImage) -> MonoBlock {
    let (width, height) = gray.dimensions();
    let (w, h) = (width as usize, height as usize);
    let row_bytes = w.div_ceil(8);

    let mut levels: Vec<i32> = gray.pixels().map(|p| i32::from(p.0[0])).collect();
    let mut data = vec![0u8; row_bytes * h];

    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            let old = levels[i];
            let new = if old < THRESHOLD { 0 } else { 255 };
            if new == 255 {
                data[y * row_bytes + x / 8] |= 0x80 >> (x % 8);
            }

            let err = old - new;
            if x + 1 < w {
                levels[i + 1] += err * 7 / 16;
            }
            if y + 1 < h {
                if x > 0 {
                    levels[i + w - 1] += err * 3 / 16;
                }
                levels[i + w] += err * 5 / 16;
                if x + 1 < w {
                    levels[i + w + 1] += err / 16;
                }
            }
        }
    }

    MonoBlock {
        width,
        height,
        data,
    }
}

/// [`ImageAdapter`] backed by the `image` crate
#[derive(Clone, Copy, Debug, Default)]
pub struct DitheringAdapter;

impl ImageAdapter for DitheringAdapter {
    fn adapt(
        &self,
        source: &Path,
        pane_width: u32,
        pane_height: u32,
    ) -> Result<MonoBlock, AdaptError> {
        if pane_width == 0 || pane_height == 0 {
            return Err(AdaptError::EmptyPane {
                width: pane_width,
                height: pane_height,
            });
        }

        let gray = image::open(source)
            .map_err(|source_err| AdaptError::Load {
                path: source.to_path_buf(),
                source: source_err,
            })?
            .to_luma8();

        let (w, h) = gray.dimensions();
        let (fw, fh) = fit_within(w, h, pane_width, pane_height);
        debug!("adapting {} from {}x{} to {}x{}", source.display(), w, h, fw, fh);

        let gray = if (fw, fh) == (w, h) {
            gray
        } else {
            imageops::resize(&gray, fw, fh, FilterType::CatmullRom)
        };

        Ok(floyd_steinberg(&gray))
    }
}
