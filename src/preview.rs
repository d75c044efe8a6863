//! An [`EpdDriver`] that renders into a PNG file instead of a panel.
//!
//! Useful on a development machine: the frame that would have been sent
//! over SPI is unpacked and written as an 8-bit grayscale image.

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use log::{debug, info};

use crate::color::Color;
use crate::displays::waveshare_4in26::{BUFFER_LEN, HEIGHT, WIDTH};
use crate::driver::{DriverError, EpdDriver, PanelState};

/// Writes every pushed frame to `path`
#[derive(Debug)]
pub struct PngPreview {
    path: PathBuf,
    state: PanelState,
}

impl PngPreview {
    /// Preview sink writing to `path`; the file is created on the first push
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: PanelState::Uninitialized,
        }
    }

    /// Destination file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current lifecycle state
    pub fn state(&self) -> PanelState {
        self.state
    }
}

/// Unpacks a panel frame (MSB first, 1 = white) into a grayscale image.
/// Fails unless `frame` is exactly one panel's worth of bytes.
pub fn frame_to_image(frame: &[u8]) -> Result<GrayImage, DriverError> {
    if frame.len() != BUFFER_LEN {
        return Err(DriverError::FrameSize {
            expected: BUFFER_LEN,
            actual: frame.len(),
        });
    }
    let bytes_per_row = u32::from(WIDTH).div_ceil(8);
    Ok(GrayImage::from_fn(WIDTH.into(), HEIGHT.into(), |x, y| {
        let byte = frame[(x / 8 + bytes_per_row * y) as usize];
        let bit = (byte >> (7 - x % 8)) & 1;
        match Color::from(bit) {
            Color::White => Luma([255]),
            Color::Black => Luma([0]),
        }
    }))
}

impl EpdDriver for PngPreview {
    fn initialize(&mut self) -> Result<(), DriverError> {
        debug!("preview initialized");
        self.state = PanelState::Initialized;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DriverError> {
        self.state.require("clear", &[PanelState::Initialized])
    }

    fn push(&mut self, frame: &[u8]) -> Result<(), DriverError> {
        self.state.require("push", &[PanelState::Initialized])?;
        frame_to_image(frame)?
            .save(&self.path)
            .map_err(|source| DriverError::Preview {
                path: self.path.clone(),
                source,
            })?;
        info!("preview written to {}", self.path.display());
        self.state = PanelState::Displayed;
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), DriverError> {
        self.state
            .require("sleep", &[PanelState::Initialized, PanelState::Displayed])?;
        self.state = PanelState::Asleep;
        Ok(())
    }
}
