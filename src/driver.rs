//! Driver seam between the composer and the e-paper hardware
pub use display_interface::DisplayError;

use std::path::PathBuf;

use log::debug;
use thiserror::Error;

/// Steps that a panel-specific init sequence can contain.
/// Keep variants minimal and serializable as static arrays in display modules.
#[derive(Clone, Copy, Debug)]
pub enum InitStep {
    /// Send the software reset command
    SWReset,
    /// Sleep for the given number of milliseconds
    DelayMs(u8),
    /// Wait until the display releases its busy line
    WaitUntilIdle,
    /// Send a command with a static data slice
    CmdData(u8, &'static [u8]),
    /// Send DRIVER_OUTPUT_CTRL with the panel height and gate scan flags
    DriverControl,
    /// Configure display to use the full frame (set ram area/counter)
    UseFullFrame,
}

/// Lifecycle of a panel during one invocation.
///
/// A composition pass walks `Uninitialized -> Initialized -> Displayed -> Asleep`
/// and never skips or reorders a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    /// Nothing has been sent to the panel yet
    #[default]
    Uninitialized,
    /// Reset, configured and (possibly) cleared
    Initialized,
    /// A frame has been transferred and refreshed
    Displayed,
    /// Deep sleep; a new `initialize` is required before drawing again
    Asleep,
}

impl PanelState {
    /// Fails with [`DriverError::OutOfOrder`] unless the panel is in one of `allowed`.
    pub fn require(self, op: &'static str, allowed: &[PanelState]) -> Result<(), DriverError> {
        if allowed.contains(&self) {
            Ok(())
        } else {
            debug!("rejecting {} in state {:?}", op, self);
            Err(DriverError::OutOfOrder { op, state: self })
        }
    }
}

/// Hardware-side failures. None of these are retried.
#[derive(Debug, Error)]
pub enum DriverError {
    /// SPI write or DC/RST pin failure
    #[error("display interface error: {0:?}")]
    Interface(DisplayError),

    /// The busy line could not be read
    #[error("failed to read the busy line")]
    BusyPin,

    /// The controller never released the busy line
    #[error("panel still busy after {waited_ms} ms")]
    BusyTimeout {
        /// How long we polled before giving up
        waited_ms: u32,
    },

    /// A driver operation was called in the wrong lifecycle state
    #[error("cannot {op} while the panel is {state:?}")]
    OutOfOrder {
        /// The rejected operation
        op: &'static str,
        /// State the panel was in
        state: PanelState,
    },

    /// The pushed frame does not match the panel RAM size
    #[error("frame is {actual} bytes but the panel expects {expected}")]
    FrameSize {
        /// Bytes the panel needs
        expected: usize,
        /// Bytes that were pushed
        actual: usize,
    },

    /// The preview sink could not write its image
    #[error("failed to write preview {}: {source}", path.display())]
    Preview {
        /// Destination file
        path: PathBuf,
        /// Encoder failure
        #[source]
        source: image::ImageError,
    },
}

impl From<DisplayError> for DriverError {
    fn from(err: DisplayError) -> Self {
        DriverError::Interface(err)
    }
}

/// The capability set the composer needs from a display.
///
/// Every refresh calls `initialize`, `clear`, `push` and `sleep` exactly
/// once and in that order.
pub trait EpdDriver {
    /// Reset the controller and prepare it for drawing
    fn initialize(&mut self) -> Result<(), DriverError>;

    /// Blank the panel to white
    fn clear(&mut self) -> Result<(), DriverError>;

    /// Transfer a packed 1-bit frame and refresh the panel
    fn push(&mut self, frame: &[u8]) -> Result<(), DriverError>;

    /// Put the panel into its low-power state
    fn sleep(&mut self) -> Result<(), DriverError>;
}
