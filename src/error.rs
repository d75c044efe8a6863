//! Error types for composing and presenting a frame.

use thiserror::Error;

use crate::driver::DriverError;

/// Shared `Result` alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal failures. Image problems are not here: they are handled inside the
/// right pane and never abort a render.
#[derive(Debug, Error)]
pub enum Error {
    /// The JSON payload could not be parsed
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// A string could not be measured or drawn
    #[error("cannot render {text:?}: {details}")]
    Font {
        /// Text being rendered
        text: String,
        /// Font library diagnostic
        details: String,
    },

    /// The display hardware failed
    #[error(transparent)]
    Driver(#[from] DriverError),
}
