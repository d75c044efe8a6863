//! Homepage and boot-splash composer for an 800x480 monochrome e-paper panel
//!
//! Used with the [Waveshare 4.26" e-Paper HAT](https://www.waveshare.com/4.26inch-e-paper-hat.htm)
//! (SSD1677 controller) on a Raspberry Pi.
//!
//! ## Architecture
//!
//! Rendering and hardware control are kept apart:
//! - **Composition** ([`compose::Composer`], [`render`]) draws a payload onto a
//!   [`Canvas`](displays::waveshare_4in26::Canvas), a packed 1-bit frame that
//!   implements `embedded-graphics`' `DrawTarget`
//! - **Drivers** ([`driver::EpdDriver`]) take that frame to a panel:
//!   [`Epd4in26`](displays::waveshare_4in26::Epd4in26) over SPI, or
//!   [`PngPreview`](preview::PngPreview) into a PNG file
//!
//! [`compose::present`] ties the two together for one refresh.
//!
//! ## Usage
//!
//! ```rust, ignore
//! use inkpane::prelude::*;
//!
//! let fonts = Fonts::default();
//! let settings = Settings::default();
//! let composer = Composer::new(&fonts, &DitheringAdapter, &settings);
//!
//! let payload = Payload::from_json(r#"{"hostname":"frame","time":"08:15","todos":[]}"#)?;
//! let mut driver = PngPreview::new("frame.png");
//! present(&mut driver, || composer.homepage(&payload))?;
//! ```
//!
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

mod cmd;
pub mod color;
pub mod compose;
pub mod config;
pub mod displays;
pub mod driver;
pub mod error;
pub mod fonts;
pub mod imaging;
pub mod payload;
pub mod preview;
pub mod render;
pub mod text;

mod flag;
mod interface;

/// Useful exports
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::compose::{present, Composer};
    pub use crate::config::{Settings, Wiring};
    pub use crate::displays::waveshare_4in26::{Canvas, Epd4in26};
    pub use crate::displays::Display;
    pub use crate::driver::{DriverError, EpdDriver, PanelState};
    pub use crate::error::{Error, Result};
    pub use crate::fonts::Fonts;
    pub use crate::imaging::{DitheringAdapter, ImageAdapter};
    pub use crate::payload::{BootPayload, Payload};
    pub use crate::preview::PngPreview;
}
