//! Builds whole frames from payloads and drives one refresh cycle.

use log::info;

use crate::config::Settings;
use crate::displays::{waveshare_4in26::Canvas, Display};
use crate::driver::EpdDriver;
use crate::error::Result;
use crate::fonts::Fonts;
use crate::imaging::ImageAdapter;
use crate::payload::Payload;
use crate::render;

/// Everything a frame is drawn with. Holds no per-frame state, so one
/// composer can build any number of canvases.
pub struct Composer<'a, A: ?Sized> {
    fonts: &'a Fonts,
    images: &'a A,
    settings: &'a Settings,
}

impl<'a, A: ImageAdapter + ?Sized> Composer<'a, A> {
    /// Composer drawing with `fonts`, loading photos through `images`
    pub fn new(fonts: &'a Fonts, images: &'a A, settings: &'a Settings) -> Self {
        Self {
            fonts,
            images,
            settings,
        }
    }

    /// Header, todo list and right pane on a fresh white canvas
    pub fn homepage(&self, payload: &Payload) -> Result<Canvas> {
        let mut canvas = Canvas::new();
        info!(
            "composing homepage for {} with {} todo(s)",
            payload.hostname,
            payload.todos.len()
        );
        render::draw_header(
            &mut canvas,
            self.fonts,
            self.settings,
            &payload.hostname,
            &payload.time,
        )?;
        render::draw_todos(&mut canvas, self.fonts, &payload.todos)?;
        render::draw_right_pane(&mut canvas, self.fonts, self.images, payload.right_pane())?;
        Ok(canvas)
    }

    /// Centered boot message on a fresh white canvas
    pub fn boot(&self, message: &str) -> Result<Canvas> {
        let mut canvas = Canvas::new();
        info!("composing boot screen: {message:?}");
        render::draw_splash(&mut canvas, self.fonts, message)?;
        Ok(canvas)
    }
}

/// One refresh: initialize, clear, draw, push, sleep.
///
/// `build` runs only after the panel is initialized and cleared. Any failure
/// stops the sequence; the panel is not put to sleep in that case.
pub fn present<D, F>(driver: &mut D, build: F) -> Result<()>
where
    D: EpdDriver + ?Sized,
    F: FnOnce() -> Result<Canvas>,
{
    driver.initialize()?;
    driver.clear()?;
    let canvas = build()?;
    driver.push(canvas.buffer())?;
    driver.sleep()?;
    info!("refresh complete");
    Ok(())
}
