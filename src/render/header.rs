//! Settings URL, clock and the two separator lines

use embedded_graphics::{prelude::*, primitives::Line};
use log::debug;

use super::{stroke, CANVAS_H, CANVAS_W, DIVIDER_TOP, DIVIDER_X, HEADER_RULE_Y, MARGIN, TOOLBAR_Y};
use crate::config::Settings;
use crate::displays::waveshare_4in26::Canvas;
use crate::error::Result;
use crate::fonts::Fonts;

/// Draws the header band and the pane divider
pub fn draw_header(
    canvas: &mut Canvas,
    fonts: &Fonts,
    settings: &Settings,
    hostname: &str,
    time: &str,
) -> Result<()> {
    let url = settings.settings_url(hostname);
    debug!("header: {} | {}", url, time);
    fonts
        .toolbar
        .draw(&url, Point::new(MARGIN, TOOLBAR_Y), canvas)?;

    let clock = fonts.toolbar_bold.measure(time, Point::zero())?;
    let clock_x = CANVAS_W - MARGIN - clock.advance;
    fonts
        .toolbar_bold
        .draw(time, Point::new(clock_x, TOOLBAR_Y), canvas)?;

    stroke(
        canvas,
        Line::new(
            Point::new(0, HEADER_RULE_Y),
            Point::new(CANVAS_W - 1, HEADER_RULE_Y),
        ),
        1,
    );
    stroke(
        canvas,
        Line::new(
            Point::new(DIVIDER_X, DIVIDER_TOP),
            Point::new(DIVIDER_X, CANVAS_H - 1),
        ),
        1,
    );
    Ok(())
}
