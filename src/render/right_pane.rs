//! Right pane: a dithered photo or a news item

use std::path::Path;

use embedded_graphics::{image::Image, prelude::*};
use log::{debug, info, warn};

use super::{
    IMAGE_PANE, NEWS_GAP, NEWS_HEADER_Y, NEWS_MAX_LINES, NEWS_TEXT_CHARS, NEWS_TEXT_LINE_HEIGHT,
    NEWS_TITLE_CHARS, NEWS_TITLE_LINE_HEIGHT, NEWS_TOP, NEWS_X,
};
use crate::displays::waveshare_4in26::Canvas;
use crate::error::Result;
use crate::fonts::Fonts;
use crate::imaging::ImageAdapter;
use crate::payload::{RightPane, RssItem};
use crate::text::wrap;

/// Fills the right pane with whatever the payload selected
pub fn draw_right_pane<A: ImageAdapter + ?Sized>(
    canvas: &mut Canvas,
    fonts: &Fonts,
    images: &A,
    pane: RightPane<'_>,
) -> Result<()> {
    match pane {
        RightPane::Image(path) => {
            draw_image(canvas, images, path);
        }
        RightPane::News(item) => draw_news(canvas, fonts, item)?,
        RightPane::Blank => debug!("right pane left blank"),
    }
    Ok(())
}

/// Draws the photo at `path` centered in the image pane.
///
/// A photo that cannot be used is logged and the pane stays white; returns
/// whether anything was drawn.
pub fn draw_image<A: ImageAdapter + ?Sized>(canvas: &mut Canvas, images: &A, path: &Path) -> bool {
    let pane = IMAGE_PANE;
    match images.adapt(path, pane.size.width, pane.size.height) {
        Ok(block) => {
            let at = block.centered_in(&pane);
            info!(
                "image {} -> {}x{} at {:?}",
                path.display(),
                block.width(),
                block.height(),
                at
            );
            let raw = block.raw();
            Image::new(&raw, at)
                .draw(canvas)
                .unwrap_or_else(|never| match never {});
            true
        }
        Err(err) => {
            warn!("image render failed, leaving pane blank: {err}");
            false
        }
    }
}

/// Draws the "Breaking news" header, the wrapped headline and the body
pub fn draw_news(canvas: &mut Canvas, fonts: &Fonts, item: &RssItem) -> Result<()> {
    fonts
        .news_header
        .draw("Breaking news", Point::new(NEWS_X, NEWS_HEADER_Y), canvas)?;

    let mut y = NEWS_TOP;
    for line in wrap(&item.title, NEWS_TITLE_CHARS, NEWS_MAX_LINES).iter() {
        fonts.news_title.draw(line, Point::new(NEWS_X, y), canvas)?;
        y += NEWS_TITLE_LINE_HEIGHT;
    }
    y += NEWS_GAP;
    for line in wrap(&item.text, NEWS_TEXT_CHARS, NEWS_MAX_LINES).iter() {
        fonts.news_text.draw(line, Point::new(NEWS_X, y), canvas)?;
        y += NEWS_TEXT_LINE_HEIGHT;
    }
    Ok(())
}
