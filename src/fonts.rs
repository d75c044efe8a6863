//! Font set used by the region renderers.
//!
//! All faces are `u8g2` bitmap fonts compiled into the binary. They are
//! built once into a [`Fonts`] value and handed to every renderer by
//! reference.

use std::borrow::Cow;

use embedded_graphics::{prelude::*, primitives::Rectangle};
use u8g2_fonts::{
    fonts,
    types::{FontColor, VerticalPosition},
    FontRenderer,
};

use crate::color::Black;
use crate::displays::waveshare_4in26::Canvas;
use crate::error::{Error, Result};
use crate::text::ELLIPSIS;

/// Prefix of the first line of every todo item
pub const BULLET: char = '\u{2022}';

/// Where a string lands, relative to the coordinates space it was measured in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextBox {
    /// Horizontal advance including trailing spaces
    pub advance: i32,
    /// Box around the drawn pixels, `None` for blank text
    pub ink: Option<Rectangle>,
}

impl TextBox {
    /// Size of the ink box, zero for blank text
    pub fn ink_size(&self) -> Size {
        self.ink.map_or(Size::zero(), |r| r.size)
    }
}

/// One font at one size. Text is positioned by the top-left of the line.
pub struct Face {
    renderer: FontRenderer,
}

impl Face {
    /// Wraps a renderer; glyphs the font lacks are skipped rather than failing
    pub fn new(renderer: FontRenderer) -> Self {
        Self {
            renderer: renderer.with_ignore_unknown_chars(true),
        }
    }

    /// Measures `text` as if drawn at `origin`
    pub fn measure(&self, text: &str, origin: Point) -> Result<TextBox> {
        let glyphs = latin1(text);
        let dims = self
            .renderer
            .get_rendered_dimensions(&*glyphs, origin, VerticalPosition::Top)
            .map_err(|e| Error::Font {
                text: text.to_string(),
                details: format!("{e:?}"),
            })?;
        Ok(TextBox {
            advance: dims.advance.x,
            ink: dims.bounding_box,
        })
    }

    /// Draws `text` in black with its top-left at `origin`
    pub fn draw(&self, text: &str, origin: Point, canvas: &mut Canvas) -> Result<TextBox> {
        let glyphs = latin1(text);
        let dims = self
            .renderer
            .render(
                &*glyphs,
                origin,
                VerticalPosition::Top,
                FontColor::Transparent(Black),
                canvas,
            )
            .map_err(|e| Error::Font {
                text: text.to_string(),
                details: format!("{e:?}"),
            })?;
        Ok(TextBox {
            advance: dims.advance.x,
            ink: dims.bounding_box,
        })
    }
}

// The u8g2 `_tf` fonts stop at Latin-1, so the two typographic marks we emit
// are drawn with their nearest Latin-1 stand-ins.
fn latin1(text: &str) -> Cow<'_, str> {
    if text.contains([BULLET, ELLIPSIS]) {
        Cow::Owned(
            text.replace(BULLET, "\u{b7}")
                .replace(ELLIPSIS, "..."),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Every face the homepage and splash use
pub struct Fonts {
    /// Settings URL in the header
    pub toolbar: Face,
    /// Clock in the header
    pub toolbar_bold: Face,
    /// "Today" title and the boot message
    pub title: Face,
    /// Todo items
    pub todo: Face,
    /// "Breaking news" header
    pub news_header: Face,
    /// Headline lines
    pub news_title: Face,
    /// Article body lines
    pub news_text: Face,
}

impl Default for Fonts {
    fn default() -> Self {
        Self {
            toolbar: Face::new(FontRenderer::new::<fonts::u8g2_font_helvR18_tf>()),
            toolbar_bold: Face::new(FontRenderer::new::<fonts::u8g2_font_helvB18_tf>()),
            title: Face::new(FontRenderer::new::<fonts::u8g2_font_helvB24_tf>()),
            todo: Face::new(FontRenderer::new::<fonts::u8g2_font_helvR18_tf>()),
            news_header: Face::new(FontRenderer::new::<fonts::u8g2_font_helvB24_tf>()),
            news_title: Face::new(FontRenderer::new::<fonts::u8g2_font_ncenB24_tf>()),
            news_text: Face::new(FontRenderer::new::<fonts::u8g2_font_ncenR18_tf>()),
        }
    }
}
