//! Region renderers: each one draws a fixed part of the frame.
//!
//! Coordinates are absolute canvas pixels, top-left origin. Text is placed
//! by the top-left of its line box.

use embedded_graphics::{
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
};

use crate::color::Black;
use crate::displays::waveshare_4in26::{Canvas, HEIGHT, WIDTH};

pub mod header;
pub mod right_pane;
pub mod splash;
pub mod todos;

pub use header::draw_header;
pub use right_pane::{draw_image, draw_news, draw_right_pane};
pub use splash::{draw_splash, splash_origin};
pub use todos::{draw_todos, strike_line};

/// Canvas width as a coordinate
pub const CANVAS_W: i32 = WIDTH as i32;
/// Canvas height as a coordinate
pub const CANVAS_H: i32 = HEIGHT as i32;

/// Left/right inset used throughout
pub const MARGIN: i32 = 10;

/// Header text baseline box top
pub const TOOLBAR_Y: i32 = 1;
/// Row of the rule under the header band
pub const HEADER_RULE_Y: i32 = 48;
/// Column of the divider between the panes
pub const DIVIDER_X: i32 = CANVAS_W / 2;
/// Where the divider starts, just below the header
pub const DIVIDER_TOP: i32 = 56;

/// Position of the "Today" title
pub const TODO_TITLE: Point = Point::new(130, 50);
/// Left edge of todo lines
pub const TODO_X: i32 = MARGIN;
/// First todo line
pub const TODO_TOP: i32 = 50 + 70;
/// Distance between todo lines
pub const TODO_LINE_HEIGHT: i32 = 30;
/// Extra space after each todo
pub const TODO_ITEM_GAP: i32 = 10;
/// Wrap width of a todo, in characters
pub const TODO_WRAP_CHARS: usize = 26;
/// Lines per todo
pub const TODO_MAX_LINES: usize = 2;
/// Strike line sits this far above the ink midpoint, over the lowercase letters
pub const STRIKE_RAISE: i32 = 4;
/// Strike line thickness
pub const STRIKE_WIDTH: u32 = 2;

/// Box the photo is fitted and centered in
pub const IMAGE_PANE: Rectangle = Rectangle::new(
    Point::new(DIVIDER_X + MARGIN, DIVIDER_TOP),
    Size::new((CANVAS_W / 2 - 2 * MARGIN) as u32, (CANVAS_H - DIVIDER_TOP - MARGIN) as u32),
);

/// Left edge of the news column
pub const NEWS_X: i32 = DIVIDER_X + MARGIN;
/// Top of the "Breaking news" header
pub const NEWS_HEADER_Y: i32 = 50;
/// First headline line
pub const NEWS_TOP: i32 = 50 + 70;
/// Distance between headline lines
pub const NEWS_TITLE_LINE_HEIGHT: i32 = 38;
/// Space between headline and body
pub const NEWS_GAP: i32 = 10;
/// Distance between body lines
pub const NEWS_TEXT_LINE_HEIGHT: i32 = 32;
/// Headline wrap width, in characters
pub const NEWS_TITLE_CHARS: usize = 22;
/// Body wrap width, in characters
pub const NEWS_TEXT_CHARS: usize = 26;
/// Lines kept for headline and for body
pub const NEWS_MAX_LINES: usize = 10;

/// Draws a black line; the canvas cannot fail
pub(crate) fn stroke(canvas: &mut Canvas, line: Line, width: u32) {
    line.into_styled(PrimitiveStyle::with_stroke(Black, width))
        .draw(canvas)
        .unwrap_or_else(|never| match never {});
}
