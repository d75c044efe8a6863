//! Boot splash: one message in the middle of a white frame

use embedded_graphics::prelude::*;
use log::debug;

use super::{CANVAS_H, CANVAS_W};
use crate::displays::waveshare_4in26::Canvas;
use crate::error::Result;
use crate::fonts::Fonts;

/// Top-left at which a block of `size` is centered on the canvas
pub fn splash_origin(size: Size) -> Point {
    Point::new(
        (CANVAS_W - size.width as i32).div_euclid(2),
        (CANVAS_H - size.height as i32).div_euclid(2),
    )
}

/// Draws `message` in the title face, centered by its measured extent
pub fn draw_splash(canvas: &mut Canvas, fonts: &Fonts, message: &str) -> Result<()> {
    let measured = fonts.title.measure(message, Point::zero())?;
    let origin = splash_origin(measured.ink_size());
    debug!("splash {message:?} at {origin:?}");
    fonts.title.draw(message, origin, canvas)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::Rectangle;

    #[test]
    fn origin_centers_block() {
        assert_eq!(splash_origin(Size::new(200, 40)), Point::new(300, 220));
        assert_eq!(splash_origin(Size::zero()), Point::new(400, 240));
        assert_eq!(splash_origin(Size::new(801, 0)), Point::new(-1, 240));
    }

    #[test]
    fn message_lands_near_center() {
        let mut canvas = Canvas::new();
        draw_splash(&mut canvas, &Fonts::default(), "Booting...").unwrap();
        let total = canvas.black_pixels_in(&canvas.bounding_box());
        assert!(total > 0);
        let middle = Rectangle::new(Point::new(250, 190), Size::new(300, 100));
        assert_eq!(canvas.black_pixels_in(&middle), total);
    }

    #[test]
    fn empty_message_is_blank() {
        let mut canvas = Canvas::new();
        draw_splash(&mut canvas, &Fonts::default(), "").unwrap();
        assert_eq!(canvas, Canvas::new());
    }
}
