//! Left pane: the "Today" title and the wrapped todo list

use embedded_graphics::{
    prelude::*,
    primitives::{Line, Rectangle},
};
use log::debug;

use super::{
    stroke, STRIKE_RAISE, STRIKE_WIDTH, TODO_ITEM_GAP, TODO_LINE_HEIGHT, TODO_MAX_LINES,
    TODO_TITLE, TODO_TOP, TODO_WRAP_CHARS, TODO_X,
};
use crate::displays::waveshare_4in26::Canvas;
use crate::error::Result;
use crate::fonts::{Fonts, BULLET};
use crate::payload::Todo;
use crate::text::wrap;

/// Draws the title and every todo, one below the other.
///
/// The first line of an item carries the bullet; its continuation is
/// indented by the bullet's width. Finished items get a line through the
/// first line, starting right after the bullet.
pub fn draw_todos(canvas: &mut Canvas, fonts: &Fonts, todos: &[Todo]) -> Result<()> {
    fonts.title.draw("Today", TODO_TITLE, canvas)?;

    let prefix = format!("{BULLET} ");
    let indent = fonts.todo.measure(&prefix, Point::zero())?.advance;

    let mut y = TODO_TOP;
    for todo in todos {
        let lines = wrap(&todo.text, TODO_WRAP_CHARS, TODO_MAX_LINES);
        debug!(
            "todo at y={y}: {} line(s), done={}",
            lines.len(),
            todo.done
        );
        for (i, line) in lines.iter().enumerate() {
            let origin = Point::new(TODO_X, y);
            if i == 0 {
                let drawn = fonts.todo.draw(&format!("{prefix}{line}"), origin, canvas)?;
                if todo.done {
                    if let Some(ink) = drawn.ink {
                        stroke(canvas, strike_line(&ink, TODO_X + indent), STRIKE_WIDTH);
                    }
                }
            } else {
                fonts.todo.draw(line, origin + Point::new(indent, 0), canvas)?;
            }
            y += TODO_LINE_HEIGHT;
        }
        y += TODO_ITEM_GAP;
    }
    Ok(())
}

/// Horizontal strike through a line whose ink box is `ink`, from `start_x`
/// to the right edge of the ink.
///
/// The row is kept strictly inside the ink box.
pub fn strike_line(ink: &Rectangle, start_x: i32) -> Line {
    let top = ink.top_left.y;
    let bottom = top + ink.size.height as i32;
    let y = ((top + bottom) / 2 - STRIKE_RAISE)
        .max(top + 1)
        .min(bottom - 1);
    let end_x = ink.top_left.x + ink.size.width as i32 - 1;
    Line::new(Point::new(start_x, y), Point::new(end_x, y))
}
