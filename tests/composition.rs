use std::path::Path;

use embedded_graphics::{prelude::*, primitives::Rectangle};
use image::{GrayImage, Luma};
use inkpane::prelude::*;
use inkpane::render::{IMAGE_PANE, NEWS_X, TODO_LINE_HEIGHT, TODO_TOP};

/// Keeps the last frame it was given and the order of calls
#[derive(Default)]
struct RecordingDriver {
    calls: Vec<&'static str>,
    frame: Option<Vec<u8>>,
}

impl EpdDriver for RecordingDriver {
    fn initialize(&mut self) -> std::result::Result<(), DriverError> {
        self.calls.push("initialize");
        Ok(())
    }

    fn clear(&mut self) -> std::result::Result<(), DriverError> {
        self.calls.push("clear");
        Ok(())
    }

    fn push(&mut self, frame: &[u8]) -> std::result::Result<(), DriverError> {
        self.calls.push("push");
        self.frame = Some(frame.to_vec());
        Ok(())
    }

    fn sleep(&mut self) -> std::result::Result<(), DriverError> {
        self.calls.push("sleep");
        Ok(())
    }
}

fn frame_canvas(frame: &[u8]) -> Canvas {
    let mut canvas = Canvas::new();
    canvas.get_mut_buffer().copy_from_slice(frame);
    canvas
}

fn render(json: &str) -> (RecordingDriver, Canvas) {
    let fonts = Fonts::default();
    let settings = Settings::default();
    let composer = Composer::new(&fonts, &DitheringAdapter, &settings);
    let payload = Payload::from_json(json).unwrap();

    let mut driver = RecordingDriver::default();
    present(&mut driver, || composer.homepage(&payload)).unwrap();
    let canvas = frame_canvas(driver.frame.as_deref().unwrap());
    (driver, canvas)
}

fn right_pane() -> Rectangle {
    Rectangle::new(Point::new(NEWS_X, 56), Size::new(380, 424))
}

fn write_gray_png(dir: &Path, width: u32, height: u32) -> std::path::PathBuf {
    let path = dir.join("photo.png");
    GrayImage::from_fn(width, height, |x, _| Luma([(x * 255 / width) as u8]))
        .save(&path)
        .unwrap();
    path
}

fn three_todos(first_done: bool) -> String {
    format!(
        r#"{{
            "hostname": "frame",
            "time": "08:15",
            "todos": [
                {{"text": "Pick up the dry cleaning before six pm", "done": {first_done}}},
                {{"text": "Water the plants"}},
                {{"text": "Call mum", "done": false}}
            ],
            "rss": {{"title": "Rain expected", "text": "Bring an umbrella."}}
        }}"#
    )
}

#[test]
fn homepage_with_todos_and_news() {
    let (driver, done) = render(&three_todos(true));
    let (_, open) = render(&three_todos(false));

    assert_eq!(driver.calls, ["initialize", "clear", "push", "sleep"]);
    assert_eq!(driver.frame.as_ref().unwrap().len(), 48_000);
    assert!(done.black_pixels_in(&right_pane()) > 0);

    // first item wraps to two lines, the strike is on the first only
    let row = |n: i32| {
        Rectangle::new(
            Point::new(0, TODO_TOP + n * TODO_LINE_HEIGHT),
            Size::new(400, TODO_LINE_HEIGHT as u32),
        )
    };
    assert!(open.black_pixels_in(&row(1)) > 0);
    assert!(done.black_pixels_in(&row(0)) > open.black_pixels_in(&row(0)));
    assert_eq!(done.black_pixels_in(&row(1)), open.black_pixels_in(&row(1)));

    let rest = Rectangle::new(
        Point::new(0, TODO_TOP + 2 * TODO_LINE_HEIGHT),
        Size::new(400, 200),
    );
    assert!(open.black_pixels_in(&rest) > 0);
    assert_eq!(done.black_pixels_in(&rest), open.black_pixels_in(&rest));
}

#[test]
fn image_wins_over_news() {
    let dir = tempfile::tempdir().unwrap();
    let photo = write_gray_png(dir.path(), 1000, 500);
    let with_image = format!(
        r#"{{"hostname":"frame","time":"08:15","image":{:?},"rss":{{"title":"Headline","text":"Body"}}}}"#,
        photo.display().to_string()
    );
    let with_image_only = format!(
        r#"{{"hostname":"frame","time":"08:15","image":{:?}}}"#,
        photo.display().to_string()
    );

    let (_, both) = render(&with_image);
    let (_, only) = render(&with_image_only);
    assert_eq!(both, only);

    // 1000x500 fits the pane as 380x190, centered vertically
    let above = Rectangle::new(IMAGE_PANE.top_left, Size::new(380, 112));
    assert_eq!(both.black_pixels_in(&above), 0);
    let photo_area = Rectangle::new(IMAGE_PANE.top_left + Point::new(0, 112), Size::new(380, 190));
    assert!(both.black_pixels_in(&photo_area) > 0);
}

#[test]
fn unreadable_image_leaves_pane_blank() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("not-an-image.png");
    std::fs::write(&bogus, b"definitely not a png").unwrap();
    let json = format!(
        r#"{{"hostname":"frame","time":"08:15","image":{:?},"rss":{{"title":"Headline","text":"Body"}}}}"#,
        bogus.display().to_string()
    );

    let (driver, canvas) = render(&json);
    assert_eq!(driver.calls, ["initialize", "clear", "push", "sleep"]);
    let pane_below_header = Rectangle::new(Point::new(NEWS_X, 50), Size::new(380, 430));
    assert_eq!(canvas.black_pixels_in(&pane_below_header), 0);

    let (_, without_image) = render(
        r#"{"hostname":"frame","time":"08:15","todos":[{"text":"Buy milk"}]}"#,
    );
    let (_, with_bad_image) = render(&format!(
        r#"{{"hostname":"frame","time":"08:15","todos":[{{"text":"Buy milk"}}],"image":{:?}}}"#,
        bogus.display().to_string()
    ));
    assert_eq!(with_bad_image, without_image);
}

#[test]
fn no_todos_and_no_right_content() {
    let (_, canvas) = render(r#"{"hostname":"frame","time":"08:15","todos":[]}"#);
    assert_eq!(canvas.black_pixels_in(&right_pane()), 0);
    let todos = Rectangle::new(Point::new(0, TODO_TOP), Size::new(400, 360));
    assert_eq!(canvas.black_pixels_in(&todos), 0);
}

#[test]
fn done_state_only_changes_the_strike() {
    let (_, open) = render(r#"{"todos":[{"text":"Buy milk"}]}"#);
    let (_, done) = render(r#"{"todos":[{"text":"Buy milk","done":true}]}"#);
    let first_line = Rectangle::new(
        Point::new(0, TODO_TOP),
        Size::new(400, TODO_LINE_HEIGHT as u32),
    );
    assert!(done.black_pixels_in(&first_line) > open.black_pixels_in(&first_line));

    let elsewhere = Rectangle::new(Point::new(0, 0), Size::new(800, TODO_TOP as u32));
    assert_eq!(
        done.black_pixels_in(&elsewhere),
        open.black_pixels_in(&elsewhere)
    );
}

#[test]
fn boot_message_is_centered() {
    let fonts = Fonts::default();
    let settings = Settings::default();
    let composer = Composer::new(&fonts, &DitheringAdapter, &settings);
    let message = BootPayload::from_json("{}").unwrap();
    assert_eq!(message.message(), "Booting...");

    let mut driver = RecordingDriver::default();
    present(&mut driver, || composer.boot(message.message())).unwrap();
    let canvas = frame_canvas(driver.frame.as_deref().unwrap());

    let total = canvas.black_pixels_in(&canvas.bounding_box());
    assert!(total > 0);
    let left = Rectangle::new(Point::zero(), Size::new(400, 480));
    let right = Rectangle::new(Point::new(400, 0), Size::new(400, 480));
    let (l, r) = (canvas.black_pixels_in(&left), canvas.black_pixels_in(&right));
    assert!(l > 0 && r > 0);
}

#[test]
fn preview_driver_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("frame.png");
    let fonts = Fonts::default();
    let settings = Settings::default();
    let composer = Composer::new(&fonts, &DitheringAdapter, &settings);

    let mut preview = PngPreview::new(&out);
    present(&mut preview, || composer.boot("Hello")).unwrap();
    assert_eq!(preview.state(), PanelState::Asleep);

    let written = image::open(&out).unwrap().to_luma8();
    assert_eq!(written.dimensions(), (800, 480));
}

#[test]
fn malformed_payload_is_rejected() {
    assert!(matches!(
        Payload::from_json("{not json"),
        Err(Error::Payload(_))
    ));
}
