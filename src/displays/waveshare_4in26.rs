use super::{buffer_len, Display};
use crate::cmd::Cmd;
use crate::color::Color;
use crate::driver::{DriverError, EpdDriver, InitStep, PanelState};
use crate::flag::Flag;
use crate::interface::SpiDisplayInterface;
use core::convert::Infallible;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::Rectangle};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;
use log::debug;

/// Display width for 4.26in display
pub const WIDTH: u16 = 800;
/// Display height for 4.26in display
pub const HEIGHT: u16 = 480;
/// Bytes in one full frame
pub const BUFFER_LEN: usize = buffer_len(WIDTH as usize, HEIGHT as usize);

/// A full refresh takes a few seconds; anything past this is a wiring fault.
pub const BUSY_TIMEOUT_MS: u32 = 20_000;

/// Initialization sequence for the 4.26in panel full refresh
pub const INIT_SEQUENCE: &[InitStep] = &[
    InitStep::WaitUntilIdle,
    InitStep::SWReset,
    InitStep::DelayMs(10),
    InitStep::WaitUntilIdle,
    InitStep::CmdData(Cmd::TEMP_CONTROL, &[Flag::INTERNAL_TEMP_SENSOR]),
    // soft start, values from the panel vendor
    InitStep::CmdData(Cmd::BOOSTER_SOFT_START, &[0xAE, 0xC7, 0xC3, 0xC0, 0x80]),
    InitStep::DriverControl,
    InitStep::CmdData(Cmd::BORDER_WAVEFORM_CTRL, &[Flag::BORDER_WAVEFORM_VBD_WHITE]),
    InitStep::CmdData(Cmd::DATA_ENTRY_MODE, &[Flag::DATA_ENTRY_INCRY_INCRX]),
    InitStep::UseFullFrame,
    InitStep::WaitUntilIdle,
];

/// Waveshare 4.26" 800x480 panel (SSD1677 controller)
pub struct Epd4in26<SPI, BSY, DC, RST, DELAY> {
    interface: SpiDisplayInterface<SPI, BSY, DC, RST>,
    delay: DELAY,
    state: PanelState,
}

impl<SPI, BSY, DC, RST, DELAY> Epd4in26<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Create the driver from a concrete SPI device, pins and delay source.
    /// Nothing is sent to the panel until [`EpdDriver::initialize`].
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, delay: DELAY) -> Self {
        debug!("creating new Epd4in26 instance");
        Self {
            interface: SpiDisplayInterface::new(spi, busy, dc, rst),
            delay,
            state: PanelState::Uninitialized,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> PanelState {
        self.state
    }

    fn wait_until_idle(&mut self) -> Result<(), DriverError> {
        self.interface
            .wait_until_idle(&mut self.delay, BUSY_TIMEOUT_MS)
    }

    fn turn_on_display(&mut self) -> Result<(), DriverError> {
        debug!("refreshing 4.26\" panel");
        self.interface
            .cmd_with_data(Cmd::DISPLAY_UPDATE_CTRL2, &[Flag::DISPLAY_MODE_LOAD_TEMP_1])?;
        self.interface.cmd(Cmd::MASTER_ACTIVATE)?;
        self.wait_until_idle()
    }

    fn use_full_frame(&mut self) -> Result<(), DriverError> {
        self.set_ram_area(0, 0, WIDTH - 1, HEIGHT - 1)?;
        self.set_ram_counter(0, 0)
    }

    // The SSD1677 addresses x in pixels (10 bit), not in bytes.
    fn set_ram_area(
        &mut self,
        start_x: u16,
        start_y: u16,
        end_x: u16,
        end_y: u16,
    ) -> Result<(), DriverError> {
        debug!(
            "set_ram_area: x {}-{}, y {}-{}",
            start_x, end_x, start_y, end_y
        );
        self.interface.cmd_with_data(
            Cmd::SET_RAMXPOS,
            &[
                (start_x & 0xFF) as u8,
                ((start_x >> 8) & 0x03) as u8,
                (end_x & 0xFF) as u8,
                ((end_x >> 8) & 0x03) as u8,
            ],
        )?;
        self.interface.cmd_with_data(
            Cmd::SET_RAMYPOS,
            &[
                (start_y & 0xFF) as u8,
                ((start_y >> 8) & 0xFF) as u8,
                (end_y & 0xFF) as u8,
                ((end_y >> 8) & 0xFF) as u8,
            ],
        )?;
        Ok(())
    }

    fn set_ram_counter(&mut self, x: u16, y: u16) -> Result<(), DriverError> {
        self.interface.cmd_with_data(
            Cmd::SET_RAMX_COUNTER,
            &[(x & 0xFF) as u8, ((x >> 8) & 0x03) as u8],
        )?;
        self.interface.cmd_with_data(
            Cmd::SET_RAMY_COUNTER,
            &[(y & 0xFF) as u8, ((y >> 8) & 0xFF) as u8],
        )?;
        Ok(())
    }

    fn fill_ram(&mut self, command: u8, color: Color) -> Result<(), DriverError> {
        self.set_ram_counter(0, 0)?;
        self.interface.cmd(command)?;
        self.interface
            .data_x_times(color.get_byte_value(), BUFFER_LEN as u32)?;
        Ok(())
    }
}

impl<SPI, BSY, DC, RST, DELAY> EpdDriver for Epd4in26<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn initialize(&mut self) -> Result<(), DriverError> {
        debug!("powering up 4.26\" panel");
        self.interface.hard_reset(&mut self.delay)?;

        for step in INIT_SEQUENCE {
            debug!("init step: {:?}", step);
            match *step {
                InitStep::SWReset => {
                    self.interface.cmd(Cmd::SW_RESET)?;
                }
                InitStep::DelayMs(ms) => {
                    self.delay.delay_ms(u32::from(ms));
                }
                InitStep::WaitUntilIdle => {
                    self.wait_until_idle()?;
                }
                InitStep::CmdData(c, d) => {
                    self.interface.cmd_with_data(c, d)?;
                }
                InitStep::DriverControl => {
                    let h = HEIGHT - 1;
                    debug!("InitStep::DriverControl - height={}", h);
                    self.interface.cmd_with_data(
                        Cmd::DRIVER_OUTPUT_CTRL,
                        &[(h & 0xFF) as u8, (h >> 8) as u8, Flag::GATE_SCAN_INTERLACED],
                    )?;
                }
                InitStep::UseFullFrame => {
                    self.use_full_frame()?;
                }
            }
        }

        self.state = PanelState::Initialized;
        debug!("init sequence complete");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DriverError> {
        self.state.require("clear", &[PanelState::Initialized])?;
        debug!("clearing 4.26\" panel");
        self.fill_ram(Cmd::WRITE_BW_DATA, Color::White)?;
        self.fill_ram(Cmd::WRITE_RED_DATA, Color::White)?;
        self.turn_on_display()
    }

    fn push(&mut self, frame: &[u8]) -> Result<(), DriverError> {
        self.state.require("push", &[PanelState::Initialized])?;
        if frame.len() != BUFFER_LEN {
            return Err(DriverError::FrameSize {
                expected: BUFFER_LEN,
                actual: frame.len(),
            });
        }
        debug!("writing BW RAM to 4.26\" panel");
        self.set_ram_counter(0, 0)?;
        self.interface.cmd_with_data(Cmd::WRITE_BW_DATA, frame)?;
        self.turn_on_display()?;
        self.state = PanelState::Displayed;
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), DriverError> {
        self.state.require(
            "sleep",
            &[PanelState::Initialized, PanelState::Displayed],
        )?;
        debug!("powering down 4.26\" panel");
        self.interface
            .cmd_with_data(Cmd::DEEP_SLEEP, &[Flag::DEEP_SLEEP_MODE_2])?;
        // the controller needs time to discharge before power is cut
        self.delay.delay_ms(2_000);
        self.state = PanelState::Asleep;
        Ok(())
    }
}

/// Graphics buffer for the 4.26" display, the canvas every pass draws on
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    buffer: [u8; BUFFER_LEN],
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .finish_non_exhaustive()
    }
}

impl Canvas {
    /// Create a blank white canvas
    pub fn new() -> Self {
        Self {
            buffer: [Color::White.get_byte_value(); BUFFER_LEN],
        }
    }

    /// Color at `point`, `None` outside the canvas
    pub fn pixel(&self, point: Point) -> Option<Color> {
        self.pixel_helper(WIDTH.into(), HEIGHT.into(), point)
    }

    /// Number of black pixels inside `area` (clipped to the canvas)
    pub fn black_pixels_in(&self, area: &Rectangle) -> usize {
        area.intersection(&self.bounding_box())
            .points()
            .filter(|&p| self.pixel(p) == Some(Color::Black))
            .count()
    }
}

impl DrawTarget for Canvas {
    type Error = Infallible;
    type Color = BinaryColor;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for p in pixels.into_iter() {
            self.draw_helper(WIDTH.into(), HEIGHT.into(), p)?;
        }
        Ok(())
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(WIDTH.into(), HEIGHT.into())
    }
}

impl Display for Canvas {
    fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    fn get_mut_buffer(&mut self) -> &mut [u8] {
        &mut self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Black;
    use core::cell::RefCell;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};
    use embedded_hal::spi::Operation;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum Wire {
        Cmd(u8),
        Data(Vec<u8>),
    }

    #[derive(Default)]
    struct Bus {
        dc_high: bool,
        wire: Vec<Wire>,
        busy_reads_left: u32,
        busy_forever: bool,
    }

    type Shared = Rc<RefCell<Bus>>;

    struct MockSpi(Shared);
    struct MockDc(Shared);
    struct MockBusy(Shared);
    struct MockPin;
    struct NoDelay;

    impl embedded_hal::spi::ErrorType for MockSpi {
        type Error = Infallible;
    }

    impl SpiDevice for MockSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            let mut bus = self.0.borrow_mut();
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    if bus.dc_high {
                        match bus.wire.last_mut() {
                            Some(Wire::Data(d)) => d.extend_from_slice(bytes),
                            _ => bus.wire.push(Wire::Data(bytes.to_vec())),
                        }
                    } else {
                        for &b in bytes.iter() {
                            bus.wire.push(Wire::Cmd(b));
                        }
                    }
                }
            }
            Ok(())
        }
    }

    impl embedded_hal::digital::ErrorType for MockDc {
        type Error = Infallible;
    }

    impl OutputPin for MockDc {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().dc_high = false;
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().dc_high = true;
            Ok(())
        }
    }

    impl embedded_hal::digital::ErrorType for MockBusy {
        type Error = Infallible;
    }

    impl InputPin for MockBusy {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            let mut bus = self.0.borrow_mut();
            if bus.busy_forever {
                return Ok(true);
            }
            if bus.busy_reads_left > 0 {
                bus.busy_reads_left -= 1;
                return Ok(true);
            }
            Ok(false)
        }
        fn is_low(&mut self) -> Result<bool, Infallible> {
            self.is_high().map(|h| !h)
        }
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn panel() -> (Epd4in26<MockSpi, MockBusy, MockDc, MockPin, NoDelay>, Shared) {
        let bus = Shared::default();
        let epd = Epd4in26::new(
            MockSpi(bus.clone()),
            MockBusy(bus.clone()),
            MockDc(bus.clone()),
            MockPin,
            NoDelay,
        );
        (epd, bus)
    }

    fn commands(bus: &Shared) -> Vec<u8> {
        bus.borrow()
            .wire
            .iter()
            .filter_map(|w| match w {
                Wire::Cmd(c) => Some(*c),
                Wire::Data(_) => None,
            })
            .collect()
    }

    #[test]
    fn buffer_clear() {
        let mut display = Canvas::new();

        for &byte in display.buffer().iter() {
            assert_eq!(byte, Color::White.get_byte_value());
        }

        display.clear_buffer(Color::Black);

        for &byte in display.buffer().iter() {
            assert_eq!(byte, Color::Black.get_byte_value());
        }
    }

    #[test]
    fn canvas_is_800_by_480_one_bit() {
        let display = Canvas::new();
        assert_eq!(display.size(), Size::new(800, 480));
        assert_eq!(display.buffer().len(), 48_000);
    }

    #[test]
    fn graphics_line_sets_first_byte_black() {
        let mut display = Canvas::new();

        let _ = Line::new(Point::new(0, 0), Point::new(7, 0))
            .into_styled(PrimitiveStyle::with_stroke(Black, 1))
            .draw(&mut display);

        let buffer = display.buffer();

        assert_eq!(buffer[0], Color::Black.get_byte_value());

        for &byte in buffer.iter().skip(1) {
            assert_eq!(byte, Color::White.get_byte_value());
        }
        assert_eq!(
            display.black_pixels_in(&Rectangle::new(Point::zero(), Size::new(800, 480))),
            8
        );
    }

    #[test]
    fn full_pass_emits_commands_in_order() {
        let (mut epd, bus) = panel();
        let frame = Canvas::new();

        epd.initialize().unwrap();
        epd.clear().unwrap();
        epd.push(frame.buffer()).unwrap();
        epd.sleep().unwrap();

        let cmds = commands(&bus);
        assert_eq!(cmds.first(), Some(&Cmd::SW_RESET));
        assert_eq!(cmds.last(), Some(&Cmd::DEEP_SLEEP));
        // clear refreshes once, push refreshes once
        assert_eq!(
            cmds.iter().filter(|&&c| c == Cmd::MASTER_ACTIVATE).count(),
            2
        );
        assert_eq!(epd.state(), PanelState::Asleep);
    }

    #[test]
    fn init_sends_height_to_driver_output_control() {
        let (mut epd, bus) = panel();
        epd.initialize().unwrap();

        let bus = bus.borrow();
        let pos = bus
            .wire
            .iter()
            .position(|w| *w == Wire::Cmd(Cmd::DRIVER_OUTPUT_CTRL))
            .unwrap();
        assert_eq!(bus.wire[pos + 1], Wire::Data(vec![0xDF, 0x01, 0x02]));
    }

    #[test]
    fn push_transfers_the_whole_frame() {
        let (mut epd, bus) = panel();
        let mut frame = Canvas::new();
        frame.clear_buffer(Color::Black);

        epd.initialize().unwrap();
        epd.push(frame.buffer()).unwrap();

        let bus = bus.borrow();
        let pos = bus
            .wire
            .iter()
            .rposition(|w| *w == Wire::Cmd(Cmd::WRITE_BW_DATA))
            .unwrap();
        match &bus.wire[pos + 1] {
            Wire::Data(d) => {
                assert_eq!(d.len(), BUFFER_LEN);
                assert!(d.iter().all(|&b| b == 0x00));
            }
            other => panic!("expected frame data, got {other:?}"),
        }
    }

    #[test]
    fn push_before_initialize_is_rejected() {
        let (mut epd, bus) = panel();
        let frame = Canvas::new();

        let err = epd.push(frame.buffer()).unwrap_err();
        assert!(matches!(err, DriverError::OutOfOrder { op: "push", .. }));
        assert!(bus.borrow().wire.is_empty());
    }

    #[test]
    fn short_frame_is_rejected() {
        let (mut epd, _bus) = panel();
        epd.initialize().unwrap();

        let err = epd.push(&[0u8; 10]).unwrap_err();
        assert!(matches!(
            err,
            DriverError::FrameSize {
                expected: BUFFER_LEN,
                actual: 10
            }
        ));
    }

    #[test]
    fn busy_line_is_polled_until_released() {
        let (mut epd, bus) = panel();
        bus.borrow_mut().busy_reads_left = 5;

        epd.initialize().unwrap();
        assert_eq!(bus.borrow().busy_reads_left, 0);
    }

    #[test]
    fn stuck_busy_line_times_out() {
        let (mut epd, bus) = panel();
        bus.borrow_mut().busy_forever = true;

        let err = epd.initialize().unwrap_err();
        assert!(matches!(
            err,
            DriverError::BusyTimeout {
                waited_ms: BUSY_TIMEOUT_MS
            }
        ));
        assert_eq!(epd.state(), PanelState::Uninitialized);
    }
}
