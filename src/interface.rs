//! SPI command/data interface shared by the panel drivers
use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;
use log::debug;

use crate::driver::DriverError;

/// Linux spidev rejects transfers above its default 4 KiB buffer.
const MAX_TRANSFER: usize = 4096;

/// How often the busy line is sampled
const BUSY_POLL_MS: u32 = 10;

/// Connection to the controller: SPI bus plus the busy, data/command and reset lines
pub(crate) struct SpiDisplayInterface<SPI, BSY, DC, RST> {
    spi: SPI,
    /// High while the controller is busy
    busy: BSY,
    /// Low for commands, high for data
    dc: DC,
    /// Active low
    rst: RST,
}

impl<SPI, BSY, DC, RST> SpiDisplayInterface<SPI, BSY, DC, RST>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST) -> Self {
        SpiDisplayInterface { spi, busy, dc, rst }
    }

    /// Send a bare command byte
    pub fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(&[command])
            .map_err(|_| DisplayError::BusWriteError)
    }

    /// Send data bytes, split into spidev-sized transfers
    pub fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        for chunk in data.chunks(MAX_TRANSFER) {
            self.spi
                .write(chunk)
                .map_err(|_| DisplayError::BusWriteError)?;
        }
        Ok(())
    }

    /// Send a command followed by its data
    pub fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Send the same data byte `repetitions` times
    pub fn data_x_times(&mut self, value: u8, repetitions: u32) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        let chunk = [value; MAX_TRANSFER];
        let mut remaining = repetitions as usize;
        while remaining > 0 {
            let n = remaining.min(MAX_TRANSFER);
            self.spi
                .write(&chunk[..n])
                .map_err(|_| DisplayError::BusWriteError)?;
            remaining -= n;
        }
        Ok(())
    }

    /// Toggle the reset line: high, low, high
    pub fn hard_reset(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        debug!("hard reset");
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(20);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(2);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(20);
        Ok(())
    }

    /// Poll the busy line until it drops or `timeout_ms` elapses
    pub fn wait_until_idle(
        &mut self,
        delay: &mut impl DelayNs,
        timeout_ms: u32,
    ) -> Result<(), DriverError> {
        let mut waited_ms = 0;
        while self.busy.is_high().map_err(|_| DriverError::BusyPin)? {
            if waited_ms >= timeout_ms {
                return Err(DriverError::BusyTimeout { waited_ms });
            }
            delay.delay_ms(BUSY_POLL_MS);
            waited_ms += BUSY_POLL_MS;
        }
        debug!("busy released after {} ms", waited_ms);
        Ok(())
    }
}
