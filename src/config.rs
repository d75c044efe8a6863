//! Render settings and panel wiring.

/// Port the companion web server serves its settings page on
pub const DEFAULT_SETTINGS_PORT: u16 = 3000;

/// Values that shape the composed frame but do not come from the payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Port shown in the header's settings URL
    pub settings_port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            settings_port: DEFAULT_SETTINGS_PORT,
        }
    }
}

impl Settings {
    /// URL of the settings page on `hostname`
    pub fn settings_url(&self, hostname: &str) -> String {
        format!("http://{hostname}:{}/settings.html", self.settings_port)
    }
}

/// Where the panel HAT is attached. Defaults match the Waveshare e-Paper
/// HAT on a Raspberry Pi 40-pin header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wiring {
    /// spidev node, chip select is handled by the kernel
    pub spi_path: String,
    /// SPI clock in Hz
    pub spi_hz: u32,
    /// GPIO character device
    pub gpio_chip: String,
    /// Reset line offset
    pub rst: u32,
    /// Data/command line offset
    pub dc: u32,
    /// Busy line offset
    pub busy: u32,
    /// Panel power enable line offset
    pub pwr: u32,
}

impl Default for Wiring {
    fn default() -> Self {
        Self {
            spi_path: "/dev/spidev0.0".to_string(),
            spi_hz: 4_000_000,
            gpio_chip: "/dev/gpiochip0".to_string(),
            rst: 17,
            dc: 25,
            busy: 24,
            pwr: 18,
        }
    }
}
