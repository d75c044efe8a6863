use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use log::info;
use simplelog::{Config, LevelFilter, SimpleLogger};

use inkpane::prelude::*;

/// Draw the homepage or the boot splash on the e-paper panel
#[derive(Debug, Parser)]
#[command(name = "inkpane", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Write the frame to this PNG instead of driving the panel
    #[arg(long, global = true, value_name = "PNG")]
    preview: Option<PathBuf>,

    /// Port of the settings page shown in the header
    #[arg(long, global = true, default_value_t = inkpane::config::DEFAULT_SETTINGS_PORT)]
    settings_port: u16,

    /// spidev node the panel is attached to
    #[arg(long, global = true, default_value = "/dev/spidev0.0")]
    spi: String,

    /// GPIO character device holding the control lines
    #[arg(long, global = true, default_value = "/dev/gpiochip0")]
    gpiochip: String,

    /// Reset line offset
    #[arg(long, global = true, default_value_t = 17)]
    rst: u32,

    /// Data/command line offset
    #[arg(long, global = true, default_value_t = 25)]
    dc: u32,

    /// Busy line offset
    #[arg(long, global = true, default_value_t = 24)]
    busy: u32,

    /// Panel power line offset
    #[arg(long, global = true, default_value_t = 18)]
    pwr: u32,

    /// More logging; repeat for trace output
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Header, todo list and photo or news
    Render {
        /// Homepage payload as JSON
        json: String,
    },
    /// Centered boot message
    Boot {
        /// Boot payload as JSON, e.g. '{"message":"Starting"}'
        json: String,
    },
}

enum Screen {
    Home(Payload),
    Boot(String),
}

impl Cli {
    fn wiring(&self) -> Wiring {
        Wiring {
            spi_path: self.spi.clone(),
            gpio_chip: self.gpiochip.clone(),
            rst: self.rst,
            dc: self.dc,
            busy: self.busy,
            pwr: self.pwr,
            ..Wiring::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::init(level, Config::default())?;

    // Parse before touching the panel so a bad payload leaves it untouched
    let screen = match &cli.command {
        Command::Render { json } => {
            Screen::Home(Payload::from_json(json).context("parsing render payload")?)
        }
        Command::Boot { json } => Screen::Boot(
            BootPayload::from_json(json)
                .context("parsing boot payload")?
                .message()
                .to_string(),
        ),
    };

    let fonts = Fonts::default();
    let settings = Settings {
        settings_port: cli.settings_port,
    };
    let composer = Composer::new(&fonts, &DitheringAdapter, &settings);
    let build = || match &screen {
        Screen::Home(payload) => composer.homepage(payload),
        Screen::Boot(message) => composer.boot(message),
    };

    match &cli.preview {
        Some(path) => {
            info!("previewing into {}", path.display());
            present(&mut PngPreview::new(path), build)?;
        }
        None => hardware::refresh(&cli.wiring(), build)?,
    }
    Ok(())
}

#[cfg(target_os = "linux")]
mod hardware {
    use anyhow::Context;
    use linux_embedded_hal::{
        gpio_cdev::{Chip, LineRequestFlags},
        spidev::{SpiModeFlags, SpidevOptions},
        CdevPin, Delay, SpidevDevice,
    };
    use log::info;

    use inkpane::prelude::*;

    /// Opens the HAT, runs one refresh and releases everything again
    pub fn refresh(wiring: &Wiring, build: impl FnOnce() -> Result<Canvas>) -> anyhow::Result<()> {
        let mut spi = SpidevDevice::open(&wiring.spi_path)
            .with_context(|| format!("opening SPI device {}", wiring.spi_path))?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(wiring.spi_hz)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options).context("configuring SPI")?;

        let mut chip = Chip::new(&wiring.gpio_chip)
            .with_context(|| format!("opening GPIO chip {}", wiring.gpio_chip))?;
        // Held high for as long as the panel is in use
        let _pwr = line(&mut chip, wiring.pwr, LineRequestFlags::OUTPUT, 1, "inkpane-pwr")?;
        let rst = line(&mut chip, wiring.rst, LineRequestFlags::OUTPUT, 1, "inkpane-rst")?;
        let dc = line(&mut chip, wiring.dc, LineRequestFlags::OUTPUT, 0, "inkpane-dc")?;
        let busy = line(&mut chip, wiring.busy, LineRequestFlags::INPUT, 0, "inkpane-busy")?;

        info!(
            "panel on {} (rst {}, dc {}, busy {}, pwr {})",
            wiring.spi_path, wiring.rst, wiring.dc, wiring.busy, wiring.pwr
        );
        let mut epd = Epd4in26::new(spi, busy, dc, rst, Delay {});
        present(&mut epd, build)?;
        Ok(())
    }

    fn line(
        chip: &mut Chip,
        offset: u32,
        flags: LineRequestFlags,
        default: u8,
        consumer: &str,
    ) -> anyhow::Result<CdevPin> {
        let handle = chip
            .get_line(offset)
            .with_context(|| format!("getting line {offset}"))?
            .request(flags, default, consumer)
            .with_context(|| format!("requesting line {offset} as {consumer}"))?;
        CdevPin::new(handle).with_context(|| format!("creating pin for line {offset}"))
    }
}

#[cfg(not(target_os = "linux"))]
mod hardware {
    use inkpane::prelude::*;

    pub fn refresh(
        _wiring: &Wiring,
        _build: impl FnOnce() -> Result<Canvas>,
    ) -> anyhow::Result<()> {
        anyhow::bail!("driving the panel needs Linux spidev and GPIO; use --preview")
    }
}
