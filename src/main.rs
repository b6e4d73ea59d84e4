//! FlapWatch: Main Entry Point
//!
//! Hexagonal architecture, single thread, blocking pacing.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Adxl345 (spidev)   StatesFile        MastodonNotifier         │
//! │  (Accelerometer)    (Calibration)     (Notifier)               │
//! │  LogEventSink       ConsoleOperator   LocalClock   Delay       │
//! │  (EventSink)        (Operator)        (Clock)      (DelayNs)   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │   VectorSampler · Calibrator · MonitorLoop · classify  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::convert::Infallible;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{Delay, SpidevDevice};
use log::{LevelFilter, error, info};

use flapwatch::adapters::console::ConsoleOperator;
use flapwatch::adapters::log_sink::LogEventSink;
use flapwatch::adapters::mastodon::MastodonNotifier;
use flapwatch::adapters::states_file::StatesFile;
use flapwatch::adapters::time::LocalClock;
use flapwatch::app::calibrator::Calibrator;
use flapwatch::app::events::AppEvent;
use flapwatch::app::monitor::MonitorLoop;
use flapwatch::app::ports::{CalibrationPort, EventSink};
use flapwatch::config::MonitorConfig;
use flapwatch::sensors::VectorSampler;
use flapwatch::sensors::adxl345::Adxl345;

#[derive(Parser, Debug)]
#[command(
    name = "flapwatch",
    version,
    about = "Watches the cat flap and toots when the cat leaves or comes home"
)]
struct Cli {
    /// Print every averaged measurement
    #[arg(short, long)]
    debug: bool,
    /// Redo calibration of the sensor instead of loading the states file
    #[arg(short, long)]
    calibration: bool,
    /// JSON file overriding the built-in configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Accept the historical single-dash long flags (`-debug`, `-calibration`).
fn normalise_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|arg| match arg.as_str() {
            "-debug" => "--debug".to_owned(),
            "-calibration" => "--calibration".to_owned(),
            _ => arg,
        })
        .collect()
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalise_args(std::env::args()));

    log_builder(cli.debug, env_logger::Env::default()).init();

    match run(&cli) {
        Ok(never) => match never {},
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(1)
        }
    }
}

/// `info` for everything unless `RUST_LOG` says otherwise.  `--debug` lifts
/// only this crate to `debug`, so measurements show up without the HTTP
/// and TLS stacks' debug chatter.
fn log_builder(debug: bool, env: env_logger::Env<'_>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(env.default_filter_or("info"));
    if debug {
        builder.filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Debug);
    }
    builder
}

fn run(cli: &Cli) -> Result<Infallible> {
    info!(" |\\---/| ");
    info!(" | o_o | ");
    info!("  \\_v_ / ");
    info!("FlapWatch v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Configuration ──────────────────────────────────────
    let config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("cannot read config {}", path.display()))?;
            MonitorConfig::from_json(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => MonitorConfig::default(),
    };
    config.validate()?;

    // ── 2. Notifier (fails fast on a missing token) ──────────
    let token = fs::read_to_string(&config.token_file).with_context(|| {
        format!("cannot read access token from {}", config.token_file.display())
    })?;
    let mut notifier = MastodonNotifier::new(&config.mastodon_instance, &token)?;

    // ── 3. Accelerometer ─────────────────────────────────────
    let mut spi = SpidevDevice::open(&config.spi_device)
        .with_context(|| format!("cannot open {}", config.spi_device.display()))?;
    let options = SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(config.spi_clock_hz)
        .mode(SpiModeFlags::SPI_MODE_3)
        .build();
    spi.configure(&options).context("cannot configure SPI")?;
    let adxl = Adxl345::new(spi, config.gravity_range).context("ADXL345 init failed")?;
    let mut sampler = VectorSampler::from_config(adxl, Delay, &config);

    // ── 4. Reference vectors ─────────────────────────────────
    let mut sink = LogEventSink::new();
    let store = StatesFile::new(&config.states_file);
    let refs = if cli.calibration {
        Calibrator::from_config(&config).run(
            &mut sampler,
            &mut ConsoleOperator::stdin(),
            &store,
            &mut sink,
        )?
    } else {
        let refs = store.load().with_context(|| {
            format!(
                "cannot load calibration from {}; rerun with -c to calibrate",
                store.path().display()
            )
        })?;
        sink.emit(&AppEvent::ReferencesLoaded(refs));
        refs
    };

    // ── 5. Monitor forever ───────────────────────────────────
    let monitor = MonitorLoop::from_config(refs, &config).with_trace(cli.debug);
    let err = match monitor.run(&mut sampler, &mut notifier, &LocalClock::new(), &mut sink) {
        Ok(never) => match never {},
        Err(e) => e,
    };
    Err(err).context("accelerometer read failed")
}
