mod render;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use miqat_clock::{AnchoredClock, ClockTicker, PrayerClock, SystemClock, WallClock};
use miqat_config::MiqatConfig;
use miqat_device::{
    FixedLocationProvider, HeadingSource, LocationService, OrientationEvent, PlatformCapabilities,
};
use miqat_prayer::PrayerTimeCalculator;
use miqat_qibla::QiblaCompass;
use miqat_solar::{Coordinate, SolarDay};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::render::SolarReport;

#[derive(Parser)]
#[command(name = "miqat", about = "Prayer times, prayer clock and Qibla direction", version)]
struct Cli {
    /// Config file (default: $MIQAT_CONFIG, then the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Latitude in degrees, north positive
    #[arg(long, global = true, allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude in degrees, east positive
    #[arg(long, global = true, allow_negative_numbers = true)]
    lon: Option<f64>,
    /// School label; anything containing "hanafi" selects Hanafi Asr
    #[arg(long, global = true)]
    madhab: Option<String>,
    /// Minutes east of UTC used for local dates and display
    #[arg(long, global = true, allow_negative_numbers = true)]
    utc_offset: Option<i32>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prayer times for one date
    Times {
        /// Date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Prayer times for consecutive dates
    Week {
        /// First date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Number of days
        #[arg(long, default_value = "7")]
        days: u32,
    },
    /// Current and next prayer, refreshed every tick
    Clock {
        /// Print one state and exit
        #[arg(long)]
        once: bool,
        /// Start the clock at this instant (RFC 3339) instead of now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Qibla bearing, optionally relative to a device heading
    Qibla {
        /// Compass heading in degrees clockwise from north
        #[arg(long, allow_negative_numbers = true, conflicts_with = "alpha")]
        heading: Option<f64>,
        /// Orientation alpha in degrees (counter-clockwise)
        #[arg(long, allow_negative_numbers = true)]
        alpha: Option<f64>,
    },
    /// Solar position, transit, sunrise and sunset
    Solar {
        /// Date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file plus command-line overrides.
fn load_config(cli: &Cli) -> Result<MiqatConfig> {
    let mut config = MiqatConfig::discover(cli.config.as_deref()).context("loading config")?;
    if let Some(lat) = cli.lat {
        config.location.latitude = Some(lat);
    }
    if let Some(lon) = cli.lon {
        config.location.longitude = Some(lon);
    }
    if let Some(m) = &cli.madhab {
        config.prayer.madhab = Some(m.clone());
    }
    if let Some(offset) = cli.utc_offset {
        config.location.utc_offset_minutes = Some(offset);
    }
    config.validate().context("invalid settings")?;
    Ok(config)
}

/// Coordinate through the location service; `None` when unavailable.
async fn locate(config: &MiqatConfig) -> Result<Option<Coordinate>> {
    let provider = FixedLocationProvider::new(config.coordinate()?);
    let mut service = LocationService::with_options(provider, config.location_options());
    match service.request().await {
        Ok(c) => Ok(Some(c)),
        Err(err) => {
            debug!(error = %err, status = ?service.status(), "no coordinate");
            Ok(None)
        }
    }
}

fn require(coordinate: Option<Coordinate>) -> Result<Coordinate> {
    match coordinate {
        Some(c) => Ok(c),
        None => bail!("no location: pass --lat and --lon or set [location] in the config file"),
    }
}

fn today(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}

async fn run_clock<W: WallClock>(
    clock: PrayerClock,
    wall: W,
    config: &MiqatConfig,
    offset: FixedOffset,
    json: bool,
) -> Result<()> {
    let ticker = ClockTicker::spawn(clock, wall, config.tick_interval());
    let mut rx = ticker.subscribe();
    loop {
        let state = *rx.borrow_and_update();
        if json {
            println!("{}", serde_json::to_string(&state)?);
        } else {
            println!("{}", render::clock_line(&state, offset));
        }
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    if ticker.stop().await.is_none() {
        warn!("clock ticker ended abnormally");
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let offset = config.utc_offset()?;
    let coordinate = locate(&config).await?;
    let params = config.prayer_params()?;
    let calculator = PrayerTimeCalculator::new(params);

    match cli.command {
        Commands::Times { date } => {
            let c = require(coordinate)?;
            let day = calculator.compute(date.unwrap_or_else(|| today(offset)), &c);
            if cli.json {
                println!("{}", render::json(&day)?);
            } else {
                println!("{} ({}, {} Asr)", c, params.convention.name(), params.madhab);
                print!("{}", render::day_table(&day, offset));
            }
        }

        Commands::Week { date, days } => {
            let c = require(coordinate)?;
            let start = date.unwrap_or_else(|| today(offset));
            let week: Vec<_> = calculator.project_range(c, start, days).collect();
            if cli.json {
                println!("{}", render::json(&week)?);
            } else {
                print!("{}", render::week_table(&week, offset));
            }
        }

        Commands::Clock { once, at } => {
            let mut clock = PrayerClock::new(params, offset).with_options(config.clock_options());
            clock.set_coordinate(coordinate);
            clock.set_madhab(Some(params.madhab));
            if once {
                let state = clock.state_at(at.unwrap_or_else(Utc::now));
                if cli.json {
                    println!("{}", render::json(&state)?);
                } else {
                    println!("{}", render::clock_line(&state, offset));
                }
            } else if let Some(at) = at {
                run_clock(clock, AnchoredClock::starting_at(at), &config, offset, cli.json).await?;
            } else {
                run_clock(clock, SystemClock, &config, offset, cli.json).await?;
            }
        }

        Commands::Qibla { heading, alpha } => {
            let c = require(coordinate)?;
            let mut compass =
                QiblaCompass::new(&c).with_tolerance(config.qibla.alignment_tolerance_deg);
            let source = HeadingSource::detect(PlatformCapabilities::default());
            let event = match (heading, alpha) {
                (Some(h), _) => Some(OrientationEvent::compass(h)),
                (None, Some(a)) => Some(OrientationEvent::alpha(a, true)),
                (None, None) => None,
            };
            let reading = match event.and_then(|e| source.heading_for(&e)) {
                Some(h) => compass.on_heading(h),
                None => compass.reading(),
            };
            if cli.json {
                println!("{}", render::json(&reading)?);
            } else {
                println!("{}", render::qibla_text(&reading));
            }
        }

        Commands::Solar { date } => {
            let c = require(coordinate)?;
            let date = date.unwrap_or_else(|| today(offset));
            let day = SolarDay::new(date, c, &params.horizon);
            let report = SolarReport::new(date, &c, &day);
            if cli.json {
                println!("{}", render::json(&report)?);
            } else {
                println!("{}", render::solar_text(&report, offset));
            }
        }
    }

    Ok(())
}
