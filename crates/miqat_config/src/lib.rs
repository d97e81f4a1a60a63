//! Configuration for the miqat tools.
//!
//! A single TOML file with `[location]`, `[prayer]`, `[clock]`, `[qibla]`
//! and `[geolocation]` tables, every key optional. Lookup order: explicit
//! path, `$MIQAT_CONFIG`, the platform config directory, built-in
//! defaults.
//!
//! ```no_run
//! use miqat_config::MiqatConfig;
//!
//! let config = MiqatConfig::discover(None).unwrap();
//! let params = config.prayer_params().unwrap();
//! println!("{}", params.convention.name());
//! ```

mod error;
mod loader;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    CONFIG_ENV, CONFIG_FILE_NAME, ConfigSource, platform_config_path, resolve_source,
};
pub use settings::{
    ClockSettings, GeolocationSettings, LocationSettings, MiqatConfig, PrayerSettings,
    QiblaSettings,
};
