//! Locating, reading and writing the configuration file.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::settings::MiqatConfig;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "MIQAT_CONFIG";

/// File name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Where a config file came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed explicitly; must exist.
    Explicit(PathBuf),
    /// From `$MIQAT_CONFIG`; must exist.
    Environment(PathBuf),
    /// Platform config directory; optional.
    Platform(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(p) | Self::Environment(p) | Self::Platform(p) => p,
        }
    }

    fn required(&self) -> bool {
        !matches!(self, Self::Platform(_))
    }
}

/// `<platform config dir>/miqat/config.toml`, if the platform has one.
pub fn platform_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "miqat").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// First applicable source: explicit path, then `env_value`, then the
/// platform path.
pub fn resolve_source(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    platform: Option<PathBuf>,
) -> Option<ConfigSource> {
    if let Some(p) = explicit {
        return Some(ConfigSource::Explicit(p.to_path_buf()));
    }
    if let Some(v) = env_value.filter(|v| !v.is_empty()) {
        return Some(ConfigSource::Environment(PathBuf::from(v)));
    }
    platform.map(ConfigSource::Platform)
}

impl MiqatConfig {
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read and validate `path`.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load from the first applicable source. A missing platform file
    /// yields defaults; a missing explicit or environment file is an
    /// error.
    pub fn load_from(source: Option<&ConfigSource>) -> ConfigResult<Self> {
        match source {
            Some(s) if s.required() || s.path().exists() => Self::load(s.path()),
            Some(s) => {
                debug!(path = %s.path().display(), "no config file, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Explicit path, `$MIQAT_CONFIG`, platform config dir, defaults.
    pub fn discover(explicit: Option<&Path>) -> ConfigResult<Self> {
        let source = resolve_source(
            explicit,
            std::env::var_os(CONFIG_ENV),
            platform_config_path(),
        );
        Self::load_from(source.as_ref())
    }

    /// Write atomically: temp file in the same directory, then rename.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = self.to_toml_string()?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let temp_path = path.with_extension("toml.tmp");
        {
            let mut file = fs::File::create(&temp_path).map_err(write_err)?;
            file.write_all(content.as_bytes()).map_err(write_err)?;
            file.sync_all().map_err(write_err)?;
        }
        fs::rename(&temp_path, path).map_err(write_err)?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn source_precedence() {
        let explicit = PathBuf::from("/a.toml");
        let env = OsString::from("/b.toml");
        let platform = PathBuf::from("/c.toml");

        assert_eq!(
            resolve_source(Some(&explicit), Some(env.clone()), Some(platform.clone())),
            Some(ConfigSource::Explicit(explicit))
        );
        assert_eq!(
            resolve_source(None, Some(env), Some(platform.clone())),
            Some(ConfigSource::Environment(PathBuf::from("/b.toml")))
        );
        assert_eq!(
            resolve_source(None, Some(OsString::new()), Some(platform.clone())),
            Some(ConfigSource::Platform(platform))
        );
        assert_eq!(resolve_source(None, None, None), None);
    }

    #[test]
    fn missing_platform_file_is_default() {
        let dir = tempdir().unwrap();
        let source = ConfigSource::Platform(dir.path().join("config.toml"));
        assert_eq!(
            MiqatConfig::load_from(Some(&source)).unwrap(),
            MiqatConfig::default()
        );
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let dir = tempdir().unwrap();
        let source = ConfigSource::Explicit(dir.path().join("nope.toml"));
        assert!(matches!(
            MiqatConfig::load_from(Some(&source)),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = MiqatConfig::default();
        cfg.location.latitude = Some(24.8607);
        cfg.location.longitude = Some(67.0011);
        cfg.prayer.madhab = Some("hanafi".into());
        cfg.prayer.adjustments.fajr = -2;
        cfg.save(&path).unwrap();

        assert!(!path.with_extension("toml.tmp").exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[location]"));
        assert!(content.contains("[prayer]"));

        let loaded = MiqatConfig::load(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn invalid_file_reports_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[location\nlatitude = 1").unwrap();
        assert!(matches!(MiqatConfig::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn semantically_invalid_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[location]\nlatitude = 95.0\nlongitude = 0.0\n").unwrap();
        assert!(matches!(
            MiqatConfig::load(&path),
            Err(ConfigError::Coordinate(_))
        ));
    }
}
