use crate::config::{AppConfig, ConfigError};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::{Path, PathBuf};

/// Default location of the main configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";

/// Prefix for environment overrides, e.g. `ODDS_ARB_DETECTOR__KELLY_EDGE`.
pub const ENV_PREFIX: &str = "ODDS_ARB_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by merging TOML and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or hold invalid values.
    pub fn load() -> Result<AppConfig, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads application configuration with a specific profile.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or hold invalid values.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig, ConfigError> {
        Self::load_from_with_profile(DEFAULT_CONFIG_PATH, Some(profile))
    }

    /// Loads application configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or hold invalid values.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
        Self::load_from_with_profile(path, None)
    }

    /// Loads `path`, then `Config.{profile}.toml` next to it, then the environment.
    ///
    /// A missing file contributes nothing; every section has defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or hold invalid values.
    pub fn load_from_with_profile(
        path: impl AsRef<Path>,
        profile: Option<&str>,
    ) -> Result<AppConfig, ConfigError> {
        let path = path.as_ref();
        let mut figment = Figment::new().merge(Toml::file(path));

        if let Some(profile) = profile {
            figment = figment.merge(Toml::file(profile_path(path, profile)));
        }

        let config: AppConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.detector.validate()?;
        tracing::debug!(
            path = %path.display(),
            profile = profile.unwrap_or("-"),
            books = config.books.len(),
            "Configuration loaded"
        );

        Ok(config)
    }
}

/// Location of the profile overlay that sits next to `path`.
pub(crate) fn profile_path(path: &Path, profile: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Config");
    path.with_file_name(format!("{stem}.{profile}.toml"))
}
