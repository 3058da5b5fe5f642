use std::fs;
use std::path::{Path, PathBuf};

use whot_types::NotificationSettings;

/// Application name used for the platform config directory.
pub const APP_NAME: &str = "whot";

/// Errors that can occur while loading or saving settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid settings: {0}")]
    Invalid(String),
    #[error(transparent)]
    Confy(#[from] confy::ConfyError),
}

/// Parse settings from TOML text. Missing keys take their defaults.
pub fn parse_settings(text: &str, path: &Path) -> Result<NotificationSettings, ConfigError> {
    let settings: NotificationSettings = toml::from_str(text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&settings)?;
    Ok(settings)
}

/// Load settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<NotificationSettings, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_settings(&contents, path)
}

pub fn validate(settings: &NotificationSettings) -> Result<(), ConfigError> {
    if settings.min_ttl_ms == 0 || settings.max_ttl_ms == 0 {
        return Err(ConfigError::Invalid("TTL bounds must be positive".to_string()));
    }
    if settings.min_ttl_ms > settings.max_ttl_ms {
        return Err(ConfigError::Invalid(format!(
            "min_ttl_ms ({}) exceeds max_ttl_ms ({})",
            settings.min_ttl_ms, settings.max_ttl_ms
        )));
    }
    if !(1..=20).contains(&settings.general_market_rank) {
        return Err(ConfigError::Invalid(format!(
            "general_market_rank {} is not a card rank",
            settings.general_market_rank
        )));
    }
    Ok(())
}

/// Load settings from the platform config directory, falling back to the
/// defaults when the stored file is missing, unreadable or invalid.
pub fn load_or_default() -> NotificationSettings {
    match confy::load::<NotificationSettings>(APP_NAME, None) {
        Ok(settings) => match validate(&settings) {
            Ok(()) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "stored settings rejected, using defaults");
                NotificationSettings::default()
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            NotificationSettings::default()
        }
    }
}

/// Persist settings to the platform config directory.
pub fn store(settings: &NotificationSettings) -> Result<(), ConfigError> {
    validate(settings)?;
    confy::store(APP_NAME, None, settings)?;
    Ok(())
}

/// Location of the stored settings file.
pub fn settings_path() -> Result<PathBuf, ConfigError> {
    Ok(confy::get_configuration_file_path(APP_NAME, None)?)
}
