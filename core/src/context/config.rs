//! Application configuration
//!
//! Re-exports `AppConfig` from trigger-types and adds platform defaults
//! and persistence through confy.

use std::path::PathBuf;

use trigger_types::AppConfig;

use super::ConfigError;

const APP_NAME: &str = "trigger-engine";
const CONFIG_NAME: &str = "config";

/// `~/.config/trigger-engine/definitions` (or platform equivalent)
pub fn default_definitions_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME).join("definitions"))
}

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    fn load() -> Self;
    fn load_with_defaults() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        match confy::load(APP_NAME, CONFIG_NAME) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load configuration, using defaults");
                Self::load_with_defaults()
            }
        }
    }

    /// Defaults with the platform definitions directory filled in
    fn load_with_defaults() -> Self {
        let dir = default_definitions_dir()
            .and_then(|p| p.to_str().map(String::from))
            .unwrap_or_default();
        AppConfig::with_definitions_dir(dir)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)?)
    }
}
