//! Generator configuration loading.

use std::fs;
use std::path::Path;

use crate::app::default_config_path;
use crate::domain::{AppError, GeneratorSettings, parse_config_content};

/// Load settings from `explicit`, or from `<base>/generate/dockergen.toml` when present.
///
/// An explicit path must exist; the default one is optional and falls back to
/// the built-in customizations and skip filter.
pub fn load_settings(
    base_dir: &Path,
    explicit: Option<&Path>,
) -> Result<GeneratorSettings, AppError> {
    let default_path = default_config_path(base_dir);
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(AppError::config_error(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            path
        }
        None if default_path.is_file() => default_path.as_path(),
        None => {
            log::debug!("No config at {}, using built-in defaults", default_path.display());
            return Ok(GeneratorSettings::default());
        }
    };

    log::info!("Loading config {}", path.display());
    let content = fs::read_to_string(path)?;
    parse_config_content(&content)?.into_settings()
}
