use directories::ProjectDirs;
use std::path::PathBuf;

use crate::ConfigError;

pub const APP_NAME: &str = "cipin";

/// Returns the config directory and the path of `config.toml` inside it.
pub fn get_config_location() -> Result<(PathBuf, PathBuf), ConfigError> {
    let project_dir = ProjectDirs::from("", "", APP_NAME).ok_or(ConfigError::NoConfigDir)?;
    let config_dir = project_dir.config_dir();
    let mut config_path = PathBuf::from(config_dir);
    config_path.push("config.toml");
    Ok((config_dir.to_owned(), config_path))
}
