use std::{
    env, fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use serde_derive::{Deserialize, Serialize};

use crate::{utils::get_config_location, ConfigError};

const PORT_ENV: &str = "CIPIN_PORT";
const HOST_ENV: &str = "CIPIN_HOST";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct General {
    pub host: String,
    pub port: u16,
}

impl Default for General {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
        }
    }
}

/// Settings for the single outbound GET issued per analysis.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Fetch {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_body_bytes: u64,
}

impl Default for Fetch {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!("cipin/{}", env!("CARGO_PKG_VERSION")),
            max_body_bytes: 5 * 1024 * 1024,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub fetch: Fetch,
}

impl Config {
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(env::var(PORT_ENV).ok(), env::var(HOST_ENV).ok());
    }

    /// Replaces the listen address with valid override values; invalid ones are ignored.
    pub fn apply_overrides(&mut self, port: Option<String>, host: Option<String>) {
        if let Some(port) = port {
            match port.parse::<u16>() {
                Ok(port) => self.general.port = port,
                Err(_) => warn!("ignoring {}={:?}: not a valid port", PORT_ENV, port),
            }
        }
        if let Some(host) = host {
            if host.trim().is_empty() {
                warn!("ignoring empty {}", HOST_ENV);
            } else {
                self.general.host = host;
            }
        }
    }
}

/// Reads the config from the platform config location. A missing file yields the defaults.
pub fn read_config() -> Result<Config, ConfigError> {
    let (_, file) = get_config_location()?;
    let mut config = read_config_from(&file)?;
    config.apply_env_overrides();
    Ok(config)
}

pub fn read_config_from(file: &Path) -> Result<Config, ConfigError> {
    if !file.exists() {
        debug!("no config at {:?}, using defaults", file);
        return Ok(Config::default());
    }
    let config: Config = toml::from_str(&fs::read_to_string(file)?)?;
    Ok(config)
}

/// Writes the default config unless one already exists. Returns the config path either way.
pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let (dir, file) = get_config_location()?;
    write_default_config_to(&dir, &file)?;
    Ok(file)
}

fn write_default_config_to(dir: &Path, file: &Path) -> Result<(), ConfigError> {
    if !file.exists() {
        fs::create_dir_all(dir)?;
        fs::write(file, toml::to_string(&Config::default())?)?;
    }
    Ok(())
}
