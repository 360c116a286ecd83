pub mod config;
pub mod utils;

pub use config::{read_config, read_config_from, write_default_config, Config, Fetch, General};
pub use utils::get_config_location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("could not determine a config directory for this platform")]
    NoConfigDir,
}
