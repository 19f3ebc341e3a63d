pub mod general;
pub mod logging;

use std::path::Path;

use serde::Deserialize;
use config_rs;

use common::Settings;
use general::General;
use logging::Logging;

const CONFIGS: &[&str] = &["lights"];

#[derive(Debug, Deserialize)]
pub struct Config {
    pub general: General,
    pub logging: Logging,
    pub schedule: Settings,
}

impl Config {
    /// Embedded defaults, then `lights.{toml,json,..}` of the working
    /// directory if present, then `extra`.
    pub fn load(extra: Option<&Path>) -> Result<Config, config_rs::ConfigError> {
        let mut config_rs_builder = defaults();
        for s in CONFIGS {
            config_rs_builder = config_rs_builder.add_source(config_rs::File::with_name(s).required(false));
        }
        if let Some(path) = extra {
            config_rs_builder = config_rs_builder.add_source(config_rs::File::from(path));
        }
        config_rs_builder.build()?.try_deserialize::<Config>()
    }
}

fn defaults() -> config_rs::ConfigBuilder<config_rs::builder::DefaultState> {
    config_rs::Config::builder()
        .add_source(config_rs::File::from_str(include_str!("defaults/general.toml"), config_rs::FileFormat::Toml))
        .add_source(config_rs::File::from_str(include_str!("defaults/logging.toml"), config_rs::FileFormat::Toml))
}
