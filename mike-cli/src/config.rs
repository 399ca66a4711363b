use std::{
    fs::{File, create_dir_all},
    io::Write,
    path::PathBuf,
};

use mike_core::config::{CoreConfig, ProtoConfig, builder, get_config_dir, get_data_dir};
use serde::Deserialize;

use color_eyre::{Result, eyre::bail};
use tracing::debug;

use crate::cli::Cli;

const CLI_CONFIG: &str = include_str!("../../.config/cli.toml");
const CONFIG_FILE_NAME: &str = "cli";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Printed before each line is read.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Greet the user when the session starts.
    #[serde(default = "default_greet")]
    pub greet: bool,
}

fn default_prompt() -> String {
    String::from("> ")
}

const fn default_greet() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            greet: default_greet(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub cli: AppConfig,
    pub core: CoreConfig,
}

impl Config {
    pub fn new(args: &Cli) -> Result<Self> {
        let data_dir = get_data_dir();
        let config_path = args.config_path.clone().unwrap_or_else(get_config_dir);
        debug!(
            "Using data directory at {} and config directory at {}",
            data_dir.display(),
            config_path.display()
        );

        let cli: AppConfig = builder(&config_path, CONFIG_FILE_NAME)
            .build()?
            .try_deserialize()?;
        let core = CoreConfig::new(&ProtoConfig {
            data_file: args.data_file.clone(),
            config_path: Some(config_path),
        })?;

        Ok(Self { cli, core })
    }

    pub fn generate_config(path: Option<PathBuf>) -> Result<()> {
        CoreConfig::generate_config(path.clone())?;
        let config_dir = path.unwrap_or_else(get_config_dir);
        let dest = config_dir.join(format!("{CONFIG_FILE_NAME}.toml"));
        if create_dir_all(config_dir).is_err() {
            bail!("Failed to create config directory at {dest:?}".to_owned());
        }
        if let Ok(mut file) = File::create(dest.clone()) {
            if file.write_all(CLI_CONFIG.as_bytes()).is_err() {
                bail!("Failed to write default config at {dest:?}".to_owned());
            }
        } else {
            bail!("Failed to create default config at {dest:?}".to_owned());
        }
        println!("Configuration has been created at {}.", dest.display());
        Ok(())
    }
}
