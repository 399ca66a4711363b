use std::{
    env,
    fs::{File, create_dir_all},
    io::Write,
    path::{Path, PathBuf},
};

use color_eyre::{Result, eyre::bail};
use config::{
    Config, FileFormat,
    builder::{ConfigBuilder, DefaultState},
};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::{debug, info};

pub const CONFIG: &str = include_str!("../../.config/core.toml");
pub const PROJECT_NAME: &str = "mike";
const CONFIG_FILE_NAME: &str = "core";
const DATA_FILE_NAME: &str = "tasks.txt";

/// Extensions looked up in a config directory, in increasing priority.
const FORMATS: [(&str, FileFormat); 5] = [
    ("json5", FileFormat::Json5),
    ("json", FileFormat::Json),
    ("yaml", FileFormat::Yaml),
    ("toml", FileFormat::Toml),
    ("ini", FileFormat::Ini),
];

lazy_static! {
    /// `MIKE_DATA` overrides the platform data directory.
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.to_uppercase()))
            .ok()
            .map(PathBuf::from);
    /// `MIKE_CONFIG` overrides the platform config directory.
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.to_uppercase()))
            .ok()
            .map(PathBuf::from);
}

/// Sources for the `name` configuration.
///
/// When `config_path` is a file it is the only source. Otherwise every `<name>.<ext>`
/// in that directory is an optional source, later formats overriding earlier ones.
pub fn builder(config_path: &Path, name: &str) -> ConfigBuilder<DefaultState> {
    if config_path.is_file() {
        return Config::builder().add_source(config::File::from(config_path));
    }

    let candidates =
        FORMATS.map(|(extension, format)| (config_path.join(format!("{name}.{extension}")), format));
    if !candidates.iter().any(|(path, _)| path.exists()) {
        info!(
            "No {name} configuration in {}, using defaults. Run `{PROJECT_NAME} generate-config` to create one",
            config_path.display()
        );
    }
    candidates
        .into_iter()
        .fold(Config::builder(), |builder, (path, format)| {
            builder.add_source(config::File::from(path).format(format).required(false))
        })
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CoreConfig {
    /// File the tasks are stored in. Empty means `tasks.txt` in the data directory.
    #[serde(default)]
    pub data_file: PathBuf,
    /// Save after each command changing the task list, otherwise only when the session ends.
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

const fn default_autosave() -> bool {
    true
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::new(),
            autosave: default_autosave(),
        }
    }
}

/// Values coming from the command line, they take precedence over config files.
#[derive(Default)]
pub struct ProtoConfig {
    pub data_file: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

impl CoreConfig {
    /// Builds the configuration from the config directory (or file) and the command line.
    ///
    /// # Errors
    ///
    /// Will return an error if a config file exists but can't be read or deserialized.
    pub fn new(params: &ProtoConfig) -> Result<Self> {
        let data_dir = get_data_dir();
        let config_path = params.config_path.clone().unwrap_or_else(get_config_dir);
        debug!(
            "Using data directory at {} and config directory at {}",
            data_dir.display(),
            config_path.display()
        );

        let mut cfg: Self = builder(&config_path, CONFIG_FILE_NAME)
            .build()?
            .try_deserialize()?;

        if let Some(path) = &params.data_file {
            cfg.data_file.clone_from(path);
        }
        if cfg.data_file.as_os_str().is_empty() {
            cfg.data_file = data_dir.join(DATA_FILE_NAME);
        }

        Ok(cfg)
    }

    /// Writes the default configuration in `path` or in the config directory.
    ///
    /// # Errors
    ///
    /// Will return an error if the file can't be written.
    pub fn generate_config(path: Option<PathBuf>) -> Result<()> {
        let config_dir = path.unwrap_or_else(get_config_dir);
        let dest = config_dir.join(format!("{CONFIG_FILE_NAME}.toml"));
        if create_dir_all(config_dir).is_err() {
            bail!("Failed to create config directory at {dest:?}".to_owned());
        }
        if let Ok(mut file) = File::create(dest.clone()) {
            if file.write_all(CONFIG.as_bytes()).is_err() {
                bail!("Failed to write default config at {dest:?}".to_owned());
            }
        } else {
            bail!("Failed to create default config at {dest:?}".to_owned());
        }
        println!(
            "Configuration has been created at {}. You can fill the `data_file` value to choose where tasks are stored.",
            dest.display()
        );
        Ok(())
    }
}

/// `MIKE_DATA`, or the platform data directory, or `./.data`.
pub fn get_data_dir() -> PathBuf {
    DATA_FOLDER.clone().unwrap_or_else(|| {
        project_directory().map_or_else(
            || PathBuf::from(".").join(".data"),
            |dirs| dirs.data_local_dir().to_path_buf(),
        )
    })
}

/// `MIKE_CONFIG`, or the platform config directory, or `./.config`.
pub fn get_config_dir() -> PathBuf {
    CONFIG_FOLDER.clone().unwrap_or_else(|| {
        project_directory().map_or_else(
            || PathBuf::from(".").join(".config"),
            |dirs| dirs.config_local_dir().to_path_buf(),
        )
    })
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "ningc", PROJECT_NAME)
}
