use crate::sites::SiteLayout;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;
use std::{env, path::PathBuf, time::Duration};

const CONFIG: &str = include_str!("../.config/config.json5");

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    Firefox,
    Chrome,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WebDriverConfig {
    pub url: String,
    pub browser: BrowserKind,
    pub headless: bool,
    /// Driver program and arguments; empty when one is already running.
    #[serde(default)]
    pub driver_command: Vec<String>,
    #[serde(default)]
    pub driver_startup_ms: u64,
}

impl WebDriverConfig {
    pub fn driver_startup(&self) -> Duration {
        Duration::from_millis(self.driver_startup_ms)
    }
}

/// Fixed waits between browser steps.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Timing {
    #[serde(default)]
    pub results_settle_ms: Option<u64>,
    pub listing_settle_ms: u64,
    pub tab_close_settle_ms: u64,
    pub documents_wait_ms: u64,
}

impl Timing {
    /// No waiting at all, for recorded pages.
    pub fn instant() -> Self {
        Self {
            results_settle_ms: Some(0),
            listing_settle_ms: 0,
            tab_close_settle_ms: 0,
            documents_wait_ms: 0,
        }
    }

    pub fn results_settle(&self, layout: &SiteLayout) -> Duration {
        self.results_settle_ms
            .map(Duration::from_millis)
            .unwrap_or(layout.results_settle)
    }

    pub fn listing_settle(&self) -> Duration {
        Duration::from_millis(self.listing_settle_ms)
    }

    pub fn tab_close_settle(&self) -> Duration {
        Duration::from_millis(self.tab_close_settle_ms)
    }

    pub fn documents_wait(&self) -> Duration {
        Duration::from_millis(self.documents_wait_ms)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
    pub webdriver: WebDriverConfig,
    pub timing: Timing,
    #[serde(default)]
    pub output_dir: PathBuf,
}

impl Config {
    /// Embedded defaults, then user config files, then `LEILOES__*` variables.
    pub fn new() -> Result<Self, config::ConfigError> {
        let data_dir = get_data_dir();
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5))
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
        ];
        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
        }
        builder = builder.add_source(
            config::Environment::with_prefix(&PROJECT_NAME)
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "leiloes", env!("CARGO_PKG_NAME"))
}
