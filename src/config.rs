//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rstreemap/rstreemap.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `RSTREEMAP_*` prefix, `__` between section and key

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::Rect;

/// Drawing area handed to the layout engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    /// 1024x600 window minus a 30px status line.
    fn default() -> Self {
        Self {
            width: 1024,
            height: 570,
        }
    }
}

impl ViewportConfig {
    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// World Bank endpoints for the population tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PopulationConfig {
    /// Country populations (indicator SP.POP.TOTL)
    pub populations_url: String,
    /// Country list with region membership
    pub regions_url: String,
    /// Label of the root node
    pub root_label: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            populations_url: "http://api.worldbank.org/countries/all/indicators/SP.POP.TOTL?format=json&date=2014:2014&per_page=270".into(),
            regions_url: "http://api.worldbank.org/countries?format=json&date=2014:2014&per_page=310".into(),
            root_label: "World".into(),
            timeout_secs: 30,
        }
    }
}

/// Node coloring.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColorConfig {
    /// Fixed seed for reproducible colors; random when unset
    pub seed: Option<u64>,
}

/// Raw viewport config for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawViewportConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Raw population config for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawPopulationConfig {
    pub populations_url: Option<String>,
    pub regions_url: Option<String>,
    pub root_label: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Raw settings for intermediate parsing.
///
/// Every field is optional so a layer only overrides what it names.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub viewport: RawViewportConfig,
    pub population: RawPopulationConfig,
    pub colors: ColorConfig,
}

/// Unified configuration for rstreemap.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub viewport: ViewportConfig,
    pub population: PopulationConfig,
    pub colors: ColorConfig,
}

/// Get the XDG config directory for rstreemap.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rstreemap").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rstreemap.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            viewport: ViewportConfig {
                width: overlay.viewport.width.unwrap_or(self.viewport.width),
                height: overlay.viewport.height.unwrap_or(self.viewport.height),
            },
            population: PopulationConfig {
                populations_url: overlay
                    .population
                    .populations_url
                    .clone()
                    .unwrap_or_else(|| self.population.populations_url.clone()),
                regions_url: overlay
                    .population
                    .regions_url
                    .clone()
                    .unwrap_or_else(|| self.population.regions_url.clone()),
                root_label: overlay
                    .population
                    .root_label
                    .clone()
                    .unwrap_or_else(|| self.population.root_label.clone()),
                timeout_secs: overlay
                    .population
                    .timeout_secs
                    .unwrap_or(self.population.timeout_secs),
            },
            colors: ColorConfig {
                seed: overlay.colors.seed.or(self.colors.seed),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist when given
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/rstreemap/rstreemap.toml`
    /// 3. Explicit config file
    /// 4. Environment variables: `RSTREEMAP_*` prefix
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply RSTREEMAP_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let builder = Config::builder().add_source(
            Environment::with_prefix("RSTREEMAP")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get::<u32>("viewport.width") {
            settings.viewport.width = val;
        }
        if let Ok(val) = config.get::<u32>("viewport.height") {
            settings.viewport.height = val;
        }
        if let Ok(val) = config.get_string("population.populations_url") {
            settings.population.populations_url = val;
        }
        if let Ok(val) = config.get_string("population.regions_url") {
            settings.population.regions_url = val;
        }
        if let Ok(val) = config.get_string("population.root_label") {
            settings.population.root_label = val;
        }
        if let Ok(val) = config.get::<u64>("population.timeout_secs") {
            settings.population.timeout_secs = val;
        }
        if let Ok(val) = config.get::<u64>("colors.seed") {
            settings.colors.seed = Some(val);
        }

        Ok(settings)
    }

    /// Render as TOML, as written in a config file.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
