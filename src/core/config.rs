//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::tolerance::ToleranceClass;
use crate::entities::Vector3;
use crate::pipeline::AnnotateOptions;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = "dimcheck.yaml";

/// dimcheck configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tolerance class used for report rows
    pub tolerance_class: Option<ToleranceClass>,

    /// Annotation layer name
    pub layer: Option<String>,

    /// Offset from a dimension's text position to its balloon
    pub balloon_offset: Option<Vector3>,

    /// Balloon text height
    pub text_height: Option<f64>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let local = std::env::current_dir()
            .map(|dir| dir.join(LOCAL_CONFIG_FILE))
            .ok();
        Self::load_from(Self::global_config_path().as_deref(), local.as_deref())
    }

    /// Load configuration from explicit file locations plus the environment
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (applied when options are built)

        // 2. Global user config (~/.config/dimcheck/config.yaml)
        if let Some(other) = global.and_then(Self::read_file) {
            config.merge(other);
        }

        // 3. Directory config (./dimcheck.yaml)
        if let Some(other) = local.and_then(Self::read_file) {
            config.merge(other);
        }

        // 4. Environment variables
        if let Ok(class) = std::env::var("DIMCHECK_CLASS") {
            if let Ok(class) = class.parse() {
                config.tolerance_class = Some(class);
            }
        }
        if let Ok(layer) = std::env::var("DIMCHECK_LAYER") {
            if !layer.trim().is_empty() {
                config.layer = Some(layer);
            }
        }

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        serde_yml::from_str::<Config>(&contents).ok()
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "dimcheck")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.tolerance_class.is_some() {
            self.tolerance_class = other.tolerance_class;
        }
        if other.layer.is_some() {
            self.layer = other.layer;
        }
        if other.balloon_offset.is_some() {
            self.balloon_offset = other.balloon_offset;
        }
        if other.text_height.is_some() {
            self.text_height = other.text_height;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Build pipeline options, falling back to built-in defaults
    pub fn annotate_options(&self) -> AnnotateOptions {
        let defaults = AnnotateOptions::default();
        AnnotateOptions {
            layer_name: self.layer.clone().unwrap_or(defaults.layer_name),
            tolerance_class: self.tolerance_class.unwrap_or(defaults.tolerance_class),
            balloon_offset: self.balloon_offset.unwrap_or(defaults.balloon_offset),
            text_height: self.text_height.unwrap_or(defaults.text_height),
        }
    }
}
