//! Core configuration (C10): the tiling core's own tunables — gaps,
//! padding, default mode, split policy, focus-history/navigation bias.
//!
//! Window-matching rules and hotkey bindings are an external collaborator
//! (`spec.md` §1) and are out of scope here; this is scoped to exactly the
//! knobs the core itself consumes. Grounded on the teacher's
//! `config::schema`/`config::parser` split (`config/schema.rs`,
//! `config/parser.rs`): a plain serde-derived schema with `#[serde(default)]`
//! fields, loaded by a small `ConfigLoader`.

use crate::geometry::Offset;
use crate::navigation::NavigationBias;
use crate::workspace::LayoutMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoreConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
enum ModeSetting {
    Bsp,
    Monocle,
    Float,
}

impl From<ModeSetting> for LayoutMode {
    fn from(m: ModeSetting) -> Self {
        match m {
            ModeSetting::Bsp => LayoutMode::Bsp,
            ModeSetting::Monocle => LayoutMode::Monocle,
            ModeSetting::Float => LayoutMode::Float,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    #[serde(default = "default_mode")]
    default_mode: ModeSetting,
    #[serde(default = "default_padding")]
    pub padding: i32,
    #[serde(default = "default_gap")]
    pub gap: i32,
}

fn default_mode() -> ModeSetting {
    ModeSetting::Bsp
}
fn default_padding() -> i32 {
    0
}
fn default_gap() -> i32 {
    0
}

impl LayoutConfig {
    pub fn default_mode(&self) -> LayoutMode {
        self.default_mode.clone().into()
    }

    pub fn offset(&self) -> Offset {
        Offset::new(self.padding, self.gap)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            default_mode: default_mode(),
            padding: default_padding(),
            gap: default_gap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationConfig {
    #[serde(default = "default_x_threshold")]
    pub x_threshold: i32,
    #[serde(default = "default_y_threshold")]
    pub y_threshold: i32,
    #[serde(default = "default_x_penalty")]
    pub x_penalty: f64,
    #[serde(default = "default_y_penalty")]
    pub y_penalty: f64,
}

fn default_x_threshold() -> i32 {
    15
}
fn default_y_threshold() -> i32 {
    10
}
fn default_x_penalty() -> f64 {
    11.0
}
fn default_y_penalty() -> f64 {
    22.0
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            x_threshold: default_x_threshold(),
            y_threshold: default_y_threshold(),
            x_penalty: default_x_penalty(),
            y_penalty: default_y_penalty(),
        }
    }
}

impl From<&NavigationConfig> for NavigationBias {
    fn from(c: &NavigationConfig) -> Self {
        NavigationBias {
            x_threshold: c.x_threshold,
            y_threshold: c.y_threshold,
            x_penalty: c.x_penalty,
            y_penalty: c.y_penalty,
        }
    }
}

/// Parses and validates a `CoreConfig` from TOML, mirroring the teacher's
/// `ConfigLoader` (`config/parser.rs`) parse-then-validate split.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_str(contents: &str) -> anyhow::Result<CoreConfig> {
        let config: CoreConfig = toml::from_str(contents)?;
        Self::validate(&config)?;
        Ok(config)
    }

    pub fn load_file(path: &Path) -> anyhow::Result<CoreConfig> {
        let contents = std::fs::read_to_string(path)?;
        Self::load_str(&contents)
    }

    fn validate(config: &CoreConfig) -> anyhow::Result<()> {
        if config.layout.gap < 0 {
            anyhow::bail!("layout.gap must be non-negative, got {}", config.layout.gap);
        }
        if config.layout.padding < 0 {
            anyhow::bail!("layout.padding must be non-negative, got {}", config.layout.padding);
        }
        Ok(())
    }
}
