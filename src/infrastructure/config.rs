use crate::application::settings_panel::SettingsPanelMetrics;
use crate::domain::layout::LayoutMetrics;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub settings_file: PathBuf,
    /// Most resolutions kept in the settings file; 0 keeps all
    pub max_resolutions: usize,
    pub unhovered_opacity: f32,
    pub layout: LayoutMetrics,
    pub settings_panel: SettingsPanelMetrics,
    pub preview: PreviewConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            settings_file: PathBuf::from("CityVitalsWatchSettings.json"),
            max_resolutions: 16,
            unhovered_opacity: 0.4,
            layout: LayoutMetrics::default(),
            settings_panel: SettingsPanelMetrics::default(),
            preview: PreviewConfig::default(),
        }
    }
}

/// Headless preview run by the binary.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PreviewConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub frames: u32,
    /// JSON file with district counters; absent means no simulation
    pub snapshot: Option<PathBuf>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            screen_width: 1920,
            screen_height: 1080,
            frames: 3,
            snapshot: None,
        }
    }
}

/// Loads `config/dashboard.{toml,json,...}` if present, defaults otherwise.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_dashboard_config_from(path: &Path) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .build()
        .with_context(|| format!("Failed to read dashboard config {}", path.display()))?;

    settings
        .try_deserialize()
        .with_context(|| format!("Invalid dashboard config {}", path.display()))
}
