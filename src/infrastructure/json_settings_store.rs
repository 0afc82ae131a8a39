// JSON file settings store
use crate::application::settings_store::SettingsStore;
use crate::domain::settings::Settings;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
    max_resolutions: usize,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>, max_resolutions: usize) -> Self {
        Self {
            path: path.into(),
            max_resolutions,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Settings, SettingsError> {
        let data = fs::read(&self.path)?;
        let mut settings: Settings = serde_json::from_slice(&data)?;
        settings.normalize();
        Ok(settings)
    }

    /// Writes to a sibling temp file and renames it into place.
    fn write(&self, settings: &Settings) -> Result<(), SettingsError> {
        let data = serde_json::to_vec_pretty(settings)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, data)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Settings {
        match self.read() {
            Ok(settings) => {
                tracing::debug!(
                    "Loaded settings from {} ({} resolutions)",
                    self.path.display(),
                    settings.resolutions.len()
                );
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No settings at {}, using defaults", self.path.display());
                Settings::default()
            }
            Err(e) => {
                tracing::warn!(
                    "Could not load settings from {}, using defaults: {}",
                    self.path.display(),
                    e
                );
                Settings::default()
            }
        }
    }

    fn save(&self, settings: &Settings) {
        let mut settings = settings.clone();
        let evicted = settings.prune_resolutions(self.max_resolutions);
        if evicted > 0 {
            tracing::debug!("Dropped {} stale resolution layouts", evicted);
        }

        if let Err(e) = self.write(&settings) {
            tracing::warn!("Could not save settings to {}: {}", self.path.display(), e);
        }
    }
}
