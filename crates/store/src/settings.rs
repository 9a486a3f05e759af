//! Settings file management
//!
//! Render defaults, PDF metadata and input column choices persisted as a
//! camelCase JSON file, so the command-line tool can reuse a calibrated
//! duplex setup between runs.

use crate::pdf::PdfExportOptions;
use crate::{Result, StoreError};
use render_model::RenderConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name used when settings live in a directory
pub const SETTINGS_FILE_NAME: &str = "flashdeck.json";

/// Main settings container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Layout and printing
    #[serde(default)]
    pub render: RenderConfig,
    /// PDF metadata and compression
    #[serde(default)]
    pub pdf: PdfExportOptions,
    #[serde(default)]
    pub input: InputSettings,
}

/// Which table columns hold the card sides
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InputSettings {
    /// Front column name, first column when unset
    #[serde(default)]
    pub front_column: Option<String>,
    /// Back column name, second column when unset
    #[serde(default)]
    pub back_column: Option<String>,
}

/// Settings manager for loading, saving, and updating settings
pub struct SettingsManager {
    settings_path: PathBuf,
    /// Current settings (cached)
    current: AppSettings,
}

impl SettingsManager {
    /// Create a manager for the settings file at `settings_path`
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            current: AppSettings::default(),
        }
    }

    /// Create a manager for [`SETTINGS_FILE_NAME`] inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SETTINGS_FILE_NAME))
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or use defaults if the file doesn't exist.
    ///
    /// A file that exists but does not parse is an error.
    pub fn load(&mut self) -> Result<&AppSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            self.current = serde_json::from_str(&content)?;
            tracing::debug!(path = %self.settings_path.display(), "loaded settings");
        } else {
            tracing::debug!(
                path = %self.settings_path.display(),
                "no settings file, using defaults"
            );
            self.current = AppSettings::default();
        }
        Ok(&self.current)
    }

    /// Load settings from a file that must exist
    pub fn load_required(&mut self) -> Result<&AppSettings> {
        if !self.settings_path.exists() {
            return Err(StoreError::FileNotFound(
                self.settings_path.display().to_string(),
            ));
        }
        self.load()
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    pub fn get(&self) -> &AppSettings {
        &self.current
    }

    /// Update settings and save to disk
    pub fn update(&mut self, settings: AppSettings) -> Result<()> {
        self.current = settings;
        self.save()
    }

    /// Update only the render configuration
    pub fn update_render(&mut self, render: RenderConfig) -> Result<()> {
        self.current.render = render;
        self.save()
    }

    /// Reset settings to defaults and save
    pub fn reset(&mut self) -> Result<&AppSettings> {
        self.current = AppSettings::default();
        self.save()?;
        Ok(&self.current)
    }

    /// Write a default settings file, refusing to replace one unless `force`
    pub fn init(&mut self, force: bool) -> Result<()> {
        if self.settings_path.exists() && !force {
            return Err(StoreError::AlreadyExists(
                self.settings_path.display().to_string(),
            ));
        }
        self.reset()?;
        tracing::info!(path = %self.settings_path.display(), "wrote default settings");
        Ok(())
    }
}
