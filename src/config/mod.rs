use crate::models::Settings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Settings bootstrap and loader for `settings.json`.
///
/// The file is created with defaults the first time the program runs and is
/// then treated as user-owned: it is read once per session and never
/// rewritten while it parses. A file that stops parsing is a fatal error
/// for the session rather than something to silently regenerate over.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl SettingsManager {
    /// Create a new SettingsManager rooted at the specified directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory holding `settings.json`
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join("settings.json"),
            config_dir,
        })
    }

    /// Load the settings file, bootstrapping defaults if it is absent.
    ///
    /// # Returns
    /// The loaded Settings; a parse failure of an existing file is an error
    pub fn load_or_init(&self) -> Result<Settings> {
        if !self.settings_path.exists() {
            let defaults = Settings::default();
            self.save(&defaults)?;
            tracing::info!(
                "Settings file not found; wrote defaults to {}",
                self.settings_path
            );
            return Ok(defaults);
        }

        let file_contents = fs::read_to_string(&self.settings_path)
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: Settings = serde_json::from_str(&file_contents).with_context(|| {
            format!(
                "Failed to parse settings: {} (fix the file or delete it to regenerate defaults)",
                self.settings_path
            )
        })?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(settings)
    }

    /// Write settings to disk. Only used for the first-run bootstrap.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let json_string =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        fs::write(&self.settings_path, json_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Path of the settings file.
    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}
