use crate::domain::Durations;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User settings stored in settings.json, read once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub durations: Durations,
    /// Pause a running countdown when the terminal loses focus
    pub pause_on_focus_lost: bool,
    /// Desktop notification when a countdown finishes
    pub notifications: bool,
    /// Terminal bell when a countdown finishes
    pub bell: bool,
    /// Default log filter, overridden by FOKUS_LOG
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            durations: Durations::default(),
            pause_on_focus_lost: true,
            notifications: true,
            bell: true,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if let Some(mode) = self.durations.first_invalid() {
            anyhow::bail!("Duration for mode '{}' must be greater than zero", mode);
        }
        Ok(())
    }
}

/// Load settings from a settings.json file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings file: {}", path.display()))?;
    settings.validate()?;
    Ok(settings)
}

/// Save settings to a settings.json file
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let settings = load_settings(temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.durations.focus_secs, 1500);
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.durations.short_break_secs = 420;
        settings.bell = false;

        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"durations": {"focus_secs": 3000}, "bell": false}"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.durations.focus_secs, 3000);
        assert_eq!(settings.durations.long_break_secs, 900);
        assert!(!settings.bell);
        assert!(settings.notifications);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"durations": {"short_break_secs": 0}}"#).unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(err.to_string().contains("descanso-curto"));
    }
}
