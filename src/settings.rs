use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{MailkeepError, Result};

fn default_chunk_size() -> usize {
    200
}

fn default_write_delay_ms() -> u64 {
    1000
}

/// Connection configuration for the external row table, plus the two static
/// login credentials. Chunk size and write delay are the empirically chosen
/// pacing knobs for the store's rate limit; they are configuration, not
/// tuning the code should second-guess.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Stable identifier of the external row table (the CSV file path).
    pub store_path: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_chunk_size")]
    pub write_chunk_size: usize,
    #[serde(default = "default_write_delay_ms")]
    pub write_delay_ms: u64,
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("mailkeep")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn default_store_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("mailkeep")
        .join("accounts.csv")
}

pub fn settings_file_exists() -> bool {
    settings_path().exists()
}

/// Load settings, failing with a configuration error when they are absent,
/// malformed, or missing a credential. A session cannot proceed without
/// them, so there is no silent default here.
pub fn load_settings() -> Result<Settings> {
    let path = settings_path();
    if !path.exists() {
        return Err(MailkeepError::Config("no settings file found".to_string()));
    }
    let content = std::fs::read_to_string(&path)?;
    let settings: Settings = serde_json::from_str(&content)
        .map_err(|e| MailkeepError::Config(format!("settings file is malformed: {e}")))?;
    if settings.store_path.trim().is_empty() {
        return Err(MailkeepError::Config("store path is not set".to_string()));
    }
    if settings.username.trim().is_empty() || settings.password.is_empty() {
        return Err(MailkeepError::Config("credentials are not set".to_string()));
    }
    Ok(settings)
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| MailkeepError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}
