//! Cooldown state between fills, kept in `state.json` next to the config.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slotfill_core::config::data_dir;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FillState {
    /// Earliest time the next free-tier fill is allowed.
    #[serde(default)]
    pub next_update: Option<DateTime<Utc>>,
}

impl FillState {
    pub fn default_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("state.json"))
    }

    /// Missing file means no fill has happened yet.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
