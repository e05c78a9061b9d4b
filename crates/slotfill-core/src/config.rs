//! TOML-based configuration.
//!
//! Stores the defaults a fill falls back to when the caller does not pass
//! them explicitly:
//! - Timezone (no implicit system default; it must be set here or per call)
//! - Plan tier
//! - Fill percentage and event duration bounds
//! - Optional custom event pool file
//!
//! Configuration is stored at `~/.config/slotfill/config.toml`.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, CoreError, ValidationError};
use crate::interval::parse_time_zone;
use crate::placement::{
    EventPool, PlacementParameters, DEFAULT_MAX_DURATION_MINUTES, DEFAULT_MIN_DURATION_MINUTES,
    DEFAULT_PERCENTAGE,
};
use crate::plan::PlanTier;

/// Returns `~/.config/slotfill[-dev]/` based on SLOTFILL_ENV.
///
/// Set SLOTFILL_ENV=dev to use a development directory.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SLOTFILL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("slotfill-dev")
    } else {
        base_dir.join("slotfill")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Event placement defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    #[serde(default = "default_percentage")]
    pub percentage: f64,
    #[serde(default = "default_min_duration")]
    pub min_duration_minutes: i64,
    #[serde(default = "default_max_duration")]
    pub max_duration_minutes: i64,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// IANA timezone name, e.g. `Europe/Berlin`.
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub plan: PlanTier,
    /// TOML file with `[[events]]` entries replacing the built-in pool.
    #[serde(default)]
    pub event_pool_path: Option<PathBuf>,
    /// Fixed seed for reproducible placement.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub placement: PlacementConfig,
}

fn default_percentage() -> f64 {
    DEFAULT_PERCENTAGE
}
fn default_min_duration() -> i64 {
    DEFAULT_MIN_DURATION_MINUTES
}
fn default_max_duration() -> i64 {
    DEFAULT_MAX_DURATION_MINUTES
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            percentage: default_percentage(),
            min_duration_minutes: default_min_duration(),
            max_duration_minutes: default_max_duration(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_zone: None,
            plan: PlanTier::default(),
            event_pool_path: None,
            seed: None,
            placement: PlacementConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".to_string(),
        };
        let bad_number = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("cannot parse '{value}' as number"),
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                _ if value.is_empty() => serde_json::Value::Null,
                serde_json::Value::Bool(_) => {
                    serde_json::Value::Bool(value.parse::<bool>().map_err(|e| {
                        ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        }
                    })?)
                }
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<i64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        let n = value.parse::<f64>().map_err(|_| bad_number())?;
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(bad_number)?
                    }
                }
                // Unset optional value
                serde_json::Value::Null => match value.parse::<u64>() {
                    Ok(n) => serde_json::Value::Number(n.into()),
                    Err(_) => serde_json::Value::String(value.into()),
                },
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from the default location, falling back to defaults on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!("using default configuration: {e}");
            Self::default()
        })
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::default_path()?)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => Some(String::new()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. An empty value clears
    /// optional keys.
    ///
    /// `time_zone` and `plan` are checked and normalized before saving.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let value = match key {
            "time_zone" if !value.trim().is_empty() => parse_time_zone(value)
                .map_err(|e| invalid(e.to_string()))?
                .name()
                .to_string(),
            "plan" => value
                .parse::<PlanTier>()
                .map_err(|e| invalid(e.to_string()))?
                .as_str()
                .to_string(),
            _ => value.to_string(),
        };

        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, &value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Resolve the configured timezone.
    pub fn time_zone(&self) -> Result<Tz, CoreError> {
        let name = self
            .time_zone
            .as_deref()
            .ok_or_else(|| ConfigError::MissingKey("time_zone".to_string()))?;
        Ok(parse_time_zone(name)?)
    }

    /// Placement parameters for the configured plan.
    pub fn placement_parameters(&self) -> Result<PlacementParameters, ValidationError> {
        PlacementParameters::new(
            self.placement.percentage,
            self.placement.min_duration_minutes,
            self.placement.max_duration_minutes,
            self.plan.is_paid(),
        )
    }

    /// The configured event pool, or the built-in one.
    pub fn event_pool(&self) -> Result<EventPool, ConfigError> {
        match &self.event_pool_path {
            Some(path) => EventPool::load(path),
            None => Ok(EventPool::curated()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.placement.percentage, 25.0);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "time_zone = \"Europe/Berlin\"\nplan = \"annual\"\n\n[placement]\npercentage = 40.0\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.plan, PlanTier::Annual);
        assert_eq!(config.placement.percentage, 40.0);
        assert_eq!(config.placement.max_duration_minutes, 120);
        assert_eq!(config.time_zone().unwrap(), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.time_zone = Some("Asia/Tokyo".into());
        config.seed = Some(7);

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "plan = [").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut config = Config::default();
        config.set("placement.percentage", "60").unwrap();
        config.set("plan", "lifetime").unwrap();
        config.set("time_zone", "America/Chicago").unwrap();
        config.set("seed", "12").unwrap();

        assert_eq!(config.placement.percentage, 60.0);
        assert_eq!(config.plan, PlanTier::Lifetime);
        assert_eq!(config.get("time_zone").as_deref(), Some("America/Chicago"));
        assert_eq!(config.get("seed").as_deref(), Some("12"));

        config.set("seed", "").unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_set_validates_time_zone_and_plan() {
        let mut config = Config::default();

        let err = config.set("time_zone", "Not/AZone").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "time_zone"));
        assert_eq!(config.time_zone, None);

        config.set("time_zone", " Europe/Paris ").unwrap();
        assert_eq!(config.time_zone.as_deref(), Some("Europe/Paris"));
        config.set("time_zone", "").unwrap();
        assert_eq!(config.time_zone, None);

        config.set("plan", "LIFETIME").unwrap();
        assert_eq!(config.plan, PlanTier::Lifetime);
        assert_eq!(config.get("plan").as_deref(), Some("lifetime"));
    }

    #[test]
    fn test_set_rejects_unknown_key_and_bad_value() {
        let mut config = Config::default();
        assert!(config.set("nope", "1").is_err());
        assert!(config.set("placement.percentage", "lots").is_err());
        assert!(config.set("plan", "enterprise").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_time_zone_is_reported() {
        let err = Config::default().time_zone().unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::MissingKey(_))));
    }
}
