//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Default work/break durations and the plan auto-advance grace
//! - Notification enablement
//! - Music helper path, output device and volume
//!
//! Configuration is stored at `~/.config/tomata/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Timer defaults and plan-mode pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_min")]
    pub default_work_min: u32,
    #[serde(default = "default_break_min")]
    pub default_break_min: u32,
    /// Duration seeded when entering plan mode with an empty list.
    #[serde(default = "default_work_min")]
    pub plan_fallback_min: u32,
    /// Grace period between plan steps before the next countdown
    /// auto-starts, in whole seconds.
    #[serde(default = "default_auto_advance")]
    pub auto_advance_delay_secs: u32,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Music helper configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Path to the helper binary; empty disables the bridge.
    #[serde(default)]
    pub exe_path: String,
    /// Output device id; -1 selects the system default.
    #[serde(default = "default_device")]
    pub device_id: i64,
    #[serde(default = "default_volume")]
    pub volume: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/tomata/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

// Default functions
fn default_work_min() -> u32 {
    25
}
fn default_break_min() -> u32 {
    5
}
fn default_auto_advance() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_device() -> i64 {
    -1
}
fn default_volume() -> f64 {
    0.8
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_work_min: default_work_min(),
            default_break_min: default_break_min(),
            plan_fallback_min: default_work_min(),
            auto_advance_delay_secs: default_auto_advance(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            exe_path: String::new(),
            device_id: default_device(),
            volume: default_volume(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            notifications: NotificationsConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default duration in minutes for a session kind.
    pub fn default_minutes(&self, kind: crate::mode::SessionKind) -> u32 {
        match kind {
            crate::mode::SessionKind::Work => self.timer.default_work_min,
            crate::mode::SessionKind::Break => self.timer.default_break_min,
        }
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.into(),
            message: e.to_string(),
        })?;
        set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.into(),
            message: e.to_string(),
        })?;
        self.save()
    }

    /// All leaf keys with their current values, for `config list`.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            collect_entries(&json, String::new(), &mut out);
        }
        out
    }
}

fn collect_entries(value: &serde_json::Value, prefix: String, out: &mut Vec<(String, String)>) {
    match value {
        serde_json::Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                collect_entries(v, key, out);
            }
        }
        serde_json::Value::String(s) => out.push((prefix, s.clone())),
        other => out.push((prefix, other.to_string())),
    }
}

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
    let unknown = || ConfigError::UnknownKey(key.to_string());
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };

    let mut parts = key.split('.').peekable();
    if parts.peek().is_none() {
        return Err(unknown());
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        if is_leaf {
            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<i64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current.get_mut(part).ok_or_else(unknown)?;
    }

    Err(unknown())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = AppConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.default_work_min, 25);
        assert_eq!(parsed.timer.auto_advance_delay_secs, 1);
        assert_eq!(parsed.player.device_id, -1);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("timer.default_work_min").as_deref(), Some("25"));
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert!(cfg.get("timer.missing_key").is_none());
    }

    #[test]
    fn set_json_path_updates_nested_number() {
        let mut json = serde_json::to_value(AppConfig::default()).unwrap();
        set_json_value_by_path(&mut json, "timer.auto_advance_delay_secs", "3").unwrap();
        assert_eq!(
            get_json_value_by_path(&json, "timer.auto_advance_delay_secs").unwrap(),
            &serde_json::Value::Number(3.into())
        );
    }

    #[test]
    fn set_json_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(AppConfig::default()).unwrap();
        assert!(matches!(
            set_json_value_by_path(&mut json, "timer.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_json_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(AppConfig::default()).unwrap();
        assert!(set_json_value_by_path(&mut json, "notifications.enabled", "maybe").is_err());
    }

    #[test]
    fn entries_lists_leaf_keys() {
        let cfg = AppConfig::default();
        let entries = cfg.entries();
        assert!(entries
            .iter()
            .any(|(k, v)| k == "timer.default_break_min" && v == "5"));
        assert!(entries.iter().any(|(k, _)| k == "player.exe_path"));
    }

    #[test]
    fn default_minutes_follows_kind() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.default_minutes(crate::mode::SessionKind::Work), 25);
        assert_eq!(cfg.default_minutes(crate::mode::SessionKind::Break), 5);
    }
}
