use crate::backup::BackupManager;
use crate::error::{RolodexError, Result};
use crate::obfuscate::{XorObfuscator, DEFAULT_KEY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Keys accepted by [`RolodexConfig::get`] and [`RolodexConfig::set`].
pub const CONFIG_KEYS: [&str; 6] = [
    "data-file",
    "backup-dir",
    "auto-backup",
    "backup-interval",
    "obfuscation-key",
    "log-file",
];

/// Configuration for rolodex, stored in `<data dir>/config.json`.
///
/// Relative paths are resolved against the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RolodexConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,

    #[serde(default = "default_auto_backup")]
    pub auto_backup: bool,

    /// Seconds between automatic backups
    #[serde(default = "default_backup_interval")]
    pub backup_interval_secs: u64,

    #[serde(default = "default_obfuscation_key")]
    pub obfuscation_key: String,

    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("contacts.dat")
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from("backups")
}

fn default_auto_backup() -> bool {
    true
}

fn default_backup_interval() -> u64 {
    3600
}

fn default_obfuscation_key() -> String {
    DEFAULT_KEY.to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("contact_manager.log")
}

impl Default for RolodexConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            backup_dir: default_backup_dir(),
            auto_backup: default_auto_backup(),
            backup_interval_secs: default_backup_interval(),
            obfuscation_key: default_obfuscation_key(),
            log_file: default_log_file(),
        }
    }
}

impl RolodexConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RolodexError::Io)?;
        let config: RolodexConfig =
            serde_json::from_str(&content).map_err(RolodexError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RolodexError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RolodexError::Serialization)?;
        fs::write(config_path, content).map_err(RolodexError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "data-file" => self.data_file.display().to_string(),
            "backup-dir" => self.backup_dir.display().to_string(),
            "auto-backup" => self.auto_backup.to_string(),
            "backup-interval" => self.backup_interval_secs.to_string(),
            "obfuscation-key" => self.obfuscation_key.clone(),
            "log-file" => self.log_file.display().to_string(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "data-file" => self.data_file = non_empty_path(key, value)?,
            "backup-dir" => self.backup_dir = non_empty_path(key, value)?,
            "log-file" => self.log_file = non_empty_path(key, value)?,
            "auto-backup" => {
                self.auto_backup = match value.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(format!("auto-backup expects true or false, got {}", value)),
                }
            }
            "backup-interval" => {
                self.backup_interval_secs = value
                    .parse()
                    .map_err(|_| format!("backup-interval expects seconds, got {}", value))?
            }
            "obfuscation-key" => {
                if value.is_empty() {
                    return Err("obfuscation-key cannot be empty".to_string());
                }
                self.obfuscation_key = value.to_string();
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn data_path(&self, data_dir: &Path) -> PathBuf {
        resolve(data_dir, &self.data_file)
    }

    pub fn backup_path(&self, data_dir: &Path) -> PathBuf {
        resolve(data_dir, &self.backup_dir)
    }

    pub fn log_path(&self, data_dir: &Path) -> PathBuf {
        resolve(data_dir, &self.log_file)
    }

    pub fn obfuscator(&self) -> Result<XorObfuscator> {
        XorObfuscator::new(&self.obfuscation_key)
    }

    pub fn backup_manager(&self, data_dir: &Path) -> BackupManager {
        let dir = self.backup_path(data_dir);
        if self.auto_backup {
            let secs = i64::try_from(self.backup_interval_secs).unwrap_or(i64::MAX);
            BackupManager::new(dir, chrono::Duration::seconds(secs))
        } else {
            BackupManager::disabled(dir)
        }
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn non_empty_path(key: &str, value: &str) -> std::result::Result<PathBuf, String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", key));
    }
    Ok(PathBuf::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RolodexConfig::default();
        assert_eq!(config.data_file, PathBuf::from("contacts.dat"));
        assert_eq!(config.backup_interval_secs, 3600);
        assert!(config.auto_backup);
        assert_eq!(config.obfuscation_key, DEFAULT_KEY);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = RolodexConfig::load(temp.path().join("nowhere")).unwrap();
        assert_eq!(config, RolodexConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let mut config = RolodexConfig::default();
        config.set("backup-interval", "60").unwrap();
        config.set("auto-backup", "off").unwrap();
        config.save(temp.path()).unwrap();

        let loaded = RolodexConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.backup_interval_secs, 60);
        assert!(!loaded.auto_backup);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"auto_backup": false}"#).unwrap();

        let config = RolodexConfig::load(temp.path()).unwrap();
        assert!(!config.auto_backup);
        assert_eq!(config.log_file, PathBuf::from("contact_manager.log"));
    }

    #[test]
    fn test_get_every_key() {
        let config = RolodexConfig::default();
        for key in CONFIG_KEYS {
            assert!(config.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(config.get("colour"), None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = RolodexConfig::default();
        assert!(config.set("backup-interval", "soon").is_err());
        assert!(config.set("auto-backup", "maybe").is_err());
        assert!(config.set("obfuscation-key", "").is_err());
        assert!(config.set("data-file", " ").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, RolodexConfig::default());
    }

    #[test]
    fn test_relative_paths_resolve_against_data_dir() {
        let mut config = RolodexConfig::default();
        let base = Path::new("/srv/rolodex");
        assert_eq!(config.data_path(base), base.join("contacts.dat"));

        let absolute = std::env::temp_dir().join("elsewhere.dat");
        config.data_file = absolute.clone();
        assert_eq!(config.data_path(base), absolute);
    }

    #[test]
    fn test_disabled_backups() {
        let mut config = RolodexConfig::default();
        config.auto_backup = false;
        assert!(!config.backup_manager(Path::new("/tmp")).is_enabled());
    }
}
