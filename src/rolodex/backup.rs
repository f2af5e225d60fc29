//! Timestamped copies of the contact file.
//!
//! [`BackupManager`] owns the backup directory and the auto-backup timer. The
//! store calls [`BackupManager::check`] after every mutation; a copy is made
//! once `interval` has elapsed since the last successful backup. A failed copy
//! leaves the timer untouched so the next mutation retries.
//!
//! Restoring is the store's job: it reads a backup here, decodes it, and only
//! then writes it through its own storage.

use crate::error::{RolodexError, Result};
use chrono::{DateTime, Duration, Local, Utc};
use std::fs;
use std::path::{Path, PathBuf};

const BACKUP_PREFIX: &str = "backup_";
const BACKUP_EXT: &str = "dat";

#[derive(Debug, Clone)]
pub struct BackupManager {
    dir: PathBuf,
    enabled: bool,
    interval: Duration,
    last_backup: DateTime<Utc>,
}

impl BackupManager {
    pub fn new(dir: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            dir: dir.into(),
            enabled: true,
            interval,
            last_backup: Utc::now(),
        }
    }

    pub fn disabled(dir: impl Into<PathBuf>) -> Self {
        Self {
            enabled: false,
            ..Self::new(dir, Duration::zero())
        }
    }

    pub fn with_last_backup(mut self, at: DateTime<Utc>) -> Self {
        self.last_backup = at;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn last_backup(&self) -> DateTime<Utc> {
        self.last_backup
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.enabled && now.signed_duration_since(self.last_backup) >= self.interval
    }

    /// Auto-backup hook. Returns the new backup path when one was written.
    pub fn check(&mut self, source: &Path, now: DateTime<Utc>) -> Result<Option<PathBuf>> {
        if !self.is_due(now) {
            return Ok(None);
        }
        let path = self.create_backup_at(source, now.with_timezone(&Local))?;
        self.last_backup = now;
        Ok(Some(path))
    }

    /// Copies `source` into the backup directory now.
    pub fn create_backup(&mut self, source: &Path) -> Result<PathBuf> {
        let path = self.create_backup_at(source, Local::now())?;
        self.last_backup = Utc::now();
        Ok(path)
    }

    fn create_backup_at(&self, source: &Path, at: DateTime<Local>) -> Result<PathBuf> {
        if !source.exists() {
            return Err(RolodexError::NotFound(format!(
                "nothing to back up at {}",
                source.display()
            )));
        }
        fs::create_dir_all(&self.dir).map_err(RolodexError::Io)?;

        let stem = format!("{}{}", BACKUP_PREFIX, at.format("%Y%m%d_%H%M%S"));
        let mut target = self.dir.join(format!("{}.{}", stem, BACKUP_EXT));
        let mut n = 1;
        while target.exists() {
            target = self.dir.join(format!("{}_{}.{}", stem, n, BACKUP_EXT));
            n += 1;
        }

        fs::copy(source, &target).map_err(RolodexError::Io)?;
        Ok(target)
    }

    /// Backup files in the directory, newest first.
    pub fn list_backups(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(RolodexError::Io)? {
            let path = entry.map_err(RolodexError::Io)?.path();
            let is_backup = path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(BACKUP_PREFIX))
                && path.extension().and_then(|e| e.to_str()) == Some(BACKUP_EXT);
            if is_backup {
                backups.push(path);
            }
        }
        // Names embed the timestamp, so lexical order is chronological.
        backups.sort();
        backups.reverse();
        Ok(backups)
    }

    /// Raw contents of `backup`, for the store to decode before restoring.
    pub fn read_backup(&self, backup: &Path) -> Result<Vec<u8>> {
        if !backup.is_file() {
            return Err(RolodexError::NotFound(format!(
                "backup {}",
                backup.display()
            )));
        }
        fs::read(backup).map_err(RolodexError::Io)
    }
}
