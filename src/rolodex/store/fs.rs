use super::ContactStorage;
use crate::error::{RolodexError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        let dir = self.dir();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(RolodexError::Io)?;
        }
        Ok(())
    }
}

impl ContactStorage for FileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RolodexError::Io(e)),
        }
    }

    fn save(&mut self, payload: &[u8]) -> Result<()> {
        self.ensure_dir()?;

        // Atomic write
        let tmp_path = self.dir().join(format!(".contacts-{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_path, payload) {
            let _ = fs::remove_file(&tmp_path);
            return Err(RolodexError::Io(e));
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(RolodexError::Io(e));
        }
        Ok(())
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
