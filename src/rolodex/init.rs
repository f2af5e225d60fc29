use crate::api::RolodexApi;
use crate::config::RolodexConfig;
use crate::error::{RolodexError, Result};
use crate::manager::ContactManager;
use crate::store::fs::FileStorage;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Per-user data directory, e.g. `~/.local/share/rolodex` on Linux.
pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "rolodex", "rolodex")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| RolodexError::Config("Could not determine a data directory".to_string()))
}

/// Opens the contact file named by `config` and loads it.
pub fn initialize(data_dir: &Path, config: &RolodexConfig) -> Result<RolodexApi<FileStorage>> {
    let storage = FileStorage::new(config.data_path(data_dir));
    let mut manager = ContactManager::new(storage)
        .with_obfuscator(config.obfuscator()?)
        .with_backups(config.backup_manager(data_dir));
    manager.load()?;
    Ok(RolodexApi::new(manager, data_dir))
}

/// Re-encodes the contact file from `old`'s obfuscation key to `new`'s.
///
/// Returns how many contacts were rewritten. A missing file stays missing, and
/// a file that already decodes under the new key is left as it is.
pub fn rekey(data_dir: &Path, old: &RolodexConfig, new: &RolodexConfig) -> Result<usize> {
    let path = old.data_path(data_dir);
    if !path.exists() {
        return Ok(0);
    }

    let mut manager =
        ContactManager::new(FileStorage::new(&path)).with_obfuscator(old.obfuscator()?);
    let count = match manager.load() {
        Ok(count) => count,
        Err(err @ RolodexError::Decode { .. }) => {
            let mut current =
                ContactManager::new(FileStorage::new(&path)).with_obfuscator(new.obfuscator()?);
            return current.load().map_err(|_| err);
        }
        Err(e) => return Err(e),
    };

    let mut manager = manager.with_obfuscator(new.obfuscator()?);
    manager.save()?;
    info!("Contact file re-encoded with new key: {} contacts", count);
    Ok(count)
}
