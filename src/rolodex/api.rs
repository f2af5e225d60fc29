//! # API Facade
//!
//! [`RolodexApi`] is the single entry point for UI clients. Each method calls
//! into [`ContactManager`] and packages the outcome as a [`CmdResult`]; it
//! holds no contact logic of its own and never prints.
//!
//! `RolodexApi<S: ContactStorage>` is generic over the storage backend:
//! - Production: `RolodexApi<FileStorage>`
//! - Testing: `RolodexApi<MemoryStorage>`
//!
//! Mutating methods set [`CmdResult::modified`]; the caller decides when to
//! [`save`](RolodexApi::save).

use crate::commands::{CmdMessage, CmdResult};
use crate::config::RolodexConfig;
use crate::error::{RolodexError, Result};
use crate::init::rekey;
use crate::manager::{ContactManager, SortKey};
use crate::model::{Contact, ContactId, ContactUpdate, NewContact};
use crate::store::ContactStorage;
use std::path::{Path, PathBuf};

const DEFAULT_EXPORT_FILE: &str = "contacts_export.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Favorites,
    /// The N most recently modified contacts.
    Recent(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Phone,
    Email,
    Company,
    Tag,
    All,
}

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub struct RolodexApi<S: ContactStorage> {
    manager: ContactManager<S>,
    data_dir: PathBuf,
}

impl<S: ContactStorage> RolodexApi<S> {
    pub fn new(manager: ContactManager<S>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            manager,
            data_dir: data_dir.into(),
        }
    }

    pub fn add_contact(&mut self, fields: NewContact) -> Result<CmdResult> {
        let id = self.manager.add_contact(fields)?;
        let contact = self.contact(id)?;
        let message = format!("Contact added: {} (id {})", contact.name(), id);
        Ok(CmdResult::default()
            .with_affected_contacts(vec![contact])
            .with_message(CmdMessage::success(message))
            .modified())
    }

    pub fn list_contacts(&self, filter: ListFilter) -> Result<CmdResult> {
        let listed = match filter {
            ListFilter::All => self.manager.contacts().iter().collect(),
            ListFilter::Favorites => self.manager.favorites(),
            ListFilter::Recent(n) => self.manager.recent(n),
        };
        Ok(CmdResult::default().with_listed_contacts(cloned(listed)))
    }

    pub fn show_contact(&self, id: ContactId) -> Result<CmdResult> {
        let contact = self.contact(id)?;
        Ok(CmdResult::default().with_listed_contacts(vec![contact]))
    }

    pub fn search(&self, field: SearchField, term: &str) -> Result<CmdResult> {
        let found = match field {
            SearchField::Name => self.manager.search_by_name(term),
            SearchField::Phone => self.manager.search_by_phone(term),
            SearchField::Email => self.manager.search_by_email(term),
            SearchField::Company => self.manager.search_by_company(term),
            SearchField::Tag => self.manager.search_by_tag(term),
            SearchField::All => self.manager.global_search(term),
        };
        let mut result = CmdResult::default();
        if found.is_empty() {
            result.add_message(CmdMessage::info(format!("No contacts match '{}'", term)));
        }
        result.listed_contacts = cloned(found);
        Ok(result)
    }

    pub fn edit_contact(&mut self, phone: &str, update: &ContactUpdate) -> Result<CmdResult> {
        if update.is_empty() {
            return Ok(CmdResult::default().with_message(CmdMessage::warning("Nothing to change")));
        }
        let contact = self.manager.edit_contact(phone, update)?.clone();
        let message = format!("Contact updated: {}", contact.name());
        Ok(CmdResult::default()
            .with_affected_contacts(vec![contact])
            .with_message(CmdMessage::success(message))
            .modified())
    }

    pub fn delete_by_phone(&mut self, phone: &str) -> Result<CmdResult> {
        let removed = self.manager.delete_contact(phone)?;
        Ok(deleted(removed))
    }

    pub fn delete_by_id(&mut self, id: ContactId) -> Result<CmdResult> {
        let removed = self.manager.delete_contact_by_id(id)?;
        Ok(deleted(removed))
    }

    pub fn sort(&mut self, key: SortKey) -> Result<CmdResult> {
        self.manager.sort_by(key);
        Ok(CmdResult::default()
            .with_listed_contacts(self.manager.contacts().to_vec())
            .modified())
    }

    /// Tags one or more contacts. Unknown phones are reported, not fatal,
    /// unless none of them exist.
    pub fn tag_contacts<P: AsRef<str>>(&mut self, phones: &[P], tag: &str) -> Result<CmdResult> {
        if phones.is_empty() {
            return Ok(CmdResult::default().with_message(CmdMessage::warning("No contacts given")));
        }
        let missing: Vec<&str> = phones
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| !self.manager.phone_exists(p))
            .collect();
        if missing.len() == phones.len() {
            return Err(RolodexError::NotFound(format!("phone {}", missing.join(", "))));
        }

        let tagged = self.manager.bulk_add_tags(phones, tag)?;
        let mut result = CmdResult::default()
            .with_message(CmdMessage::success(format!(
                "Tag '{}' added to {} contact(s)",
                tag, tagged
            )))
            .modified();
        for phone in missing {
            result.add_message(CmdMessage::warning(format!("No contact with phone {}", phone)));
        }
        Ok(result)
    }

    pub fn untag_contact(&mut self, phone: &str, tag: &str) -> Result<CmdResult> {
        if self.manager.remove_tag_from_contact(phone, tag)? {
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!("Tag '{}' removed", tag)))
                .modified())
        } else {
            Ok(CmdResult::default()
                .with_message(CmdMessage::info(format!("Contact had no tag '{}'", tag))))
        }
    }

    pub fn list_tags(&self) -> Result<CmdResult> {
        Ok(CmdResult::default().with_tags(self.manager.list_tags()))
    }

    pub fn toggle_favorite(&mut self, phone: &str) -> Result<CmdResult> {
        let favorite = self.manager.toggle_favorite(phone)?;
        let message = if favorite {
            "Added to favorites"
        } else {
            "Removed from favorites"
        };
        Ok(CmdResult::default()
            .with_message(CmdMessage::success(message))
            .modified())
    }

    pub fn stats(&self) -> Result<CmdResult> {
        Ok(CmdResult::default().with_stats(self.manager.stats()))
    }

    pub fn export_csv(&self, path: Option<&Path>) -> Result<CmdResult> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_EXPORT_FILE));
        self.manager.export_csv(&path)?;
        Ok(CmdResult::default()
            .with_message(CmdMessage::success(format!(
                "Exported {} contacts to {}",
                self.manager.contact_count(),
                path.display()
            )))
            .with_paths(vec![path]))
    }

    pub fn duplicates(&self) -> Result<CmdResult> {
        let groups = self.manager.find_duplicates();
        let mut result = CmdResult::default();
        if groups.is_empty() {
            result.add_message(CmdMessage::info("No duplicates found"));
        }
        Ok(result.with_duplicates(groups))
    }

    pub fn birthdays(&self, window_days: u32) -> Result<CmdResult> {
        let upcoming = self.manager.upcoming_birthdays(window_days);
        let mut result = CmdResult::default();
        if upcoming.is_empty() {
            result.add_message(CmdMessage::info(format!(
                "No birthdays in the next {} days",
                window_days
            )));
        }
        Ok(result.with_birthdays(upcoming))
    }

    pub fn validate(&self) -> Result<CmdResult> {
        let issues = self.manager.validate_all();
        let mut result = CmdResult::default();
        if issues.is_empty() {
            result.add_message(CmdMessage::success("All contacts are valid"));
        }
        Ok(result.with_issues(issues))
    }

    pub fn backup_create(&mut self) -> Result<CmdResult> {
        let path = self.manager.create_backup()?;
        Ok(CmdResult::default()
            .with_message(CmdMessage::success(format!(
                "Backup created: {}",
                path.display()
            )))
            .with_paths(vec![path]))
    }

    pub fn backup_list(&self) -> Result<CmdResult> {
        let backups = self.manager.list_backups()?;
        let mut result = CmdResult::default();
        if backups.is_empty() {
            result.add_message(CmdMessage::info("No backups yet"));
        }
        Ok(result.with_paths(backups))
    }

    /// Restores `backup`, which may be a bare file name inside the backup
    /// directory.
    pub fn backup_restore(&mut self, backup: &Path) -> Result<CmdResult> {
        let path = if backup.components().count() == 1 && !backup.exists() {
            self.manager
                .list_backups()?
                .into_iter()
                .find(|p| p.file_name() == Some(backup.as_os_str()))
                .unwrap_or_else(|| backup.to_path_buf())
        } else {
            backup.to_path_buf()
        };
        let count = self.manager.restore_backup(&path)?;
        Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Restored {} contacts from {}",
            count,
            path.display()
        ))))
    }

    pub fn save(&mut self) -> Result<()> {
        self.manager.save()
    }

    pub fn close(self) -> Result<()> {
        self.manager.close()
    }

    pub fn manager(&self) -> &ContactManager<S> {
        &self.manager
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn contact(&self, id: ContactId) -> Result<Contact> {
        self.manager
            .get_contact(id)
            .cloned()
            .ok_or_else(|| RolodexError::NotFound(format!("id {}", id)))
    }
}

/// Reads or changes `<data_dir>/config.json`.
///
/// Needs no open store, so it works even when the contact file cannot be
/// decoded. Changing `obfuscation-key` re-encodes the contact file first.
pub fn configure(data_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = RolodexConfig::load(data_dir)?;
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => {
            let message = match config.get(&key) {
                Some(value) => CmdMessage::info(value),
                None => CmdMessage::error(format!("Unknown config key: {}", key)),
            };
            Ok(CmdResult::default().with_message(message))
        }
        ConfigAction::Set(key, value) => {
            let previous = config.clone();
            if let Err(e) = config.set(&key, &value) {
                return Ok(CmdResult::default().with_message(CmdMessage::error(e)));
            }

            let mut result = CmdResult::default();
            if config.obfuscation_key != previous.obfuscation_key {
                let count = rekey(data_dir, &previous, &config)?;
                result.add_message(CmdMessage::info(format!(
                    "Re-encoded {} contacts with the new key",
                    count
                )));
            }
            config.save(data_dir)?;

            let shown = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            Ok(result.with_config(config))
        }
    }
}

fn cloned(contacts: Vec<&Contact>) -> Vec<Contact> {
    contacts.into_iter().cloned().collect()
}

fn deleted(removed: Contact) -> CmdResult {
    let message = format!("Contact deleted: {}", removed.name());
    CmdResult::default()
        .with_affected_contacts(vec![removed])
        .with_message(CmdMessage::success(message))
        .modified()
}
