//! # Contact store
//!
//! [`ContactManager`] owns the contact collection, its [`ContactIndex`], the id
//! counter and the persistence pipeline:
//!
//! ```text
//! contacts ──codec::encode──▶ text ──XOR──▶ bytes ──ContactStorage::save──▶ file
//! file ──ContactStorage::load──▶ bytes ──XOR──▶ text ──codec::decode──▶ contacts
//! ```
//!
//! Every mutation validates first and touches nothing on failure. Once the
//! collection has changed, the index is brought in line (incrementally for
//! single inserts and tag edits, by a full rebuild after deletes and sorts)
//! and the auto-backup timer is checked. Statistics are computed on demand,
//! so they can never go stale.
//!
//! Persistence is explicit: nothing is written until [`ContactManager::save`]
//! (or [`ContactManager::close`]) is called.

use crate::backup::BackupManager;
use crate::birthdays::{self, UpcomingBirthday};
use crate::codec;
use crate::error::{RolodexError, Result};
use crate::export;
use crate::index::ContactIndex;
use crate::model::{Contact, ContactId, ContactUpdate, Field, NewContact};
use crate::obfuscate::XorObfuscator;
use crate::stats::Statistics;
use crate::store::ContactStorage;
use crate::validate::{is_single_line, is_valid_tag, RegexValidator, Validator};
use chrono::{Local, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Phone,
    Company,
    /// Most recently modified first.
    Recent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKind {
    Phone,
    Email,
}

/// Contacts sharing the same phone number or email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub kind: DuplicateKind,
    pub value: String,
    pub ids: Vec<ContactId>,
}

/// A stored value that no longer passes its validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub id: ContactId,
    pub field: Field,
    pub value: String,
}

pub struct ContactManager<S: ContactStorage> {
    contacts: Vec<Contact>,
    index: ContactIndex,
    next_id: u64,
    storage: S,
    obfuscator: XorObfuscator,
    validator: Box<dyn Validator>,
    backups: Option<BackupManager>,
}

impl<S: ContactStorage> ContactManager<S> {
    /// An empty manager over `storage`. Call [`load`](Self::load) to read it.
    pub fn new(storage: S) -> Self {
        Self {
            contacts: Vec::new(),
            index: ContactIndex::default(),
            next_id: 1,
            storage,
            obfuscator: XorObfuscator::default(),
            validator: Box::new(RegexValidator),
            backups: None,
        }
    }

    /// Default settings, loaded from `storage`.
    pub fn open(storage: S) -> Result<Self> {
        let mut manager = Self::new(storage);
        manager.load()?;
        Ok(manager)
    }

    pub fn with_obfuscator(mut self, obfuscator: XorObfuscator) -> Self {
        self.obfuscator = obfuscator;
        self
    }

    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn with_backups(mut self, backups: BackupManager) -> Self {
        self.backups = Some(backups);
        self
    }

    // --- Persistence ---

    /// Replaces the in-memory collection with the stored one.
    ///
    /// A missing payload yields an empty store. A payload that does not decode
    /// fails the whole load and leaves the current state untouched.
    pub fn load(&mut self) -> Result<usize> {
        let Some(bytes) = self.storage.load()? else {
            info!("No existing contact file found, starting fresh");
            self.replace_all(Vec::new());
            return Ok(0);
        };

        let contacts = self.decode_payload(&bytes)?;
        let count = contacts.len();
        self.replace_all(contacts);
        info!("Loaded {} contacts from file", count);
        Ok(count)
    }

    fn decode_payload(&self, bytes: &[u8]) -> Result<Vec<Contact>> {
        let plain = self.obfuscator.decrypt(bytes);
        let text = String::from_utf8(plain).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            let line = valid.iter().filter(|b| **b == b'\n').count() + 1;
            RolodexError::decode(line, "not valid UTF-8 (wrong obfuscation key?)")
        })?;

        let contacts = codec::decode(&text)?;
        let mut seen = HashSet::with_capacity(contacts.len());
        for contact in &contacts {
            if !seen.insert(contact.id()) {
                return Err(RolodexError::decode(
                    0,
                    format!("contact id {} appears more than once", contact.id()),
                ));
            }
        }
        Ok(contacts)
    }

    fn replace_all(&mut self, contacts: Vec<Contact>) {
        self.next_id = contacts.iter().map(|c| c.id().0).max().unwrap_or(0) + 1;
        self.index.rebuild(&contacts);
        self.contacts = contacts;
    }

    /// Writes every contact, in current order, replacing the stored payload.
    ///
    /// On failure the in-memory state is unchanged and the call can be retried.
    pub fn save(&mut self) -> Result<()> {
        let payload = self
            .obfuscator
            .encrypt(codec::encode(&self.contacts).as_bytes());
        if let Err(e) = self.storage.save(&payload) {
            error!("Failed to save contacts: {}", e);
            return Err(e);
        }
        info!("Contacts saved successfully: {} contacts", self.contacts.len());
        Ok(())
    }

    /// Saves and releases the store.
    pub fn close(mut self) -> Result<()> {
        self.save()
    }

    // --- Mutations ---

    pub fn add_contact(&mut self, fields: NewContact) -> Result<ContactId> {
        for field in Field::TEXT {
            let value = fields.text(field).unwrap_or_default();
            self.check_field(field, value).inspect_err(|_| {
                warn!("Failed to add contact: Invalid {} - {}", field, value);
            })?;
        }
        for tag in &fields.tags {
            check_tag(tag)?;
        }
        if self.index.has_phone(&fields.phone) {
            warn!("Failed to add contact: Duplicate phone - {}", fields.phone);
            return Err(RolodexError::DuplicatePhone(fields.phone));
        }

        let id = ContactId(self.next_id);
        self.next_id += 1;

        let contact = Contact::new(id, fields);
        info!("Contact added: {} ({})", contact.name(), contact.phone());
        let slot = self.contacts.len();
        self.contacts.push(contact);
        self.index.insert(slot, &self.contacts[slot]);

        self.after_mutation();
        Ok(id)
    }

    pub fn delete_contact(&mut self, phone: &str) -> Result<Contact> {
        let slot = self.slot_for_phone(phone)?;
        Ok(self.remove_slot(slot))
    }

    pub fn delete_contact_by_id(&mut self, id: ContactId) -> Result<Contact> {
        let slot = self
            .index
            .slot(id)
            .ok_or_else(|| RolodexError::NotFound(format!("id {}", id)))?;
        Ok(self.remove_slot(slot))
    }

    fn remove_slot(&mut self, slot: usize) -> Contact {
        let removed = self.contacts.remove(slot);
        // Every later slot shifted, and the contact may sit in several tag buckets.
        self.index.rebuild(&self.contacts);
        info!("Contact deleted: {} ({})", removed.name(), removed.phone());
        self.after_mutation();
        removed
    }

    /// Applies `update` to the contact with `phone`, all fields or none.
    pub fn edit_contact(&mut self, phone: &str, update: &ContactUpdate) -> Result<&Contact> {
        let slot = self.slot_for_phone(phone)?;
        let id = self.contacts[slot].id();
        let changes = update.changes();

        for (field, value) in &changes {
            self.check_field(*field, value).inspect_err(|_| {
                warn!("Failed to edit contact {}: Invalid {} - {}", id, field, value);
            })?;
            if *field == Field::Phone {
                if let Some(owner) = self.index.id_for_phone(value) {
                    if owner != id {
                        warn!("Failed to edit contact {}: Duplicate phone - {}", id, value);
                        return Err(RolodexError::DuplicatePhone(value.to_string()));
                    }
                }
            }
        }

        let old_phone = self.contacts[slot].phone().to_string();
        let contact = &mut self.contacts[slot];
        for (field, value) in changes {
            contact.set_text(field, value);
        }
        if update.toggle_favorite {
            contact.set_favorite(!contact.is_favorite());
        }
        let new_phone = contact.phone().to_string();
        if new_phone != old_phone {
            self.index.move_phone(&old_phone, &new_phone, id);
        }

        info!(
            "Contact updated: {} ({})",
            self.contacts[slot].name(),
            self.contacts[slot].phone()
        );
        self.after_mutation();
        Ok(&self.contacts[slot])
    }

    /// Returns false when the contact already had the tag.
    pub fn add_tag_to_contact(&mut self, phone: &str, tag: &str) -> Result<bool> {
        check_tag(tag)?;
        let slot = self.slot_for_phone(phone)?;
        let added = self.tag_slot(slot, tag);
        if added {
            info!("Tag '{}' added to contact ({})", tag, phone);
        }
        self.after_mutation();
        Ok(added)
    }

    /// Returns false when the contact did not have the tag.
    pub fn remove_tag_from_contact(&mut self, phone: &str, tag: &str) -> Result<bool> {
        let slot = self.slot_for_phone(phone)?;
        let contact = &mut self.contacts[slot];
        let removed = contact.remove_tag(tag);
        if removed {
            self.index.remove_tag(tag, contact.id());
            info!("Tag '{}' removed from contact ({})", tag, phone);
            self.after_mutation();
        }
        Ok(removed)
    }

    /// Tags every contact whose phone is known; unknown phones are skipped.
    /// Returns how many contacts were found.
    pub fn bulk_add_tags<P: AsRef<str>>(&mut self, phones: &[P], tag: &str) -> Result<usize> {
        check_tag(tag)?;
        let slots: Vec<usize> = phones
            .iter()
            .filter_map(|p| self.index.slot_for_phone(p.as_ref()))
            .collect();
        for slot in &slots {
            self.tag_slot(*slot, tag);
        }
        info!("Tag '{}' added to {} contacts", tag, slots.len());
        self.after_mutation();
        Ok(slots.len())
    }

    fn tag_slot(&mut self, slot: usize, tag: &str) -> bool {
        let contact = &mut self.contacts[slot];
        let added = contact.add_tag(tag);
        if added {
            self.index.add_tag(tag, contact.id());
        }
        added
    }

    /// Flips the favorite flag and returns the new value.
    pub fn toggle_favorite(&mut self, phone: &str) -> Result<bool> {
        let slot = self.slot_for_phone(phone)?;
        let contact = &mut self.contacts[slot];
        contact.set_favorite(!contact.is_favorite());
        let favorite = contact.is_favorite();
        info!(
            "Contact {} favorites ({})",
            if favorite { "added to" } else { "removed from" },
            phone
        );
        self.after_mutation();
        Ok(favorite)
    }

    /// Stable sort of the collection. Identity is unchanged; slots are rebuilt.
    pub fn sort_by(&mut self, key: SortKey) {
        match key {
            SortKey::Name => self.contacts.sort_by(|a, b| a.name().cmp(b.name())),
            SortKey::Phone => self.contacts.sort_by(|a, b| a.phone().cmp(b.phone())),
            SortKey::Company => self.contacts.sort_by(|a, b| a.company().cmp(b.company())),
            SortKey::Recent => self
                .contacts
                .sort_by(|a, b| b.modified_at().cmp(&a.modified_at())),
        }
        self.index.rebuild(&self.contacts);
        info!("Contacts sorted by {:?}", key);
        self.after_mutation();
    }

    fn after_mutation(&mut self) {
        let (Some(backups), Some(source)) = (self.backups.as_mut(), self.storage.path()) else {
            return;
        };
        match backups.check(source, Utc::now()) {
            Ok(Some(path)) => info!("Auto-backup created successfully: {}", path.display()),
            Ok(None) => {}
            Err(e) => warn!("Auto-backup failed: {}", e),
        }
    }

    fn check_field(&self, field: Field, value: &str) -> Result<()> {
        if !is_single_line(value) || !self.validator.is_valid(field, value) {
            return Err(RolodexError::invalid(field, value));
        }
        Ok(())
    }

    fn slot_for_phone(&self, phone: &str) -> Result<usize> {
        self.index
            .slot_for_phone(phone)
            .ok_or_else(|| RolodexError::NotFound(format!("phone {}", phone)))
    }

    // --- Queries ---

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    pub fn phone_exists(&self, phone: &str) -> bool {
        self.index.has_phone(phone)
    }

    pub fn get_contact(&self, id: ContactId) -> Option<&Contact> {
        self.index.slot(id).map(|slot| &self.contacts[slot])
    }

    pub fn find_by_phone(&self, phone: &str) -> Option<&Contact> {
        self.index.slot_for_phone(phone).map(|slot| &self.contacts[slot])
    }

    pub fn search_by_name(&self, term: &str) -> Vec<&Contact> {
        self.search_text(Field::Name, term)
    }

    pub fn search_by_email(&self, term: &str) -> Vec<&Contact> {
        self.search_text(Field::Email, term)
    }

    pub fn search_by_company(&self, term: &str) -> Vec<&Contact> {
        self.search_text(Field::Company, term)
    }

    fn search_text(&self, field: Field, term: &str) -> Vec<&Contact> {
        let term = term.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| {
                c.text(field)
                    .is_some_and(|v| v.to_lowercase().contains(&term))
            })
            .collect()
    }

    /// Exact phone lookup, falling back to a substring scan.
    pub fn search_by_phone(&self, term: &str) -> Vec<&Contact> {
        if let Some(contact) = self.find_by_phone(term) {
            return vec![contact];
        }
        self.contacts
            .iter()
            .filter(|c| c.phone().contains(term))
            .collect()
    }

    /// Exact tag lookup, in collection order.
    pub fn search_by_tag(&self, tag: &str) -> Vec<&Contact> {
        let mut slots: Vec<usize> = self
            .index
            .ids_with_tag(tag)
            .filter_map(|id| self.index.slot(id))
            .collect();
        slots.sort_unstable();
        slots.into_iter().map(|slot| &self.contacts[slot]).collect()
    }

    pub fn global_search(&self, query: &str) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|c| c.matches_search(query))
            .collect()
    }

    pub fn favorites(&self) -> Vec<&Contact> {
        self.contacts.iter().filter(|c| c.is_favorite()).collect()
    }

    /// The `count` most recently modified contacts. The store order is kept.
    pub fn recent(&self, count: usize) -> Vec<&Contact> {
        let mut recent: Vec<&Contact> = self.contacts.iter().collect();
        recent.sort_by(|a, b| b.modified_at().cmp(&a.modified_at()));
        recent.truncate(count);
        recent
    }

    pub fn list_tags(&self) -> Vec<(String, usize)> {
        self.index.tag_counts()
    }

    pub fn stats(&self) -> Statistics {
        Statistics::from_contacts(&self.contacts)
    }

    /// Groups of contacts sharing a non-empty phone, then a non-empty email.
    pub fn find_duplicates(&self) -> Vec<DuplicateGroup> {
        let mut by_phone: BTreeMap<&str, Vec<ContactId>> = BTreeMap::new();
        let mut by_email: BTreeMap<&str, Vec<ContactId>> = BTreeMap::new();
        for contact in &self.contacts {
            if !contact.phone().is_empty() {
                by_phone.entry(contact.phone()).or_default().push(contact.id());
            }
            if !contact.email().is_empty() {
                by_email.entry(contact.email()).or_default().push(contact.id());
            }
        }

        let mut groups = duplicate_groups(DuplicateKind::Phone, by_phone);
        groups.extend(duplicate_groups(DuplicateKind::Email, by_email));
        groups
    }

    pub fn upcoming_birthdays(&self, window_days: u32) -> Vec<UpcomingBirthday> {
        self.upcoming_birthdays_on(window_days, Local::now().date_naive())
    }

    pub fn upcoming_birthdays_on(&self, window_days: u32, today: NaiveDate) -> Vec<UpcomingBirthday> {
        birthdays::upcoming(&self.contacts, window_days, today)
    }

    /// Re-runs the name, phone and email validators over every contact.
    pub fn validate_all(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for contact in &self.contacts {
            for field in [Field::Name, Field::Phone, Field::Email] {
                let value = contact.text(field).unwrap_or_default();
                if !self.validator.is_valid(field, value) {
                    issues.push(ValidationIssue {
                        id: contact.id(),
                        field,
                        value: value.to_string(),
                    });
                }
            }
        }
        issues
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        export::export_csv(path, &self.contacts)?;
        info!("Contacts exported to CSV: {}", path.display());
        Ok(())
    }

    // --- Backups ---

    fn backup_parts(&mut self) -> Result<(&mut BackupManager, &Path)> {
        let backups = self
            .backups
            .as_mut()
            .ok_or_else(|| RolodexError::Api("Backups are not configured".to_string()))?;
        let source = self
            .storage
            .path()
            .ok_or_else(|| RolodexError::Api("Storage has no file to back up".to_string()))?;
        Ok((backups, source))
    }

    pub fn create_backup(&mut self) -> Result<PathBuf> {
        let (backups, source) = self.backup_parts()?;
        let path = backups.create_backup(source)?;
        info!("Manual backup created: {}", path.display());
        Ok(path)
    }

    pub fn list_backups(&self) -> Result<Vec<PathBuf>> {
        match &self.backups {
            Some(backups) => backups.list_backups(),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the collection and the stored payload with `backup`.
    ///
    /// The backup is decoded before anything is written; one that does not
    /// decode leaves both the store and the in-memory state untouched.
    pub fn restore_backup(&mut self, backup: &Path) -> Result<usize> {
        let backups = self
            .backups
            .as_ref()
            .ok_or_else(|| RolodexError::Api("Backups are not configured".to_string()))?;
        let bytes = backups.read_backup(backup)?;
        let contacts = self.decode_payload(&bytes).inspect_err(|e| {
            warn!("Backup {} not restored: {}", backup.display(), e);
        })?;

        self.storage.save(&bytes)?;
        let count = contacts.len();
        self.replace_all(contacts);
        info!("Backup restored: {}", backup.display());
        Ok(count)
    }

    // --- Accessors ---

    pub fn index(&self) -> &ContactIndex {
        &self.index
    }

    pub fn next_id(&self) -> ContactId {
        ContactId(self.next_id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

fn duplicate_groups(
    kind: DuplicateKind,
    map: BTreeMap<&str, Vec<ContactId>>,
) -> Vec<DuplicateGroup> {
    map.into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(value, ids)| DuplicateGroup {
            kind,
            value: value.to_string(),
            ids,
        })
        .collect()
}

fn check_tag(tag: &str) -> Result<()> {
    if !is_valid_tag(tag) {
        warn!("Rejected tag {:?}", tag);
        return Err(RolodexError::invalid(Field::Tag, tag));
    }
    Ok(())
}


#[cfg(test)]
mod file_tests {
    use super::*;
    use crate::test_utils::{sample_contacts, TestEnv};
    use chrono::Duration;

    #[test]
    fn contacts_survive_reopen() {
        let env = TestEnv::new();
        let mut manager = env.open();
        for fields in sample_contacts() {
            manager.add_contact(fields).unwrap();
        }
        manager.toggle_favorite("555-0199").unwrap();
        let before = manager.contacts().to_vec();
        manager.close().unwrap();

        let reopened = env.open();
        assert_eq!(reopened.contacts(), &before[..]);
        assert_eq!(reopened.search_by_tag("work").len(), 2);
        assert_eq!(reopened.next_id(), ContactId(4));
    }

    #[test]
    fn nothing_is_written_until_save() {
        let env = TestEnv::new();
        let mut manager = env.open();
        manager
            .add_contact(NewContact::new("Ann Lee", "555-0100"))
            .unwrap();
        assert!(!env.data_file.exists());
        manager.save().unwrap();
        assert!(env.data_file.exists());
    }

    #[test]
    fn due_backup_runs_after_mutation() {
        let env = TestEnv::new();
        let mut manager = env.open();
        manager
            .add_contact(NewContact::new("Ann Lee", "555-0100"))
            .unwrap();
        manager.save().unwrap();

        let overdue = BackupManager::new(&env.backup_dir, Duration::seconds(60))
            .with_last_backup(Utc::now() - Duration::hours(1));
        let mut manager = env.open_with_backups(overdue);
        manager.toggle_favorite("555-0100").unwrap();

        assert_eq!(manager.list_backups().unwrap().len(), 1);
        // Timer reset: the next mutation does not copy again.
        manager.toggle_favorite("555-0100").unwrap();
        assert_eq!(manager.list_backups().unwrap().len(), 1);
    }

    #[test]
    fn failed_auto_backup_does_not_fail_the_mutation() {
        let env = TestEnv::new();
        // No contact file on disk yet, so there is nothing to copy.
        let overdue = BackupManager::new(&env.backup_dir, Duration::zero());
        let mut manager = env.open_with_backups(overdue);
        assert!(manager
            .add_contact(NewContact::new("Ann Lee", "555-0100"))
            .is_ok());
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn restore_replaces_collection() {
        let env = TestEnv::new();
        let backups = BackupManager::new(&env.backup_dir, Duration::hours(1));
        let mut manager = env.open_with_backups(backups);
        manager
            .add_contact(NewContact::new("Ann Lee", "555-0100"))
            .unwrap();
        manager.save().unwrap();
        let backup = manager.create_backup().unwrap();

        manager
            .add_contact(NewContact::new("Bo Diaz", "555-0199"))
            .unwrap();
        manager.save().unwrap();
        assert_eq!(manager.contact_count(), 2);

        assert_eq!(manager.restore_backup(&backup).unwrap(), 1);
        assert!(!manager.phone_exists("555-0199"));
        assert_eq!(manager.next_id(), ContactId(2));
    }

    #[test]
    fn undecodable_backup_leaves_store_untouched() {
        let env = TestEnv::new();
        let backups = BackupManager::new(&env.backup_dir, Duration::hours(1));
        let mut manager = env.open_with_backups(backups);
        manager
            .add_contact(NewContact::new("Ann Lee", "555-0100"))
            .unwrap();
        manager.save().unwrap();
        let before = std::fs::read(&env.data_file).unwrap();

        std::fs::create_dir_all(&env.backup_dir).unwrap();
        let garbage = env.backup_dir.join("backup_20200101_000000.dat");
        std::fs::write(&garbage, b"\xff\xfe not a contact file").unwrap();

        assert!(matches!(
            manager.restore_backup(&garbage),
            Err(RolodexError::Decode { .. })
        ));
        assert_eq!(manager.contact_count(), 1);
        assert_eq!(std::fs::read(&env.data_file).unwrap(), before);
        assert_eq!(env.open().contact_count(), 1);
    }

    #[test]
    fn sorting_checks_the_backup_timer() {
        let env = TestEnv::new();
        let mut manager = env.open();
        manager
            .add_contact(NewContact::new("Bo Diaz", "555-0199"))
            .unwrap();
        manager
            .add_contact(NewContact::new("Ann Lee", "555-0100"))
            .unwrap();
        manager.save().unwrap();

        let overdue = BackupManager::new(&env.backup_dir, Duration::seconds(60))
            .with_last_backup(Utc::now() - Duration::hours(1));
        let mut manager = env.open_with_backups(overdue);
        manager.sort_by(SortKey::Name);
        assert_eq!(manager.list_backups().unwrap().len(), 1);
    }

    #[test]
    fn truncated_file_reports_line() {
        let env = TestEnv::new();
        let mut manager = env.open();
        manager
            .add_contact(NewContact::new("Ann Lee", "555-0100"))
            .unwrap();
        manager.save().unwrap();

        let bytes = std::fs::read(&env.data_file).unwrap();
        std::fs::write(&env.data_file, &bytes[..bytes.len() / 2]).unwrap();

        let mut reopened = ContactManager::new(env.storage());
        match reopened.load() {
            Err(RolodexError::Decode { line, .. }) => assert!(line > 1),
            other => panic!("expected decode error, got {:?}", other.map(|_| ())),
        }
    }
}
