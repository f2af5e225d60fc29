//! # Lookup indexes
//!
//! The store keeps its contacts in a `Vec` (insertion order, or the order of
//! the last sort). Three indexes sit beside it:
//!
//! - **phone → id**: one entry per non-empty phone number.
//! - **id → slot**: position of each contact in the collection.
//! - **tag → ids**: every contact carrying a tag. A tag with no contacts has
//!   no entry.
//!
//! Index values are ids or slots, never references, so reallocating or
//! reordering the collection cannot leave dangling entries. Slots do move when
//! the collection is reordered or shrinks, which is why sort and delete call
//! [`ContactIndex::rebuild`]. Single inserts, phone changes and tag edits
//! update the maps in place; the result must equal a full rebuild of the same
//! collection, and `ContactIndex` derives `PartialEq` so tests can check that.

use crate::model::{Contact, ContactId};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactIndex {
    by_phone: HashMap<String, ContactId>,
    by_id: HashMap<ContactId, usize>,
    by_tag: BTreeMap<String, BTreeSet<ContactId>>,
}

impl ContactIndex {
    pub fn build(contacts: &[Contact]) -> Self {
        let mut index = Self::default();
        index.rebuild(contacts);
        index
    }

    /// Clears every map and repopulates them in one pass over the collection.
    pub fn rebuild(&mut self, contacts: &[Contact]) {
        self.by_phone.clear();
        self.by_id.clear();
        self.by_tag.clear();
        for (slot, contact) in contacts.iter().enumerate() {
            self.insert(slot, contact);
        }
    }

    /// Registers a contact stored at `slot`.
    pub fn insert(&mut self, slot: usize, contact: &Contact) {
        if !contact.phone().is_empty() {
            self.by_phone.insert(contact.phone().to_string(), contact.id());
        }
        self.by_id.insert(contact.id(), slot);
        for tag in contact.tags() {
            self.add_tag(tag, contact.id());
        }
    }

    pub fn id_for_phone(&self, phone: &str) -> Option<ContactId> {
        self.by_phone.get(phone).copied()
    }

    pub fn slot_for_phone(&self, phone: &str) -> Option<usize> {
        self.id_for_phone(phone).and_then(|id| self.slot(id))
    }

    pub fn slot(&self, id: ContactId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn has_phone(&self, phone: &str) -> bool {
        self.by_phone.contains_key(phone)
    }

    /// Moves a phone key: the old key is removed before the new one is set.
    pub fn move_phone(&mut self, old: &str, new: &str, id: ContactId) {
        if self.by_phone.get(old) == Some(&id) {
            self.by_phone.remove(old);
        }
        if !new.is_empty() {
            self.by_phone.insert(new.to_string(), id);
        }
    }

    pub fn add_tag(&mut self, tag: &str, id: ContactId) {
        self.by_tag.entry(tag.to_string()).or_default().insert(id);
    }

    /// Drops `id` from the tag bucket, removing the bucket once it is empty.
    pub fn remove_tag(&mut self, tag: &str, id: ContactId) {
        if let Some(ids) = self.by_tag.get_mut(tag) {
            ids.remove(&id);
            if ids.is_empty() {
                self.by_tag.remove(tag);
            }
        }
    }

    pub fn ids_with_tag(&self, tag: &str) -> impl Iterator<Item = ContactId> + '_ {
        self.by_tag.get(tag).into_iter().flatten().copied()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// Every tag in use with the number of contacts carrying it, sorted by tag.
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        self.by_tag
            .iter()
            .map(|(tag, ids)| (tag.clone(), ids.len()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
