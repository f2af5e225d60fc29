use crate::model::Contact;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate counts over the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_contacts: usize,
    pub favorites: usize,
    /// Contacts per non-empty company name.
    pub companies: BTreeMap<String, usize>,
    pub tags: BTreeMap<String, usize>,
}

impl Statistics {
    pub fn from_contacts(contacts: &[Contact]) -> Self {
        let mut stats = Statistics {
            total_contacts: contacts.len(),
            ..Default::default()
        };
        for contact in contacts {
            if contact.is_favorite() {
                stats.favorites += 1;
            }
            if !contact.company().is_empty() {
                *stats
                    .companies
                    .entry(contact.company().to_string())
                    .or_default() += 1;
            }
            for tag in contact.tags() {
                *stats.tags.entry(tag.clone()).or_default() += 1;
            }
        }
        stats
    }
}
