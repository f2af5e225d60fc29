//! Structured results handed from the API to UI clients.
//!
//! A [`CmdResult`] carries whatever a command produced (contacts, birthday
//! reminders, duplicate groups, statistics...) plus user-facing messages.
//! Rendering is left to the client.

use crate::birthdays::UpcomingBirthday;
use crate::config::RolodexConfig;
use crate::manager::{DuplicateGroup, ValidationIssue};
use crate::model::Contact;
use crate::stats::Statistics;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Contacts created, changed or removed by the command.
    pub affected_contacts: Vec<Contact>,
    pub listed_contacts: Vec<Contact>,
    pub birthdays: Vec<UpcomingBirthday>,
    pub duplicates: Vec<DuplicateGroup>,
    pub issues: Vec<ValidationIssue>,
    pub tags: Vec<(String, usize)>,
    pub stats: Option<Statistics>,
    pub paths: Vec<PathBuf>,
    pub config: Option<RolodexConfig>,
    pub messages: Vec<CmdMessage>,
    /// The collection changed and should be saved.
    pub modified: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.affected_contacts = contacts;
        self
    }

    pub fn with_listed_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.listed_contacts = contacts;
        self
    }

    pub fn with_birthdays(mut self, birthdays: Vec<UpcomingBirthday>) -> Self {
        self.birthdays = birthdays;
        self
    }

    pub fn with_duplicates(mut self, duplicates: Vec<DuplicateGroup>) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_issues(mut self, issues: Vec<ValidationIssue>) -> Self {
        self.issues = issues;
        self
    }

    pub fn with_tags(mut self, tags: Vec<(String, usize)>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_stats(mut self, stats: Statistics) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config(mut self, config: RolodexConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn modified(mut self) -> Self {
        self.modified = true;
        self
    }
}
