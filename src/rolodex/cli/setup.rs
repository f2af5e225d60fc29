use clap::{Args, Parser, Subcommand, ValueEnum};
use rolodex::api::SearchField;
use rolodex::manager::SortKey;
use rolodex::model::{ContactUpdate, Field, NewContact};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rolodex", bin_name = "rolodex", version)]
#[command(about = "Personal contact database", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to the per-user data dir)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new contact
    #[command(alias = "a")]
    Add(AddArgs),

    /// List contacts
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show every field of a contact
    #[command(alias = "v")]
    Show {
        /// Contact id
        id: String,
    },

    /// Search contacts
    #[command(alias = "s")]
    Search {
        term: String,

        /// Field to search
        #[arg(short, long, value_enum, default_value_t = SearchBy::All)]
        by: SearchBy,
    },

    /// Edit the contact with the given phone number
    #[command(alias = "e")]
    Edit(EditArgs),

    /// Delete a contact by phone number or id
    #[command(alias = "rm")]
    Delete {
        /// Phone number of the contact
        #[arg(required_unless_present = "id", conflicts_with = "id")]
        phone: Option<String>,

        /// Contact id
        #[arg(long)]
        id: Option<String>,
    },

    /// Reorder the stored collection
    Sort {
        #[arg(value_enum)]
        key: SortBy,
    },

    /// Collection statistics
    Stats,

    /// Manage tags
    #[command(subcommand)]
    Tag(TagCommands),

    /// Toggle a contact's favorite flag
    #[command(alias = "fav")]
    Favorite { phone: String },

    /// Export all contacts as CSV
    Export {
        /// Output file (defaults to contacts_export.csv in the data dir)
        path: Option<PathBuf>,
    },

    /// Contacts sharing a phone number or email
    Duplicates,

    /// Upcoming birthdays
    Birthdays {
        /// Days ahead to look
        #[arg(short, long, default_value_t = 30)]
        days: u32,
    },

    /// Re-check stored values against the format rules
    Validate,

    /// Manage backups
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., backup-interval)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// Add a tag to one or more contacts
    Add {
        tag: String,

        /// Phone numbers of the contacts
        #[arg(required = true, num_args = 1..)]
        phones: Vec<String>,
    },

    /// Remove a tag from a contact
    Remove { tag: String, phone: String },

    /// List tags with their usage counts
    List,
}

#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Copy the contact file into the backup directory now
    Create,

    /// List backups, newest first
    List,

    /// Replace the contact file with a backup
    Restore {
        /// Backup file name or path
        backup: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only favorites
    #[arg(long, conflicts_with = "recent")]
    pub favorites: bool,

    /// Only the N most recently modified
    #[arg(long, value_name = "N")]
    pub recent: Option<usize>,

    /// One line per contact
    #[arg(short, long)]
    pub compact: bool,
}

#[derive(Args, Debug, Default)]
pub struct DetailArgs {
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub job_title: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    pub birthday: Option<String>,

    #[arg(long)]
    pub website: Option<String>,

    #[arg(long)]
    pub social_media: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl DetailArgs {
    fn pairs(self) -> [(Field, Option<String>); 8] {
        [
            (Field::Email, self.email),
            (Field::Address, self.address),
            (Field::Company, self.company),
            (Field::JobTitle, self.job_title),
            (Field::Birthday, self.birthday),
            (Field::Website, self.website),
            (Field::SocialMedia, self.social_media),
            (Field::Notes, self.notes),
        ]
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub phone: String,

    #[command(flatten)]
    pub details: DetailArgs,

    /// Tag (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Mark as favorite
    #[arg(long)]
    pub favorite: bool,
}

impl AddArgs {
    pub fn into_new_contact(self) -> NewContact {
        let mut update = ContactUpdate::default();
        for (field, value) in self.details.pairs() {
            if let Some(value) = value {
                update.set(field, value);
            }
        }
        NewContact {
            name: self.name,
            phone: self.phone,
            email: update.email.unwrap_or_default(),
            address: update.address.unwrap_or_default(),
            company: update.company.unwrap_or_default(),
            job_title: update.job_title.unwrap_or_default(),
            birthday: update.birthday.unwrap_or_default(),
            website: update.website.unwrap_or_default(),
            social_media: update.social_media.unwrap_or_default(),
            notes: update.notes.unwrap_or_default(),
            tags: self.tags,
            is_favorite: self.favorite,
        }
    }
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Current phone number of the contact
    pub phone: String,

    #[arg(long)]
    pub name: Option<String>,

    /// Replacement phone number
    #[arg(long)]
    pub new_phone: Option<String>,

    #[command(flatten)]
    pub details: DetailArgs,

    /// Flip the favorite flag
    #[arg(long)]
    pub toggle_favorite: bool,
}

impl EditArgs {
    pub fn into_update(self) -> (String, ContactUpdate) {
        let mut update = ContactUpdate {
            name: self.name,
            phone: self.new_phone,
            toggle_favorite: self.toggle_favorite,
            ..Default::default()
        };
        for (field, value) in self.details.pairs() {
            if let Some(value) = value {
                update.set(field, value);
            }
        }
        (self.phone, update)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SearchBy {
    Name,
    Phone,
    Email,
    Company,
    Tag,
    All,
}

impl From<SearchBy> for SearchField {
    fn from(by: SearchBy) -> Self {
        match by {
            SearchBy::Name => SearchField::Name,
            SearchBy::Phone => SearchField::Phone,
            SearchBy::Email => SearchField::Email,
            SearchBy::Company => SearchField::Company,
            SearchBy::Tag => SearchField::Tag,
            SearchBy::All => SearchField::All,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortBy {
    Name,
    Phone,
    Company,
    Recent,
}

impl From<SortBy> for SortKey {
    fn from(by: SortBy) -> Self {
        match by {
            SortBy::Name => SortKey::Name,
            SortBy::Phone => SortKey::Phone,
            SortBy::Company => SortKey::Company,
            SortBy::Recent => SortKey::Recent,
        }
    }
}
