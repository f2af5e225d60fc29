use chrono::{DateTime, Local, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Birthdays are stored as plain ISO dates.
pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

/// Numeric contact identifier, assigned by the store and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContactId(pub u64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContactId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(ContactId)
            .map_err(|_| format!("Invalid contact id: {}", s))
    }
}

/// The editable fields of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Phone,
    Email,
    Address,
    Company,
    JobTitle,
    Birthday,
    Website,
    SocialMedia,
    Notes,
    Tag,
}

impl Field {
    /// Text fields in persisted order.
    pub const TEXT: [Field; 10] = [
        Field::Name,
        Field::Phone,
        Field::Email,
        Field::Address,
        Field::Company,
        Field::JobTitle,
        Field::Birthday,
        Field::Website,
        Field::SocialMedia,
        Field::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Address => "address",
            Field::Company => "company",
            Field::JobTitle => "job title",
            Field::Birthday => "birthday",
            Field::Website => "website",
            Field::SocialMedia => "social media",
            Field::Notes => "notes",
            Field::Tag => "tag",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current time truncated to the whole-second precision of the contact file.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Field values for a contact that does not exist yet.
///
/// The store assigns the id and timestamps when the contact is added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub company: String,
    pub job_title: String,
    pub birthday: String,
    pub website: String,
    pub social_media: String,
    pub notes: String,
    pub tags: Vec<String>,
    pub is_favorite: bool,
}

impl NewContact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_birthday(mut self, birthday: impl Into<String>) -> Self {
        self.birthday = birthday.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Address => &self.address,
            Field::Company => &self.company,
            Field::JobTitle => &self.job_title,
            Field::Birthday => &self.birthday,
            Field::Website => &self.website,
            Field::SocialMedia => &self.social_media,
            Field::Notes => &self.notes,
            Field::Tag => return None,
        };
        Some(value)
    }
}

/// A partial update to an existing contact.
///
/// `None` keeps the current value. For optional fields `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub birthday: Option<String>,
    pub website: Option<String>,
    pub social_media: Option<String>,
    pub notes: Option<String>,
    pub toggle_favorite: bool,
}

impl ContactUpdate {
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
            Field::Address => &mut self.address,
            Field::Company => &mut self.company,
            Field::JobTitle => &mut self.job_title,
            Field::Birthday => &mut self.birthday,
            Field::Website => &mut self.website,
            Field::SocialMedia => &mut self.social_media,
            Field::Notes => &mut self.notes,
            Field::Tag => return,
        };
        *slot = Some(value.into());
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// The supplied text changes, in persisted field order.
    pub fn changes(&self) -> Vec<(Field, &str)> {
        let slots = [
            &self.name,
            &self.phone,
            &self.email,
            &self.address,
            &self.company,
            &self.job_title,
            &self.birthday,
            &self.website,
            &self.social_media,
            &self.notes,
        ];
        Field::TEXT
            .iter()
            .zip(slots)
            .filter_map(|(field, slot)| slot.as_deref().map(|v| (*field, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.changes().is_empty() && !self.toggle_favorite
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    id: ContactId,
    name: String,
    phone: String,
    email: String,
    address: String,
    company: String,
    job_title: String,
    birthday: String,
    website: String,
    social_media: String,
    notes: String,
    tags: Vec<String>,
    is_favorite: bool,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(id: ContactId, fields: NewContact) -> Self {
        let created = now();
        let mut contact = Self {
            id,
            name: fields.name,
            phone: fields.phone,
            email: fields.email,
            address: fields.address,
            company: fields.company,
            job_title: fields.job_title,
            birthday: fields.birthday,
            website: fields.website,
            social_media: fields.social_media,
            notes: fields.notes,
            tags: Vec::with_capacity(fields.tags.len()),
            is_favorite: fields.is_favorite,
            created_at: created,
            modified_at: created,
        };
        for tag in fields.tags {
            if !contact.tags.contains(&tag) {
                contact.tags.push(tag);
            }
        }
        contact
    }

    /// Rebuilds a contact read back from storage, keeping its id and timestamps.
    pub(crate) fn restore(
        id: ContactId,
        fields: NewContact,
        created_at: DateTime<Utc>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        let mut contact = Self::new(id, fields);
        contact.created_at = created_at;
        contact.modified_at = modified_at.max(created_at);
        contact
    }

    pub fn id(&self) -> ContactId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn birthday(&self) -> &str {
        &self.birthday
    }

    pub fn website(&self) -> &str {
        &self.website
    }

    pub fn social_media(&self) -> &str {
        &self.social_media
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// Read a text field by name. `Field::Tag` has no single value.
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Address => &self.address,
            Field::Company => &self.company,
            Field::JobTitle => &self.job_title,
            Field::Birthday => &self.birthday,
            Field::Website => &self.website,
            Field::SocialMedia => &self.social_media,
            Field::Notes => &self.notes,
            Field::Tag => return None,
        };
        Some(value)
    }

    /// Overwrite a text field and bump `modified_at`.
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
            Field::Address => &mut self.address,
            Field::Company => &mut self.company,
            Field::JobTitle => &mut self.job_title,
            Field::Birthday => &mut self.birthday,
            Field::Website => &mut self.website,
            Field::SocialMedia => &mut self.social_media,
            Field::Notes => &mut self.notes,
            Field::Tag => return,
        };
        *slot = value.into();
        self.touch();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.set_text(Field::Name, name);
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.set_text(Field::Phone, phone);
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.set_text(Field::Email, email);
    }

    pub fn set_birthday(&mut self, birthday: impl Into<String>) {
        self.set_text(Field::Birthday, birthday);
    }

    pub fn set_favorite(&mut self, favorite: bool) {
        self.is_favorite = favorite;
        self.touch();
    }

    /// Adds a tag. Returns false (and changes nothing) if already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        self.touch();
        true
    }

    /// Removes a tag. Returns whether the contact had it.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        let removed = self.tags.len() < before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    fn touch(&mut self) {
        self.modified_at = now().max(self.created_at);
    }

    /// Case-insensitive substring match over every text field and tag.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let hit = |value: &str| value.to_lowercase().contains(&query);

        [
            &self.name,
            &self.phone,
            &self.email,
            &self.address,
            &self.company,
            &self.job_title,
            &self.notes,
            &self.website,
            &self.social_media,
        ]
        .into_iter()
        .any(|v| hit(v))
            || self.tags.iter().any(|t| hit(t))
    }

    pub fn parsed_birthday(&self) -> Option<NaiveDate> {
        if self.birthday.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(&self.birthday, BIRTHDAY_FORMAT).ok()
    }

    /// Age in whole years as of today, `None` if the birthday is missing or malformed.
    pub fn age(&self) -> Option<u32> {
        self.age_on(Local::now().date_naive())
    }

    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        today.years_since(self.parsed_birthday()?)
    }
}
