//! Line-oriented text encoding of the contact collection.
//!
//! Each record is a run of lines:
//!
//! ```text
//! id
//! name, phone, email, address, company, job title,
//! birthday, website, social media, notes        (one per line)
//! favorite (1 or 0)
//! created  (unix seconds)
//! modified (unix seconds)
//! tag count
//! tag ...                                        (tag count lines)
//! ```
//!
//! Fields are not escaped, so a value containing a line break cannot be
//! stored. The store rejects such values before they reach this module.

use crate::error::{RolodexError, Result};
use crate::model::{Contact, ContactId, Field, NewContact};
use chrono::{DateTime, Utc};
use std::fmt::Write;

pub fn encode(contacts: &[Contact]) -> String {
    let mut out = String::new();
    for contact in contacts {
        encode_contact(&mut out, contact);
    }
    out
}

fn encode_contact(out: &mut String, contact: &Contact) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", contact.id());
    for field in Field::TEXT {
        let _ = writeln!(out, "{}", contact.text(field).unwrap_or_default());
    }
    let _ = writeln!(out, "{}", u8::from(contact.is_favorite()));
    let _ = writeln!(out, "{}", contact.created_at().timestamp());
    let _ = writeln!(out, "{}", contact.modified_at().timestamp());
    let _ = writeln!(out, "{}", contact.tags().len());
    for tag in contact.tags() {
        let _ = writeln!(out, "{}", tag);
    }
}

/// Parses a whole payload. Any leftover or malformed line fails the decode.
pub fn decode(payload: &str) -> Result<Vec<Contact>> {
    let mut reader = LineReader::new(payload);
    let mut contacts = Vec::new();
    while !reader.at_end() {
        contacts.push(reader.contact()?);
    }
    Ok(contacts)
}

struct LineReader<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineReader<'a> {
    fn new(payload: &'a str) -> Self {
        Self {
            lines: payload.split_terminator('\n').collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// 1-based number of the line about to be read.
    fn line_no(&self) -> usize {
        self.pos + 1
    }

    fn next(&mut self, what: &str) -> Result<&'a str> {
        let line = self.lines.get(self.pos).copied().ok_or_else(|| {
            RolodexError::decode(self.line_no(), format!("unexpected end of data, expected {}", what))
        })?;
        self.pos += 1;
        Ok(line)
    }

    fn number<T: std::str::FromStr>(&mut self, what: &str) -> Result<T> {
        let line_no = self.line_no();
        let raw = self.next(what)?;
        raw.trim()
            .parse()
            .map_err(|_| RolodexError::decode(line_no, format!("invalid {}: {:?}", what, raw)))
    }

    fn timestamp(&mut self, what: &str) -> Result<DateTime<Utc>> {
        let line_no = self.line_no();
        let secs: i64 = self.number(what)?;
        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| RolodexError::decode(line_no, format!("{} out of range: {}", what, secs)))
    }

    fn flag(&mut self, what: &str) -> Result<bool> {
        let line_no = self.line_no();
        match self.next(what)?.trim() {
            "1" => Ok(true),
            "0" => Ok(false),
            other => Err(RolodexError::decode(
                line_no,
                format!("invalid {}: {:?}", what, other),
            )),
        }
    }

    fn contact(&mut self) -> Result<Contact> {
        let id = ContactId(self.number("contact id")?);

        let mut fields = NewContact::default();
        for field in Field::TEXT {
            let value = self.next(field.label())?.to_string();
            match field {
                Field::Name => fields.name = value,
                Field::Phone => fields.phone = value,
                Field::Email => fields.email = value,
                Field::Address => fields.address = value,
                Field::Company => fields.company = value,
                Field::JobTitle => fields.job_title = value,
                Field::Birthday => fields.birthday = value,
                Field::Website => fields.website = value,
                Field::SocialMedia => fields.social_media = value,
                Field::Notes => fields.notes = value,
                Field::Tag => {}
            }
        }
        fields.is_favorite = self.flag("favorite flag")?;
        let created = self.timestamp("created timestamp")?;
        let modified = self.timestamp("modified timestamp")?;

        let tag_count: usize = self.number("tag count")?;
        for _ in 0..tag_count {
            fields.tags.push(self.next("tag")?.to_string());
        }

        Ok(Contact::restore(id, fields, created, modified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Vec<Contact> {
        let mut ann = Contact::new(
            ContactId(1),
            NewContact::new("Ann Lee", "555-0100")
                .with_email("ann@example.com")
                .with_tag("vip")
                .with_tag("golf"),
        );
        ann.set_favorite(true);
        let bo = Contact::new(ContactId(7), NewContact::new("Bo Diaz", "555-0199"));
        vec![ann, bo]
    }

    #[test]
    fn record_layout() {
        let contacts = sample();
        let text = encode(&contacts[1..]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[0], "7");
        assert_eq!(lines[1], "Bo Diaz");
        assert_eq!(lines[2], "555-0199");
        assert_eq!(lines[11], "0");
        assert_eq!(lines[14], "0");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn decodes_what_it_encodes() {
        let contacts = sample();
        let decoded = decode(&encode(&contacts)).unwrap();
        assert_eq!(decoded, contacts);
    }

    #[test]
    fn empty_payload_is_empty_collection() {
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn truncated_record_is_an_error() {
        let text = encode(&sample());
        let cut: String = text.lines().take(20).map(|l| format!("{}\n", l)).collect();
        match decode(&cut) {
            Err(RolodexError::Decode { line, .. }) => assert_eq!(line, 21),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        let mut text = encode(&sample());
        text.push_str("junk\n");
        assert!(matches!(decode(&text), Err(RolodexError::Decode { .. })));
    }

    #[test]
    fn bad_favorite_flag_is_an_error() {
        let text = encode(&sample()[1..]).replacen("\n0\n", "\nmaybe\n", 1);
        assert!(matches!(decode(&text), Err(RolodexError::Decode { line: 12, .. })));
    }

    proptest! {
        #[test]
        fn proptest_single_line_fields_survive(
            name in "[^\r\n]{0,40}",
            notes in "[^\r\n]{0,80}",
            tags in proptest::collection::vec("[^\r\n]{1,12}", 0..5),
        ) {
            let mut fields = NewContact::new(name, "555-0100");
            fields.notes = notes;
            fields.tags = tags;
            let contact = Contact::new(ContactId(3), fields);
            let decoded = decode(&encode(std::slice::from_ref(&contact))).unwrap();
            prop_assert_eq!(decoded, vec![contact]);
        }
    }
}
