use chrono::{DateTime, Utc};
use colored::Colorize;
use rolodex::birthdays::UpcomingBirthday;
use rolodex::commands::{CmdMessage, MessageLevel};
use rolodex::config::{RolodexConfig, CONFIG_KEYS};
use rolodex::manager::{DuplicateGroup, ValidationIssue};
use rolodex::model::{Contact, Field};
use rolodex::stats::Statistics;
use std::path::PathBuf;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 6;
const NAME_WIDTH: usize = 28;
const PHONE_WIDTH: usize = 20;
const TIME_WIDTH: usize = 16;
const FAVORITE_MARKER: &str = "★";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One line per contact: id, name, phone, company, last change.
pub(super) fn print_contact_lines(contacts: &[Contact]) {
    if contacts.is_empty() {
        println!("No contacts found.");
        return;
    }

    for contact in contacts {
        let marker = if contact.is_favorite() {
            format!("{} ", FAVORITE_MARKER)
        } else {
            "  ".to_string()
        };
        let id = format!("{:>width$}. ", contact.id(), width = ID_WIDTH - 2);
        let name = pad_to_width(&truncate_to_width(contact.name(), NAME_WIDTH), NAME_WIDTH);
        let phone = pad_to_width(&truncate_to_width(contact.phone(), PHONE_WIDTH), PHONE_WIDTH);

        let fixed = marker.width() + ID_WIDTH + NAME_WIDTH + PHONE_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let company = pad_to_width(&truncate_to_width(contact.company(), available), available);

        println!(
            "{}{}{}{}{}{}",
            marker.yellow(),
            id.yellow(),
            name.bold(),
            phone,
            company.dimmed(),
            format_time_ago(contact.modified_at()).dimmed()
        );
    }
}

pub(super) fn print_contacts_full(contacts: &[Contact]) {
    if contacts.is_empty() {
        println!("No contacts found.");
        return;
    }

    for (i, contact) in contacts.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        let marker = if contact.is_favorite() {
            format!(" {}", FAVORITE_MARKER)
        } else {
            String::new()
        };
        println!(
            "{} {}{}",
            format!("#{}", contact.id()).yellow(),
            contact.name().bold(),
            marker.yellow()
        );
        println!("--------------------------------");
        for field in Field::TEXT.into_iter().skip(1) {
            let value = contact.text(field).unwrap_or_default();
            if value.is_empty() {
                continue;
            }
            if field == Field::Birthday {
                match contact.age() {
                    Some(age) => println!("{:<14}{} (age {})", label(field), value, age),
                    None => println!("{:<14}{}", label(field), value),
                }
            } else {
                println!("{:<14}{}", label(field), value);
            }
        }
        if !contact.tags().is_empty() {
            println!("{:<14}{}", "Tags:", contact.tags().join(", ").cyan());
        }
        println!(
            "{:<14}{}",
            "Created:",
            contact.created_at().format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
        println!(
            "{:<14}{}",
            "Modified:",
            contact.modified_at().format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }
}

fn label(field: Field) -> String {
    let text = field.label();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!("{}{}:", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

pub(super) fn print_birthdays(birthdays: &[UpcomingBirthday]) {
    for b in birthdays {
        let when = match b.days_until {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {} days", n),
        };
        let turning = b
            .turning
            .map(|age| format!(" (turns {})", age))
            .unwrap_or_default();
        println!(
            "{:>6}  {}  {}{}",
            when.yellow(),
            b.birthday.format("%m-%d"),
            b.name.bold(),
            turning.dimmed()
        );
    }
}

pub(super) fn print_duplicates(groups: &[DuplicateGroup]) {
    for group in groups {
        let ids: Vec<String> = group.ids.iter().map(|id| format!("#{}", id)).collect();
        println!(
            "{:<6} {}  {}",
            format!("{:?}", group.kind).to_lowercase().yellow(),
            group.value.bold(),
            ids.join(", ")
        );
    }
}

pub(super) fn print_issues(issues: &[ValidationIssue]) {
    for issue in issues {
        println!(
            "{} invalid {}: {:?}",
            format!("#{}", issue.id).yellow(),
            issue.field,
            issue.value
        );
    }
}

pub(super) fn print_tags(tags: &[(String, usize)]) {
    if tags.is_empty() {
        println!("No tags in use.");
        return;
    }
    let width = tags.iter().map(|(t, _)| t.width()).max().unwrap_or(0);
    for (tag, count) in tags {
        println!("{}  {}", pad_to_width(tag, width).cyan(), count);
    }
}

pub(super) fn print_stats(stats: &Statistics) {
    println!("{:<16}{}", "Contacts:", stats.total_contacts);
    println!("{:<16}{}", "Favorites:", stats.favorites);
    if !stats.companies.is_empty() {
        println!("\n{}", "Companies".bold());
        for (company, count) in &stats.companies {
            println!("  {:<30}{}", company, count);
        }
    }
    if !stats.tags.is_empty() {
        println!("\n{}", "Tags".bold());
        for (tag, count) in &stats.tags {
            println!("  {:<30}{}", tag, count);
        }
    }
}

pub(super) fn print_config(config: &RolodexConfig) {
    for key in CONFIG_KEYS {
        println!("{} = {}", key, config.get(key).unwrap_or_default());
    }
}

pub(super) fn print_paths(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width.saturating_sub(1) {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(2) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("Ann", 10), "Ann");
        let cut = truncate_to_width("Bartholomew Montgomery", 10);
        assert!(cut.ends_with('…'));
        assert!(cut.width() < 10);
        // Wide characters count double
        assert!(truncate_to_width("山田太郎山田太郎", 8).width() < 8);
    }

    #[test]
    fn padding_fills_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abcdef");
    }

    #[test]
    fn field_labels_are_capitalised() {
        assert_eq!(label(Field::JobTitle), "Job title:");
    }
}
