//! Upcoming birthday reminders.
//!
//! A birthday is projected onto the current year and reported when it falls
//! within the window. Birthdays that already passed this year are not wrapped
//! around to next year, so late in December the list only shows what is left
//! of the year.

use crate::model::{Contact, ContactId};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingBirthday {
    pub id: ContactId,
    pub name: String,
    pub birthday: NaiveDate,
    pub days_until: i64,
    /// Age the contact turns on that day.
    pub turning: Option<u32>,
}

pub fn upcoming(contacts: &[Contact], window_days: u32, today: NaiveDate) -> Vec<UpcomingBirthday> {
    let mut found: Vec<UpcomingBirthday> = contacts
        .iter()
        .filter_map(|contact| {
            let birthday = contact.parsed_birthday()?;
            let this_year = in_year(birthday, today.year())?;
            let days_until = (this_year - today).num_days();
            if days_until < 0 || days_until > i64::from(window_days) {
                return None;
            }
            Some(UpcomingBirthday {
                id: contact.id(),
                name: contact.name().to_string(),
                birthday,
                days_until,
                turning: this_year.years_since(birthday),
            })
        })
        .collect();
    found.sort_by_key(|b| b.days_until);
    found
}

/// Same month and day in `year`. Feb 29 falls on Mar 1 in common years.
fn in_year(date: NaiveDate, year: i32) -> Option<NaiveDate> {
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewContact;
    use chrono::Duration;

    fn born(id: u64, birthday: &str) -> Contact {
        Contact::new(
            ContactId(id),
            NewContact::new(format!("Person {}", id), format!("555-010{}", id)).with_birthday(birthday),
        )
    }

    fn iso_years_ago(date: NaiveDate, years: i32) -> String {
        in_year(date, date.year() - years)
            .unwrap()
            .format("%Y-%m-%d")
            .to_string()
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let contacts = vec![
            born(1, &iso_years_ago(today, 30)),
            born(2, &iso_years_ago(today + Duration::days(30), 40)),
            born(3, &iso_years_ago(today + Duration::days(31), 50)),
        ];

        let found = upcoming(&contacts, 30, today);
        let ids: Vec<_> = found.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![ContactId(1), ContactId(2)]);
        assert_eq!(found[0].days_until, 0);
        assert_eq!(found[0].turning, Some(30));
        assert_eq!(found[1].days_until, 30);
        assert_eq!(found[1].turning, Some(40));
    }

    #[test]
    fn passed_birthdays_do_not_wrap() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();
        let contacts = vec![born(1, "1990-01-02"), born(2, "1990-12-19")];
        assert!(upcoming(&contacts, 30, today).is_empty());
    }

    #[test]
    fn skips_missing_and_malformed_birthdays() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let contacts = vec![born(1, ""), born(2, "sometime in May")];
        assert!(upcoming(&contacts, 365, today).is_empty());
    }

    #[test]
    fn leap_day_birthday_in_common_year() {
        let today = NaiveDate::from_ymd_opt(2023, 2, 20).unwrap();
        let found = upcoming(&[born(1, "2000-02-29")], 10, today);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].days_until, 9);
    }
}
