//! Address book
//!
//! Records are keyed by name and kept in insertion order. Re-adding a name
//! replaces the stored record in place.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Serialize, Serializer};
use std::fmt;

use super::field::{Birthday, BIRTHDAY_FORMAT};
use super::record::Record;

/// Default look-ahead for [`AddressBook::upcoming_birthdays`]
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

/// A contact to congratulate and the working day to do it on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingBirthday {
    pub name: String,
    #[serde(serialize_with = "serialize_date")]
    pub congratulation_date: NaiveDate,
}

fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(BIRTHDAY_FORMAT))
}

impl fmt::Display for UpcomingBirthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.congratulation_date.format(BIRTHDAY_FORMAT))
    }
}

/// All contacts, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    records: Vec<Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, replacing any record with the same name
    pub fn add_record(&mut self, record: Record) {
        match self.position(record.name().as_str()) {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
    }

    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name().as_str() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| r.name().as_str() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Removes a record by name; missing names are ignored
    pub fn delete(&mut self, name: &str) -> Option<Record> {
        self.position(name).map(|index| self.records.remove(index))
    }

    /// Records in insertion order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Contacts whose birthday falls within `window_days` of `today`
    ///
    /// Birthdays already past this year count for next year. Dates landing
    /// on a weekend move to the following Monday. Results follow book order.
    pub fn upcoming_birthdays(&self, window_days: u32, today: NaiveDate) -> Vec<UpcomingBirthday> {
        self.records
            .iter()
            .filter_map(|record| {
                let birthday = record.birthday()?;
                let mut next = anniversary(birthday, today.year());
                if next < today {
                    next = anniversary(birthday, today.year() + 1);
                }

                let days_until = (next - today).num_days();
                if !(0..=i64::from(window_days)).contains(&days_until) {
                    return None;
                }

                Some(UpcomingBirthday {
                    name: record.name().to_string(),
                    congratulation_date: adjust_for_weekend(next),
                })
            })
            .collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name().as_str() == name)
    }
}

impl fmt::Display for AddressBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "Address book {}:\n {}", record.name(), record)?;
        }
        Ok(())
    }
}

/// The birthday moved into `year`
///
/// 29 February falls back to 28 February in non-leap years.
fn anniversary(birthday: &Birthday, year: i32) -> NaiveDate {
    let date = birthday.date();
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date)
}

/// Moves Saturday and Sunday to the next Monday
pub fn adjust_for_weekend(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => next_weekday(date, Weekday::Mon),
        _ => date,
    }
}

/// Next occurrence of `weekday` strictly after `start`
pub fn next_weekday(start: NaiveDate, weekday: Weekday) -> NaiveDate {
    let mut days_ahead = i64::from(weekday.num_days_from_monday())
        - i64::from(start.weekday().num_days_from_monday());
    if days_ahead <= 0 {
        days_ahead += 7;
    }
    start + Duration::days(days_ahead)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn contact(name: &str, birthday: Option<&str>) -> Record {
        let mut record = Record::new(name).unwrap();
        if let Some(birthday) = birthday {
            record.add_birthday(birthday).unwrap();
        }
        record
    }

    fn names(book: &AddressBook) -> Vec<&str> {
        book.records().map(|r| r.name().as_str()).collect()
    }

    #[test]
    fn add_and_find() {
        let mut book = AddressBook::new();
        book.add_record(contact("John", None));

        assert!(book.find("John").is_some());
        assert!(book.find("john").is_none());
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn add_record_overwrites_in_place() {
        let mut book = AddressBook::new();
        let mut first = contact("John", None);
        first.add_phone("1234567890").unwrap();
        book.add_record(first);
        book.add_record(contact("Jane", None));

        book.add_record(contact("John", Some("01.01.2000")));

        assert_eq!(names(&book), vec!["John", "Jane"]);
        let john = book.find("John").unwrap();
        assert!(john.phones().is_empty());
        assert!(john.birthday().is_some());
    }

    #[test]
    fn find_mut_edits_stored_record() {
        let mut book = AddressBook::new();
        book.add_record(contact("John", None));

        book.find_mut("John").unwrap().add_phone("1234567890").unwrap();
        assert_eq!(book.find("John").unwrap().phones().len(), 1);
    }

    #[test]
    fn delete_removes_entry() {
        let mut book = AddressBook::new();
        book.add_record(contact("John", None));
        book.add_record(contact("Jane", None));

        let removed = book.delete("Jane");
        assert_eq!(removed.map(|r| r.name().to_string()), Some("Jane".to_string()));
        assert_eq!(names(&book), vec!["John"]);
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut book = AddressBook::new();
        book.add_record(contact("John", None));

        assert!(book.delete("Ghost").is_none());
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn next_weekday_moves_strictly_forward() {
        // 10.06.2024 is a Monday
        assert_eq!(next_weekday(date(2024, 6, 10), Weekday::Mon), date(2024, 6, 17));
        assert_eq!(next_weekday(date(2024, 6, 15), Weekday::Mon), date(2024, 6, 17));
        assert_eq!(next_weekday(date(2024, 6, 16), Weekday::Mon), date(2024, 6, 17));
        assert_eq!(next_weekday(date(2024, 6, 10), Weekday::Wed), date(2024, 6, 12));
    }

    #[test]
    fn weekend_birthday_moves_to_monday() {
        let mut book = AddressBook::new();
        book.add_record(contact("John", Some("15.06.1990")));

        let upcoming = book.upcoming_birthdays(7, date(2024, 6, 10));
        assert_eq!(
            upcoming,
            vec![UpcomingBirthday {
                name: "John".to_string(),
                congratulation_date: date(2024, 6, 17),
            }]
        );
    }

    #[test]
    fn weekday_birthday_is_unchanged() {
        let mut book = AddressBook::new();
        book.add_record(contact("Jane", Some("12.06.1985")));

        let upcoming = book.upcoming_birthdays(7, date(2024, 6, 10));
        assert_eq!(upcoming[0].congratulation_date, date(2024, 6, 12));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let mut book = AddressBook::new();
        book.add_record(contact("Today", Some("10.06.2000")));
        book.add_record(contact("Edge", Some("17.06.2000")));
        book.add_record(contact("Late", Some("18.06.2000")));

        let upcoming = book.upcoming_birthdays(7, date(2024, 6, 10));
        let names: Vec<_> = upcoming.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Today", "Edge"]);
    }

    #[test]
    fn passed_birthday_rolls_to_next_year() {
        let mut book = AddressBook::new();
        book.add_record(contact("Early", Some("02.01.1990")));
        book.add_record(contact("Past", Some("01.06.1990")));

        // 30.12.2024 is a Monday; 02.01.2025 is a Thursday
        let upcoming = book.upcoming_birthdays(7, date(2024, 12, 30));
        assert_eq!(
            upcoming,
            vec![UpcomingBirthday {
                name: "Early".to_string(),
                congratulation_date: date(2025, 1, 2),
            }]
        );

        assert!(book.upcoming_birthdays(7, date(2024, 6, 10)).is_empty());
    }

    #[test]
    fn results_follow_book_order() {
        let mut book = AddressBook::new();
        book.add_record(contact("Later", Some("14.06.1990")));
        book.add_record(contact("NoBirthday", None));
        book.add_record(contact("Sooner", Some("11.06.1990")));

        let upcoming = book.upcoming_birthdays(7, date(2024, 6, 10));
        let names: Vec<_> = upcoming.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Later", "Sooner"]);
    }

    #[test]
    fn leap_day_birthday_in_common_year() {
        let mut book = AddressBook::new();
        book.add_record(contact("Leap", Some("29.02.2000")));

        // 28.02.2025 is a Friday
        let upcoming = book.upcoming_birthdays(7, date(2025, 2, 25));
        assert_eq!(upcoming[0].congratulation_date, date(2025, 2, 28));
    }

    #[test]
    fn upcoming_serializes_dotted_date() {
        let entry = UpcomingBirthday {
            name: "John".to_string(),
            congratulation_date: date(2024, 6, 17),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["congratulation_date"], "17.06.2024");
        assert_eq!(entry.to_string(), "John: 17.06.2024");
    }

    #[test]
    fn display_lists_each_record() {
        let mut book = AddressBook::new();
        book.add_record(contact("John", None));
        book.add_record(contact("Jane", None));

        let text = book.to_string();
        assert!(text.starts_with("Address book John:\n Contact name: John"));
        assert!(text.contains("\nAddress book Jane:\n Contact name: Jane"));
    }

    proptest! {
        #[test]
        fn upcoming_dates_are_working_days_near_today(
            today_offset in 0i64..3650,
            birthday_offset in 0i64..20_000,
            window in 0u32..30,
        ) {
            let today = date(2015, 1, 1) + Duration::days(today_offset);
            let birthday = date(1950, 1, 1) + Duration::days(birthday_offset);

            let mut book = AddressBook::new();
            let mut record = Record::new("Someone").unwrap();
            record.add_birthday(&Birthday::from_date(birthday).to_string()).unwrap();
            book.add_record(record);

            for entry in book.upcoming_birthdays(window, today) {
                let days = (entry.congratulation_date - today).num_days();
                prop_assert!(days >= 0);
                prop_assert!(days <= i64::from(window) + 2);
                prop_assert!(!matches!(
                    entry.congratulation_date.weekday(),
                    Weekday::Sat | Weekday::Sun
                ));
            }
        }
    }
}
