//! Contact Book - a personal address book with birthday reminders
//!
//! Contacts hold validated phone numbers and an optional birthday. The book
//! answers who to congratulate in the coming days, moving weekend birthdays
//! to the next Monday.

pub mod domain;
pub mod storage;
pub mod cli;
pub mod logging;

pub use domain::{AddressBook, Birthday, Name, Phone, Record, RecordError, UpcomingBirthday, ValidationError};
