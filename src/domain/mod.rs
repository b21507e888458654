//! Domain models for the contact book
//!
//! Contains the core business logic without any I/O concerns.

mod field;
mod record;
mod book;

pub use field::{Birthday, Name, Phone, ValidationError, BIRTHDAY_FORMAT};
pub use record::{Record, RecordError};
pub use book::{
    adjust_for_weekend, next_weekday, AddressBook, UpcomingBirthday, DEFAULT_UPCOMING_DAYS,
};
