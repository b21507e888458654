//! Contact record
//!
//! A record is one contact: a name, an ordered list of unique phone numbers
//! and an optional birthday.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::field::{Birthday, Name, Phone, ValidationError};

const NO_PHONES: &str = "no phones";
const NO_BIRTHDAY: &str = "unknown";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{phone} is already present in the book for {name}")]
    DuplicatePhone { phone: String, name: String },

    #[error("{phone} is not a number of {name}")]
    PhoneNotFound { phone: String, name: String },
}

/// One contact in the address book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordData")]
pub struct Record {
    name: Name,
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
}

/// Unchecked record layout, validated into [`Record`] on deserialization
#[derive(Deserialize)]
struct RecordData {
    name: Name,
    #[serde(default)]
    phones: Vec<Phone>,
    #[serde(default)]
    birthday: Option<Birthday>,
}

impl TryFrom<RecordData> for Record {
    type Error = RecordError;

    fn try_from(data: RecordData) -> Result<Self, Self::Error> {
        let mut record = Record {
            name: data.name,
            phones: Vec::with_capacity(data.phones.len()),
            birthday: data.birthday,
        };
        for phone in data.phones {
            record.push_unique(phone)?;
        }
        Ok(record)
    }
}

impl Record {
    /// Creates a record with no phones and no birthday
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: Name::new(name)?,
            phones: Vec::new(),
            birthday: None,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Phones in the order they were added
    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    /// Adds a phone to the end of the list
    pub fn add_phone(&mut self, phone: &str) -> Result<(), RecordError> {
        let phone = Phone::new(phone)?;
        self.push_unique(phone)
    }

    fn push_unique(&mut self, phone: Phone) -> Result<(), RecordError> {
        if self.phones.contains(&phone) {
            return Err(RecordError::DuplicatePhone {
                phone: phone.into(),
                name: self.name.to_string(),
            });
        }
        self.phones.push(phone);
        Ok(())
    }

    /// Removes a phone; a malformed `phone` can never be present
    pub fn remove_phone(&mut self, phone: &str) -> Result<(), RecordError> {
        match self.position(phone) {
            Some(index) => {
                self.phones.remove(index);
                Ok(())
            }
            None => Err(self.not_found(phone)),
        }
    }

    /// Replaces `old` with `new`
    ///
    /// The new number is added before the old one is removed. When `new` is
    /// rejected the record is left unchanged and `old` stays in place.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<(), RecordError> {
        if self.position(old).is_none() {
            return Err(self.not_found(old));
        }
        self.add_phone(new)?;
        self.remove_phone(old)
    }

    /// Looks up a stored phone equal to `query`
    pub fn find_phone(&self, query: &str) -> Result<Option<&Phone>, ValidationError> {
        let query = Phone::new(query)?;
        Ok(self.phones.iter().find(|p| **p == query))
    }

    /// Sets or replaces the birthday
    pub fn add_birthday(&mut self, date: &str) -> Result<&Birthday, ValidationError> {
        let birthday = Birthday::new(date)?;
        Ok(self.birthday.insert(birthday))
    }

    fn position(&self, phone: &str) -> Option<usize> {
        self.phones.iter().position(|p| p.as_str() == phone)
    }

    fn not_found(&self, phone: &str) -> RecordError {
        RecordError::PhoneNotFound {
            phone: phone.to_string(),
            name: self.name.to_string(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contact name: {}, phones: ", self.name)?;

        if self.phones.is_empty() {
            f.write_str(NO_PHONES)?;
        } else {
            let phones: Vec<&str> = self.phones.iter().map(Phone::as_str).collect();
            f.write_str(&phones.join("; "))?;
        }

        match &self.birthday {
            Some(birthday) => write!(f, ", birthday: {}", birthday),
            None => write!(f, ", birthday: {}", NO_BIRTHDAY),
        }
    }
}
