//! Command line parsing, replies and command errors

use std::fmt;
use std::str::FromStr;

use serde_json::json;
use thiserror::Error;

use crate::domain::{Birthday, Record, RecordError, UpcomingBirthday, ValidationError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command.\nFor help enter: ?, help")]
    Invalid,

    #[error("Wrong number of arguments for '{command}'. Usage: {usage}")]
    ArgumentCount {
        command: &'static str,
        usage: &'static str,
    },

    #[error("Contact {0} is missing, please add it (add <name> <phone>)")]
    ContactNotFound(String),

    #[error("No birthday set for {0}")]
    BirthdayNotSet(String),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Recognized commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Change,
    Phone,
    All,
    AddBirthday,
    ShowBirthday,
    Birthdays,
    RemovePhone,
    Delete,
    Hello,
    Help,
    Exit,
}

impl Command {
    /// Canonical command word
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::Change => "change",
            Command::Phone => "phone",
            Command::All => "all",
            Command::AddBirthday => "add-birthday",
            Command::ShowBirthday => "show-birthday",
            Command::Birthdays => "birthdays",
            Command::RemovePhone => "remove-phone",
            Command::Delete => "delete",
            Command::Hello => "hello",
            Command::Help => "help",
            Command::Exit => "exit",
        }
    }

    pub fn usage(&self) -> &'static str {
        match self {
            Command::Add => "add <name> <phone>",
            Command::Change => "change <name> <old_phone> <new_phone>",
            Command::Phone => "phone <name>",
            Command::All => "all",
            Command::AddBirthday => "add-birthday <name> <DD.MM.YYYY>",
            Command::ShowBirthday => "show-birthday <name>",
            Command::Birthdays => "birthdays",
            Command::RemovePhone => "remove-phone <name> <phone>",
            Command::Delete => "delete <name>",
            Command::Hello => "hello",
            Command::Help => "help",
            Command::Exit => "exit",
        }
    }

    /// Error for a call with the wrong number of arguments
    pub fn arity_error(&self) -> CommandError {
        CommandError::ArgumentCount {
            command: self.keyword(),
            usage: self.usage(),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(Command::Add),
            "change" => Ok(Command::Change),
            "phone" => Ok(Command::Phone),
            "all" => Ok(Command::All),
            "add-birthday" => Ok(Command::AddBirthday),
            "show-birthday" => Ok(Command::ShowBirthday),
            "birthdays" => Ok(Command::Birthdays),
            "remove-phone" => Ok(Command::RemovePhone),
            "delete" => Ok(Command::Delete),
            "hello" => Ok(Command::Hello),
            "help" | "?" => Ok(Command::Help),
            "close" | "exit" | "quit" => Ok(Command::Exit),
            _ => Err(CommandError::Invalid),
        }
    }
}

/// Splits an input line into a command and its arguments
pub fn parse_input(line: &str) -> Result<(Command, Vec<String>), CommandError> {
    let mut words = line.split_whitespace();
    let command: Command = words.next().ok_or(CommandError::Invalid)?.parse()?;
    Ok((command, words.map(str::to_string).collect()))
}

/// Lower-cases a contact name and capitalizes its first letter
pub fn normalize_name(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Result of a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Message(String),
    Birthday { name: String, birthday: Birthday },
    Contact(Record),
    Contacts(Vec<Record>),
    Upcoming(Vec<UpcomingBirthday>),
    Exit,
}

impl Reply {
    pub fn message(text: impl Into<String>) -> Self {
        Reply::Message(text.into())
    }

    /// JSON form used with `--format json`
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Reply::Message(message) => json!({ "success": true, "message": message }),
            Reply::Birthday { name, birthday } => json!({ "name": name, "birthday": birthday }),
            Reply::Contact(record) => json!(record),
            Reply::Contacts(records) => json!(records),
            Reply::Upcoming(entries) => json!(entries),
            Reply::Exit => json!({ "success": true, "message": "Good bye!" }),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Message(message) => f.write_str(message),
            Reply::Birthday { birthday, .. } => write!(f, "{}", birthday),
            Reply::Contact(record) => write!(f, "{}", record),
            Reply::Contacts(records) if records.is_empty() => f.write_str("Address book is empty."),
            Reply::Contacts(records) => {
                let lines: Vec<String> = records
                    .iter()
                    .map(|r| format!("{} => {}", r.name(), r))
                    .collect();
                f.write_str(&lines.join("\n"))
            }
            Reply::Upcoming(entries) if entries.is_empty() => f.write_str("No birthdays for display"),
            Reply::Upcoming(entries) => {
                let lines: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
                f.write_str(&lines.join("\n"))
            }
            Reply::Exit => f.write_str("Good bye!"),
        }
    }
}
