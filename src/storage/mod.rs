//! # Storage Layer
//!
//! Persistence and configuration for the contact book.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Address book | Versioned JSON | `<data dir>/addressbook.json` |
//! | Config | TOML | `<config dir>/config.toml` |
//!
//! ## Write Safety
//!
//! - [`BookStore`] locks the file (`fs2`) while reading or writing
//! - Writes are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`BookStore`] - Load and save the whole address book
//! - [`Config`] - User configuration

mod json;
mod config;

pub use json::{BookStore, StoreError, DEFAULT_FILE_NAME, FORMAT_VERSION};
pub use config::{Config, ConfigError, MAX_UPCOMING_DAYS};
