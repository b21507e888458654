//! JSON storage for the address book
//!
//! The whole book is stored as one versioned JSON document. Writes go to a
//! temp file under an exclusive lock and are renamed into place.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{AddressBook, Record};

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

/// Default data file name
pub const DEFAULT_FILE_NAME: &str = "addressbook.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unsupported address book version {0}")]
    UnsupportedVersion(u32),

    #[error("Duplicate contact name in address book: {0}")]
    DuplicateName(String),
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    contacts: Vec<&'a Record>,
}

#[derive(Deserialize)]
struct Document {
    version: u32,
    #[serde(default)]
    contacts: Vec<Record>,
}

/// Store for the address book in a single JSON file
pub struct BookStore {
    path: PathBuf,
}

impl BookStore {
    /// Creates a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the book, or returns an empty one if the file does not exist yet
    pub fn load(&self) -> Result<AddressBook> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no address book yet, starting empty");
                return Ok(AddressBook::new());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to open address book: {}", self.path.display())
                })
            }
        };

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on address book")?;

        let document: Document = serde_json::from_reader(BufReader::new(&file))
            .with_context(|| format!("Failed to parse address book: {}", self.path.display()))?;

        if document.version != FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion(document.version).into());
        }

        let mut book = AddressBook::new();
        for record in document.contacts {
            if book.contains(record.name().as_str()) {
                return Err(StoreError::DuplicateName(record.name().to_string()).into());
            }
            book.add_record(record);
        }

        tracing::debug!(path = %self.path.display(), contacts = book.len(), "loaded address book");

        // Lock is released when file is dropped
        Ok(book)
    }

    fn write_document(temp_path: &Path, book: &AddressBook) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        // Acquire exclusive lock
        file.lock_exclusive()
            .context("Failed to acquire write lock on address book")?;

        let document = DocumentRef {
            version: FORMAT_VERSION,
            contacts: book.records().collect(),
        };

        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &document)
            .context("Failed to serialize address book")?;
        writeln!(writer).context("Failed to write address book")?;
        writer.flush().context("Failed to flush address book")?;

        // Lock is released when file is dropped
        Ok(())
    }

    /// Writes the whole book, replacing the previous file
    pub fn save(&self, book: &AddressBook) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("json.tmp");

        let written = Self::write_document(&temp_path, book).and_then(|()| {
            // Atomic rename
            fs::rename(&temp_path, &self.path).with_context(|| {
                format!(
                    "Failed to rename {} to {}",
                    temp_path.display(),
                    self.path.display()
                )
            })
        });

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %temp_path.display(), error = %cleanup, "cannot remove temp file");
                }
            }
            return Err(e);
        }

        tracing::debug!(path = %self.path.display(), contacts = book.len(), "saved address book");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_book() -> AddressBook {
        let mut book = AddressBook::new();

        let mut john = Record::new("John").unwrap();
        john.add_phone("5555555555").unwrap();
        john.add_phone("1234567890").unwrap();
        john.add_birthday("07.06.2005").unwrap();
        book.add_record(john);

        let mut jane = Record::new("Jane").unwrap();
        jane.add_phone("9876543210").unwrap();
        book.add_record(jane);

        book.add_record(Record::new("Alice").unwrap());
        book
    }

    #[test]
    fn load_missing_file_gives_empty_book() {
        let dir = TempDir::new().unwrap();
        let store = BookStore::new(dir.path().join("addressbook.json"));

        let book = store.load().unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = BookStore::new(dir.path().join("addressbook.json"));

        let book = sample_book();
        store.save(&book).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, book);

        let names: Vec<_> = loaded.records().map(|r| r.name().to_string()).collect();
        assert_eq!(names, vec!["John", "Jane", "Alice"]);

        let phones: Vec<_> = loaded
            .find("John")
            .unwrap()
            .phones()
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(phones, vec!["5555555555", "1234567890"]);
    }

    #[test]
    fn save_overwrites_previous_state() {
        let dir = TempDir::new().unwrap();
        let store = BookStore::new(dir.path().join("addressbook.json"));

        store.save(&sample_book()).unwrap();

        let mut smaller = sample_book();
        smaller.delete("Jane");
        store.save(&smaller).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.find("Jane").is_none());
    }

    #[test]
    fn file_layout_is_explicit() {
        let dir = TempDir::new().unwrap();
        let store = BookStore::new(dir.path().join("addressbook.json"));
        store.save(&sample_book()).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(json["version"], FORMAT_VERSION);
        assert_eq!(json["contacts"][0]["name"], "John");
        assert_eq!(json["contacts"][0]["phones"][1], "1234567890");
        assert_eq!(json["contacts"][0]["birthday"], "07.06.2005");
        assert!(json["contacts"][2]["birthday"].is_null());
    }

    #[test]
    fn failed_save_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("addressbook.json");
        // A non-empty directory in the way makes the rename fail
        fs::create_dir_all(path.join("occupied")).unwrap();

        let store = BookStore::new(&path);
        let err = store.save(&sample_book()).unwrap_err();

        assert!(err.to_string().contains("Failed to rename"));
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("addressbook.json");
        fs::write(&path, "not json").unwrap();

        assert!(BookStore::new(&path).load().is_err());
    }

    #[test]
    fn invalid_contents_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("addressbook.json");
        let store = BookStore::new(&path);

        fs::write(
            &path,
            r#"{"version":1,"contacts":[{"name":"John","phones":["123"]}]}"#,
        )
        .unwrap();
        assert!(store.load().is_err());

        fs::write(
            &path,
            r#"{"version":1,"contacts":[{"name":"John","phones":["1234567890","1234567890"]}]}"#,
        )
        .unwrap();
        assert!(store.load().is_err());

        fs::write(
            &path,
            r#"{"version":1,"contacts":[{"name":"John"},{"name":"John"}]}"#,
        )
        .unwrap();
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("Duplicate contact name"));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("addressbook.json");
        fs::write(&path, r#"{"version":99,"contacts":[]}"#).unwrap();

        let err = BookStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Unsupported address book version 99"));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = BookStore::new(dir.path().join("nested").join("dir").join("book.json"));

        store.save(&AddressBook::new()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn atomic_write() {
        let dir = TempDir::new().unwrap();
        let store = BookStore::new(dir.path().join("addressbook.json"));
        store.save(&sample_book()).unwrap();

        // Temp file should not exist after write
        let temp_path = store.path().with_extension("json.tmp");
        assert!(!temp_path.exists());
    }
}
