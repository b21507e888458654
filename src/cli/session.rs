//! Interactive command session
//!
//! Reads commands line by line until an exit command or end of input, then
//! saves the address book.

use std::io::BufRead;

use anyhow::{Context, Result};

use super::command::Reply;
use super::handlers::{execute, CommandContext};
use super::output::Output;
use crate::domain::AddressBook;
use crate::storage::BookStore;

pub const WELCOME: &str = "Welcome to the assistant bot!";
pub const PROMPT: &str = "Enter a command: ";

pub struct Session<'a> {
    book: AddressBook,
    store: BookStore,
    ctx: CommandContext,
    output: &'a Output,
}

impl<'a> Session<'a> {
    pub fn new(book: AddressBook, store: BookStore, ctx: CommandContext, output: &'a Output) -> Self {
        Self {
            book,
            store,
            ctx,
            output,
        }
    }

    /// Runs the loop and saves the book when it ends
    ///
    /// The book is saved even when reading input fails; the read error is
    /// returned after the save.
    pub fn run<R: BufRead>(mut self, input: R) -> Result<AddressBook> {
        self.output.banner(WELCOME);

        let outcome = self.read_commands(input);

        self.output.verbose_ctx(
            "session",
            &format!("Saving {} contacts to {}", self.book.len(), self.store.path().display()),
        );
        self.store.save(&self.book)?;
        outcome?;
        Ok(self.book)
    }

    fn read_commands<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            self.output.prompt(PROMPT);

            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .context("Failed to read command")?;
            if read == 0 {
                self.output.verbose_ctx("session", "end of input");
                self.output.banner("");
                return Ok(());
            }

            // Undecodable bytes become U+FFFD and fail field validation
            let line = String::from_utf8_lossy(&buf);
            match execute(&line, &mut self.book, &self.ctx) {
                Ok(Reply::Exit) => {
                    self.output.reply(&Reply::Exit);
                    return Ok(());
                }
                Ok(reply) => self.output.reply(&reply),
                Err(e) => self.output.error(&e.to_string()),
            }
        }
    }
}
