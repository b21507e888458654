//! # Command-Line Interface
//!
//! The interactive assistant and its one-shot form.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `add <name> <phone>` | Create a contact or add a phone to it |
//! | `change <name> <old> <new>` | Replace a phone |
//! | `remove-phone <name> <phone>` | Remove a phone |
//! | `delete <name>` | Remove a contact |
//! | `phone <name>` | Show a contact |
//! | `all` | Show every contact |
//! | `add-birthday <name> <DD.MM.YYYY>` | Set a birthday |
//! | `show-birthday <name>` | Show a birthday |
//! | `birthdays` | Who to congratulate in the coming days |
//! | `hello`, `help`/`?`, `close`/`exit`/`quit` | Session commands |
//!
//! Names are normalized before lookup: `jOHN` and `john` both mean `John`.
//!
//! ## Modes
//!
//! - `contacts` starts the interactive session
//! - `contacts add John 1234567890` runs one command and exits
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod command;
mod handlers;
mod greeting;
mod session;

pub use app::{Cli, run};
pub use output::{Output, OutputFormat};
pub use command::{normalize_name, parse_input, Command, CommandError, Reply};
pub use handlers::{dispatch, execute, CommandContext, HELP_TEXT};
pub use greeting::Greeter;
pub use session::Session;
