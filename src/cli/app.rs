//! Main CLI application structure

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;

use super::command::Reply;
use super::greeting::Greeter;
use super::handlers::{execute, CommandContext};
use super::output::{Output, OutputFormat};
use super::session::Session;
use crate::domain::Birthday;
use crate::storage::{BookStore, Config};

#[derive(Parser)]
#[command(name = "contacts")]
#[command(author, version, about = "Personal contact book with birthday reminders")]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Address book file
    #[arg(long, env = "CONTACT_BOOK_FILE")]
    pub file: Option<PathBuf>,

    /// Configuration file
    #[arg(long, env = "CONTACT_BOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Date to treat as today (DD.MM.YYYY)
    #[arg(long, hide = true, value_parser = parse_today)]
    pub today: Option<NaiveDate>,

    /// Run a single command instead of the interactive session
    /// (e.g. `contacts add John 1234567890`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    Birthday::new(value)
        .map(|b| b.date())
        .map_err(|e| e.to_string())
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    let output = Output::new(cli.format, cli.verbose);
    output.verbose("Contact book starting");

    let config = Config::load(cli.config.as_deref())?;
    let store = BookStore::new(config.data_file(cli.file.as_deref()));
    output.verbose_ctx("store", &format!("Using address book at: {}", store.path().display()));

    let mut book = store.load()?;
    output.verbose_ctx("store", &format!("Loaded {} contacts", book.len()));

    let ctx = CommandContext {
        today: cli.today.unwrap_or_else(|| Local::now().date_naive()),
        upcoming_days: config.upcoming_days,
        greeter: Greeter::load(config.greetings_file.as_deref()),
    };

    if cli.command.is_empty() {
        let session = Session::new(book, store, ctx, &output);
        session.run(io::stdin().lock())?;
    } else {
        let line = cli.command.join(" ");
        output.verbose_ctx("exec", &format!("Running: {}", line));

        let before = book.clone();
        let result = execute(&line, &mut book, &ctx);
        if book != before {
            store.save(&book)?;
        }

        match result {
            Ok(Reply::Exit) => {}
            Ok(reply) => output.reply(&reply),
            Err(e) => return Err(e.into()),
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
