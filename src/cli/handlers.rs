//! Command handlers
//!
//! Each handler takes the command arguments and the address book and returns
//! a [`Reply`] or a [`CommandError`]. Errors never end the session.

use chrono::NaiveDate;

use super::command::{normalize_name, parse_input, Command, CommandError, Reply};
use super::greeting::Greeter;
use crate::domain::{AddressBook, Record};

pub const HELP_TEXT: &str = "\
The bot helps to work with the contact book.
Commands and functions:
    \"close\" | \"exit\" | \"quit\" - exit the program
    \"hello\" - display a greeting
    \"add <name> <phone>\" - add a phone number to the address book
    \"change <name> <old_phone> <new_phone>\" - change the phone number in the address book
    \"remove-phone <name> <phone>\" - remove a phone number from a contact
    \"delete <name>\" - remove a contact
    \"add-birthday <name> <DD.MM.YYYY>\" - add a birthday to the address book
    \"show-birthday <name>\" - show birthday
    \"phone <name>\" - show the contact
    \"all\" - show the entire address book
    \"birthdays\" - show dates for congratulations
    \"help\" | \"?\" - show this help";

/// Values handlers need besides the book
pub struct CommandContext {
    pub today: NaiveDate,
    pub upcoming_days: u32,
    pub greeter: Greeter,
}

/// Parses and runs one input line
pub fn execute(
    line: &str,
    book: &mut AddressBook,
    ctx: &CommandContext,
) -> Result<Reply, CommandError> {
    let (command, args) = parse_input(line)?;
    tracing::debug!(command = command.keyword(), args = args.len(), "dispatching command");
    dispatch(command, &args, book, ctx)
}

/// Runs a parsed command
pub fn dispatch(
    command: Command,
    args: &[String],
    book: &mut AddressBook,
    ctx: &CommandContext,
) -> Result<Reply, CommandError> {
    match command {
        Command::Add => add_contact(args, book),
        Command::Change => change_contact(args, book),
        Command::Phone => show_phone(args, book),
        Command::All => Ok(show_all(book)),
        Command::AddBirthday => add_birthday(args, book),
        Command::ShowBirthday => show_birthday(args, book),
        Command::Birthdays => Ok(birthdays(book, ctx.upcoming_days, ctx.today)),
        Command::RemovePhone => remove_phone(args, book),
        Command::Delete => delete_contact(args, book),
        Command::Hello => Ok(Reply::message(ctx.greeter.greet())),
        Command::Help => Ok(Reply::message(HELP_TEXT)),
        Command::Exit => Ok(Reply::Exit),
    }
}

/// Returns the stored record for `name`, creating it if needed
///
/// The flag is true when the record was created.
fn find_or_create<'a>(
    book: &'a mut AddressBook,
    name: &str,
) -> Result<(&'a mut Record, bool), CommandError> {
    let created = !book.contains(name);
    if created {
        book.add_record(Record::new(name)?);
    }
    let record = book
        .find_mut(name)
        .ok_or_else(|| CommandError::ContactNotFound(name.to_string()))?;
    Ok((record, created))
}

fn existing<'a>(book: &'a mut AddressBook, name: &str) -> Result<&'a mut Record, CommandError> {
    book.find_mut(name)
        .ok_or_else(|| CommandError::ContactNotFound(name.to_string()))
}

fn saved_message(created: bool) -> Reply {
    if created {
        Reply::message("Contact added.")
    } else {
        Reply::message("Contact updated.")
    }
}

/// `add <name> <phone>`
///
/// A new contact is stored before its phone is checked, so a rejected phone
/// still leaves the contact in the book.
pub fn add_contact(args: &[String], book: &mut AddressBook) -> Result<Reply, CommandError> {
    let [name, phone, ..] = args else {
        return Err(Command::Add.arity_error());
    };
    let name = normalize_name(name);

    let (record, created) = find_or_create(book, &name)?;
    record.add_phone(phone)?;
    Ok(saved_message(created))
}

/// `change <name> <old_phone> <new_phone>`
pub fn change_contact(args: &[String], book: &mut AddressBook) -> Result<Reply, CommandError> {
    let [name, old, new] = args else {
        return Err(Command::Change.arity_error());
    };
    let name = normalize_name(name);

    existing(book, &name)?.edit_phone(old, new)?;
    Ok(Reply::message("Contact updated."))
}

/// `phone <name>`
pub fn show_phone(args: &[String], book: &AddressBook) -> Result<Reply, CommandError> {
    let [name, ..] = args else {
        return Err(Command::Phone.arity_error());
    };
    let name = normalize_name(name);

    book.find(&name)
        .map(|record| Reply::Contact(record.clone()))
        .ok_or(CommandError::ContactNotFound(name))
}

/// `all`
pub fn show_all(book: &AddressBook) -> Reply {
    Reply::Contacts(book.records().cloned().collect())
}

/// `add-birthday <name> <DD.MM.YYYY>`
pub fn add_birthday(args: &[String], book: &mut AddressBook) -> Result<Reply, CommandError> {
    let [name, date, ..] = args else {
        return Err(Command::AddBirthday.arity_error());
    };
    let name = normalize_name(name);

    let (record, created) = find_or_create(book, &name)?;
    record.add_birthday(date)?;
    Ok(saved_message(created))
}

/// `show-birthday <name>`
pub fn show_birthday(args: &[String], book: &AddressBook) -> Result<Reply, CommandError> {
    let [name, ..] = args else {
        return Err(Command::ShowBirthday.arity_error());
    };
    let name = normalize_name(name);

    let record = book
        .find(&name)
        .ok_or_else(|| CommandError::ContactNotFound(name.clone()))?;
    let birthday = record
        .birthday()
        .copied()
        .ok_or_else(|| CommandError::BirthdayNotSet(name.clone()))?;

    Ok(Reply::Birthday { name, birthday })
}

/// `birthdays`
pub fn birthdays(book: &AddressBook, window_days: u32, today: NaiveDate) -> Reply {
    Reply::Upcoming(book.upcoming_birthdays(window_days, today))
}

/// `remove-phone <name> <phone>`
pub fn remove_phone(args: &[String], book: &mut AddressBook) -> Result<Reply, CommandError> {
    let [name, phone, ..] = args else {
        return Err(Command::RemovePhone.arity_error());
    };
    let name = normalize_name(name);

    existing(book, &name)?.remove_phone(phone)?;
    Ok(Reply::message("Phone removed."))
}

/// `delete <name>`
pub fn delete_contact(args: &[String], book: &mut AddressBook) -> Result<Reply, CommandError> {
    let [name, ..] = args else {
        return Err(Command::Delete.arity_error());
    };
    let name = normalize_name(name);

    match book.delete(&name) {
        Some(_) => Ok(Reply::message("Contact deleted.")),
        None => Ok(Reply::message("Nothing to delete.")),
    }
}
