//! Module `commands`
//!
//! Menu choices and the parsers that turn a typed line into one.

/// Choices on the authentication menu.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AuthCommand {
    Login,
    Register,
    Exit,
    Unknown,
}

/// Choices on the main menu, shown once logged in.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MainCommand {
    Books,
    ListUsers,
    Logout,
    Unknown,
}

/// Choices on the book management menu.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BookCommand {
    RegisterBook,
    ListBooks,
    Back,
    Unknown,
}

pub fn parse_auth_command(raw: &str) -> AuthCommand {
    match raw.trim() {
        "1" => AuthCommand::Login,
        "2" => AuthCommand::Register,
        "3" => AuthCommand::Exit,
        _ => AuthCommand::Unknown,
    }
}

pub fn parse_main_command(raw: &str) -> MainCommand {
    match raw.trim() {
        "1" => MainCommand::Books,
        "2" => MainCommand::ListUsers,
        "3" => MainCommand::Logout,
        _ => MainCommand::Unknown,
    }
}

pub fn parse_book_command(raw: &str) -> BookCommand {
    match raw.trim() {
        "1" => BookCommand::RegisterBook,
        "2" => BookCommand::ListBooks,
        "3" => BookCommand::Back,
        _ => BookCommand::Unknown,
    }
}
