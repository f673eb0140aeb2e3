//! Blocking menu loop driving authentication, books and user listing.

use chrono::Datelike;
use log::info;
use std::io::{self, BufRead, Write};

use crate::accounts;
use crate::auth::{self, RegisterOutcome};
use crate::books::{self, Book};
use crate::error::LibraryError;
use crate::error::handlers::{Operation, handle_error, user_message};
use crate::shell::commands::{
    AuthCommand, BookCommand, MainCommand, parse_auth_command, parse_book_command,
    parse_main_command,
};
use crate::shell::console::Console;
use crate::shell::session::Session;
use crate::shell::views;
use crate::storage::Gateway;

const SELECT_PROMPT: &str = "\nSelect an option: ";

/// Where control goes after a menu action.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Flow {
    Stay,
    Back,
    /// Input exhausted or the user chose to exit
    Quit,
}

pub struct Shell<'g, R, W> {
    gateway: &'g mut Gateway,
    console: Console<R, W>,
    session: Session,
}

impl<'g, R: BufRead, W: Write> Shell<'g, R, W> {
    pub fn new(gateway: &'g mut Gateway, input: R, output: W) -> Self {
        Self {
            gateway,
            console: Console::new(input, output),
            session: Session::default(),
        }
    }

    /// Run until the user exits or input ends.
    ///
    /// Only console I/O errors escape; every library error is reported and
    /// the user is returned to the menu they came from.
    pub fn run(&mut self) -> io::Result<()> {
        let rule = "=".repeat(50);
        self.console.say(&format!("\n{}\n{}\n{}", rule, views::BANNER, rule))?;
        if self.gateway.is_connected() {
            self.console.say("✅ Connected to the database")?;
        }

        while self.auth_menu()? == Flow::Stay {}

        self.session.logout();
        info!("Shell finished");
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    fn report(&mut self, err: LibraryError, operation: Operation) -> io::Result<()> {
        handle_error(&err);
        self.console.say(&user_message(&err, operation))
    }

    // --------------------
    // Authentication menu
    // --------------------

    fn auth_menu(&mut self) -> io::Result<Flow> {
        self.console.say(views::AUTH_MENU)?;
        let Some(choice) = self.console.prompt(SELECT_PROMPT)? else {
            return Ok(Flow::Quit);
        };

        match parse_auth_command(&choice) {
            AuthCommand::Login => self.login(),
            AuthCommand::Register => self.register_account(),
            AuthCommand::Exit => {
                self.console.say("👋 Goodbye!")?;
                Ok(Flow::Quit)
            }
            AuthCommand::Unknown => {
                self.console.say("❌ Invalid option")?;
                Ok(Flow::Stay)
            }
        }
    }

    fn login(&mut self) -> io::Result<Flow> {
        let Some(email) = self.console.prompt("Email: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(secret) = self.console.prompt("Password: ")? else {
            return Ok(Flow::Quit);
        };

        match auth::authenticate(self.gateway, &email, &secret) {
            Ok(Some(account)) => {
                self.console
                    .say(&format!("✅ Welcome, {}!", account.name()))?;
                self.session.login(account);
                match self.main_menu()? {
                    Flow::Quit => Ok(Flow::Quit),
                    _ => Ok(Flow::Stay),
                }
            }
            Ok(None) => {
                self.console.say("❌ Invalid credentials")?;
                Ok(Flow::Stay)
            }
            Err(e) => {
                self.report(e.into(), Operation::Read)?;
                Ok(Flow::Stay)
            }
        }
    }

    fn register_account(&mut self) -> io::Result<Flow> {
        self.console.say("\n--- REGISTER NEW USER ---")?;
        let Some(name) = self.console.prompt("Full name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(role) = self.console.prompt("Role (Student/Teacher/Staff): ")? else {
            return Ok(Flow::Quit);
        };
        let Some(email) = self.console.prompt("Email: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(secret) = self.console.prompt("Password: ")? else {
            return Ok(Flow::Quit);
        };

        match auth::register(self.gateway, &name, &role, &email, &secret) {
            Ok(RegisterOutcome::Registered(_)) => {
                self.console.say("✅ User registered successfully")?
            }
            Ok(RegisterOutcome::DuplicateEmail) => {
                self.console.say("❌ That email is already registered")?
            }
            Err(e) => self.report(e, Operation::Write)?,
        }
        Ok(Flow::Stay)
    }

    // --------------------
    // Main menu
    // --------------------

    fn main_menu(&mut self) -> io::Result<Flow> {
        loop {
            let user = self
                .session
                .current()
                .map(|account| account.name().to_string())
                .unwrap_or_default();
            self.console.say(&views::main_menu(&user))?;
            let Some(choice) = self.console.prompt(SELECT_PROMPT)? else {
                return Ok(Flow::Quit);
            };

            let flow = match parse_main_command(&choice) {
                MainCommand::Books => match self.book_menu()? {
                    Flow::Quit => Flow::Quit,
                    _ => Flow::Stay,
                },
                MainCommand::ListUsers => self.list_users()?,
                MainCommand::Logout => {
                    self.session.logout();
                    self.console.say("🔒 Session closed")?;
                    Flow::Back
                }
                MainCommand::Unknown => {
                    self.console.say("❌ Invalid option")?;
                    Flow::Stay
                }
            };

            if flow != Flow::Stay {
                return Ok(flow);
            }
        }
    }

    fn list_users(&mut self) -> io::Result<Flow> {
        match accounts::list_all(self.gateway) {
            Ok(list) if list.is_empty() => self.console.say("👥 No users registered")?,
            Ok(list) => {
                self.console.say("\n--- USER LIST ---")?;
                for account in &list {
                    self.console
                        .say(&format!("   {}", views::account_line(account)))?;
                }
            }
            Err(e) => self.report(e.into(), Operation::Read)?,
        }
        Ok(Flow::Stay)
    }

    // --------------------
    // Book menu
    // --------------------

    fn book_menu(&mut self) -> io::Result<Flow> {
        loop {
            self.console.say(views::BOOK_MENU)?;
            let Some(choice) = self.console.prompt(SELECT_PROMPT)? else {
                return Ok(Flow::Quit);
            };

            let flow = match parse_book_command(&choice) {
                BookCommand::RegisterBook => self.register_book()?,
                BookCommand::ListBooks => self.list_books()?,
                BookCommand::Back => Flow::Back,
                BookCommand::Unknown => {
                    self.console.say("❌ Invalid option")?;
                    Flow::Stay
                }
            };

            if flow != Flow::Stay {
                return Ok(flow);
            }
        }
    }

    fn register_book(&mut self) -> io::Result<Flow> {
        let Some(title) = self.console.prompt("Title: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(author) = self.console.prompt("Author: ")? else {
            return Ok(Flow::Quit);
        };

        let year = i64::from(chrono::Local::now().year());
        let mut book = Book::new(&title, &author, year);
        match books::save(self.gateway, &mut book) {
            Ok(()) => self.console.say("✅ Book registered successfully")?,
            Err(e) => self.report(e.into(), Operation::Write)?,
        }
        Ok(Flow::Stay)
    }

    fn list_books(&mut self) -> io::Result<Flow> {
        match books::list_all(self.gateway) {
            Ok(list) if list.is_empty() => self.console.say("📚 No books registered")?,
            Ok(list) => {
                self.console.say("\n--- BOOK LIST ---")?;
                for book in &list {
                    self.console.say(&format!("   {}", views::book_line(book)))?;
                }
            }
            Err(e) => self.report(e.into(), Operation::Read)?,
        }
        Ok(Flow::Stay)
    }
}
