//! Text rendering for the console. Nothing outside `shell` prints.

use crate::accounts::Account;
use crate::books::Book;

pub const BANNER: &str = "        🏛️  SECURE LIBRARY SYSTEM";

pub const AUTH_MENU: &str = "\n🔐 AUTHENTICATION\n1. Log in\n2. Register new user\n3. Exit";

pub const BOOK_MENU: &str =
    "\n📚 BOOK MANAGEMENT\n1. Register new book\n2. List all books\n3. Back to main menu";

pub fn main_menu(user: &str) -> String {
    format!(
        "\n🏛️  MAIN MENU - User: {}\n1. 📚 Book management\n2. 👤 List users\n3. 🔐 Log out",
        user
    )
}

fn id_label(id: Option<i64>) -> String {
    id.map_or_else(|| "-".to_string(), |id| id.to_string())
}

pub fn account_line(account: &Account) -> String {
    format!(
        "👤 ID: {} - {} ({}) - {}",
        id_label(account.id()),
        account.name(),
        account.role(),
        account.email()
    )
}

pub fn book_line(book: &Book) -> String {
    let status = if book.is_available() {
        "✅ Available"
    } else {
        "📖 On loan"
    };
    format!(
        "📚 ID: {} - '{}' by {} - {}",
        id_label(book.id()),
        book.title(),
        book.author(),
        status
    )
}
