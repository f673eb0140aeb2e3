use std::io::Cursor;

use library_vault::accounts::{self, Role};
use library_vault::auth::hasher;
use library_vault::books;
use library_vault::storage::{Gateway, SqliteConnector};
use library_vault::Shell;
use tempfile::TempDir;

// Helper to build a gateway over a throwaway database file
fn test_gateway() -> (TempDir, Gateway) {
    let tmp = TempDir::new().unwrap();
    let gateway = Gateway::new(Box::new(SqliteConnector::new(tmp.path().join("library.db"))));
    (tmp, gateway)
}

// Helper to drive the shell with scripted input and capture what it printed
fn run_script(gateway: &mut Gateway, script: &str) -> String {
    let mut shell = Shell::new(gateway, Cursor::new(script.to_string()), Vec::new());
    shell.run().unwrap();
    String::from_utf8(shell.into_output()).unwrap()
}

#[test]
fn test_full_session() {
    let (_tmp, mut gateway) = test_gateway();
    let script = [
        "2", "Ana", "Student", "ana@x.com", "1234", // register
        "2", "Ana", "Student", "ana@x.com", "5678", // duplicate email
        "2", "Bob", "Librarian", "bob@x.com", "1234", // invalid role
        "1", "ana@x.com", "wrong", // bad login
        "1", "ana@x.com", "1234", // good login
        "1", // book menu
        "1", "Rayuela", "Cortázar", // register book
        "2", // list books
        "9", // invalid option
        "3", // back
        "2", // list users
        "3", // log out
        "3", // exit
    ]
    .join("\n");

    let output = run_script(&mut gateway, &script);

    assert!(output.contains("✅ User registered successfully"));
    assert!(output.contains("❌ That email is already registered"));
    assert!(output.contains("Invalid role 'Librarian'"));
    assert!(output.contains("❌ Invalid credentials"));
    assert!(output.contains("✅ Welcome, Ana!"));
    assert!(output.contains("✅ Book registered successfully"));
    assert!(output.contains("'Rayuela' by Cortázar - ✅ Available"));
    assert!(output.contains("❌ Invalid option"));
    assert!(output.contains("👤 ID: 1 - Ana (Student) - ana@x.com"));
    assert!(output.contains("🔒 Session closed"));
    assert!(output.trim_end().ends_with("👋 Goodbye!"));
    assert!(!output.contains(&hasher::hash("1234")));

    let users = accounts::list_all(&mut gateway).unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role(), Role::Student);

    let catalog = books::list_all(&mut gateway).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].title(), "Rayuela");
}

#[test]
fn test_empty_listings() {
    let (_tmp, mut gateway) = test_gateway();
    let script = [
        "2", "Eva", "Teacher", "eva@x.com", "abcd", //
        "1", "eva@x.com", "abcd", //
        "1", "2", "3", // books: list, back
        "3", "3",
    ]
    .join("\n");

    let output = run_script(&mut gateway, &script);
    assert!(output.contains("📚 No books registered"));
    assert!(output.contains("MAIN MENU - User: Eva"));
}

#[test]
fn test_connected_notice_is_part_of_shell_output() {
    let (_tmp, mut gateway) = test_gateway();
    gateway.connect().unwrap();

    let output = run_script(&mut gateway, "3\n");
    let banner = output.find("SECURE LIBRARY SYSTEM").expect("banner");
    let notice = output.find("✅ Connected to the database").expect("connected notice");
    assert!(notice > banner);
    assert!(output.contains("👋 Goodbye!"));
}

#[test]
fn test_eof_ends_session_cleanly() {
    let (_tmp, mut gateway) = test_gateway();
    let output = run_script(&mut gateway, "2\nAna\nStudent\n");

    assert!(!output.contains("registered successfully"));
    assert!(accounts::list_all(&mut gateway).unwrap().is_empty());
}

#[test]
fn test_unavailable_database_keeps_shell_responsive() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing").join("library.db");
    let mut gateway = Gateway::new(Box::new(SqliteConnector::new(missing)));

    let script = "2\nAna\nStudent\nana@x.com\n1234\n1\nana@x.com\n1234\n3\n";
    let output = run_script(&mut gateway, script);

    assert!(output.contains("❌ The database is unavailable"));
    assert!(!output.contains("✅ Connected to the database"));
    assert!(output.contains("👋 Goodbye!"));
    assert!(!gateway.is_connected());
}
