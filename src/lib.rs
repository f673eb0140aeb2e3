pub mod accounts;
pub mod auth;
pub mod books;
pub mod config;
pub mod error;
pub mod shell;
pub mod storage;
pub mod utils;

pub use config::AppConfig;
pub use shell::Shell;
pub use storage::Gateway;
