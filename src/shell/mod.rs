//! Application shell
//!
//! Text menus, console input and rendering. The only layer that talks to a
//! human.

pub mod commands;
pub mod console;
pub mod core;
pub mod session;
pub mod views;

pub use self::core::Shell;
pub use session::Session;
