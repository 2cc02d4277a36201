//! Terminal front end for the quote wizard.
//!
//! Renders the three wizard screens as text, turns typed lines into session
//! commands and keeps the session's event journal.

pub mod app;
pub mod config;
pub mod input;
pub mod render;

pub use app::{ConsoleApp, Snapshot};
pub use config::{ConfigError, ConsoleConfig};
pub use input::{InputError, Intent, StubAction, parse_line};
