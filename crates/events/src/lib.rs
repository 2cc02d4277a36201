//! `quotekit-events`: command/event mechanics shared by the domain crates.
//!
//! Nothing here knows about quotes: these are the traits and the in-memory
//! journal that the quote session is built on.

pub mod command;
pub mod envelope;
pub mod event;
pub mod handler;
pub mod journal;

pub use command::Command;
pub use envelope::EventEnvelope;
pub use event::Event;
pub use handler::execute;
pub use journal::SessionJournal;
