//! Per-user session state with actor pattern
//!
//! The SessionManager owns every user's conversation state, known
//! parameters, and usage history, and processes commands via channels. One
//! consumer task mutates state, which gives each user single-writer
//! semantics: parameter updates commit atomically and concurrent builds for
//! the same user cannot race on cooldown bookkeeping.

mod manager;
mod messages;

pub use manager::SessionManager;
pub use messages::{SessionCommand, SessionError, SessionResponse, SessionSnapshot};
