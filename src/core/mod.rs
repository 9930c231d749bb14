pub mod api;
pub mod blocklist;
pub mod client;
pub mod error;
pub mod models;
pub mod poll;
pub mod prefs;
pub mod search;

mod conversation;
mod directory;
mod messaging;
mod session;

pub use messaging::ComposerAction;
