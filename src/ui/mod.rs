pub mod confirm_dialog;
pub mod conversation;
pub mod details;
pub mod directory;
pub mod login;
