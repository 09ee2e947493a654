pub mod chat;
pub mod host;
pub mod scheduling;
