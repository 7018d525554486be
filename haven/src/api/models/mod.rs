//! API request/response types, separate from database records.

pub mod auth;
pub mod homes;
pub mod messages;
pub mod users;
