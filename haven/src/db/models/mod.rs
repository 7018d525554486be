//! Database record structures matching table schemas.

pub mod homes;
pub mod messages;
pub mod users;
