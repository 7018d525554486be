//! Repository handlers: thin typed wrappers over a database connection.

pub mod homes;
pub mod messages;
pub mod repository;
pub mod users;

pub use homes::{HomeFilter, Homes};
pub use messages::Messages;
pub use repository::Repository;
pub use users::Users;
