//! Authentication and authorization: password hashing, JWT sessions, product
//! keys and route preconditions.

pub mod current_user;
pub mod password;
pub mod permissions;
pub mod product_key;
pub mod session;
