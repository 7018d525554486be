//! Shared identifier types.

/// Identifier for a user (buyer or realtor).
pub type UserId = i64;

/// Identifier for a home listing.
pub type HomeId = i64;

/// Identifier for a buyer inquiry message.
pub type MessageId = i64;
