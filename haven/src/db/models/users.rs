//! Database models for users.

use crate::api::models::users::UserType;
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Request to create a user row. Built by the signup handler after password
/// hashing and product-key checks have passed.
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub user_type: UserType,
}

/// A user row as stored. `password_hash` never leaves the db/auth layers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserDBResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
