//! Database models for buyer inquiry messages.

use crate::types::{HomeId, MessageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone)]
pub struct MessageCreateDBRequest {
    pub message: String,
    pub home_id: HomeId,
    pub buyer_id: UserId,
    pub realtor_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MessageDBResponse {
    pub id: MessageId,
    pub message: String,
    pub home_id: HomeId,
    pub buyer_id: UserId,
    pub realtor_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// A message joined with the inquiring buyer's contact details.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HomeMessageDBResponse {
    pub message: String,
    pub buyer_name: String,
    pub buyer_phone: String,
    pub buyer_email: String,
}
