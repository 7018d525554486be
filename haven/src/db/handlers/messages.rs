//! Database repository for buyer inquiry messages.

use crate::{
    db::{
        errors::Result,
        models::messages::{HomeMessageDBResponse, MessageCreateDBRequest, MessageDBResponse},
    },
    types::HomeId,
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Messages<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Messages<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(home_id = request.home_id, buyer_id = request.buyer_id), err)]
    pub async fn create(&mut self, request: &MessageCreateDBRequest) -> Result<MessageDBResponse> {
        let message = sqlx::query_as::<_, MessageDBResponse>(
            r#"
            INSERT INTO messages (message, home_id, buyer_id, realtor_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&request.message)
        .bind(request.home_id)
        .bind(request.buyer_id)
        .bind(request.realtor_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(message)
    }

    /// Messages for a home with the inquiring buyer's contact details attached.
    #[instrument(skip(self), err)]
    pub async fn list_by_home(&mut self, home_id: HomeId) -> Result<Vec<HomeMessageDBResponse>> {
        let messages = sqlx::query_as::<_, HomeMessageDBResponse>(
            r#"
            SELECT m.message, u.name AS buyer_name, u.phone AS buyer_phone, u.email AS buyer_email
            FROM messages m
            JOIN users u ON u.id = m.buyer_id
            WHERE m.home_id = $1
            ORDER BY m.created_at
            "#,
        )
        .bind(home_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(messages)
    }
}
