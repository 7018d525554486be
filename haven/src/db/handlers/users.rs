//! Database repository for users.

use crate::{
    db::{
        errors::Result,
        models::users::{UserCreateDBRequest, UserDBResponse},
    },
    types::UserId,
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Users<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    pub async fn create(&mut self, request: &UserCreateDBRequest) -> Result<UserDBResponse> {
        let user = sqlx::query_as::<_, UserDBResponse>(
            r#"
            INSERT INTO users (name, email, phone, password_hash, user_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.password_hash)
        .bind(request.user_type)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_id(&mut self, id: UserId) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as::<_, UserDBResponse>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user)
    }

    #[instrument(skip(self, email), err)]
    pub async fn get_by_email(&mut self, email: &str) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as::<_, UserDBResponse>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user)
    }
}
