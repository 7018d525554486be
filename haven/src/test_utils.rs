//! Test utilities (available with the `test-utils` feature).

use crate::{
    api::models::users::{CurrentUser, UserType},
    config::{AuthConfig, Config, CorsConfig, DatabaseConfig, PasswordConfig, SecurityConfig},
    db::models::users::UserDBResponse,
    types::UserId,
};
use std::time::Duration;

pub fn create_test_config() -> Config {
    Config {
        database_url: None,
        database: DatabaseConfig {
            url: Some("postgres://localhost/haven_test".to_string()),
            max_connections: 1,
        },
        secret_key: Some("test-secret-key-for-jwt".to_string()),
        product_key_secret: Some("test-product-key-secret".to_string()),
        auth: AuthConfig {
            password: PasswordConfig {
                min_length: 6,
                max_length: 72,
            },
            security: SecurityConfig {
                jwt_expiry: Duration::from_secs(3600),
                cors: CorsConfig::default(),
            },
        },
        ..Default::default()
    }
}

pub fn create_test_current_user(id: UserId, name: &str) -> CurrentUser {
    CurrentUser {
        id,
        name: name.to_string(),
    }
}

pub fn create_test_db_user(id: UserId, user_type: UserType) -> UserDBResponse {
    let now = chrono::Utc::now();
    UserDBResponse {
        id,
        name: format!("user-{id}"),
        email: format!("user-{id}@example.com"),
        phone: "+1 555 010 0000".to_string(),
        password_hash: "unused".to_string(),
        user_type,
        created_at: now,
        updated_at: now,
    }
}
