//! Product key generation and verification.
//!
//! Realtor signup is gated behind a pre-issued product key. A key is the
//! Argon2 hash of the applicant's email, the requested account type, and a
//! server-side secret; verification re-derives the input and checks it
//! against the presented hash.

use crate::{
    api::models::users::UserType,
    auth::password,
    config::Config,
    errors::{Error, Result},
};

/// The string a product key commits to.
fn product_key_input(email: &str, user_type: UserType, secret: &str) -> String {
    format!("{email}-{user_type}-{secret}")
}

/// Issue a product key for an email and account type.
pub fn generate_product_key(email: &str, user_type: UserType, config: &Config) -> Result<String> {
    let secret = config.product_key_secret.as_ref().ok_or_else(|| Error::Internal {
        operation: "product keys: product_key_secret is required".to_string(),
    })?;

    password::hash_string(&product_key_input(email, user_type, secret))
}

/// Check a presented product key against the email and account type it must
/// have been issued for.
pub fn verify_product_key(key: &str, email: &str, user_type: UserType, config: &Config) -> Result<bool> {
    let secret = config.product_key_secret.as_ref().ok_or_else(|| Error::Internal {
        operation: "product keys: product_key_secret is required".to_string(),
    })?;

    password::verify_string(&product_key_input(email, user_type, secret), key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_config;

    #[test]
    fn test_generate_and_verify_product_key() {
        let config = create_test_config();

        let key = generate_product_key("realtor@example.com", UserType::Realtor, &config).unwrap();
        assert!(!key.is_empty());

        assert!(verify_product_key(&key, "realtor@example.com", UserType::Realtor, &config).unwrap());
    }

    #[test]
    fn test_key_bound_to_email() {
        let config = create_test_config();

        let key = generate_product_key("realtor@example.com", UserType::Realtor, &config).unwrap();
        assert!(!verify_product_key(&key, "other@example.com", UserType::Realtor, &config).unwrap());
    }

    #[test]
    fn test_key_bound_to_user_type() {
        let config = create_test_config();

        let key = generate_product_key("realtor@example.com", UserType::Realtor, &config).unwrap();
        assert!(!verify_product_key(&key, "realtor@example.com", UserType::Buyer, &config).unwrap());
    }

    #[test]
    fn test_key_bound_to_secret() {
        let mut config = create_test_config();

        let key = generate_product_key("realtor@example.com", UserType::Realtor, &config).unwrap();

        config.product_key_secret = Some("a-different-secret".to_string());
        assert!(!verify_product_key(&key, "realtor@example.com", UserType::Realtor, &config).unwrap());
    }

    #[test]
    fn test_missing_secret_is_internal_error() {
        let mut config = create_test_config();
        config.product_key_secret = None;

        let result = generate_product_key("realtor@example.com", UserType::Realtor, &config);
        assert!(matches!(result.unwrap_err(), Error::Internal { .. }));
    }
}
