//! Request and response bodies for signup, signin and product keys.

use crate::{
    api::models::users::UserType,
    config::PasswordConfig,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account registration request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    /// Required for any account type other than buyer.
    #[serde(rename = "productKey", default, skip_serializing_if = "Option::is_none")]
    pub product_key: Option<String>,
}

impl SignupRequest {
    pub fn validate(&self, password_config: &PasswordConfig) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::BadRequest {
                message: "Name must not be empty".to_string(),
            });
        }
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        if self.password.len() < password_config.min_length {
            return Err(Error::BadRequest {
                message: format!("Password must be at least {} characters", password_config.min_length),
            });
        }
        if self.password.len() > password_config.max_length {
            return Err(Error::BadRequest {
                message: format!("Password must be at most {} characters", password_config.max_length),
            });
        }
        Ok(())
    }
}

/// Credentials for an existing account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Request to issue a product key for a prospective account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateProductKeyRequest {
    pub email: String,
    #[serde(rename = "userType")]
    pub user_type: UserType,
}

impl GenerateProductKeyRequest {
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)
    }
}

/// A session token, returned on signup and signin.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// An issued product key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductKeyResponse {
    pub key: String,
}

fn validate_email(email: &str) -> Result<()> {
    // Deliverability is the mail server's problem; reject the obviously broken
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    };
    if well_formed {
        Ok(())
    } else {
        Err(Error::BadRequest {
            message: "Invalid email address".to_string(),
        })
    }
}

fn validate_phone(phone: &str) -> Result<()> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    let allowed = phone.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '));
    if digits >= 7 && allowed {
        Ok(())
    } else {
        Err(Error::BadRequest {
            message: "Invalid phone number".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password_config() -> PasswordConfig {
        PasswordConfig {
            min_length: 6,
            max_length: 72,
        }
    }

    fn valid_signup() -> SignupRequest {
        SignupRequest {
            name: "Jane Buyer".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 (555) 010-0000".to_string(),
            password: "hunter22".to_string(),
            product_key: None,
        }
    }

    #[test]
    fn test_valid_signup_passes() {
        assert!(valid_signup().validate(&password_config()).is_ok());
    }

    #[test]
    fn test_rejects_empty_name() {
        let mut request = valid_signup();
        request.name = "   ".to_string();
        assert!(request.validate(&password_config()).is_err());
    }

    #[test]
    fn test_rejects_bad_emails() {
        for email in ["no-at-sign", "@example.com", "user@nodot", "user@.com", "user@example."] {
            let mut request = valid_signup();
            request.email = email.to_string();
            assert!(request.validate(&password_config()).is_err(), "accepted email: {email}");
        }
    }

    #[test]
    fn test_rejects_bad_phone() {
        let mut request = valid_signup();
        request.phone = "call me".to_string();
        assert!(request.validate(&password_config()).is_err());

        request.phone = "12345".to_string();
        assert!(request.validate(&password_config()).is_err());
    }

    #[test]
    fn test_rejects_password_out_of_bounds() {
        let mut request = valid_signup();
        request.password = "short".to_string();
        assert!(request.validate(&password_config()).is_err());

        request.password = "x".repeat(73);
        assert!(request.validate(&password_config()).is_err());
    }

    #[test]
    fn test_product_key_wire_name() {
        let json = r#"{"name":"R","email":"r@example.com","phone":"5550100000","password":"hunter22","productKey":"abc"}"#;
        let request: SignupRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.product_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_generate_product_key_wire_shape() {
        let json = r#"{"email":"r@example.com","userType":"REALTOR"}"#;
        let request: GenerateProductKeyRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.user_type, UserType::Realtor);
        assert!(request.validate().is_ok());
    }
}
