//! User account types shared across the API surface.

use crate::types::UserId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account type: buyers browse and inquire, realtors list and manage homes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserType {
    #[serde(alias = "buyer")]
    Buyer,
    #[serde(alias = "realtor")]
    Realtor,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Buyer => write!(f, "BUYER"),
            UserType::Realtor => write!(f, "REALTOR"),
        }
    }
}

/// The authenticated user, as carried in the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_serde_uppercase() {
        assert_eq!(serde_json::to_string(&UserType::Buyer).unwrap(), "\"BUYER\"");
        assert_eq!(serde_json::to_string(&UserType::Realtor).unwrap(), "\"REALTOR\"");
    }

    #[test]
    fn test_user_type_accepts_lowercase_alias() {
        let parsed: UserType = serde_json::from_str("\"realtor\"").unwrap();
        assert_eq!(parsed, UserType::Realtor);

        let parsed: UserType = serde_json::from_str("\"BUYER\"").unwrap();
        assert_eq!(parsed, UserType::Buyer);
    }

    #[test]
    fn test_user_type_display() {
        assert_eq!(UserType::Buyer.to_string(), "BUYER");
        assert_eq!(UserType::Realtor.to_string(), "REALTOR");
    }
}
