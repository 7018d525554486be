//! Role and ownership preconditions for protected routes.
//!
//! Handlers call these at the top, after loading the requester's account row,
//! so every mutation is guarded before any work happens.

use crate::{
    api::models::users::UserType,
    db::models::users::UserDBResponse,
    errors::{Error, Result},
    types::UserId,
};

/// Require the user to hold a given account type.
pub fn require_role(user: &UserDBResponse, required: UserType, resource: &str) -> Result<()> {
    if user.user_type == required {
        Ok(())
    } else {
        Err(Error::InsufficientPermissions {
            required,
            resource: resource.to_string(),
        })
    }
}

/// Require the requester to be the owning realtor of a listing.
pub fn require_ownership(owner: UserId, requester: UserId) -> Result<()> {
    if owner == requester {
        Ok(())
    } else {
        Err(Error::Unauthenticated {
            message: Some("You do not own this home listing".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_db_user;
    use axum::http::StatusCode;

    #[test]
    fn test_require_role_matches() {
        let realtor = create_test_db_user(1, UserType::Realtor);
        assert!(require_role(&realtor, UserType::Realtor, "home listings").is_ok());
    }

    #[test]
    fn test_require_role_mismatch_is_forbidden() {
        let buyer = create_test_db_user(2, UserType::Buyer);
        let error = require_role(&buyer, UserType::Realtor, "home listings").unwrap_err();
        assert_eq!(error.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_require_ownership() {
        assert!(require_ownership(5, 5).is_ok());

        let error = require_ownership(5, 6).unwrap_err();
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
    }
}
