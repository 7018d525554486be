//! Request and response bodies for buyer inquiries.

use crate::{
    db::models::messages::{HomeMessageDBResponse, MessageDBResponse},
    errors::{Error, Result},
    types::{HomeId, MessageId, UserId},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A buyer's inquiry about a listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InquireRequest {
    pub message: String,
}

impl InquireRequest {
    pub fn validate(&self) -> Result<()> {
        if self.message.trim().is_empty() {
            return Err(Error::BadRequest {
                message: "Message must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// A stored inquiry, as returned to the buyer who sent it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub id: MessageId,
    pub message: String,
    #[serde(rename = "homeId")]
    pub home_id: HomeId,
    #[serde(rename = "buyerId")]
    pub buyer_id: UserId,
    #[serde(rename = "realtorId")]
    pub realtor_id: UserId,
}

impl From<MessageDBResponse> for MessageResponse {
    fn from(message: MessageDBResponse) -> Self {
        Self {
            id: message.id,
            message: message.message,
            home_id: message.home_id,
            buyer_id: message.buyer_id,
            realtor_id: message.realtor_id,
        }
    }
}

/// Buyer contact details attached to an inquiry, for the owning realtor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageBuyer {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// An inquiry as shown to the owning realtor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomeMessageResponse {
    pub message: String,
    pub buyer: MessageBuyer,
}

impl From<HomeMessageDBResponse> for HomeMessageResponse {
    fn from(message: HomeMessageDBResponse) -> Self {
        Self {
            message: message.message,
            buyer: MessageBuyer {
                name: message.buyer_name,
                phone: message.buyer_phone,
                email: message.buyer_email,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inquire_rejects_blank_message() {
        let request = InquireRequest {
            message: "  ".to_string(),
        };
        assert!(request.validate().is_err());

        let request = InquireRequest {
            message: "Is this still available?".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_home_message_nests_buyer_contact() {
        let response = HomeMessageResponse::from(HomeMessageDBResponse {
            message: "Is this still available?".to_string(),
            buyer_name: "Jane Buyer".to_string(),
            buyer_phone: "5550100000".to_string(),
            buyer_email: "jane@example.com".to_string(),
        });

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["buyer"]["email"], "jane@example.com");
        assert_eq!(value["message"], "Is this still available?");
    }
}
