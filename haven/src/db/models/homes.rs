//! Database models for home listings and their images.

use crate::api::models::homes::{CreateHomeRequest, PropertyType, UpdateHomeRequest};
use crate::types::{HomeId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Request to create a home row plus one image row per URL.
#[derive(Debug, Clone)]
pub struct HomeCreateDBRequest {
    pub address: String,
    pub city: String,
    pub price: i64,
    pub property_type: PropertyType,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: i32,
    pub land_size: i64,
    pub realtor_id: UserId,
    pub image_urls: Vec<String>,
}

impl From<(CreateHomeRequest, UserId)> for HomeCreateDBRequest {
    fn from((request, realtor_id): (CreateHomeRequest, UserId)) -> Self {
        Self {
            address: request.address,
            city: request.city,
            price: request.price,
            property_type: request.property_type,
            number_of_bedrooms: request.number_of_bedrooms,
            number_of_bathrooms: request.number_of_bathrooms,
            land_size: request.land_size,
            realtor_id,
            image_urls: request.image.into_iter().map(|i| i.url).collect(),
        }
    }
}

/// Partial update: unset fields leave the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct HomeUpdateDBRequest {
    pub address: Option<String>,
    pub city: Option<String>,
    pub price: Option<i64>,
    pub property_type: Option<PropertyType>,
    pub number_of_bedrooms: Option<i32>,
    pub number_of_bathrooms: Option<i32>,
    pub land_size: Option<i64>,
}

impl From<UpdateHomeRequest> for HomeUpdateDBRequest {
    fn from(request: UpdateHomeRequest) -> Self {
        Self {
            address: request.address,
            city: request.city,
            price: request.price,
            property_type: request.property_type,
            number_of_bedrooms: request.number_of_bedrooms,
            number_of_bathrooms: request.number_of_bathrooms,
            land_size: request.land_size,
        }
    }
}

/// A home row with its image relation already flattened to at most the first URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeDBResponse {
    pub id: HomeId,
    pub address: String,
    pub city: String,
    pub price: i64,
    pub property_type: PropertyType,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: i32,
    pub land_size: i64,
    pub realtor_id: UserId,
    pub listed_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub image: Option<String>,
}

/// The owning realtor of a home, as resolved for ownership checks and inquiries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RealtorDBResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
}
