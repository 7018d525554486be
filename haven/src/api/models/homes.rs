//! Request and response bodies for home listings.
//!
//! Wire field names follow the original public API: bedroom/bathroom counts
//! and the listing date are camelCase, while `property_type` and `image`
//! stay as-is. Realtor ids and row timestamps are never exposed.

use crate::{
    db::{handlers::HomeFilter, models::homes::HomeDBResponse},
    errors::{Error, Result},
    types::HomeId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Kind of property a listing is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "property_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyType {
    #[serde(alias = "residential")]
    Residential,
    #[serde(alias = "condo")]
    Condo,
}

impl std::str::FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "RESIDENTIAL" | "residential" => Ok(Self::Residential),
            "CONDO" | "condo" => Ok(Self::Condo),
            _ => Err(format!("unknown property type: {s}")),
        }
    }
}

/// One image attached to a listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageUrl {
    pub url: String,
}

/// New listing request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateHomeRequest {
    pub address: String,
    pub city: String,
    pub price: i64,
    pub property_type: PropertyType,
    #[serde(rename = "numberOfBedrooms")]
    pub number_of_bedrooms: i32,
    #[serde(rename = "numberOfBathrooms")]
    pub number_of_bathrooms: i32,
    pub land_size: i64,
    pub image: Vec<ImageUrl>,
}

impl CreateHomeRequest {
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(Error::BadRequest {
                message: "Address must not be empty".to_string(),
            });
        }
        if self.city.trim().is_empty() {
            return Err(Error::BadRequest {
                message: "City must not be empty".to_string(),
            });
        }
        validate_dimensions(self.price, self.number_of_bedrooms, self.number_of_bathrooms, self.land_size)?;
        if self.image.iter().any(|i| i.url.trim().is_empty()) {
            return Err(Error::BadRequest {
                message: "Image URLs must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Partial listing update: absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateHomeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(rename = "numberOfBedrooms", default, skip_serializing_if = "Option::is_none")]
    pub number_of_bedrooms: Option<i32>,
    #[serde(rename = "numberOfBathrooms", default, skip_serializing_if = "Option::is_none")]
    pub number_of_bathrooms: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_size: Option<i64>,
}

impl UpdateHomeRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(address) = &self.address {
            if address.trim().is_empty() {
                return Err(Error::BadRequest {
                    message: "Address must not be empty".to_string(),
                });
            }
        }
        if let Some(city) = &self.city {
            if city.trim().is_empty() {
                return Err(Error::BadRequest {
                    message: "City must not be empty".to_string(),
                });
            }
        }
        validate_dimensions(
            self.price.unwrap_or(1),
            self.number_of_bedrooms.unwrap_or(1),
            self.number_of_bathrooms.unwrap_or(1),
            self.land_size.unwrap_or(1),
        )
    }
}

fn validate_dimensions(price: i64, bedrooms: i32, bathrooms: i32, land_size: i64) -> Result<()> {
    if price <= 0 {
        return Err(Error::BadRequest {
            message: "Price must be positive".to_string(),
        });
    }
    if bedrooms <= 0 || bathrooms <= 0 {
        return Err(Error::BadRequest {
            message: "Bedroom and bathroom counts must be positive".to_string(),
        });
    }
    if land_size <= 0 {
        return Err(Error::BadRequest {
            message: "Land size must be positive".to_string(),
        });
    }
    Ok(())
}

/// Conjunctive listing filters, all optional.
///
/// Clients send empty values for cleared form fields (`?city=`); an empty
/// value means the filter is absent, not a filter on the empty string.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListHomesQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub property_type: Option<PropertyType>,
    #[serde(rename = "minPrice", default, deserialize_with = "empty_string_as_none")]
    pub min_price: Option<i64>,
    #[serde(rename = "maxPrice", default, deserialize_with = "empty_string_as_none")]
    pub max_price: Option<i64>,
}

fn empty_string_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

impl From<ListHomesQuery> for HomeFilter {
    fn from(query: ListHomesQuery) -> Self {
        Self {
            city: query.city,
            property_type: query.property_type,
            min_price: query.min_price,
            max_price: query.max_price,
        }
    }
}

/// Public view of a listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomeResponse {
    pub id: HomeId,
    pub address: String,
    pub city: String,
    pub price: i64,
    pub property_type: PropertyType,
    #[serde(rename = "numberOfBedrooms")]
    pub number_of_bedrooms: i32,
    #[serde(rename = "numberOfBathrooms")]
    pub number_of_bathrooms: i32,
    #[serde(rename = "landSize")]
    pub land_size: i64,
    #[serde(rename = "listedDate")]
    pub listed_date: DateTime<Utc>,
    pub image: Option<String>,
}

impl From<HomeDBResponse> for HomeResponse {
    fn from(home: HomeDBResponse) -> Self {
        Self {
            id: home.id,
            address: home.address,
            city: home.city,
            price: home.price,
            property_type: home.property_type,
            number_of_bedrooms: home.number_of_bedrooms,
            number_of_bathrooms: home.number_of_bathrooms,
            land_size: home.land_size,
            listed_date: home.listed_date,
            image: home.image,
        }
    }
}
