//! Database repository for home listings.
//!
//! Homes carry an image relation that responses flatten to at most the first
//! URL. All reads attach that single URL; writes that touch multiple tables
//! run in a transaction.

use crate::{
    api::models::homes::PropertyType,
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::homes::{HomeCreateDBRequest, HomeDBResponse, HomeUpdateDBRequest, RealtorDBResponse},
    },
    types::{HomeId, UserId},
};
use chrono::{DateTime, Utc};
use sqlx::{Connection, FromRow, PgConnection, QueryBuilder};
use tracing::instrument;

/// Filter for listing homes: a conjunction of optional predicates.
#[derive(Debug, Clone, Default)]
pub struct HomeFilter {
    pub city: Option<String>,
    pub property_type: Option<PropertyType>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

// Database entity model (image relation fetched separately)
#[derive(Debug, Clone, FromRow)]
struct Home {
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
}

impl From<(Home, Option<String>)> for HomeDBResponse {
    fn from((home, image): (Home, Option<String>)) -> Self {
        Self {
            id: home.id,
            address: home.address,
            city: home.city,
            price: home.price,
            property_type: home.property_type,
            number_of_bedrooms: home.number_of_bedrooms,
            number_of_bathrooms: home.number_of_bathrooms,
            land_size: home.land_size,
            realtor_id: home.realtor_id,
            listed_date: home.listed_date,
            created_at: home.created_at,
            updated_at: home.updated_at,
            image,
        }
    }
}

/// Build the filtered SELECT for [`Homes::list`]: every present predicate is
/// ANDed, absent ones are skipped.
fn list_query(filter: &HomeFilter) -> QueryBuilder<'_, sqlx::Postgres> {
    let mut query = QueryBuilder::new("SELECT * FROM homes WHERE TRUE");

    if let Some(city) = &filter.city {
        query.push(" AND city = ").push_bind(city);
    }
    if let Some(property_type) = filter.property_type {
        query.push(" AND property_type = ").push_bind(property_type);
    }
    if let Some(min_price) = filter.min_price {
        query.push(" AND price >= ").push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        query.push(" AND price <= ").push_bind(max_price);
    }
    query.push(" ORDER BY listed_date DESC");

    query
}

pub struct Homes<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Homes<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// First image URL linked to a home, if any.
    async fn first_image_url(conn: &mut PgConnection, home_id: HomeId) -> Result<Option<String>> {
        let url = sqlx::query_scalar::<_, String>("SELECT url FROM images WHERE home_id = $1 ORDER BY id LIMIT 1")
            .bind(home_id)
            .fetch_optional(conn)
            .await?;

        Ok(url)
    }

    /// Resolve the owning realtor of a home.
    ///
    /// This is the ownership-check primitive: handlers compare the returned id
    /// against the authenticated user before mutating or reading messages.
    #[instrument(skip(self), err)]
    pub async fn get_home_realtor(&mut self, home_id: HomeId) -> Result<Option<RealtorDBResponse>> {
        let realtor = sqlx::query_as::<_, RealtorDBResponse>(
            r#"
            SELECT u.id, u.name, u.email, u.phone
            FROM homes h
            JOIN users u ON u.id = h.realtor_id
            WHERE h.id = $1
            "#,
        )
        .bind(home_id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(realtor)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Homes<'c> {
    type CreateRequest = HomeCreateDBRequest;
    type UpdateRequest = HomeUpdateDBRequest;
    type Response = HomeDBResponse;
    type Id = HomeId;
    type Filter = HomeFilter;

    #[instrument(skip(self, request), fields(city = %request.city, realtor_id = request.realtor_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let mut tx = self.db.begin().await?;

        let home = sqlx::query_as::<_, Home>(
            r#"
            INSERT INTO homes (address, city, price, property_type, number_of_bedrooms, number_of_bathrooms, land_size, realtor_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&request.address)
        .bind(&request.city)
        .bind(request.price)
        .bind(request.property_type)
        .bind(request.number_of_bedrooms)
        .bind(request.number_of_bathrooms)
        .bind(request.land_size)
        .bind(request.realtor_id)
        .fetch_one(&mut *tx)
        .await?;

        // One image row per supplied URL, linked to the new home
        for url in &request.image_urls {
            sqlx::query("INSERT INTO images (url, home_id) VALUES ($1, $2)")
                .bind(url)
                .bind(home.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        let image = request.image_urls.first().cloned();
        Ok(HomeDBResponse::from((home, image)))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let home = sqlx::query_as::<_, Home>("SELECT * FROM homes WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        if let Some(home) = home {
            let image = Self::first_image_url(self.db, home.id).await?;
            Ok(Some(HomeDBResponse::from((home, image))))
        } else {
            Ok(None)
        }
    }

    #[instrument(skip(self, filter), fields(city = ?filter.city), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut query = list_query(filter);
        let homes = query.build_query_as::<Home>().fetch_all(&mut *self.db).await?;

        let mut result = Vec::with_capacity(homes.len());
        for home in homes {
            let image = Self::first_image_url(self.db, home.id).await?;
            result.push(HomeDBResponse::from((home, image)));
        }

        Ok(result)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        // Images and messages cascade at the schema level
        let result = sqlx::query("DELETE FROM homes WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let mut tx = self.db.begin().await?;

        // Atomic update with conditional field updates
        let home = sqlx::query_as::<_, Home>(
            r#"
            UPDATE homes SET
                address = COALESCE($2, address),
                city = COALESCE($3, city),
                price = COALESCE($4, price),
                property_type = COALESCE($5, property_type),
                number_of_bedrooms = COALESCE($6, number_of_bedrooms),
                number_of_bathrooms = COALESCE($7, number_of_bathrooms),
                land_size = COALESCE($8, land_size),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.address)
        .bind(&request.city)
        .bind(request.price)
        .bind(request.property_type)
        .bind(request.number_of_bedrooms)
        .bind(request.number_of_bathrooms)
        .bind(request.land_size)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound)?;

        let image = Self::first_image_url(&mut tx, home.id).await?;

        tx.commit().await?;

        Ok(HomeDBResponse::from((home, image)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_without_filters() {
        let filter = HomeFilter::default();
        let mut query = list_query(&filter);
        assert_eq!(query.sql(), "SELECT * FROM homes WHERE TRUE ORDER BY listed_date DESC");
    }

    #[test]
    fn test_list_query_city_only() {
        let filter = HomeFilter {
            city: Some("Springfield".to_string()),
            ..Default::default()
        };
        let mut query = list_query(&filter);
        let sql = query.sql();

        assert!(sql.contains(" AND city = $1"));
        assert!(!sql.contains("price"));
        assert!(!sql.contains("property_type"));
    }

    #[test]
    fn test_list_query_closed_price_interval() {
        let filter = HomeFilter {
            min_price: Some(100_000),
            max_price: Some(500_000),
            ..Default::default()
        };
        let mut query = list_query(&filter);
        let sql = query.sql();

        assert!(sql.contains(" AND price >= $1"));
        assert!(sql.contains(" AND price <= $2"));
    }

    #[test]
    fn test_list_query_open_price_interval() {
        let filter = HomeFilter {
            min_price: Some(100_000),
            ..Default::default()
        };
        let mut query = list_query(&filter);
        let sql = query.sql();

        assert!(sql.contains(" AND price >= $1"));
        assert!(!sql.contains("<="));
    }

    #[test]
    fn test_list_query_all_predicates_conjoined() {
        let filter = HomeFilter {
            city: Some("Springfield".to_string()),
            property_type: Some(PropertyType::Condo),
            min_price: Some(100_000),
            max_price: Some(500_000),
        };
        let mut query = list_query(&filter);
        let sql = query.sql();

        assert!(sql.contains(" AND city = $1"));
        assert!(sql.contains(" AND property_type = $2"));
        assert!(sql.contains(" AND price >= $3"));
        assert!(sql.contains(" AND price <= $4"));
        assert!(sql.ends_with(" ORDER BY listed_date DESC"));
    }
}
