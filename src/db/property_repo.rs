//! Repository functions for the `properties` table.
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::query::bind_query_as;
use crate::search::{SearchCriteria, build_property_search};

/// A stored property. `cost_per_night` is in cents.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

/// A search hit: the property plus its mean review rating, if reviewed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PropertyResult {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProperty {
    pub owner_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_photo_url: String,
    #[serde(default)]
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

/// Run a property search for `criteria`, returning at most `limit` rows.
///
/// Malformed criteria or limit fail with [`SearchQueryError::Criteria`]
/// before the database is touched.
pub async fn search(
    db: &PgPool,
    criteria: &SearchCriteria,
    limit: i64,
) -> Result<Vec<PropertyResult>, SearchQueryError> {
    let plan = build_property_search(criteria, limit)?;
    debug!(sql = plan.sql(), params = ?plan.params(), "property search");

    let rows = bind_query_as::<PropertyResult>(&plan).fetch_all(db).await?;
    Ok(rows)
}

/// Failure of [`search`]: either the input was rejected or the query failed.
#[derive(thiserror::Error, Debug)]
pub enum SearchQueryError {
    #[error(transparent)]
    Criteria(#[from] crate::search::SearchError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Insert a property listing and return the stored row.
pub async fn insert(db: &PgPool, p: &NewProperty) -> sqlx::Result<Property> {
    sqlx::query_as::<_, Property>(
        r#"
        INSERT INTO properties (
            owner_id,
            title,
            description,
            thumbnail_photo_url,
            cover_photo_url,
            cost_per_night,
            parking_spaces,
            number_of_bathrooms,
            number_of_bedrooms,
            country,
            street,
            city,
            province,
            post_code
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(p.owner_id)
    .bind(&p.title)
    .bind(&p.description)
    .bind(&p.thumbnail_photo_url)
    .bind(&p.cover_photo_url)
    .bind(p.cost_per_night)
    .bind(p.parking_spaces)
    .bind(p.number_of_bathrooms)
    .bind(p.number_of_bedrooms)
    .bind(&p.country)
    .bind(&p.street)
    .bind(&p.city)
    .bind(&p.province)
    .bind(&p.post_code)
    .fetch_one(db)
    .await
}
