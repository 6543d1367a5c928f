//! Reservations as seen by the guest who made them.
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// One reservation with a summary of the reserved property.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GuestReservation {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property_id: i64,
    pub title: String,
    pub thumbnail_photo_url: String,
    pub cost_per_night: i32,
    pub city: String,
    pub average_rating: Option<f64>,
}

/// List a guest's reservations, earliest stay first.
pub async fn list_for_guest(
    db: &PgPool,
    guest_id: i64,
    limit: i64,
) -> sqlx::Result<Vec<GuestReservation>> {
    sqlx::query_as::<_, GuestReservation>(
        r#"
        SELECT
            reservations.id,
            reservations.start_date,
            reservations.end_date,
            properties.id AS property_id,
            properties.title,
            properties.thumbnail_photo_url,
            properties.cost_per_night,
            properties.city,
            avg(property_reviews.rating)::float8 AS average_rating
        FROM reservations
        JOIN properties ON properties.id = reservations.property_id
        LEFT JOIN property_reviews ON properties.id = property_reviews.property_id
        WHERE reservations.guest_id = $1
        GROUP BY reservations.id, properties.id
        ORDER BY reservations.start_date ASC
        LIMIT $2
        "#,
    )
    .bind(guest_id)
    .bind(limit)
    .fetch_all(db)
    .await
}
