// Repository queries run against a live PostgreSQL.
// Run with: DATABASE_URL=postgres://... cargo test --test db_test -- --ignored
//
// Each test seeds rows under a unique tag, so tests share one database.

use chrono::{NaiveDate, Utc};
use lightbnb::db::{
    self, Db,
    property_repo::{self, NewProperty, PropertyResult},
    reservation_repo,
    user_repo::{self, NewUser, User},
};
use lightbnb::error::AppError;
use lightbnb::search::SearchCriteria;

async fn pool() -> Db {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    db::init_db(&url, 2).await.expect("database init")
}

/// Digits only, so the tag carries no LIKE wildcards.
fn tag() -> String {
    Utc::now()
        .timestamp_nanos_opt()
        .expect("timestamp in range")
        .to_string()
}

async fn user(db: &Db, email: String) -> User {
    user_repo::insert(
        db,
        &NewUser {
            name: "Eva Stanley".into(),
            email,
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA".into(),
        },
    )
    .await
    .expect("insert user")
}

async fn property(db: &Db, owner_id: i64, city: String, cost_per_night: i32) -> i64 {
    let stored = property_repo::insert(
        db,
        &NewProperty {
            owner_id,
            title: format!("Stay in {city}"),
            description: "description".into(),
            thumbnail_photo_url: String::new(),
            cover_photo_url: String::new(),
            cost_per_night,
            parking_spaces: 1,
            number_of_bathrooms: 1,
            number_of_bedrooms: 2,
            country: "Canada".into(),
            street: "1 Main Street".into(),
            city: city.clone(),
            province: "BC".into(),
            post_code: "V5K 0A1".into(),
        },
    )
    .await
    .expect("insert property");

    assert_eq!(stored.owner_id, owner_id);
    assert_eq!(stored.city, city);
    assert!(stored.active);
    stored.id
}

struct Seeded {
    tag: String,
    owner_id: i64,
    guest_id: i64,
    toronto: i64,
    vancouver: i64,
}

/// Two listings: Toronto at $50 with no reviews, Vancouver at $150 with one
/// 4-star review from a single reservation.
async fn seed(db: &Db) -> Seeded {
    let tag = tag();
    let owner = user(db, format!("owner{tag}@example.com")).await;
    let guest = user(db, format!("guest{tag}@example.com")).await;

    let toronto = property(db, owner.id, format!("Toronto {tag}"), 5000).await;
    let vancouver = property(db, owner.id, format!("Vancouver {tag}"), 15000).await;

    let (reservation_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO reservations (start_date, end_date, property_id, guest_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
    .bind(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap())
    .bind(vancouver)
    .bind(guest.id)
    .fetch_one(db)
    .await
    .expect("insert reservation");

    sqlx::query(
        r#"
        INSERT INTO property_reviews (guest_id, property_id, reservation_id, rating, message)
        VALUES ($1, $2, $3, 4, 'lovely')
        "#,
    )
    .bind(guest.id)
    .bind(vancouver)
    .bind(reservation_id)
    .execute(db)
    .await
    .expect("insert review");

    Seeded {
        tag,
        owner_id: owner.id,
        guest_id: guest.id,
        toronto,
        vancouver,
    }
}

fn ids(rows: &[PropertyResult]) -> Vec<i64> {
    rows.iter().map(|r| r.property.id).collect()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn search_lists_unreviewed_properties_with_null_rating() {
    let db = pool().await;
    let s = seed(&db).await;

    let rows = property_repo::search(
        &db,
        &SearchCriteria {
            city: Some(s.tag.clone()),
            ..Default::default()
        },
        10,
    )
    .await
    .expect("search");

    assert_eq!(ids(&rows), vec![s.toronto, s.vancouver]);
    assert_eq!(rows[0].property.cost_per_night, 5000);
    assert_eq!(rows[0].average_rating, None);
    assert_eq!(rows[1].average_rating, Some(4.0));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn search_combines_every_filter() {
    let db = pool().await;
    let s = seed(&db).await;

    let rows = property_repo::search(
        &db,
        &SearchCriteria {
            city: Some(format!("vancouver {}", s.tag)),
            owner_id: Some(s.owner_id.to_string()),
            minimum_price_per_night: Some("100".into()),
            maximum_price_per_night: Some("200".into()),
            minimum_rating: Some("4".into()),
        },
        10,
    )
    .await
    .expect("search");

    assert_eq!(ids(&rows), vec![s.vancouver]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn search_filters_on_rating_and_price() {
    let db = pool().await;
    let s = seed(&db).await;

    let rated = property_repo::search(
        &db,
        &SearchCriteria {
            city: Some(s.tag.clone()),
            minimum_rating: Some("4".into()),
            ..Default::default()
        },
        10,
    )
    .await
    .expect("rating search");
    assert_eq!(ids(&rated), vec![s.vancouver]);

    let too_picky = property_repo::search(
        &db,
        &SearchCriteria {
            city: Some(s.tag.clone()),
            minimum_rating: Some("4.5".into()),
            ..Default::default()
        },
        10,
    )
    .await
    .expect("rating search");
    assert!(too_picky.is_empty());

    let cheap = property_repo::search(
        &db,
        &SearchCriteria {
            city: Some(s.tag.clone()),
            minimum_price_per_night: Some("10".into()),
            maximum_price_per_night: Some("60".into()),
            ..Default::default()
        },
        10,
    )
    .await
    .expect("price search");
    assert_eq!(ids(&cheap), vec![s.toronto]);

    let capped = property_repo::search(
        &db,
        &SearchCriteria {
            city: Some(s.tag.clone()),
            ..Default::default()
        },
        1,
    )
    .await
    .expect("capped search");
    assert_eq!(ids(&capped), vec![s.toronto]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn reservations_for_guest_include_property_summary() {
    let db = pool().await;
    let s = seed(&db).await;

    let reservations = reservation_repo::list_for_guest(&db, s.guest_id, 10)
        .await
        .expect("list reservations");

    assert_eq!(reservations.len(), 1);
    let r = &reservations[0];
    assert_eq!(r.property_id, s.vancouver);
    assert_eq!(r.cost_per_night, 15000);
    assert_eq!(r.start_date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    assert_eq!(r.end_date, NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
    assert_eq!(r.average_rating, Some(4.0));

    let none = reservation_repo::list_for_guest(&db, s.owner_id, 10)
        .await
        .expect("list reservations");
    assert!(none.is_empty());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn users_are_found_by_id_and_any_case_email() {
    let db = pool().await;
    let tag = tag();
    let stored = user(&db, format!("Mixed{tag}@Example.com")).await;

    let by_id = user_repo::find_by_id(&db, stored.id).await.expect("by id");
    assert_eq!(by_id.map(|u| u.email), Some(stored.email.clone()));

    let by_email = user_repo::find_by_email(&db, &format!("mixed{tag}@example.com"))
        .await
        .expect("by email");
    assert_eq!(by_email.map(|u| u.id), Some(stored.id));

    let missing = user_repo::find_by_email(&db, &format!("nobody{tag}@example.com"))
        .await
        .expect("by email");
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn email_differing_only_in_case_is_a_conflict() {
    let db = pool().await;
    let tag = tag();
    let first = user(&db, format!("Case{tag}@Example.com")).await;

    let err = user_repo::insert(
        &db,
        &NewUser {
            name: "Second Signup".into(),
            email: format!("case{tag}@example.com"),
            password: "hash".into(),
        },
    )
    .await
    .expect_err("duplicate email accepted");
    assert!(matches!(AppError::from(err), AppError::Conflict(_)));

    let found = user_repo::find_by_email(&db, &format!("CASE{tag}@EXAMPLE.COM"))
        .await
        .expect("by email");
    assert_eq!(found.map(|u| u.id), Some(first.id));
}
