//! User lookup, signup and per-guest reservation endpoints.
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;

use super::LimitQuery;
use crate::SharedState;
use crate::db::reservation_repo::{self, GuestReservation};
use crate::db::user_repo::{self, NewUser, User};
use crate::error::AppError;
use crate::password::hash_password;
use crate::search::parse_limit;
use crate::validation::{validate_email, validate_name, validate_password};

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

// POST /api/users
pub async fn create_user(
    Extension(state): Extension<SharedState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    validate_name(&req.name)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    if user_repo::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(AppError::conflict("email already registered"));
    }

    let new_user = NewUser {
        name: req.name.trim().to_string(),
        email: req.email,
        password: hash_password(&req.password)?,
    };
    let user = user_repo::insert(&state.db, &new_user).await?;
    tracing::info!(id = user.id, "user created");

    Ok((StatusCode::CREATED, Json(user)))
}

// GET /api/users/{id}
pub async fn get_user(
    Extension(state): Extension<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let user = user_repo::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(user))
}

#[derive(Deserialize)]
pub struct FindUserQuery {
    pub email: Option<String>,
}

// GET /api/users?email=
pub async fn find_user(
    Extension(state): Extension<SharedState>,
    Query(params): Query<FindUserQuery>,
) -> Result<Json<User>, AppError> {
    let Some(email) = params.email.filter(|e| !e.trim().is_empty()) else {
        return Err(AppError::bad_request("missing 'email' parameter"));
    };

    let user = user_repo::find_by_email(&state.db, email.trim())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(user))
}

// GET /api/users/{id}/reservations
pub async fn list_reservations(
    Extension(state): Extension<SharedState>,
    Path(guest_id): Path<i64>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Vec<GuestReservation>>, AppError> {
    let limit = parse_limit(params.limit.as_deref(), state.config.default_limit)?;
    let reservations = reservation_repo::list_for_guest(&state.db, guest_id, limit).await?;
    Ok(Json(reservations))
}
