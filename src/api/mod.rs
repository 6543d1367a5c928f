pub mod properties;
pub mod users;

use axum::{Extension, Router, routing::get};
use serde::Deserialize;

use crate::SharedState;

/// `?limit=` carried by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route(
            "/api/properties",
            get(properties::search_properties).post(properties::create_property),
        )
        .route("/api/users", get(users::find_user).post(users::create_user))
        .route("/api/users/{id}", get(users::get_user))
        .route("/api/users/{id}/reservations", get(users::list_reservations))
        .layer(Extension(state))
}
