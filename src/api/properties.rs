//! Property listing endpoints.
use axum::{Extension, Json, extract::Query, http::StatusCode};

use super::LimitQuery;
use crate::SharedState;
use crate::db::property_repo::{self, NewProperty, Property, PropertyResult};
use crate::error::AppError;
use crate::search::{SearchCriteria, parse_limit};
use crate::validation::validate_new_property;

// GET /api/properties
pub async fn search_properties(
    Extension(state): Extension<SharedState>,
    Query(criteria): Query<SearchCriteria>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Vec<PropertyResult>>, AppError> {
    let limit = parse_limit(params.limit.as_deref(), state.config.default_limit)?;
    let properties = property_repo::search(&state.db, &criteria, limit).await?;
    Ok(Json(properties))
}

// POST /api/properties
pub async fn create_property(
    Extension(state): Extension<SharedState>,
    Json(req): Json<NewProperty>,
) -> Result<(StatusCode, Json<Property>), AppError> {
    validate_new_property(&req)?;
    let property = property_repo::insert(&state.db, &req).await?;
    tracing::info!(id = property.id, owner_id = property.owner_id, "property created");
    Ok((StatusCode::CREATED, Json(property)))
}
