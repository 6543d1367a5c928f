//! Property search: turns sparse form criteria into a parameterized query.
use serde::Deserialize;

use crate::query::{QueryPlan, SqlValue};

const BASE_QUERY: &str = "\
SELECT properties.*, avg(property_reviews.rating)::float8 AS average_rating
FROM properties
LEFT JOIN property_reviews ON properties.id = property_reviews.property_id";

/// Raw search form values. Every field is optional; empty strings count as
/// absent, anything else must parse or the search is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCriteria {
    pub city: Option<String>,
    pub owner_id: Option<String>,
    pub minimum_price_per_night: Option<String>,
    pub maximum_price_per_night: Option<String>,
    pub minimum_rating: Option<String>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("invalid value {value:?} for {field}")]
    InvalidCriteria { field: &'static str, value: String },
    #[error("limit must be a positive integer, got {0:?}")]
    InvalidLimit(String),
}

/// Build the property search query for `criteria`, capped at `limit` rows.
///
/// Clauses are emitted in a fixed order (city, owner, price range, group,
/// rating, order, limit) and each bound value takes the next `$n`, so the
/// same input always yields the same plan.
pub fn build_property_search(
    criteria: &SearchCriteria,
    limit: i64,
) -> Result<QueryPlan, SearchError> {
    if limit < 1 {
        return Err(SearchError::InvalidLimit(limit.to_string()));
    }

    let city = present(&criteria.city);
    let owner_id = present(&criteria.owner_id)
        .map(|raw| parse_integer("owner_id", raw))
        .transpose()?;
    let min_price = present(&criteria.minimum_price_per_night)
        .map(|raw| parse_minor_units("minimum_price_per_night", raw))
        .transpose()?;
    let max_price = present(&criteria.maximum_price_per_night)
        .map(|raw| parse_minor_units("maximum_price_per_night", raw))
        .transpose()?;
    let min_rating = present(&criteria.minimum_rating)
        .map(|raw| parse_number("minimum_rating", raw))
        .transpose()?;

    let mut plan = QueryPlan::new(BASE_QUERY);
    let mut filters = Filters::default();

    if let Some(city) = city {
        filters.next(&mut plan);
        plan.push("city ILIKE ")
            .push_bind(SqlValue::Text(format!("%{city}%")));
    }

    if let Some(owner_id) = owner_id {
        filters.next(&mut plan);
        plan.push("owner_id = ").push_bind(SqlValue::Integer(owner_id));
    }

    // Only a complete range filters on price.
    if let (Some(min), Some(max)) = (min_price, max_price) {
        filters.next(&mut plan);
        plan.push("cost_per_night >= ")
            .push_bind(SqlValue::Integer(min));
        filters.next(&mut plan);
        plan.push("cost_per_night <= ")
            .push_bind(SqlValue::Integer(max));
    }

    plan.push("\nGROUP BY properties.id");

    if let Some(rating) = min_rating {
        plan.push("\nHAVING avg(property_reviews.rating) >= ")
            .push_bind(SqlValue::Float(rating));
    }

    plan.push("\nORDER BY cost_per_night ASC\nLIMIT ")
        .push_bind(SqlValue::Integer(limit));

    Ok(plan)
}

/// Parse a raw `limit` form value, falling back to `default` when absent.
pub fn parse_limit(raw: Option<&str>, default: i64) -> Result<i64, SearchError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default);
    };
    match raw.parse::<i64>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(SearchError::InvalidLimit(raw.to_string())),
    }
}

/// Tracks whether the WHERE keyword has been written yet.
#[derive(Default)]
struct Filters {
    any: bool,
}

impl Filters {
    fn next(&mut self, plan: &mut QueryPlan) {
        plan.push(if self.any { "\n  AND " } else { "\nWHERE " });
        self.any = true;
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn invalid(field: &'static str, raw: &str) -> SearchError {
    SearchError::InvalidCriteria {
        field,
        value: raw.to_string(),
    }
}

fn parse_integer(field: &'static str, raw: &str) -> Result<i64, SearchError> {
    raw.parse::<i64>().map_err(|_| invalid(field, raw))
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, SearchError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(invalid(field, raw)),
    }
}

/// Major currency units to cents, rounded to the nearest cent.
fn parse_minor_units(field: &'static str, raw: &str) -> Result<i64, SearchError> {
    let cents = (parse_number(field, raw)? * 100.0).round();
    if cents.abs() >= i64::MAX as f64 {
        return Err(invalid(field, raw));
    }
    Ok(cents as i64)
}
