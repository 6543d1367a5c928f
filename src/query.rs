//! Parameterized SQL text with positionally numbered bind values.
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

/// A value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// SQL text plus the values for its placeholders, in placeholder order.
///
/// The only way to add a placeholder is [`QueryPlan::push_bind`], which
/// numbers it after the values already recorded, so `$n` always refers to
/// `params()[n - 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    sql: String,
    params: Vec<SqlValue>,
}

impl QueryPlan {
    pub fn new(base: &str) -> Self {
        Self {
            sql: base.to_string(),
            params: Vec::new(),
        }
    }

    /// Append static SQL. Never pass caller-supplied text here.
    pub fn push(&mut self, fragment: &str) -> &mut Self {
        self.sql.push_str(fragment);
        self
    }

    /// Append the next placeholder and record its value.
    pub fn push_bind(&mut self, value: SqlValue) -> &mut Self {
        self.params.push(value);
        self.sql.push('$');
        self.sql.push_str(&self.params.len().to_string());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Number of `$n` markers in the text.
    pub fn placeholder_count(&self) -> usize {
        let bytes = self.sql.as_bytes();
        bytes
            .iter()
            .enumerate()
            .filter(|&(i, &b)| b == b'$' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
            .count()
    }
}

/// Build a `query_as` for `plan` with every parameter bound in order.
pub fn bind_query_as<'q, T>(plan: &'q QueryPlan) -> QueryAs<'q, Postgres, T, PgArguments>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    plan.params()
        .iter()
        .fold(sqlx::query_as::<_, T>(plan.sql()), |query, value| match value {
            SqlValue::Text(text) => query.bind(text.as_str()),
            SqlValue::Integer(n) => query.bind(*n),
            SqlValue::Float(x) => query.bind(*x),
        })
}
