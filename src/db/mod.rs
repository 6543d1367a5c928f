pub mod property_repo;
pub mod reservation_repo;
pub mod user_repo;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub type Db = PgPool;

pub async fn init_db(url: &str, max_connections: u32) -> anyhow::Result<Db> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}
