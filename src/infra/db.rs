use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::infra::error::InfraError;

pub async fn init_db(database_url: &str) -> Result<PgPool, InfraError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(InfraError::DatabaseConnection)?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(InfraError::Migration)?;

    info!("Connected to database!");
    Ok(pool)
}
