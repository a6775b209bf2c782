use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::{PgPool, postgres::PgPoolOptions};

pub async fn connect_database(database_url: &str) -> Result<PgPool> {
    let max_connections = match std::env::var("DB_MAX_CONNECTIONS") {
        Ok(raw) => raw
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be an integer")?,
        Err(_) => 10,
    };

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    Ok(pool)
}
