use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::models::category::DEFAULT_CATEGORIES;

pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Insert the default categories into an empty `categories` table.
pub async fn seed_categories(pool: &PgPool) -> Result<(), sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        log::info!("Categories already seeded ({count}), skipping");
        return Ok(());
    }

    for name in DEFAULT_CATEGORIES {
        sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }
    log::info!("Seeded {} categories", DEFAULT_CATEGORIES.len());
    Ok(())
}
