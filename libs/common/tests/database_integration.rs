//! Integration tests for the database helpers
//!
//! These tests need a reachable PostgreSQL instance named by
//! `DATABASE_DSN`; run them with `cargo test -- --ignored`.

use common::{
    database::{DatabaseConfig, close_pool, health_check, init_pool, with_timeout},
    error::DatabaseError,
};
use sqlx::Row;
use std::time::Duration;

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_DSN"]
async fn test_pool_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;

    health_check(&pool, config.request_timeout()).await?;

    let row = with_timeout(
        config.request_timeout(),
        sqlx::query("SELECT 1 AS result").fetch_one(&pool),
    )
    .await?;
    let result: i32 = row.get("result");
    assert_eq!(result, 1, "PostgreSQL simple query test failed");

    assert!(close_pool(&pool, config.shutdown_timeout()).await);
    assert!(pool.is_closed());

    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_DSN"]
async fn test_query_deadline_is_enforced() -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;

    let err = with_timeout(
        Duration::from_millis(100),
        sqlx::query("SELECT pg_sleep(2)").execute(&pool),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DatabaseError::Timeout(_)));

    let err = with_timeout(
        config.request_timeout(),
        sqlx::query("SELECT 1 WHERE false").fetch_one(&pool),
    )
    .await
    .unwrap_err();
    assert!(err.is_no_rows());

    close_pool(&pool, config.shutdown_timeout()).await;
    Ok(())
}
