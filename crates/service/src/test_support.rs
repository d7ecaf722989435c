#![cfg(test)]
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;
use uuid::Uuid;
use models::db::{connect_with_config, migrate};

/// Fresh, migrated SQLite database per test so tests never share rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let dir = std::env::temp_dir().join("student-records-tests");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(format!("service-{}.db", Uuid::new_v4()));

    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        min_connections: 1,
        max_connections: 4,
        acquire_timeout_secs: 10,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    migrate(&db).await?;
    Ok(db)
}
