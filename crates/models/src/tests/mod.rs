use anyhow::Result;
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::{connect_with_config, migrate};



/// Fresh, migrated SQLite database in a throwaway file.
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    let dir = std::env::temp_dir().join("student-records-tests");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(format!("models-{}.db", Uuid::new_v4()));
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        min_connections: 1,
        max_connections: 4,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    migrate(&db).await?;
    Ok(db)
}
