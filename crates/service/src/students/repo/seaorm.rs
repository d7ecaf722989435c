use sea_orm::{DatabaseConnection, DatabaseTransaction, EntityTrait, TransactionTrait};
use tracing::{error, warn};

use crate::errors::ServiceError;
use crate::students::domain::{SearchFilters, Student, ValidStudent};
use crate::students::repository::StudentRepository;
use models::student;

/// SeaORM-backed repository implementation.
///
/// Create and update run their single statement inside a transaction that is
/// rolled back on any error. Reads and delete use the pool directly.
#[derive(Clone)]
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Commit on success; roll back and surface the original error otherwise.
async fn finish<T>(
    txn: DatabaseTransaction,
    result: Result<T, models::errors::ModelError>,
    op: &'static str,
) -> Result<T, ServiceError> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            error!(op, err = %e, "write failed, rolling back");
            if let Err(rb) = txn.rollback().await {
                warn!(op, err = %rb, "rollback failed");
            }
            Err(e.into())
        }
    }
}

#[async_trait::async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, ServiceError> {
        Ok(student::Entity::find().all(&self.db).await?)
    }

    async fn create(&self, input: &ValidStudent) -> Result<Student, ServiceError> {
        let txn = self.db.begin().await?;
        let res = student::create(&txn, input).await;
        finish(txn, res, "create").await
    }

    async fn get(&self, id: i32) -> Result<Option<Student>, ServiceError> {
        Ok(student::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn update(&self, id: i32, input: &ValidStudent) -> Result<Option<Student>, ServiceError> {
        let Some(existing) = student::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let txn = self.db.begin().await?;
        let res = student::overwrite(&txn, existing, input).await;
        finish(txn, res, "update").await.map(Some)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = student::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Student>, ServiceError> {
        Ok(student::search(&self.db, filters).await?)
    }
}
