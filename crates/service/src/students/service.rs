use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{SearchFilters, Student, StudentId, StudentInput};
use super::repository::StudentRepository;
use crate::errors::{Missing, ServiceError};

/// Student record operations, independent of web framework.
///
/// Every operation is stateless; the repository handle is the only shared
/// resource.
pub struct StudentService<R: StudentRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: StudentRepository + ?Sized> Clone for StudentService<R> {
    fn clone(&self) -> Self {
        Self { repo: Arc::clone(&self.repo) }
    }
}

impl<R: StudentRepository + ?Sized> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// All rows, unordered. An empty table is reported as not found.
    pub async fn list(&self) -> Result<Vec<Student>, ServiceError> {
        let rows = self.repo.list().await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound(Missing::NoRecords));
        }
        info!(count = rows.len(), "students_listed");
        Ok(rows)
    }

    /// Validate then insert.
    ///
    /// # Examples
    /// ```
    /// use service::students::{service::StudentService, repository::mock::MockStudentRepository};
    /// use service::students::domain::StudentInput;
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(MockStudentRepository::default()));
    /// let input = StudentInput::new("Ann Lee", "Math", "ann@x.com", "1234567890");
    /// let created = tokio_test::block_on(svc.create(&input)).unwrap();
    /// assert_eq!(created.email, "ann@x.com");
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &StudentInput) -> Result<Student, ServiceError> {
        let valid = input.validate().map_err(ServiceError::Validation)?;
        let created = self.repo.create(&valid).await?;
        info!(id = created.id, "student_created");
        Ok(created)
    }

    #[instrument(skip(self, id))]
    pub async fn get(&self, id: impl Into<StudentId>) -> Result<Student, ServiceError> {
        let Some(id) = id.into().get() else {
            return Err(ServiceError::NotFound(Missing::Id));
        };
        self.repo.get(id).await?.ok_or(ServiceError::NotFound(Missing::Id))
    }

    /// Validation runs before the id is looked up, so invalid input on an
    /// unknown id reports the validation errors.
    #[instrument(skip(self, id, input))]
    pub async fn update(&self, id: impl Into<StudentId>, input: &StudentInput) -> Result<Student, ServiceError> {
        let valid = input.validate().map_err(ServiceError::Validation)?;
        let Some(id) = id.into().get() else {
            return Err(ServiceError::NotFound(Missing::Id));
        };
        let updated = self
            .repo
            .update(id, &valid)
            .await?
            .ok_or(ServiceError::NotFound(Missing::Id))?;
        info!(id, "student_updated");
        Ok(updated)
    }

    #[instrument(skip(self, id))]
    pub async fn delete(&self, id: impl Into<StudentId>) -> Result<(), ServiceError> {
        let Some(id) = id.into().get() else {
            return Err(ServiceError::NotFound(Missing::Id));
        };
        if !self.repo.delete(id).await? {
            return Err(ServiceError::NotFound(Missing::Id));
        }
        info!(id, "student_deleted");
        Ok(())
    }

    /// Rows matching every provided filter, ascending by id.
    #[instrument(skip(self))]
    pub async fn search(&self, filters: &SearchFilters) -> Result<Vec<Student>, ServiceError> {
        let rows = self.repo.search(filters).await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound(Missing::Matches));
        }
        Ok(rows)
    }
}
