use async_trait::async_trait;

use super::domain::{SearchFilters, Student, ValidStudent};
use crate::errors::ServiceError;

/// Repository abstraction for student persistence.
///
/// Writes receive only validated field sets. `update` returns `None` when the
/// id has no row; `delete` returns whether a row was removed.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Student>, ServiceError>;
    async fn create(&self, input: &ValidStudent) -> Result<Student, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Student>, ServiceError>;
    async fn update(&self, id: i32, input: &ValidStudent) -> Result<Option<Student>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Student>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, MutexGuard};

    use chrono::Utc;

    #[derive(Default)]
    struct Table {
        rows: BTreeMap<i32, Student>, // key: id, iteration order is ascending id
        last_id: i32,
    }

    #[derive(Default)]
    pub struct MockStudentRepository {
        table: Mutex<Table>,
        fail_writes: AtomicBool,
    }

    impl MockStudentRepository {
        /// Make every subsequent create/update fail as a storage error would.
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        fn table(&self) -> Result<MutexGuard<'_, Table>, ServiceError> {
            self.table.lock().map_err(|e| ServiceError::Db(e.to_string()))
        }

        fn check_writable(&self) -> Result<(), ServiceError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("simulated write failure".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl StudentRepository for MockStudentRepository {
        async fn list(&self) -> Result<Vec<Student>, ServiceError> {
            Ok(self.table()?.rows.values().cloned().collect())
        }

        async fn create(&self, input: &ValidStudent) -> Result<Student, ServiceError> {
            self.check_writable()?;
            let mut table = self.table()?;
            table.last_id += 1;
            let now = Utc::now().into();
            let student = Student {
                id: table.last_id,
                name: input.name.clone(),
                course: input.course.clone(),
                email: input.email.clone(),
                phone: input.phone.clone(),
                created_at: now,
                updated_at: now,
            };
            table.rows.insert(student.id, student.clone());
            Ok(student)
        }

        async fn get(&self, id: i32) -> Result<Option<Student>, ServiceError> {
            Ok(self.table()?.rows.get(&id).cloned())
        }

        async fn update(&self, id: i32, input: &ValidStudent) -> Result<Option<Student>, ServiceError> {
            let mut table = self.table()?;
            let Some(row) = table.rows.get_mut(&id) else { return Ok(None) };
            self.check_writable()?;
            row.name = input.name.clone();
            row.course = input.course.clone();
            row.email = input.email.clone();
            row.phone = input.phone.clone();
            row.updated_at = Utc::now().into();
            Ok(Some(row.clone()))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.table()?.rows.remove(&id).is_some())
        }

        async fn search(&self, filters: &SearchFilters) -> Result<Vec<Student>, ServiceError> {
            Ok(self
                .table()?
                .rows
                .values()
                .filter(|s| filters.matches(s))
                .cloned()
                .collect())
        }
    }
}
