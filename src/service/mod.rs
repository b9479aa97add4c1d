//! Persistence seam: the `Repository` trait handlers depend on, and its PostgreSQL implementation.

mod crud;
mod validation;
pub use crud::PgStore;
pub use validation::RequestValidator;

use crate::error::AppError;
use crate::model::{
    Admin, Book, Curriculum, Degree, Entity, Faculty, Gender, Major, Position, Status, Student, StudyTime,
    Subject, Teacher,
};
use crate::sql::SqlValue;
use async_trait::async_trait;

/// CRUD over one entity type. Implementations own transactions; callers never see them.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn create(&self, row: E) -> Result<E, AppError>;

    async fn find(&self, key: &E::Key) -> Result<Option<E>, AppError>;

    async fn list(&self) -> Result<Vec<E>, AppError>;

    /// Rows whose `column` equals `value`, e.g. study times of one subject.
    async fn list_by(&self, column: &'static str, value: SqlValue) -> Result<Vec<E>, AppError>;

    /// Lock, merge the patch, check, write; all in one transaction. `None` when absent.
    async fn update(&self, key: &E::Key, patch: E::Patch) -> Result<Option<E>, AppError>;

    /// Removes cascade dependents then the row, in one transaction. Returns rows deleted from the entity's table.
    async fn delete(&self, key: &E::Key) -> Result<u64, AppError>;

    async fn get(&self, key: &E::Key) -> Result<E, AppError> {
        self.find(key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} '{}'", E::NAME, key)))
    }
}

/// Liveness of the backing store.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
}

/// Everything the router needs from a store.
pub trait Store:
    HealthCheck
    + Repository<Subject>
    + Repository<StudyTime>
    + Repository<Major>
    + Repository<Faculty>
    + Repository<Degree>
    + Repository<Position>
    + Repository<Status>
    + Repository<Gender>
    + Repository<Student>
    + Repository<Teacher>
    + Repository<Curriculum>
    + Repository<Book>
    + Repository<Admin>
    + 'static
{
}

impl<T> Store for T where
    T: HealthCheck
        + Repository<Subject>
        + Repository<StudyTime>
        + Repository<Major>
        + Repository<Faculty>
        + Repository<Degree>
        + Repository<Position>
        + Repository<Status>
        + Repository<Gender>
        + Repository<Student>
        + Repository<Teacher>
        + Repository<Curriculum>
        + Repository<Book>
        + Repository<Admin>
        + 'static
{
}
