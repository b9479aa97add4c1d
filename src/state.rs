//! Shared application state for all routes. The store is injected, never global.

use crate::model::{
    Admin, Book, Curriculum, Degree, Faculty, Gender, Major, Position, Status, Student, StudyTime, Subject,
    Teacher,
};
use crate::service::{HealthCheck, Repository, Store};
use crate::storage::BookStorage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<dyn HealthCheck>,
    pub subjects: Arc<dyn Repository<Subject>>,
    pub study_times: Arc<dyn Repository<StudyTime>>,
    pub majors: Arc<dyn Repository<Major>>,
    pub faculties: Arc<dyn Repository<Faculty>>,
    pub degrees: Arc<dyn Repository<Degree>>,
    pub positions: Arc<dyn Repository<Position>>,
    pub statuses: Arc<dyn Repository<Status>>,
    pub genders: Arc<dyn Repository<Gender>>,
    pub students: Arc<dyn Repository<Student>>,
    pub teachers: Arc<dyn Repository<Teacher>>,
    pub curriculums: Arc<dyn Repository<Curriculum>>,
    pub books: Arc<dyn Repository<Book>>,
    pub admins: Arc<dyn Repository<Admin>>,
    pub book_files: Arc<BookStorage>,
}

impl AppState {
    pub fn new<S: Store>(store: Arc<S>, book_files: BookStorage) -> Self {
        AppState {
            health: store.clone(),
            subjects: store.clone(),
            study_times: store.clone(),
            majors: store.clone(),
            faculties: store.clone(),
            degrees: store.clone(),
            positions: store.clone(),
            statuses: store.clone(),
            genders: store.clone(),
            students: store.clone(),
            teachers: store.clone(),
            curriculums: store.clone(),
            books: store.clone(),
            admins: store,
            book_files: Arc::new(book_files),
        }
    }
}
