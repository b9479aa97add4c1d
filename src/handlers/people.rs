//! Student and teacher CRUD handlers.

use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::model::{NewStudent, NewTeacher, Student, StudentPatch, Teacher, TeacherPatch};
use crate::response::{message, numbered};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::collections::HashMap;

/// A person row with faculty and major display names resolved.
#[derive(Serialize)]
pub struct WithAffiliation<T> {
    #[serde(flatten)]
    pub row: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_name: Option<String>,
}

/// Faculty and major names, loaded once per list request.
struct Affiliations {
    faculties: HashMap<String, String>,
    majors: HashMap<String, String>,
}

impl Affiliations {
    async fn load(state: &AppState) -> Result<Self, AppError> {
        let faculties = state
            .faculties
            .list()
            .await?
            .into_iter()
            .map(|f| (f.faculty_id, f.faculty_name))
            .collect();
        let majors = state
            .majors
            .list()
            .await?
            .into_iter()
            .map(|m| (m.major_id, m.major_name))
            .collect();
        Ok(Affiliations { faculties, majors })
    }

    fn attach<T>(&self, row: T, faculty_id: Option<&String>, major_id: Option<&String>) -> WithAffiliation<T> {
        WithAffiliation {
            faculty_name: faculty_id.and_then(|id| self.faculties.get(id)).cloned(),
            major_name: major_id.and_then(|id| self.majors.get(id)).cloned(),
            row,
        }
    }
}

async fn affiliation_of<T>(
    state: &AppState,
    row: T,
    faculty_id: Option<String>,
    major_id: Option<String>,
) -> Result<WithAffiliation<T>, AppError> {
    let faculty_name = match faculty_id {
        Some(id) => state.faculties.find(&id).await?.map(|f| f.faculty_name),
        None => None,
    };
    let major_name = match major_id {
        Some(id) => state.majors.find(&id).await?.map(|m| m.major_name),
        None => None,
    };
    Ok(WithAffiliation {
        row,
        faculty_name,
        major_name,
    })
}

pub async fn create_student(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewStudent>,
) -> Result<impl IntoResponse, AppError> {
    let student = Student::try_from(body)?;
    let row = state.students.create(student).await?;
    tracing::info!(student_id = %row.student_id, "student created");
    Ok(Json(row))
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.students.get(&id).await?;
    let (faculty_id, major_id) = (row.faculty_id.clone(), row.major_id.clone());
    Ok(Json(affiliation_of(&state, row, faculty_id, major_id).await?))
}

pub async fn list_students(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let students = state.students.list().await?;
    let names = Affiliations::load(&state).await?;
    let rows = students.into_iter().map(|s| {
        let (faculty_id, major_id) = (s.faculty_id.clone(), s.major_id.clone());
        names.attach(s, faculty_id.as_ref(), major_id.as_ref())
    });
    Ok(Json(numbered(rows)))
}

pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<StudentPatch>,
) -> Result<Json<Student>, AppError> {
    let row = state
        .students
        .update(&id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student '{}'", id)))?;
    Ok(Json(row))
}

pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.students.delete(&id).await?;
    tracing::info!(student_id = %id, deleted, "student delete");
    Ok(message("Delete student success"))
}

pub async fn create_teacher(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewTeacher>,
) -> Result<impl IntoResponse, AppError> {
    let teacher = Teacher::try_from(body)?;
    let row = state.teachers.create(teacher).await?;
    tracing::info!(teacher_id = %row.teacher_id, "teacher created");
    Ok(Json(row))
}

pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.teachers.get(&id).await?;
    let (faculty_id, major_id) = (row.faculty_id.clone(), row.major_id.clone());
    Ok(Json(affiliation_of(&state, row, faculty_id, major_id).await?))
}

pub async fn list_teachers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let teachers = state.teachers.list().await?;
    let names = Affiliations::load(&state).await?;
    let rows = teachers.into_iter().map(|t| {
        let (faculty_id, major_id) = (t.faculty_id.clone(), t.major_id.clone());
        names.attach(t, faculty_id.as_ref(), major_id.as_ref())
    });
    Ok(Json(numbered(rows)))
}

pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<TeacherPatch>,
) -> Result<Json<Teacher>, AppError> {
    let row = state
        .teachers
        .update(&id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("teacher '{}'", id)))?;
    Ok(Json(row))
}

pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.teachers.delete(&id).await?;
    tracing::info!(teacher_id = %id, deleted, "teacher delete");
    Ok(message("Delete teacher success"))
}
