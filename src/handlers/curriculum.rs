//! Curriculum handlers. Listing resolves faculty, major and book references.

use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::model::{Curriculum, NewCurriculum};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize)]
pub struct CurriculumView {
    #[serde(flatten)]
    pub curriculum: Curriculum,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_path: Option<String>,
}

pub async fn list_curriculums(State(state): State<AppState>) -> Result<Json<Vec<CurriculumView>>, AppError> {
    let curriculums = state.curriculums.list().await?;
    let faculties: HashMap<String, String> = state
        .faculties
        .list()
        .await?
        .into_iter()
        .map(|f| (f.faculty_id, f.faculty_name))
        .collect();
    let majors: HashMap<String, String> = state
        .majors
        .list()
        .await?
        .into_iter()
        .map(|m| (m.major_id, m.major_name))
        .collect();
    let books: HashMap<i64, String> = state
        .books
        .list()
        .await?
        .into_iter()
        .map(|b| (b.id, b.public_path))
        .collect();

    let views = curriculums
        .into_iter()
        .map(|c| CurriculumView {
            faculty_name: faculties.get(&c.faculty_id).cloned(),
            major_name: c.major_id.as_ref().and_then(|id| majors.get(id)).cloned(),
            book_path: c.book_id.and_then(|id| books.get(&id)).cloned(),
            curriculum: c,
        })
        .collect();
    Ok(Json(views))
}

pub async fn create_curriculum(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewCurriculum>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.curriculums.create(Curriculum::try_from(body)?).await?;
    tracing::info!(curriculum_id = %row.curriculum_id, "curriculum created");
    Ok(Json(row))
}
