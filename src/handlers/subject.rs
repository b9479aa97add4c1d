//! Subject CRUD handlers.

use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::model::{NewSubject, StudyTime, Subject, SubjectPatch};
use crate::response::{message, numbered};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::collections::HashMap;

/// Subject with its major's display name and its study times attached.
#[derive(Serialize)]
pub struct SubjectDetail {
    #[serde(flatten)]
    pub subject: Subject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_name: Option<String>,
    /// Read-only here; edited through the study-time routes.
    pub study_times: Vec<StudyTime>,
}

pub async fn create_subject(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewSubject>,
) -> Result<impl IntoResponse, AppError> {
    let subject = Subject::try_from(body)?;
    let row = state.subjects.create(subject).await?;
    tracing::info!(subject_id = %row.subject_id, "subject created");
    Ok(Json(serde_json::json!({
        "message": "Create subject success",
        "subject_id": row.subject_id,
        "subject_name": row.subject_name,
    })))
}

pub async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubjectDetail>, AppError> {
    let subject = state.subjects.get(&id).await?;
    let major_name = state.majors.find(&subject.major_id).await?.map(|m| m.major_name);
    let study_times = state
        .study_times
        .list_by("subject_id", subject.subject_id.clone().into())
        .await?;
    Ok(Json(SubjectDetail {
        subject,
        major_name,
        study_times,
    }))
}

pub async fn list_subjects(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let subjects = state.subjects.list().await?;
    let major_names: HashMap<String, String> = state
        .majors
        .list()
        .await?
        .into_iter()
        .map(|m| (m.major_id, m.major_name))
        .collect();
    let mut times_by_subject: HashMap<String, Vec<StudyTime>> = HashMap::new();
    for t in state.study_times.list().await? {
        times_by_subject.entry(t.subject_id.clone()).or_default().push(t);
    }

    let rows = subjects.into_iter().map(|subject| SubjectDetail {
        major_name: major_names.get(&subject.major_id).cloned(),
        study_times: times_by_subject.remove(&subject.subject_id).unwrap_or_default(),
        subject,
    });
    Ok(Json(numbered(rows)))
}

pub async fn update_subject(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<SubjectPatch>,
) -> Result<Json<Subject>, AppError> {
    let row = state
        .subjects
        .update(&id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("subject '{}'", id)))?;
    tracing::info!(subject_id = %row.subject_id, "subject updated");
    Ok(Json(row))
}

/// No existence check: deleting an unknown id still reports success.
pub async fn delete_subject(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.subjects.delete(&id).await?;
    tracing::info!(subject_id = %id, deleted, "subject delete");
    Ok(message("Delete subject success"))
}
