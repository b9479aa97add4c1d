//! Study times nested under a subject: /subjects/:id/times[/:time_id].

use super::parse_id;
use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::model::{NewStudyTime, StudyTime, StudyTimePatch};
use crate::response::message;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// A study time addressed through another subject's path does not exist there.
async fn owned_study_time(state: &AppState, subject_id: &str, time_id: i64) -> Result<StudyTime, AppError> {
    match state.study_times.find(&time_id).await? {
        Some(t) if t.subject_id == subject_id => Ok(t),
        _ => Err(AppError::NotFound(format!("study time '{}'", time_id))),
    }
}

pub async fn list_study_times(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
) -> Result<Json<Vec<StudyTime>>, AppError> {
    state.subjects.get(&subject_id).await?;
    let times = state.study_times.list_by("subject_id", subject_id.into()).await?;
    Ok(Json(times))
}

pub async fn get_study_time(
    State(state): State<AppState>,
    Path((subject_id, time_id)): Path<(String, String)>,
) -> Result<Json<StudyTime>, AppError> {
    let time_id = parse_id(&time_id)?;
    Ok(Json(owned_study_time(&state, &subject_id, time_id).await?))
}

pub async fn create_study_time(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
    ApiJson(body): ApiJson<NewStudyTime>,
) -> Result<impl IntoResponse, AppError> {
    let subject = state.subjects.get(&subject_id).await?;
    let time = body.for_subject(subject.subject_id)?;
    let row = state.study_times.create(time).await?;
    tracing::info!(subject_id = %row.subject_id, id = row.id, "study time created");
    Ok(Json(row))
}

pub async fn update_study_time(
    State(state): State<AppState>,
    Path((subject_id, time_id)): Path<(String, String)>,
    ApiJson(patch): ApiJson<StudyTimePatch>,
) -> Result<Json<StudyTime>, AppError> {
    let time_id = parse_id(&time_id)?;
    owned_study_time(&state, &subject_id, time_id).await?;
    let row = state
        .study_times
        .update(&time_id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("study time '{}'", time_id)))?;
    Ok(Json(row))
}

pub async fn delete_study_time(
    State(state): State<AppState>,
    Path((subject_id, time_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let time_id = parse_id(&time_id)?;
    owned_study_time(&state, &subject_id, time_id).await?;
    state.study_times.delete(&time_id).await?;
    Ok(message("Delete study time success"))
}
