//! Lookup families: list and create only. Genders and admins are read-only.

use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::model::{
    Admin, Degree, Faculty, Gender, Major, NewDegree, NewFaculty, NewMajor, NewPosition, NewStatus, Position,
    Status,
};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

pub async fn list_majors(State(state): State<AppState>) -> Result<Json<Vec<Major>>, AppError> {
    Ok(Json(state.majors.list().await?))
}

pub async fn create_major(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewMajor>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.majors.create(Major::try_from(body)?).await?;
    tracing::info!(major_id = %row.major_id, "major created");
    Ok(Json(row))
}

pub async fn list_faculties(State(state): State<AppState>) -> Result<Json<Vec<Faculty>>, AppError> {
    Ok(Json(state.faculties.list().await?))
}

pub async fn create_faculty(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewFaculty>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.faculties.create(Faculty::try_from(body)?).await?;
    tracing::info!(faculty_id = %row.faculty_id, "faculty created");
    Ok(Json(row))
}

pub async fn list_degrees(State(state): State<AppState>) -> Result<Json<Vec<Degree>>, AppError> {
    Ok(Json(state.degrees.list().await?))
}

pub async fn create_degree(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewDegree>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.degrees.create(Degree::try_from(body)?).await?))
}

pub async fn list_positions(State(state): State<AppState>) -> Result<Json<Vec<Position>>, AppError> {
    Ok(Json(state.positions.list().await?))
}

pub async fn create_position(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewPosition>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.positions.create(Position::try_from(body)?).await?))
}

pub async fn list_statuses(State(state): State<AppState>) -> Result<Json<Vec<Status>>, AppError> {
    Ok(Json(state.statuses.list().await?))
}

pub async fn create_status(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewStatus>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.statuses.create(Status::try_from(body)?).await?))
}

pub async fn list_genders(State(state): State<AppState>) -> Result<Json<Vec<Gender>>, AppError> {
    Ok(Json(state.genders.list().await?))
}

pub async fn get_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Admin>, AppError> {
    Ok(Json(state.admins.get(&id).await?))
}
