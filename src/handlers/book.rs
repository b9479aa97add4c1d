//! Curriculum book upload, listing and download.

use crate::error::AppError;
use crate::model::Book;
use crate::state::AppState;
use crate::storage::is_safe_file_name;
use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

/// Multipart field the upload form uses for the document.
pub const BOOK_FIELD: &str = "currBook";

const DEFAULT_MIME: &str = "application/octet-stream";

struct Upload {
    original_name: String,
    mime_type: String,
    data: axum::body::Bytes,
}

/// POST /books, /books/upload: multipart with the file in `currBook` (any file field as fallback) and optional `note`.
pub async fn upload_book(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut upload: Option<Upload> = None;
    let mut note: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "note" {
            note = Some(field.text().await.map_err(|e| AppError::BadRequest(e.body_text()))?);
            continue;
        }
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if upload.is_some() && name != BOOK_FIELD {
            continue;
        }
        let mime_type = field.content_type().unwrap_or(DEFAULT_MIME).to_string();
        let data = field.bytes().await.map_err(|e| AppError::BadRequest(e.body_text()))?;
        upload = Some(Upload {
            original_name,
            mime_type,
            data,
        });
    }

    let upload = upload.ok_or_else(|| AppError::BadRequest(format!("{} file is required", BOOK_FIELD)))?;
    let stored = state.book_files.save(&upload.original_name, &upload.data).await?;
    let book = Book {
        id: 0,
        original_name: upload.original_name,
        public_path: format!("/books/{}", stored.stored_name),
        stored_name: stored.stored_name.clone(),
        path: stored.path,
        mime_type: upload.mime_type,
        size: upload.data.len() as i64,
        checksum: stored.checksum,
        note: note.filter(|n| !n.trim().is_empty()),
    };
    let row = match state.books.create(book).await {
        Ok(row) => row,
        Err(e) => {
            state.book_files.remove(&stored.stored_name).await;
            return Err(e);
        }
    };
    tracing::info!(id = row.id, stored_name = %row.stored_name, "book uploaded");
    Ok(Json(serde_json::json!({ "message": "Upload book success", "book": row })))
}

pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, AppError> {
    Ok(Json(state.books.list().await?))
}

/// GET /books/:filename: the stored bytes, served with the recorded MIME type.
pub async fn show_book_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !is_safe_file_name(&filename) {
        return Err(AppError::BadRequest(format!("invalid file name: {}", filename)));
    }
    let book = state
        .books
        .list_by("stored_name", filename.clone().into())
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("book '{}'", filename)))?;
    let bytes = state.book_files.read(&book.stored_name).await?;
    Ok((
        [
            (header::CONTENT_TYPE, book.mime_type),
            (header::CONTENT_DISPOSITION, format!("inline; filename=\"{}\"", book.stored_name)),
        ],
        bytes,
    ))
}
