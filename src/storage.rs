//! Local directory holding uploaded curriculum books.

use crate::error::AppError;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub struct StoredFile {
    pub stored_name: String,
    pub path: String,
    pub checksum: String,
}

#[derive(Clone, Debug)]
pub struct BookStorage {
    dir: PathBuf,
    max_upload_bytes: usize,
}

fn safe_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("static regex"))
}

fn extension_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9]{1,10}$").expect("static regex"))
}

/// Plain file name without separators or leading dot; the only names `read` will open.
pub fn is_safe_file_name(name: &str) -> bool {
    safe_name_re().is_match(name) && !name.contains("..")
}

pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// `<uuid>.<ext>`, keeping the original extension only when it is short and alphanumeric.
fn stored_name_for(original_name: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    match Path::new(original_name).extension().and_then(|e| e.to_str()) {
        Some(ext) if extension_re().is_match(ext) => format!("{}.{}", id, ext.to_ascii_lowercase()),
        _ => id,
    }
}

impl BookStorage {
    pub fn new(dir: impl Into<PathBuf>, max_upload_bytes: usize) -> Self {
        BookStorage {
            dir: dir.into(),
            max_upload_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<StoredFile, AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let stored_name = stored_name_for(original_name);
        let path = self.dir.join(&stored_name);
        tokio::fs::write(&path, data).await?;
        tracing::info!(stored_name = %stored_name, bytes = data.len(), "book stored");
        Ok(StoredFile {
            stored_name,
            path: path.display().to_string(),
            checksum: sha256_hex(data),
        })
    }

    pub async fn read(&self, stored_name: &str) -> Result<Vec<u8>, AppError> {
        if !is_safe_file_name(stored_name) {
            return Err(AppError::BadRequest(format!("invalid file name: {}", stored_name)));
        }
        match tokio::fs::read(self.dir.join(stored_name)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("file '{}'", stored_name)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Best effort; used to undo a write whose metadata row could not be stored.
    pub async fn remove(&self, stored_name: &str) {
        if let Err(e) = tokio::fs::remove_file(self.dir.join(stored_name)).await {
            tracing::warn!(stored_name = %stored_name, error = %e, "could not remove book file");
        }
    }
}
