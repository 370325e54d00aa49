//! File-backed store for the [`BoardDocument`].
//!
//! The whole document lives in memory behind an async mutex and is
//! rewritten to disk after every successful mutation. Mutations run on a
//! copy, so a closure error or a failed write leaves both memory and disk
//! as they were.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::migration;
use super::BoardDocument;
use crate::error::CoreError;

#[derive(Debug)]
pub struct BoardStore {
    path: PathBuf,
    document: Mutex<BoardDocument>,
}

impl BoardStore {
    /// Load the board file at `path`, migrating it if it predates the
    /// current schema. A missing file starts an empty document.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();

        let document = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let raw: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
                    CoreError::Validation(format!(
                        "Invalid board file {}: {e}",
                        path.display()
                    ))
                })?;
                let loaded = migration::migrate(raw)?;
                if loaded.was_migrated() {
                    tracing::info!(
                        path = %path.display(),
                        from_version = loaded.from_version,
                        to_version = super::SCHEMA_VERSION,
                        "Migrated board file"
                    );
                    write_document(&path, &loaded.document).await?;
                }
                loaded.document
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "Board file not found, starting empty");
                BoardDocument::default()
            }
            Err(e) => {
                return Err(CoreError::Internal(format!(
                    "Failed to read board file {}: {e}",
                    path.display()
                )))
            }
        };

        tracing::debug!(
            boards = document.boards.len(),
            cards = document.card_count(),
            "Board store ready"
        );

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run a read-only closure against the current document.
    pub async fn read<R>(&self, f: impl FnOnce(&BoardDocument) -> R) -> R {
        let document = self.document.lock().await;
        f(&document)
    }

    /// Apply a mutation and persist the result.
    pub async fn update<R>(
        &self,
        f: impl FnOnce(&mut BoardDocument) -> Result<R, CoreError>,
    ) -> Result<R, CoreError> {
        let mut document = self.document.lock().await;
        let mut draft = document.clone();
        let result = f(&mut draft)?;
        write_document(&self.path, &draft).await?;
        *document = draft;
        Ok(result)
    }
}

/// Write via a sibling temp file and rename, so readers never see a
/// half-written document.
async fn write_document(path: &Path, document: &BoardDocument) -> Result<(), CoreError> {
    let io_err = |e: std::io::Error| {
        CoreError::Internal(format!("Failed to write board file {}: {e}", path.display()))
    };

    let json = serde_json::to_vec_pretty(document)
        .map_err(|e| CoreError::Internal(format!("Failed to serialize boards: {e}")))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, json).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
    Ok(())
}
