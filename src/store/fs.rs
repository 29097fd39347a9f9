use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::ids;
use crate::models::{FormRecord, Submission};

use super::{FormStore, StoreError};

/// One pretty-printed JSON file per form at `<root>/forms/<id>.json`.
///
/// Every write goes to a hidden temp file in the same directory first and is
/// then linked or renamed into place, so readers never see a partial record.
pub struct FsFormStore {
    forms_dir: PathBuf,
    /// Serializes read-modify-write cycles per form id.
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl FsFormStore {
    pub fn new(storage_root: impl AsRef<Path>) -> Self {
        Self {
            forms_dir: storage_root.as_ref().join("forms"),
            locks: DashMap::new(),
        }
    }

    pub fn forms_dir(&self) -> &Path {
        &self.forms_dir
    }

    pub fn record_path(&self, id: &str) -> PathBuf {
        self.forms_dir.join(format!("{id}.json"))
    }

    fn lock_for(&self, id: &str) -> Arc<Mutex<()>> {
        self.locks.entry(id.to_string()).or_default().value().clone()
    }

    async fn write_temp(&self, id: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        let temp = self
            .forms_dir
            .join(format!(".{id}.{}.tmp", ids::random_component(8)));

        let written = async {
            let mut file = tokio::fs::File::create(&temp).await?;
            file.write_all(bytes).await?;
            // tokio parks write errors on the handle; flush is what reports them.
            file.flush().await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        Ok(temp)
    }

    /// Hard-link the temp file to its final name. Unlike rename this refuses
    /// to replace an existing file, which is what keeps ids from colliding.
    async fn link_new(&self, temp: &Path, dest: &Path, id: &str) -> Result<(), StoreError> {
        match tokio::fs::hard_link(temp, dest).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(StoreError::AlreadyExists(id.to_string()))
            }
            Err(e) if matches!(e.kind(), ErrorKind::Unsupported | ErrorKind::PermissionDenied) => {
                // No hard links on this filesystem.
                if tokio::fs::try_exists(dest).await? {
                    return Err(StoreError::AlreadyExists(id.to_string()));
                }
                tokio::fs::rename(temp, dest).await?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn append_locked(
        &self,
        form_id: &str,
        submission: Submission,
    ) -> Result<Option<FormRecord>, StoreError> {
        let Some(mut record) = self.read_record(form_id).await? else {
            return Ok(None);
        };
        record.submissions.push(submission);

        let bytes = serde_json::to_vec_pretty(&record)?;
        let temp = self.write_temp(form_id, &bytes).await?;
        if let Err(e) = tokio::fs::rename(&temp, self.record_path(form_id)).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }

        Ok(Some(record))
    }

    async fn read_record(&self, id: &str) -> Result<Option<FormRecord>, StoreError> {
        let text = match tokio::fs::read_to_string(self.record_path(id)).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                id: id.to_string(),
                source,
            })
    }
}

#[async_trait]
impl FormStore for FsFormStore {
    async fn ensure_ready(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.forms_dir).await?;
        Ok(())
    }

    async fn insert(&self, record: &FormRecord) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(record)?;
        let temp = self.write_temp(&record.id, &bytes).await?;

        let linked = self
            .link_new(&temp, &self.record_path(&record.id), &record.id)
            .await;

        // Already gone if the rename fallback ran.
        let _ = tokio::fs::remove_file(&temp).await;
        linked
    }

    async fn get(&self, id: &str) -> Result<Option<FormRecord>, StoreError> {
        if !ids::is_valid(id) {
            return Ok(None);
        }
        self.read_record(id).await
    }

    async fn list(&self) -> Result<Vec<FormRecord>, StoreError> {
        let mut dir = match tokio::fs::read_dir(&self.forms_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let file_name = entry.file_name();
            let Some(id) = file_name.to_str().and_then(|n| n.strip_suffix(".json")) else {
                continue;
            };
            if !ids::is_valid(id) {
                continue;
            }

            match self.read_record(id).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping form {id}: {e}"),
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn append_submission(
        &self,
        form_id: &str,
        submission: Submission,
    ) -> Result<Option<FormRecord>, StoreError> {
        if !ids::is_valid(form_id) {
            return Ok(None);
        }

        let lock = self.lock_for(form_id);
        let appended = {
            let _guard = lock.lock().await;
            self.append_locked(form_id, submission).await
        };

        // Drop the table entry once nobody else is waiting on it.
        drop(lock);
        self.locks
            .remove_if(form_id, |_, entry| Arc::strong_count(entry) == 1);

        appended
    }
}
