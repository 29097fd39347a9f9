use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;
use crate::ids;
use crate::models::FormRecord;
use crate::store::{FormStore, StoreError};

use super::schema;

/// Public path prefix under which published forms are served.
pub const FORM_URL_PREFIX: &str = "/forms/";

const MAX_ID_ATTEMPTS: usize = 5;
const PUBLISH_FAILED: &str = "Failed to publish form";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Published {
    pub form_id: String,
    pub url: String,
}

/// Validate `form_schema`, store it as a new record and return its id and URL.
/// Nothing is written when validation fails.
pub async fn publish(store: &dyn FormStore, form_schema: Option<&Value>) -> Result<Published, AppError> {
    let schema = schema::validate(form_schema).ok_or(AppError::InvalidSchema)?;

    store
        .ensure_ready()
        .await
        .map_err(AppError::storage(PUBLISH_FAILED))?;

    let created_at = Utc::now();
    let mut last_err = None;

    for _ in 0..MAX_ID_ATTEMPTS {
        let record = FormRecord::new(ids::generate(), schema.clone(), created_at);
        match store.insert(&record).await {
            Ok(()) => {
                tracing::info!("Published form {}", record.id);
                return Ok(Published {
                    url: format!("{FORM_URL_PREFIX}{}", record.id),
                    form_id: record.id,
                });
            }
            Err(e @ StoreError::AlreadyExists(_)) => {
                tracing::warn!("Form id collision, retrying: {e}");
                last_err = Some(e);
            }
            Err(e) => return Err(AppError::storage(PUBLISH_FAILED)(e)),
        }
    }

    let source = last_err.unwrap_or_else(|| StoreError::AlreadyExists(String::new()));
    Err(AppError::storage(PUBLISH_FAILED)(source))
}
