use chrono::Utc;
use serde_json::Value;

use crate::error::AppError;
use crate::ids;
use crate::models::Submission;
use crate::store::FormStore;

/// Append a respondent's answers to a form's submission log.
pub async fn submit(store: &dyn FormStore, form_id: &str, data: Value) -> Result<String, AppError> {
    if !data.is_object() {
        return Err(AppError::InvalidSubmission);
    }

    let submission = Submission {
        id: ids::generate(),
        data,
        submitted_at: Utc::now(),
    };
    let submission_id = submission.id.clone();

    store
        .append_submission(form_id, submission)
        .await
        .map_err(AppError::storage("Failed to record submission"))?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;

    tracing::info!("Recorded submission {submission_id} for form {form_id}");
    Ok(submission_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::publish;
    use crate::store::FsFormStore;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn appends_in_order() {
        let dir = TempDir::new().unwrap();
        let store = FsFormStore::new(dir.path());
        let published = publish(&store, Some(&json!({ "fields": [{ "label": "Name" }] })))
            .await
            .unwrap();

        let first = submit(&store, &published.form_id, json!({ "Name": "Ada" })).await.unwrap();
        let second = submit(&store, &published.form_id, json!({ "Name": "Grace" })).await.unwrap();

        let record = store.get(&published.form_id).await.unwrap().unwrap();
        let ids: Vec<&str> = record.submissions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![first.as_str(), second.as_str()]);
        assert_eq!(record.submissions[1].data["Name"], "Grace");
    }

    #[tokio::test]
    async fn rejects_non_object_data() {
        let dir = TempDir::new().unwrap();
        let store = FsFormStore::new(dir.path());
        let err = submit(&store, "whatever", json!(["a"])).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidSubmission));
    }

    #[tokio::test]
    async fn unknown_form_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FsFormStore::new(dir.path());
        let err = submit(&store, "nope", json!({})).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
