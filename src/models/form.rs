use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Client-supplied form description, kept as the exact JSON object it
/// arrived as (key order included). `fields` entries are opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSchema(Map<String, Value>);

impl FormSchema {
    pub fn from_object(object: Map<String, Value>) -> Self {
        Self(object)
    }

    pub fn fields(&self) -> &[Value] {
        self.0
            .get("fields")
            .and_then(|f| f.as_array())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(|t| t.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    pub id: String,
    pub schema: FormSchema,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

impl FormRecord {
    pub fn new(id: String, schema: FormSchema, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            schema,
            created_at,
            submissions: Vec::new(),
        }
    }

    pub fn summary(&self) -> FormSummary {
        FormSummary {
            id: self.id.clone(),
            title: self.schema.title().map(|s| s.to_string()),
            field_count: self.schema.fields().len(),
            submission_count: self.submissions.len(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub data: Value,
    pub submitted_at: DateTime<Utc>,
}

/// Listing entry for the workspace view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    pub id: String,
    pub title: Option<String>,
    pub field_count: usize,
    pub submission_count: usize,
    pub created_at: DateTime<Utc>,
}
