use serde_json::Value;

use crate::models::FormSchema;

/// Accept a candidate schema only if it is an object with a non-empty
/// `fields` array. Field entries themselves are not inspected.
pub fn validate(candidate: Option<&Value>) -> Option<FormSchema> {
    let object = candidate?.as_object()?;
    let fields = object.get("fields")?.as_array()?;
    if fields.is_empty() {
        return None;
    }
    Some(FormSchema::from_object(object.clone()))
}
