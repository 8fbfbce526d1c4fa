//! Admission record validation
//!
//! Three required text fields. Empty strings pass; anything that is not a
//! JSON string (numbers, booleans, null) is rejected rather than coerced.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ValidationError, ValidationErrors};

/// Validated admission form, sent verbatim as the inserted row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRecord {
    pub full_name: String,
    pub father_name: String,
    pub class_grade: String,
}

impl AdmissionRecord {
    pub fn new(
        full_name: impl Into<String>,
        father_name: impl Into<String>,
        class_grade: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            father_name: father_name.into(),
            class_grade: class_grade.into(),
        }
    }

    /// Validate an arbitrary JSON payload.
    ///
    /// Every offending field is reported, in declaration order. Extra
    /// fields are ignored.
    ///
    /// # Example
    /// ```
    /// use admissions_server::models::AdmissionRecord;
    /// use serde_json::json;
    ///
    /// let ok = json!({"full_name": "Ali Khan", "father_name": "Imran Khan", "class_grade": "5"});
    /// assert!(AdmissionRecord::from_payload(&ok).is_ok());
    ///
    /// let numeric = json!({"full_name": "Ali Khan", "father_name": "Imran Khan", "class_grade": 5});
    /// assert!(AdmissionRecord::from_payload(&numeric).is_err());
    /// ```
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationErrors> {
        let object = payload
            .as_object()
            .ok_or(ValidationError::NotAnObject)?;

        let mut errors = Vec::new();
        let full_name = text_field(object, "full_name", &mut errors);
        let father_name = text_field(object, "father_name", &mut errors);
        let class_grade = text_field(object, "class_grade", &mut errors);

        match (full_name, father_name, class_grade) {
            (Some(full_name), Some(father_name), Some(class_grade)) if errors.is_empty() => {
                Ok(Self {
                    full_name,
                    father_name,
                    class_grade,
                })
            }
            _ => Err(ValidationErrors::new(errors)),
        }
    }

    /// Validate raw request bytes.
    pub fn from_slice(body: &[u8]) -> Result<Self, ValidationErrors> {
        let payload: Value = serde_json::from_slice(body).map_err(|e| {
            ValidationError::MalformedBody {
                reason: e.to_string(),
            }
        })?;
        Self::from_payload(&payload)
    }
}

fn text_field(
    object: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    match object.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(ValidationError::NotText { field });
            None
        }
        None => {
            errors.push(ValidationError::Missing { field });
            None
        }
    }
}
