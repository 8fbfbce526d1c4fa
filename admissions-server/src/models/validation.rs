//! Validation error types

use std::fmt;

use serde::Serialize;

/// A single problem found in an inbound payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body is empty or not parseable as JSON
    MalformedBody { reason: String },

    /// Body parsed but is not a JSON object
    NotAnObject,

    /// Required field absent
    Missing { field: &'static str },

    /// Field present but not a JSON string (no coercion)
    NotText { field: &'static str },
}

impl ValidationError {
    /// Machine-readable kind, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedBody { .. } => "json_invalid",
            Self::NotAnObject => "dict_type",
            Self::Missing { .. } => "missing",
            Self::NotText { .. } => "string_type",
        }
    }

    /// Location of the problem, rooted at `body`.
    pub fn loc(&self) -> Vec<&'static str> {
        match self {
            Self::Missing { field } | Self::NotText { field } => vec!["body", *field],
            _ => vec!["body"],
        }
    }

    /// Wire form used in 422 responses.
    pub fn detail(&self) -> ValidationDetail {
        ValidationDetail {
            loc: self.loc(),
            msg: self.to_string(),
            kind: self.kind(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBody { reason } => write!(f, "JSON decode error: {}", reason),
            Self::NotAnObject => write!(f, "Input should be a valid dictionary"),
            Self::Missing { .. } => write!(f, "Field required"),
            Self::NotText { .. } => write!(f, "Input should be a valid string"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// One entry of the `detail` array in a 422 body
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationDetail {
    pub loc: Vec<&'static str>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// All problems found in one payload, in field order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn details(&self) -> Vec<ValidationDetail> {
        self.0.iter().map(ValidationError::detail).collect()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(e: ValidationError) -> Self {
        Self(vec![e])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.loc().join("."), e))
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
