//! Request validation.
//!
//! Bodies arrive as untyped JSON and are checked against JSON Schemas
//! compiled once at startup. Every failing field is reported, not just the
//! first. Unknown keys are ignored. An optional field that is present must
//! have the right type (`null` is not treated as absent).

use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::Validator;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::types::{FollowupRequest, Mode, SearchRequest};

/// One step in the path to a failing field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    Missing,
    InvalidType,
    InvalidEnumValue,
    InvalidJson,
    /// Path or query string the router could not decode.
    InvalidParameter,
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub path: Vec<PathSegment>,
    pub code: IssueCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldIssue {
    fn new(path: Vec<PathSegment>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path,
            code,
            message: message.into(),
            expected: None,
            received: None,
            options: None,
        }
    }

    /// Dotted rendering of the path, e.g. `filters.date` or `fileIds[2]`.
    pub fn field(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Index(i) => out.push_str(&format!("[{}]", i)),
            }
        }
        out
    }
}

/// All the reasons a request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("invalid request: {}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// A failure with exactly one issue.
    pub fn single(path: Vec<PathSegment>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue::new(path, code, message)],
        }
    }

    /// Rendered paths of every failing field, in report order.
    pub fn fields(&self) -> Vec<String> {
        self.issues.iter().map(FieldIssue::field).collect()
    }
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| {
            let field = i.field();
            if field.is_empty() {
                i.message.clone()
            } else {
                format!("{}: {}", field, i.message)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// A compiled schema could not be built.
#[derive(Debug, Error)]
#[error("Invalid request schema: {0}")]
pub struct SchemaError(String);

/// Parse raw bytes as JSON, reporting malformed input as a validation failure.
pub fn parse_body(bytes: &[u8]) -> Result<Value, ValidationError> {
    serde_json::from_slice(bytes).map_err(|e| {
        ValidationError::single(
            Vec::new(),
            IssueCode::InvalidJson,
            format!("Malformed JSON body: {}", e),
        )
    })
}

const SEARCH_FIELDS: &[&str] = &["mode", "queryType", "query", "fileIds", "filters"];
const FOLLOWUP_FIELDS: &[&str] = &["threadId", "query"];

fn mode_schema() -> Value {
    json!({ "type": "string", "enum": Mode::ALL.map(|m| m.as_str()) })
}

fn search_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "mode": mode_schema(),
            "queryType": { "type": "string", "enum": ["text", "image"] },
            "query": { "type": "string" },
            "fileIds": { "type": "array", "items": { "type": "string" } },
            "filters": {
                "type": "object",
                "properties": {
                    "iteration": { "type": "string" },
                    "scenario": { "type": "string" },
                    "date": { "type": "string" }
                }
            }
        },
        "required": ["mode", "queryType"]
    })
}

fn followup_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "threadId": { "type": "string" },
            "query": { "type": "string" }
        },
        "required": ["threadId", "query"]
    })
}

fn answer_params_schema() -> Value {
    json!({
        "type": "object",
        "properties": { "mode": mode_schema() }
    })
}

/// Compiled validators for every request the API accepts.
pub struct RequestSchemas {
    search: Validator,
    followup: Validator,
    answer_params: Validator,
}

impl RequestSchemas {
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            search: compile(&search_schema())?,
            followup: compile(&followup_schema())?,
            answer_params: compile(&answer_params_schema())?,
        })
    }

    /// Validate a `/api/search` body.
    pub fn search(&self, body: &Value) -> Result<SearchRequest, ValidationError> {
        check(&self.search, body, SEARCH_FIELDS)?;
        into_typed(body)
    }

    /// Validate a `/api/followup` body.
    pub fn followup(&self, body: &Value) -> Result<FollowupRequest, ValidationError> {
        check(&self.followup, body, FOLLOWUP_FIELDS)?;
        into_typed(body)
    }

    /// Validate the optional `mode` query parameter of `/api/answers/{id}`.
    /// Absent means [`Mode::Online`].
    pub fn answer_mode(&self, raw: Option<&str>) -> Result<Mode, ValidationError> {
        let Some(raw) = raw else {
            return Ok(Mode::default());
        };
        check(&self.answer_params, &json!({ "mode": raw }), &["mode"])?;
        Mode::parse(raw).ok_or_else(|| {
            ValidationError::single(vec!["mode".into()], IssueCode::InvalidEnumValue, "Invalid mode")
        })
    }
}

fn compile(schema: &Value) -> Result<Validator, SchemaError> {
    Validator::new(schema).map_err(|e| SchemaError(e.to_string()))
}

fn into_typed<T: DeserializeOwned>(body: &Value) -> Result<T, ValidationError> {
    serde_json::from_value(body.clone()).map_err(|e| {
        ValidationError::single(Vec::new(), IssueCode::InvalidType, e.to_string())
    })
}

/// Run a validator and turn every error into a [`FieldIssue`], ordered by
/// the position of the top-level field in `order`.
fn check(validator: &Validator, body: &Value, order: &[&str]) -> Result<(), ValidationError> {
    let mut issues: Vec<FieldIssue> = validator.iter_errors(body).map(to_issue).collect();
    if issues.is_empty() {
        return Ok(());
    }

    // A value of the wrong type also fails its enum; report the type only.
    let typed: Vec<Vec<PathSegment>> = issues
        .iter()
        .filter(|i| i.code == IssueCode::InvalidType)
        .map(|i| i.path.clone())
        .collect();
    issues.retain(|i| i.code != IssueCode::InvalidEnumValue || !typed.contains(&i.path));

    let rank = |issue: &FieldIssue| match issue.path.first() {
        Some(PathSegment::Key(k)) => order.iter().position(|f| f == k).unwrap_or(order.len()),
        _ => 0,
    };
    issues.sort_by(|a, b| rank(a).cmp(&rank(b)).then_with(|| a.path.cmp(&b.path)));

    Err(ValidationError { issues })
}

fn to_issue(error: jsonschema::ValidationError<'_>) -> FieldIssue {
    let mut path = pointer_segments(&error.instance_path.to_string());
    let received = type_name(&error.instance);

    match &error.kind {
        ValidationErrorKind::Required { property } => {
            path.push(PathSegment::Key(
                property.as_str().map(str::to_string).unwrap_or_else(|| property.to_string()),
            ));
            FieldIssue::new(path, IssueCode::Missing, "Required")
        }
        ValidationErrorKind::Type { kind } => {
            let expected = match kind {
                TypeKind::Single(t) => t.to_string(),
                TypeKind::Multiple(_) => "value".to_string(),
            };
            FieldIssue {
                message: format!("Expected {}, received {}", expected, received),
                expected: Some(expected),
                received: Some(received.into()),
                ..FieldIssue::new(path, IssueCode::InvalidType, "")
            }
        }
        ValidationErrorKind::Enum { options } => {
            let options: Vec<String> = options
                .as_array()
                .map(|o| o.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
                .unwrap_or_default();
            let raw = error
                .instance
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.instance.to_string());
            let listed = options
                .iter()
                .map(|o| format!("'{}'", o))
                .collect::<Vec<_>>()
                .join(" | ");
            FieldIssue {
                message: format!("Invalid enum value. Expected {}, received '{}'", listed, raw),
                received: Some(raw),
                options: Some(options),
                ..FieldIssue::new(path, IssueCode::InvalidEnumValue, "")
            }
        }
        _ => FieldIssue::new(path, IssueCode::InvalidType, error.to_string()),
    }
}

/// Split a JSON Pointer (`/fileIds/1`) into path segments.
fn pointer_segments(pointer: &str) -> Vec<PathSegment> {
    pointer
        .split('/')
        .skip(1)
        .map(|raw| {
            let key = raw.replace("~1", "/").replace("~0", "~");
            match key.parse::<usize>() {
                Ok(i) => PathSegment::Index(i),
                Err(_) => PathSegment::Key(key),
            }
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
