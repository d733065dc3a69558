//! Ragux Protocol: request/response types shared with the browser UI,
//! and validation of untyped request bodies into them.

pub mod schema;
pub mod types;

pub use schema::{
    parse_body, FieldIssue, IssueCode, PathSegment, RequestSchemas, SchemaError, ValidationError,
};
pub use types::*;
