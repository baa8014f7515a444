//! Serde model of the generated OpenAPI 3.0 document.
//!
//! Only the parts of the specification this crate emits are modeled as
//! structs; anything else travels through the flattened `extra` maps so
//! caller-supplied documentation fields survive the merge untouched.

use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The OpenAPI version this crate emits.
pub const OPENAPI_VERSION: &str = "3.0.3";

/// The concrete methods a pseudo-method `all` route expands into.
pub const ALL_METHODS: [&str; 8] = [
    "get", "post", "put", "delete", "patch", "head", "options", "trace",
];

/// All operations registered under a single path, keyed by lowercase method.
pub type PathItem = BTreeMap<String, Operation>;

/// Complete OpenAPI document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version, always [`OPENAPI_VERSION`]
    pub openapi: String,
    /// API metadata
    pub info: Info,
    /// Tags for grouping operations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Paths and their operations
    pub paths: BTreeMap<String, PathItem>,
    /// Reusable components
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    /// Any other top-level document fields (servers, security, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// API metadata information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,
    /// API description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// API version
    pub version: String,
    /// Any other info fields (contact, license, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: "API Documentation".to_string(),
            description: Some("Development documentation".to_string()),
            version: "0.0.0".to_string(),
            extra: BTreeMap::new(),
        }
    }
}

/// Operation grouping tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name
    pub name: String,
    /// Tag description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A single API operation: one method on one path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Grouping tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Operation summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Operation description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Deterministic operation id
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Parameters (path, query, header, cookie)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    /// Request body
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, Response>,
    /// Any other operation fields from route metadata
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// OpenAPI Parameter object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter location (path, query, header, cookie)
    #[serde(rename = "in")]
    pub location: String,
    /// Whether the parameter is required
    pub required: bool,
    /// Parameter schema
    pub schema: Schema,
}

/// OpenAPI RequestBody object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    /// Whether the request body is required
    pub required: bool,
    /// Content types and their schemas
    pub content: BTreeMap<String, MediaType>,
}

/// OpenAPI MediaType object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type
    pub schema: Schema,
}

/// OpenAPI Response object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Response description
    pub description: String,
    /// Response content; absent for bodyless responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<BTreeMap<String, MediaType>>,
    /// Other metadata declared on the response schema
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// OpenAPI Components object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    /// Named schema definitions
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, Schema>,
    /// Any other component kinds supplied by the caller
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
