//! Route table data model and the boundary traits the host framework
//! implements.
//!
//! The host owns its live route registry; the collector only needs a stable,
//! ordered snapshot of it, exposed through [`RouteSource`]. Each entry is a
//! [`RouteDescriptor`]: method, path, per-kind validation hooks and free-form
//! detail metadata.

use crate::schema::{Schema, SchemaHandle};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// A single entry in the host framework's route table.
#[derive(Debug, Clone, Default)]
pub struct RouteDescriptor {
    /// Route path pattern, with `:name` parameters and optional `:name?`
    /// segments (e.g. `/user/:id?`)
    pub path: String,
    /// HTTP method as registered by the host (any casing), or the
    /// pseudo-method `all`
    pub method: String,
    /// Validation schemas attached to the route
    pub hooks: ValidationHooks,
    /// Free-form documentation metadata
    pub metadata: RouteMetadata,
}

impl RouteDescriptor {
    /// Create a descriptor with no hooks or metadata.
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            ..Self::default()
        }
    }
}

/// Per-kind validation schemas attached to a route.
#[derive(Debug, Clone, Default)]
pub struct ValidationHooks {
    /// Path parameter schema (object keyed by parameter name)
    pub params: Option<SchemaHandle>,
    /// Query string schema
    pub query: Option<SchemaHandle>,
    /// Header schema
    pub headers: Option<SchemaHandle>,
    /// Cookie schema
    pub cookie: Option<SchemaHandle>,
    /// Request body schema
    pub body: Option<SchemaHandle>,
    /// Response schema, single or per-status
    pub response: Option<ResponseHook>,
    /// Content-type parser tokens declared on the route
    /// (`text`, `urlencoded`, `json`, `formdata` or full media types)
    pub parsers: Vec<String>,
}

/// A route's response declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseHook {
    /// One schema, documented as the `200` response
    Single(SchemaHandle),
    /// Mapping from status code (as text, e.g. `"204"`) to schema
    ByStatus(BTreeMap<String, SchemaHandle>),
}

/// Free-form detail metadata carried on a route. Everything except `hidden`
/// and `tags` is passed through into the generated operation object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteMetadata {
    /// Excluded from the generated document entirely
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    /// Operation tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Operation summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Operation description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Any other OpenAPI operation fields
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Read-only, stable-order view of the host framework's route table.
pub trait RouteSource {
    /// Snapshot of all registered routes, in registration order.
    fn routes(&self) -> Vec<RouteDescriptor>;

    /// Number of registered routes. Used as the document cache key.
    fn route_count(&self) -> usize {
        self.routes().len()
    }
}

impl RouteSource for Vec<RouteDescriptor> {
    fn routes(&self) -> Vec<RouteDescriptor> {
        self.clone()
    }

    fn route_count(&self) -> usize {
        self.len()
    }
}

/// The schema bundle recovered for one route, either mined from type
/// declarations or supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSchemas {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Schema>,
    /// Status code (as text) to response schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<BTreeMap<String, Schema>>,
}

/// Supplementary route-shape metadata keyed by path, then lowercase method.
///
/// Reference tables only fill hook slots the live route table left empty;
/// they never override a schema the route already declares.
pub type ReferenceTable = HashMap<String, HashMap<String, RouteSchemas>>;

/// A source of reference metadata: an eager table or a producer evaluated
/// once per document build.
pub enum ReferenceSource {
    Table(ReferenceTable),
    Producer(Box<dyn Fn() -> Option<ReferenceTable> + Send + Sync>),
}

impl ReferenceSource {
    /// Evaluate the source. Producers returning `None` contribute nothing.
    pub fn evaluate(&self) -> Option<ReferenceTable> {
        match self {
            ReferenceSource::Table(table) => Some(table.clone()),
            ReferenceSource::Producer(producer) => producer(),
        }
    }
}

impl From<ReferenceTable> for ReferenceSource {
    fn from(table: ReferenceTable) -> Self {
        ReferenceSource::Table(table)
    }
}

impl std::fmt::Debug for ReferenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ReferenceSource::Table(table) => f.debug_tuple("Table").field(table).finish(),
            ReferenceSource::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaType;

    #[test]
    fn test_route_source_on_vec() {
        let routes = vec![
            RouteDescriptor::new("GET", "/a"),
            RouteDescriptor::new("POST", "/b"),
        ];
        assert_eq!(routes.route_count(), 2);
        assert_eq!(routes.routes()[0].path, "/a");
    }

    #[test]
    fn test_reference_source_table() {
        let mut table = ReferenceTable::new();
        table
            .entry("/a".to_string())
            .or_default()
            .insert("get".to_string(), RouteSchemas::default());

        let source = ReferenceSource::from(table);
        let evaluated = source.evaluate().unwrap();
        assert!(evaluated.contains_key("/a"));
    }

    #[test]
    fn test_reference_source_producer() {
        let source = ReferenceSource::Producer(Box::new(|| {
            let mut table = ReferenceTable::new();
            table
                .entry("/b".to_string())
                .or_default()
                .insert("post".to_string(), RouteSchemas::default());
            Some(table)
        }));
        assert!(source.evaluate().unwrap().contains_key("/b"));

        let empty = ReferenceSource::Producer(Box::new(|| None));
        assert!(empty.evaluate().is_none());
    }

    #[test]
    fn test_metadata_extra_round_trip() {
        let json = serde_json::json!({
            "tags": ["user"],
            "summary": "List users",
            "deprecated": true
        });
        let metadata: RouteMetadata = serde_json::from_value(json).unwrap();
        assert!(!metadata.hidden);
        assert_eq!(metadata.tags, vec!["user".to_string()]);
        assert_eq!(metadata.extra["deprecated"], serde_json::json!(true));
    }

    #[test]
    fn test_response_hook_variants() {
        let single = ResponseHook::Single(Schema::of(SchemaType::String).into());
        assert!(matches!(single, ResponseHook::Single(_)));

        let mut by_status = BTreeMap::new();
        by_status.insert(
            "204".to_string(),
            SchemaHandle::Inline(Schema::of(SchemaType::Void)),
        );
        let mapped = ResponseHook::ByStatus(by_status);
        assert!(matches!(mapped, ResponseHook::ByStatus(ref m) if m.contains_key("204")));
    }
}
