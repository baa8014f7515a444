//! Structural schema model shared by the collector and the miner.
//!
//! A [`Schema`] is a JSON-Schema-shaped descriptor: a bag of optional fields
//! where the combination of populated fields determines the kind (object,
//! array, primitive, union, reference). Validation hooks on live routes,
//! mined reference tables and the final OpenAPI document all speak this type,
//! so it round-trips through serde without transformation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The recognized `type` tags.
///
/// `Void` and `Undefined` are not OpenAPI types, but the host framework's
/// validators emit them to mark bodyless responses; they are carried through
/// so the collector can detect the no-body case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
    Void,
    Undefined,
    Unknown,
}

/// A structural type descriptor used for both validation metadata and
/// OpenAPI schema output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    /// The type tag (string, object, array, etc.)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Properties for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    /// Required property names for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Items schema for array types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Enum values
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Constant value for literal types
    #[serde(rename = "const", skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,
    /// Union members
    #[serde(rename = "anyOf", skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Schema>>,
    /// Reference to a named component schema
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Format hint for primitive types (e.g. "int64", "date-time")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Example value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Any other OpenAPI keywords, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Schema {
    /// Create a schema with only a type tag set.
    pub fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// Create a `$ref` schema pointing at a named component.
    pub fn named_ref(name: &str) -> Self {
        Self {
            reference: Some(format!("#/components/schemas/{}", name)),
            ..Self::default()
        }
    }

    /// Create an object schema from properties and a required list.
    pub fn object(properties: BTreeMap<String, Schema>, required: Vec<String>) -> Self {
        Self {
            schema_type: Some(SchemaType::Object),
            properties: Some(properties),
            required: if required.is_empty() {
                None
            } else {
                Some(required)
            },
            ..Self::default()
        }
    }

    /// Duck-typed structural validity check used when adopting schemas from
    /// a reference table: the schema must carry a recognized type tag, a
    /// reference, properties or items to be worth emitting.
    pub fn is_concrete(&self) -> bool {
        matches!(self.schema_type, Some(t) if t != SchemaType::Unknown)
            || self.reference.is_some()
            || self.properties.is_some()
            || self.items.is_some()
            || self.any_of.is_some()
    }

    /// Whether this schema marks a response with no body.
    pub fn is_bodyless(&self) -> bool {
        matches!(
            self.schema_type,
            Some(SchemaType::Void) | Some(SchemaType::Null) | Some(SchemaType::Undefined)
        )
    }

    /// Whether a property name is listed as required.
    pub fn requires(&self, name: &str) -> bool {
        self.required
            .as_ref()
            .map(|r| r.iter().any(|n| n == name))
            .unwrap_or(false)
    }
}

/// A schema slot on a route: either a handle into the named-schema registry
/// or an inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaHandle {
    /// Registry handle, rendered as `#/components/schemas/{name}`
    Named(String),
    /// Inline schema
    Inline(Schema),
}

impl SchemaHandle {
    /// Materialize the handle as a schema, converting names to `$ref`s.
    pub fn to_schema(&self) -> Schema {
        match self {
            SchemaHandle::Named(name) => Schema::named_ref(name),
            SchemaHandle::Inline(schema) => schema.clone(),
        }
    }

}

impl From<Schema> for SchemaHandle {
    fn from(schema: Schema) -> Self {
        SchemaHandle::Inline(schema)
    }
}

impl From<&str> for SchemaHandle {
    fn from(name: &str) -> Self {
        SchemaHandle::Named(name.to_string())
    }
}

/// Read-only view of the host framework's global named-schema registry.
///
/// The collector copies the registry into `components.schemas` as-is and
/// never mutates it; hosts expose whatever storage they use behind this
/// narrow interface.
pub trait SchemaRegistry {
    /// All named schemas, keyed by component name.
    fn schemas(&self) -> BTreeMap<String, Schema>;

    /// Look up a single named schema.
    fn resolve(&self, name: &str) -> Option<Schema> {
        self.schemas().get(name).cloned()
    }
}

impl SchemaRegistry for BTreeMap<String, Schema> {
    fn schemas(&self) -> BTreeMap<String, Schema> {
        self.clone()
    }

    fn resolve(&self, name: &str) -> Option<Schema> {
        self.get(name).cloned()
    }
}

/// An empty registry for hosts without named schemas.
pub struct NoSchemas;

impl SchemaRegistry for NoSchemas {
    fn schemas(&self) -> BTreeMap<String, Schema> {
        BTreeMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_named_ref_format() {
        let schema = Schema::named_ref("User");
        assert_eq!(
            schema.reference,
            Some("#/components/schemas/User".to_string())
        );
        assert!(schema.schema_type.is_none());
    }

    #[test]
    fn test_concrete_with_type_tag() {
        assert!(Schema::of(SchemaType::String).is_concrete());
        assert!(Schema::of(SchemaType::Object).is_concrete());
    }

    #[test]
    fn test_unknown_type_is_not_concrete() {
        assert!(!Schema::of(SchemaType::Unknown).is_concrete());
        assert!(!Schema::default().is_concrete());
    }

    #[test]
    fn test_concrete_by_structure() {
        let with_items = Schema {
            items: Some(Box::new(Schema::of(SchemaType::String))),
            ..Schema::default()
        };
        assert!(with_items.is_concrete());
        assert!(Schema::named_ref("User").is_concrete());
    }

    #[test]
    fn test_bodyless_types() {
        assert!(Schema::of(SchemaType::Void).is_bodyless());
        assert!(Schema::of(SchemaType::Null).is_bodyless());
        assert!(Schema::of(SchemaType::Undefined).is_bodyless());
        assert!(!Schema::of(SchemaType::Object).is_bodyless());
    }

    #[test]
    fn test_requires_membership() {
        let schema = Schema {
            required: Some(vec!["id".to_string()]),
            ..Schema::default()
        };
        assert!(schema.requires("id"));
        assert!(!schema.requires("name"));
        assert!(!Schema::default().requires("id"));
    }

    #[test]
    fn test_handle_to_schema() {
        let named = SchemaHandle::Named("User".to_string());
        assert_eq!(
            named.to_schema().reference,
            Some("#/components/schemas/User".to_string())
        );

        let inline = SchemaHandle::Inline(Schema::of(SchemaType::String));
        assert_eq!(inline.to_schema().schema_type, Some(SchemaType::String));
    }

    #[test]
    fn test_serialize_shape() {
        let mut properties = BTreeMap::new();
        properties.insert("id".to_string(), Schema::of(SchemaType::Integer));
        let schema = Schema::object(properties, vec!["id".to_string()]);

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "object",
                "properties": { "id": { "type": "integer" } },
                "required": ["id"]
            })
        );
    }

    #[test]
    fn test_extra_fields_pass_through() {
        let json = json!({
            "type": "string",
            "minLength": 3,
            "x-internal": true
        });
        let schema: Schema = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::String));
        assert_eq!(schema.extra["minLength"], json!(3));
        assert_eq!(serde_json::to_value(&schema).unwrap(), json);
    }

    #[test]
    fn test_registry_on_map() {
        let mut map = BTreeMap::new();
        map.insert("User".to_string(), Schema::of(SchemaType::Object));

        assert!(map.resolve("User").is_some());
        assert!(map.resolve("Missing").is_none());
        assert_eq!(map.schemas().len(), 1);
    }
}
