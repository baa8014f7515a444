//! Configuration surface for document generation.

use crate::document::{Components, PathItem, Tag};
use crate::route::ReferenceSource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Which documentation UI the host should mount, if any. Rendering the page
/// itself is the host's job; this crate only recognizes the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    #[default]
    Scalar,
    SwaggerUi,
    Disabled,
}

/// Filters deciding which routes are left out of the generated document.
#[derive(Debug, Clone)]
pub struct ExcludeConfig {
    /// Methods to exclude, matched case-insensitively
    pub methods: Vec<String>,
    /// Exact paths to exclude
    pub paths: Vec<String>,
    /// Exclude routes whose path contains a literal `.`
    pub static_files: bool,
    /// Exclude routes carrying any of these tags
    pub tags: Vec<String>,
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            methods: vec!["OPTIONS".to_string()],
            paths: Vec::new(),
            static_files: true,
            tags: Vec::new(),
        }
    }
}

impl ExcludeConfig {
    /// Whether a method (any casing) is excluded.
    pub fn excludes_method(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m.eq_ignore_ascii_case(method))
    }

    /// Whether any of the route's tags is excluded.
    pub fn excludes_tags(&self, tags: &[String]) -> bool {
        tags.iter().any(|tag| self.tags.contains(tag))
    }
}

/// Caller-supplied raw OpenAPI document fields, merged into the generated
/// document. `info` fields win over the built-in defaults; `paths` and
/// `components.schemas` entries win over generated ones on key collision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Documentation {
    /// Partial info block merged over the defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<InfoOverride>,
    /// Document tags; entries naming an excluded tag are dropped
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Extra or overriding path items
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub paths: BTreeMap<String, PathItem>,
    /// Extra or overriding components
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    /// Any other top-level document fields (servers, security, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Field-wise override of the generated info block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InfoOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Full configuration for the document service.
#[derive(Debug, Default)]
pub struct OpenApiConfig {
    /// Documentation UI mount point; defaults to `/openapi`
    pub path: Option<String>,
    /// JSON document mount point; defaults to `{path}/json`
    pub spec_path: Option<String>,
    /// Documentation UI choice
    pub provider: Provider,
    /// Raw document fields to merge in
    pub documentation: Documentation,
    /// Route exclusion filters
    pub exclude: ExcludeConfig,
    /// Reference tables (or producers), applied in order; first match per
    /// hook slot wins
    pub references: Vec<ReferenceSource>,
}

impl OpenApiConfig {
    /// The documentation UI mount point.
    pub fn ui_path(&self) -> String {
        self.path.clone().unwrap_or_else(|| "/openapi".to_string())
    }

    /// The JSON document mount point.
    pub fn json_path(&self) -> String {
        self.spec_path
            .clone()
            .unwrap_or_else(|| format!("{}/json", self.ui_path()))
    }
}
