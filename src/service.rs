//! Lazily cached document provider backing the host's JSON document
//! endpoint.
//!
//! The assembled document is cached per service instance and keyed by the
//! route count at build time: a request only triggers a rebuild when the
//! number of registered routes has changed since the last build. This is a
//! cheap invalidation signal and a known limitation — in-place mutation of
//! an existing route's schema is not detected. Hosts that mutate routes
//! after startup should call [`OpenApiService::invalidate`].

use crate::collector::SchemaCollector;
use crate::config::OpenApiConfig;
use crate::document::{Components, Info, OpenApiDocument, OPENAPI_VERSION};
use crate::route::{ReferenceTable, RouteSource};
use crate::schema::SchemaRegistry;
use crate::serializer;
use anyhow::Result;
use log::debug;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

struct CachedDocument {
    route_count: usize,
    document: Arc<OpenApiDocument>,
}

/// Assembles and caches the OpenAPI document for one host application.
pub struct OpenApiService {
    config: OpenApiConfig,
    cache: Mutex<Option<CachedDocument>>,
}

impl OpenApiService {
    /// Create a service from its configuration.
    pub fn new(config: OpenApiConfig) -> Self {
        Self {
            config,
            cache: Mutex::new(None),
        }
    }

    /// The service configuration.
    pub fn config(&self) -> &OpenApiConfig {
        &self.config
    }

    /// The assembled document, rebuilt only when the route count has
    /// changed since the last build.
    pub fn document(
        &self,
        routes: &dyn RouteSource,
        registry: &dyn SchemaRegistry,
    ) -> Arc<OpenApiDocument> {
        let count = routes.route_count();

        {
            let cache = self.lock_cache();
            if let Some(cached) = cache.as_ref() {
                if cached.route_count == count {
                    debug!("Serving cached OpenAPI document ({} routes)", count);
                    return cached.document.clone();
                }
            }
        }

        debug!("Rebuilding OpenAPI document for {} routes", count);
        let document = Arc::new(self.build(routes, registry));
        *self.lock_cache() = Some(CachedDocument {
            route_count: count,
            document: document.clone(),
        });
        document
    }

    /// Drop the cached document so the next request rebuilds it.
    pub fn invalidate(&self) {
        *self.lock_cache() = None;
    }

    /// The document serialized as pretty JSON, for the document endpoint.
    pub fn json(&self, routes: &dyn RouteSource, registry: &dyn SchemaRegistry) -> Result<String> {
        let document = self.document(routes, registry);
        serializer::serialize_json(&document)
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, Option<CachedDocument>> {
        // A poisoned cache only means a previous build panicked; the cached
        // value is still a plain data snapshot.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn build(&self, routes: &dyn RouteSource, registry: &dyn SchemaRegistry) -> OpenApiDocument {
        // Reference producers are evaluated once per build.
        let references: Vec<ReferenceTable> = self
            .config
            .references
            .iter()
            .filter_map(|source| source.evaluate())
            .collect();

        let output = SchemaCollector::collect(
            routes,
            registry,
            self.config.exclude.clone(),
            references,
        );

        let documentation = &self.config.documentation;

        let mut info = Info::default();
        if let Some(overrides) = &documentation.info {
            if let Some(title) = &overrides.title {
                info.title = title.clone();
            }
            if let Some(description) = &overrides.description {
                info.description = Some(description.clone());
            }
            if let Some(version) = &overrides.version {
                info.version = version.clone();
            }
            info.extra.extend(overrides.extra.clone());
        }

        // Caller tags survive unless they name an excluded tag.
        let tags = documentation
            .tags
            .iter()
            .filter(|tag| !self.config.exclude.tags.contains(&tag.name))
            .cloned()
            .collect();

        // Caller-supplied path items and schemas win on key collision.
        let mut paths = output.paths;
        for (path, item) in documentation.paths.clone() {
            paths.insert(path, item);
        }

        let mut schemas = output.schemas;
        let mut components_extra = BTreeMap::new();
        if let Some(components) = &documentation.components {
            components_extra = components.extra.clone();
            for (name, schema) in components.schemas.clone() {
                schemas.insert(name, schema);
            }
        }
        let components = if schemas.is_empty() && components_extra.is_empty() {
            None
        } else {
            Some(Components {
                schemas,
                extra: components_extra,
            })
        };

        OpenApiDocument {
            openapi: OPENAPI_VERSION.to_string(),
            info,
            tags,
            paths,
            components,
            extra: documentation.extra.clone(),
        }
    }
}
