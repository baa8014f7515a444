//! The schema collector: turns the live route table into the `paths` and
//! `components.schemas` sections of an OpenAPI document.
//!
//! Routes are processed in table order. Reference tables fill hook slots the
//! live route left empty, then each route is rendered into one operation per
//! concrete path variant. Malformed schema shapes are skipped at the
//! smallest granularity (a single parameter, a single response status)
//! rather than failing the build.

use crate::config::ExcludeConfig;
use crate::document::{
    MediaType, Operation, Parameter, PathItem, RequestBody, Response, ALL_METHODS,
};
use crate::paths::{convert_path_format, expand_optional_path, loose_path, operation_id};
use crate::route::{ReferenceTable, ResponseHook, RouteDescriptor, RouteSource, ValidationHooks};
use crate::schema::{Schema, SchemaHandle, SchemaRegistry, SchemaType};
use log::debug;
use std::collections::BTreeMap;

/// The media types a body schema is published under when the route declares
/// no content-type parsers.
const DEFAULT_BODY_MEDIA_TYPES: [&str; 3] = [
    "application/json",
    "application/x-www-form-urlencoded",
    "multipart/form-data",
];

/// Output of a collection pass.
#[derive(Debug, Clone)]
pub struct CollectorOutput {
    /// Paths keyed by OpenAPI-formatted path, then lowercase method
    pub paths: BTreeMap<String, PathItem>,
    /// The host's named-schema registry, copied as-is
    pub schemas: BTreeMap<String, Schema>,
}

/// Walks a route table and assembles OpenAPI path items.
pub struct SchemaCollector {
    exclude: ExcludeConfig,
    references: Vec<ReferenceTable>,
    paths: BTreeMap<String, PathItem>,
}

impl SchemaCollector {
    /// Create a collector with the given exclusion filters and
    /// already-evaluated reference tables.
    pub fn new(exclude: ExcludeConfig, references: Vec<ReferenceTable>) -> Self {
        Self {
            exclude,
            references,
            paths: BTreeMap::new(),
        }
    }

    /// Run a full collection pass over a route source.
    pub fn collect(
        routes: &dyn RouteSource,
        registry: &dyn SchemaRegistry,
        exclude: ExcludeConfig,
        references: Vec<ReferenceTable>,
    ) -> CollectorOutput {
        let mut collector = Self::new(exclude, references);
        for route in routes.routes() {
            collector.add_route(&route);
        }
        collector.finish(registry)
    }

    /// Add one route to the document, applying exclusion filters and
    /// reference fallback.
    pub fn add_route(&mut self, route: &RouteDescriptor) {
        if route.metadata.hidden {
            debug!("Skipping hidden route: {} {}", route.method, route.path);
            return;
        }

        let method = route.method.to_lowercase();

        if (self.exclude.static_files && route.path.contains('.'))
            || self.exclude.paths.contains(&route.path)
            || self.exclude.excludes_method(&method)
            || self.exclude.excludes_tags(&route.metadata.tags)
        {
            debug!("Skipping excluded route: {} {}", route.method, route.path);
            return;
        }

        let mut hooks = route.hooks.clone();
        self.apply_references(&route.path, &method, &mut hooks);

        let mut operation = Operation {
            tags: route.metadata.tags.clone(),
            summary: route.metadata.summary.clone(),
            description: route.metadata.description.clone(),
            extra: route.metadata.extra.clone(),
            ..Operation::default()
        };

        let parameters = build_parameters(&hooks);
        if !parameters.is_empty() {
            operation.parameters = Some(parameters);
        }

        if method != "get" && method != "head" {
            operation.request_body = build_request_body(&hooks);
        }

        operation.responses = build_responses(hooks.response.as_ref());

        // One concrete path per optional-segment combination; each gets its
        // own operationId derived from the pre-rewrite path text.
        for possible in expand_optional_path(&route.path) {
            let id = operation_id(&route.method, &possible);
            let formatted = convert_path_format(&possible);
            let item = self.paths.entry(formatted).or_default();

            if method == "all" {
                for standard in ALL_METHODS {
                    item.insert(
                        standard.to_string(),
                        Operation {
                            operation_id: Some(id.clone()),
                            ..operation.clone()
                        },
                    );
                }
            } else {
                item.insert(
                    method.clone(),
                    Operation {
                        operation_id: Some(id),
                        ..operation.clone()
                    },
                );
            }
        }
    }

    /// Finish the pass, attaching the named-schema registry.
    pub fn finish(self, registry: &dyn SchemaRegistry) -> CollectorOutput {
        CollectorOutput {
            paths: self.paths,
            schemas: registry.schemas(),
        }
    }

    /// Fill empty hook slots from the configured reference tables, in
    /// order. A slot already populated by the live route is never replaced,
    /// and later tables never override an earlier match.
    fn apply_references(&self, path: &str, method: &str, hooks: &mut ValidationHooks) {
        for table in &self.references {
            let bundle = table
                .get(path)
                .and_then(|methods| methods.get(method))
                .or_else(|| {
                    table
                        .get(&loose_path(path))
                        .and_then(|methods| methods.get(method))
                });

            let Some(refer) = bundle else { continue };

            adopt(&mut hooks.body, refer.body.as_ref());
            adopt(&mut hooks.query, refer.query.as_ref());
            adopt(&mut hooks.params, refer.params.as_ref());
            adopt(&mut hooks.headers, refer.headers.as_ref());

            if let Some(statuses) = &refer.response {
                merge_response_statuses(&mut hooks.response, statuses);
            }
        }
    }
}

/// Adopt a reference schema into an empty hook slot, if it is structurally
/// usable.
fn adopt(slot: &mut Option<SchemaHandle>, candidate: Option<&Schema>) {
    if slot.is_some() {
        return;
    }
    if let Some(schema) = candidate {
        if schema.is_concrete() {
            *slot = Some(SchemaHandle::Inline(schema.clone()));
        }
    }
}

/// Merge mined per-status response schemas into the route's response hook,
/// only filling statuses the route did not declare itself. A route whose
/// response is a single schema keeps it untouched.
fn merge_response_statuses(hook: &mut Option<ResponseHook>, statuses: &BTreeMap<String, Schema>) {
    if matches!(hook, Some(ResponseHook::Single(_))) {
        return;
    }
    if hook.is_none() {
        *hook = Some(ResponseHook::ByStatus(BTreeMap::new()));
    }
    let Some(ResponseHook::ByStatus(map)) = hook else {
        return;
    };

    for (status, schema) in statuses {
        if schema.is_concrete() && !map.contains_key(status) {
            map.insert(status.clone(), SchemaHandle::Inline(schema.clone()));
        }
    }

    if map.is_empty() {
        *hook = None;
    }
}

/// Explode object-shaped hooks into one parameter per property. Named
/// references and non-object schemas contribute nothing.
fn build_parameters(hooks: &ValidationHooks) -> Vec<Parameter> {
    let located = [
        (&hooks.params, "path"),
        (&hooks.query, "query"),
        (&hooks.headers, "header"),
        (&hooks.cookie, "cookie"),
    ];

    let mut parameters = Vec::new();

    for (slot, location) in located {
        let Some(handle) = slot else { continue };
        let schema = handle.to_schema();

        if schema.schema_type != Some(SchemaType::Object) {
            continue;
        }
        let Some(properties) = &schema.properties else {
            continue;
        };

        for (name, property) in properties {
            // Path parameters are required by definition; everything else
            // follows the schema's required list.
            let required = location == "path" || schema.requires(name);
            parameters.push(Parameter {
                name: name.clone(),
                location: location.to_string(),
                required,
                schema: property.clone(),
            });
        }
    }

    parameters
}

/// Render the body hook under its declared content types, or the default
/// trio when the route declares no parsers. Unrecognized parser tokens are
/// skipped.
fn build_request_body(hooks: &ValidationHooks) -> Option<RequestBody> {
    let body = hooks.body.as_ref()?;
    let schema = body.to_schema();
    let mut content = BTreeMap::new();

    if hooks.parsers.is_empty() {
        for media in DEFAULT_BODY_MEDIA_TYPES {
            content.insert(
                media.to_string(),
                MediaType {
                    schema: schema.clone(),
                },
            );
        }
    } else {
        for parser in &hooks.parsers {
            if let Some(media) = media_type_for_parser(parser) {
                content.insert(
                    media.to_string(),
                    MediaType {
                        schema: schema.clone(),
                    },
                );
            }
        }
    }

    // Every declared parser unrecognized: a request body with an empty
    // content map is not a valid document shape, so emit none at all.
    if content.is_empty() {
        return None;
    }

    Some(RequestBody {
        required: true,
        content,
    })
}

fn media_type_for_parser(parser: &str) -> Option<&'static str> {
    match parser {
        "text" | "text/plain" => Some("text/plain"),
        "urlencoded" | "application/x-www-form-urlencoded" => {
            Some("application/x-www-form-urlencoded")
        }
        "json" | "application/json" => Some("application/json"),
        "formdata" | "multipart/form-data" => Some("multipart/form-data"),
        _ => None,
    }
}

/// Render the response hook. Per-status maps produce one response entry per
/// status; a single schema becomes the `200` response. Schemas typed void,
/// null or undefined signal "no body": their response carries no content
/// map, surfacing the schema's own description and metadata instead.
fn build_responses(hook: Option<&ResponseHook>) -> BTreeMap<String, Response> {
    let mut responses = BTreeMap::new();

    match hook {
        Some(ResponseHook::ByStatus(map)) => {
            for (status, handle) in map {
                let schema = handle.to_schema();
                let description = schema
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("Response for status {}", status));

                let response = if schema.is_bodyless() {
                    Response {
                        description,
                        content: None,
                        extra: schema.extra.clone(),
                    }
                } else {
                    let mut content = BTreeMap::new();
                    content.insert("application/json".to_string(), MediaType { schema });
                    Response {
                        description,
                        content: Some(content),
                        extra: BTreeMap::new(),
                    }
                };

                responses.insert(status.clone(), response);
            }
        }
        Some(ResponseHook::Single(handle)) => {
            let mut content = BTreeMap::new();
            content.insert(
                "application/json".to_string(),
                MediaType {
                    schema: handle.to_schema(),
                },
            );
            responses.insert(
                "200".to_string(),
                Response {
                    description: "Successful response".to_string(),
                    content: Some(content),
                    extra: BTreeMap::new(),
                },
            );
        }
        None => {}
    }

    responses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteSchemas;
    use crate::schema::NoSchemas;
    use std::collections::BTreeMap;

    fn object_schema(fields: &[(&str, SchemaType)], required: &[&str]) -> Schema {
        let properties = fields
            .iter()
            .map(|(name, t)| (name.to_string(), Schema::of(*t)))
            .collect();
        Schema::object(properties, required.iter().map(|s| s.to_string()).collect())
    }

    fn collect_one(route: RouteDescriptor) -> CollectorOutput {
        SchemaCollector::collect(
            &vec![route],
            &NoSchemas,
            ExcludeConfig::default(),
            Vec::new(),
        )
    }

    #[test]
    fn test_simple_get_route() {
        let output = collect_one(RouteDescriptor::new("GET", "/users"));
        assert_eq!(output.paths.len(), 1);
        let operation = &output.paths["/users"]["get"];
        assert_eq!(operation.operation_id, Some("getUsers".to_string()));
        assert!(operation.request_body.is_none());
    }

    #[test]
    fn test_hidden_route_is_skipped() {
        let mut hidden = RouteDescriptor::new("GET", "/secret");
        hidden.metadata.hidden = true;

        let output = SchemaCollector::collect(
            &vec![hidden, RouteDescriptor::new("GET", "/visible")],
            &NoSchemas,
            ExcludeConfig::default(),
            Vec::new(),
        );

        assert!(!output.paths.contains_key("/secret"));
        assert!(output.paths.contains_key("/visible"));
    }

    #[test]
    fn test_options_method_excluded_by_default() {
        let output = collect_one(RouteDescriptor::new("OPTIONS", "/users"));
        assert!(output.paths.is_empty());
    }

    #[test]
    fn test_static_file_exclusion_toggle() {
        let route = RouteDescriptor::new("GET", "/assets/logo.png");

        let excluded = collect_one(route.clone());
        assert!(excluded.paths.is_empty());

        let included = SchemaCollector::collect(
            &vec![route],
            &NoSchemas,
            ExcludeConfig {
                static_files: false,
                ..ExcludeConfig::default()
            },
            Vec::new(),
        );
        assert!(included.paths.contains_key("/assets/logo.png"));
    }

    #[test]
    fn test_excluded_tag_drops_route() {
        let mut route = RouteDescriptor::new("GET", "/admin");
        route.metadata.tags = vec!["internal".to_string()];

        let output = SchemaCollector::collect(
            &vec![route],
            &NoSchemas,
            ExcludeConfig {
                tags: vec!["internal".to_string()],
                ..ExcludeConfig::default()
            },
            Vec::new(),
        );
        assert!(output.paths.is_empty());
    }

    #[test]
    fn test_path_parameters_always_required() {
        let mut route = RouteDescriptor::new("GET", "/users/:id");
        route.hooks.params = Some(SchemaHandle::Inline(object_schema(
            &[("id", SchemaType::String)],
            &[],
        )));

        let output = collect_one(route);
        let operation = &output.paths["/users/{id}"]["get"];
        let parameters = operation.parameters.as_ref().unwrap();
        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters[0].name, "id");
        assert_eq!(parameters[0].location, "path");
        assert!(parameters[0].required);
    }

    #[test]
    fn test_query_parameters_follow_required_list() {
        let mut route = RouteDescriptor::new("GET", "/search");
        route.hooks.query = Some(SchemaHandle::Inline(object_schema(
            &[("q", SchemaType::String), ("page", SchemaType::Integer)],
            &["q"],
        )));

        let output = collect_one(route);
        let parameters = output.paths["/search"]["get"]
            .parameters
            .clone()
            .unwrap();

        let q = parameters.iter().find(|p| p.name == "q").unwrap();
        let page = parameters.iter().find(|p| p.name == "page").unwrap();
        assert!(q.required);
        assert!(!page.required);
        assert_eq!(q.location, "query");
    }

    #[test]
    fn test_named_reference_hook_emits_no_parameters() {
        let mut route = RouteDescriptor::new("GET", "/users");
        route.hooks.query = Some(SchemaHandle::Named("UserQuery".to_string()));

        let output = collect_one(route);
        assert!(output.paths["/users"]["get"].parameters.is_none());
    }

    #[test]
    fn test_post_body_is_required() {
        let mut route = RouteDescriptor::new("POST", "/users");
        route.hooks.body = Some(SchemaHandle::Inline(object_schema(
            &[("name", SchemaType::String)],
            &["name"],
        )));

        let output = collect_one(route);
        let body = output.paths["/users"]["post"]
            .request_body
            .as_ref()
            .unwrap();
        assert!(body.required);
        // No parsers declared: all three default media types.
        assert_eq!(body.content.len(), 3);
        assert!(body.content.contains_key("application/json"));
        assert!(body.content.contains_key("application/x-www-form-urlencoded"));
        assert!(body.content.contains_key("multipart/form-data"));
    }

    #[test]
    fn test_get_route_never_has_request_body() {
        let mut route = RouteDescriptor::new("GET", "/users");
        route.hooks.body = Some(SchemaHandle::Inline(Schema::of(SchemaType::Object)));

        let output = collect_one(route);
        assert!(output.paths["/users"]["get"].request_body.is_none());
    }

    #[test]
    fn test_parser_tokens_select_media_types() {
        let mut route = RouteDescriptor::new("POST", "/upload");
        route.hooks.body = Some(SchemaHandle::Inline(Schema::of(SchemaType::Object)));
        route.hooks.parsers = vec!["formdata".to_string(), "bogus".to_string()];

        let output = collect_one(route);
        let body = output.paths["/upload"]["post"]
            .request_body
            .as_ref()
            .unwrap();
        assert_eq!(body.content.len(), 1);
        assert!(body.content.contains_key("multipart/form-data"));
    }

    #[test]
    fn test_only_unrecognized_parsers_drops_request_body() {
        let mut route = RouteDescriptor::new("POST", "/upload");
        route.hooks.body = Some(SchemaHandle::Inline(Schema::of(SchemaType::Object)));
        route.hooks.parsers = vec!["custom/binary".to_string()];

        let output = collect_one(route);
        assert!(output.paths["/upload"]["post"].request_body.is_none());
    }

    #[test]
    fn test_body_named_reference_becomes_ref() {
        let mut route = RouteDescriptor::new("POST", "/users");
        route.hooks.body = Some(SchemaHandle::Named("CreateUser".to_string()));

        let output = collect_one(route);
        let body = output.paths["/users"]["post"]
            .request_body
            .as_ref()
            .unwrap();
        assert_eq!(
            body.content["application/json"].schema.reference,
            Some("#/components/schemas/CreateUser".to_string())
        );
    }

    #[test]
    fn test_single_response_becomes_200() {
        let mut route = RouteDescriptor::new("GET", "/users");
        route.hooks.response = Some(ResponseHook::Single(SchemaHandle::Inline(Schema::of(
            SchemaType::Object,
        ))));

        let output = collect_one(route);
        let response = &output.paths["/users"]["get"].responses["200"];
        assert_eq!(response.description, "Successful response");
        assert!(response.content.as_ref().unwrap().contains_key("application/json"));
    }

    #[test]
    fn test_per_status_responses() {
        let mut statuses = BTreeMap::new();
        statuses.insert(
            "200".to_string(),
            SchemaHandle::Inline(Schema::of(SchemaType::Object)),
        );
        statuses.insert(
            "404".to_string(),
            SchemaHandle::Inline(Schema::of(SchemaType::String)),
        );

        let mut route = RouteDescriptor::new("GET", "/users/:id");
        route.hooks.response = Some(ResponseHook::ByStatus(statuses));

        let output = collect_one(route);
        let responses = &output.paths["/users/{id}"]["get"].responses;
        assert_eq!(responses.len(), 2);
        assert_eq!(responses["404"].description, "Response for status 404");
    }

    #[test]
    fn test_void_204_response_has_no_content() {
        let mut void_schema = Schema::of(SchemaType::Void);
        void_schema.description = Some("No content".to_string());

        let mut statuses = BTreeMap::new();
        statuses.insert("204".to_string(), SchemaHandle::Inline(void_schema));

        let mut route = RouteDescriptor::new("DELETE", "/users/:id");
        route.hooks.response = Some(ResponseHook::ByStatus(statuses));

        let output = collect_one(route);
        let response = &output.paths["/users/{id}"]["delete"].responses["204"];
        assert!(response.content.is_none());
        assert_eq!(response.description, "No content");
    }

    #[test]
    fn test_response_schema_description_wins() {
        let mut schema = Schema::of(SchemaType::Object);
        schema.description = Some("The user".to_string());

        let mut statuses = BTreeMap::new();
        statuses.insert("200".to_string(), SchemaHandle::Inline(schema));

        let mut route = RouteDescriptor::new("GET", "/users/:id");
        route.hooks.response = Some(ResponseHook::ByStatus(statuses));

        let output = collect_one(route);
        let response = &output.paths["/users/{id}"]["get"].responses["200"];
        assert_eq!(response.description, "The user");
        assert!(response.content.is_some());
    }

    #[test]
    fn test_all_method_expands_to_eight() {
        let output = collect_one(RouteDescriptor::new("ALL", "/all"));
        let item = &output.paths["/all"];
        assert_eq!(item.len(), 8);
        for method in ALL_METHODS {
            assert!(item.contains_key(method), "missing {}", method);
        }
        assert_eq!(
            item["trace"].operation_id,
            Some("allAll".to_string())
        );
    }

    #[test]
    fn test_optional_path_expansion_produces_variants() {
        let output = collect_one(RouteDescriptor::new("GET", "/user/:user?/name/:name?"));
        let keys: Vec<&String> = output.paths.keys().collect();
        assert_eq!(keys.len(), 4);
        assert!(output.paths.contains_key("/user/{user}/name/{name}"));
        assert!(output.paths.contains_key("/user/name/{name}"));
        assert!(output.paths.contains_key("/user/name"));
        assert!(output.paths.contains_key("/user/{user}/name"));

        assert_eq!(
            output.paths["/user/name"]["get"].operation_id,
            Some("getUserName".to_string())
        );
        assert_eq!(
            output.paths["/user/{user}/name/{name}"]["get"].operation_id,
            Some("getUserByUserNameByName".to_string())
        );
    }

    #[test]
    fn test_reference_fills_empty_slot_only() {
        let mut own_body = Schema::of(SchemaType::Object);
        own_body.description = Some("live".to_string());

        let mut route = RouteDescriptor::new("POST", "/users");
        route.hooks.body = Some(SchemaHandle::Inline(own_body));

        let mut mined = RouteSchemas::default();
        let mut mined_body = Schema::of(SchemaType::Object);
        mined_body.description = Some("mined".to_string());
        mined.body = Some(mined_body);
        mined.query = Some(object_schema(&[("page", SchemaType::Integer)], &[]));

        let mut table = ReferenceTable::new();
        table
            .entry("/users".to_string())
            .or_default()
            .insert("post".to_string(), mined);

        let output = SchemaCollector::collect(
            &vec![route],
            &NoSchemas,
            ExcludeConfig::default(),
            vec![table],
        );

        let operation = &output.paths["/users"]["post"];
        // Body kept from the live route, query adopted from the reference.
        let body = operation.request_body.as_ref().unwrap();
        assert_eq!(
            body.content["application/json"].schema.description,
            Some("live".to_string())
        );
        assert!(operation.parameters.is_some());
    }

    #[test]
    fn test_reference_loose_path_fallback() {
        let mut mined = RouteSchemas::default();
        mined.params = Some(object_schema(&[("id", SchemaType::String)], &[]));

        let mut table = ReferenceTable::new();
        table
            .entry("/users/:id/".to_string())
            .or_default()
            .insert("get".to_string(), mined);

        let output = SchemaCollector::collect(
            &vec![RouteDescriptor::new("GET", "/users/:id")],
            &NoSchemas,
            ExcludeConfig::default(),
            vec![table],
        );

        assert!(output.paths["/users/{id}"]["get"].parameters.is_some());
    }

    #[test]
    fn test_reference_response_fills_missing_statuses() {
        let mut own = BTreeMap::new();
        let mut live_schema = Schema::of(SchemaType::Object);
        live_schema.description = Some("live".to_string());
        own.insert("200".to_string(), SchemaHandle::Inline(live_schema));

        let mut route = RouteDescriptor::new("GET", "/users");
        route.hooks.response = Some(ResponseHook::ByStatus(own));

        let mut mined = RouteSchemas::default();
        let mut mined_statuses = BTreeMap::new();
        let mut mined_200 = Schema::of(SchemaType::String);
        mined_200.description = Some("mined".to_string());
        mined_statuses.insert("200".to_string(), mined_200);
        mined_statuses.insert("404".to_string(), Schema::of(SchemaType::String));
        mined.response = Some(mined_statuses);

        let mut table = ReferenceTable::new();
        table
            .entry("/users".to_string())
            .or_default()
            .insert("get".to_string(), mined);

        let output = SchemaCollector::collect(
            &vec![route],
            &NoSchemas,
            ExcludeConfig::default(),
            vec![table],
        );

        let responses = &output.paths["/users"]["get"].responses;
        assert_eq!(responses.len(), 2);
        // The live 200 wins; the mined 404 is adopted.
        assert_eq!(responses["200"].description, "live");
        assert!(responses.contains_key("404"));
    }

    #[test]
    fn test_first_reference_table_wins() {
        let mut first = RouteSchemas::default();
        let mut first_query = object_schema(&[("a", SchemaType::String)], &[]);
        first_query.description = Some("first".to_string());
        first.query = Some(first_query);

        let mut second = RouteSchemas::default();
        let mut second_query = object_schema(&[("b", SchemaType::String)], &[]);
        second_query.description = Some("second".to_string());
        second.query = Some(second_query);

        let mut table_one = ReferenceTable::new();
        table_one
            .entry("/users".to_string())
            .or_default()
            .insert("get".to_string(), first);
        let mut table_two = ReferenceTable::new();
        table_two
            .entry("/users".to_string())
            .or_default()
            .insert("get".to_string(), second);

        let output = SchemaCollector::collect(
            &vec![RouteDescriptor::new("GET", "/users")],
            &NoSchemas,
            ExcludeConfig::default(),
            vec![table_one, table_two],
        );

        let parameters = output.paths["/users"]["get"].parameters.as_ref().unwrap();
        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters[0].name, "a");
    }

    #[test]
    fn test_non_concrete_reference_schema_skipped() {
        let mut mined = RouteSchemas::default();
        mined.body = Some(Schema::default());

        let mut table = ReferenceTable::new();
        table
            .entry("/users".to_string())
            .or_default()
            .insert("post".to_string(), mined);

        let output = SchemaCollector::collect(
            &vec![RouteDescriptor::new("POST", "/users")],
            &NoSchemas,
            ExcludeConfig::default(),
            vec![table],
        );

        assert!(output.paths["/users"]["post"].request_body.is_none());
    }

    #[test]
    fn test_registry_copied_into_components() {
        let mut registry = BTreeMap::new();
        registry.insert("User".to_string(), Schema::of(SchemaType::Object));

        let output = SchemaCollector::collect(
            &vec![RouteDescriptor::new("GET", "/users")],
            &registry,
            ExcludeConfig::default(),
            Vec::new(),
        );

        assert!(output.schemas.contains_key("User"));
    }

    #[test]
    fn test_metadata_passthrough_into_operation() {
        let mut route = RouteDescriptor::new("GET", "/users");
        route.metadata.summary = Some("List users".to_string());
        route.metadata.tags = vec!["user".to_string()];
        route
            .metadata
            .extra
            .insert("deprecated".to_string(), serde_json::json!(true));

        let output = collect_one(route);
        let operation = &output.paths["/users"]["get"];
        assert_eq!(operation.summary, Some("List users".to_string()));
        assert_eq!(operation.tags, vec!["user".to_string()]);
        assert_eq!(operation.extra["deprecated"], serde_json::json!(true));
    }
}
