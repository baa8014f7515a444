//! openapi-from-routes - OpenAPI 3.0 documents from live route tables and
//! mined type declarations.
//!
//! This library turns a host web framework's route registry into a complete
//! OpenAPI document. Routes carry validation schemas and free-form metadata;
//! the collector converts them into `paths` operations and copies the host's
//! named schemas into `components.schemas`. Where routes carry no schemas,
//! a reference table mined from TypeScript type declarations can fill the
//! gaps.
//!
//! # Architecture
//!
//! The library is organized into modules that work together:
//!
//! 1. [`route`] - Route table data model and the host boundary traits
//! 2. [`schema`] - Structural schema model and the named-schema registry
//! 3. [`paths`] - Path pattern rewriting and operation id derivation
//! 4. [`collector`] - Converts route descriptors into OpenAPI operations
//! 5. [`document`] - The OpenAPI 3.0 document model
//! 6. [`config`] - Service configuration: exclusions, overrides, references
//! 7. [`service`] - Cached document assembly for the host's endpoint
//! 8. [`miner`] - Runs the external type-checker and locates declarations
//! 9. [`typeparse`] - Parses declaration text into a reference table
//! 10. [`serializer`] - Serializes documents and tables to YAML or JSON
//!
//! # Example Usage
//!
//! ```no_run
//! use openapi_from_routes::{
//!     config::OpenApiConfig,
//!     route::RouteDescriptor,
//!     schema::NoSchemas,
//!     service::OpenApiService,
//! };
//!
//! // The host exposes its route table through `RouteSource`; a plain
//! // Vec works for static tables.
//! let routes = vec![
//!     RouteDescriptor::new("GET", "/user/:id"),
//!     RouteDescriptor::new("POST", "/user"),
//! ];
//!
//! let service = OpenApiService::new(OpenApiConfig::default());
//! let document = service.document(&routes, &NoSchemas);
//! println!("{}", serde_json::to_string_pretty(&*document).unwrap());
//! ```
//!
//! Reference tables mined ahead of time plug in through the configuration:
//!
//! ```no_run
//! use openapi_from_routes::config::OpenApiConfig;
//! use openapi_from_routes::miner::{mine_route_types, MinerOptions};
//! use openapi_from_routes::route::ReferenceSource;
//!
//! let options = MinerOptions::new("./src/index.ts");
//! let mut config = OpenApiConfig::default();
//! config.references.push(ReferenceSource::Producer(Box::new(move || {
//!     mine_route_types(&options)
//! })));
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which runs the mining
//! pipeline standalone.

pub mod cli;
pub mod collector;
pub mod config;
pub mod document;
pub mod error;
pub mod miner;
pub mod paths;
pub mod route;
pub mod schema;
pub mod serializer;
pub mod service;
pub mod typeparse;
