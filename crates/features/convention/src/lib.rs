//! # Convention Engine
//!
//! Derives REST routes, HTTP verbs and parameter binding sources from the names and
//! annotations of service types, so application services can be exposed over HTTP
//! without hand-written controllers.
//!
//! ## Pipeline
//!
//! 1.  **Type filter ([`filter`]):** keeps the modules whose name matches the configured
//!     prefix and yields their types as candidates.
//! 2.  **Eligibility classifier ([`classifier`]):** keeps public, concrete types that
//!     implement the enable marker or carry an opt-in annotation.
//! 3.  **Route synthesizer ([`synthesizer`]):** resource name from the type name, verb and
//!     REST name from each method name ([`naming`]), selectors assembled into
//!     `{prefix}/{area}/{resource}/{action}` templates ([`route`]) and cleaned of vacuous
//!     entries ([`sanitizer`]).
//! 4.  **Binding inferencer ([`binding`]):** complex parameters of write actions bind from
//!     the request body.
//!
//! The whole pipeline is pure and synchronous. Run it once at startup through
//! [`ConventionEngine`] and hand the resulting [`RouteTable`] to the router.
//!
//! ```
//! use autoapi_convention::{ConventionConfig, ConventionEngine};
//! use autoapi_domain::inventory::{Annotation, MethodDescriptor, ModuleDescriptor, TypeDescriptor};
//!
//! let mut ty = TypeDescriptor::new("OrderAppService");
//! ty.annotations.push(Annotation::AutoApi { version: String::new() });
//! ty.methods.push(MethodDescriptor::new("GetListAsync"));
//! let modules = [ModuleDescriptor { name: "Acme.Orders".into(), types: vec![ty] }];
//!
//! let engine = ConventionEngine::new(ConventionConfig::builder().build()?);
//! let table = engine.run(&modules)?;
//! let route = table.routes().next().expect("one route");
//! assert_eq!(route.template.as_str(), "api/Order/List");
//! # Ok::<(), autoapi_convention::ConventionError>(())
//! ```

pub mod binding;
pub mod classifier;
pub mod config;
pub mod engine;
mod error;
pub mod filter;
pub mod model;
pub mod naming;
pub mod route;
pub mod sanitizer;
pub mod synthesizer;

pub use crate::classifier::{Eligibility, classify};
pub use crate::config::{ConventionConfig, ConventionConfigBuilder};
pub use crate::engine::{ConventionEngine, apply};
pub use crate::error::{ConventionError, ConventionErrorExt};
pub use crate::model::{
    ActionDescriptor, ApiExplorer, ParameterDescriptor, Route, RouteTable, ServiceDescriptor,
};
pub use crate::route::RouteTemplate;
