//! Engine output: the derived services, actions, parameters and the flattened route list.

use crate::classifier::Eligibility;
use crate::route::RouteTemplate;
use autoapi_domain::http::{BindingSource, HttpMethod, Selector};
use autoapi_domain::inventory::TypeRef;
use serde::Serialize;

/// API-explorer metadata attached to services and actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiExplorer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    pub visible: bool,
}

/// One participating service type after synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    pub module: String,
    pub type_name: String,
    pub resource_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Why the service takes part: the enable marker or an explicit opt-in.
    pub eligibility: Eligibility,
    pub explorer: ApiExplorer,
    /// Sanitized service-level selectors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selectors: Vec<Selector>,
    pub actions: Vec<ActionDescriptor>,
}

impl ServiceDescriptor {
    /// Whether the host configured a routed selector on the service itself.
    #[must_use]
    pub fn has_explicit_route(&self) -> bool {
        self.selectors.iter().any(|s| s.route().is_some())
    }
}

/// One method of a service after synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub method_name: String,
    /// Path segment derived from the method name; empty maps to the resource root.
    pub rest_name: String,
    /// Verb resolved from the leading word; `None` when synthesis did not run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<HttpMethod>,
    pub opted_out: bool,
    pub explorer: ApiExplorer,
    pub selectors: Vec<Selector>,
    pub parameters: Vec<ParameterDescriptor>,
}

impl ActionDescriptor {
    /// Whether the engine assigned the route templates of this action.
    #[must_use]
    pub const fn is_synthesized(&self) -> bool {
        self.http_method.is_some()
    }
}

/// Binding decision for one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Set by the host; never overridden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<BindingSource>,
    /// Computed by the engine, only when `binding` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inferred: Option<BindingSource>,
}

impl ParameterDescriptor {
    /// The binding in force: explicit first, then inferred. `None` leaves the host default.
    #[must_use]
    pub fn effective_binding(&self) -> Option<BindingSource> {
        self.binding.or(self.inferred)
    }
}

/// A single dispatchable route, flattened out of a [`RouteTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route<'a> {
    /// Empty means the route accepts any method.
    pub methods: Vec<HttpMethod>,
    pub template: RouteTemplate,
    pub service: &'a str,
    pub action: &'a str,
}

/// The complete result of one engine run, in inventory order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTable {
    pub services: Vec<ServiceDescriptor>,
}

impl RouteTable {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    #[must_use]
    pub fn action_count(&self) -> usize {
        self.services.iter().map(|s| s.actions.len()).sum()
    }

    /// Every routed action selector, combined with service-level routes where present.
    pub fn routes(&self) -> impl Iterator<Item = Route<'_>> {
        self.services.iter().flat_map(|service| {
            service.actions.iter().flat_map(move |action| {
                action.selectors.iter().flat_map(move |selector| {
                    route_templates(service, action, selector).into_iter().map(move |template| Route {
                        methods: selector.http_methods().collect(),
                        template,
                        service: &service.type_name,
                        action: &action.method_name,
                    })
                })
            })
        })
    }
}

fn route_templates(
    service: &ServiceDescriptor,
    action: &ActionDescriptor,
    selector: &Selector,
) -> Vec<RouteTemplate> {
    let service_routes: Vec<_> = service.selectors.iter().filter_map(Selector::route).collect();
    // Engine-set templates are final; an empty one is the root route.
    let own = if action.is_synthesized() { selector.template.as_deref() } else { selector.route() };
    match (service_routes.is_empty(), own) {
        (true, Some(route)) => vec![RouteTemplate::parse(route)],
        (true, None) => Vec::new(),
        (false, route) => service_routes
            .into_iter()
            .map(|base| RouteTemplate::parse(base).combine(route.unwrap_or_default()))
            .collect(),
    }
}
