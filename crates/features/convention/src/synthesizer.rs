//! # Route Synthesizer
//!
//! Turns an eligible [`TypeDescriptor`] into a [`ServiceDescriptor`]:
//!
//! 1. Resource name: the type name with the first matching service postfix removed.
//! 2. Area: the service's own `Area` annotation, else the opt-in version, else the
//!    configured default, else none.
//! 3. Per action: verb from the leading word, REST name from the postfix- and
//!    verb-stripped method name, then either a fresh selector or the explicit
//!    selectors rebased onto the service route.
//! 4. Parameter bindings, once the selectors are final.
//!
//! Services whose own selectors carry a route skip step 3 entirely.

use crate::binding::infer_bindings;
use crate::classifier::{Eligibility, find_annotation};
use crate::config::ConventionConfig;
use crate::error::{ConventionError, ConventionErrorExt};
use crate::model::{ActionDescriptor, ApiExplorer, ParameterDescriptor, ServiceDescriptor};
use crate::naming::{leading_word, require_identifier, right, strip_postfix};
use crate::route::RouteTemplate;
use crate::sanitizer::remove_vacuous;
use autoapi_domain::http::Selector;
use autoapi_domain::inventory::{
    Annotation, AnnotationKind, CapabilityNode, MethodDescriptor, ModuleDescriptor, TypeDescriptor,
};
use tracing::{debug, warn};

/// Route pieces shared by every action of one service.
#[derive(Debug)]
struct ServiceRoute<'a> {
    prefix: Option<&'a str>,
    area: Option<&'a str>,
    resource: &'a str,
}

impl ServiceRoute<'_> {
    fn template(&self, leaf: &str) -> RouteTemplate {
        RouteTemplate::from_segments([
            self.prefix.unwrap_or_default(),
            self.area.unwrap_or_default(),
            self.resource,
            leaf,
        ])
    }
}

/// Builds the service descriptor for a type [`classify`](crate::classifier::classify)
/// found eligible.
///
/// # Errors
/// Returns [`ConventionError::InvalidInput`] for blank type or method names, or when
/// `eligibility` does not admit the type.
pub fn synthesize_service(
    config: &ConventionConfig,
    module: &ModuleDescriptor,
    ty: &TypeDescriptor,
    eligibility: Eligibility,
) -> Result<ServiceDescriptor, ConventionError> {
    let type_name = require_identifier(&ty.name, "type name")?;
    if !eligibility.is_eligible() {
        return Err(ConventionError::invalid_input(format!(
            "{type_name} is not eligible ({eligibility})"
        )));
    }
    let resource_name = strip_postfix(type_name, config.service_postfixes())
        .context(format!("resource name of {type_name}"))?
        .to_owned();
    let area = service_area(config, ty);

    let mut selectors = ty.selectors.clone();
    remove_vacuous(&mut selectors);
    let explicit = selectors.iter().any(|s| s.route().is_some());
    if explicit {
        warn!(
            service = type_name,
            "Service carries an explicit route, action routes are left as configured"
        );
    }

    let route = ServiceRoute { prefix: config.api_prefix(), area: area.as_deref(), resource: &resource_name };
    let actions = ty
        .methods
        .iter()
        .map(|method| {
            let mut action = if explicit {
                passthrough_action(method, false)
            } else {
                synthesize_action(config, &route, method)
                    .context(format!("action {type_name}.{}", method.name))?
            };
            infer_bindings(config, &action.selectors, &mut action.parameters);
            Ok::<_, ConventionError>(action)
        })
        .collect::<Result<Vec<_>, ConventionError>>()?;

    let explorer = explorer_for(ty, Some(resource_name.as_str()));
    debug!(
        service = type_name,
        resource = %resource_name,
        area = area.as_deref().unwrap_or(""),
        actions = actions.len(),
        "Service synthesized"
    );

    Ok(ServiceDescriptor {
        module: module.name.clone(),
        type_name: type_name.to_owned(),
        resource_name,
        area,
        eligibility,
        explorer,
        selectors,
        actions,
    })
}

/// Derives the REST action name: action postfix removed, then a known leading verb word.
///
/// # Errors
/// Returns [`ConventionError::InvalidInput`] if the name cannot be cut as computed.
pub fn rest_action_name<'a>(
    config: &ConventionConfig,
    method_name: &'a str,
) -> Result<&'a str, ConventionError> {
    let stripped = strip_postfix(method_name, config.action_postfixes())?;
    let word = leading_word(stripped);
    if config.verb_for(word).is_none() {
        return Ok(stripped);
    }

    let remaining = stripped.chars().count().checked_sub(word.chars().count()).ok_or_else(|| {
        ConventionError::invalid_input(format!("verb '{word}' is longer than '{stripped}'"))
    })?;
    right(stripped, remaining)
}

fn synthesize_action(
    config: &ConventionConfig,
    route: &ServiceRoute<'_>,
    method: &MethodDescriptor,
) -> Result<ActionDescriptor, ConventionError> {
    let method_name = require_identifier(&method.name, "method name")?;
    if method.has_annotation(AnnotationKind::DisableApi) {
        debug!(action = method_name, "Action opted out");
        return Ok(passthrough_action(method, true));
    }

    let verb = config.resolve_verb(leading_word(method_name));
    let rest_name = rest_action_name(config, method_name)?;

    let mut selectors = method.selectors.clone();
    remove_vacuous(&mut selectors);
    if selectors.is_empty() {
        selectors.push(Selector::new(route.template(rest_name).into_string(), verb));
    } else {
        let base = route.template("");
        for selector in &mut selectors {
            let template = match selector.route() {
                Some(explicit) => base.combine(explicit),
                None => route.template(rest_name),
            };
            selector.template = Some(template.into_string());
        }
    }

    debug!(action = method_name, rest = rest_name, verb = %verb, "Action synthesized");
    Ok(ActionDescriptor {
        method_name: method_name.to_owned(),
        rest_name: rest_name.to_owned(),
        http_method: Some(verb),
        opted_out: false,
        explorer: explorer_for(method, None),
        selectors,
        parameters: parameters_of(method),
    })
}

/// An action whose selectors are kept as configured (only sanitized).
fn passthrough_action(method: &MethodDescriptor, opted_out: bool) -> ActionDescriptor {
    let mut selectors = method.selectors.clone();
    remove_vacuous(&mut selectors);
    ActionDescriptor {
        method_name: method.name.clone(),
        rest_name: method.name.clone(),
        http_method: None,
        opted_out,
        explorer: explorer_for(method, None),
        selectors,
        parameters: parameters_of(method),
    }
}

fn parameters_of(method: &MethodDescriptor) -> Vec<ParameterDescriptor> {
    method
        .parameters
        .iter()
        .map(|p| ParameterDescriptor {
            name: p.name.clone(),
            ty: p.ty.clone(),
            binding: p.binding,
            inferred: None,
        })
        .collect()
}

fn service_area(config: &ConventionConfig, ty: &TypeDescriptor) -> Option<String> {
    let own_area = match ty.own_annotation(AnnotationKind::Area) {
        Some(Annotation::Area { name }) => Some(name.as_str()),
        _ => None,
    };
    let version = match find_annotation(ty, AnnotationKind::AutoApi) {
        Some(Annotation::AutoApi { version }) => Some(version.as_str()),
        _ => None,
    };

    [own_area, version, config.default_area()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|area| !area.is_empty())
        .map(str::to_owned)
}

fn explorer_for(annotations: &impl Annotated, default_group: Option<&str>) -> ApiExplorer {
    let (group_name, visible) = match annotations.explorer_annotation() {
        Some(Annotation::ApiExplorer { group_name, visible }) => (group_name.clone(), *visible),
        _ => (None, None),
    };
    ApiExplorer {
        group_name: group_name
            .filter(|g| !g.is_empty())
            .or_else(|| default_group.map(str::to_owned)),
        visible: visible.unwrap_or(true),
    }
}

/// Direct (non-inherited) explorer annotation lookup for types and methods.
trait Annotated {
    fn explorer_annotation(&self) -> Option<&Annotation>;
}

impl Annotated for TypeDescriptor {
    fn explorer_annotation(&self) -> Option<&Annotation> {
        self.own_annotation(AnnotationKind::ApiExplorer)
    }
}

impl Annotated for MethodDescriptor {
    fn explorer_annotation(&self) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.kind() == AnnotationKind::ApiExplorer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoapi_domain::http::{ActionConstraint, BindingSource, HttpMethod};
    use autoapi_domain::inventory::{ParameterInfo, TypeRef};

    fn config() -> ConventionConfig {
        ConventionConfig::builder().build().unwrap()
    }

    fn module() -> ModuleDescriptor {
        ModuleDescriptor { name: "Acme.Orders".to_owned(), types: vec![] }
    }

    fn service(name: &str, methods: &[&str]) -> TypeDescriptor {
        let mut ty = TypeDescriptor::new(name);
        ty.methods = methods.iter().map(|m| MethodDescriptor::new(*m)).collect();
        ty
    }

    #[test]
    fn rest_names_follow_the_examples() {
        let config = config();
        assert_eq!(rest_action_name(&config, "GetUser").unwrap(), "User");
        assert_eq!(rest_action_name(&config, "CreateOrderAsync").unwrap(), "Order");
        assert_eq!(rest_action_name(&config, "Async").unwrap(), "");
        assert_eq!(rest_action_name(&config, "Delete").unwrap(), "");
        assert_eq!(rest_action_name(&config, "getById").unwrap(), "ById");
        assert_eq!(rest_action_name(&config, "Approve").unwrap(), "Approve");
        assert_eq!(rest_action_name(&config, "G").unwrap(), "G");
    }

    #[test]
    fn synthesized_selectors_use_prefix_area_resource_and_rest_name() {
        let ty = service("UserAppService", &["GetUser", "CreateOrderAsync", "Async", "Delete"]);
        let svc = synthesize_service(&config(), &module(), &ty, Eligibility::Marker).unwrap();

        assert_eq!(svc.resource_name, "User");
        assert_eq!(svc.area, None);
        let routes: Vec<_> = svc
            .actions
            .iter()
            .map(|a| (a.selectors[0].template.as_deref().unwrap(), a.http_method.unwrap()))
            .collect();
        assert_eq!(
            routes,
            [
                ("api/User/User", HttpMethod::Get),
                ("api/User/Order", HttpMethod::Post),
                ("api/User", HttpMethod::Post),
                ("api/User", HttpMethod::Delete),
            ]
        );
        assert_eq!(svc.actions[1].selectors[0].constraints, [ActionConstraint::http(HttpMethod::Post)]);
    }

    #[test]
    fn area_precedence() {
        let config = ConventionConfig::builder().default_area("v1").build().unwrap();

        let mut ty = service("OrderAppService", &["GetList"]);
        let svc = synthesize_service(&config, &module(), &ty, Eligibility::Marker).unwrap();
        assert_eq!(svc.area.as_deref(), Some("v1"));
        assert_eq!(svc.actions[0].selectors[0].template.as_deref(), Some("api/v1/Order/List"));

        ty.annotations.push(Annotation::AutoApi { version: "v3".to_owned() });
        let svc = synthesize_service(&config, &module(), &ty, Eligibility::Marker).unwrap();
        assert_eq!(svc.area.as_deref(), Some("v3"));

        ty.annotations.push(Annotation::Area { name: "admin".to_owned() });
        let svc = synthesize_service(&config, &module(), &ty, Eligibility::Marker).unwrap();
        assert_eq!(svc.area.as_deref(), Some("admin"));
        assert_eq!(svc.actions[0].selectors[0].template.as_deref(), Some("api/admin/Order/List"));
    }

    #[test]
    fn explicit_selectors_are_rebased_not_replaced() {
        let mut ty = service("OrderAppService", &["GetAsync"]);
        ty.methods[0].selectors = vec![
            Selector {
                template: Some("{id}".to_owned()),
                constraints: vec![ActionConstraint::http(HttpMethod::Get)],
            },
            Selector { template: None, constraints: vec![ActionConstraint::http(HttpMethod::Head)] },
            Selector { template: Some("/ping".to_owned()), constraints: vec![] },
            Selector::default(),
        ];

        let svc = synthesize_service(&config(), &module(), &ty, Eligibility::Marker).unwrap();
        let action = &svc.actions[0];
        assert_eq!(action.rest_name, "");
        assert_eq!(action.selectors.len(), 3);
        assert_eq!(action.selectors[0].template.as_deref(), Some("api/Order/{id}"));
        assert_eq!(action.selectors[0].constraints, [ActionConstraint::http(HttpMethod::Get)]);
        assert_eq!(action.selectors[1].template.as_deref(), Some("api/Order"));
        assert_eq!(action.selectors[1].constraints, [ActionConstraint::http(HttpMethod::Head)]);
        assert_eq!(action.selectors[2].template.as_deref(), Some("ping"));
        assert!(action.selectors[2].constraints.is_empty());
    }

    #[test]
    fn opted_out_action_is_skipped_alone() {
        let mut ty = service("OrderAppService", &["GetList", "Recalculate", "Delete"]);
        ty.methods[1].annotations.push(Annotation::DisableApi);
        ty.methods[1].selectors.push(Selector::default());

        let svc = synthesize_service(&config(), &module(), &ty, Eligibility::Marker).unwrap();
        assert_eq!(svc.actions.len(), 3);
        let skipped = &svc.actions[1];
        assert!(skipped.opted_out);
        assert_eq!(skipped.http_method, None);
        assert_eq!(skipped.rest_name, "Recalculate");
        assert!(skipped.selectors.is_empty());
        assert_eq!(svc.actions[2].selectors[0].template.as_deref(), Some("api/Order"));
    }

    #[test]
    fn explicit_service_route_suppresses_action_synthesis() {
        let mut ty = service("OrderAppService", &["GetList"]);
        ty.selectors = vec![Selector::default(), Selector { template: Some("orders".to_owned()), constraints: vec![] }];

        let svc = synthesize_service(&config(), &module(), &ty, Eligibility::Marker).unwrap();
        assert!(svc.has_explicit_route());
        assert_eq!(svc.selectors.len(), 1);
        assert_eq!(svc.actions[0].rest_name, "GetList");
        assert!(svc.actions[0].selectors.is_empty());
        assert_eq!(svc.actions[0].http_method, None);
    }

    #[test]
    fn bindings_follow_the_synthesized_verb() {
        let mut ty = service("OrderAppService", &["GetList", "Create"]);
        for method in &mut ty.methods {
            method.parameters.push(ParameterInfo {
                name: "input".to_owned(),
                ty: TypeRef::new("OrderInput"),
                binding: None,
            });
        }

        let svc = synthesize_service(&config(), &module(), &ty, Eligibility::Marker).unwrap();
        assert_eq!(svc.actions[0].parameters[0].inferred, None);
        assert_eq!(svc.actions[1].parameters[0].inferred, Some(BindingSource::Body));
    }

    #[test]
    fn explorer_defaults() {
        let mut ty = service("OrderAppService", &["GetList"]);
        ty.methods[0].annotations.push(Annotation::ApiExplorer { group_name: None, visible: Some(false) });

        let svc = synthesize_service(&config(), &module(), &ty, Eligibility::Marker).unwrap();
        assert_eq!(svc.explorer.group_name.as_deref(), Some("Order"));
        assert!(svc.explorer.visible);
        assert!(!svc.actions[0].explorer.visible);

        ty.annotations.push(Annotation::ApiExplorer { group_name: Some("Sales".to_owned()), visible: None });
        let svc = synthesize_service(&config(), &module(), &ty, Eligibility::Marker).unwrap();
        assert_eq!(svc.explorer.group_name.as_deref(), Some("Sales"));
    }

    #[test]
    fn ineligible_types_are_rejected() {
        let ty = service("OrderAppService", &["GetList"]);
        let err = synthesize_service(&config(), &module(), &ty, Eligibility::NotOptedIn).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: OrderAppService is not eligible (not_opted_in)");
    }

    #[test]
    fn blank_names_are_invalid_input() {
        let ty = service(" ", &[]);
        let err = synthesize_service(&config(), &module(), &ty, Eligibility::Marker).unwrap_err();
        assert!(matches!(err, ConventionError::InvalidInput { .. }));

        let ty = service("OrderAppService", &[""]);
        let err = synthesize_service(&config(), &module(), &ty, Eligibility::Marker).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input (action OrderAppService.): method name must not be empty");
    }
}
