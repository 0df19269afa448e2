//! # Parameter Binding Inferencer
//!
//! Runs after route synthesis: the decision depends on the verb constraints the action
//! ended up with.

use crate::config::ConventionConfig;
use crate::model::ParameterDescriptor;
use autoapi_domain::http::{BindingSource, Selector};
use autoapi_domain::inventory::TypeRef;
use tracing::trace;

/// Fills `inferred` for every parameter of an action that has no explicit binding.
pub fn infer_bindings(
    config: &ConventionConfig,
    selectors: &[Selector],
    parameters: &mut [ParameterDescriptor],
) {
    let body_allowed = accepts_body(selectors);
    for parameter in parameters.iter_mut().filter(|p| p.binding.is_none()) {
        parameter.inferred = (body_allowed && is_body_candidate(config, &parameter.ty))
            .then_some(BindingSource::Body);
        trace!(parameter = %parameter.name, inferred = ?parameter.inferred, "Binding inferred");
    }
}

/// Complex types outside the ignored set.
fn is_body_candidate(config: &ConventionConfig, ty: &TypeRef) -> bool {
    !ty.is_simple() && !config.body_binding_ignored_types().iter().any(|t| ty.is_assignable_to(t))
}

/// False only when the selectors name at least one verb and every named verb is read-only.
fn accepts_body(selectors: &[Selector]) -> bool {
    let mut methods = selectors.iter().flat_map(Selector::http_methods).peekable();
    if methods.peek().is_none() {
        return true;
    }
    !methods.all(|method| method.is_read_only())
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoapi_domain::http::{ActionConstraint, HttpMethod};

    fn parameter(ty: TypeRef, binding: Option<BindingSource>) -> ParameterDescriptor {
        ParameterDescriptor { name: "input".to_owned(), ty, binding, inferred: None }
    }

    fn selectors(methods: &[HttpMethod]) -> Vec<Selector> {
        methods.iter().map(|m| Selector::new("api/Order", *m)).collect()
    }

    fn config() -> ConventionConfig {
        ConventionConfig::builder().build().unwrap()
    }

    #[test]
    fn complex_types_bind_from_body_on_write_verbs() {
        let mut params = [parameter(TypeRef::new("CreateOrderInput"), None)];
        infer_bindings(&config(), &selectors(&[HttpMethod::Post]), &mut params);
        assert_eq!(params[0].inferred, Some(BindingSource::Body));
        assert_eq!(params[0].effective_binding(), Some(BindingSource::Body));
    }

    #[test]
    fn read_only_verbs_never_bind_body() {
        for method in HttpMethod::READ_ONLY {
            let mut params = [parameter(TypeRef::new("OrderFilter"), None)];
            infer_bindings(&config(), &selectors(&[method]), &mut params);
            assert_eq!(params[0].inferred, None, "{method}");
        }
    }

    #[test]
    fn mixed_verbs_allow_body() {
        let mut params = [parameter(TypeRef::new("OrderFilter"), None)];
        infer_bindings(&config(), &selectors(&[HttpMethod::Get, HttpMethod::Post]), &mut params);
        assert_eq!(params[0].inferred, Some(BindingSource::Body));
    }

    #[test]
    fn selectors_without_verbs_allow_body() {
        let custom = vec![Selector {
            template: Some("x".to_owned()),
            constraints: vec![ActionConstraint::Custom { name: "tenant".to_owned() }],
        }];
        let mut params = [parameter(TypeRef::new("OrderFilter"), None)];
        infer_bindings(&config(), &custom, &mut params);
        assert_eq!(params[0].inferred, Some(BindingSource::Body));
    }

    #[test]
    fn simple_and_ignored_types_are_skipped() {
        let mut upload = TypeRef::new("FormFile");
        upload.assignable_to.push("IFormFile".to_owned());
        let mut params = [
            parameter(TypeRef::new("Option<u64>"), None),
            parameter(TypeRef::new("IFormFile"), None),
            parameter(upload, None),
        ];
        infer_bindings(&config(), &selectors(&[HttpMethod::Post]), &mut params);
        assert!(params.iter().all(|p| p.inferred.is_none()));
    }

    #[test]
    fn explicit_bindings_are_authoritative() {
        let mut params = [parameter(TypeRef::new("OrderFilter"), Some(BindingSource::Query))];
        infer_bindings(&config(), &selectors(&[HttpMethod::Post]), &mut params);
        assert_eq!(params[0].inferred, None);
        assert_eq!(params[0].effective_binding(), Some(BindingSource::Query));
    }
}
