//! # Selector Sanitizer

use autoapi_domain::http::Selector;

/// Drops every selector with neither a route template nor a constraint.
///
/// Idempotent. Returns the number of selectors removed.
pub fn remove_vacuous(selectors: &mut Vec<Selector>) -> usize {
    let before = selectors.len();
    selectors.retain(|selector| !selector.is_vacuous());
    before - selectors.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoapi_domain::http::{ActionConstraint, HttpMethod};

    #[test]
    fn vacuous_selectors_are_removed_once() {
        let mut selectors = vec![
            Selector::default(),
            Selector { template: Some("orders".to_owned()), constraints: vec![] },
            Selector { template: Some(String::new()), constraints: vec![] },
            Selector { template: None, constraints: vec![ActionConstraint::http(HttpMethod::Put)] },
        ];

        assert_eq!(remove_vacuous(&mut selectors), 2);
        let after_first = selectors.clone();
        assert_eq!(remove_vacuous(&mut selectors), 0);
        assert_eq!(selectors, after_first);
        assert_eq!(selectors.len(), 2);
    }

    #[test]
    fn custom_constraints_keep_a_selector() {
        let mut selectors = vec![Selector {
            template: None,
            constraints: vec![ActionConstraint::Custom { name: "consumes:json".to_owned() }],
        }];
        assert_eq!(remove_vacuous(&mut selectors), 0);
    }
}
