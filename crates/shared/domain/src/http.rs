//! HTTP-level vocabulary: methods, binding sources and route selectors.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// An HTTP request method.
///
/// Parsing is ASCII case-insensitive (`"get"`, `"Get"` and `"GET"` are equivalent);
/// display and serialization use the canonical upper-case form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// Methods whose requests conventionally carry no body.
    pub const READ_ONLY: [Self; 4] = [Self::Get, Self::Delete, Self::Trace, Self::Head];

    #[must_use]
    pub fn is_read_only(self) -> bool {
        Self::READ_ONLY.contains(&self)
    }
}

/// Where a parameter value is taken from when a request is dispatched.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum BindingSource {
    Body,
    Query,
    Path,
    Header,
    Form,
    Services,
}

/// A dispatch constraint attached to a [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionConstraint {
    /// Restricts the selector to the listed HTTP methods.
    HttpMethod { methods: Vec<HttpMethod> },
    /// Any other host-defined constraint, carried through untouched.
    Custom { name: String },
}

impl ActionConstraint {
    #[must_use]
    pub fn http(method: HttpMethod) -> Self {
        Self::HttpMethod { methods: vec![method] }
    }

    /// The HTTP methods of this constraint, or `None` for non-method constraints.
    #[must_use]
    pub fn http_methods(&self) -> Option<&[HttpMethod]> {
        match self {
            Self::HttpMethod { methods } => Some(methods),
            Self::Custom { .. } => None,
        }
    }
}

/// A route entry: an optional route template plus zero or more constraints.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Selector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<ActionConstraint>,
}

impl Selector {
    #[must_use]
    pub fn new(template: impl Into<String>, method: HttpMethod) -> Self {
        Self { template: Some(template.into()), constraints: vec![ActionConstraint::http(method)] }
    }

    /// Route template when present and non-blank.
    #[must_use]
    pub fn route(&self) -> Option<&str> {
        self.template.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// A selector carrying neither a route template nor any constraint.
    #[must_use]
    pub fn is_vacuous(&self) -> bool {
        self.route().is_none() && self.constraints.is_empty()
    }

    /// All HTTP methods mentioned by this selector's constraints.
    pub fn http_methods(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        self.constraints
            .iter()
            .filter_map(ActionConstraint::http_methods)
            .flat_map(|methods| methods.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn http_method_parses_case_insensitively() {
        assert_eq!(HttpMethod::from_str("get"), Ok(HttpMethod::Get));
        assert_eq!(HttpMethod::from_str("Delete"), Ok(HttpMethod::Delete));
        assert!(HttpMethod::from_str("FETCH").is_err());
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }

    #[test]
    fn read_only_methods() {
        assert!(HttpMethod::Get.is_read_only());
        assert!(HttpMethod::Head.is_read_only());
        assert!(!HttpMethod::Post.is_read_only());
        assert!(!HttpMethod::Patch.is_read_only());
    }

    #[test]
    fn blank_template_counts_as_missing() {
        let selector = Selector { template: Some("  ".to_owned()), constraints: vec![] };
        assert!(selector.is_vacuous());

        let constrained =
            Selector { template: None, constraints: vec![ActionConstraint::http(HttpMethod::Get)] };
        assert!(!constrained.is_vacuous());
        assert_eq!(constrained.http_methods().collect::<Vec<_>>(), vec![HttpMethod::Get]);
    }
}
