//! Route templates.
//!
//! A [`RouteTemplate`] is always normalized: runs of `/` are collapsed into one and the
//! template never starts or ends with a separator. Empty segments therefore disappear.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RouteTemplate(String);

impl RouteTemplate {
    /// Joins `segments` with `/` and normalizes the result.
    pub fn from_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> Self {
        let joined = segments.into_iter().collect::<Vec<_>>().join("/");
        Self(normalize(&joined))
    }

    /// Parses an explicit template as written by the host.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(normalize(absolute_body(raw).unwrap_or(raw)))
    }

    /// Appends an explicit template to this one.
    ///
    /// Absolute templates (`/...` or `~/...`) replace this template; an empty template
    /// leaves it unchanged.
    #[must_use]
    pub fn combine(&self, explicit: &str) -> Self {
        let explicit = explicit.trim();
        if let Some(body) = absolute_body(explicit) {
            return Self(normalize(body));
        }
        if explicit.is_empty() {
            return self.clone();
        }
        Self::from_segments([self.0.as_str(), explicit])
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn absolute_body(template: &str) -> Option<&str> {
    template.strip_prefix('~').filter(|rest| rest.starts_with('/')).or_else(|| {
        template.starts_with('/').then_some(template)
    })
}

fn normalize(raw: &str) -> String {
    raw.split('/').filter(|segment| !segment.is_empty()).collect::<Vec<_>>().join("/")
}
