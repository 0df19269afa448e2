//! # Eligibility Classifier
//!
//! Decides whether a candidate type takes part in route generation by searching the type
//! and its capability closure for the enable marker and the opt-in/opt-out annotations.

use autoapi_domain::constants::ENABLE_MARKER;
use autoapi_domain::inventory::{Annotation, AnnotationKind, CapabilityNode, TypeDescriptor};
use serde::Serialize;
use strum_macros::{AsRefStr, Display};

/// Full recursive annotation search: the node first, then each capability depth-first.
/// The first match wins.
pub fn find_annotation<N>(node: &N, kind: AnnotationKind) -> Option<&Annotation>
where
    N: CapabilityNode + ?Sized,
{
    node.own_annotation(kind)
        .or_else(|| node.capabilities().iter().find_map(|cap| find_annotation(cap, kind)))
}

/// Whether `node` implements the capability `name`, directly or transitively.
pub fn implements_capability<N>(node: &N, name: &str) -> bool
where
    N: CapabilityNode + ?Sized,
{
    node.capabilities().iter().any(|cap| cap.name == name || implements_capability(cap, name))
}

/// Outcome of classifying one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    /// Implements the enable marker.
    Marker,
    /// Carries an explicit opt-in annotation without the marker.
    OptIn,
    NotPublic,
    Abstract,
    /// Neither marker nor opt-in annotation.
    NotOptedIn,
    /// Generic type with an opt-out and no opt-in in its closure.
    DisabledGeneric,
}

impl Eligibility {
    #[must_use]
    pub const fn is_eligible(self) -> bool {
        matches!(self, Self::Marker | Self::OptIn)
    }
}

/// Classifies a candidate type. Pure; never fails.
#[must_use]
pub fn classify(ty: &TypeDescriptor) -> Eligibility {
    if !ty.is_public() {
        return Eligibility::NotPublic;
    }
    if ty.is_abstract() {
        return Eligibility::Abstract;
    }

    let marker = implements_capability(ty, ENABLE_MARKER);
    let opt_in = find_annotation(ty, AnnotationKind::AutoApi).is_some();
    if !marker && !opt_in {
        return Eligibility::NotOptedIn;
    }
    if ty.is_generic() && !opt_in && find_annotation(ty, AnnotationKind::DisableApi).is_some() {
        return Eligibility::DisabledGeneric;
    }

    if marker { Eligibility::Marker } else { Eligibility::OptIn }
}
