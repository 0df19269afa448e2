//! Descriptors for the host's type inventory.
//!
//! The host introspection layer materializes every candidate service as data: the type
//! itself, the tree of capabilities (interfaces) it implements, its annotations and its
//! methods. The engine only reads these values; it never mutates them.

use crate::constants::SIMPLE_TYPE_NAMES;
use crate::http::{BindingSource, Selector};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Declaration flags of a service type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TypeFlags: u8 {
        const PUBLIC = 1 << 0;
        const ABSTRACT = 1 << 1;
        const GENERIC = 1 << 2;
    }
}

impl Default for TypeFlags {
    fn default() -> Self {
        Self::PUBLIC
    }
}

/// An annotation attached to a type, capability or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// Explicit opt-in, optionally pinning the version/area segment.
    AutoApi {
        #[serde(default)]
        version: String,
    },
    /// Explicit opt-out.
    DisableApi,
    /// Fixed area route value for a service.
    Area { name: String },
    /// API-explorer metadata set by hand.
    ApiExplorer {
        #[serde(default)]
        group_name: Option<String>,
        #[serde(default)]
        visible: Option<bool>,
    },
}

/// Annotation discriminant used for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    AutoApi,
    DisableApi,
    Area,
    ApiExplorer,
}

impl Annotation {
    #[must_use]
    pub const fn kind(&self) -> AnnotationKind {
        match self {
            Self::AutoApi { .. } => AnnotationKind::AutoApi,
            Self::DisableApi => AnnotationKind::DisableApi,
            Self::Area { .. } => AnnotationKind::Area,
            Self::ApiExplorer { .. } => AnnotationKind::ApiExplorer,
        }
    }
}

/// Anything that carries annotations and implements further capabilities.
///
/// Both service types and capabilities form the nodes of a capability graph. The
/// graph is an owned tree, so it is acyclic by construction.
pub trait CapabilityNode {
    fn name(&self) -> &str;
    fn annotations(&self) -> &[Annotation];
    fn capabilities(&self) -> &[CapabilityDescriptor];

    /// First annotation of `kind` declared directly on this node.
    fn own_annotation(&self, kind: AnnotationKind) -> Option<&Annotation> {
        self.annotations().iter().find(|a| a.kind() == kind)
    }
}

/// An interface/capability implemented by a type, with its own inherited capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub capabilities: Vec<CapabilityDescriptor>,
}

impl CapabilityDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), annotations: Vec::new(), capabilities: Vec::new() }
    }
}

impl CapabilityNode for CapabilityDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn capabilities(&self) -> &[CapabilityDescriptor] {
        &self.capabilities
    }
}

/// A group of types discovered together (an assembly, a crate, a package).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

/// A candidate service type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(default)]
    pub flags: TypeFlags,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub capabilities: Vec<CapabilityDescriptor>,
    /// Service-level selectors configured explicitly by the host.
    #[serde(default)]
    pub selectors: Vec<Selector>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

impl TypeDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: TypeFlags::default(),
            annotations: Vec::new(),
            capabilities: Vec::new(),
            selectors: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.flags.contains(TypeFlags::PUBLIC)
    }

    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.flags.contains(TypeFlags::ABSTRACT)
    }

    #[must_use]
    pub const fn is_generic(&self) -> bool {
        self.flags.contains(TypeFlags::GENERIC)
    }
}

impl CapabilityNode for TypeDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn capabilities(&self) -> &[CapabilityDescriptor] {
        &self.capabilities
    }
}

/// A method of a service type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Selectors configured explicitly for this method (attribute routes, verb attributes).
    #[serde(default)]
    pub selectors: Vec<Selector>,
    #[serde(default)]
    pub parameters: Vec<ParameterInfo>,
}

impl MethodDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            selectors: Vec::new(),
            parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_annotation(&self, kind: AnnotationKind) -> bool {
        self.annotations.iter().any(|a| a.kind() == kind)
    }
}

/// A declared method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Binding source set explicitly by the host; authoritative when present.
    #[serde(default)]
    pub binding: Option<BindingSource>,
}

/// How a parameter type is classified for binding purposes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// Classify by name against the well-known simple type names.
    #[default]
    Inferred,
    Primitive,
    Enum,
    Complex,
}

/// A reference to a declared parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    /// Every type this one is assignable to (base types and implemented interfaces).
    #[serde(default)]
    pub assignable_to: Vec<String>,
}

impl TypeRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Inferred,
            assignable_to: Vec::new(),
        }
    }

    /// Primitive-like values, enums and their nullable forms.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        match self.kind {
            TypeKind::Primitive | TypeKind::Enum => true,
            TypeKind::Complex => false,
            TypeKind::Inferred => SIMPLE_TYPE_NAMES.contains(&self.base_name()),
        }
    }

    /// Whether a value of this type can be used where `target` is expected.
    #[must_use]
    pub fn is_assignable_to(&self, target: &str) -> bool {
        self.name == target || self.assignable_to.iter().any(|t| t == target)
    }

    /// The type name with a nullable wrapper (`T?`, `Option<T>`, `Nullable<T>`) removed.
    #[must_use]
    pub fn base_name(&self) -> &str {
        let name = self.name.trim();
        if let Some(inner) = name.strip_suffix('?') {
            return inner;
        }
        ["Option<", "Nullable<"]
            .iter()
            .find_map(|wrapper| name.strip_prefix(wrapper).and_then(|n| n.strip_suffix('>')))
            .map_or(name, str::trim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_wrappers_are_unwrapped() {
        assert_eq!(TypeRef::new("int?").base_name(), "int");
        assert_eq!(TypeRef::new("Option<u32>").base_name(), "u32");
        assert_eq!(TypeRef::new("Nullable<Guid>").base_name(), "Guid");
        assert_eq!(TypeRef::new("OrderDto").base_name(), "OrderDto");
    }

    #[test]
    fn simple_types_include_nullable_forms() {
        assert!(TypeRef::new("i64").is_simple());
        assert!(TypeRef::new("Option<String>").is_simple());
        assert!(TypeRef::new("DateTime?").is_simple());
        assert!(!TypeRef::new("CreateOrderInput").is_simple());

        let mut status = TypeRef::new("OrderStatus");
        status.kind = TypeKind::Enum;
        assert!(status.is_simple());
    }

    #[test]
    fn inventory_type_refs_default_to_inferred_kind() {
        let ty: TypeRef = serde_json::from_str(r#"{"name": "Guid?"}"#).unwrap();
        assert_eq!(ty, TypeRef::new("Guid?"));
        assert!(ty.is_simple());
    }

    #[test]
    fn assignability_covers_declared_supertypes() {
        let mut upload = TypeRef::new("FormFile");
        upload.assignable_to.push("IFormFile".to_owned());
        assert!(upload.is_assignable_to("IFormFile"));
        assert!(upload.is_assignable_to("FormFile"));
        assert!(!upload.is_assignable_to("Stream"));
    }
}
