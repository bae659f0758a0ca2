//! Declaration metadata model supplied by the host toolchain.
//!
//! facto never inspects source text itself. The host (an annotation
//! processor, a compiler plugin, an exported element dump) describes each
//! declaration with these types and hands them over through a
//! [`MetadataProvider`](crate::MetadataProvider).

use serde::{Deserialize, Serialize};

/// A canonical dotted type name (e.g. `com.example.drinks.Drink`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedName(String);

impl QualifiedName {
    /// Creates a qualified name from a dotted string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the full dotted name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last segment (e.g. `Drink` for `com.example.Drink`).
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Returns the package portion, or `None` for a root-package type.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(pkg, _)| pkg)
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Kind of declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    /// A concrete or abstract class.
    Class,
    /// An interface.
    Interface,
    /// An enum.
    Enum,
    /// An annotation declaration.
    Annotation,
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
            Self::Enum => write!(f, "enum"),
            Self::Annotation => write!(f, "annotation"),
        }
    }
}

/// Visibility of a declaration or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// Visible everywhere.
    Public,
    /// Visible to subtypes and the package.
    Protected,
    /// Visible within the package only.
    PackagePrivate,
    /// Visible within the declaring type only.
    Private,
}

/// Modifier set attached to a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Declaration visibility.
    pub visibility: Visibility,
    /// Whether the declaration is abstract.
    #[serde(default)]
    pub is_abstract: bool,
    /// Whether the declaration is final.
    #[serde(default)]
    pub is_final: bool,
}

impl Modifiers {
    /// Public, non-abstract, non-final modifiers.
    #[must_use]
    pub fn public() -> Self {
        Self {
            visibility: Visibility::Public,
            is_abstract: false,
            is_final: false,
        }
    }
}

/// A constructor enclosed by a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructor {
    /// Constructor visibility.
    pub visibility: Visibility,
    /// Number of declared parameters.
    pub param_count: usize,
}

impl Constructor {
    /// The public zero-argument constructor.
    #[must_use]
    pub fn public_default() -> Self {
        Self {
            visibility: Visibility::Public,
            param_count: 0,
        }
    }

    /// Whether this constructor is public and takes no arguments.
    #[must_use]
    pub fn is_public_default(&self) -> bool {
        self.visibility == Visibility::Public && self.param_count == 0
    }
}

/// Metadata for one type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Canonical name of the declaration.
    pub name: QualifiedName,
    /// Kind of declaration.
    pub kind: DeclKind,
    /// Modifier set.
    pub modifiers: Modifiers,
    /// Directly implemented interfaces (not transitive).
    #[serde(default)]
    pub interfaces: Vec<QualifiedName>,
    /// Direct superclass, `None` when the root object type is reached.
    #[serde(default)]
    pub superclass: Option<QualifiedName>,
    /// Enclosed constructors.
    #[serde(default)]
    pub constructors: Vec<Constructor>,
}

impl TypeDecl {
    /// Creates a public concrete class with a public default constructor.
    ///
    /// Convenience for hosts and tests; use the struct literal for
    /// anything more involved.
    #[must_use]
    pub fn concrete_class(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            kind: DeclKind::Class,
            modifiers: Modifiers::public(),
            interfaces: Vec::new(),
            superclass: None,
            constructors: vec![Constructor::public_default()],
        }
    }
}

/// A type-valued annotation field, before canonicalization.
///
/// Annotation metadata surfaces the `type` field either as an already
/// canonical name or as an opaque mirror text that must be resolved
/// through the provider. Both paths normalize to a [`QualifiedName`];
/// see [`MetadataProvider::resolve_mirror`](crate::MetadataProvider::resolve_mirror).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeRef {
    /// The field was readable as a canonical qualified name.
    Direct(QualifiedName),
    /// The field surfaced as a type mirror; carries the raw mirror text.
    Mirror(String),
}

/// The factory annotation's field values, as read off one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryAnnotation {
    /// Caller-chosen dispatch identifier. Must not be blank.
    pub identifier: String,
    /// The group type this declaration claims membership in.
    pub target: TypeRef,
}
