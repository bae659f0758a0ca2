//! The boundary to the host toolchain's element model.

use crate::model::{QualifiedName, TypeDecl, TypeRef};
use std::collections::HashMap;

/// Supplies declaration metadata for a generation pass.
///
/// Implemented by the host integration (e.g. the JSON-backed provider in
/// `facto-adapters`), never by the core. The core only reads through it.
pub trait MetadataProvider: std::fmt::Debug {
    /// Looks up the declaration with the given canonical name.
    fn lookup(&self, name: &QualifiedName) -> Option<&TypeDecl>;

    /// Resolves an opaque type-mirror text to a canonical name.
    ///
    /// Annotation metadata APIs cannot always surface a type-valued field
    /// as a live canonical name; the fallback hands over the mirror's raw
    /// text, and the provider maps it back to the declaration it mirrors.
    fn resolve_mirror(&self, mirror: &str) -> Option<QualifiedName>;
}

/// Resolves a two-path type reference to a canonical qualified name.
///
/// The direct path is returned as-is; the mirror path goes through
/// [`MetadataProvider::resolve_mirror`]. Returns `None` when the mirror
/// cannot be resolved; callers turn that into
/// [`UnresolvableGroupType`](crate::ProcessingError::UnresolvableGroupType)
/// with the declaration attached.
pub fn resolve_type_ref(provider: &dyn MetadataProvider, target: &TypeRef) -> Option<QualifiedName> {
    match target {
        TypeRef::Direct(name) => Some(name.clone()),
        TypeRef::Mirror(text) => provider.resolve_mirror(text),
    }
}

/// A provider backed by an in-process map of declarations.
///
/// Suitable for hosts that assemble metadata programmatically, and the
/// workhorse of the test suite. Mirror texts resolve either through an
/// explicitly registered alias or by matching a known canonical name.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    decls: HashMap<QualifiedName, TypeDecl>,
    mirror_aliases: HashMap<String, QualifiedName>,
}

impl InMemoryProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declaration, replacing any previous one of the same name.
    pub fn add_decl(&mut self, decl: TypeDecl) -> &mut Self {
        self.decls.insert(decl.name.clone(), decl);
        self
    }

    /// Registers declarations in bulk.
    pub fn add_decls(&mut self, decls: impl IntoIterator<Item = TypeDecl>) -> &mut Self {
        for decl in decls {
            self.add_decl(decl);
        }
        self
    }

    /// Maps a mirror text to the canonical name it stands for.
    pub fn add_mirror_alias(
        &mut self,
        mirror: impl Into<String>,
        name: impl Into<QualifiedName>,
    ) -> &mut Self {
        self.mirror_aliases.insert(mirror.into(), name.into());
        self
    }

    /// Number of registered declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Whether no declarations are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

impl MetadataProvider for InMemoryProvider {
    fn lookup(&self, name: &QualifiedName) -> Option<&TypeDecl> {
        self.decls.get(name)
    }

    fn resolve_mirror(&self, mirror: &str) -> Option<QualifiedName> {
        if let Some(name) = self.mirror_aliases.get(mirror) {
            return Some(name.clone());
        }
        // A mirror text that already is a canonical name resolves to itself.
        let candidate = QualifiedName::new(mirror);
        self.decls.contains_key(&candidate).then_some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_reference_resolves_without_provider_data() {
        let provider = InMemoryProvider::new();
        let target = TypeRef::Direct(QualifiedName::new("com.example.Drink"));
        let resolved = resolve_type_ref(&provider, &target);
        assert_eq!(resolved, Some(QualifiedName::new("com.example.Drink")));
    }

    #[test]
    fn mirror_resolves_through_alias() {
        let mut provider = InMemoryProvider::new();
        provider.add_mirror_alias("Drink.class", "com.example.Drink");
        let target = TypeRef::Mirror("Drink.class".into());
        let resolved = resolve_type_ref(&provider, &target);
        assert_eq!(resolved, Some(QualifiedName::new("com.example.Drink")));
    }

    #[test]
    fn mirror_matching_a_known_decl_resolves_to_itself() {
        let mut provider = InMemoryProvider::new();
        provider.add_decl(TypeDecl::concrete_class("com.example.Drink"));
        let target = TypeRef::Mirror("com.example.Drink".into());
        let resolved = resolve_type_ref(&provider, &target);
        assert_eq!(resolved, Some(QualifiedName::new("com.example.Drink")));
    }

    #[test]
    fn unknown_mirror_does_not_resolve() {
        let provider = InMemoryProvider::new();
        let target = TypeRef::Mirror("com.example.Nowhere".into());
        assert_eq!(resolve_type_ref(&provider, &target), None);
    }
}
