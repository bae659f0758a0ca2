//! Extraction of a validated-ready record from one annotated declaration.

use crate::error::ProcessingError;
use crate::model::{FactoryAnnotation, QualifiedName, TypeDecl, TypeRef};
use crate::provider::{resolve_type_ref, MetadataProvider};

/// The value extracted from one declaration carrying the factory annotation.
///
/// Immutable once built. The `declaration` field anchors diagnostics and
/// names the concrete type the generated dispatcher constructs; it is an
/// owned name so records can outlive any single discovery round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRecord {
    identifier: String,
    group_type: QualifiedName,
    declaration: QualifiedName,
}

impl AnnotatedRecord {
    /// Extracts a record from a declaration and its annotation values.
    ///
    /// Rejects blank identifiers and resolves the annotation's `target`
    /// through the two-path resolver (direct name, or mirror text mapped
    /// back through the provider).
    ///
    /// # Errors
    ///
    /// - [`ProcessingError::EmptyIdentifier`] when the identifier is empty
    ///   or whitespace-only.
    /// - [`ProcessingError::UnresolvableGroupType`] when the target
    ///   reference cannot be normalized to a canonical name.
    pub fn from_annotation(
        decl: &TypeDecl,
        annotation: &FactoryAnnotation,
        provider: &dyn MetadataProvider,
    ) -> Result<Self, ProcessingError> {
        let identifier = annotation.identifier.trim();
        if identifier.is_empty() {
            return Err(ProcessingError::EmptyIdentifier {
                declaration: decl.name.clone(),
            });
        }

        let group_type = resolve_type_ref(provider, &annotation.target).ok_or_else(|| {
            ProcessingError::UnresolvableGroupType {
                declaration: decl.name.clone(),
                reference: match &annotation.target {
                    TypeRef::Direct(name) => name.as_str().to_owned(),
                    TypeRef::Mirror(text) => text.clone(),
                },
            }
        })?;

        Ok(Self {
            identifier: identifier.to_owned(),
            group_type,
            declaration: decl.name.clone(),
        })
    }

    /// The dispatch identifier as specified in the annotation.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Canonical name of the group type this record belongs to.
    #[must_use]
    pub fn group_type(&self) -> &QualifiedName {
        &self.group_type
    }

    /// Canonical name of the annotated declaration itself.
    #[must_use]
    pub fn declaration(&self) -> &QualifiedName {
        &self.declaration
    }
}
