//! Error taxonomy for a generation pass.

use crate::model::{DeclKind, QualifiedName};
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while extracting, validating, registering, or emitting.
///
/// Every variant that is attributable to one declaration carries it, so
/// diagnostics can be anchored to the offending element. Message wording
/// follows the build-error convention of naming the class first.
#[derive(Debug, Error, Diagnostic)]
pub enum ProcessingError {
    /// The annotation's identifier field was blank or whitespace-only.
    #[error("identifier in the factory annotation on class {declaration} must not be empty")]
    #[diagnostic(code(facto::empty_identifier))]
    EmptyIdentifier {
        /// The annotated declaration.
        declaration: QualifiedName,
    },

    /// The annotated declaration is not a class.
    #[error("only classes can carry the factory annotation, but {declaration} is a {kind}")]
    #[diagnostic(code(facto::not_a_class))]
    NotAClass {
        /// The annotated declaration.
        declaration: QualifiedName,
        /// The actual declaration kind.
        kind: DeclKind,
    },

    /// The annotated class is not publicly visible.
    #[error("the class {declaration} is not public")]
    #[diagnostic(code(facto::not_public))]
    NotPublic {
        /// The annotated declaration.
        declaration: QualifiedName,
    },

    /// The annotated class is abstract.
    #[error("the class {declaration} is abstract and cannot carry the factory annotation")]
    #[diagnostic(code(facto::is_abstract))]
    IsAbstract {
        /// The annotated declaration.
        declaration: QualifiedName,
    },

    /// The group type is an interface the class does not directly implement.
    #[error("the class {declaration} must implement the interface {group_type}")]
    #[diagnostic(
        code(facto::does_not_implement),
        help("the interface must appear in the class's direct implements list")
    )]
    DoesNotImplement {
        /// The annotated declaration.
        declaration: QualifiedName,
        /// The interface named by the annotation.
        group_type: QualifiedName,
    },

    /// The group type is a class outside the declaration's superclass chain.
    #[error("the class {declaration} must inherit from {group_type}")]
    #[diagnostic(code(facto::does_not_extend))]
    DoesNotExtend {
        /// The annotated declaration.
        declaration: QualifiedName,
        /// The base class named by the annotation.
        group_type: QualifiedName,
    },

    /// No public zero-argument constructor was found.
    #[error("the class {declaration} must provide a public empty default constructor")]
    #[diagnostic(code(facto::missing_default_constructor))]
    MissingDefaultConstructor {
        /// The annotated declaration.
        declaration: QualifiedName,
    },

    /// Two classes in one group claimed the same identifier.
    #[error(
        "conflict: the class {declaration} uses identifier \"{identifier}\" in group \
         {group_type}, already taken by {existing}"
    )]
    #[diagnostic(
        code(facto::duplicate_identifier),
        help("identifiers must be unique within a group; pick a different identifier")
    )]
    DuplicateIdentifier {
        /// The declaration whose insertion was rejected.
        declaration: QualifiedName,
        /// The declaration that registered the identifier first.
        existing: QualifiedName,
        /// The contested identifier.
        identifier: String,
        /// The group both declarations target.
        group_type: QualifiedName,
    },

    /// A type reference could not be resolved to a real declaration.
    #[error("cannot resolve type reference \"{reference}\" on class {declaration}")]
    #[diagnostic(code(facto::unresolvable_group_type))]
    UnresolvableGroupType {
        /// The declaration whose metadata referenced the type.
        declaration: QualifiedName,
        /// The unresolvable reference text.
        reference: String,
    },

    /// The superclass chain exceeded the configured depth limit.
    #[error(
        "superclass chain of {declaration} exceeds {limit} links; metadata is likely cyclic"
    )]
    #[diagnostic(code(facto::superclass_chain_too_deep))]
    SuperclassChainTooDeep {
        /// The declaration whose chain was walked.
        declaration: QualifiedName,
        /// The configured depth limit.
        limit: usize,
    },

    /// The host named a declaration the provider cannot supply.
    #[error("the provider has no metadata for declaration {declaration}")]
    #[diagnostic(code(facto::unknown_declaration))]
    UnknownDeclaration {
        /// The missing declaration.
        declaration: QualifiedName,
    },

    /// Writing a generated artifact failed. Not anchored to a declaration.
    #[error("failed to write generated artifact {artifact}: {source}")]
    #[diagnostic(code(facto::artifact_write))]
    ArtifactWrite {
        /// Artifact type name (e.g. `DrinkFactory`).
        artifact: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A processor operation was invoked in the wrong pass state.
    #[error("operation requires the {expected} state, but the processor is {actual}")]
    #[diagnostic(
        code(facto::invalid_state),
        help("call clear() to return the processor to the collecting state")
    )]
    InvalidState {
        /// The state the operation requires.
        expected: &'static str,
        /// The state the processor was in.
        actual: &'static str,
    },
}

impl ProcessingError {
    /// The declaration this error is anchored to, if any.
    ///
    /// `ArtifactWrite` and `InvalidState` have no anchor element.
    #[must_use]
    pub fn element(&self) -> Option<&QualifiedName> {
        match self {
            Self::EmptyIdentifier { declaration }
            | Self::NotAClass { declaration, .. }
            | Self::NotPublic { declaration }
            | Self::IsAbstract { declaration }
            | Self::DoesNotImplement { declaration, .. }
            | Self::DoesNotExtend { declaration, .. }
            | Self::MissingDefaultConstructor { declaration }
            | Self::DuplicateIdentifier { declaration, .. }
            | Self::UnresolvableGroupType { declaration, .. }
            | Self::SuperclassChainTooDeep { declaration, .. }
            | Self::UnknownDeclaration { declaration } => Some(declaration),
            Self::ArtifactWrite { .. } | Self::InvalidState { .. } => None,
        }
    }
}
