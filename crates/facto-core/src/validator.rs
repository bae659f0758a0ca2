//! Structural validation of annotated records.

use crate::error::ProcessingError;
use crate::model::{DeclKind, QualifiedName, Visibility};
use crate::provider::MetadataProvider;
use crate::record::AnnotatedRecord;
use tracing::debug;

/// Default bound for superclass-chain walks.
///
/// Real type hierarchies stay far below this; the guard exists because the
/// provider is an external boundary and its metadata could be cyclic.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 64;

/// Checks one [`AnnotatedRecord`] against the structural rules.
///
/// Rules run in a fixed order and short-circuit on the first failure:
/// declaration kind, visibility, abstractness, the subtype relationship to
/// the group type, and finally the constructor shape.
#[derive(Debug)]
pub struct RecordValidator<'a> {
    provider: &'a dyn MetadataProvider,
    max_chain_depth: usize,
}

impl<'a> RecordValidator<'a> {
    /// Creates a validator over the given provider with the default
    /// chain-depth bound.
    #[must_use]
    pub fn new(provider: &'a dyn MetadataProvider) -> Self {
        Self {
            provider,
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }

    /// Overrides the superclass-chain depth bound.
    #[must_use]
    pub fn max_chain_depth(mut self, depth: usize) -> Self {
        self.max_chain_depth = depth;
        self
    }

    /// Validates a record.
    ///
    /// # Errors
    ///
    /// The first rule violated, as a [`ProcessingError`] anchored to the
    /// record's declaration: `NotAClass`, `NotPublic`, `IsAbstract`,
    /// `DoesNotImplement` / `DoesNotExtend`, or
    /// `MissingDefaultConstructor`. Metadata gaps surface as
    /// `UnknownDeclaration`, `UnresolvableGroupType`, or
    /// `SuperclassChainTooDeep`.
    pub fn validate(&self, record: &AnnotatedRecord) -> Result<(), ProcessingError> {
        let declaration = record.declaration().clone();
        let decl = self
            .provider
            .lookup(record.declaration())
            .ok_or_else(|| ProcessingError::UnknownDeclaration {
                declaration: declaration.clone(),
            })?;

        if decl.kind != DeclKind::Class {
            return Err(ProcessingError::NotAClass {
                declaration,
                kind: decl.kind,
            });
        }
        if decl.modifiers.visibility != Visibility::Public {
            return Err(ProcessingError::NotPublic { declaration });
        }
        if decl.modifiers.is_abstract {
            return Err(ProcessingError::IsAbstract { declaration });
        }

        self.check_subtype(record)?;

        if !decl.constructors.iter().any(|c| c.is_public_default()) {
            return Err(ProcessingError::MissingDefaultConstructor { declaration });
        }

        debug!(declaration = %record.declaration(), group = %record.group_type(), "record valid");
        Ok(())
    }

    /// Branching subtype check against the group type's kind.
    ///
    /// Interfaces require direct implementation; classes are matched by
    /// walking the superclass chain upward until the root type or the
    /// depth bound.
    fn check_subtype(&self, record: &AnnotatedRecord) -> Result<(), ProcessingError> {
        let declaration = record.declaration().clone();
        let group_type = record.group_type().clone();

        let group_decl = self.provider.lookup(&group_type).ok_or_else(|| {
            ProcessingError::UnresolvableGroupType {
                declaration: declaration.clone(),
                reference: group_type.as_str().to_owned(),
            }
        })?;

        if group_decl.kind == DeclKind::Interface {
            let decl = self.lookup(&declaration)?;
            if decl.interfaces.contains(&group_type) {
                Ok(())
            } else {
                Err(ProcessingError::DoesNotImplement {
                    declaration,
                    group_type,
                })
            }
        } else {
            self.walk_superclass_chain(record)
        }
    }

    /// Walks the superclass chain of the record's declaration looking for
    /// the group type. `None` at a link means the root object type was
    /// reached without a match.
    fn walk_superclass_chain(&self, record: &AnnotatedRecord) -> Result<(), ProcessingError> {
        let declaration = record.declaration().clone();
        let group_type = record.group_type();

        let mut current = self.lookup(&declaration)?;
        for _ in 0..self.max_chain_depth {
            let Some(super_name) = &current.superclass else {
                return Err(ProcessingError::DoesNotExtend {
                    declaration,
                    group_type: group_type.clone(),
                });
            };
            if super_name == group_type {
                return Ok(());
            }
            // A dangling link means provider metadata is incomplete.
            current = self.provider.lookup(super_name).ok_or_else(|| {
                ProcessingError::UnresolvableGroupType {
                    declaration: declaration.clone(),
                    reference: super_name.as_str().to_owned(),
                }
            })?;
        }

        Err(ProcessingError::SuperclassChainTooDeep {
            declaration,
            limit: self.max_chain_depth,
        })
    }

    fn lookup(&self, name: &QualifiedName) -> Result<&'a crate::model::TypeDecl, ProcessingError> {
        self.provider
            .lookup(name)
            .ok_or_else(|| ProcessingError::UnknownDeclaration {
                declaration: name.clone(),
            })
    }
}
