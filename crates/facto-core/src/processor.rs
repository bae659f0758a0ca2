//! The generation pass: round-by-round collection, single emission.

use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::emitter::{ArtifactSink, FactoryEmitter};
use crate::error::ProcessingError;
use crate::model::{FactoryAnnotation, QualifiedName};
use crate::provider::MetadataProvider;
use crate::record::AnnotatedRecord;
use crate::registry::GroupRegistry;
use crate::validator::RecordValidator;
use tracing::{debug, info, warn};

/// The processor's position in its pass lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    /// Accepting discovery rounds.
    Collecting,
    /// Emitting artifacts; transient, observable only during `finish`.
    Emitting,
    /// Pass complete; only `clear` is valid.
    Idle,
}

impl PassState {
    fn name(self) -> &'static str {
        match self {
            Self::Collecting => "collecting",
            Self::Emitting => "emitting",
            Self::Idle => "idle",
        }
    }
}

/// Counts from one discovery round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundSummary {
    /// Records that passed validation and entered the registry.
    pub accepted: usize,
    /// Declarations reported and abandoned.
    pub failed: usize,
}

/// Counts from the terminal emission step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Artifacts successfully written.
    pub artifacts_written: usize,
    /// Groups whose artifact could not be written.
    pub failed_groups: usize,
}

/// Drives one generation pass over externally discovered declarations.
///
/// The host feeds any number of discovery rounds through
/// [`process_round`](Self::process_round) while the processor is
/// `Collecting`, then calls [`finish`](Self::finish) exactly once after it
/// knows no further declarations will appear. `finish` emits every group,
/// clears the registry unconditionally, and parks the processor in `Idle`;
/// [`clear`](Self::clear) is the only transition back to `Collecting`.
///
/// A failing declaration is reported through the diagnostic sink and
/// abandoned; the rest of the round and all other groups keep processing.
#[derive(Debug)]
pub struct FactoryProcessor {
    registry: GroupRegistry,
    emitter: FactoryEmitter,
    max_chain_depth: usize,
    state: PassState,
}

impl Default for FactoryProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FactoryProcessor {
    /// Creates a processor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&GeneratorConfig::default())
    }

    /// Creates a processor from a [`GeneratorConfig`].
    #[must_use]
    pub fn with_config(config: &GeneratorConfig) -> Self {
        let emitter = FactoryEmitter::new()
            .suffix(config.emitter.suffix.clone())
            .header(config.emitter.header_opt().map(str::to_owned));
        Self {
            registry: GroupRegistry::new(),
            emitter,
            max_chain_depth: config.validator.max_chain_depth,
            state: PassState::Collecting,
        }
    }

    /// Current pass state.
    #[must_use]
    pub fn state(&self) -> PassState {
        self.state
    }

    /// The registry accumulated so far in this pass.
    #[must_use]
    pub fn registry(&self) -> &GroupRegistry {
        &self.registry
    }

    /// Processes one discovery round of annotated declarations.
    ///
    /// Each entry names a declaration and carries its annotation values.
    /// Extraction, validation, and registration failures are reported to
    /// the sink and skipped without affecting the other entries.
    ///
    /// # Errors
    ///
    /// [`ProcessingError::InvalidState`] when the processor is not
    /// `Collecting`.
    pub fn process_round(
        &mut self,
        annotated: &[(QualifiedName, FactoryAnnotation)],
        provider: &dyn MetadataProvider,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<RoundSummary, ProcessingError> {
        self.require_state(PassState::Collecting)?;
        info!(declarations = annotated.len(), "processing discovery round");

        let validator = RecordValidator::new(provider).max_chain_depth(self.max_chain_depth);
        let mut summary = RoundSummary::default();

        for (name, annotation) in annotated {
            match self.process_declaration(name, annotation, provider, &validator) {
                Ok(()) => summary.accepted += 1,
                Err(err) => {
                    warn!(declaration = %name, "declaration rejected: {err}");
                    diagnostics.report(Diagnostic::from(&err));
                    summary.failed += 1;
                }
            }
        }

        debug!(
            accepted = summary.accepted,
            failed = summary.failed,
            groups = self.registry.len(),
            "round complete"
        );
        Ok(summary)
    }

    fn process_declaration(
        &mut self,
        name: &QualifiedName,
        annotation: &FactoryAnnotation,
        provider: &dyn MetadataProvider,
        validator: &RecordValidator<'_>,
    ) -> Result<(), ProcessingError> {
        let decl = provider
            .lookup(name)
            .ok_or_else(|| ProcessingError::UnknownDeclaration {
                declaration: name.clone(),
            })?;
        let record = AnnotatedRecord::from_annotation(decl, annotation, provider)?;
        validator.validate(&record)?;
        self.registry.add(record)
    }

    /// Emits every accumulated group, once, then clears the registry.
    ///
    /// Write failures are reported through the sink (unanchored) and do
    /// not stop the remaining groups. The registry is cleared whether or
    /// not emission succeeded, so a later pass cannot re-emit records
    /// already handled; the processor lands in `Idle`.
    ///
    /// # Errors
    ///
    /// [`ProcessingError::InvalidState`] when the processor is not
    /// `Collecting`.
    pub fn finish(
        &mut self,
        sink: &mut dyn ArtifactSink,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<PassSummary, ProcessingError> {
        self.require_state(PassState::Collecting)?;
        self.state = PassState::Emitting;
        info!(groups = self.registry.len(), "emitting factories");

        let mut summary = PassSummary::default();
        for group in self.registry.all_groups() {
            match self.emitter.emit(group, sink) {
                Ok(()) => summary.artifacts_written += 1,
                Err(err) => {
                    diagnostics.report(Diagnostic::from(&err));
                    summary.failed_groups += 1;
                }
            }
        }

        self.registry.clear();
        self.state = PassState::Idle;
        info!(
            artifacts = summary.artifacts_written,
            failed = summary.failed_groups,
            "pass complete"
        );
        Ok(summary)
    }

    /// Resets the processor for a fresh pass.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.state = PassState::Collecting;
    }

    fn require_state(&self, expected: PassState) -> Result<(), ProcessingError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ProcessingError::InvalidState {
                expected: expected.name(),
                actual: self.state.name(),
            })
        }
    }
}
