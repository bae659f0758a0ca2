//! # facto-core
//!
//! Core engine of facto, a build-time dispatch-factory source generator.
//!
//! The host toolchain discovers declarations carrying the factory
//! annotation and describes them through a [`MetadataProvider`]. The core
//! extracts an [`AnnotatedRecord`] per declaration, validates it with
//! [`RecordValidator`], accumulates validated records in a
//! [`GroupRegistry`], and finally renders one identifier-keyed dispatch
//! factory per group through [`FactoryEmitter`]. [`FactoryProcessor`]
//! drives the whole pass.
//!
//! ## Example
//!
//! ```ignore
//! use facto_core::{FactoryProcessor, CollectingSink};
//!
//! let mut processor = FactoryProcessor::new();
//! let mut diagnostics = CollectingSink::new();
//! processor.process_round(&annotated, &provider, &mut diagnostics)?;
//! processor.finish(&mut sink, &mut diagnostics)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod diagnostics;
mod emitter;
mod error;
mod model;
mod processor;
mod provider;
mod record;
mod registry;
mod validator;

pub use config::{ConfigError, EmitterConfig, GeneratorConfig, ValidatorConfig};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use emitter::{
    Artifact, ArtifactSink, DispatchBranch, DispatchPlan, FactoryEmitter, DEFAULT_FACTORY_SUFFIX,
};
pub use error::ProcessingError;
pub use model::{
    Constructor, DeclKind, FactoryAnnotation, Modifiers, QualifiedName, TypeDecl, TypeRef,
    Visibility,
};
pub use processor::{FactoryProcessor, PassState, PassSummary, RoundSummary};
pub use provider::{resolve_type_ref, InMemoryProvider, MetadataProvider};
pub use record::AnnotatedRecord;
pub use registry::{Group, GroupRegistry};
pub use validator::{RecordValidator, DEFAULT_MAX_CHAIN_DEPTH};
