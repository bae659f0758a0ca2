//! # facto-adapters
//!
//! Host-integration adapters for `facto-core`:
//!
//! - [`JsonMetadataProvider`] for toolchains that export their element
//!   model as a JSON document
//! - [`LocalArtifactSink`] writing generated sources into a
//!   package-directory tree
//! - [`MemoryArtifactSink`] for tests and dry runs

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod metadata;
mod sink;

pub use metadata::{JsonMetadataProvider, MetadataError};
pub use sink::{LocalArtifactSink, MemoryArtifactSink};
