//! Artifact sinks: where generated sources land.

mod local;
mod memory;

pub use local::LocalArtifactSink;
pub use memory::MemoryArtifactSink;
