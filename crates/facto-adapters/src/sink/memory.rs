//! In-memory sink for tests and dry runs.

use facto_core::{Artifact, ArtifactSink};

/// Buffers artifacts instead of writing them anywhere.
#[derive(Debug, Default)]
pub struct MemoryArtifactSink {
    artifacts: Vec<Artifact>,
}

impl MemoryArtifactSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All artifacts in write order.
    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Source text of the artifact with the given type name.
    #[must_use]
    pub fn source_of(&self, type_name: &str) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|a| a.type_name == type_name)
            .map(|a| a.source.as_str())
    }

    /// Number of buffered artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Drops all buffered artifacts.
    pub fn clear(&mut self) {
        self.artifacts.clear();
    }
}

impl ArtifactSink for MemoryArtifactSink {
    fn write(&mut self, artifact: &Artifact) -> std::io::Result<()> {
        self.artifacts.push(artifact.clone());
        Ok(())
    }
}
