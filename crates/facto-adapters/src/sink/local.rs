//! Filesystem sink writing into a generated-sources tree.

use facto_core::{Artifact, ArtifactSink};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes artifacts as `.java` files under a generated-sources root,
/// one directory level per package segment.
///
/// `DrinkFactory` in package `com.example.drinks` lands at
/// `<root>/com/example/drinks/DrinkFactory.java`.
#[derive(Debug, Clone)]
pub struct LocalArtifactSink {
    root: PathBuf,
}

impl LocalArtifactSink {
    /// Creates a sink rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The generated-sources root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path an artifact will be written to.
    #[must_use]
    pub fn path_for(&self, artifact: &Artifact) -> PathBuf {
        let mut path = self.root.clone();
        if let Some(package) = &artifact.package {
            for segment in package.split('.') {
                path.push(segment);
            }
        }
        path.push(format!("{}.java", artifact.type_name));
        path
    }
}

impl ArtifactSink for LocalArtifactSink {
    fn write(&mut self, artifact: &Artifact) -> std::io::Result<()> {
        let path = self.path_for(artifact);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &artifact.source)?;
        debug!(path = %path.display(), "artifact written");
        Ok(())
    }
}
