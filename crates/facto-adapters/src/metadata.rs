//! JSON-backed metadata provider.
//!
//! For hosts that cannot hold the element model in-process: the toolchain
//! exports declarations, mirror aliases, and annotated entries as one JSON
//! document, and facto consumes it through this provider.
//!
//! Document shape:
//!
//! ```json
//! {
//!   "types": [
//!     { "name": "com.example.Drink", "kind": "interface",
//!       "modifiers": { "visibility": "public" } }
//!   ],
//!   "mirrors": { "Drink.class": "com.example.Drink" },
//!   "annotated": [
//!     { "class": "com.example.Coffee", "identifier": "Coffee",
//!       "target": { "direct": "com.example.Drink" } }
//!   ]
//! }
//! ```

use facto_core::{FactoryAnnotation, InMemoryProvider, MetadataProvider, QualifiedName, TypeDecl};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors loading a metadata document.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// IO error reading the document.
    #[error("failed to read metadata file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The document is not valid metadata JSON.
    #[error("failed to parse metadata: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct MetadataDocument {
    #[serde(default)]
    types: Vec<TypeDecl>,
    #[serde(default)]
    mirrors: HashMap<String, QualifiedName>,
    #[serde(default)]
    annotated: Vec<AnnotatedEntry>,
}

#[derive(Debug, Deserialize)]
struct AnnotatedEntry {
    class: QualifiedName,
    #[serde(flatten)]
    annotation: FactoryAnnotation,
}

/// A [`MetadataProvider`] deserialized from a host-exported JSON document.
///
/// Also carries the document's annotated entries, ready to feed into
/// [`FactoryProcessor::process_round`](facto_core::FactoryProcessor::process_round).
#[derive(Debug)]
pub struct JsonMetadataProvider {
    inner: InMemoryProvider,
    annotated: Vec<(QualifiedName, FactoryAnnotation)>,
}

impl JsonMetadataProvider {
    /// Parses a metadata document from a JSON string.
    ///
    /// # Errors
    ///
    /// [`MetadataError::Parse`] when the JSON does not match the document
    /// shape.
    pub fn parse(json: &str) -> Result<Self, MetadataError> {
        let document: MetadataDocument = serde_json::from_str(json)?;
        let mut inner = InMemoryProvider::new();
        inner.add_decls(document.types);
        for (mirror, name) in document.mirrors {
            inner.add_mirror_alias(mirror, name);
        }
        let annotated = document
            .annotated
            .into_iter()
            .map(|entry| (entry.class, entry.annotation))
            .collect::<Vec<_>>();
        debug!(
            declarations = inner.len(),
            annotated = annotated.len(),
            "metadata document loaded"
        );
        Ok(Self { inner, annotated })
    }

    /// Loads a metadata document from a file.
    ///
    /// # Errors
    ///
    /// [`MetadataError::Io`] when the file cannot be read,
    /// [`MetadataError::Parse`] when its content is invalid.
    pub fn from_file(path: &Path) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// The annotated entries declared by the document, in document order.
    #[must_use]
    pub fn annotated(&self) -> &[(QualifiedName, FactoryAnnotation)] {
        &self.annotated
    }
}

impl MetadataProvider for JsonMetadataProvider {
    fn lookup(&self, name: &QualifiedName) -> Option<&TypeDecl> {
        self.inner.lookup(name)
    }

    fn resolve_mirror(&self, mirror: &str) -> Option<QualifiedName> {
        self.inner.resolve_mirror(mirror)
    }
}
