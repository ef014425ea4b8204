//! # Schema Sources
//!
//! A [`SchemaSource`] turns a [`SchemaDescriptor`] into the raw bytes of a
//! schema document. Two stores ship with the crate:
//!
//! - [`DirectorySource`] reads `{root}/{descriptor without leading /}`.
//! - [`StaticSource`] serves documents held in memory, e.g. bundled with
//!   `include_bytes!`.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use reqschema_core::SchemaDescriptor;
use thiserror::Error;

/// Errors raised while fetching a schema document.
#[derive(Error, Debug)]
pub enum SourceError {
    /// No document exists for the descriptor.
    #[error("schema document not found: {0}")]
    NotFound(String),

    /// The descriptor would escape the source root.
    #[error("invalid schema path: {0}")]
    InvalidPath(String),

    /// The document exists but could not be read.
    #[error("failed to read schema document {path}: {source}")]
    Io {
        /// Filesystem path that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Lookup of schema documents by descriptor.
pub trait SchemaSource: Send + Sync + std::fmt::Debug {
    /// Fetch the raw document identified by `descriptor`.
    fn fetch(&self, descriptor: &SchemaDescriptor) -> Result<Vec<u8>, SourceError>;
}

// ---------------------------------------------------------------------------
// DirectorySource
// ---------------------------------------------------------------------------

/// Schema documents stored as files under a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Serve documents from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory documents are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a descriptor onto a file below the root. Only plain path
    /// components are accepted.
    fn path_for(&self, descriptor: &SchemaDescriptor) -> Result<PathBuf, SourceError> {
        let relative = Path::new(descriptor.resource_name());
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(SourceError::InvalidPath(descriptor.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl SchemaSource for DirectorySource {
    fn fetch(&self, descriptor: &SchemaDescriptor) -> Result<Vec<u8>, SourceError> {
        let path = self.path_for(descriptor)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(descriptor.to_string()))
            }
            Err(e) => Err(SourceError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// StaticSource
// ---------------------------------------------------------------------------

/// Schema documents held in memory, keyed by resource name
/// (the descriptor without its leading `/`).
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: HashMap<String, Vec<u8>>,
}

impl StaticSource {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, builder style.
    pub fn with(mut self, resource_name: impl Into<String>, document: impl Into<Vec<u8>>) -> Self {
        self.insert(resource_name, document);
        self
    }

    /// Add or replace a document.
    pub fn insert(&mut self, resource_name: impl Into<String>, document: impl Into<Vec<u8>>) {
        self.documents.insert(resource_name.into(), document.into());
    }

    /// Number of documents held.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl SchemaSource for StaticSource {
    fn fetch(&self, descriptor: &SchemaDescriptor) -> Result<Vec<u8>, SourceError> {
        self.documents
            .get(descriptor.resource_name())
            .cloned()
            .ok_or_else(|| SourceError::NotFound(descriptor.to_string()))
    }
}
