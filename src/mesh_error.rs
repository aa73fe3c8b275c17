//! MeshIoError: unified error type for femmesh-io public APIs
//!
//! Every conversion and import/export entry point returns this type instead of
//! printing or panicking, so the embedding application decides how to surface
//! failures. [`MeshIoError::kind`] collapses the variants into the coarse
//! categories a user interface usually needs.

use crate::document::{DocumentId, ObjectId};
use crate::io::format::MeshFormat;
use crate::topology::ElementId;
use crate::topology::cell_type::ElementCategory;
use thiserror::Error;

/// Unified error type for femmesh-io operations.
#[derive(Debug, Error)]
pub enum MeshIoError {
    /// An element's node count has no bucket in its category (e.g. 5-node pyramids).
    #[error("unsupported {category} element {element}: no element bucket holds {arity} nodes")]
    UnsupportedElementArity {
        category: ElementCategory,
        element: ElementId,
        arity: usize,
    },
    /// The mesh enumerated an element it cannot resolve to a node list.
    #[error("element {0} is listed by the mesh but has no node list")]
    MissingElement(ElementId),
    /// An element id was added twice to the same mesh.
    #[error("element {0} already exists in the mesh")]
    DuplicateElement(ElementId),
    /// A key in an integer-indexed bucket is not an integer.
    #[error("bucket `{bucket}`: key `{key}` is not a non-negative integer index")]
    MalformedKey { bucket: String, key: String },
    /// A bucket entry has the wrong shape for its bucket.
    #[error("bucket `{bucket}`: entry `{key}` is malformed: {reason}")]
    MalformedEntry {
        bucket: String,
        key: String,
        reason: String,
    },
    /// A connectivity row does not match the node count of its bucket.
    #[error("bucket `{bucket}`: element {element} has {found} nodes, expected {expected}")]
    BucketArityMismatch {
        bucket: &'static str,
        element: ElementId,
        expected: usize,
        found: usize,
    },
    /// The file extension does not name a known mesh format.
    #[error("unknown mesh file extension for `{0}`, please select another importer")]
    UnsupportedFormat(String),
    /// The format is known but its codec is not registered.
    #[error("{0} support is not available in this build")]
    CapabilityUnavailable(MeshFormat),
    /// Export requires exactly one selected object.
    #[error("this exporter can only export one object, got {0}")]
    SelectionCardinality(usize),
    /// The selected object carries no FEM mesh.
    #[error("object `{0}` is not a FEM mesh object")]
    NotMeshObject(String),
    /// The mesh builder returned no mesh.
    #[error("mesh construction from `{0}` produced no mesh")]
    MeshConstructionFailed(String),
    /// A document handle does not belong to the host.
    #[error("unknown document {0:?}")]
    UnknownDocument(DocumentId),
    /// An object handle does not belong to the host.
    #[error("unknown document object {0:?}")]
    UnknownObject(ObjectId),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Coarse failure categories for user-facing reporting.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// Element topology outside the bucket table.
    UnsupportedTopology,
    /// Corrupt or foreign record data.
    MalformedInput,
    /// Unknown file extension.
    UnrecognizedFormat,
    /// Format known but codec not available.
    CapabilityUnavailable,
    /// Wrong number or kind of selected objects.
    InvalidSelection,
    /// Mesh builder produced nothing.
    MeshConstructionFailed,
    /// Stale document or object handle.
    Document,
    /// Filesystem failure.
    Io,
}

impl MeshIoError {
    /// Returns the reporting category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MeshIoError::UnsupportedElementArity { .. } => ErrorKind::UnsupportedTopology,
            MeshIoError::MissingElement(_)
            | MeshIoError::DuplicateElement(_)
            | MeshIoError::MalformedKey { .. }
            | MeshIoError::MalformedEntry { .. }
            | MeshIoError::BucketArityMismatch { .. }
            | MeshIoError::Json(_) => ErrorKind::MalformedInput,
            #[cfg(feature = "yaml")]
            MeshIoError::Yaml(_) => ErrorKind::MalformedInput,
            MeshIoError::UnsupportedFormat(_) => ErrorKind::UnrecognizedFormat,
            MeshIoError::CapabilityUnavailable(_) => ErrorKind::CapabilityUnavailable,
            MeshIoError::SelectionCardinality(_) | MeshIoError::NotMeshObject(_) => {
                ErrorKind::InvalidSelection
            }
            MeshIoError::MeshConstructionFailed(_) => ErrorKind::MeshConstructionFailed,
            MeshIoError::UnknownDocument(_) | MeshIoError::UnknownObject(_) => {
                ErrorKind::Document
            }
            MeshIoError::Io(_) => ErrorKind::Io,
        }
    }
}
