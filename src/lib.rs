#![cfg_attr(docsrs, feature(doc_cfg))]
//! # femmesh-io
//!
//! femmesh-io reads and writes finite-element meshes as JSON or YAML records.
//! A record is a flat map of named buckets: node coordinates, one connectivity
//! table per element topology, and named element groups.
//!
//! ## Features
//! - Classification of edges, faces and volumes into twelve element buckets
//!   by node count (`Seg2Elem` .. `Hexa20Elem`)
//! - Lossless round trip of nodes, connectivity and groups through JSON and
//!   YAML, restoring integer keys after deserialization
//! - Format dispatch by file extension, with codec availability injected
//!   through [`Capabilities`](io::Capabilities)
//! - Import into a host document model through the
//!   [`DocumentHost`](document::DocumentHost) and
//!   [`MeshBuilder`](topology::mesh::MeshBuilder) traits
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! femmesh-io = "0.1"
//! # YAML is on by default; opt out with
//! # default-features = false
//! ```
//!
//! ```rust
//! use femmesh_io::prelude::*;
//!
//! let mut mesh = FemMesh::new();
//! mesh.add_node(1, [0.0, 0.0, 0.0]);
//! mesh.add_node(2, [1.0, 0.0, 0.0]);
//! mesh.add_edge(3, vec![1, 2]).unwrap();
//!
//! let record = mesh_to_record(&mesh).unwrap();
//! assert_eq!(record.elements.table(ElementBucket::Seg2).len(), 1);
//! ```
//!
//! ## Errors
//! Every entry point returns [`MeshIoError`](mesh_error::MeshIoError). Nothing
//! is printed; diagnostics go through the `log` facade.

pub mod document;
pub mod io;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::document::{
        DocumentHost, DocumentId, DocumentObject, FEM_MESH_KIND, ObjectId, ObjectKind, Workspace,
    };
    pub use crate::io::convert::mesh_to_record;
    pub use crate::io::format::MeshFormat;
    pub use crate::io::normalize::normalize;
    pub use crate::io::record::{
        ElementTables, ExportRecord, ImportRecord, MeshRecord, NormalizedBucket, NormalizedRecord,
        RawRecord, RecordKey,
    };
    pub use crate::io::{Capabilities, MeshIo, RecordCodec, RecordReader, RecordWriter};
    pub use crate::mesh_error::{ErrorKind, MeshIoError};
    pub use crate::topology::cell_type::{CellType, ElementBucket, ElementCategory};
    pub use crate::topology::mesh::{FemMesh, FemMeshBuilder, MeshBuilder, MeshGroup, MeshSource};
    pub use crate::topology::{ElementId, GroupId, NodeId};
}
