//! Mesh topology: identifiers, element buckets, and the in-memory FEM mesh.

pub mod cell_type;
pub mod mesh;

/// Index of a mesh node.
pub type NodeId = u64;
/// Index of an edge, face or volume element. Unique across categories.
pub type ElementId = u64;
/// Index of a named element group.
pub type GroupId = u64;
