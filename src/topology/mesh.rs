//! In-memory FEM mesh and the traits the converters use to talk to meshes.
//!
//! [`MeshSource`] is the read side needed by export: enumerate elements per
//! category, resolve an element to its nodes, list nodes and groups.
//! [`MeshBuilder`] is the write side needed by import: turn a decoded record
//! into a live mesh, or report that nothing could be built.
//!
//! [`FemMesh`] implements the read side and [`FemMeshBuilder`] builds it.

use std::collections::{BTreeMap, BTreeSet};

use crate::io::record::ImportRecord;
use crate::mesh_error::MeshIoError;
use crate::topology::cell_type::{ElementBucket, ElementCategory};
use crate::topology::{ElementId, GroupId, NodeId};

/// A named set of element ids used for boundary and region tagging.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshGroup {
    pub name: String,
    pub members: BTreeSet<ElementId>,
}

impl MeshGroup {
    /// Group `name` holding `members`; duplicates collapse.
    pub fn new<I>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = ElementId>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().collect(),
        }
    }

    /// True if `element` belongs to the group.
    pub fn contains(&self, element: ElementId) -> bool {
        self.members.contains(&element)
    }

    /// Number of member elements.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Read access to a mesh, as required by the record converter.
pub trait MeshSource {
    /// Ids of all elements in `category`.
    fn elements(&self, category: ElementCategory) -> impl Iterator<Item = ElementId> + '_;

    /// Ordered node ids of `element`, or `None` if the id is unknown.
    fn element_nodes(&self, element: ElementId) -> Option<&[NodeId]>;

    /// All nodes with their coordinates.
    fn nodes(&self) -> impl Iterator<Item = (NodeId, [f64; 3])> + '_;

    /// All groups with their name and members.
    fn groups(&self) -> impl Iterator<Item = (GroupId, &MeshGroup)> + '_;

    fn edges(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements(ElementCategory::Edge)
    }

    fn faces(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements(ElementCategory::Face)
    }

    fn volumes(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements(ElementCategory::Volume)
    }
}

/// Builds a live mesh from a decoded record.
pub trait MeshBuilder {
    type Mesh;

    /// Returns `Ok(None)` when the record yields no mesh.
    fn build_mesh(&self, record: &ImportRecord) -> Result<Option<Self::Mesh>, MeshIoError>;
}

#[derive(Clone, Debug, PartialEq)]
struct MeshElement {
    category: ElementCategory,
    nodes: Vec<NodeId>,
}

/// Finite-element mesh with nodes, categorized elements and groups.
///
/// Element ids share one id space across edges, faces and volumes. The mesh
/// does not check that element nodes exist or that node counts are supported;
/// unsupported shapes are reported when the mesh is converted to a record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FemMesh {
    nodes: BTreeMap<NodeId, [f64; 3]>,
    elements: BTreeMap<ElementId, MeshElement>,
    groups: BTreeMap<GroupId, MeshGroup>,
}

impl FemMesh {
    /// Empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or moves a node. Returns the previous coordinates, if any.
    pub fn add_node(&mut self, id: NodeId, coords: [f64; 3]) -> Option<[f64; 3]> {
        self.nodes.insert(id, coords)
    }

    /// Adds an element to `category`.
    pub fn add_element(
        &mut self,
        category: ElementCategory,
        id: ElementId,
        nodes: Vec<NodeId>,
    ) -> Result<(), MeshIoError> {
        if self.elements.contains_key(&id) {
            return Err(MeshIoError::DuplicateElement(id));
        }
        self.elements.insert(id, MeshElement { category, nodes });
        Ok(())
    }

    /// Adds a 1D element.
    pub fn add_edge(&mut self, id: ElementId, nodes: Vec<NodeId>) -> Result<(), MeshIoError> {
        self.add_element(ElementCategory::Edge, id, nodes)
    }

    /// Adds a 2D element.
    pub fn add_face(&mut self, id: ElementId, nodes: Vec<NodeId>) -> Result<(), MeshIoError> {
        self.add_element(ElementCategory::Face, id, nodes)
    }

    /// Adds a 3D element.
    pub fn add_volume(&mut self, id: ElementId, nodes: Vec<NodeId>) -> Result<(), MeshIoError> {
        self.add_element(ElementCategory::Volume, id, nodes)
    }

    /// Inserts or replaces group `id`. Returns the replaced group, if any.
    pub fn add_group(&mut self, id: GroupId, group: MeshGroup) -> Option<MeshGroup> {
        self.groups.insert(id, group)
    }

    /// Coordinates of node `id`.
    pub fn node(&self, id: NodeId) -> Option<[f64; 3]> {
        self.nodes.get(&id).copied()
    }

    /// Group stored under `id`.
    pub fn group(&self, id: GroupId) -> Option<&MeshGroup> {
        self.groups.get(&id)
    }

    /// Category of `element`, if present.
    pub fn element_category(&self, element: ElementId) -> Option<ElementCategory> {
        self.elements.get(&element).map(|e| e.category)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements in `category`.
    pub fn element_count(&self, category: ElementCategory) -> usize {
        self.elements
            .values()
            .filter(|e| e.category == category)
            .count()
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// True when the mesh has neither nodes nor elements.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.elements.is_empty()
    }
}

impl MeshSource for FemMesh {
    fn elements(&self, category: ElementCategory) -> impl Iterator<Item = ElementId> + '_ {
        self.elements
            .iter()
            .filter(move |(_, e)| e.category == category)
            .map(|(&id, _)| id)
    }

    fn element_nodes(&self, element: ElementId) -> Option<&[NodeId]> {
        self.elements.get(&element).map(|e| e.nodes.as_slice())
    }

    fn nodes(&self) -> impl Iterator<Item = (NodeId, [f64; 3])> + '_ {
        self.nodes.iter().map(|(&id, &coords)| (id, coords))
    }

    fn groups(&self) -> impl Iterator<Item = (GroupId, &MeshGroup)> + '_ {
        self.groups.iter().map(|(&id, group)| (id, group))
    }
}

/// Builds a [`FemMesh`] from an import record.
///
/// A record without nodes produces no mesh. Group keys arrive in their
/// serialized string form and are parsed to [`GroupId`] here.
#[derive(Clone, Copy, Debug, Default)]
pub struct FemMeshBuilder;

impl MeshBuilder for FemMeshBuilder {
    type Mesh = FemMesh;

    fn build_mesh(&self, record: &ImportRecord) -> Result<Option<FemMesh>, MeshIoError> {
        if record.nodes.is_empty() {
            log::debug!("record has no nodes, no mesh built");
            return Ok(None);
        }

        let mut mesh = FemMesh::new();
        for (&id, &coords) in &record.nodes {
            mesh.add_node(id, coords);
        }
        for bucket in ElementBucket::ALL {
            for (&id, nodes) in record.elements.table(bucket) {
                mesh.add_element(bucket.category(), id, nodes.clone())?;
            }
        }
        for (key, group) in &record.groups {
            let id = key
                .trim()
                .parse::<GroupId>()
                .map_err(|_| MeshIoError::MalformedKey {
                    bucket: crate::io::record::GROUPS_BUCKET.to_string(),
                    key: key.clone(),
                })?;
            mesh.add_group(id, group.clone());
        }
        log::debug!(
            "built mesh: {} nodes, {} edges, {} faces, {} volumes, {} groups",
            mesh.node_count(),
            mesh.element_count(ElementCategory::Edge),
            mesh.element_count(ElementCategory::Face),
            mesh.element_count(ElementCategory::Volume),
            mesh.group_count()
        );
        Ok(Some(mesh))
    }
}
