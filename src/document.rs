//! Host document model.
//!
//! Import creates mesh objects inside documents and export reads a selection
//! of objects. [`DocumentHost`] is the interface the import path needs from
//! the host application; [`Workspace`] is a small in-memory host.

use crate::mesh_error::MeshIoError;
use crate::topology::mesh::FemMesh;

/// Type tag of mesh-bearing objects.
pub const FEM_MESH_KIND: &str = "Fem::FemMeshObject";

/// Handle of a document inside a host.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DocumentId(usize);

/// Handle of an object inside a host document.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ObjectId {
    pub document: DocumentId,
    index: usize,
}

/// Kind of a document object.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ObjectKind {
    FemMesh,
    Other(String),
}

impl ObjectKind {
    /// Type tag of the object, e.g. [`FEM_MESH_KIND`].
    pub fn tag(&self) -> &str {
        match self {
            ObjectKind::FemMesh => FEM_MESH_KIND,
            ObjectKind::Other(tag) => tag,
        }
    }
}

/// A named object with an optional mesh payload.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentObject<M = FemMesh> {
    pub name: String,
    pub kind: ObjectKind,
    pub mesh: Option<M>,
}

impl<M> DocumentObject<M> {
    /// Object of `kind` without a mesh payload.
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            mesh: None,
        }
    }

    /// A mesh object carrying `mesh`.
    pub fn with_mesh(name: impl Into<String>, mesh: M) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::FemMesh,
            mesh: Some(mesh),
        }
    }

    /// True when the object is of the mesh kind.
    pub fn is_mesh_bearing(&self) -> bool {
        self.kind == ObjectKind::FemMesh
    }

    /// The mesh payload of a mesh-bearing object.
    pub fn mesh(&self) -> Option<&M> {
        if self.is_mesh_bearing() {
            self.mesh.as_ref()
        } else {
            None
        }
    }
}

/// Document services the import path relies on.
pub trait DocumentHost {
    type Mesh;

    /// Returns the document called `name`, creating it if needed.
    fn get_or_create_document(&mut self, name: &str) -> DocumentId;

    fn set_active(&mut self, document: DocumentId) -> Result<(), MeshIoError>;

    fn active_document(&self) -> Option<DocumentId>;

    /// Adds an empty object to `document`.
    fn create_object(
        &mut self,
        document: DocumentId,
        kind: ObjectKind,
        name: &str,
    ) -> Result<ObjectId, MeshIoError>;

    /// Attaches `mesh` as the payload of `object`.
    fn set_mesh(&mut self, object: ObjectId, mesh: Self::Mesh) -> Result<(), MeshIoError>;
}

/// A named list of objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document<M = FemMesh> {
    pub name: String,
    pub objects: Vec<DocumentObject<M>>,
}

impl<M> Document<M> {
    /// Looks up an object by name.
    pub fn object(&self, name: &str) -> Option<&DocumentObject<M>> {
        self.objects.iter().find(|o| o.name == name)
    }
}

/// In-memory [`DocumentHost`].
#[derive(Clone, Debug, PartialEq)]
pub struct Workspace<M = FemMesh> {
    documents: Vec<Document<M>>,
    active: Option<DocumentId>,
}

impl<M> Default for Workspace<M> {
    fn default() -> Self {
        Self {
            documents: Vec::new(),
            active: None,
        }
    }
}

impl<M> Workspace<M> {
    /// Empty workspace without an active document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Document with id `id`, if any.
    pub fn document(&self, id: DocumentId) -> Option<&Document<M>> {
        self.documents.get(id.0)
    }

    /// Id of the document called `name`, if any.
    pub fn find_document(&self, name: &str) -> Option<DocumentId> {
        self.documents
            .iter()
            .position(|d| d.name == name)
            .map(DocumentId)
    }

    /// Object behind `id`, if its document and index exist.
    pub fn object(&self, id: ObjectId) -> Option<&DocumentObject<M>> {
        self.document(id.document)?.objects.get(id.index)
    }

    /// All documents in creation order.
    pub fn documents(&self) -> &[Document<M>] {
        &self.documents
    }

    /// Total number of objects over all documents.
    pub fn object_count(&self) -> usize {
        self.documents.iter().map(|d| d.objects.len()).sum()
    }
}

impl<M> DocumentHost for Workspace<M> {
    type Mesh = M;

    fn get_or_create_document(&mut self, name: &str) -> DocumentId {
        if let Some(id) = self.find_document(name) {
            return id;
        }
        log::debug!("creating document `{name}`");
        self.documents.push(Document {
            name: name.to_string(),
            objects: Vec::new(),
        });
        DocumentId(self.documents.len() - 1)
    }

    fn set_active(&mut self, document: DocumentId) -> Result<(), MeshIoError> {
        if document.0 >= self.documents.len() {
            return Err(MeshIoError::UnknownDocument(document));
        }
        self.active = Some(document);
        Ok(())
    }

    fn active_document(&self) -> Option<DocumentId> {
        self.active
    }

    fn create_object(
        &mut self,
        document: DocumentId,
        kind: ObjectKind,
        name: &str,
    ) -> Result<ObjectId, MeshIoError> {
        let doc = self
            .documents
            .get_mut(document.0)
            .ok_or(MeshIoError::UnknownDocument(document))?;
        doc.objects.push(DocumentObject::new(name, kind));
        Ok(ObjectId {
            document,
            index: doc.objects.len() - 1,
        })
    }

    fn set_mesh(&mut self, object: ObjectId, mesh: M) -> Result<(), MeshIoError> {
        let slot = self
            .documents
            .get_mut(object.document.0)
            .and_then(|d| d.objects.get_mut(object.index))
            .ok_or(MeshIoError::UnknownObject(object))?;
        slot.mesh = Some(mesh);
        Ok(())
    }
}
