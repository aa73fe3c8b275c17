//! Mesh to record conversion.

use std::collections::BTreeMap;

use crate::io::record::{ElementTables, ExportRecord, NODES_BUCKET};
use crate::mesh_error::MeshIoError;
use crate::topology::cell_type::{ElementBucket, ElementCategory};
use crate::topology::mesh::MeshSource;

/// Builds the export record of `mesh`.
///
/// Each edge, face and volume lands in the bucket its category's arity table
/// selects. The first element whose node count has no bucket aborts the
/// conversion with [`MeshIoError::UnsupportedElementArity`]; no partial
/// record is returned. Coordinates and groups are copied unchanged, but a
/// NaN or infinite coordinate fails with [`MeshIoError::MalformedEntry`]
/// since neither text format can store it.
pub fn mesh_to_record<M: MeshSource>(mesh: &M) -> Result<ExportRecord, MeshIoError> {
    let mut elements = ElementTables::new();
    for category in ElementCategory::ALL {
        for element in mesh.elements(category) {
            let nodes = mesh
                .element_nodes(element)
                .ok_or(MeshIoError::MissingElement(element))?;
            let arity = nodes.len();
            let bucket = ElementBucket::classify(category, arity).ok_or(
                MeshIoError::UnsupportedElementArity {
                    category,
                    element,
                    arity,
                },
            )?;
            elements.insert(bucket, element, nodes.to_vec());
        }
    }

    let mut nodes = BTreeMap::new();
    for (id, coords) in mesh.nodes() {
        if let Some(bad) = coords.iter().find(|c| !c.is_finite()) {
            return Err(MeshIoError::MalformedEntry {
                bucket: NODES_BUCKET.to_string(),
                key: id.to_string(),
                reason: format!("non-finite coordinate {bad}"),
            });
        }
        nodes.insert(id, coords);
    }

    let record = ExportRecord {
        nodes,
        elements,
        groups: mesh
            .groups()
            .map(|(id, group)| (id, group.clone()))
            .collect(),
    };
    log::debug!(
        "converted mesh: {} nodes, {} elements, {} groups",
        record.nodes.len(),
        record.elements.len(),
        record.groups.len()
    );
    Ok(record)
}
