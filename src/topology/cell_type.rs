//! Element categories, cell shapes and the arity-to-bucket tables.
//!
//! A FEM mesh stores its elements in three categories (edges, faces,
//! volumes). Inside a category the node count of an element is enough to pick
//! its element bucket, e.g. a 6-node face is a quadratic triangle while a
//! 6-node volume is a linear prism.

use std::fmt;

/// Geometric shape of a mesh element.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CellType {
    /// Line element, stored in `Seg2Elem`/`Seg3Elem`.
    Segment,
    /// Stored in `Tria3Elem`/`Tria6Elem`.
    Triangle,
    /// Stored in `Quad4Elem`/`Quad8Elem`.
    Quadrilateral,
    /// Stored in `Tetra4Elem`/`Tetra10Elem`.
    Tetrahedron,
    /// Brick element, stored in `Hexa8Elem`/`Hexa20Elem`.
    Hexahedron,
    /// Pentahedron, stored in `Penta6Elem`/`Penta15Elem`.
    Prism,
    /// Five-node volume with no bucket; export rejects it.
    Pyramid,
}

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Segment => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Hexahedron | CellType::Prism | CellType::Pyramid => 3,
        }
    }

    /// Returns the element category holding cells of this shape.
    pub fn category(self) -> ElementCategory {
        match self.dimension() {
            1 => ElementCategory::Edge,
            2 => ElementCategory::Face,
            _ => ElementCategory::Volume,
        }
    }
}

/// The three element collections of a FEM mesh.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ElementCategory {
    Edge,
    Face,
    Volume,
}

const EDGE_BUCKETS: &[(usize, ElementBucket)] =
    &[(2, ElementBucket::Seg2), (3, ElementBucket::Seg3)];

const FACE_BUCKETS: &[(usize, ElementBucket)] = &[
    (3, ElementBucket::Tria3),
    (6, ElementBucket::Tria6),
    (4, ElementBucket::Quad4),
    (8, ElementBucket::Quad8),
];

const VOLUME_BUCKETS: &[(usize, ElementBucket)] = &[
    (4, ElementBucket::Tetra4),
    (10, ElementBucket::Tetra10),
    (8, ElementBucket::Hexa8),
    (20, ElementBucket::Hexa20),
    (6, ElementBucket::Penta6),
    (15, ElementBucket::Penta15),
];

impl ElementCategory {
    /// All categories in traversal order.
    pub const ALL: [ElementCategory; 3] = [
        ElementCategory::Edge,
        ElementCategory::Face,
        ElementCategory::Volume,
    ];

    /// Arity-to-bucket table of this category.
    pub fn buckets(self) -> &'static [(usize, ElementBucket)] {
        match self {
            ElementCategory::Edge => EDGE_BUCKETS,
            ElementCategory::Face => FACE_BUCKETS,
            ElementCategory::Volume => VOLUME_BUCKETS,
        }
    }

    /// Node counts accepted by this category, ascending.
    pub fn supported_arities(self) -> Vec<usize> {
        let mut arities: Vec<usize> = self.buckets().iter().map(|&(n, _)| n).collect();
        arities.sort_unstable();
        arities
    }

    /// Lowercase category name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            ElementCategory::Edge => "edge",
            ElementCategory::Face => "face",
            ElementCategory::Volume => "volume",
        }
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named connectivity table of one element topology.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ElementBucket {
    Seg2,
    Seg3,
    Tria3,
    Tria6,
    Quad4,
    Quad8,
    Tetra4,
    Tetra10,
    Hexa8,
    Hexa20,
    Penta6,
    Penta15,
}

impl ElementBucket {
    /// All buckets in the order they are serialized.
    pub const ALL: [ElementBucket; 12] = [
        ElementBucket::Seg2,
        ElementBucket::Seg3,
        ElementBucket::Tria3,
        ElementBucket::Tria6,
        ElementBucket::Quad4,
        ElementBucket::Quad8,
        ElementBucket::Tetra4,
        ElementBucket::Tetra10,
        ElementBucket::Hexa8,
        ElementBucket::Hexa20,
        ElementBucket::Penta6,
        ElementBucket::Penta15,
    ];

    /// Picks the bucket for an element of `category` with `arity` nodes.
    ///
    /// Returns `None` when the category has no bucket of that size, which is
    /// the case for every pyramid.
    pub fn classify(category: ElementCategory, arity: usize) -> Option<Self> {
        category
            .buckets()
            .iter()
            .find(|&&(n, _)| n == arity)
            .map(|&(_, bucket)| bucket)
    }

    /// Record key of this bucket.
    pub fn name(self) -> &'static str {
        match self {
            ElementBucket::Seg2 => "Seg2Elem",
            ElementBucket::Seg3 => "Seg3Elem",
            ElementBucket::Tria3 => "Tria3Elem",
            ElementBucket::Tria6 => "Tria6Elem",
            ElementBucket::Quad4 => "Quad4Elem",
            ElementBucket::Quad8 => "Quad8Elem",
            ElementBucket::Tetra4 => "Tetra4Elem",
            ElementBucket::Tetra10 => "Tetra10Elem",
            ElementBucket::Hexa8 => "Hexa8Elem",
            ElementBucket::Hexa20 => "Hexa20Elem",
            ElementBucket::Penta6 => "Penta6Elem",
            ElementBucket::Penta15 => "Penta15Elem",
        }
    }

    /// Inverse of [`ElementBucket::name`]; matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.name() == name)
    }

    /// Number of nodes per element.
    pub fn arity(self) -> usize {
        match self {
            ElementBucket::Seg2 => 2,
            ElementBucket::Seg3 | ElementBucket::Tria3 => 3,
            ElementBucket::Quad4 | ElementBucket::Tetra4 => 4,
            ElementBucket::Tria6 | ElementBucket::Penta6 => 6,
            ElementBucket::Quad8 | ElementBucket::Hexa8 => 8,
            ElementBucket::Tetra10 => 10,
            ElementBucket::Penta15 => 15,
            ElementBucket::Hexa20 => 20,
        }
    }

    /// Cell shape of the elements stored in this bucket.
    pub fn shape(self) -> CellType {
        match self {
            ElementBucket::Seg2 | ElementBucket::Seg3 => CellType::Segment,
            ElementBucket::Tria3 | ElementBucket::Tria6 => CellType::Triangle,
            ElementBucket::Quad4 | ElementBucket::Quad8 => CellType::Quadrilateral,
            ElementBucket::Tetra4 | ElementBucket::Tetra10 => CellType::Tetrahedron,
            ElementBucket::Hexa8 | ElementBucket::Hexa20 => CellType::Hexahedron,
            ElementBucket::Penta6 | ElementBucket::Penta15 => CellType::Prism,
        }
    }

    /// Category whose arity table selects this bucket.
    pub fn category(self) -> ElementCategory {
        self.shape().category()
    }

    /// True for second-order elements carrying mid-side nodes.
    pub fn is_quadratic(self) -> bool {
        matches!(
            self,
            ElementBucket::Seg3
                | ElementBucket::Tria6
                | ElementBucket::Quad8
                | ElementBucket::Tetra10
                | ElementBucket::Hexa20
                | ElementBucket::Penta15
        )
    }
}

impl fmt::Display for ElementBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
