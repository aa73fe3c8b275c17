//! Record: the flat, serialization-facing form of a FEM mesh.
//!
//! On disk a record is a map from bucket name to bucket contents:
//!
//! ```text
//! Nodes      : node id    -> [x, y, z]
//! Seg2Elem   : element id -> [n0, n1]
//! ...          (one bucket per ElementBucket, always present)
//! Groups     : group id   -> [name, [element ids]]
//! ```
//!
//! Three in-memory shapes exist along the import/export paths:
//! - [`MeshRecord`], fully typed. Export produces [`ExportRecord`] with
//!   integer group keys; import decodes to [`ImportRecord`] whose group keys
//!   keep their serialized string form.
//! - [`RawRecord`], exactly what a text codec hands back: string bucket names,
//!   string keys, untyped values.
//! - [`NormalizedRecord`], a raw record after
//!   [`normalize`](crate::io::normalize::normalize) turned indexed keys back
//!   into integers.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::{SerializeMap, SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mesh_error::MeshIoError;
use crate::topology::cell_type::ElementBucket;
use crate::topology::mesh::MeshGroup;
use crate::topology::{ElementId, GroupId, NodeId};

/// Bucket holding node coordinates.
pub const NODES_BUCKET: &str = "Nodes";
/// Bucket holding named element groups.
pub const GROUPS_BUCKET: &str = "Groups";

/// Connectivity tables for all twelve element buckets.
///
/// Every bucket is present, possibly empty, so two tables compare equal
/// exactly when they hold the same elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementTables {
    tables: BTreeMap<ElementBucket, BTreeMap<ElementId, Vec<NodeId>>>,
}

impl Default for ElementTables {
    fn default() -> Self {
        Self {
            tables: ElementBucket::ALL
                .into_iter()
                .map(|bucket| (bucket, BTreeMap::new()))
                .collect(),
        }
    }
}

impl ElementTables {
    /// Tables for all twelve buckets, each empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connectivity of `bucket`.
    pub fn table(&self, bucket: ElementBucket) -> &BTreeMap<ElementId, Vec<NodeId>> {
        // populated for every bucket in Default
        &self.tables[&bucket]
    }

    /// Inserts an element row. Returns the replaced row, if any.
    pub fn insert(
        &mut self,
        bucket: ElementBucket,
        element: ElementId,
        nodes: Vec<NodeId>,
    ) -> Option<Vec<NodeId>> {
        self.tables.entry(bucket).or_default().insert(element, nodes)
    }

    /// Iterates buckets in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementBucket, &BTreeMap<ElementId, Vec<NodeId>>)> {
        self.tables.iter().map(|(&bucket, table)| (bucket, table))
    }

    /// Total number of elements over all buckets.
    pub fn len(&self) -> usize {
        self.tables.values().map(BTreeMap::len).sum()
    }

    /// True when no bucket holds an element.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Typed record, generic over the group key type.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshRecord<G = GroupId> {
    pub nodes: BTreeMap<NodeId, [f64; 3]>,
    pub elements: ElementTables,
    pub groups: BTreeMap<G, MeshGroup>,
}

/// Record produced by export, group ids are integers.
pub type ExportRecord = MeshRecord<GroupId>;
/// Record consumed by mesh builders, group ids stay in serialized form.
pub type ImportRecord = MeshRecord<String>;

impl<G: Ord> Default for MeshRecord<G> {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
            elements: ElementTables::new(),
            groups: BTreeMap::new(),
        }
    }
}

impl<G: Ord + fmt::Display> MeshRecord<G> {
    /// Converts group keys to the string form a text codec would produce.
    pub fn into_import(self) -> ImportRecord {
        MeshRecord {
            nodes: self.nodes,
            elements: self.elements,
            groups: self
                .groups
                .into_iter()
                .map(|(key, group)| (key.to_string(), group))
                .collect(),
        }
    }
}

impl<G> MeshRecord<G> {
    /// Bucket names in serialization order.
    pub fn bucket_names() -> impl Iterator<Item = &'static str> {
        std::iter::once(NODES_BUCKET)
            .chain(ElementBucket::ALL.into_iter().map(ElementBucket::name))
            .chain(std::iter::once(GROUPS_BUCKET))
    }
}

struct GroupEntry<'a>(&'a MeshGroup);

impl Serialize for GroupEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.0.name)?;
        tuple.serialize_element(&self.0.members)?;
        tuple.end()
    }
}

struct GroupTable<'a, G>(&'a BTreeMap<G, MeshGroup>);

impl<G: Serialize> Serialize for GroupTable<'_, G> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, group)| (key, GroupEntry(group))))
    }
}

impl<G: Serialize> Serialize for MeshRecord<G> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ElementBucket::ALL.len() + 2))?;
        map.serialize_entry(NODES_BUCKET, &self.nodes)?;
        for (bucket, table) in self.elements.iter() {
            map.serialize_entry(bucket.name(), table)?;
        }
        map.serialize_entry(GROUPS_BUCKET, &GroupTable(&self.groups))?;
        map.end()
    }
}

/// A bucket key as it arrives from a text codec.
///
/// JSON object keys are always strings; YAML may hand back plain integer
/// scalars. Both are kept as their textual form.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey(String);

impl RecordKey {
    /// Key from its serialized text.
    pub fn new(key: impl Into<String>) -> Self {
        RecordKey(key.into())
    }

    /// The key text as written in the file.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordKey {
    fn from(key: &str) -> Self {
        RecordKey::new(key)
    }
}

struct RecordKeyVisitor;

impl Visitor<'_> for RecordKeyVisitor {
    type Value = RecordKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer map key")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordKey, E> {
        Ok(RecordKey::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RecordKey, E> {
        Ok(RecordKey(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordKey, E> {
        Ok(RecordKey(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordKey, E> {
        Ok(RecordKey(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for RecordKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RecordKeyVisitor)
    }
}

impl Serialize for RecordKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Contents of one raw bucket.
pub type RawBucket = BTreeMap<RecordKey, Value>;

/// A record exactly as deserialized from text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    pub buckets: BTreeMap<String, RawBucket>,
}

impl RawRecord {
    /// Bucket stored under `name`, matched exactly.
    pub fn bucket(&self, name: &str) -> Option<&RawBucket> {
        self.buckets.get(name)
    }
}

/// One bucket of a normalized record.
#[derive(Clone, Debug, PartialEq)]
pub enum NormalizedBucket {
    /// Node or element table, keys parsed to integers.
    Indexed(BTreeMap<u64, Value>),
    /// Group table, keys untouched.
    Groups(RawBucket),
}

/// A raw record whose indexed buckets carry integer keys again.
///
/// Bucket names are preserved verbatim.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedRecord {
    pub buckets: BTreeMap<String, NormalizedBucket>,
}

impl NormalizedRecord {
    /// Bucket stored under `name`, matched exactly.
    pub fn bucket(&self, name: &str) -> Option<&NormalizedBucket> {
        self.buckets.get(name)
    }
}

fn malformed(bucket: &str, key: impl fmt::Display, err: serde_json::Error) -> MeshIoError {
    MeshIoError::MalformedEntry {
        bucket: bucket.to_string(),
        key: key.to_string(),
        reason: err.to_string(),
    }
}

fn decode_groups(
    name: &str,
    table: &RawBucket,
    groups: &mut BTreeMap<String, MeshGroup>,
) -> Result<(), MeshIoError> {
    for (key, value) in table {
        let (group_name, members): (String, Vec<ElementId>) =
            serde_json::from_value(value.clone()).map_err(|e| malformed(name, key, e))?;
        groups.insert(key.to_string(), MeshGroup::new(group_name, members));
    }
    Ok(())
}

fn decode_indexed(
    name: &str,
    table: &BTreeMap<u64, Value>,
    record: &mut ImportRecord,
) -> Result<(), MeshIoError> {
    if name == NODES_BUCKET {
        for (&id, value) in table {
            let coords: [f64; 3] =
                serde_json::from_value(value.clone()).map_err(|e| malformed(name, id, e))?;
            record.nodes.insert(id, coords);
        }
        return Ok(());
    }

    let Some(bucket) = ElementBucket::from_name(name) else {
        log::warn!("skipping unknown record bucket `{name}` ({} entries)", table.len());
        return Ok(());
    };
    for (&id, value) in table {
        let nodes: Vec<NodeId> =
            serde_json::from_value(value.clone()).map_err(|e| malformed(name, id, e))?;
        if nodes.len() != bucket.arity() {
            return Err(MeshIoError::BucketArityMismatch {
                bucket: bucket.name(),
                element: id,
                expected: bucket.arity(),
                found: nodes.len(),
            });
        }
        record.elements.insert(bucket, id, nodes);
    }
    Ok(())
}

impl TryFrom<&NormalizedRecord> for ImportRecord {
    type Error = MeshIoError;

    /// Decodes bucket values into typed rows.
    ///
    /// Missing buckets decode as empty; buckets with unknown names are
    /// skipped with a warning.
    fn try_from(normalized: &NormalizedRecord) -> Result<Self, Self::Error> {
        let mut record = ImportRecord::default();
        for (name, bucket) in &normalized.buckets {
            match bucket {
                NormalizedBucket::Groups(table) => decode_groups(name, table, &mut record.groups)?,
                NormalizedBucket::Indexed(table) => decode_indexed(name, table, &mut record)?,
            }
        }
        Ok(record)
    }
}

impl TryFrom<NormalizedRecord> for ImportRecord {
    type Error = MeshIoError;

    fn try_from(normalized: NormalizedRecord) -> Result<Self, Self::Error> {
        ImportRecord::try_from(&normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_tables_hold_every_bucket() {
        let tables = ElementTables::new();
        assert_eq!(tables.iter().count(), ElementBucket::ALL.len());
        assert!(tables.is_empty());
        let order: Vec<_> = tables.iter().map(|(b, _)| b).collect();
        assert_eq!(order, ElementBucket::ALL.to_vec());
    }

    #[test]
    fn bucket_names_are_canonical() {
        let names: Vec<_> = ExportRecord::bucket_names().collect();
        assert_eq!(names.len(), 14);
        assert_eq!(names.first(), Some(&"Nodes"));
        assert_eq!(names.last(), Some(&"Groups"));
        assert!(names.contains(&"Tetra10Elem"));
    }

    #[test]
    fn export_record_serializes_all_buckets_with_group_tuples() {
        let mut record = ExportRecord::default();
        record.nodes.insert(1, [0.0, 0.5, 1.0]);
        record.elements.insert(ElementBucket::Seg2, 4, vec![1, 2]);
        record.groups.insert(0, MeshGroup::new("Fixed", [4]));

        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 14);
        assert_eq!(value["Nodes"]["1"], json!([0.0, 0.5, 1.0]));
        assert_eq!(value["Seg2Elem"]["4"], json!([1, 2]));
        assert_eq!(value["Hexa20Elem"], json!({}));
        assert_eq!(value["Groups"]["0"], json!(["Fixed", [4]]));
    }

    #[test]
    fn record_keys_accept_strings_and_integers() {
        let from_str: RecordKey = serde_json::from_value(json!("12")).unwrap();
        let from_int: RecordKey = serde_json::from_value(json!(12)).unwrap();
        assert_eq!(from_str, from_int);
        assert_eq!(from_int.as_str(), "12");
    }

    #[test]
    fn decode_rejects_wrong_arity_rows() {
        let mut normalized = NormalizedRecord::default();
        normalized.buckets.insert(
            "Tetra4Elem".to_string(),
            NormalizedBucket::Indexed(BTreeMap::from([(3, json!([1, 2, 3]))])),
        );
        let err = ImportRecord::try_from(&normalized).unwrap_err();
        assert!(matches!(
            err,
            MeshIoError::BucketArityMismatch { expected: 4, found: 3, element: 3, .. }
        ));
    }

    #[test]
    fn decode_reports_malformed_values() {
        let mut normalized = NormalizedRecord::default();
        normalized.buckets.insert(
            NODES_BUCKET.to_string(),
            NormalizedBucket::Indexed(BTreeMap::from([(1, json!("origin"))])),
        );
        let err = ImportRecord::try_from(normalized).unwrap_err();
        assert!(matches!(err, MeshIoError::MalformedEntry { ref bucket, ref key, .. }
            if bucket == "Nodes" && key == "1"));
    }

    #[test]
    fn decode_skips_unknown_buckets() {
        let mut normalized = NormalizedRecord::default();
        normalized.buckets.insert(
            "Pyra5Elem".to_string(),
            NormalizedBucket::Indexed(BTreeMap::from([(1, json!([1, 2, 3, 4, 5]))])),
        );
        let record = ImportRecord::try_from(&normalized).unwrap();
        assert!(record.elements.is_empty());
    }
}
