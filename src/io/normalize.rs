//! Restores integer keys on a freshly deserialized record.
//!
//! Text codecs stringify every map key. Mesh builders expect integer node and
//! element indices, but group identifiers in their serialized form, so the
//! group table passes through untouched.

use std::collections::BTreeMap;

use crate::io::record::{NormalizedBucket, NormalizedRecord, RawRecord};
use crate::mesh_error::MeshIoError;

/// True for the group table, matched case-insensitively.
pub fn is_group_bucket(name: &str) -> bool {
    name.eq_ignore_ascii_case("groups")
}

/// Converts keys of every non-group bucket to integers.
///
/// Bucket names are kept verbatim and values are passed through unchanged.
/// The input must be raw, string-keyed data; a key that does not parse as a
/// non-negative integer fails with [`MeshIoError::MalformedKey`].
pub fn normalize(raw: RawRecord) -> Result<NormalizedRecord, MeshIoError> {
    let mut buckets = BTreeMap::new();
    for (name, table) in raw.buckets {
        let bucket = if is_group_bucket(&name) {
            NormalizedBucket::Groups(table)
        } else {
            let mut indexed = BTreeMap::new();
            for (key, value) in table {
                let id = key
                    .as_str()
                    .parse::<u64>()
                    .map_err(|_| MeshIoError::MalformedKey {
                        bucket: name.clone(),
                        key: key.to_string(),
                    })?;
                indexed.insert(id, value);
            }
            NormalizedBucket::Indexed(indexed)
        };
        buckets.insert(name, bucket);
    }
    Ok(NormalizedRecord { buckets })
}
