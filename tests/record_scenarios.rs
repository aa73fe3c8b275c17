use std::collections::BTreeMap;

use femmesh_io::io::json::JsonCodec;
use femmesh_io::io::record::{NormalizedBucket, RecordKey};
use femmesh_io::prelude::*;
use serde_json::json;

const EDGE: ElementId = 11;
const FACE: ElementId = 21;
const VOLUME: ElementId = 31;

fn scenario_a_mesh() -> FemMesh {
    let mut mesh = FemMesh::new();
    mesh.add_node(1, [0.0, 0.0, 0.0]);
    mesh.add_node(2, [1.0, 0.0, 0.0]);
    mesh.add_node(3, [0.0, 1.0, 0.0]);
    mesh.add_node(4, [0.0, 0.0, 1.0]);
    mesh.add_edge(EDGE, vec![1, 2]).unwrap();
    mesh.add_face(FACE, vec![1, 2, 3]).unwrap();
    mesh.add_volume(VOLUME, vec![1, 2, 3, 4]).unwrap();
    mesh.add_group(0, MeshGroup::new("Fixed", [EDGE]));
    mesh
}

#[test]
fn scenario_a_convert_fills_expected_buckets() {
    let record = mesh_to_record(&scenario_a_mesh()).expect("convert");

    let expected: BTreeMap<ElementBucket, (ElementId, Vec<NodeId>)> = BTreeMap::from([
        (ElementBucket::Seg2, (EDGE, vec![1, 2])),
        (ElementBucket::Tria3, (FACE, vec![1, 2, 3])),
        (ElementBucket::Tetra4, (VOLUME, vec![1, 2, 3, 4])),
    ]);
    for bucket in ElementBucket::ALL {
        let table = record.elements.table(bucket);
        match expected.get(&bucket) {
            Some((id, nodes)) => {
                assert_eq!(table.len(), 1, "{bucket}");
                assert_eq!(&table[id], nodes, "{bucket}");
            }
            None => assert!(table.is_empty(), "{bucket} should be empty"),
        }
    }

    assert_eq!(
        record.nodes,
        BTreeMap::from([
            (1, [0.0, 0.0, 0.0]),
            (2, [1.0, 0.0, 0.0]),
            (3, [0.0, 1.0, 0.0]),
            (4, [0.0, 0.0, 1.0]),
        ])
    );
    assert_eq!(record.groups.len(), 1);
    assert_eq!(record.groups[&0].name, "Fixed");
    assert_eq!(record.groups[&0].members.iter().copied().collect::<Vec<_>>(), vec![EDGE]);
}

#[test]
fn scenario_a_json_layout() {
    let record = mesh_to_record(&scenario_a_mesh()).unwrap();
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["Seg2Elem"], json!({"11": [1, 2]}));
    assert_eq!(value["Tria3Elem"], json!({"21": [1, 2, 3]}));
    assert_eq!(value["Tetra4Elem"], json!({"31": [1, 2, 3, 4]}));
    assert_eq!(value["Groups"], json!({"0": ["Fixed", [11]]}));
    assert_eq!(value["Penta15Elem"], json!({}));
}

#[test]
fn scenario_b_json_round_trip_restores_integer_keys() {
    let record = mesh_to_record(&scenario_a_mesh()).unwrap();
    let io = MeshIo::new(Capabilities::json_only());

    let mut text = Vec::new();
    io.encode(MeshFormat::Json, &record, &mut text).unwrap();
    let raw = JsonCodec.read_record(&mut text.as_slice()).expect("read json");
    let normalized = normalize(raw).unwrap();

    let Some(NormalizedBucket::Indexed(segs)) = normalized.bucket("Seg2Elem") else {
        panic!("Seg2Elem must be indexed");
    };
    assert_eq!(segs.keys().copied().collect::<Vec<_>>(), vec![EDGE]);
    let Some(NormalizedBucket::Indexed(tets)) = normalized.bucket("Tetra4Elem") else {
        panic!("Tetra4Elem must be indexed");
    };
    assert_eq!(tets.keys().copied().collect::<Vec<_>>(), vec![VOLUME]);

    let Some(NormalizedBucket::Groups(groups)) = normalized.bucket("Groups") else {
        panic!("Groups must pass through");
    };
    assert_eq!(groups.keys().collect::<Vec<_>>(), vec![&RecordKey::from("0")]);

    let decoded = ImportRecord::try_from(&normalized).unwrap();
    assert_eq!(decoded, record.into_import());
    assert!(decoded.groups.contains_key("0"));
}

#[cfg(feature = "yaml")]
#[test]
fn scenario_b_yaml_round_trip() {
    let record = mesh_to_record(&scenario_a_mesh()).unwrap();
    let io = MeshIo::new(Capabilities { yaml: true });

    let mut text = Vec::new();
    io.encode(MeshFormat::Yaml, &record, &mut text).unwrap();
    let decoded = io.decode(MeshFormat::Yaml, text.as_slice()).unwrap();
    assert_eq!(decoded, record.into_import());
}

#[test]
fn scenario_e_pyramid_face_aborts_conversion() {
    let mut mesh = scenario_a_mesh();
    mesh.add_face(22, vec![1, 2, 3, 4, 5]).unwrap();
    let err = mesh_to_record(&mesh).expect_err("5-node face has no bucket");
    assert!(
        matches!(
            err,
            MeshIoError::UnsupportedElementArity {
                category: ElementCategory::Face,
                element: 22,
                arity: 5,
            }
        ),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::UnsupportedTopology);
}

#[test]
fn hand_written_json_imports_with_lowercase_groups() {
    let text = r#"{
        "Nodes": {"1": [0, 0, 0], "2": [1, 0, 0], "3": [0, 1, 0]},
        "Tria3Elem": {"5": [1, 2, 3]},
        "groups": {"7": ["Top", [5]]}
    }"#;
    let io = MeshIo::new(Capabilities::json_only());
    let record = io.decode(MeshFormat::Json, text.as_bytes()).unwrap();
    assert_eq!(record.elements.table(ElementBucket::Tria3)[&5], vec![1, 2, 3]);
    assert_eq!(record.nodes[&2], [1.0, 0.0, 0.0]);
    assert_eq!(record.groups["7"], MeshGroup::new("Top", [5]));
}

#[test]
fn non_integer_element_key_is_rejected() {
    let text = r#"{"Nodes": {}, "Seg2Elem": {"first": [1, 2]}}"#;
    let io = MeshIo::new(Capabilities::json_only());
    let err = io.decode(MeshFormat::Json, text.as_bytes()).unwrap_err();
    assert!(matches!(err, MeshIoError::MalformedKey { ref key, .. } if key == "first"));
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}
