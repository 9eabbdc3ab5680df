//! End-to-end export of document snapshots

use std::f64::consts::FRAC_PI_2;

use approx::assert_abs_diff_eq;
use cad_urdf::{
    CadDocument, CadObject, ExportOptions, ExportWarning, GeometryExporter, Placement,
    RobotLinkSpec, collision_from_object, export_robot, rotation_from_rpy, rpy_from_quaternion,
    visual_from_box, visual_from_object,
};
use glam::{DQuat, DVec3};

fn parse_triplet(text: &str) -> [f64; 3] {
    let values: Vec<f64> = text.split(' ').map(|v| v.parse().unwrap()).collect();
    [values[0], values[1], values[2]]
}

/// A part holding a box, a cylinder inside a sub-part and a mesh
fn arm_document() -> (CadDocument, uuid::Uuid) {
    let mut doc = CadDocument::new("arm");
    let base = doc.add_object(CadObject::new_box("Box", 40.0, 40.0, 10.0).with_label("base"));
    let shaft = doc.add_object(
        CadObject::new_cylinder("Cylinder", 5.0, 100.0)
            .with_label("shaft")
            .with_placement(Placement::from_translation(DVec3::new(20.0, 20.0, 10.0))),
    );
    let shaft_part = doc.add_object(CadObject::new_part("ShaftPart", vec![shaft]));
    let cover = doc.add_object(
        CadObject::new_mesh("Mesh")
            .with_label("cover")
            .with_placement(Placement::from_translation(DVec3::new(0.0, 0.0, 110.0))),
    );
    let root = doc.add_root(CadObject::new_part("Arm", vec![base, shaft_part, cover]));
    (doc, root)
}

#[test]
fn test_records_follow_traversal_order() {
    let (doc, root) = arm_document();
    let export = visual_from_object(&doc, root, &ExportOptions::default(), None).unwrap();

    let geometry: Vec<_> = export
        .records
        .iter()
        .map(|r| r.xml.child("geometry").unwrap().elements().next().unwrap().name.clone())
        .collect();
    assert_eq!(geometry, ["box", "cylinder", "mesh"]);
    assert_eq!(export.records[0].object, doc.get_by_name("Box").unwrap().id);
    assert_eq!(export.records[1].object, doc.get_by_name("Cylinder").unwrap().id);
    assert_eq!(export.records[2].mesh_filename, "cover.dae");
}

#[test]
fn test_mesh_fallback_warns_once_and_continues() {
    let (doc, root) = arm_document();
    let export = collision_from_object(&doc, root, &ExportOptions::default(), None).unwrap();
    assert_eq!(export.records.len(), 3);
    assert_eq!(export.warnings.len(), 1);
    assert!(matches!(
        export.warnings[0],
        ExportWarning::MissingPackageName { .. }
    ));
    let mesh = export.records[2].xml.child("geometry").unwrap().child("mesh").unwrap();
    assert_eq!(mesh.attr("filename"), Some("package://package/meshes/cover.dae"));
}

#[test]
fn test_centered_origins_in_meters() {
    let (doc, root) = arm_document();
    let options = ExportOptions::default().with_package_name("arm");
    let export = visual_from_object(&doc, root, &options, None).unwrap();

    let xyz: Vec<_> = export
        .records
        .iter()
        .map(|r| r.xml.child("origin").unwrap().attr("xyz").unwrap().to_string())
        .collect();
    assert_eq!(xyz, ["0.02 0.02 0.005", "0.02 0.02 0.06", "0.0 0.0 0.11"]);
}

#[test]
fn test_unit_conversion_of_box_size() {
    let mut doc = CadDocument::new("doc");
    let id = doc.add_root(CadObject::new_box("Box", 1000.0, 1000.0, 1000.0));
    let export = visual_from_object(&doc, id, &ExportOptions::default(), None).unwrap();
    let pretty = export.records[0].xml.to_string_pretty();
    assert!(pretty.contains("<box size=\"1.0 1.0 1.0\" />"), "{pretty}");
}

#[test]
fn test_rotated_parent_moves_box_center() {
    let mut doc = CadDocument::new("doc");
    let b = doc.add_object(CadObject::new_box("Box", 100.0, 20.0, 20.0));
    let root = doc.add_root(
        CadObject::new_part("Part", vec![b])
            .with_placement(Placement::from_rotation(DQuat::from_rotation_z(FRAC_PI_2))),
    );
    let export = visual_from_object(&doc, root, &ExportOptions::default(), None).unwrap();
    let origin = export.records[0].xml.child("origin").unwrap();
    let xyz = parse_triplet(origin.attr("xyz").unwrap());
    let rpy = parse_triplet(origin.attr("rpy").unwrap());
    assert_abs_diff_eq!(xyz[0], -0.01, epsilon = 1e-9);
    assert_abs_diff_eq!(xyz[1], 0.05, epsilon = 1e-9);
    assert_abs_diff_eq!(xyz[2], 0.01, epsilon = 1e-9);
    assert_abs_diff_eq!(rpy[2], FRAC_PI_2, epsilon = 1e-12);
}

#[test]
fn test_dispatch_with_identity_own_placement() {
    let p = Placement::new(DVec3::new(12.0, -3.0, 40.0), rotation_from_rpy([0.1, -0.4, 1.2]));
    let mut doc = CadDocument::new("doc");
    let id = doc.add_root(CadObject::new_box("Box", 10.0, 20.0, 30.0));
    let object = doc.get(id).unwrap();

    let ignored = visual_from_box(object, p, true).unwrap();
    let composed = visual_from_box(object, p * Placement::IDENTITY, false).unwrap();
    let dispatched = visual_from_object(&doc, id, &ExportOptions::default(), Some(p)).unwrap();
    assert_eq!(ignored, composed);
    assert_eq!(dispatched.records[0].xml, ignored);
}

#[test]
fn test_rpy_round_trip_through_origin() {
    let q = DQuat::from_euler(glam::EulerRot::ZYX, 0.8, -0.3, 2.0);
    let rebuilt = rotation_from_rpy(rpy_from_quaternion(q));
    for v in [DVec3::X, DVec3::Y, DVec3::Z, DVec3::new(1.0, -2.0, 0.5)] {
        assert!((q * v).abs_diff_eq(rebuilt * v, 1e-12));
    }
}

#[test]
fn test_duplicate_labels_get_distinct_mesh_files() {
    let mut doc = CadDocument::new("doc");
    let a = doc.add_object(CadObject::new_mesh("Mesh001").with_label("finger"));
    let b = doc.add_object(CadObject::new_mesh("Mesh002").with_label("finger"));
    let root = doc.add_root(CadObject::new_group("Hand", vec![a, b]));
    let options = ExportOptions::default().with_package_name("hand");

    let mut exporter = GeometryExporter::new(&doc, &options);
    let records = exporter.visual(root, None).unwrap();
    let names: Vec<_> = records.iter().map(|r| r.mesh_filename.as_str()).collect();
    assert_eq!(names, ["finger.dae", "finger_Mesh002.dae"]);
    assert_eq!(exporter.finish().len(), 1);
}

#[test]
fn test_robot_document_round_trip() {
    let (doc, root) = arm_document();
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("arm.ron");
    doc.save(&path).unwrap();
    let loaded = CadDocument::load(&path).unwrap();

    let options = ExportOptions {
        robot_name: "my arm".to_string(),
        ..ExportOptions::default().with_package_name("arm_description")
    };
    let links = [RobotLinkSpec::from_object("arm", root)];
    let export = export_robot(&loaded, &links, &[], &options).unwrap();
    let robot = export.validate().unwrap();
    assert_eq!(robot.name, "my_arm");
    assert_eq!(robot.links[0].visual.len(), 3);
    assert_eq!(robot.links[0].collision.len(), 3);
    match &robot.links[0].visual[2].geometry {
        urdf_rs::Geometry::Mesh { filename, .. } => {
            assert_eq!(filename, "package://arm_description/meshes/cover.dae")
        }
        other => panic!("unexpected geometry {:?}", other),
    }
}
