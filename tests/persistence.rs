//! Saving and loading circuit documents.

use approx::assert_relative_eq;
use circuit_lab::circuit::{LoadDiagnostic, NodeId, Position, WireId};
use circuit_lab::components::{
    Capacitor, ComponentType, DipoleKind, Resistor, VoltageSourceAc, VoltageSourceDc,
};
use circuit_lab::{Circuit, CircuitError, ComponentRegistry, DcSolver};

fn divider() -> Circuit {
    let mut circuit = Circuit::new();
    let gnd = circuit.create_node((0.0, 0.0), true);
    let top = circuit.create_node((0.0, 100.0), false);
    let mid = circuit.create_node((50.0, 50.0), false);
    let tap = circuit.create_node((80.0, 50.0), false);
    circuit
        .add_dipole(VoltageSourceDc::new(12.0), Some(top), Some(gnd))
        .unwrap();
    circuit
        .add_dipole(Resistor::new(1000.0).unwrap(), Some(top), Some(mid))
        .unwrap();
    let r2 = circuit
        .add_dipole(Resistor::new(1000.0).unwrap(), Some(mid), Some(gnd))
        .unwrap();
    let w = circuit.create_wire(mid, tap).unwrap();
    circuit.wire_mut(w).unwrap().color = "#ff0000".to_string();

    let r2 = circuit.dipole_mut(r2).unwrap();
    r2.name = "R2".to_string();
    r2.position = Position::new(50.0, 25.0);
    r2.rotation = 90.0;
    circuit
}

#[test]
fn test_json_round_trip() {
    let circuit = divider();
    let json = circuit.to_json().unwrap();

    let (loaded, report) = Circuit::from_json(&json, &ComponentRegistry::default()).unwrap();

    assert!(report.is_clean());
    assert_eq!(loaded.node_count(), 4);
    assert_eq!(loaded.wire_count(), 1);
    assert_eq!(loaded.dipole_count(), 3);
    assert_eq!(loaded.to_record(), circuit.to_record());

    let wire = loaded.wire(WireId(1)).unwrap();
    assert_eq!(wire.endpoints(), Some((NodeId(3), NodeId(4))));
    assert_eq!(wire.color, "#ff0000");

    let r2 = loaded.dipoles().find(|d| d.name == "R2").unwrap();
    assert_eq!(r2.rotation, 90.0);
    assert_eq!(r2.position, Position::new(50.0, 25.0));
    assert!(loaded.node(NodeId(3)).unwrap().is_connected_to(r2.id()));
    assert!(loaded.get_ground_node().is_some());
}

#[test]
fn test_loaded_circuit_solves_like_the_original() {
    let mut original = divider();
    let (mut loaded, _) =
        Circuit::from_json(&original.to_json().unwrap(), &ComponentRegistry::default()).unwrap();

    DcSolver::new().solve(&mut original).unwrap();
    DcSolver::new().solve(&mut loaded).unwrap();

    assert_relative_eq!(loaded.node(NodeId(4)).unwrap().potential(), 6.0, epsilon = 1e-12);
    for (a, b) in original.nodes().zip(loaded.nodes()) {
        assert_eq!(a.potential().to_bits(), b.potential().to_bits());
    }
}

#[test]
fn test_parameters_survive() {
    let mut circuit = Circuit::new();
    let a = circuit.create_node((0.0, 0.0), true);
    let b = circuit.create_node((1.0, 0.0), false);
    circuit
        .add_dipole(VoltageSourceAc::new(2.0, 60.0, 30.0, 0.5), Some(b), Some(a))
        .unwrap();
    circuit.add_dipole(Capacitor::new(4.7e-9), Some(b), Some(a)).unwrap();

    let (loaded, _) =
        Circuit::from_json(&circuit.to_json().unwrap(), &ComponentRegistry::default()).unwrap();
    let kinds: Vec<DipoleKind> = loaded.dipoles().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DipoleKind::VoltageSourceAc(VoltageSourceAc::new(2.0, 60.0, 30.0, 0.5)),
            DipoleKind::Capacitor(Capacitor::new(4.7e-9)),
        ]
    );
}

#[test]
fn test_unknown_component_type_is_skipped() {
    let json = r#"{
        "version": "1.0",
        "next_node_id": 3,
        "next_dipole_id": 3,
        "nodes": [
            {"id": 1, "position": [0.0, 0.0], "is_ground": true, "potential": 0.0},
            {"id": 2, "position": [0.0, 100.0], "is_ground": false, "potential": 0.0}
        ],
        "dipoles": [
            {"type": "Diode", "id": 1, "name": "D1", "node_a_id": 2, "node_b_id": 1,
             "position": [0.0, 0.0], "rotation": 0.0, "params": {}},
            {"type": "Resistor", "id": 2, "name": "R1", "node_a_id": 2, "node_b_id": 1,
             "position": [0.0, 0.0], "rotation": 0.0, "params": {"resistance": 220.0}}
        ]
    }"#;

    let (loaded, report) = Circuit::from_json(json, &ComponentRegistry::default()).unwrap();

    assert_eq!(loaded.dipole_count(), 1);
    assert_eq!(report.unknown_types().collect::<Vec<_>>(), vec!["Diode"]);
    let r1 = loaded.dipoles().next().unwrap();
    assert_eq!(r1.name, "R1");
    assert_eq!(r1.kind, DipoleKind::Resistor(Resistor::new(220.0).unwrap()));
    assert_eq!(loaded.next_dipole_id().0, 3);
}

#[test]
fn test_custom_constructor_registration() {
    let json = r#"{
        "nodes": [{"id": 1, "is_ground": true}, {"id": 2}],
        "dipoles": [{"type": "Battery9V", "id": 1, "node_a_id": 2, "node_b_id": 1}]
    }"#;

    let mut registry = ComponentRegistry::default();
    registry.register("Battery9V", |_| Ok(VoltageSourceDc::new(9.0).into()));
    let (loaded, report) = Circuit::from_json(json, &registry).unwrap();

    assert!(report.is_clean());
    let battery = loaded.dipoles().next().unwrap();
    assert_eq!(battery.component_type(), ComponentType::VoltageSourceDc);
    // Nameless records get the type's default name
    assert_eq!(battery.name, "DC Source");
}

#[test]
fn test_broken_references_are_reported() {
    let json = r#"{
        "nodes": [{"id": 1, "is_ground": true}, {"id": 2}, {"id": 2}],
        "wires": [
            {"id": 1, "node_a_id": 1, "node_b_id": 9},
            {"id": 2, "node_a_id": 1, "node_b_id": 2}
        ],
        "dipoles": [
            {"type": "Resistor", "id": 1, "node_a_id": 2, "node_b_id": 7,
             "params": {"resistance": 10.0}},
            {"type": "Resistor", "id": 2, "node_a_id": 2, "node_b_id": 1,
             "params": {"resistance": -10.0}}
        ]
    }"#;

    let (mut loaded, report) = Circuit::from_json(json, &ComponentRegistry::default()).unwrap();

    assert_eq!(loaded.node_count(), 2);
    assert_eq!(loaded.wire_count(), 1);
    assert_eq!(loaded.dipole_count(), 1);
    assert!(report
        .diagnostics
        .contains(&LoadDiagnostic::DuplicateId { namespace: "node", id: 2 }));
    assert!(report
        .diagnostics
        .contains(&LoadDiagnostic::DanglingWire { wire: WireId(1) }));
    assert!(report.diagnostics.iter().any(|d| matches!(
        d,
        LoadDiagnostic::MissingDipoleNode { node, .. } if *node == NodeId(7)
    )));
    assert!(report
        .diagnostics
        .iter()
        .any(|d| matches!(d, LoadDiagnostic::InvalidParameters { .. })));

    // Ids seen in the document are never handed out again
    assert_eq!(loaded.create_wire(NodeId(1), NodeId(2)).unwrap(), WireId(3));
    assert_eq!(loaded.next_dipole_id().0, 3);
}

#[test]
fn test_malformed_json_is_an_error() {
    let result = Circuit::from_json("{ not json", &ComponentRegistry::default());
    assert!(matches!(result, Err(CircuitError::Serialization(_))));

    let missing_id = r#"{"nodes": [{"position": [0, 0]}]}"#;
    assert!(Circuit::from_json(missing_id, &ComponentRegistry::default()).is_err());
}

#[test]
fn test_oversized_ids_are_skipped() {
    let json = r#"{
        "next_node_id": 18446744073709551615,
        "nodes": [{"id": 18446744073709551615}, {"id": 1, "is_ground": true}, {"id": 2}],
        "wires": [{"id": 18446744073709551615, "node_a_id": 1, "node_b_id": 2}],
        "dipoles": [{"type": "Resistor", "id": 18446744073709551615,
                     "node_a_id": 2, "node_b_id": 1}]
    }"#;

    let (mut loaded, report) = Circuit::from_json(json, &ComponentRegistry::default()).unwrap();

    assert_eq!(loaded.node_count(), 2);
    assert_eq!(loaded.wire_count(), 0);
    assert_eq!(loaded.dipole_count(), 0);
    for namespace in ["node", "wire", "dipole"] {
        assert!(report.diagnostics.contains(&LoadDiagnostic::IdOutOfRange {
            namespace,
            id: u64::MAX,
        }));
    }

    // Fresh ids stay distinct from everything loaded
    let a = loaded.create_node((0.0, 0.0), false);
    let b = loaded.create_node((1.0, 0.0), false);
    assert_ne!(a, b);
    assert!(a.0 > 2 && b.0 > 2);
}
