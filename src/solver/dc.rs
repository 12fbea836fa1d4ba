//! DC operating point.

use std::collections::{HashMap, HashSet};

use log::{debug, trace, warn};

use super::groups::NodeGroups;
use super::mna::MnaMatrix;
use super::DEFAULT_PIVOT_TOLERANCE;
use crate::circuit::{Circuit, DipoleId, NodeId};
use crate::error::{CircuitError, Result};

/// Configuration for the DC solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Smallest acceptable LU pivot, relative to the largest entry of its
    /// column.
    pub pivot_tolerance: f64,
    /// Designate a ground node when the circuit has none.
    pub auto_ground: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
            auto_ground: true,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pivot tolerance below which the network counts as singular.
    pub fn with_pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }

    /// Enable or disable automatic ground selection.
    ///
    /// When disabled, solving a circuit without a ground node fails with
    /// [`CircuitError::MissingGround`] instead of flagging one.
    pub fn with_auto_ground(mut self, auto_ground: bool) -> Self {
        self.auto_ground = auto_ground;
        self
    }
}

/// What a successful solve did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DcSummary {
    /// Node whose class served as the 0 V reference
    pub ground: NodeId,
    /// Whether `ground` was flagged by this solve
    pub auto_grounded: bool,
    /// Number of node potential unknowns
    pub node_unknowns: usize,
    /// Number of voltage source branch-current unknowns
    pub branch_unknowns: usize,
}

/// Resistor or DC source taking part in the solve.
struct ActiveDipole {
    id: DipoleId,
    a: Option<NodeId>,
    b: Option<NodeId>,
    stamp: Stamp,
}

enum Stamp {
    Conductance(f64),
    Source { voltage: f64, branch: usize },
}

/// Mapping from nodes to unknowns for one solve.
struct Layout {
    groups: NodeGroups,
    ground_classes: HashSet<usize>,
    variable: HashMap<usize, usize>,
}

impl Layout {
    /// Matrix row of a node's potential, `None` for the reference.
    ///
    /// An unconnected terminal sits at the reference potential.
    fn index(&self, node: Option<NodeId>) -> Option<usize> {
        let class = self.groups.class_of(node?)?;
        if self.ground_classes.contains(&class) {
            None
        } else {
            self.variable.get(&class).copied()
        }
    }
}

/// Modified Nodal Analysis DC solver.
///
/// Only resistors and DC voltage sources take part. Capacitors, inductors
/// and AC sources are skipped. An unconnected terminal is tied to the
/// reference, and every DC source gets a branch-current unknown. Nodes joined
/// by wires share one unknown.
#[derive(Debug, Clone, Default)]
pub struct DcSolver {
    config: SolverConfig,
}

impl DcSolver {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Get the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Compute the operating point and write it back into `circuit`.
    ///
    /// Returns `Ok(None)` without touching the circuit when there is nothing
    /// to solve (no node, no resistor or DC source, or no unknown).
    /// On error the circuit is left exactly as it was. On success every node
    /// potential is written, along with the current of every resistor and DC
    /// source; if the circuit had no ground node, one node is flagged as
    /// ground (the lowest id, but callers should only rely on some node
    /// becoming the reference).
    pub fn solve(&self, circuit: &mut Circuit) -> Result<Option<DcSummary>> {
        let active = collect_active(circuit);
        if active.is_empty() {
            debug!("DC solve skipped: no resistor or DC source");
            return Ok(None);
        }

        let (ground, auto_grounded) = match circuit.get_ground_node() {
            Some(ground) => (ground, false),
            None if self.config.auto_ground => match circuit.nodes().next() {
                Some(node) => (node.id(), true),
                None => return Ok(None),
            },
            None => return Err(CircuitError::MissingGround),
        };

        let layout = build_layout(circuit, ground);
        let node_unknowns = layout.variable.len();
        let branch_unknowns = active
            .iter()
            .filter(|d| matches!(d.stamp, Stamp::Source { .. }))
            .count();
        let size = node_unknowns + branch_unknowns;
        if size == 0 {
            debug!("DC solve skipped: every node is at the reference potential");
            return Ok(None);
        }

        debug!(
            "DC solve: {node_unknowns} node unknowns, {branch_unknowns} branch unknowns, reference {ground}"
        );

        let mut matrix = MnaMatrix::new(size);
        for dipole in &active {
            let ia = layout.index(dipole.a);
            let ib = layout.index(dipole.b);
            match dipole.stamp {
                Stamp::Conductance(g) => {
                    trace!("stamp {}: conductance {g} between {ia:?} and {ib:?}", dipole.id);
                    matrix.stamp_conductance(ia, ib, g);
                }
                Stamp::Source { voltage, branch } => {
                    let row = node_unknowns + branch;
                    trace!("stamp {}: {voltage} V between {ia:?} and {ib:?}, row {row}", dipole.id);
                    matrix.stamp_voltage_source(ia, ib, row, voltage);
                }
            }
        }

        matrix.factor(self.config.pivot_tolerance)?;
        matrix.solve();

        if let Some(i) = matrix.x.iter().position(|v| !v.is_finite()) {
            let label = if i < node_unknowns {
                format!("node unknown {i}")
            } else {
                format!("branch unknown {}", i - node_unknowns)
            };
            return Err(CircuitError::numerical_overflow(label, matrix.x[i]));
        }

        // Everything below only writes; nothing can fail any more
        let potentials: Vec<(NodeId, f64)> = circuit
            .nodes()
            .map(|n| (n.id(), matrix.value(layout.index(Some(n.id())))))
            .collect();
        let currents: Vec<(DipoleId, f64)> = active
            .iter()
            .map(|d| {
                let current = match d.stamp {
                    Stamp::Conductance(g) => {
                        let v = matrix.value(layout.index(d.a)) - matrix.value(layout.index(d.b));
                        v * g
                    }
                    Stamp::Source { branch, .. } => -matrix.x[node_unknowns + branch],
                };
                (d.id, current)
            })
            .collect();

        if auto_grounded {
            warn!("circuit has no ground node, using {ground} as reference");
            circuit.set_ground(ground, true)?;
        }
        for (id, potential) in potentials {
            if let Some(node) = circuit.node_mut(id) {
                node.set_potential(potential);
            }
        }
        for (id, current) in currents {
            if let Some(dipole) = circuit.dipole_mut(id) {
                dipole.set_current(current);
            }
        }

        Ok(Some(DcSummary {
            ground,
            auto_grounded,
            node_unknowns,
            branch_unknowns,
        }))
    }
}

/// Resistors and DC sources, in id order.
fn collect_active(circuit: &Circuit) -> Vec<ActiveDipole> {
    let mut branches = 0;
    circuit
        .dipoles()
        .filter_map(|d| {
            let stamp = if let Some(g) = d.kind.conductance() {
                Stamp::Conductance(g)
            } else if let Some(voltage) = d.kind.dc_voltage() {
                let branch = branches;
                branches += 1;
                Stamp::Source { voltage, branch }
            } else {
                return None;
            };
            Some(ActiveDipole {
                id: d.id(),
                a: d.node_a(),
                b: d.node_b(),
                stamp,
            })
        })
        .collect()
}

/// Group nodes and number the non-reference classes by lowest node id.
///
/// The class of `ground` is the reference, and so is the class of any other
/// node flagged as ground: all ground flags denote the same 0 V.
fn build_layout(circuit: &Circuit, ground: NodeId) -> Layout {
    let groups = NodeGroups::build(circuit);
    let ground_classes: HashSet<usize> = circuit
        .nodes()
        .filter(|n| n.is_ground() || n.id() == ground)
        .filter_map(|n| groups.class_of(n.id()))
        .collect();

    let mut variable = HashMap::new();
    for node in circuit.nodes() {
        if let Some(class) = groups.class_of(node.id()) {
            if !ground_classes.contains(&class) {
                let next = variable.len();
                variable.entry(class).or_insert(next);
            }
        }
    }

    Layout {
        groups,
        ground_classes,
        variable,
    }
}
