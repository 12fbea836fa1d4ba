//! Wire connectivity classes.

use std::collections::HashMap;

use crate::circuit::{Circuit, NodeId};

/// Union-find over dense node positions.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

/// Nodes partitioned into classes that wires force to one potential.
///
/// Built from scratch for every solve; wires with a missing endpoint are
/// ignored. Class ids are the dense position of the class root and only
/// meaningful within one `NodeGroups`.
#[derive(Debug, Clone)]
pub(crate) struct NodeGroups {
    class: HashMap<NodeId, usize>,
}

impl NodeGroups {
    pub(crate) fn build(circuit: &Circuit) -> Self {
        let position: HashMap<NodeId, usize> = circuit
            .nodes()
            .enumerate()
            .map(|(i, n)| (n.id(), i))
            .collect();

        let mut uf = UnionFind::new(position.len());
        for (a, b) in circuit.wires().filter_map(|w| w.endpoints()) {
            if let (Some(&i), Some(&j)) = (position.get(&a), position.get(&b)) {
                uf.union(i, j);
            }
        }

        let class = position
            .into_iter()
            .map(|(node, i)| (node, uf.find(i)))
            .collect();
        Self { class }
    }

    /// Class of a node, or `None` if the node is not in the circuit.
    pub(crate) fn class_of(&self, node: NodeId) -> Option<usize> {
        self.class.get(&node).copied()
    }

    #[cfg(test)]
    pub(crate) fn same_class(&self, a: NodeId, b: NodeId) -> bool {
        match (self.class_of(a), self.class_of(b)) {
            (Some(ca), Some(cb)) => ca == cb,
            _ => false,
        }
    }
}
