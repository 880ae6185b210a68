//! Residual graph representation for augmenting-path algorithms
//!
//! Edges live in a flat arena; a caller-added edge and its reverse
//! counterpart occupy consecutive slots and cross-reference each other by
//! arena index, so reverse lookup during augmentation is O(1) and the two
//! directions of a residual pair never fight over ownership. Adjacency
//! lists store arena indices only.
//!
//! # Residual encoding
//!
//! Pushing `p` units on an edge increments its `flow` by `p` and
//! decrements the paired edge's `flow` by `p`, so the reverse direction
//! gains `p` units of residual capacity. The pair therefore carries two
//! independent flow counters rather than one shared capacity field;
//! collapsing them would break repeated-augmentation correctness.

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, Flow, FlowError, NodeId};

/// Residual edge record with paired reverse-edge cross index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Head of the edge
    pub to: NodeId,
    /// Arena index of the paired reverse edge
    pub pair: usize,
    /// Maximum capacity through this edge
    pub capacity: Capacity,
    /// Flow currently routed through this edge
    pub flow: Flow,
}

impl FlowEdge {
    /// Remaining pushable flow, `capacity - flow`
    #[inline]
    pub fn residual(&self) -> Capacity {
        self.capacity - self.flow
    }
}

/// In-memory residual flow network over dense node indices
///
/// Built once per max-flow query, mutated in place across all phases, and
/// discarded once the final flow value is read. Concurrent queries must
/// each construct their own instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualGraph {
    node_count: usize,
    /// Flat edge arena; paired residual edges occupy consecutive slots
    edges: Vec<FlowEdge>,
    /// Per-node lists of arena indices for outgoing residual edges
    adjacency: Vec<Vec<usize>>,
}

impl ResidualGraph {
    /// Creates an empty residual graph over `node_count` nodes
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); node_count],
        }
    }

    /// Number of nodes in the network
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of arena records (caller-added edges count twice)
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds a directed edge with a zero-capacity reverse counterpart
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        capacity: Capacity,
    ) -> Result<(), FlowError> {
        self.add_edge_with_reverse(from, to, capacity, 0)
    }

    /// Adds a residual edge pair with an explicit reverse capacity
    ///
    /// Validation happens before any mutation: out-of-range endpoints fail
    /// with [`FlowError::InvalidNode`] and negative capacities with
    /// [`FlowError::InvalidCapacity`], leaving the graph untouched.
    pub fn add_edge_with_reverse(
        &mut self,
        from: NodeId,
        to: NodeId,
        capacity: Capacity,
        reverse_capacity: Capacity,
    ) -> Result<(), FlowError> {
        self.check_node(from)?;
        self.check_node(to)?;
        if capacity < 0 {
            return Err(FlowError::InvalidCapacity { from, to, capacity });
        }
        if reverse_capacity < 0 {
            return Err(FlowError::InvalidCapacity {
                from: to,
                to: from,
                capacity: reverse_capacity,
            });
        }

        let forward = self.edges.len();
        let backward = forward + 1;
        self.edges.push(FlowEdge {
            to,
            pair: backward,
            capacity,
            flow: 0,
        });
        self.edges.push(FlowEdge {
            to: from,
            pair: forward,
            capacity: reverse_capacity,
            flow: 0,
        });
        self.adjacency[from].push(forward);
        self.adjacency[to].push(backward);
        Ok(())
    }

    /// Arena indices of the residual edges leaving `node`
    #[inline]
    pub fn outgoing(&self, node: NodeId) -> &[usize] {
        &self.adjacency[node]
    }

    /// The edge record stored at an arena index
    #[inline]
    pub fn edge(&self, index: usize) -> &FlowEdge {
        &self.edges[index]
    }

    /// Applies `amount` units of flow to the edge at `index` and mirrors
    /// the push on its paired reverse edge
    #[inline]
    pub(crate) fn apply_flow(&mut self, index: usize, amount: Flow) {
        let pair = self.edges[index].pair;
        self.edges[index].flow += amount;
        self.edges[pair].flow -= amount;
    }

    fn check_node(&self, node: NodeId) -> Result<(), FlowError> {
        if node >= self.node_count {
            return Err(FlowError::InvalidNode(node));
        }
        Ok(())
    }
}

/// Builds a residual graph from an edge list
///
/// Fails with [`FlowError::InvalidCapacity`] on any negative capacity and
/// [`FlowError::InvalidNode`] on any endpoint outside `[0, node_count)`;
/// no partially constructed graph escapes on failure.
pub fn build_flow_network(
    node_count: usize,
    edges: &[(NodeId, NodeId, Capacity)],
) -> Result<ResidualGraph, FlowError> {
    let mut graph = ResidualGraph::new(node_count);
    for &(from, to, capacity) in edges {
        graph.add_edge(from, to, capacity)?;
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_pairing_is_cross_linked() {
        let mut graph = ResidualGraph::new(3);
        graph.add_edge(0, 1, 5).unwrap();
        graph.add_edge(1, 2, 3).unwrap();

        assert_eq!(graph.edge_count(), 4);
        for index in 0..graph.edge_count() {
            let pair = graph.edge(index).pair;
            assert_eq!(graph.edge(pair).pair, index);
        }
        // reverse edges start with zero capacity
        assert_eq!(graph.edge(1).capacity, 0);
        assert_eq!(graph.edge(1).to, 0);
    }

    #[test]
    fn test_push_grows_reverse_residual() {
        let mut graph = ResidualGraph::new(2);
        graph.add_edge(0, 1, 10).unwrap();

        graph.apply_flow(0, 4);
        assert_eq!(graph.edge(0).residual(), 6);
        assert_eq!(graph.edge(1).residual(), 4);

        graph.apply_flow(1, 3);
        assert_eq!(graph.edge(0).residual(), 9);
        assert_eq!(graph.edge(1).residual(), 1);
    }

    #[test]
    fn test_explicit_reverse_capacity() {
        let mut graph = ResidualGraph::new(2);
        graph.add_edge_with_reverse(0, 1, 7, 2).unwrap();
        assert_eq!(graph.edge(0).capacity, 7);
        assert_eq!(graph.edge(1).capacity, 2);
    }

    #[test]
    fn test_negative_capacity_rejected() {
        let mut graph = ResidualGraph::new(2);
        assert_eq!(
            graph.add_edge(0, 1, -1),
            Err(FlowError::InvalidCapacity {
                from: 0,
                to: 1,
                capacity: -1
            })
        );
        assert_eq!(
            graph.add_edge_with_reverse(0, 1, 1, -2),
            Err(FlowError::InvalidCapacity {
                from: 1,
                to: 0,
                capacity: -2
            })
        );
        // nothing was mutated by either rejection
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.outgoing(0).is_empty());
    }

    #[test]
    fn test_out_of_range_endpoint_rejected() {
        let mut graph = ResidualGraph::new(2);
        assert_eq!(graph.add_edge(0, 2, 1), Err(FlowError::InvalidNode(2)));
        assert_eq!(graph.add_edge(5, 1, 1), Err(FlowError::InvalidNode(5)));
    }

    #[test]
    fn test_build_flow_network_validates_every_edge() {
        let result = build_flow_network(3, &[(0, 1, 4), (1, 2, -3)]);
        assert_eq!(
            result,
            Err(FlowError::InvalidCapacity {
                from: 1,
                to: 2,
                capacity: -3
            })
        );
    }
}
