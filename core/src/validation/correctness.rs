//! Correctness validators for flow computations
//!
//! Structural checks over a residual graph after a solver run, plus a
//! brute-force minimum-cut oracle for small networks. The validators
//! report the first violated invariant with enough context to locate it;
//! solver tests lean on them instead of re-deriving the properties inline.

use rayon::prelude::*;
use thiserror::Error;

use crate::algorithm::flow::residual::ResidualGraph;
use crate::algorithm::traits::{Capacity, Flow, NodeId};

/// Invariant violations reported by the flow validators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A node other than source/sink has non-zero net outflow
    #[error("node {node} violates flow conservation: net outflow {net}")]
    ConservationViolated { node: NodeId, net: Flow },

    /// An edge carries more flow than its capacity admits
    #[error("edge {index} exceeds capacity: flow {flow}, capacity {capacity}")]
    CapacityExceeded {
        index: usize,
        flow: Flow,
        capacity: Capacity,
    },

    /// An edge and its paired reverse edge disagree on the pushed amount
    #[error("edge {index} and its pair carry non-antisymmetric flow")]
    PairMismatch { index: usize },
}

/// Checks net-zero flow at every node other than `source` and `sink`
///
/// The net outflow of a node is the sum of the signed flow counters on all
/// of its arena records: forward records contribute outgoing flow and
/// reverse records the negated incoming flow, so conservation holds
/// exactly when the sum vanishes.
pub fn check_flow_conservation(
    graph: &ResidualGraph,
    source: NodeId,
    sink: NodeId,
) -> Result<(), ValidationError> {
    for node in 0..graph.node_count() {
        if node == source || node == sink {
            continue;
        }
        let net: Flow = graph
            .outgoing(node)
            .iter()
            .map(|&edge_index| graph.edge(edge_index).flow)
            .sum();
        if net != 0 {
            return Err(ValidationError::ConservationViolated { node, net });
        }
    }
    Ok(())
}

/// Checks `flow <= capacity` on every arena record and antisymmetry
/// between paired records
///
/// Together the two conditions bound every caller-added edge to
/// `0 <= flow <= capacity`: a directed edge's zero-capacity pair cannot go
/// above zero flow, so antisymmetry pins the forward flow to be
/// non-negative.
pub fn check_capacity_respected(graph: &ResidualGraph) -> Result<(), ValidationError> {
    for index in 0..graph.edge_count() {
        let edge = graph.edge(index);
        if edge.flow > edge.capacity {
            return Err(ValidationError::CapacityExceeded {
                index,
                flow: edge.flow,
                capacity: edge.capacity,
            });
        }
        if edge.flow + graph.edge(edge.pair).flow != 0 {
            return Err(ValidationError::PairMismatch { index });
        }
    }
    Ok(())
}

/// Minimum source/sink cut capacity by exhaustive subset enumeration
///
/// Enumerates every node partition with `source` on one side and `sink`
/// on the other, in parallel, and returns the cheapest crossing capacity.
/// Exponential in `node_count`; intended for cross-checking solvers on
/// networks of at most ~20 nodes.
pub fn brute_force_min_cut(
    node_count: usize,
    edges: &[(NodeId, NodeId, Capacity)],
    source: NodeId,
    sink: NodeId,
) -> Capacity {
    debug_assert!(node_count < u32::BITS as usize);
    let masks = 1_u32 << node_count;
    (0..masks)
        .into_par_iter()
        .filter(|mask| mask & (1 << source) != 0 && mask & (1 << sink) == 0)
        .map(|mask| {
            edges
                .iter()
                .filter(|&&(from, to, _)| mask & (1 << from) != 0 && mask & (1 << to) == 0)
                .map(|&(_, _, capacity)| capacity)
                .sum::<Capacity>()
        })
        .min()
        .unwrap_or(0)
}
