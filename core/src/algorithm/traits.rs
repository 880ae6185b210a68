//! Core type and error definitions for flow computation
//!
//! This module establishes the shared vocabulary of the flow engine:
//! dense node indices, signed capacity/flow scalars, the algorithm
//! strategy enumeration, and the input-validation error taxonomy.
//!
//! All failures are local input-validation failures detected before any
//! graph mutation begins. The algorithms themselves are deterministic and
//! total for valid input; a disconnected network is a normal zero-flow
//! result, never an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dense node index within a flow network, valid in `[0, node_count)`
pub type NodeId = usize;

/// Edge capacity scalar; always non-negative once admitted
pub type Capacity = i64;

/// Flow value scalar; may be negative on reverse residual records
pub type Flow = i64;

/// Maximum flow algorithm variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxFlowAlgorithm {
    /// Dinic's blocking-flow algorithm with capacity scaling
    Dinic,
    /// Goldberg-Tarjan push-relabel with relabel-to-front selection
    PushRelabel,
}

/// Flow computation errors, all raised before any graph mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// A negative capacity was supplied
    #[error("invalid capacity {capacity} on edge {from} -> {to}: capacities must be non-negative")]
    InvalidCapacity {
        from: NodeId,
        to: NodeId,
        capacity: Capacity,
    },

    /// A node index out of range, or a query naming the same node as
    /// source and sink
    #[error("invalid node: {0}")]
    InvalidNode(NodeId),

    /// An empty source or sink set
    #[error("source and sink sets must both be non-empty")]
    NoSourceOrSink,

    /// The deferred-configuration surface was executed before an
    /// algorithm was supplied
    #[error("maximum flow algorithm must be configured before execution")]
    NotConfigured,

    /// A capacity matrix with rows of unequal length
    #[error("capacity matrix is not square: row {row} has {len} columns, expected {expected}")]
    MalformedMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_context() {
        let error = FlowError::InvalidCapacity {
            from: 2,
            to: 5,
            capacity: -7,
        };
        let rendered = error.to_string();
        assert!(rendered.contains("-7"));
        assert!(rendered.contains("2 -> 5"));
    }

    #[test]
    fn test_algorithm_enum_round_trip() {
        let encoded = serde_json::to_string(&MaxFlowAlgorithm::Dinic).unwrap();
        let decoded: MaxFlowAlgorithm = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, MaxFlowAlgorithm::Dinic);
    }
}
