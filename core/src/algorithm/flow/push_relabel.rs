//! Push-Relabel Maximum Flow over a dense capacity matrix
//!
//! Implements the Goldberg-Tarjan preflow method with relabel-to-front
//! vertex ordering. A [`FlowNetwork`] normalizes arbitrary source/sink
//! sets into one logical terminal pair, then the discharge loop maintains
//! the height invariant until every interior node has zero excess.
//!
//! ## Mathematical Invariants
//!
//! - `excess[v] >= 0` for every `v` other than source and sink at
//!   quiescence.
//! - `height[source]` is pinned to `V` and never decreases.
//! - Heights only increase under relabeling, bounding total relabel
//!   operations to `O(V^2)`.
//!
//! # Virtual-terminal normalization
//!
//! When more than one source or sink is supplied, a virtual source is
//! inserted at index 0 and a virtual sink at index `V + 1`, shifting the
//! original indices by one. Each virtual edge carries the sum of all
//! source-outgoing capacities. That bound over-estimates the true feasible
//! input flow when source-adjacent edges share downstream capacity; it is
//! a safe upper bound (never binding below the true maximum), and the
//! over-estimate is kept rather than silently re-deriving a tighter one.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithm::flow::residual::ResidualGraph;
use crate::algorithm::flow::solver::MaxFlowSolver;
use crate::algorithm::traits::{Capacity, Flow, FlowError, MaxFlowAlgorithm, NodeId};

/// Counters describing one push-relabel run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRelabelMetrics {
    /// Saturating and non-saturating pushes performed
    pub pushes: usize,
    /// Height increases applied
    pub relabels: usize,
}

/// Flow network normalized to a single logical source/sink pair
///
/// Holds a dense `V x V` capacity matrix, possibly extended with virtual
/// terminals. Both solver families consume it: push-relabel operates on
/// the matrix directly, Dinic through a residual-graph conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNetwork {
    /// Dense capacity matrix after normalization
    capacity: Vec<Vec<Capacity>>,
    source: NodeId,
    sink: NodeId,
    /// Algorithm chosen through the deferred-configuration surface
    algorithm: Option<MaxFlowAlgorithm>,
}

impl FlowNetwork {
    /// Builds a normalized network from a square capacity matrix and
    /// source/sink sets
    ///
    /// Fails fast, before any normalization: empty terminal sets with
    /// [`FlowError::NoSourceOrSink`], ragged rows with
    /// [`FlowError::MalformedMatrix`], negative entries with
    /// [`FlowError::InvalidCapacity`], and out-of-range or coincident
    /// terminals with [`FlowError::InvalidNode`].
    pub fn new(
        capacity: Vec<Vec<Capacity>>,
        sources: &[NodeId],
        sinks: &[NodeId],
    ) -> Result<Self, FlowError> {
        if sources.is_empty() || sinks.is_empty() {
            return Err(FlowError::NoSourceOrSink);
        }
        let node_count = capacity.len();
        for (row_index, row) in capacity.iter().enumerate() {
            if row.len() != node_count {
                return Err(FlowError::MalformedMatrix {
                    row: row_index,
                    len: row.len(),
                    expected: node_count,
                });
            }
            for (col, &entry) in row.iter().enumerate() {
                if entry < 0 {
                    return Err(FlowError::InvalidCapacity {
                        from: row_index,
                        to: col,
                        capacity: entry,
                    });
                }
            }
        }
        for &node in sources.iter().chain(sinks.iter()) {
            if node >= node_count {
                return Err(FlowError::InvalidNode(node));
            }
        }

        if sources.len() == 1 && sinks.len() == 1 {
            if sources[0] == sinks[0] {
                return Err(FlowError::InvalidNode(sources[0]));
            }
            return Ok(Self {
                capacity,
                source: sources[0],
                sink: sinks[0],
                algorithm: None,
            });
        }

        // virtual terminals: original node i becomes i + 1
        let bound: Capacity = sources
            .iter()
            .map(|&s| capacity[s].iter().sum::<Capacity>())
            .sum();
        let extended = node_count + 2;
        let mut matrix = vec![vec![0; extended]; extended];
        for (from, row) in capacity.iter().enumerate() {
            for (to, &entry) in row.iter().enumerate() {
                matrix[from + 1][to + 1] = entry;
            }
        }
        for &s in sources {
            matrix[0][s + 1] = bound;
        }
        for &t in sinks {
            matrix[t + 1][extended - 1] = bound;
        }
        Ok(Self {
            capacity: matrix,
            source: 0,
            sink: extended - 1,
            algorithm: None,
        })
    }

    /// Node count after normalization (including any virtual terminals)
    #[inline]
    pub fn node_count(&self) -> usize {
        self.capacity.len()
    }

    /// Normalized source index
    #[inline]
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Normalized sink index
    #[inline]
    pub fn sink(&self) -> NodeId {
        self.sink
    }

    /// Selects the algorithm for [`FlowNetwork::find_maximum_flow`]
    pub fn set_algorithm(&mut self, algorithm: MaxFlowAlgorithm) {
        self.algorithm = Some(algorithm);
    }

    /// Runs the previously configured algorithm
    ///
    /// Fails with [`FlowError::NotConfigured`] when no algorithm has been
    /// supplied; prefer [`FlowNetwork::solve`], which makes the choice at
    /// the call site and eliminates that failure mode.
    pub fn find_maximum_flow(&self) -> Result<Flow, FlowError> {
        let algorithm = self.algorithm.ok_or(FlowError::NotConfigured)?;
        self.solve(algorithm)
    }

    /// Computes the maximum flow with the algorithm chosen up front
    pub fn solve(&self, algorithm: MaxFlowAlgorithm) -> Result<Flow, FlowError> {
        MaxFlowSolver::new(algorithm).solve(self)
    }

    /// Converts the dense matrix to the arena residual representation
    pub(crate) fn to_residual_graph(&self) -> Result<ResidualGraph, FlowError> {
        let mut graph = ResidualGraph::new(self.node_count());
        for (from, row) in self.capacity.iter().enumerate() {
            for (to, &entry) in row.iter().enumerate() {
                if entry > 0 && from != to {
                    graph.add_edge(from, to, entry)?;
                }
            }
        }
        Ok(graph)
    }
}

/// Computes the maximum flow of a capacity matrix with push-relabel
///
/// Normalizes `sources`/`sinks` into one virtual terminal pair as needed;
/// fails with [`FlowError::NoSourceOrSink`] when either set is empty.
pub fn push_relabel_max_flow(
    capacity: Vec<Vec<Capacity>>,
    sources: &[NodeId],
    sinks: &[NodeId],
) -> Result<Flow, FlowError> {
    let network = FlowNetwork::new(capacity, sources, sinks)?;
    let (flow, _) = run_push_relabel(&network);
    Ok(flow)
}

/// Runs the discharge loop over a normalized network
pub(crate) fn run_push_relabel(network: &FlowNetwork) -> (Flow, PushRelabelMetrics) {
    let mut state = PushRelabelState::new(network);
    state.run();
    let flow = state.preflow[network.source].iter().sum();
    debug!(
        "push-relabel flow {flow} after {} pushes and {} relabels",
        state.metrics.pushes, state.metrics.relabels
    );
    (flow, state.metrics)
}

/// Working state of one push-relabel run, owned by a single query
#[derive(Debug)]
struct PushRelabelState<'a> {
    network: &'a FlowNetwork,
    /// Signed preflow matrix; negative entries record net reverse flow
    preflow: Vec<Vec<Flow>>,
    /// Height labels; monotonically non-decreasing per node
    height: Vec<usize>,
    /// Flow surplus awaiting discharge at each node
    excess: Vec<Flow>,
    metrics: PushRelabelMetrics,
}

impl<'a> PushRelabelState<'a> {
    fn new(network: &'a FlowNetwork) -> Self {
        let node_count = network.node_count();
        Self {
            network,
            preflow: vec![vec![0; node_count]; node_count],
            height: vec![0; node_count],
            excess: vec![0; node_count],
            metrics: PushRelabelMetrics::default(),
        }
    }

    #[inline]
    fn residual(&self, from: NodeId, to: NodeId) -> Capacity {
        self.network.capacity[from][to] - self.preflow[from][to]
    }

    fn run(&mut self) {
        let node_count = self.network.node_count();
        let source = self.network.source;
        let sink = self.network.sink;
        self.height[source] = node_count;

        // initial preflow: saturate every source-adjacent edge
        for next in 0..node_count {
            let bandwidth = self.network.capacity[source][next];
            if next != source && bandwidth > 0 {
                self.preflow[source][next] += bandwidth;
                self.preflow[next][source] -= bandwidth;
                self.excess[next] += bandwidth;
            }
        }

        // relabel-to-front: a relabeled vertex moves to the list head and
        // the scan restarts from it
        let mut order: Vec<NodeId> = (0..node_count)
            .filter(|&v| v != source && v != sink)
            .collect();
        let mut cursor = 0;
        while cursor < order.len() {
            let vertex = order[cursor];
            let previous_height = self.height[vertex];
            self.discharge(vertex);
            if self.height[vertex] > previous_height {
                let relabeled = order.remove(cursor);
                order.insert(0, relabeled);
                cursor = 0;
            } else {
                cursor += 1;
            }
        }
    }

    /// Pushes excess along admissible edges until none remain, relabeling
    /// whenever the scan exhausts the neighbourhood with excess left over
    fn discharge(&mut self, vertex: NodeId) {
        let node_count = self.network.node_count();
        while self.excess[vertex] > 0 {
            for neighbour in 0..node_count {
                if self.excess[vertex] == 0 {
                    break;
                }
                if self.residual(vertex, neighbour) > 0
                    && self.height[vertex] > self.height[neighbour]
                {
                    self.push(vertex, neighbour);
                }
            }
            self.relabel(vertex);
        }
    }

    fn push(&mut self, from: NodeId, to: NodeId) {
        let delta = self.excess[from].min(self.residual(from, to));
        self.preflow[from][to] += delta;
        self.preflow[to][from] -= delta;
        self.excess[from] -= delta;
        self.excess[to] += delta;
        self.metrics.pushes += 1;
    }

    fn relabel(&mut self, vertex: NodeId) {
        let mut min_height: Option<usize> = None;
        for to in 0..self.network.node_count() {
            if self.residual(vertex, to) > 0 {
                min_height = Some(min_height.map_or(self.height[to], |h| h.min(self.height[to])));
            }
        }
        if let Some(h) = min_height {
            if h + 1 > self.height[vertex] {
                self.metrics.relabels += 1;
            }
            self.height[vertex] = h + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle_matrix() -> Vec<Vec<Capacity>> {
        vec![
            vec![0, 7, 0, 0],
            vec![0, 0, 6, 0],
            vec![0, 0, 0, 8],
            vec![9, 0, 0, 0],
        ]
    }

    fn two_source_two_sink_matrix() -> Vec<Vec<Capacity>> {
        vec![
            vec![0, 0, 4, 6, 0, 0],
            vec![0, 0, 5, 2, 0, 0],
            vec![0, 0, 0, 0, 4, 4],
            vec![0, 0, 0, 0, 6, 6],
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
        ]
    }

    #[test]
    fn test_single_terminal_pair() {
        let flow = push_relabel_max_flow(cycle_matrix(), &[0], &[3]).unwrap();
        assert_eq!(flow, 6);
    }

    #[test]
    fn test_multiple_sources_and_sinks_are_normalized() {
        let network = FlowNetwork::new(two_source_two_sink_matrix(), &[0, 1], &[4, 5]).unwrap();
        // two virtual terminals were inserted
        assert_eq!(network.node_count(), 8);
        assert_eq!(network.source(), 0);
        assert_eq!(network.sink(), 7);
        assert_eq!(network.solve(MaxFlowAlgorithm::PushRelabel).unwrap(), 16);
    }

    #[test]
    fn test_dinic_agrees_on_normalized_network() {
        let network = FlowNetwork::new(two_source_two_sink_matrix(), &[0, 1], &[4, 5]).unwrap();
        assert_eq!(
            network.solve(MaxFlowAlgorithm::Dinic).unwrap(),
            network.solve(MaxFlowAlgorithm::PushRelabel).unwrap()
        );
    }

    #[test]
    fn test_empty_terminal_sets_rejected() {
        assert_eq!(
            FlowNetwork::new(cycle_matrix(), &[], &[3]).unwrap_err(),
            FlowError::NoSourceOrSink
        );
        assert_eq!(
            FlowNetwork::new(cycle_matrix(), &[0], &[]).unwrap_err(),
            FlowError::NoSourceOrSink
        );
    }

    #[test]
    fn test_unconfigured_network_fails_fast() {
        let mut network = FlowNetwork::new(cycle_matrix(), &[0], &[3]).unwrap();
        assert_eq!(network.find_maximum_flow(), Err(FlowError::NotConfigured));

        network.set_algorithm(MaxFlowAlgorithm::PushRelabel);
        assert_eq!(network.find_maximum_flow().unwrap(), 6);
    }

    #[test]
    fn test_negative_matrix_entry_rejected() {
        let mut matrix = cycle_matrix();
        matrix[2][3] = -8;
        assert_eq!(
            FlowNetwork::new(matrix, &[0], &[3]).unwrap_err(),
            FlowError::InvalidCapacity {
                from: 2,
                to: 3,
                capacity: -8
            }
        );
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let mut matrix = cycle_matrix();
        matrix[1].push(0);
        assert_eq!(
            FlowNetwork::new(matrix, &[0], &[3]).unwrap_err(),
            FlowError::MalformedMatrix {
                row: 1,
                len: 5,
                expected: 4
            }
        );
    }

    #[test]
    fn test_out_of_range_terminal_rejected() {
        assert_eq!(
            FlowNetwork::new(cycle_matrix(), &[0], &[4]).unwrap_err(),
            FlowError::InvalidNode(4)
        );
    }

    #[test]
    fn test_coincident_terminals_rejected() {
        assert_eq!(
            FlowNetwork::new(cycle_matrix(), &[2], &[2]).unwrap_err(),
            FlowError::InvalidNode(2)
        );
    }

    #[test]
    fn test_disconnected_terminals_yield_zero() {
        let matrix = vec![
            vec![0, 3, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 2],
            vec![0, 0, 0, 0],
        ];
        assert_eq!(push_relabel_max_flow(matrix, &[0], &[3]).unwrap(), 0);
    }
}
